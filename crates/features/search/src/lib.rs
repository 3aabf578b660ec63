//! # Search
//!
//! Google results through the Serper API:
//!
//! * [`SerperClient`] implements [`SearchBackend`] over HTTP.
//! * [`Paginator`] walks result pages under a [`PagingPolicy`]; [`site_search`] is the
//!   strict `site:` collection used for article and ranked modes.
//! * [`BrandSearcher`] resolves a domain's brand and gathers its navigational pages.
//!
//! ```rust,no_run
//! use urlc_domain::config::SerperConfig;
//! use urlc_search::{SerperClient, site_search};
//!
//! # async fn run() -> Result<(), urlc_search::SearchError> {
//! let client = SerperClient::new("api-key", SerperConfig::default())?;
//! let hits = site_search(&client, "example.com", 30, 10).await?;
//! println!("{} URLs", hits.len());
//! # Ok(())
//! # }
//! ```

mod error;

pub mod brand;
pub mod client;
pub mod paging;

pub use brand::{BrandSearcher, extract_brand_name};
pub use client::{OrganicResult, SearchBackend, SearchQuery, SerperClient};
pub use error::{SearchError, SearchErrorExt};
pub use paging::{Paginator, PagingPolicy, site_search};
