//! Kernel utilities shared across the collector crates.
//! Keep this crate lightweight: layered config loading, API key storage, URL parsing
//! helpers and the result renderers.
//!
//! ## Config loading
//! ```rust,no_run
//! use urlc_kernel::config::load_config;
//! use urlc_kernel::domain::config::AppConfig;
//!
//! let cfg: AppConfig = load_config(None::<&str>).unwrap_or_default();
//! assert_eq!(cfg.serper.per_page, 10);
//! ```
//!
//! ## URL helpers
//! ```rust
//! use urlc_kernel::url::{ParsedUrl, normalize_domain};
//!
//! assert_eq!(normalize_domain(" https://mtgal.com/ "), "mtgal.com");
//! let parsed = ParsedUrl::parse("https://mtgal.com/bbs/board.php?bo_table=free&wr_id=7").unwrap();
//! assert!(parsed.has_param("wr_id"));
//! ```
pub mod config;
pub mod credentials;
pub mod export;
pub mod url;

pub use urlc_domain as domain;
