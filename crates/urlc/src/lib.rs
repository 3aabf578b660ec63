//! Facade crate for the URL collector.
//! Re-exports domain/kernel primitives and composes the search, filtering and classifier
//! slices into one per-domain pipeline.
//! Keep this crate thin: it should compose other crates, not implement heuristics.
//!
//! ## Usage
//! ```rust,no_run
//! use urlc::domain::SearchMode;
//! use urlc::domain::config::AppConfig;
//! use urlc::{CollectOptions, Collector};
//!
//! # async fn run() -> Result<(), urlc::CollectError> {
//! let config = AppConfig::default();
//! let options = CollectOptions::from_config(&config);
//! let collector = Collector::new(config, "serper-key", None)?;
//! let reports = collector.collect_all(&["example.com"], SearchMode::Article, &options).await;
//! assert_eq!(reports.len(), 1);
//! # Ok(())
//! # }
//! ```

mod collector;
mod error;

pub use collector::{CollectOptions, Collector, display_score};
pub use error::{CollectError, CollectErrorExt};
pub use urlc_domain as domain;
pub use urlc_kernel as kernel;

/// Feature slices composed by [`Collector`].
pub mod features {
    pub use urlc_classifier as classifier;
    pub use urlc_filtering as filtering;
    pub use urlc_search as search;
}
