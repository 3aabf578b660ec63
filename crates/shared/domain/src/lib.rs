//! # Domain Models
//!
//! Plain data shared by every collector crate: search hits, modes and output formats,
//! per-domain reports and the shape of the configuration.
//! Keep it lean: no I/O or networking here, just data and simple helpers.

pub mod config;
mod hit;
mod mode;
mod report;

pub use hit::SearchHit;
pub use mode::{Classification, OutputFormat, SearchMode};
pub use report::DomainReport;
