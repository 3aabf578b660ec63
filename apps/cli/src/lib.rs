//! # url-collector
//!
//! Command line front end of the collector. Results go to stdout; progress, totals and
//! logs go to stderr.
#![allow(clippy::print_stdout, clippy::print_stderr)]

pub mod app;
pub mod args;

pub use app::run;
pub use args::Cli;
