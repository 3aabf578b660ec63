//! # Classifier
//!
//! Separates navigational (SEO) pages from individual posts. Obvious URL shapes are
//! decided by the rules in `urlc-filtering`; the remainder is sent in numbered batches
//! to a chat-completion model ([`GroqClient`] by default).

mod error;

pub mod classifier;
pub mod client;
pub mod prompt;

pub use classifier::UrlClassifier;
pub use client::{CompletionBackend, GroqClient};
pub use error::{ClassifierError, ClassifierErrorExt};
pub use prompt::{build_prompt, parse_reply};
