#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros shared by the collector crates:
//!
//! * [`macro@urlc_error`] turns a plain enum into a context-aware error type.
//! * [`macro@main`] bootstraps a profiled Tokio runtime around `async fn main`.
//!
//! Examples are `ignore`d because they need the consuming crates to compile.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, ItemFn, parse_macro_input};

/// Attribute macro to bootstrap a profiled Tokio runtime.
///
/// Transforms an `async fn main` returning a `Result` into a synchronous `fn main`
/// that builds the runtime described by the chosen profile and blocks on the body.
///
/// # Arguments
///
/// * `lightweight` - Few worker threads and small stacks; suited to CLI tools.
/// * `default` - Worker threads follow available parallelism.
///
/// # Examples
///
/// ```rust,ignore
/// #[urlc_runtime::main(lightweight)]
/// async fn main() -> anyhow::Result<()> {
///     Ok(())
/// }
/// ```
#[proc_macro_attribute]
pub fn main(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    macros::runtime::expand_main(args.into(), input).into()
}

/// Attribute macro for crate-level error enums.
///
/// # Features
///
/// * **Automatic Derives**: Injects `#[derive(Debug, thiserror::Error)]` when missing.
/// * **Context Support**: Generates a companion `...Ext` trait that adds `.context()`
///   to any `Result` whose error is this enum or one of its wrapped source errors.
/// * **Standard Conversions**: Implements `From<T>` for variants carrying a `source`
///   field, so `?` works on upstream errors.
/// * **Internal Fallback**: Implements `From<&'static str>` and `From<String>` when an
///   `Internal` variant is present.
///
/// # Requirements
///
/// 1. The macro must be applied to an **enum** with named-field variants only.
/// 2. A `context` field, when present, must be `Option<Cow<'static, str>>`.
/// 3. Variants wrapping a source error must also carry a `context` field.
///
/// # Example
///
/// ```rust,ignore
/// use std::borrow::Cow;
///
/// #[urlc_derive::urlc_error]
/// pub enum SearchError {
///     #[error("HTTP transport error{}: {source}", format_context(.context))]
///     Transport { source: reqwest::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Internal search error{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// async fn fetch(client: &reqwest::Client) -> Result<String, SearchError> {
///     let resp = client.get("https://example.com").send().await.context("GET example")?;
///     resp.text().await.map_err(SearchError::from)
/// }
/// ```
#[proc_macro_attribute]
pub fn urlc_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand_derive(input).into()
}
