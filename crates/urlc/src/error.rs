use std::borrow::Cow;

/// A specialized [`CollectError`] enum of this crate.
#[urlc_derive::urlc_error]
pub enum CollectError {
    #[error("Search failed{}: {source}", format_context(.context))]
    Search { source: urlc_search::SearchError, context: Option<Cow<'static, str>> },
    #[error("Classifier failed{}: {source}", format_context(.context))]
    Classifier { source: urlc_classifier::ClassifierError, context: Option<Cow<'static, str>> },
    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal collector error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
