use std::borrow::Cow;

/// A specialized [`SearchError`] enum of this crate.
#[urlc_derive::urlc_error]
pub enum SearchError {
    /// The request never produced a response (connect, TLS, timeout).
    #[error("Search transport error{}: {source}", format_context(.context))]
    Transport { source: reqwest::Error, context: Option<Cow<'static, str>> },
    /// The API answered with a non-success status.
    #[error("Search API returned HTTP {status}{}: {body}", format_context(.context))]
    Status { status: u16, body: String, context: Option<Cow<'static, str>> },
    /// The response body was not the expected JSON.
    #[error("Search response decode error{}: {source}", format_context(.context))]
    Decode { source: serde_json::Error, context: Option<Cow<'static, str>> },
    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal search error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
