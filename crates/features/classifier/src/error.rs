use std::borrow::Cow;

/// A specialized [`ClassifierError`] enum of this crate.
#[urlc_derive::urlc_error]
pub enum ClassifierError {
    #[error("Completion transport error{}: {source}", format_context(.context))]
    Transport { source: reqwest::Error, context: Option<Cow<'static, str>> },
    #[error("Completion API returned HTTP {status}{}: {body}", format_context(.context))]
    Status { status: u16, body: String, context: Option<Cow<'static, str>> },
    #[error("Completion decode error{}: {source}", format_context(.context))]
    Decode { source: serde_json::Error, context: Option<Cow<'static, str>> },
    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal classifier error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
