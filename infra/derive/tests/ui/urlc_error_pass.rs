use std::borrow::Cow;
use urlc_derive::urlc_error;

#[urlc_error]
pub enum FetchError {
    #[error("IO error{}: {source}", format_context(.context))]
    Io {
        #[source]
        source: std::io::Error,
        context: Option<Cow<'static, str>>,
    },

    #[error("Status {status}{}", format_context(.context))]
    Status { status: u16, context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn main() {
    let _: FetchError = "boom".into();
    let _: FetchError = std::io::Error::other("io").into();
}
