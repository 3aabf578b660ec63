use std::borrow::Cow;
use urlc_derive::urlc_error;

#[urlc_error]
pub enum ProbeError {
    #[error("IO error{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("Rejected{}: {reason}", format_context(.context))]
    Rejected { reason: String, context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn read_missing() -> Result<(), ProbeError> {
    Err(std::io::Error::new(std::io::ErrorKind::NotFound, "gone")).context("reading key file")
}

#[test]
fn urlc_error_ui() {
    let t = trybuild::TestCases::new();
    t.pass("tests/ui/urlc_error_pass.rs");
}

#[test]
fn source_errors_pick_up_context() {
    let err = read_missing().unwrap_err();
    assert!(matches!(err, ProbeError::Io { .. }));
    assert_eq!(err.to_string(), "IO error (reading key file): gone");
}

#[test]
fn context_is_attached_to_own_variants() {
    let result: Result<(), ProbeError> =
        Err(ProbeError::Rejected { reason: "empty".to_owned(), context: None });
    let err = result.context("validating").unwrap_err();
    assert_eq!(err.to_string(), "Rejected (validating): empty");
}

#[test]
fn strings_convert_into_internal() {
    let err: ProbeError = format!("bad {}", 42).into();
    assert!(matches!(err, ProbeError::Internal { .. }));
    assert_eq!(err.to_string(), "Internal error: bad 42");
}
