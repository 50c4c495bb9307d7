use marche_derive::marche_error;
use std::borrow::Cow;

#[marche_error]
pub enum UploadError {
    #[error("I/O error{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("Rejected upload{}: {message}", format_context(.context))]
    Rejected { message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn open() -> Result<(), UploadError> {
    std::fs::read("/definitely/missing").map(|_| ()).context("Reading upload")
}

fn main() {
    let err = open().unwrap_err();
    assert!(err.to_string().contains("(Reading upload)"));

    let internal: UploadError = "boom".into();
    assert!(matches!(internal, UploadError::Internal { .. }));

    let rejected = UploadError::Rejected { message: "svg".into(), context: None }
        .with_context("Inline vector images disabled");
    assert_eq!(rejected.to_string(), "Rejected upload (Inline vector images disabled): svg");
}
