use thiserror::Error;

/// Failures raised by `Value`'s accessor views, when the dynamic tag
/// disagrees with the requested view.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValueError {
    #[error("expected a value of kind {expected}, found {actual}")]
    KindMismatch { expected: &'static str, actual: &'static str },
    #[error("expected a case value tagged {expected}, found {actual}")]
    CaseMismatch { expected: String, actual: String },
    #[error("expected a struct field `{field}`, which is absent")]
    MissingField { field: String },
}
