use miette::Diagnostic;
use p4st_env::EngineError;
use thiserror::Error;

/// Errors the driver can report, wrapping `EngineError` with the load-time
/// and input-decoding failures that only make sense at the driver boundary.
#[derive(Error, Diagnostic, Debug)]
pub enum DriverError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Engine(#[from] EngineError),

    #[error("failed to parse spec JSON: {0}")]
    #[diagnostic(code("E-SPEC-PARSE"))]
    SpecParse(#[source] serde_json::Error),

    #[error("no definition named `{id}`")]
    #[diagnostic(code("E-UNBOUND-DEF"))]
    UnboundDef { id: String },

    #[error("`{id}` is not a relation")]
    #[diagnostic(code("E-NOT-A-RELATION"))]
    NotARelation { id: String },

    #[error("`{id}` is not a function")]
    #[diagnostic(code("E-NOT-A-FUNCTION"))]
    NotAFunction { id: String },

    #[error("`{id}` expects {expected} input value(s), got {actual}")]
    #[diagnostic(code("E-ARITY"))]
    ArityMismatch { id: String, expected: usize, actual: usize },

    #[error("cannot decode a CLI value of type {typ}")]
    #[diagnostic(code("E-UNSUPPORTED-INPUT-TYPE"))]
    UnsupportedInputType { typ: String },

    #[error("input JSON does not match the expected shape: {message}")]
    #[diagnostic(code("E-INPUT-SHAPE"))]
    InputShape { message: String },

    #[error("unknown type `{id}`")]
    #[diagnostic(code("E-UNKNOWN-TYPE"))]
    UnknownType { id: String },
}
