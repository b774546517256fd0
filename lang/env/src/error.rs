use miette::Diagnostic;
use p4st_ast::{Id, Region};
use thiserror::Error;

/// The interpreter's error taxonomy. Propagation is unconditional: an
/// `EngineError` aborts the current evaluation and travels to the driver
/// unchanged, with no local recovery.
#[derive(Error, Diagnostic, Debug, Clone)]
pub enum EngineError {
    #[error("{region}: unbound identifier `{id}`")]
    #[diagnostic(code("E-UNBOUND"))]
    Unbound { id: Id, region: Region },

    #[error("{region}: {source}")]
    #[diagnostic(code("E-KIND"))]
    KindMismatch {
        region: Region,
        #[source]
        source: p4st_values::ValueError,
    },

    #[error("{region}: iteration binders disagree in length")]
    #[diagnostic(code("E-ITER-ARITY"))]
    IterLengthMismatch { region: Region },

    #[error("{region}: pattern did not match the right-hand side")]
    #[diagnostic(code("E-LET-MISMATCH"))]
    LetMismatch { region: Region },

    #[error("{region}: list is empty")]
    #[diagnostic(code("E-EMPTY-LIST"))]
    EmptyList { region: Region },

    #[error("{region}: division by zero")]
    #[diagnostic(code("E-DIV-ZERO"))]
    DivByZero { region: Region },

    #[error("{region}: relation `{rel_id}` failed to produce a result")]
    #[diagnostic(code("E-REL-FAILED"))]
    RelFailed { rel_id: Id, region: Region },

    #[error("{region}: recursion depth exceeded {bound}")]
    #[diagnostic(code("E-STACK-OVERFLOW"))]
    StackOverflow { bound: u32, region: Region },

    #[error("{region}: evaluation deadline exceeded")]
    #[diagnostic(code("E-DEADLINE"))]
    Deadline { region: Region },

    #[error("builtin `{name}` failed: {message}")]
    #[diagnostic(code("E-BUILTIN"))]
    BuiltinError { name: String, message: String },

    #[error("{region}: parse error: {message}")]
    #[diagnostic(code("E-PARSE"))]
    Parse { region: Region, message: String },

    #[error("{region}: elaboration error: {message}")]
    #[diagnostic(code("E-ELAB"))]
    Elab { region: Region, message: String },
}

impl EngineError {
    pub fn kind_mismatch(region: Region, source: p4st_values::ValueError) -> Self {
        EngineError::KindMismatch { region, source }
    }
}
