use p4st_ast::Instr;
use p4st_env::{Context, EngineError};
use p4st_values::Value;

/// What running an instruction list produced.
#[derive(Debug, Clone, PartialEq)]
pub enum Flow {
    /// A `ResultI` or `ReturnI` fired.
    Completed(Vec<Value>),
    /// No terminating instruction fired.
    Fallthrough,
}

/// The hook `Exp::CallE` and `Exp::IterE` use to run a callee's
/// instruction list, implemented by `p4st-interp`'s interpreter.
///
/// This breaks the mutually recursive `Exp -> Instr -> Exp` dependency the
/// language's grammar has at the data level: rather than one crate owning
/// both `Eval` and `Exec`, `p4st-eval` only depends on this trait, and
/// `p4st-interp` (which already depends on `p4st-eval`) provides the
/// implementation.
pub trait InstrHost {
    fn exec(&self, ctx: &mut Context, instrs: &[Instr]) -> Result<Flow, EngineError>;
}
