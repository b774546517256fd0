//! The pure expression evaluator.

pub mod eval;
pub mod host;
mod ops;

pub use eval::Eval;
pub use host::{Flow, InstrHost};
pub use ops::apply_cmp as compare_values;
