//! Variable/relation/function bindings, value graph and execution trace.

pub mod builtins;
pub mod context;
pub mod error;
pub mod trace;

pub use builtins::Builtins;
pub use context::Context;
pub use error::EngineError;
pub use trace::{DependencyEdge, PhantomHit};
