//! The demand-driven spec-loading and invocation driver: deliberately
//! narrower than a full multi-file incremental database, since there is no
//! multi-file dependency graph or incremental cache to maintain — one
//! `Engine` wraps one already-elaborated `Spec`.

mod engine;
mod error;
mod json;

pub use engine::{Engine, RunOutcome};
pub use error::DriverError;
pub use json::{json_to_value, value_to_json};
