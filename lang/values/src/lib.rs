//! Canonical, identity-stamped runtime values.

pub mod error;
pub mod value;
pub mod vid;

pub use error::ValueError;
pub use value::{Value, ValueKind, ValueNote};
pub use vid::{fresh_vid, Vid};
