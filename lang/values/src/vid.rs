use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// The identity stamped on every value: monotonically increasing,
/// process-wide, never reused. Two values with identical payload may carry
/// distinct `Vid`s; comparison is always by payload (see
/// [`crate::Value`]'s `PartialEq`), never by `Vid`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Vid(u64);

impl Vid {
    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for Vid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

static NEXT_VID: AtomicU64 = AtomicU64::new(0);

/// Allocates the next `Vid`. Not reset between evaluations within one
/// process; each `Context` keeps its own value graph keyed by the ids it
/// sees, so reuse across contexts is harmless.
pub fn fresh_vid() -> Vid {
    Vid(NEXT_VID.fetch_add(1, Ordering::Relaxed))
}
