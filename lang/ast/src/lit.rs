use serde::{Deserialize, Serialize};

use crate::num::Num;

/// A literal payload shared by `Exp::LitE` and `Pattern::LitP`.
///
/// Adjacently tagged: `BoolL`/`TextL` wrap bare primitives, which internal
/// tagging cannot flatten a tag field into, and `NumL` wraps `Num`, whose
/// own `kind` field would otherwise collide with this enum's tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum Lit {
    BoolL(bool),
    NumL(Num),
    TextL(String),
}
