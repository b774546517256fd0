use serde::{Deserialize, Serialize};

use crate::exp::{Exp, IterExp};

/// Identifies a single phantom (a branch not entered) across an IL module.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Pid(pub u32);

/// A condition attached to a phantom, describing the quantification over
/// any enclosing iteration at the point the phantom would have fired.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum PathCond {
    ForallC { exp: Exp, iters: Vec<IterExp> },
    ExistsC { exp: Exp, iters: Vec<IterExp> },
    PlainC { exp: Exp },
}

/// The phantom carried by an `If`/`Case` branch not taken: an identity plus
/// the path conditions enclosing it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Phantom {
    pub pid: Pid,
    pub conds: Vec<PathCond>,
}
