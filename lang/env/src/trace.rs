use p4st_ast::{Exp, Pid};
use p4st_values::Vid;

/// A single phantom recorded during an evaluation: a branch that was not
/// entered, together with the conjunction of enclosing guards in scope at
/// that point (the "context path").
#[derive(Debug, Clone, PartialEq)]
pub struct PhantomHit {
    pub pid: Pid,
    pub context_path: Vec<Exp>,
}

/// One entry of the value graph: a value's `vid` plus the `vid`s it was
/// derived from. Append-only, never invalidated.
#[derive(Debug, Clone, PartialEq)]
pub struct DependencyEdge {
    pub vid: Vid,
    pub depends_on: Vec<Vid>,
}
