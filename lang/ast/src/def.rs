use serde::{Deserialize, Serialize};

use crate::exp::Exp;
use crate::ident::Id;
use crate::instr::Instr;
use crate::mixop::MixOp;
use crate::region::Region;
use crate::typ::{DefTyp, Param, TParam};

/// A type declaration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypD {
    pub id: Id,
    pub tparams: Vec<TParam>,
    pub deftyp: DefTyp,
    pub region: Region,
}

/// An inductive relation. `mixop` names the judgment's notation; `args` are
/// the full argument-slot list (one per mixop hole, written as an `Exp` so
/// an input slot can be a destructuring pattern); `input_indices` selects
/// which of `args` the caller supplies — the rest are produced by `instrs`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelD {
    pub id: Id,
    pub mixop: MixOp,
    pub input_indices: Vec<usize>,
    pub args: Vec<Exp>,
    pub instrs: Vec<Instr>,
    pub region: Region,
}

impl RelD {
    pub fn output_indices(&self) -> Vec<usize> {
        (0..self.args.len())
            .filter(|i| !self.input_indices.contains(i))
            .collect()
    }
}

/// A deterministic function.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecD {
    pub id: Id,
    pub tparams: Vec<TParam>,
    pub params: Vec<Param>,
    pub instrs: Vec<Instr>,
    pub region: Region,
}

/// A top-level definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Def {
    TypD(TypD),
    RelD(RelD),
    DecD(DecD),
}

impl Def {
    pub fn id(&self) -> &Id {
        match self {
            Def::TypD(d) => &d.id,
            Def::RelD(d) => &d.id,
            Def::DecD(d) => &d.id,
        }
    }

    pub fn region(&self) -> &Region {
        match self {
            Def::TypD(d) => &d.region,
            Def::RelD(d) => &d.region,
            Def::DecD(d) => &d.region,
        }
    }
}

/// A flat, topologically orderable list of definitions: the unit an
/// `Engine` loads.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Spec {
    pub defs: Vec<Def>,
}

impl Spec {
    pub fn new(defs: Vec<Def>) -> Self {
        Spec { defs }
    }

    pub fn find(&self, id: &str) -> Option<&Def> {
        self.defs.iter().find(|d| d.id().as_str() == id)
    }

    pub fn find_rel(&self, id: &str) -> Option<&RelD> {
        self.defs.iter().find_map(|d| match d {
            Def::RelD(r) if r.id.as_str() == id => Some(r),
            _ => None,
        })
    }

    pub fn find_dec(&self, id: &str) -> Option<&DecD> {
        self.defs.iter().find_map(|d| match d {
            Def::DecD(r) if r.id.as_str() == id => Some(r),
            _ => None,
        })
    }

    pub fn find_typ(&self, id: &str) -> Option<&TypD> {
        self.defs.iter().find_map(|d| match d {
            Def::TypD(t) if t.id.as_str() == id => Some(t),
            _ => None,
        })
    }
}
