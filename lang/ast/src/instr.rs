use serde::{Deserialize, Serialize};

use crate::exp::{CmpOp, Exp, IterExp, OpTyp};
use crate::ident::Id;
use crate::pattern::Pattern;
use crate::phantom::Phantom;
use crate::region::Region;
use crate::typ::Typ;

/// The guard of a `CaseI` arm.
///
/// Adjacently tagged: `BoolG` wraps a bare `bool`, and `SubG`/`MatchG`/
/// `MemG` each wrap a `kind`-tagged type (`Typ`/`Pattern`/`Exp`), so
/// internal tagging would either reject the primitive or collide tags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum Guard {
    /// A literal boolean, used for exhaustive splits.
    BoolG(bool),
    CmpG { op: CmpOp, op_typ: OpTyp, exp: Exp },
    /// The scrutinee's dynamic type is a subtype of `typ`.
    SubG(Typ),
    /// Structural pattern match; bindings enter the arm's scope.
    MatchG(Pattern),
    /// The scrutinee is an element of the list produced by `exp`.
    MemG(Exp),
}

/// One arm of a `CaseI`: a guard plus the instructions to run if it holds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Case {
    pub guard: Guard,
    pub body: Vec<Instr>,
}

/// The callee expression of a `RuleI`: the relation's mixfix application,
/// optionally negated (a negative premise).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotExp {
    pub negated: bool,
    pub exp: Exp,
}

/// One instruction in an instruction list. Execution of a list either
/// extends the scope, records results (`ResultI`/`ReturnI`), or falls
/// through to the next instruction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Instr {
    IfI {
        cond: Exp,
        iters: Vec<IterExp>,
        body: Vec<Instr>,
        #[serde(skip_serializing_if = "Option::is_none", default)]
        phantom: Option<Phantom>,
        region: Region,
    },
    CaseI {
        scrutinee: Exp,
        cases: Vec<Case>,
        #[serde(skip_serializing_if = "Option::is_none", default)]
        phantom: Option<Phantom>,
        region: Region,
    },
    /// Valid only as the last case of the enclosing `CaseI`; its body runs
    /// iff every earlier case failed.
    OtherwiseI {
        inner: Box<Instr>,
        region: Region,
    },
    LetI {
        lhs: Pattern,
        rhs: Exp,
        iters: Vec<IterExp>,
        region: Region,
    },
    RuleI {
        rel_id: Id,
        call: NotExp,
        iters: Vec<IterExp>,
        region: Region,
    },
    ResultI {
        exps: Vec<Exp>,
        region: Region,
    },
    ReturnI {
        exp: Exp,
        region: Region,
    },
}

impl Instr {
    pub fn region(&self) -> &Region {
        match self {
            Instr::IfI { region, .. }
            | Instr::CaseI { region, .. }
            | Instr::OtherwiseI { region, .. }
            | Instr::LetI { region, .. }
            | Instr::RuleI { region, .. }
            | Instr::ResultI { region, .. }
            | Instr::ReturnI { region, .. } => region,
        }
    }
}
