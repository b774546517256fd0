use serde::{Deserialize, Serialize};

use crate::ident::Id;
use crate::lit::Lit;
use crate::mixop::MixOp;
use crate::num::NumKind;
use crate::pattern::Pattern;
use crate::region::Region;
use crate::typ::{Iter, Typ};

/// The operand type a unary/binary/comparison operator dispatches on.
///
/// Adjacently tagged rather than internally tagged: `Num` wraps `NumKind`,
/// itself a `kind`-tagged enum, and internal tagging would flatten both
/// enums' tag fields into one object under the same key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum OpTyp {
    Bool,
    Num(NumKind),
    Text,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnOp {
    Not,
    Neg,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinOp {
    And,
    Or,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    BAnd,
    BOr,
    BXor,
    Shl,
    Shr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CmpOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

/// A single iteration binder group, shared between `Exp::IterE` and the
/// instruction forms that loop a whole instruction (`IfI`, `LetI`, `RuleI`).
///
/// `binders` pairs a loop variable with the lifted (`ListT`/`OptT`-typed)
/// expression supplying its per-iteration values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IterExp {
    pub iter: Iter,
    pub binders: Vec<(Id, Exp)>,
}

/// A pure expression. Every variant carries its source region and its
/// declared (elaborator-assigned) type as a note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Exp {
    VarE {
        id: Id,
        typ: Typ,
        region: Region,
    },
    LitE {
        lit: Lit,
        typ: Typ,
        region: Region,
    },
    UnE {
        op: UnOp,
        op_typ: OpTyp,
        exp: Box<Exp>,
        typ: Typ,
        region: Region,
    },
    BinE {
        op: BinOp,
        op_typ: OpTyp,
        lhs: Box<Exp>,
        rhs: Box<Exp>,
        typ: Typ,
        region: Region,
    },
    CmpE {
        op: CmpOp,
        op_typ: OpTyp,
        lhs: Box<Exp>,
        rhs: Box<Exp>,
        typ: Typ,
        region: Region,
    },
    /// Mixfix constructor application, e.g. building a `CaseV`.
    CaseE {
        mixop: MixOp,
        args: Vec<Exp>,
        typ: Typ,
        region: Region,
    },
    TupleE {
        elems: Vec<Exp>,
        typ: Typ,
        region: Region,
    },
    ListE {
        elems: Vec<Exp>,
        typ: Typ,
        region: Region,
    },
    OptE {
        inner: Option<Box<Exp>>,
        typ: Typ,
        region: Region,
    },
    /// Struct field projection by atom.
    DotE {
        base: Box<Exp>,
        field: Id,
        typ: Typ,
        region: Region,
    },
    /// Tuple element projection by index.
    IdxE {
        base: Box<Exp>,
        index: usize,
        typ: Typ,
        region: Region,
    },
    HeadE {
        base: Box<Exp>,
        typ: Typ,
        region: Region,
    },
    TailE {
        base: Box<Exp>,
        typ: Typ,
        region: Region,
    },
    LenE {
        base: Box<Exp>,
        typ: Typ,
        region: Region,
    },
    MemE {
        elem: Box<Exp>,
        list: Box<Exp>,
        typ: Typ,
        region: Region,
    },
    CatE {
        lhs: Box<Exp>,
        rhs: Box<Exp>,
        typ: Typ,
        region: Region,
    },
    IterE {
        exp: Box<Exp>,
        iter_exp: IterExp,
        typ: Typ,
        region: Region,
    },
    /// Call of a `DecD` or a built-in.
    CallE {
        id: Id,
        args: Vec<Exp>,
        typ: Typ,
        region: Region,
    },
    /// An expression-level case: evaluates the scrutinee once, tries each
    /// arm's pattern in source order, first match wins.
    CaseMatchE {
        scrutinee: Box<Exp>,
        arms: Vec<(Pattern, Exp)>,
        typ: Typ,
        region: Region,
    },
}

impl Exp {
    pub fn typ(&self) -> &Typ {
        match self {
            Exp::VarE { typ, .. }
            | Exp::LitE { typ, .. }
            | Exp::UnE { typ, .. }
            | Exp::BinE { typ, .. }
            | Exp::CmpE { typ, .. }
            | Exp::CaseE { typ, .. }
            | Exp::TupleE { typ, .. }
            | Exp::ListE { typ, .. }
            | Exp::OptE { typ, .. }
            | Exp::DotE { typ, .. }
            | Exp::IdxE { typ, .. }
            | Exp::HeadE { typ, .. }
            | Exp::TailE { typ, .. }
            | Exp::LenE { typ, .. }
            | Exp::MemE { typ, .. }
            | Exp::CatE { typ, .. }
            | Exp::IterE { typ, .. }
            | Exp::CallE { typ, .. }
            | Exp::CaseMatchE { typ, .. } => typ,
        }
    }

    pub fn region(&self) -> &Region {
        match self {
            Exp::VarE { region, .. }
            | Exp::LitE { region, .. }
            | Exp::UnE { region, .. }
            | Exp::BinE { region, .. }
            | Exp::CmpE { region, .. }
            | Exp::CaseE { region, .. }
            | Exp::TupleE { region, .. }
            | Exp::ListE { region, .. }
            | Exp::OptE { region, .. }
            | Exp::DotE { region, .. }
            | Exp::IdxE { region, .. }
            | Exp::HeadE { region, .. }
            | Exp::TailE { region, .. }
            | Exp::LenE { region, .. }
            | Exp::MemE { region, .. }
            | Exp::CatE { region, .. }
            | Exp::IterE { region, .. }
            | Exp::CallE { region, .. }
            | Exp::CaseMatchE { region, .. } => region,
        }
    }
}
