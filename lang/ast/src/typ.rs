use serde::{Deserialize, Serialize};

use crate::ident::Id;
use crate::mixop::MixOp;
use crate::num::NumKind;

/// The iteration shape lifted over a type or binder: `Opt` runs zero or one
/// time, `List` runs the common length of its binders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Iter {
    Opt,
    List,
}

/// A structural IL type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Typ {
    BoolT,
    NumT { num_kind: NumKind },
    TextT,
    ListT { elem: Box<Typ> },
    TupleT { elems: Vec<Typ> },
    OptT { elem: Box<Typ> },
    /// Reference to a declared type, applied to type arguments.
    VarT { id: Id, targs: Vec<Typ> },
    /// An iterator lift over some other type.
    IterT { elem: Box<Typ>, iter: Iter },
}

impl Typ {
    pub fn list(elem: Typ) -> Self {
        Typ::ListT { elem: Box::new(elem) }
    }

    pub fn opt(elem: Typ) -> Self {
        Typ::OptT { elem: Box::new(elem) }
    }

    pub fn iter(elem: Typ, iter: Iter) -> Self {
        Typ::IterT { elem: Box::new(elem), iter }
    }

    pub fn var(id: impl Into<Id>, targs: Vec<Typ>) -> Self {
        Typ::VarT { id: id.into(), targs }
    }
}

/// A type parameter: just a binder name, SL types carry no kind annotation.
pub type TParam = Id;

/// A formal parameter of a function or relation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Param {
    pub id: Id,
    pub typ: Typ,
}

/// The body of a `TypD`: how a declared type is defined.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum DefTyp {
    /// A sum of mixfix-tagged variants, each with its argument types.
    VariantT { variants: Vec<(MixOp, Vec<Typ>)> },
    /// A record type: atom-keyed fields, insertion order significant.
    StructT { fields: Vec<(Id, Typ)> },
    /// A transparent alias.
    AliasT { typ: Typ },
}
