use serde::{Deserialize, Serialize};

use crate::ident::Id;
use crate::lit::Lit;
use crate::mixop::MixOp;
use crate::region::Region;

/// A structural pattern matched against a runtime value.
///
/// Patterns are finite trees, so matching always terminates; binders must
/// be linear within one pattern (an elaborator-enforced invariant, not
/// re-checked by the matcher).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Pattern {
    WildP {
        #[serde(skip_serializing_if = "Option::is_none", default)]
        region: Option<Region>,
    },
    VarP {
        id: Id,
        #[serde(skip_serializing_if = "Option::is_none", default)]
        region: Option<Region>,
    },
    LitP {
        lit: Lit,
        #[serde(skip_serializing_if = "Option::is_none", default)]
        region: Option<Region>,
    },
    CaseP {
        mixop: MixOp,
        subpatterns: Vec<Pattern>,
        #[serde(skip_serializing_if = "Option::is_none", default)]
        region: Option<Region>,
    },
    TupleP {
        subpatterns: Vec<Pattern>,
        #[serde(skip_serializing_if = "Option::is_none", default)]
        region: Option<Region>,
    },
    ListP {
        prefix: Vec<Pattern>,
        rest: Option<Box<Pattern>>,
        suffix: Vec<Pattern>,
        #[serde(skip_serializing_if = "Option::is_none", default)]
        region: Option<Region>,
    },
}

impl Pattern {
    pub fn wild() -> Self {
        Pattern::WildP { region: None }
    }

    pub fn var(id: impl Into<Id>) -> Self {
        Pattern::VarP { id: id.into(), region: None }
    }

    pub fn region(&self) -> Option<&Region> {
        match self {
            Pattern::WildP { region }
            | Pattern::VarP { region, .. }
            | Pattern::LitP { region, .. }
            | Pattern::CaseP { region, .. }
            | Pattern::TupleP { region, .. }
            | Pattern::ListP { region, .. } => region.as_ref(),
        }
    }
}
