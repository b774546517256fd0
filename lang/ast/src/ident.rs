use std::fmt;

use derivative::Derivative;
use serde::{Deserialize, Serialize};

use crate::region::Region;

/// A textual identifier carrying a source region.
///
/// Equality, ordering and hashing are by string content only: two
/// identifiers written at different source locations but spelled the same
/// are the same `Id`, via `#[derivative(PartialEq = "ignore", Hash =
/// "ignore")]` on the region field.
#[derive(Derivative, Debug, Clone, Serialize, Deserialize)]
#[derivative(PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Id {
    pub name: String,
    #[derivative(PartialEq = "ignore", Hash = "ignore", PartialOrd = "ignore", Ord = "ignore")]
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub region: Option<Region>,
}

impl Id {
    pub fn new(name: impl Into<String>) -> Self {
        Id { name: name.into(), region: None }
    }

    pub fn with_region(name: impl Into<String>, region: Region) -> Self {
        Id { name: name.into(), region: Some(region) }
    }

    pub fn as_str(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl From<&str> for Id {
    fn from(value: &str) -> Self {
        Id::new(value)
    }
}

impl From<String> for Id {
    fn from(value: String) -> Self {
        Id::new(value)
    }
}

impl std::borrow::Borrow<str> for Id {
    fn borrow(&self) -> &str {
        &self.name
    }
}
