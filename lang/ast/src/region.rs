use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// A 1-based source position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(line: u32, column: u32) -> Self {
        Position { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A source region: an optional file plus a start/end position pair.
///
/// Regions are opaque to the interpreter: they are carried on every IL node
/// for diagnostics only and never participate in value comparison.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Region {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub file: Option<Arc<str>>,
    pub start: Position,
    pub end: Position,
}

impl Region {
    pub fn new(file: Option<Arc<str>>, start: Position, end: Position) -> Self {
        Region { file, start, end }
    }

    /// A region with no source information, for synthesized nodes.
    pub fn synthetic() -> Self {
        Region {
            file: None,
            start: Position::new(0, 0),
            end: Position::new(0, 0),
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.file {
            Some(file) => write!(f, "{file}:{}-{}", self.start, self.end),
            None => write!(f, "{}-{}", self.start, self.end),
        }
    }
}
