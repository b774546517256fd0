use std::fmt;

use serde::{Deserialize, Serialize};

/// A mixfix operator: the ordered textual tokens of a constructor,
/// interleaved with argument holes.
///
/// `tokens` has `arity() + 1` entries; `tokens[i]` is the literal text
/// preceding the `i`-th argument hole, and the last entry is the text after
/// the final hole (often empty). For example `a + b` has tokens
/// `["", "+", ""]` and arity 2; a nullary constructor `TRUE` has tokens
/// `["TRUE"]` and arity 0.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MixOp {
    pub tokens: Vec<String>,
}

impl MixOp {
    pub fn new(tokens: Vec<String>) -> Self {
        assert!(!tokens.is_empty(), "a mixfix operator needs at least one token slot");
        MixOp { tokens }
    }

    /// A nullary, purely nominal constructor such as an enum variant.
    pub fn atom(name: impl Into<String>) -> Self {
        MixOp::new(vec![name.into()])
    }

    pub fn arity(&self) -> usize {
        self.tokens.len() - 1
    }
}

impl fmt::Display for MixOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, tok) in self.tokens.iter().enumerate() {
            if i > 0 {
                write!(f, "_")?;
            }
            write!(f, "{tok}")?;
        }
        Ok(())
    }
}
