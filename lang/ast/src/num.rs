use std::fmt;

use num_bigint::BigInt;
use num_traits::{Signed, Zero};
use serde::{Deserialize, Serialize};

/// The tag of a `Num`: natural number, signed integer, or a fixed-width
/// bit-vector with its declared width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum NumKind {
    Nat,
    Int,
    Bv { width: u32 },
}

impl fmt::Display for NumKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumKind::Nat => write!(f, "nat"),
            NumKind::Int => write!(f, "int"),
            NumKind::Bv { width } => write!(f, "bv({width})"),
        }
    }
}

/// A tagged arbitrary-precision number.
///
/// Arithmetic on `nat`/`int` is exact; `bv(width)` values are kept
/// normalized to `0 <= value < 2^width` by every constructor here, so
/// downstream code never has to re-check the invariant.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Num {
    kind: NumKind,
    value: BigInt,
}

impl Num {
    /// Builds a `Num`, normalizing bit-vector values modulo `2^width`.
    pub fn new(kind: NumKind, value: BigInt) -> Self {
        let value = match kind {
            NumKind::Nat | NumKind::Int => value,
            NumKind::Bv { width } => wrap_bv(&value, width),
        };
        Num { kind, value }
    }

    pub fn nat(value: impl Into<BigInt>) -> Self {
        Num::new(NumKind::Nat, value.into())
    }

    pub fn int(value: impl Into<BigInt>) -> Self {
        Num::new(NumKind::Int, value.into())
    }

    pub fn bv(width: u32, value: impl Into<BigInt>) -> Self {
        Num::new(NumKind::Bv { width }, value.into())
    }

    pub fn kind(&self) -> NumKind {
        self.kind
    }

    pub fn value(&self) -> &BigInt {
        &self.value
    }

    pub fn is_valid(&self) -> bool {
        match self.kind {
            NumKind::Nat => !self.value.is_negative(),
            NumKind::Int => true,
            NumKind::Bv { width } => {
                !self.value.is_negative() && self.value < bv_modulus(width)
            }
        }
    }
}

impl fmt::Display for Num {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

fn bv_modulus(width: u32) -> BigInt {
    BigInt::from(1) << width
}

/// Reduces `value` into `[0, 2^width)`, matching two's-complement wraparound.
pub fn wrap_bv(value: &BigInt, width: u32) -> BigInt {
    let modulus = bv_modulus(width);
    let reduced = value % &modulus;
    if reduced.is_negative() {
        reduced + modulus
    } else {
        reduced
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bv_wraps_negative_modulo_width() {
        let n = Num::bv(8, BigInt::from(-1));
        assert_eq!(n.value(), &BigInt::from(255));
    }

    #[test]
    fn bv_wraps_overflow_modulo_width() {
        let n = Num::bv(4, BigInt::from(17));
        assert_eq!(n.value(), &BigInt::from(1));
    }

    #[test]
    fn nat_is_unwrapped_and_exact() {
        let n = Num::nat(BigInt::from(42));
        assert_eq!(n.value(), &BigInt::from(42));
        assert!(n.is_valid());
    }

    #[test]
    fn zero_is_zero_in_every_kind() {
        assert!(Num::nat(BigInt::zero()).value().is_zero());
        assert!(Num::bv(0, BigInt::from(5)).value().is_zero());
    }
}
