use num_bigint::BigInt;
use p4st_ast::{BinOp, CmpOp, Num, NumKind, OpTyp, Region, UnOp};
use p4st_env::EngineError;
use p4st_values::{Value, ValueError};

fn invalid_operand(region: &Region, expected: &'static str, actual: &'static str) -> EngineError {
    EngineError::kind_mismatch(region.clone(), ValueError::KindMismatch { expected, actual })
}

pub fn apply_un(op: UnOp, op_typ: OpTyp, v: &Value, region: &Region) -> Result<(bool, Option<Num>), EngineError> {
    match (op, op_typ) {
        (UnOp::Not, OpTyp::Bool) => {
            let b = v.as_bool().map_err(|e| EngineError::kind_mismatch(region.clone(), e))?;
            Ok((!b, None))
        }
        (UnOp::Neg, OpTyp::Num(kind)) => {
            let n = v.as_num().map_err(|e| EngineError::kind_mismatch(region.clone(), e))?;
            let negated = -n.value().clone();
            Ok((false, Some(Num::new(kind, negated))))
        }
        _ => Err(invalid_operand(region, "bool or num operand matching the operator", "mismatched operand kind")),
    }
}

pub fn apply_bin_bool_lhs(op: BinOp, lhs: bool) -> Option<bool> {
    match (op, lhs) {
        (BinOp::And, false) => Some(false),
        (BinOp::Or, true) => Some(true),
        _ => None,
    }
}

pub fn apply_bin_bool(op: BinOp, lhs: bool, rhs: bool, region: &Region) -> Result<bool, EngineError> {
    match op {
        BinOp::And => Ok(lhs && rhs),
        BinOp::Or => Ok(lhs || rhs),
        _ => Err(invalid_operand(region, "a boolean-typed operator (and/or)", "non-boolean operator")),
    }
}

pub fn apply_bin_num(op: BinOp, kind: NumKind, lhs: &Num, rhs: &Num, region: &Region) -> Result<Num, EngineError> {
    let a = lhs.value();
    let b = rhs.value();
    let raw: BigInt = match op {
        BinOp::Add => a + b,
        BinOp::Sub => a - b,
        BinOp::Mul => a * b,
        BinOp::Div => {
            if b.sign() == num_bigint::Sign::NoSign {
                return Err(EngineError::DivByZero { region: region.clone() });
            }
            a / b
        }
        BinOp::Mod => {
            if b.sign() == num_bigint::Sign::NoSign {
                return Err(EngineError::DivByZero { region: region.clone() });
            }
            a % b
        }
        BinOp::BAnd | BinOp::BOr | BinOp::BXor | BinOp::Shl | BinOp::Shr => {
            let NumKind::Bv { width } = kind else {
                return Err(invalid_operand(region, "a bit-vector operand", "non-bit-vector operand"));
            };
            return Ok(Num::bv(width, apply_bitwise(op, a, b)));
        }
        BinOp::And | BinOp::Or => {
            return Err(invalid_operand(region, "a numeric-typed operator", "boolean operator"));
        }
    };
    Ok(Num::new(kind, raw))
}

fn apply_bitwise(op: BinOp, a: &BigInt, b: &BigInt) -> BigInt {
    // Bit-vectors are small enough in practice (<= 2048 bits) to go through
    // a big-endian byte round trip rather than a dedicated bit-vector type.
    let (a_bytes, b_bytes) = (a.to_signed_bytes_be(), b.to_signed_bytes_be());
    let len = a_bytes.len().max(b_bytes.len());
    let pad = |bytes: &[u8]| -> Vec<u8> {
        let mut v = vec![0u8; len - bytes.len()];
        v.extend_from_slice(bytes);
        v
    };
    let (pa, pb) = (pad(&a_bytes), pad(&b_bytes));
    let combined: Vec<u8> = match op {
        BinOp::BAnd => pa.iter().zip(pb.iter()).map(|(x, y)| x & y).collect(),
        BinOp::BOr => pa.iter().zip(pb.iter()).map(|(x, y)| x | y).collect(),
        BinOp::BXor => pa.iter().zip(pb.iter()).map(|(x, y)| x ^ y).collect(),
        BinOp::Shl => {
            let shift = b.to_string().parse::<u32>().unwrap_or(0);
            return a << shift;
        }
        BinOp::Shr => {
            let shift = b.to_string().parse::<u32>().unwrap_or(0);
            return a >> shift;
        }
        _ => unreachable!("apply_bitwise only called for bitwise operators"),
    };
    BigInt::from_signed_bytes_be(&combined)
}

pub fn apply_cmp(op: CmpOp, op_typ: OpTyp, lhs: &Value, rhs: &Value, region: &Region) -> Result<bool, EngineError> {
    match op {
        CmpOp::Eq => Ok(lhs == rhs),
        CmpOp::Ne => Ok(lhs != rhs),
        CmpOp::Lt | CmpOp::Le | CmpOp::Gt | CmpOp::Ge => match op_typ {
            OpTyp::Num(_) => {
                let a = lhs.value_as_num(region)?;
                let b = rhs.value_as_num(region)?;
                Ok(order(op, a.value().cmp(b.value())))
            }
            OpTyp::Text => {
                let a = lhs.as_text().map_err(|e| EngineError::kind_mismatch(region.clone(), e))?;
                let b = rhs.as_text().map_err(|e| EngineError::kind_mismatch(region.clone(), e))?;
                Ok(order(op, a.cmp(b)))
            }
            OpTyp::Bool => Err(invalid_operand(region, "a numeric or text operand", "boolean operand")),
        },
    }
}

fn order(op: CmpOp, ord: std::cmp::Ordering) -> bool {
    use std::cmp::Ordering::*;
    match (op, ord) {
        (CmpOp::Lt, Less) => true,
        (CmpOp::Le, Less | Equal) => true,
        (CmpOp::Gt, Greater) => true,
        (CmpOp::Ge, Greater | Equal) => true,
        _ => false,
    }
}

trait AsNumExt {
    fn value_as_num<'a>(&'a self, region: &Region) -> Result<&'a Num, EngineError>;
}

impl AsNumExt for Value {
    fn value_as_num<'a>(&'a self, region: &Region) -> Result<&'a Num, EngineError> {
        self.as_num().map_err(|e| EngineError::kind_mismatch(region.clone(), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigInt;

    #[test]
    fn bv_addition_wraps_modulo_width() {
        let region = Region::synthetic();
        let a = Num::bv(4, BigInt::from(15));
        let b = Num::bv(4, BigInt::from(2));
        let sum = apply_bin_num(BinOp::Add, NumKind::Bv { width: 4 }, &a, &b, &region).unwrap();
        assert_eq!(sum.value(), &BigInt::from(1));
    }

    #[test]
    fn division_by_zero_is_an_error() {
        let region = Region::synthetic();
        let a = Num::nat(BigInt::from(5));
        let z = Num::nat(BigInt::from(0));
        let err = apply_bin_num(BinOp::Div, NumKind::Nat, &a, &z, &region).unwrap_err();
        assert!(matches!(err, EngineError::DivByZero { .. }));
    }

    #[test]
    fn nat_subtraction_can_go_negative_then_gets_normalized() {
        let region = Region::synthetic();
        let a = Num::nat(BigInt::from(1));
        let b = Num::nat(BigInt::from(2));
        let diff = apply_bin_num(BinOp::Sub, NumKind::Nat, &a, &b, &region).unwrap();
        assert_eq!(diff.value(), &BigInt::from(-1));
    }

    #[test]
    fn bitwise_and_masks_bits() {
        let a = Num::bv(8, BigInt::from(0b1100));
        let b = Num::bv(8, BigInt::from(0b1010));
        let out = apply_bin_num(BinOp::BAnd, NumKind::Bv { width: 8 }, &a, &b, &Region::synthetic()).unwrap();
        assert_eq!(out.value(), &BigInt::from(0b1000));
    }
}
