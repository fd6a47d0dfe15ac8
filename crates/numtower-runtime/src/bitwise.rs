//! Bitwise operations on integers
//!
//! Only `Integer` operands are accepted; any other kind gives `Invalid`.

use crate::broadcast::{binary, unary};
use crate::scalar::Scalar;
use numtower_macros::tower_builtin;
use numtower_value::NumberValue;

fn integers(lhs: Scalar, rhs: Scalar) -> Option<(i64, i64)> {
    match (lhs, rhs) {
        (Scalar::Integer(a), Scalar::Integer(b)) => Some((a, b)),
        _ => None,
    }
}

fn and_scalars(lhs: Scalar, rhs: Scalar) -> NumberValue {
    integers(lhs, rhs).map_or(NumberValue::Invalid, |(a, b)| NumberValue::Integer(a & b))
}

fn or_scalars(lhs: Scalar, rhs: Scalar) -> NumberValue {
    integers(lhs, rhs).map_or(NumberValue::Invalid, |(a, b)| NumberValue::Integer(a | b))
}

fn xor_scalars(lhs: Scalar, rhs: Scalar) -> NumberValue {
    integers(lhs, rhs).map_or(NumberValue::Invalid, |(a, b)| NumberValue::Integer(a ^ b))
}

fn shl_scalars(lhs: Scalar, rhs: Scalar) -> NumberValue {
    match integers(lhs, rhs) {
        Some((_, count)) if count < 0 => NumberValue::Invalid,
        Some((_, count)) if count >= 64 => NumberValue::Integer(0),
        Some((value, count)) => NumberValue::Integer(value << count),
        None => NumberValue::Invalid,
    }
}

fn shr_scalars(lhs: Scalar, rhs: Scalar) -> NumberValue {
    match integers(lhs, rhs) {
        Some((_, count)) if count < 0 => NumberValue::Invalid,
        Some((value, count)) if count >= 64 => NumberValue::Integer(if value < 0 { -1 } else { 0 }),
        Some((value, count)) => NumberValue::Integer(value >> count),
        None => NumberValue::Invalid,
    }
}

fn not_scalar(value: Scalar) -> NumberValue {
    match value {
        Scalar::Integer(n) => NumberValue::Integer(!n),
        _ => NumberValue::Invalid,
    }
}

#[tower_builtin(name = "and")]
pub fn and(lhs: NumberValue, rhs: NumberValue) -> NumberValue {
    binary(lhs, rhs, and_scalars)
}

#[tower_builtin(name = "or")]
pub fn or(lhs: NumberValue, rhs: NumberValue) -> NumberValue {
    binary(lhs, rhs, or_scalars)
}

#[tower_builtin(name = "xor")]
pub fn xor(lhs: NumberValue, rhs: NumberValue) -> NumberValue {
    binary(lhs, rhs, xor_scalars)
}

/// Left shift; counts of 64 or more shift everything out
#[tower_builtin(name = "shl")]
pub fn shl(value: NumberValue, count: NumberValue) -> NumberValue {
    binary(value, count, shl_scalars)
}

/// Arithmetic right shift
#[tower_builtin(name = "shr")]
pub fn shr(value: NumberValue, count: NumberValue) -> NumberValue {
    binary(value, count, shr_scalars)
}

#[tower_builtin(name = "not")]
pub fn not(value: NumberValue) -> NumberValue {
    unary(value, not_scalar)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shifts_saturate_at_word_size() {
        assert!(matches!(
            shl(NumberValue::Integer(1), NumberValue::Integer(64)),
            NumberValue::Integer(0)
        ));
        assert!(matches!(
            shl(NumberValue::Integer(1), NumberValue::Integer(63)),
            NumberValue::Integer(i64::MIN)
        ));
        assert!(matches!(
            shr(NumberValue::Integer(-8), NumberValue::Integer(100)),
            NumberValue::Integer(-1)
        ));
        assert!(matches!(
            shr(NumberValue::Integer(-8), NumberValue::Integer(1)),
            NumberValue::Integer(-4)
        ));
        assert!(shl(NumberValue::Integer(1), NumberValue::Integer(-1)).is_invalid());
    }

    #[test]
    fn non_integers_are_invalid() {
        assert!(and(NumberValue::Real(1.5), NumberValue::Integer(1)).is_invalid());
        assert!(not(NumberValue::Complex(1.0, 1.0)).is_invalid());
        assert!(matches!(not(NumberValue::Integer(0)), NumberValue::Integer(-1)));
    }
}
