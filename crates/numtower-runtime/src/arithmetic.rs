//! Addition, subtraction, multiplication, division and negation
//!
//! Integer arithmetic is checked; on overflow the operation is redone in
//! double precision. Division by an exact zero of any kind is `Invalid`.

use crate::broadcast::{binary, matrix_value, unary};
use crate::linalg::inverse;
use crate::scalar::{complex_value, promote, real_value, Promoted, Scalar};
use numtower_macros::tower_builtin;
use numtower_value::{Matrix, NumberValue};

fn add_scalars(lhs: Scalar, rhs: Scalar) -> NumberValue {
    match promote(lhs, rhs) {
        Promoted::Integers(a, b) => match a.checked_add(b) {
            Some(n) => NumberValue::Integer(n),
            None => real_value(a as f64 + b as f64),
        },
        Promoted::Reals(a, b) => real_value(a + b),
        Promoted::Complexes(a, b) => complex_value(a + b),
    }
}

fn sub_scalars(lhs: Scalar, rhs: Scalar) -> NumberValue {
    match promote(lhs, rhs) {
        Promoted::Integers(a, b) => match a.checked_sub(b) {
            Some(n) => NumberValue::Integer(n),
            None => real_value(a as f64 - b as f64),
        },
        Promoted::Reals(a, b) => real_value(a - b),
        Promoted::Complexes(a, b) => complex_value(a - b),
    }
}

fn mul_scalars(lhs: Scalar, rhs: Scalar) -> NumberValue {
    match promote(lhs, rhs) {
        Promoted::Integers(a, b) => match a.checked_mul(b) {
            Some(n) => NumberValue::Integer(n),
            None => real_value(a as f64 * b as f64),
        },
        Promoted::Reals(a, b) => real_value(a * b),
        Promoted::Complexes(a, b) => complex_value(a * b),
    }
}

fn div_scalars(lhs: Scalar, rhs: Scalar) -> NumberValue {
    if rhs.is_zero() {
        return NumberValue::Invalid;
    }
    match promote(lhs, rhs) {
        Promoted::Integers(a, b) => match (a.checked_rem(b), a.checked_div(b)) {
            (Some(0), Some(q)) => NumberValue::Integer(q),
            _ => real_value(a as f64 / b as f64),
        },
        Promoted::Reals(a, b) => real_value(a / b),
        Promoted::Complexes(a, b) => {
            // Multiply through by the conjugate of the divisor.
            let denominator = b.norm_sqr();
            complex_value(a * b.conj() / denominator)
        }
    }
}

fn neg_scalar(value: Scalar) -> NumberValue {
    match value {
        Scalar::Integer(n) => match n.checked_neg() {
            Some(m) => NumberValue::Integer(m),
            None => real_value(-(n as f64)),
        },
        Scalar::Real(x) => real_value(-x),
        Scalar::Complex(z) => complex_value(-z),
    }
}

#[tower_builtin(name = "add")]
pub fn add(lhs: NumberValue, rhs: NumberValue) -> NumberValue {
    binary(lhs, rhs, add_scalars)
}

#[tower_builtin(name = "sub")]
pub fn sub(lhs: NumberValue, rhs: NumberValue) -> NumberValue {
    binary(lhs, rhs, sub_scalars)
}

/// Product of two values.
///
/// Two matrices are multiplied as linear maps and need `lhs.cols ==
/// rhs.rows`; every other combination is element-wise.
#[tower_builtin(name = "mul")]
pub fn mul(lhs: NumberValue, rhs: NumberValue) -> NumberValue {
    match (lhs, rhs) {
        (NumberValue::Matrix(a), NumberValue::Matrix(b)) => matrix_product(&a, &b),
        (lhs, rhs) => binary(lhs, rhs, mul_scalars),
    }
}

/// Quotient of two values.
///
/// A matrix divisor must be square and is applied through its inverse when
/// the dividend is also a matrix.
#[tower_builtin(name = "div")]
pub fn div(lhs: NumberValue, rhs: NumberValue) -> NumberValue {
    match (lhs, rhs) {
        (NumberValue::Matrix(a), NumberValue::Matrix(b)) => {
            if !b.is_square() {
                return NumberValue::Invalid;
            }
            mul(NumberValue::Matrix(a), inverse(NumberValue::Matrix(b)))
        }
        (lhs, rhs) => binary(lhs, rhs, div_scalars),
    }
}

#[tower_builtin(name = "neg")]
pub fn neg(value: NumberValue) -> NumberValue {
    unary(value, neg_scalar)
}

fn matrix_product(a: &Matrix, b: &Matrix) -> NumberValue {
    if a.cols() != b.rows() {
        log::debug!(
            "inner dimensions disagree: {}x{} * {}x{}",
            a.rows(),
            a.cols(),
            b.rows(),
            b.cols()
        );
        return NumberValue::Invalid;
    }

    let inner = a.cols();
    matrix_value(Matrix::from_fn(a.rows(), b.cols(), |i, j| {
        (0..inner).fold(NumberValue::Integer(0), |acc, k| {
            add(acc, mul(a[(i, k)].clone(), b[(k, j)].clone()))
        })
    }))
}
