//! Absorption and element-wise broadcasting
//!
//! Every element-wise operation runs through [`binary`] or [`unary`]:
//! `Invalid` absorbs, matrices are mapped element by element reusing their
//! own storage, and scalars reach the kernel already lowered.

use crate::scalar::Scalar;
use numtower_value::{Matrix, NumberValue, ValueError};

pub type BinaryKernel = fn(Scalar, Scalar) -> NumberValue;
pub type UnaryKernel = fn(Scalar) -> NumberValue;

/// Apply `kernel` to a pair of values.
///
/// Matrix-matrix pairs need equal dimensions; a scalar paired with a matrix
/// is combined with every element.
pub fn binary(lhs: NumberValue, rhs: NumberValue, kernel: BinaryKernel) -> NumberValue {
    match (lhs, rhs) {
        (NumberValue::Invalid, _) | (_, NumberValue::Invalid) => NumberValue::Invalid,
        (NumberValue::Matrix(a), NumberValue::Matrix(b)) => {
            if !a.same_shape(&b) {
                log::debug!(
                    "element-wise operand shapes differ: {}x{} vs {}x{}",
                    a.rows(),
                    a.cols(),
                    b.rows(),
                    b.cols()
                );
                return NumberValue::Invalid;
            }
            finish(a.zip_with(b, |x, y| binary(x, y, kernel)))
        }
        (NumberValue::Matrix(a), scalar) => finish(a.map(|x| binary(x, scalar.clone(), kernel))),
        (scalar, NumberValue::Matrix(b)) => finish(b.map(|y| binary(scalar.clone(), y, kernel))),
        (a, b) => match (Scalar::classify(&a), Scalar::classify(&b)) {
            (Some(x), Some(y)) => kernel(x, y),
            _ => NumberValue::Invalid,
        },
    }
}

/// Apply `kernel` to a value, element-wise for matrices
pub fn unary(value: NumberValue, kernel: UnaryKernel) -> NumberValue {
    match value {
        NumberValue::Invalid => NumberValue::Invalid,
        NumberValue::Matrix(m) => finish(m.map(|x| unary(x, kernel))),
        scalar => match Scalar::classify(&scalar) {
            Some(x) => kernel(x),
            None => NumberValue::Invalid,
        },
    }
}

/// Wrap a result matrix whose elements are already canonical
pub fn finish(matrix: Matrix) -> NumberValue {
    match matrix.into_single() {
        Ok(single) => single,
        Err(matrix) => NumberValue::Matrix(matrix),
    }
}

/// Result of a fallible matrix construction as a value
pub fn matrix_value(result: Result<Matrix, ValueError>) -> NumberValue {
    match result {
        Ok(matrix) => finish(matrix),
        Err(err) => {
            log::warn!("matrix result rejected: {err}");
            NumberValue::Invalid
        }
    }
}
