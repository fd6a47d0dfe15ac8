//! Numeric values for the numtower calculator engine
//!
//! [`NumberValue`] is a closed tagged union over six kinds: invalid, integer,
//! real, symbolic constant, complex and matrix. Values are moved into every
//! operation; matrix element storage comes from a process-wide pool and goes
//! back to it when the owning value is dropped.

use thiserror::Error;

pub mod canonical;
pub mod display;
pub mod equality;
pub mod matrix;

pub use canonical::simplify;
pub use equality::{equals, RELATIVE_TOLERANCE};
pub use matrix::{
    check_element_pool, configure_element_pool, element_pool_config, element_pool_stats,
    pool_test_context, Matrix, MAX_DIMENSION,
};

/// Errors from checked value construction
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValueError {
    #[error("Matrix dimension {0} exceeds the maximum of {max}", max = MAX_DIMENSION)]
    DimensionOutOfRange(usize),

    #[error("A {rows}x{cols} matrix needs {expected} elements, got {actual}")]
    ElementCount {
        rows: usize,
        cols: usize,
        expected: usize,
        actual: usize,
    },
}

/// Symbolic constants recognised by the tower
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstantKind {
    Pi,
    E,
}

impl ConstantKind {
    /// Numeric value used when the constant meets another operand
    pub fn value(self) -> f64 {
        match self {
            ConstantKind::Pi => std::f64::consts::PI,
            ConstantKind::E => std::f64::consts::E,
        }
    }

    /// Wire identifier
    pub fn id(self) -> u32 {
        match self {
            ConstantKind::Pi => 0,
            ConstantKind::E => 1,
        }
    }

    pub fn from_id(id: u32) -> Option<Self> {
        match id {
            0 => Some(ConstantKind::Pi),
            1 => Some(ConstantKind::E),
            _ => None,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            ConstantKind::Pi => "π",
            ConstantKind::E => "e",
        }
    }
}

/// Kind tag of a [`NumberValue`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Kind {
    Invalid,
    Integer,
    Real,
    Complex,
    Constant,
    Matrix,
}

impl Kind {
    /// Numeric tag shared with the binary codec
    pub fn tag(self) -> u8 {
        match self {
            Kind::Invalid => 0,
            Kind::Integer => 1,
            Kind::Real => 2,
            Kind::Complex => 3,
            Kind::Constant => 4,
            Kind::Matrix => 5,
        }
    }

    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(Kind::Invalid),
            1 => Some(Kind::Integer),
            2 => Some(Kind::Real),
            3 => Some(Kind::Complex),
            4 => Some(Kind::Constant),
            5 => Some(Kind::Matrix),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Kind::Invalid => "invalid",
            Kind::Integer => "integer",
            Kind::Real => "real",
            Kind::Complex => "complex",
            Kind::Constant => "constant",
            Kind::Matrix => "matrix",
        }
    }
}

/// A value of the numeric tower
#[derive(Debug, Clone, Default)]
pub enum NumberValue {
    /// Undefined result; absorbs every operation it takes part in
    #[default]
    Invalid,
    Integer(i64),
    Real(f64),
    Constant(ConstantKind),
    Complex(f64, f64),
    Matrix(Matrix),
}

impl NumberValue {
    pub fn invalid() -> Self {
        NumberValue::Invalid
    }

    pub fn from_integer(value: i64) -> Self {
        NumberValue::Integer(value)
    }

    pub fn from_real(value: f64) -> Self {
        NumberValue::Real(value)
    }

    pub fn from_complex(re: f64, im: f64) -> Self {
        NumberValue::Complex(re, im)
    }

    pub fn from_constant(constant: ConstantKind) -> Self {
        NumberValue::Constant(constant)
    }

    /// Build a row-major matrix value.
    ///
    /// Out-of-range dimensions or a wrong element count yield `Invalid`;
    /// use [`Matrix::new`] to get the reason instead.
    pub fn matrix(rows: usize, cols: usize, elements: Vec<NumberValue>) -> Self {
        match Matrix::new(rows, cols, elements) {
            Ok(matrix) => NumberValue::Matrix(matrix),
            Err(err) => {
                log::warn!("rejected matrix construction: {err}");
                NumberValue::Invalid
            }
        }
    }

    /// A `rows x cols` matrix of integer zeros
    pub fn zeros(rows: usize, cols: usize) -> Self {
        match Matrix::from_fn(rows, cols, |_, _| NumberValue::Integer(0)) {
            Ok(matrix) => NumberValue::Matrix(matrix),
            Err(err) => {
                log::warn!("rejected matrix construction: {err}");
                NumberValue::Invalid
            }
        }
    }

    pub fn kind(&self) -> Kind {
        match self {
            NumberValue::Invalid => Kind::Invalid,
            NumberValue::Integer(_) => Kind::Integer,
            NumberValue::Real(_) => Kind::Real,
            NumberValue::Constant(_) => Kind::Constant,
            NumberValue::Complex(_, _) => Kind::Complex,
            NumberValue::Matrix(_) => Kind::Matrix,
        }
    }

    /// Integer payload, or `i64::MIN` for any other kind
    pub fn integer_value(&self) -> i64 {
        match self {
            NumberValue::Integer(n) => *n,
            _ => i64::MIN,
        }
    }

    /// Real part of a scalar, or NaN for `Invalid` and matrices
    pub fn real_part(&self) -> f64 {
        match self {
            NumberValue::Integer(n) => *n as f64,
            NumberValue::Real(x) => *x,
            NumberValue::Constant(c) => c.value(),
            NumberValue::Complex(re, _) => *re,
            NumberValue::Invalid | NumberValue::Matrix(_) => f64::NAN,
        }
    }

    /// Imaginary part of a scalar, or NaN for `Invalid` and matrices
    pub fn imag_part(&self) -> f64 {
        match self {
            NumberValue::Integer(_) | NumberValue::Real(_) | NumberValue::Constant(_) => 0.0,
            NumberValue::Complex(_, im) => *im,
            NumberValue::Invalid | NumberValue::Matrix(_) => f64::NAN,
        }
    }

    pub fn constant(&self) -> Option<ConstantKind> {
        match self {
            NumberValue::Constant(c) => Some(*c),
            _ => None,
        }
    }

    pub fn rows(&self) -> Option<usize> {
        self.as_matrix().map(Matrix::rows)
    }

    pub fn cols(&self) -> Option<usize> {
        self.as_matrix().map(Matrix::cols)
    }

    pub fn elements(&self) -> Option<&[NumberValue]> {
        self.as_matrix().map(Matrix::elements)
    }

    pub fn as_matrix(&self) -> Option<&Matrix> {
        match self {
            NumberValue::Matrix(m) => Some(m),
            _ => None,
        }
    }

    pub fn is_invalid(&self) -> bool {
        matches!(self, NumberValue::Invalid)
    }

    pub fn is_matrix(&self) -> bool {
        matches!(self, NumberValue::Matrix(_))
    }

    /// Give the value back to the allocator.
    ///
    /// Equivalent to dropping it; matrices return their element storage
    /// and release their elements recursively.
    pub fn release(self) {
        drop(self);
    }
}

impl From<i64> for NumberValue {
    fn from(value: i64) -> Self {
        NumberValue::Integer(value)
    }
}

impl From<i32> for NumberValue {
    fn from(value: i32) -> Self {
        NumberValue::Integer(value as i64)
    }
}

impl From<f64> for NumberValue {
    fn from(value: f64) -> Self {
        NumberValue::Real(value)
    }
}

impl From<ConstantKind> for NumberValue {
    fn from(value: ConstantKind) -> Self {
        NumberValue::Constant(value)
    }
}

impl From<Matrix> for NumberValue {
    fn from(value: Matrix) -> Self {
        NumberValue::Matrix(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_tags_round_trip() {
        for kind in [
            Kind::Invalid,
            Kind::Integer,
            Kind::Real,
            Kind::Complex,
            Kind::Constant,
            Kind::Matrix,
        ] {
            assert_eq!(Kind::from_tag(kind.tag()), Some(kind));
        }
        assert_eq!(Kind::from_tag(6), None);
    }

    #[test]
    fn accessors_return_sentinels_on_wrong_kind() {
        let real = NumberValue::from_real(2.5);
        assert_eq!(real.integer_value(), i64::MIN);
        assert_eq!(real.imag_part(), 0.0);
        assert_eq!(real.constant(), None);
        assert_eq!(real.rows(), None);
        assert!(real.elements().is_none());

        let invalid = NumberValue::invalid();
        assert!(invalid.real_part().is_nan());
        assert!(invalid.imag_part().is_nan());
    }

    #[test]
    fn matrix_constructor_checks_dimensions() {
        let value = NumberValue::matrix(2, 2, vec![1.into(), 2.into(), 3.into()]);
        assert!(value.is_invalid());

        let value = NumberValue::matrix(128, 0, Vec::new());
        assert!(value.is_invalid());

        let value = NumberValue::matrix(1, 2, vec![1.into(), 2.into()]);
        assert_eq!(value.rows(), Some(1));
        assert_eq!(value.cols(), Some(2));
        assert_eq!(value.kind(), Kind::Matrix);
    }

    #[test]
    fn constants_carry_values_and_ids() {
        assert_eq!(ConstantKind::Pi.value(), std::f64::consts::PI);
        assert_eq!(ConstantKind::from_id(ConstantKind::E.id()), Some(ConstantKind::E));
        assert_eq!(ConstantKind::from_id(7), None);
        assert_eq!(NumberValue::from_constant(ConstantKind::E).real_part(), std::f64::consts::E);
    }
}
