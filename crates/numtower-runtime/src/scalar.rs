//! Scalar operands and kind promotion
//!
//! Non-matrix values are lowered to a [`Scalar`] before a kernel runs.
//! Constants evaluate to their double value at this point.

use num_complex::Complex64;
use numtower_value::canonical::{simplify_complex, simplify_real};
use numtower_value::NumberValue;

/// A non-matrix, non-invalid operand
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scalar {
    Integer(i64),
    Real(f64),
    Complex(Complex64),
}

/// An operand pair computed in a common kind
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Promoted {
    Integers(i64, i64),
    Reals(f64, f64),
    Complexes(Complex64, Complex64),
}

impl Scalar {
    /// Lower a value; `None` for `Invalid` and matrices
    pub fn classify(value: &NumberValue) -> Option<Scalar> {
        match value {
            NumberValue::Integer(n) => Some(Scalar::Integer(*n)),
            NumberValue::Real(x) => Some(Scalar::Real(*x)),
            NumberValue::Constant(c) => Some(Scalar::Real(c.value())),
            NumberValue::Complex(re, im) => Some(Scalar::Complex(Complex64::new(*re, *im))),
            NumberValue::Invalid | NumberValue::Matrix(_) => None,
        }
    }

    /// Real value; the real part for complex operands
    pub fn to_f64(self) -> f64 {
        match self {
            Scalar::Integer(n) => n as f64,
            Scalar::Real(x) => x,
            Scalar::Complex(z) => z.re,
        }
    }

    pub fn to_complex(self) -> Complex64 {
        match self {
            Scalar::Complex(z) => z,
            other => Complex64::new(other.to_f64(), 0.0),
        }
    }

    pub fn is_complex(self) -> bool {
        matches!(self, Scalar::Complex(_))
    }

    pub fn is_zero(self) -> bool {
        match self {
            Scalar::Integer(n) => n == 0,
            Scalar::Real(x) => x == 0.0,
            Scalar::Complex(z) => z.re == 0.0 && z.im == 0.0,
        }
    }

    pub fn is_one(self) -> bool {
        match self {
            Scalar::Integer(n) => n == 1,
            Scalar::Real(x) => x == 1.0,
            Scalar::Complex(z) => z.re == 1.0 && z.im == 0.0,
        }
    }

    /// `1/self`, or `None` when `self` is zero
    pub fn reciprocal(self) -> Option<Scalar> {
        if self.is_zero() {
            return None;
        }
        Some(match self {
            Scalar::Integer(n) => Scalar::Real(1.0 / n as f64),
            Scalar::Real(x) => Scalar::Real(1.0 / x),
            Scalar::Complex(z) => Scalar::Complex(z.inv()),
        })
    }

    /// Canonical value of this scalar
    pub fn into_value(self) -> NumberValue {
        match self {
            Scalar::Integer(n) => NumberValue::Integer(n),
            Scalar::Real(x) => simplify_real(x),
            Scalar::Complex(z) => complex_value(z),
        }
    }
}

/// Choose the narrowest kind that holds both operands
pub fn promote(lhs: Scalar, rhs: Scalar) -> Promoted {
    match (lhs, rhs) {
        (Scalar::Integer(a), Scalar::Integer(b)) => Promoted::Integers(a, b),
        (Scalar::Complex(_), _) | (_, Scalar::Complex(_)) => {
            Promoted::Complexes(lhs.to_complex(), rhs.to_complex())
        }
        _ => Promoted::Reals(lhs.to_f64(), rhs.to_f64()),
    }
}

/// Canonical value of a real result
pub fn real_value(x: f64) -> NumberValue {
    simplify_real(x)
}

/// Canonical value of a complex result
pub fn complex_value(z: Complex64) -> NumberValue {
    simplify_complex(z.re, z.im)
}

#[cfg(test)]
mod tests {
    use super::*;
    use numtower_value::ConstantKind;

    #[test]
    fn constants_lower_to_reals() {
        let pi = Scalar::classify(&NumberValue::Constant(ConstantKind::Pi));
        assert_eq!(pi, Some(Scalar::Real(std::f64::consts::PI)));
        assert_eq!(Scalar::classify(&NumberValue::Invalid), None);
    }

    #[test]
    fn promotion_picks_widest_kind() {
        assert_eq!(
            promote(Scalar::Integer(1), Scalar::Integer(2)),
            Promoted::Integers(1, 2)
        );
        assert_eq!(
            promote(Scalar::Integer(1), Scalar::Real(2.5)),
            Promoted::Reals(1.0, 2.5)
        );
        assert_eq!(
            promote(Scalar::Real(2.0), Scalar::Complex(Complex64::new(0.0, 1.0))),
            Promoted::Complexes(Complex64::new(2.0, 0.0), Complex64::new(0.0, 1.0))
        );
    }

    #[test]
    fn reciprocal_of_zero_is_none() {
        assert_eq!(Scalar::Integer(0).reciprocal(), None);
        assert_eq!(Scalar::Integer(4).reciprocal(), Some(Scalar::Real(0.25)));
    }
}
