//! Tolerance-aware value equality

use crate::NumberValue;

/// Relative tolerance applied to real and complex comparisons
pub const RELATIVE_TOLERANCE: f64 = 1e-12;

/// Infinities only match exactly; the tolerance is undefined for them
fn reals_equal(a: f64, b: f64) -> bool {
    if a == b {
        return true;
    }
    if !a.is_finite() || !b.is_finite() {
        return false;
    }
    (a - b).abs() <= a.abs().max(b.abs()) * RELATIVE_TOLERANCE
}

fn complexes_equal(a: (f64, f64), b: (f64, f64)) -> bool {
    if a == b {
        return true;
    }
    if [a.0, a.1, b.0, b.1].iter().any(|part| !part.is_finite()) {
        return false;
    }
    let distance = (a.0 - b.0).hypot(a.1 - b.1);
    let magnitude = a.0.hypot(a.1).max(b.0.hypot(b.1));
    distance <= magnitude * RELATIVE_TOLERANCE
}

/// Compare two values.
///
/// Integers and constants compare exactly among themselves. Mixed kinds are
/// promoted to the wider kind: reals compare with a relative tolerance and
/// complex values use the modulus of their difference. Matrices need equal
/// dimensions and pairwise equal elements. `Invalid` equals only itself.
pub fn equals(a: &NumberValue, b: &NumberValue) -> bool {
    use NumberValue::*;

    match (a, b) {
        (Invalid, Invalid) => true,
        (Invalid, _) | (_, Invalid) => false,

        (Integer(x), Integer(y)) => x == y,
        (Constant(x), Constant(y)) => x == y,

        (Matrix(x), Matrix(y)) => {
            x.same_shape(y)
                && x
                    .elements()
                    .iter()
                    .zip(y.elements())
                    .all(|(p, q)| equals(p, q))
        }
        (Matrix(_), _) | (_, Matrix(_)) => false,

        (Complex(..), _) | (_, Complex(..)) => complexes_equal(
            (a.real_part(), a.imag_part()),
            (b.real_part(), b.imag_part()),
        ),

        _ => reals_equal(a.real_part(), b.real_part()),
    }
}

impl PartialEq for NumberValue {
    fn eq(&self, other: &Self) -> bool {
        equals(self, other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ConstantKind;

    #[test]
    fn reals_within_tolerance_are_equal() {
        assert_eq!(NumberValue::Real(1.0), NumberValue::Real(1.0 + 1e-14));
        assert_ne!(NumberValue::Real(1.0), NumberValue::Real(1.0 + 1e-9));
        assert_eq!(NumberValue::Real(0.0), NumberValue::Real(-0.0));
        assert_eq!(
            NumberValue::Real(f64::INFINITY),
            NumberValue::Real(f64::INFINITY)
        );
    }

    #[test]
    fn integers_compare_exactly() {
        assert_eq!(NumberValue::Integer(7), NumberValue::Integer(7));
        assert_ne!(
            NumberValue::Integer(i64::MAX),
            NumberValue::Integer(i64::MAX - 1)
        );
    }

    #[test]
    fn mixed_kinds_promote() {
        assert_eq!(NumberValue::Integer(2), NumberValue::Real(2.0));
        assert_eq!(NumberValue::Integer(2), NumberValue::Complex(2.0, 0.0));
        assert_eq!(
            NumberValue::Constant(ConstantKind::Pi),
            NumberValue::Real(std::f64::consts::PI)
        );
        assert_ne!(
            NumberValue::Constant(ConstantKind::Pi),
            NumberValue::Constant(ConstantKind::E)
        );
    }

    #[test]
    fn complex_tolerance_uses_modulus() {
        assert_eq!(
            NumberValue::Complex(3.0, 4.0),
            NumberValue::Complex(3.0 + 1e-13, 4.0 - 1e-13)
        );
        assert_ne!(NumberValue::Complex(3.0, 4.0), NumberValue::Complex(3.0, -4.0));
    }

    #[test]
    fn infinities_only_equal_themselves() {
        let inf = NumberValue::Real(f64::INFINITY);
        assert_ne!(inf, NumberValue::Integer(5));
        assert_ne!(inf, NumberValue::Integer(1));
        assert_ne!(inf, NumberValue::Real(f64::NEG_INFINITY));
        assert_ne!(inf, NumberValue::Real(f64::MAX));
        assert_ne!(inf, NumberValue::Complex(1.0, 1.0));
        assert_ne!(
            NumberValue::Complex(f64::INFINITY, 1.0),
            NumberValue::Complex(1.0, 1.0)
        );
        assert_ne!(
            NumberValue::Complex(1.0, f64::INFINITY),
            NumberValue::Complex(1.0, f64::NEG_INFINITY)
        );
        assert_eq!(
            NumberValue::Complex(1.0, f64::INFINITY),
            NumberValue::Complex(1.0, f64::INFINITY)
        );
        assert_eq!(inf, NumberValue::Complex(f64::INFINITY, 0.0));
    }

    #[test]
    fn invalid_only_equals_invalid() {
        assert_eq!(NumberValue::Invalid, NumberValue::Invalid);
        assert_ne!(NumberValue::Invalid, NumberValue::Integer(0));
    }

    #[test]
    fn matrices_need_matching_shape() {
        let a = NumberValue::matrix(1, 2, vec![1.into(), 2.into()]);
        let b = NumberValue::matrix(2, 1, vec![1.into(), 2.into()]);
        let c = NumberValue::matrix(1, 2, vec![1.into(), 2.0.into()]);
        assert_ne!(a, b);
        assert_eq!(a, c);
        assert_ne!(a, NumberValue::Integer(1));
    }
}
