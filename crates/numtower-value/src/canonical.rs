//! Narrowing values to their simplest kind

use crate::NumberValue;

/// 2^63 as a double; the first value past `i64::MAX`
const I64_LIMIT: f64 = 9_223_372_036_854_775_808.0;

/// Integral value of `x` if it is finite and fits in an `i64`
pub fn integral_to_i64(x: f64) -> Option<i64> {
    if x.is_finite() && x.fract() == 0.0 && x >= -I64_LIMIT && x < I64_LIMIT {
        Some(x as i64)
    } else {
        None
    }
}

/// Narrow `value` to the simplest kind that represents it exactly.
///
/// Reals holding an integral in `i64` range become integers and NaN becomes
/// `Invalid`. Complex values with a zero imaginary part narrow to real (and
/// onwards), while any NaN or infinite part makes them `Invalid`. Matrix
/// elements are narrowed recursively and a 1x1 matrix collapses to its
/// element. Idempotent.
pub fn simplify(value: NumberValue) -> NumberValue {
    match value {
        NumberValue::Real(x) => simplify_real(x),
        NumberValue::Complex(re, im) => simplify_complex(re, im),
        NumberValue::Matrix(m) => {
            let m = m.map(simplify);
            match m.into_single() {
                Ok(single) => single,
                Err(m) => NumberValue::Matrix(m),
            }
        }
        other => other,
    }
}

pub fn simplify_real(x: f64) -> NumberValue {
    if x.is_nan() {
        return NumberValue::Invalid;
    }
    match integral_to_i64(x) {
        Some(n) => NumberValue::Integer(n),
        None => NumberValue::Real(x),
    }
}

pub fn simplify_complex(re: f64, im: f64) -> NumberValue {
    if !re.is_finite() || !im.is_finite() {
        return NumberValue::Invalid;
    }
    if im == 0.0 {
        return simplify_real(re);
    }
    NumberValue::Complex(re, im)
}

impl NumberValue {
    pub fn simplify(self) -> NumberValue {
        simplify(self)
    }

    /// Exact zero test used for pivoting: true only for `Integer(0)`
    pub fn is_integer_zero(&self) -> bool {
        matches!(self, NumberValue::Integer(0))
    }
}
