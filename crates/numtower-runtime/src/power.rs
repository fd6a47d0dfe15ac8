//! Powers, roots, logarithms and the elementary complex-aware functions
//!
//! Real-valued inputs stay real while the result has a real value; outside
//! that domain the principal complex value is returned.

use crate::broadcast::{binary, unary};
use crate::scalar::{complex_value, real_value, Scalar};
use num_complex::Complex64;
use numtower_macros::tower_builtin;
use numtower_value::NumberValue;
use std::f64::consts::PI;

fn pow_scalars(base: Scalar, exponent: Scalar) -> NumberValue {
    match (base, exponent) {
        (Scalar::Integer(x), Scalar::Integer(n)) => integer_pow(x, n),
        (Scalar::Complex(z), Scalar::Integer(n)) => complex_integer_pow(z, n),
        (Scalar::Complex(_), _) | (_, Scalar::Complex(_)) => {
            complex_pow(base.to_complex(), exponent.to_complex())
        }
        _ => real_pow(base.to_f64(), exponent.to_f64()),
    }
}

fn integer_pow(base: i64, exponent: i64) -> NumberValue {
    if exponent == 0 {
        return NumberValue::Integer(1);
    }
    if exponent < 0 {
        if base == 0 {
            return NumberValue::Invalid;
        }
        return real_value((base as f64).powf(exponent as f64));
    }
    match u32::try_from(exponent)
        .ok()
        .and_then(|e| base.checked_pow(e))
    {
        Some(n) => NumberValue::Integer(n),
        None => real_value((base as f64).powf(exponent as f64)),
    }
}

fn real_pow(base: f64, exponent: f64) -> NumberValue {
    if base == 0.0 && exponent < 0.0 {
        return NumberValue::Invalid;
    }
    if base < 0.0 && exponent.is_finite() && exponent.fract() != 0.0 {
        // Principal value: exp(y * (ln|x| + i*pi)).
        let logarithm = Complex64::new((-base).ln(), PI);
        return complex_value((logarithm * exponent).exp());
    }
    real_value(base.powf(exponent))
}

fn complex_pow(base: Complex64, exponent: Complex64) -> NumberValue {
    if base.re == 0.0 && base.im == 0.0 {
        return if exponent.re > 0.0 {
            NumberValue::Integer(0)
        } else {
            NumberValue::Invalid
        };
    }
    complex_value((exponent * base.ln()).exp())
}

fn complex_integer_pow(base: Complex64, exponent: i64) -> NumberValue {
    if exponent == 0 {
        return NumberValue::Integer(1);
    }
    if base.re == 0.0 && base.im == 0.0 {
        return if exponent > 0 {
            NumberValue::Integer(0)
        } else {
            NumberValue::Invalid
        };
    }
    match i32::try_from(exponent) {
        Ok(e) => complex_value(base.powi(e)),
        Err(_) => complex_pow(base, Complex64::new(exponent as f64, 0.0)),
    }
}

fn root_scalars(value: Scalar, degree: Scalar) -> NumberValue {
    let Some(inverse_degree) = degree.reciprocal() else {
        return NumberValue::Invalid;
    };
    match (value, degree) {
        (Scalar::Integer(x), Scalar::Integer(n)) => integer_root(x, n),
        (Scalar::Real(x), Scalar::Integer(n)) if x < 0.0 && n % 2 != 0 => {
            real_value(-(-x).powf(1.0 / n as f64))
        }
        _ => pow_scalars(value, inverse_degree),
    }
}

fn integer_root(value: i64, degree: i64) -> NumberValue {
    let approx = if value >= 0 {
        (value as f64).powf(1.0 / degree as f64)
    } else if degree % 2 != 0 {
        -(-(value as f64)).powf(1.0 / degree as f64)
    } else {
        return real_pow(value as f64, 1.0 / degree as f64);
    };

    if degree > 0 {
        if let Ok(e) = u32::try_from(degree) {
            let candidate = approx.round() as i64;
            if candidate.checked_pow(e) == Some(value) {
                return NumberValue::Integer(candidate);
            }
        }
    }
    real_value(approx)
}

fn log_scalars(value: Scalar, base: Scalar) -> NumberValue {
    if value.is_zero() || base.is_zero() || base.is_one() {
        return NumberValue::Invalid;
    }
    if value.is_one() {
        return NumberValue::Integer(0);
    }

    if let (Scalar::Integer(v), Scalar::Integer(b)) = (value, base) {
        if v > 0 && b > 1 {
            let guess = ((v as f64).ln() / (b as f64).ln()).round();
            if let Ok(e) = u32::try_from(guess as i64) {
                if b.checked_pow(e) == Some(v) {
                    return NumberValue::Integer(e as i64);
                }
            }
        }
    }

    if !value.is_complex() && !base.is_complex() {
        let (v, b) = (value.to_f64(), base.to_f64());
        if v > 0.0 && b > 0.0 {
            return real_value(v.ln() / b.ln());
        }
    }

    let denominator = base.to_complex().ln();
    if denominator.re == 0.0 && denominator.im == 0.0 {
        return NumberValue::Invalid;
    }
    complex_value(value.to_complex().ln() / denominator)
}

fn ln_scalar(value: Scalar) -> NumberValue {
    if value.is_zero() {
        return NumberValue::Invalid;
    }
    match value {
        Scalar::Complex(z) => complex_value(z.ln()),
        real => {
            let x = real.to_f64();
            if x > 0.0 {
                real_value(x.ln())
            } else {
                complex_value(Complex64::new((-x).ln(), PI))
            }
        }
    }
}

fn exp_scalar(value: Scalar) -> NumberValue {
    match value {
        Scalar::Complex(z) => complex_value(z.exp()),
        real => real_value(real.to_f64().exp()),
    }
}

fn abs_scalar(value: Scalar) -> NumberValue {
    match value {
        Scalar::Integer(n) => match n.checked_abs() {
            Some(m) => NumberValue::Integer(m),
            None => real_value((n as f64).abs()),
        },
        Scalar::Real(x) => real_value(x.abs()),
        Scalar::Complex(z) => real_value(z.norm()),
    }
}

fn arg_scalar(value: Scalar) -> NumberValue {
    match value {
        Scalar::Complex(z) => real_value(z.arg()),
        real if real.to_f64() < 0.0 => real_value(PI),
        _ => NumberValue::Integer(0),
    }
}

fn sqrt_scalar(value: Scalar) -> NumberValue {
    match value {
        Scalar::Complex(z) => complex_value(z.sqrt()),
        real => {
            let x = real.to_f64();
            if x >= 0.0 {
                real_value(x.sqrt())
            } else {
                complex_value(Complex64::new(0.0, (-x).sqrt()))
            }
        }
    }
}

/// `base` raised to `exponent`.
///
/// `0^0` is 1 and zero to a negative power is `Invalid`. A negative real
/// base with a fractional exponent gives the principal complex value.
#[tower_builtin(name = "pow")]
pub fn pow(base: NumberValue, exponent: NumberValue) -> NumberValue {
    binary(base, exponent, pow_scalars)
}

/// The `degree`-th root of `value`.
///
/// Negative reals have a real root for odd integer degrees; otherwise this
/// is `value^(1/degree)`. Exact integer roots stay integers.
#[tower_builtin(name = "root")]
pub fn root(value: NumberValue, degree: NumberValue) -> NumberValue {
    binary(value, degree, root_scalars)
}

/// Logarithm of `value` to `base`
#[tower_builtin(name = "log")]
pub fn log(value: NumberValue, base: NumberValue) -> NumberValue {
    binary(value, base, log_scalars)
}

#[tower_builtin(name = "ln")]
pub fn ln(value: NumberValue) -> NumberValue {
    unary(value, ln_scalar)
}

#[tower_builtin(name = "exp")]
pub fn exp(value: NumberValue) -> NumberValue {
    unary(value, exp_scalar)
}

/// Magnitude of a value; constants are already non-negative and stay symbolic
#[tower_builtin(name = "abs")]
pub fn abs(value: NumberValue) -> NumberValue {
    match value {
        NumberValue::Constant(c) => NumberValue::Constant(c),
        NumberValue::Matrix(m) => crate::broadcast::finish(m.map(abs)),
        other => unary(other, abs_scalar),
    }
}

#[tower_builtin(name = "arg")]
pub fn arg(value: NumberValue) -> NumberValue {
    unary(value, arg_scalar)
}

#[tower_builtin(name = "sqrt")]
pub fn sqrt(value: NumberValue) -> NumberValue {
    unary(value, sqrt_scalar)
}
