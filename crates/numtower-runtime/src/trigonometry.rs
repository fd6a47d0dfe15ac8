//! Circular and hyperbolic functions, their reciprocals and inverses
//!
//! Inverse functions return real results inside their real domain and the
//! principal complex value outside it.

use crate::arithmetic::{div, mul};
use crate::broadcast::unary;
use crate::scalar::{complex_value, real_value, Scalar};
use num_complex::Complex64;
use numtower_macros::tower_builtin;
use numtower_value::NumberValue;
use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, PI};
use std::str::FromStr;

/// Unit an angle is expressed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleUnit {
    #[default]
    Radians,
    Degrees,
    Gradians,
}

impl AngleUnit {
    /// Radians in one unit
    pub fn radians_per_unit(self) -> f64 {
        match self {
            AngleUnit::Radians => 1.0,
            AngleUnit::Degrees => PI / 180.0,
            AngleUnit::Gradians => PI / 200.0,
        }
    }
}

impl FromStr for AngleUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rad" | "radian" | "radians" => Ok(AngleUnit::Radians),
            "deg" | "degree" | "degrees" => Ok(AngleUnit::Degrees),
            "grad" | "gradian" | "gradians" | "gon" => Ok(AngleUnit::Gradians),
            other => Err(format!("unknown angle unit `{other}`")),
        }
    }
}

/// Convert an angle in `unit` to radians
pub fn to_radians(value: NumberValue, unit: AngleUnit) -> NumberValue {
    match unit {
        AngleUnit::Radians => value,
        _ => mul(value, NumberValue::Real(unit.radians_per_unit())),
    }
}

/// Convert an angle in radians to `unit`
pub fn from_radians(value: NumberValue, unit: AngleUnit) -> NumberValue {
    match unit {
        AngleUnit::Radians => value,
        _ => div(value, NumberValue::Real(unit.radians_per_unit())),
    }
}

fn is_zero(z: Complex64) -> bool {
    z.re == 0.0 && z.im == 0.0
}

/// Lift a pair of real/complex implementations to a scalar kernel
fn circular(value: Scalar, real: fn(f64) -> f64, complex: fn(Complex64) -> Complex64) -> NumberValue {
    match value {
        Scalar::Complex(z) => complex_value(complex(z)),
        other => real_value(real(other.to_f64())),
    }
}

/// `numerator(x) / denominator(x)`, `Invalid` where the denominator vanishes
fn quotient(
    value: Scalar,
    numerator: fn(Complex64) -> Complex64,
    denominator: fn(Complex64) -> Complex64,
    real_numerator: fn(f64) -> f64,
    real_denominator: fn(f64) -> f64,
) -> NumberValue {
    match value {
        Scalar::Complex(z) => {
            let d = denominator(z);
            if is_zero(d) {
                return NumberValue::Invalid;
            }
            complex_value(numerator(z) / d)
        }
        other => {
            let x = other.to_f64();
            let d = real_denominator(x);
            if d == 0.0 {
                return NumberValue::Invalid;
            }
            real_value(real_numerator(x) / d)
        }
    }
}

fn one(_: Complex64) -> Complex64 {
    Complex64::new(1.0, 0.0)
}

fn one_real(_: f64) -> f64 {
    1.0
}

fn sin_scalar(v: Scalar) -> NumberValue {
    circular(v, f64::sin, |z| z.sin())
}

fn cos_scalar(v: Scalar) -> NumberValue {
    circular(v, f64::cos, |z| z.cos())
}

fn tan_scalar(v: Scalar) -> NumberValue {
    circular(v, f64::tan, |z| z.tan())
}

fn cot_scalar(v: Scalar) -> NumberValue {
    quotient(v, |z| z.cos(), |z| z.sin(), f64::cos, f64::sin)
}

fn sec_scalar(v: Scalar) -> NumberValue {
    quotient(v, one, |z| z.cos(), one_real, f64::cos)
}

fn csc_scalar(v: Scalar) -> NumberValue {
    quotient(v, one, |z| z.sin(), one_real, f64::sin)
}

fn sinh_scalar(v: Scalar) -> NumberValue {
    circular(v, f64::sinh, |z| z.sinh())
}

fn cosh_scalar(v: Scalar) -> NumberValue {
    circular(v, f64::cosh, |z| z.cosh())
}

fn tanh_scalar(v: Scalar) -> NumberValue {
    circular(v, f64::tanh, |z| z.tanh())
}

fn coth_scalar(v: Scalar) -> NumberValue {
    quotient(v, |z| z.cosh(), |z| z.sinh(), f64::cosh, f64::sinh)
}

fn sech_scalar(v: Scalar) -> NumberValue {
    quotient(v, one, |z| z.cosh(), one_real, f64::cosh)
}

fn csch_scalar(v: Scalar) -> NumberValue {
    quotient(v, one, |z| z.sinh(), one_real, f64::sinh)
}

// Principal-branch formulas for the inverse functions.

fn asin_complex(z: Complex64) -> Complex64 {
    let i = Complex64::i();
    -i * (i * z + (1.0 - z * z).sqrt()).ln()
}

fn asinh_complex(z: Complex64) -> Complex64 {
    (z + (z * z + 1.0).sqrt()).ln()
}

fn acosh_complex(z: Complex64) -> Complex64 {
    (z + (z + 1.0).sqrt() * (z - 1.0).sqrt()).ln()
}

fn asin_scalar(v: Scalar) -> NumberValue {
    match v {
        Scalar::Complex(z) => complex_value(asin_complex(z)),
        other => {
            let x = other.to_f64();
            if (-1.0..=1.0).contains(&x) {
                real_value(x.asin())
            } else {
                complex_value(asin_complex(Complex64::new(x, 0.0)))
            }
        }
    }
}

fn acos_scalar(v: Scalar) -> NumberValue {
    match v {
        Scalar::Complex(z) => complex_value(FRAC_PI_2 - asin_complex(z)),
        other => {
            let x = other.to_f64();
            if (-1.0..=1.0).contains(&x) {
                real_value(x.acos())
            } else {
                complex_value(FRAC_PI_2 - asin_complex(Complex64::new(x, 0.0)))
            }
        }
    }
}

fn atan_scalar(v: Scalar) -> NumberValue {
    match v {
        Scalar::Complex(z) => {
            let i = Complex64::i();
            let (numerator, denominator) = (i + z, i - z);
            if is_zero(numerator) || is_zero(denominator) {
                return NumberValue::Invalid;
            }
            complex_value(i * 0.5 * (numerator / denominator).ln())
        }
        other => real_value(other.to_f64().atan()),
    }
}

fn acot_scalar(v: Scalar) -> NumberValue {
    match v.reciprocal() {
        Some(r) => atan_scalar(r),
        None => real_value(FRAC_PI_2),
    }
}

fn asec_scalar(v: Scalar) -> NumberValue {
    match v.reciprocal() {
        Some(r) => acos_scalar(r),
        None => NumberValue::Invalid,
    }
}

fn acsc_scalar(v: Scalar) -> NumberValue {
    match v.reciprocal() {
        Some(r) => asin_scalar(r),
        None => NumberValue::Invalid,
    }
}

fn asinh_scalar(v: Scalar) -> NumberValue {
    match v {
        Scalar::Complex(z) => complex_value(asinh_complex(z)),
        other => real_value(other.to_f64().asinh()),
    }
}

fn acosh_scalar(v: Scalar) -> NumberValue {
    match v {
        Scalar::Complex(z) => complex_value(acosh_complex(z)),
        other => {
            let x = other.to_f64();
            if x >= 1.0 {
                real_value(x.acosh())
            } else {
                complex_value(acosh_complex(Complex64::new(x, 0.0)))
            }
        }
    }
}

fn atanh_scalar(v: Scalar) -> NumberValue {
    let z = match v {
        Scalar::Complex(z) => z,
        other => {
            let x = other.to_f64();
            if x.abs() < 1.0 {
                return real_value(x.atanh());
            }
            Complex64::new(x, 0.0)
        }
    };
    let (plus, minus) = (1.0 + z, 1.0 - z);
    if is_zero(plus) || is_zero(minus) {
        return NumberValue::Invalid;
    }
    complex_value(0.5 * (plus.ln() - minus.ln()))
}

fn acoth_scalar(v: Scalar) -> NumberValue {
    match v.reciprocal() {
        Some(r) => atanh_scalar(r),
        None => NumberValue::Invalid,
    }
}

fn asech_scalar(v: Scalar) -> NumberValue {
    match v.reciprocal() {
        Some(r) => acosh_scalar(r),
        None => NumberValue::Invalid,
    }
}

fn acsch_scalar(v: Scalar) -> NumberValue {
    match v.reciprocal() {
        Some(r) => asinh_scalar(r),
        None => NumberValue::Invalid,
    }
}

#[tower_builtin(name = "sin")]
pub fn sin(value: NumberValue) -> NumberValue {
    unary(value, sin_scalar)
}

#[tower_builtin(name = "cos")]
pub fn cos(value: NumberValue) -> NumberValue {
    unary(value, cos_scalar)
}

#[tower_builtin(name = "tan")]
pub fn tan(value: NumberValue) -> NumberValue {
    unary(value, tan_scalar)
}

#[tower_builtin(name = "cot")]
pub fn cot(value: NumberValue) -> NumberValue {
    unary(value, cot_scalar)
}

#[tower_builtin(name = "sec")]
pub fn sec(value: NumberValue) -> NumberValue {
    unary(value, sec_scalar)
}

#[tower_builtin(name = "csc")]
pub fn csc(value: NumberValue) -> NumberValue {
    unary(value, csc_scalar)
}

#[tower_builtin(name = "asin")]
pub fn asin(value: NumberValue) -> NumberValue {
    unary(value, asin_scalar)
}

#[tower_builtin(name = "acos")]
pub fn acos(value: NumberValue) -> NumberValue {
    unary(value, acos_scalar)
}

/// Inverse tangent; `Invalid` at the branch points `±i`
#[tower_builtin(name = "atan")]
pub fn atan(value: NumberValue) -> NumberValue {
    unary(value, atan_scalar)
}

/// Inverse cotangent, `atan(1/x)` with `acot(0) = π/2`
#[tower_builtin(name = "acot")]
pub fn acot(value: NumberValue) -> NumberValue {
    unary(value, acot_scalar)
}

#[tower_builtin(name = "asec")]
pub fn asec(value: NumberValue) -> NumberValue {
    unary(value, asec_scalar)
}

#[tower_builtin(name = "acsc")]
pub fn acsc(value: NumberValue) -> NumberValue {
    unary(value, acsc_scalar)
}

#[tower_builtin(name = "sinh")]
pub fn sinh(value: NumberValue) -> NumberValue {
    unary(value, sinh_scalar)
}

#[tower_builtin(name = "cosh")]
pub fn cosh(value: NumberValue) -> NumberValue {
    unary(value, cosh_scalar)
}

#[tower_builtin(name = "tanh")]
pub fn tanh(value: NumberValue) -> NumberValue {
    unary(value, tanh_scalar)
}

#[tower_builtin(name = "coth")]
pub fn coth(value: NumberValue) -> NumberValue {
    unary(value, coth_scalar)
}

#[tower_builtin(name = "sech")]
pub fn sech(value: NumberValue) -> NumberValue {
    unary(value, sech_scalar)
}

#[tower_builtin(name = "csch")]
pub fn csch(value: NumberValue) -> NumberValue {
    unary(value, csch_scalar)
}

#[tower_builtin(name = "asinh")]
pub fn asinh(value: NumberValue) -> NumberValue {
    unary(value, asinh_scalar)
}

#[tower_builtin(name = "acosh")]
pub fn acosh(value: NumberValue) -> NumberValue {
    unary(value, acosh_scalar)
}

/// Inverse hyperbolic tangent; `Invalid` at `±1`
#[tower_builtin(name = "atanh")]
pub fn atanh(value: NumberValue) -> NumberValue {
    unary(value, atanh_scalar)
}

#[tower_builtin(name = "acoth")]
pub fn acoth(value: NumberValue) -> NumberValue {
    unary(value, acoth_scalar)
}

#[tower_builtin(name = "asech")]
pub fn asech(value: NumberValue) -> NumberValue {
    unary(value, asech_scalar)
}

#[tower_builtin(name = "acsch")]
pub fn acsch(value: NumberValue) -> NumberValue {
    unary(value, acsch_scalar)
}
