//! Factorial and the Gamma function
//!
//! Integers up to 20 are multiplied out exactly, larger integers use a
//! Stirling series, and everything else goes through the Lanczos
//! approximation of `Gamma(x + 1)`.

use crate::broadcast::unary;
use crate::scalar::{complex_value, real_value, Scalar};
use num_complex::Complex64;
use numtower_macros::tower_builtin;
use numtower_value::NumberValue;
use std::f64::consts::PI;

/// Largest `n` whose factorial fits in an `i64`
const EXACT_FACTORIAL_LIMIT: i64 = 20;

const LANCZOS_G: f64 = 7.0;

const LANCZOS_COEFFICIENTS: [f64; 9] = [
    0.999_999_999_999_809_93,
    676.520_368_121_885_1,
    -1_259.139_216_722_402_8,
    771.323_428_777_653_13,
    -176.615_029_162_140_59,
    12.507_343_278_686_905,
    -0.138_571_095_265_720_12,
    9.984_369_578_019_571_6e-6,
    1.505_632_735_149_311_6e-7,
];

fn exact_factorial(n: i64) -> i64 {
    (2..=n).product()
}

/// `n!` from Stirling's series, evaluated in log space
fn stirling(n: f64) -> f64 {
    let n2 = n * n;
    let series = 1.0 + 1.0 / (12.0 * n) + 1.0 / (288.0 * n2)
        - 139.0 / (51_840.0 * n2 * n)
        - 571.0 / (2_488_320.0 * n2 * n2);
    (n * n.ln() - n + 0.5 * (2.0 * PI * n).ln()).exp() * series
}

/// Lanczos sum for `Gamma(z + 1)` with `z` already shifted
fn lanczos_real(z: f64) -> f64 {
    let mut sum = LANCZOS_COEFFICIENTS[0];
    for (i, c) in LANCZOS_COEFFICIENTS.iter().enumerate().skip(1) {
        sum += c / (z + i as f64);
    }
    let t = z + LANCZOS_G + 0.5;
    // t^(z+1/2) e^-t combined in log space; the factors overflow separately.
    (2.0 * PI).sqrt() * ((z + 0.5) * t.ln() - t).exp() * sum
}

pub fn gamma_real(x: f64) -> f64 {
    if x < 0.5 {
        PI / ((PI * x).sin() * gamma_real(1.0 - x))
    } else {
        lanczos_real(x - 1.0)
    }
}

pub fn gamma_complex(z: Complex64) -> Complex64 {
    if z.re < 0.5 {
        let sine = (z * PI).sin();
        PI / (sine * gamma_complex(1.0 - z))
    } else {
        let z = z - 1.0;
        let mut sum = Complex64::new(LANCZOS_COEFFICIENTS[0], 0.0);
        for (i, c) in LANCZOS_COEFFICIENTS.iter().enumerate().skip(1) {
            sum += *c / (z + i as f64);
        }
        let t = z + LANCZOS_G + 0.5;
        (2.0 * PI).sqrt() * t.powc(z + 0.5) * (-t).exp() * sum
    }
}

fn factorial_scalar(value: Scalar) -> NumberValue {
    match value {
        Scalar::Integer(n) if n < 0 => NumberValue::Invalid,
        Scalar::Integer(n) if n <= EXACT_FACTORIAL_LIMIT => {
            NumberValue::Integer(exact_factorial(n))
        }
        Scalar::Integer(n) => real_value(stirling(n as f64)),
        Scalar::Real(x) => {
            let shifted = x + 1.0;
            if shifted <= 0.0 && shifted.fract() == 0.0 {
                // Pole of Gamma.
                return NumberValue::Invalid;
            }
            real_value(gamma_real(shifted))
        }
        Scalar::Complex(z) => complex_value(gamma_complex(z + 1.0)),
    }
}

/// `value!`, extended to reals and complex numbers as `Gamma(value + 1)`
#[tower_builtin(name = "factorial")]
pub fn factorial(value: NumberValue) -> NumberValue {
    unary(value, factorial_scalar)
}
