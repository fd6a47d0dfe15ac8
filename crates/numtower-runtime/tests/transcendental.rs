//! Powers, logarithms, factorial and trigonometry

use numtower_runtime::*;
use std::f64::consts::{E, FRAC_PI_2, FRAC_PI_4, PI};

#[test]
fn test_factorial() {
    assert!(matches!(
        factorial(NumberValue::Integer(20)),
        NumberValue::Integer(2432902008176640000)
    ));
    let hundred = factorial(NumberValue::Integer(100)).real_part();
    assert!((hundred / 9.3326215443944153e157 - 1.0).abs() < 1e-10);
    assert!(factorial(NumberValue::Integer(-2)).is_invalid());
}

#[test]
fn test_factorial_reflection() {
    // (-1.5)! = Gamma(-0.5) = -2 * sqrt(pi)
    let value = factorial(NumberValue::Real(-1.5)).real_part();
    assert!((value + 2.0 * PI.sqrt()).abs() < 1e-12);
}

#[test]
fn test_complex_factorial() {
    // i! = Gamma(1 + i)
    let value = factorial(NumberValue::Complex(0.0, 1.0));
    assert_eq!(
        value,
        NumberValue::Complex(0.49801566811835604, -0.15494982830181069)
    );
}

#[test]
fn test_negative_base_fractional_power_is_complex() {
    let value = pow(NumberValue::Integer(-8), NumberValue::Real(1.0 / 3.0));
    assert_eq!(value.kind(), Kind::Complex);
    assert_eq!(value, NumberValue::Complex(1.0, 3f64.sqrt()));
}

#[test]
fn test_odd_root_of_negative_real() {
    assert_eq!(
        root(NumberValue::Real(-15.625), NumberValue::Integer(3)),
        NumberValue::Real(-2.5)
    );
}

#[test]
fn test_complex_integer_power() {
    assert_eq!(
        pow(NumberValue::Complex(1.0, 1.0), NumberValue::Integer(2)),
        NumberValue::Complex(0.0, 2.0)
    );
    assert_eq!(
        pow(NumberValue::Complex(0.0, 1.0), NumberValue::Integer(-1)),
        NumberValue::Complex(0.0, -1.0)
    );
}

#[test]
fn test_logarithms() {
    assert!(log(NumberValue::Integer(0), NumberValue::Integer(10)).is_invalid());
    assert!(log(NumberValue::Integer(5), NumberValue::Integer(1)).is_invalid());
    assert_eq!(
        log(NumberValue::Integer(1000), NumberValue::Integer(10)),
        NumberValue::Integer(3)
    );
    assert_eq!(
        log(NumberValue::Real(2.0f64.sqrt()), NumberValue::Integer(2)),
        NumberValue::Real(0.5)
    );
    let negative = log(NumberValue::Integer(-1), NumberValue::Constant(ConstantKind::E));
    assert_eq!(negative, NumberValue::Complex(0.0, PI));
}

#[test]
fn test_ln_and_exp() {
    assert_eq!(ln(NumberValue::Constant(ConstantKind::E)), NumberValue::Integer(1));
    assert_eq!(ln(NumberValue::Integer(-1)), NumberValue::Complex(0.0, PI));
    assert!(ln(NumberValue::Integer(0)).is_invalid());
    assert!(matches!(exp(NumberValue::Integer(0)), NumberValue::Integer(1)));
    assert_eq!(exp(NumberValue::Integer(1)), NumberValue::Real(E));
}

#[test]
fn test_abs_and_arg() {
    assert_eq!(abs(NumberValue::Complex(3.0, -4.0)), NumberValue::Integer(5));
    assert_eq!(
        abs(NumberValue::Constant(ConstantKind::Pi)).constant(),
        Some(ConstantKind::Pi)
    );
    assert!(matches!(abs(NumberValue::Integer(-7)), NumberValue::Integer(7)));
    assert_eq!(arg(NumberValue::Integer(-2)), NumberValue::Real(PI));
    assert_eq!(arg(NumberValue::Complex(1.0, 1.0)), NumberValue::Real(FRAC_PI_4));
}

#[test]
fn test_inverse_trig_outside_real_domain() {
    let value = asin(NumberValue::Integer(2));
    assert_eq!(
        value,
        NumberValue::Complex(FRAC_PI_2, -(2.0 + 3f64.sqrt()).ln())
    );
    assert_eq!(sin(value), NumberValue::Integer(2));

    let value = acosh(NumberValue::Real(0.5));
    assert_eq!(value.kind(), Kind::Complex);
    assert_eq!(cosh(value), NumberValue::Real(0.5));
}

#[test]
fn test_inverse_trig_inside_real_domain() {
    assert_eq!(asin(NumberValue::Integer(1)), NumberValue::Real(FRAC_PI_2));
    assert_eq!(atan(NumberValue::Integer(1)), NumberValue::Real(FRAC_PI_4));
    assert_eq!(acos(NumberValue::Integer(1)), NumberValue::Integer(0));
    assert_eq!(atanh(NumberValue::Real(0.5)), NumberValue::Real(0.5f64.atanh()));
}

#[test]
fn test_complex_atan_near_real_axis() {
    let complex = atan(NumberValue::Complex(1.0, 1e-300));
    assert_eq!(complex, NumberValue::Real(FRAC_PI_4));
}

#[test]
fn test_angle_conversion() {
    assert_eq!(
        to_radians(NumberValue::Integer(180), AngleUnit::Degrees),
        NumberValue::Real(PI)
    );
    assert_eq!(
        to_radians(NumberValue::Integer(100), AngleUnit::Gradians),
        NumberValue::Real(FRAC_PI_2)
    );
    assert_eq!(
        from_radians(NumberValue::Constant(ConstantKind::Pi), AngleUnit::Degrees),
        NumberValue::Integer(180)
    );
    assert!(matches!(
        to_radians(NumberValue::Integer(3), AngleUnit::Radians),
        NumberValue::Integer(3)
    ));
}
