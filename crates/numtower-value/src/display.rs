//! Textual rendering

use crate::canonical::integral_to_i64;
use crate::NumberValue;
use std::fmt;

/// Write a double, dropping the fractional part of integral values
fn write_part(f: &mut fmt::Formatter<'_>, x: f64) -> fmt::Result {
    match integral_to_i64(x) {
        Some(n) => write!(f, "{n}"),
        None => write!(f, "{x:?}"),
    }
}

impl fmt::Display for NumberValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumberValue::Invalid => f.write_str("NaN"),
            NumberValue::Integer(n) => write!(f, "{n}"),
            NumberValue::Real(x) => write!(f, "{x:?}"),
            NumberValue::Constant(c) => f.write_str(c.symbol()),
            NumberValue::Complex(re, im) => {
                if *re != 0.0 {
                    write_part(f, *re)?;
                }
                f.write_str(if im.is_sign_negative() { "-" } else { "+" })?;
                write_part(f, im.abs())?;
                f.write_str("i")
            }
            NumberValue::Matrix(m) => {
                write!(f, "{}x{}[", m.rows(), m.cols())?;
                for (i, element) in m.elements().iter().enumerate() {
                    if i > 0 {
                        f.write_str("|")?;
                    }
                    write!(f, "{element}")?;
                }
                f.write_str("]")
            }
        }
    }
}
