//! Promotion, dispatch and matrix algebra for the numtower calculator engine
//!
//! Every operation takes its operands by value and returns a canonical
//! [`NumberValue`]. Domain errors (division by zero, singular matrices,
//! mismatched dimensions) produce `NumberValue::Invalid`, which in turn
//! absorbs every operation it reaches.

// Lets `#[tower_builtin]` expansions name this crate by path from inside it.
extern crate self as numtower_runtime;

pub use inventory;

pub mod arithmetic;
pub mod bitwise;
pub mod broadcast;
pub mod dispatcher;
pub mod gamma;
pub mod linalg;
pub mod power;
pub mod scalar;
pub mod trigonometry;

pub use arithmetic::{add, div, mul, neg, sub};
pub use bitwise::{and, not, or, shl, shr, xor};
pub use dispatcher::{builtins, call_builtin, find_builtin, Builtin, BuiltinFunction, RuntimeError};
pub use gamma::factorial;
pub use linalg::{adjugate, det, gauss, inverse, rank, rref, trace, transpose};
pub use power::{abs, arg, exp, ln, log, pow, root, sqrt};
pub use scalar::Scalar;
pub use trigonometry::{
    acos, acosh, acot, acoth, acsc, acsch, asec, asech, asin, asinh, atan, atanh, cos, cosh, cot,
    coth, csc, csch, from_radians, sec, sech, sin, sinh, tan, tanh, to_radians, AngleUnit,
};

pub use numtower_value::{ConstantKind, Kind, Matrix, NumberValue};
