//! Named-operation registry
//!
//! Operations marked with `#[tower_builtin]` are collected at link time and
//! can be looked up and invoked by name.

use numtower_value::NumberValue;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RuntimeError {
    #[error("unknown builtin `{0}`")]
    UnknownBuiltin(String),

    #[error("builtin `{name}` takes {expected} argument(s), got {actual}")]
    ArityMismatch {
        name: &'static str,
        expected: usize,
        actual: usize,
    },
}

#[derive(Debug, Clone, Copy)]
pub enum BuiltinFunction {
    Unary(fn(NumberValue) -> NumberValue),
    Binary(fn(NumberValue, NumberValue) -> NumberValue),
}

impl BuiltinFunction {
    pub fn arity(&self) -> usize {
        match self {
            BuiltinFunction::Unary(_) => 1,
            BuiltinFunction::Binary(_) => 2,
        }
    }
}

/// A registered tower operation
#[derive(Debug)]
pub struct Builtin {
    pub name: &'static str,
    pub function: BuiltinFunction,
}

impl Builtin {
    /// Invoke with owned arguments; they are consumed like a direct call
    pub fn call(&self, args: Vec<NumberValue>) -> Result<NumberValue, RuntimeError> {
        let expected = self.function.arity();
        if args.len() != expected {
            return Err(RuntimeError::ArityMismatch {
                name: self.name,
                expected,
                actual: args.len(),
            });
        }

        let mut args = args.into_iter();
        let first = args.next().unwrap_or_default();
        Ok(match self.function {
            BuiltinFunction::Unary(f) => f(first),
            BuiltinFunction::Binary(f) => f(first, args.next().unwrap_or_default()),
        })
    }
}

inventory::collect!(Builtin);

/// Every registered operation
pub fn builtins() -> Vec<&'static Builtin> {
    inventory::iter::<Builtin>.into_iter().collect()
}

pub fn find_builtin(name: &str) -> Option<&'static Builtin> {
    inventory::iter::<Builtin>
        .into_iter()
        .find(|builtin| builtin.name == name)
}

/// Call a registered operation by name
pub fn call_builtin(name: &str, args: Vec<NumberValue>) -> Result<NumberValue, RuntimeError> {
    match find_builtin(name) {
        Some(builtin) => builtin.call(args),
        None => {
            log::debug!("no builtin named `{name}`");
            Err(RuntimeError::UnknownBuiltin(name.to_string()))
        }
    }
}
