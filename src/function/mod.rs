//! Named callables.
//!
//! A [`Function`] is the plain-call form of a stage operation. It receives its
//! arguments as an [`Args`] bundle and returns a [`Value`], so functions of any
//! shape can sit side by side in one chain.

mod args;

pub use args::Args;

use std::fmt;
use std::rc::Rc;

use crate::error::Result;
use crate::value::Value;

type Body = dyn Fn(Args) -> Result<Value>;

/// A named, reference-counted callable.
///
/// Cloning a `Function` shares the same body; equality is identity.
///
/// # Examples
///
/// ```rust
/// use chainlink::{Function, Value, args};
///
/// let add = Function::binary("add", |left, right| Ok(Value::from(left.as_int()? + right.as_int()?)));
/// assert_eq!(add.call(args![1, 2]).unwrap(), Value::from(3));
/// assert_eq!(add.to_string(), "<function add>");
/// ```
#[derive(Clone)]
pub struct Function {
    name: Rc<str>,
    body: Rc<Body>,
}

impl Function {
    /// Creates a function from a closure over the raw arguments.
    pub fn new<F>(name: impl Into<Rc<str>>, body: F) -> Self
    where
        F: Fn(Args) -> Result<Value> + 'static,
    {
        Self {
            name: name.into(),
            body: Rc::new(body),
        }
    }

    /// Creates a function of exactly one argument.
    pub fn unary<F>(name: impl Into<Rc<str>>, body: F) -> Self
    where
        F: Fn(Value) -> Result<Value> + 'static,
    {
        let name = name.into();
        let label = Rc::clone(&name);
        Self::new(name, move |args: Args| {
            let [value] = args.bind(&label, ["value"])?;
            body(value)
        })
    }

    /// Creates a function of exactly two arguments.
    pub fn binary<F>(name: impl Into<Rc<str>>, body: F) -> Self
    where
        F: Fn(Value, Value) -> Result<Value> + 'static,
    {
        let name = name.into();
        let label = Rc::clone(&name);
        Self::new(name, move |args: Args| {
            let [left, right] = args.bind(&label, ["left", "right"])?;
            body(left, right)
        })
    }

    /// Calls the function.
    ///
    /// # Errors
    ///
    /// Returns whatever error the body raises.
    pub fn call(&self, args: Args) -> Result<Value> {
        (self.body)(args)
    }

    /// The display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns `true` if both handles share the same body.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.body, &other.body)
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_tuple("Function").field(&self.name).finish()
    }
}

impl fmt::Display for Function {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "<function {}>", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args;
    use crate::error::ChainError;
    use rstest::rstest;

    #[rstest]
    fn test_unary_binds_one_argument() {
        let negate = Function::unary("negate", |value| Ok(Value::from(-value.as_int()?)));
        assert_eq!(negate.call(args![4]), Ok(Value::from(-4)));
        assert_eq!(
            negate.call(args![4, 5]),
            Err(ChainError::Arity {
                function: "negate".to_string(),
                expected: 1,
                given: 2
            })
        );
    }

    #[rstest]
    fn test_identity_equality() {
        let first = Function::unary("f", Ok);
        let second = Function::unary("f", Ok);
        assert_eq!(first, first.clone());
        assert_ne!(first, second);
    }

    #[rstest]
    fn test_debug() {
        assert_eq!(format!("{:?}", Function::unary("f", Ok)), "Function(\"f\")");
    }
}
