//! The chain cursor.

use std::fmt;

use crate::error::{ChainError, Result};
use crate::function::Args;
use crate::placeholder::substitute;
use crate::value::{Attribute, Value};

use super::stage::StageDescriptor;

/// Starts a chain holding `value`.
///
/// # Examples
///
/// ```rust
/// use chainlink::{Function, Value, args, begin};
///
/// let add = Function::binary("add", |left, right| Ok(Value::from(left.as_int()? + right.as_int()?)));
/// let mut link = begin(15);
/// link.apply_with(add, args![15]).unwrap();
/// assert_eq!(link.result(), &Value::from(30));
/// ```
pub fn begin(value: impl Into<Value>) -> Link {
    Link::new(value)
}

/// Holds the current value of a chain and applies stages to it.
///
/// Every stage reads the held value, computes a new one and stores it. A stage
/// that fails leaves the previously held value in place.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Link {
    end: Value,
}

impl Link {
    /// Creates a cursor holding `value`.
    pub fn new(value: impl Into<Value>) -> Self {
        Self { end: value.into() }
    }

    /// Applies `operation` with no extra arguments.
    ///
    /// # Errors
    ///
    /// See [`apply_with`](Self::apply_with).
    pub fn apply(&mut self, operation: impl Into<Value>) -> Result<&mut Self> {
        self.apply_with(operation, Args::new())
    }

    /// Applies `operation` with `args`.
    ///
    /// A [`Function`](crate::Function) is called with the held value at each
    /// placeholder position, or with the held value prepended if `args`
    /// contains no placeholder. A [`StreamTemplate`](crate::StreamTemplate) is
    /// rebound onto the held value.
    ///
    /// # Errors
    ///
    /// - [`ChainError::TypeMismatch`] if `operation` is neither.
    /// - [`ChainError::ArgumentCount`], [`ChainError::StructuralViolation`] or
    ///   [`ChainError::SourceIdentity`] for an illegal stream stage.
    /// - Any error raised by the called function.
    pub fn apply_with(&mut self, operation: impl Into<Value>, args: Args) -> Result<&mut Self> {
        self.apply_stage(&StageDescriptor::new(operation, args))
    }

    pub(crate) fn apply_stage(&mut self, stage: &StageDescriptor) -> Result<&mut Self> {
        tracing::trace!(
            stage = %stage.stage(),
            held = self.end.type_name(),
            "applying stage"
        );
        match stage.evaluate(&self.end) {
            Ok(value) => {
                self.end = value;
                Ok(self)
            }
            Err(error) => {
                tracing::debug!(%error, "stage rejected");
                Err(error)
            }
        }
    }

    /// Calls the method `name` of the held value.
    ///
    /// Placeholders in `args` are replaced with the held value, but the held
    /// value is never prepended: the method is already bound to it. A dict
    /// field holding a function is called the same way.
    ///
    /// # Errors
    ///
    /// - [`ChainError::AttributeMissing`] if the held value has no such name.
    /// - [`ChainError::NotCallable`] if the name resolves to a plain field.
    /// - Any error raised by the method.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chainlink::{Value, args, begin};
    ///
    /// let mut link = begin("abc");
    /// link.method("upper", args![]).unwrap().method("replace", args!["B", "-"]).unwrap();
    /// assert_eq!(link.result(), &Value::from("A-C"));
    /// ```
    pub fn method(&mut self, name: &str, args: Args) -> Result<&mut Self> {
        let resolved = self.end.attribute(name).and_then(|attribute| match attribute {
            Attribute::Method(function) | Attribute::Field(Value::Function(function)) => {
                let (args, _) = substitute(&self.end, &args);
                function.call(args)
            }
            Attribute::Field(other) => Err(ChainError::NotCallable {
                type_name: other.type_name(),
            }),
        });
        match resolved {
            Ok(value) => {
                self.end = value;
                Ok(self)
            }
            Err(error) => {
                tracing::debug!(%error, method = name, "method call rejected");
                Err(error)
            }
        }
    }

    /// The held value.
    #[must_use]
    pub const fn result(&self) -> &Value {
        &self.end
    }

    /// Consumes the cursor and returns the held value.
    #[must_use]
    pub fn into_result(self) -> Value {
        self.end
    }
}

impl fmt::Display for Link {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "Link({})", self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args;
    use crate::function::Function;
    use crate::placeholder::ANS;
    use crate::stream::StreamTemplate;
    use rstest::rstest;

    fn divide() -> Function {
        Function::binary("divide", |left, right| {
            let divisor = right.as_int()?;
            if divisor == 0 {
                return Err(ChainError::operation("division by zero"));
            }
            Ok(Value::from(left.as_int()? / divisor))
        })
    }

    #[rstest]
    fn test_failed_stage_keeps_held_value() {
        let mut link = begin(9);
        assert_eq!(
            link.apply_with(divide(), args![0]).err(),
            Some(ChainError::operation("division by zero"))
        );
        assert_eq!(link.result(), &Value::from(9));
        assert_eq!(
            link.apply(8).err(),
            Some(ChainError::TypeMismatch { type_name: "int" })
        );
        assert_eq!(link.result(), &Value::from(9));
    }

    #[rstest]
    fn test_explicit_placement() {
        let mut link = begin(9);
        link.apply_with(divide(), args![0, ANS]).unwrap();
        assert_eq!(link.into_result(), Value::from(0));
    }

    #[rstest]
    fn test_illegal_stream_keeps_held_value() {
        let mut link = begin(Value::list([1, 2]));
        let error = link
            .apply_with(StreamTemplate::over(ANS), args![1, 2])
            .err();
        assert_eq!(error, Some(ChainError::ArgumentCount { count: 2 }));
        assert_eq!(link.result(), &Value::list([1, 2]));
    }

    #[rstest]
    fn test_method_substitutes_without_prepending() {
        let mut link = begin("ab");
        link.method("startswith", args![ANS]).unwrap();
        assert_eq!(link.result(), &Value::from(true));
    }

    #[rstest]
    fn test_namespace_function_field() {
        let double = Function::unary("double", |value| Ok(Value::from(value.as_int()? * 2)));
        let namespace = Value::dict([("double", Value::from(double)), ("x", Value::from(1))]);
        let mut link = begin(namespace);
        link.method("double", args![21]).unwrap();
        assert_eq!(link.result(), &Value::from(42));
    }

    #[rstest]
    fn test_display() {
        assert_eq!(begin(Value::list([1])).to_string(), "Link([1])");
    }
}
