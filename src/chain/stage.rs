//! Stage classification and evaluation.

use std::fmt;

use crate::error::{ChainError, Result};
use crate::function::{Args, Function};
use crate::placeholder::substitute;
use crate::stream::{StreamTemplate, rebind};
use crate::value::Value;

/// The classification of a stage operation.
///
/// Classification checks for a stream template before checking for a
/// callable; anything else is invalid.
#[derive(Clone, Copy, Debug)]
pub enum Stage<'a> {
    /// A plain function application.
    PlainCall(&'a Function),
    /// A lazy-stream template to rebind onto the current value.
    StreamTemplate(&'a StreamTemplate),
    /// Neither; carries the operation's type name.
    Invalid(&'static str),
}

impl<'a> Stage<'a> {
    /// Classifies `operation`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chainlink::{ANS, Stage, StreamTemplate, Value};
    ///
    /// let stream = Value::from(StreamTemplate::over(ANS));
    /// assert!(matches!(Stage::classify(&stream), Stage::StreamTemplate(_)));
    /// assert!(matches!(Stage::classify(&Value::from(8)), Stage::Invalid("int")));
    /// ```
    #[must_use]
    pub const fn classify(operation: &'a Value) -> Self {
        match operation {
            Value::Stream(template) => Self::StreamTemplate(template),
            Value::Function(function) => Self::PlainCall(function),
            other => Self::Invalid(other.type_name()),
        }
    }
}

impl fmt::Display for Stage<'_> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PlainCall(function) => write!(formatter, "call {}", function.name()),
            Self::StreamTemplate(_) => formatter.write_str("stream"),
            Self::Invalid(type_name) => write!(formatter, "invalid {type_name}"),
        }
    }
}

/// A recorded stage: an operation and the arguments attached to it.
///
/// Descriptors are immutable once created and can be evaluated any number of
/// times.
#[derive(Clone, Debug, PartialEq)]
pub struct StageDescriptor {
    operation: Value,
    args: Args,
}

impl StageDescriptor {
    /// Records `operation` with `args`.
    pub fn new(operation: impl Into<Value>, args: Args) -> Self {
        Self {
            operation: operation.into(),
            args,
        }
    }

    /// The recorded operation.
    #[must_use]
    pub const fn operation(&self) -> &Value {
        &self.operation
    }

    /// The recorded arguments.
    #[must_use]
    pub const fn args(&self) -> &Args {
        &self.args
    }

    /// Classifies the recorded operation.
    #[must_use]
    pub const fn stage(&self) -> Stage<'_> {
        Stage::classify(&self.operation)
    }

    /// Applies the stage to `current` and returns the new value.
    ///
    /// A plain call receives `current` at every placeholder position, or as
    /// its first positional argument if no placeholder is present. A stream
    /// template is rebound onto `current`.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::TypeMismatch`] for an invalid operation, the
    /// rebind errors for a stream template, and any error raised by a called
    /// function.
    pub fn evaluate(&self, current: &Value) -> Result<Value> {
        match self.stage() {
            Stage::StreamTemplate(template) => {
                rebind(template, &self.args, current).map(Value::Seq)
            }
            Stage::PlainCall(function) => {
                let (mut args, used) = substitute(current, &self.args);
                if !used {
                    args.prepend(current.clone());
                }
                function.call(args)
            }
            Stage::Invalid(type_name) => Err(ChainError::TypeMismatch { type_name }),
        }
    }
}
