//! Error types for chain evaluation.
//!
//! Every failure raised while applying a stage is a [`ChainError`]. Errors are
//! raised synchronously at the point of `apply` (or, for lazy sequences, at the
//! point an element is pulled) and are never retried or swallowed.

use thiserror::Error;

/// Errors raised while building or evaluating a chain.
///
/// The first six variants describe the structural rules of the chain itself.
/// The remaining variants are raised by values, arguments and builtins.
///
/// # Examples
///
/// ```rust
/// use chainlink::ChainError;
///
/// let error = ChainError::TypeMismatch { type_name: "int" };
/// assert_eq!(error.to_string(), "expected 'callable' or 'stream', got 'int'");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ChainError {
    /// The operation of a stage is neither callable nor a stream template.
    #[error("expected 'callable' or 'stream', got '{type_name}'")]
    TypeMismatch {
        /// Type name of the rejected operation.
        type_name: &'static str,
    },

    /// A stream stage was given extra positional or keyword arguments.
    #[error("a stream stage cannot accept arguments ({count} given)")]
    ArgumentCount {
        /// Number of extra arguments supplied.
        count: usize,
    },

    /// A stream template declares more than one source binding.
    #[error("multiple source bindings are not allowed ({bindings} declared)")]
    StructuralViolation {
        /// Number of declared bindings.
        bindings: usize,
    },

    /// A stream template iterates over something other than the placeholder.
    #[error("cannot iterate over '{type_name}', the placeholder only")]
    SourceIdentity {
        /// Type name of the declared source.
        type_name: &'static str,
    },

    /// Attribute lookup on the held value found nothing.
    #[error("'{type_name}' object has no attribute '{attribute}'")]
    AttributeMissing {
        /// Type name of the receiver.
        type_name: &'static str,
        /// The requested attribute.
        attribute: String,
    },

    /// The resolved attribute exists but cannot be invoked.
    #[error("'{type_name}' object is not callable")]
    NotCallable {
        /// Type name of the attribute value.
        type_name: &'static str,
    },

    /// The value cannot be turned into a lazy sequence.
    #[error("'{type_name}' object is not iterable")]
    NotIterable {
        /// Type name of the value.
        type_name: &'static str,
    },

    /// A typed accessor or builtin received a value of the wrong type.
    #[error("expected '{expected}', got '{found}'")]
    UnexpectedType {
        /// The accepted type (or types).
        expected: &'static str,
        /// Type name of the received value.
        found: &'static str,
    },

    /// A function received too many positional arguments.
    #[error("{function}() takes {expected} positional arguments but {given} were given")]
    Arity {
        /// Name of the called function.
        function: String,
        /// Number of accepted positional arguments.
        expected: usize,
        /// Number of supplied positional arguments.
        given: usize,
    },

    /// A function parameter was not supplied.
    #[error("{function}() missing required argument: '{parameter}'")]
    MissingArgument {
        /// Name of the called function.
        function: String,
        /// Name of the missing parameter.
        parameter: String,
    },

    /// A keyword argument is unknown or fills an already bound parameter.
    #[error("{function}() got an unexpected keyword argument '{keyword}'")]
    UnexpectedKeyword {
        /// Name of the called function.
        function: String,
        /// The offending keyword.
        keyword: String,
    },

    /// A free-form failure raised by a stage operation.
    #[error("{message}")]
    Operation {
        /// Description of the failure.
        message: String,
    },
}

impl ChainError {
    /// Creates an [`ChainError::Operation`] error from any message.
    ///
    /// This is the error user-defined stages return for domain failures.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chainlink::ChainError;
    ///
    /// let error = ChainError::operation("division by zero");
    /// assert_eq!(error.to_string(), "division by zero");
    /// ```
    #[must_use]
    pub fn operation(message: impl Into<String>) -> Self {
        Self::Operation {
            message: message.into(),
        }
    }

    /// Returns `true` for the errors that describe an illegal chain shape
    /// rather than a failure inside an operation.
    #[must_use]
    pub const fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::TypeMismatch { .. }
                | Self::ArgumentCount { .. }
                | Self::StructuralViolation { .. }
                | Self::SourceIdentity { .. }
        )
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ChainError>;

static_assertions::assert_impl_all!(ChainError: Send, Sync, Clone, std::error::Error);
