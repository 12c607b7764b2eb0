//! The dynamic value threaded through a chain.
//!
//! A chain is heterogeneous: any stage may return any kind of value, and the
//! placeholder may be injected into any argument slot of the next stage. This
//! module provides [`Value`], the single type all of those share.
//!
//! # Data and behavior
//!
//! `Value` has two families of variants:
//!
//! - **Data**: `None`, `Bool`, `Int`, `Float`, `Str`, `List`, `Tuple`, `Dict`.
//!   Aggregates are reference counted, so cloning a value is cheap and never
//!   copies its elements.
//! - **Behavior**: `Function`, `Stream` (a lazy-stream template), `Seq` (a live
//!   lazy sequence) and `Placeholder`.
//!
//! Equality is structural for data and identity-based for behavior.
//!
//! # Examples
//!
//! ```rust
//! use chainlink::Value;
//!
//! let list = Value::list([1, 2, 3]);
//! assert_eq!(list.type_name(), "list");
//! assert_eq!(list.to_string(), "[1, 2, 3]");
//!
//! let doubled: Vec<i64> = list
//!     .iter()
//!     .unwrap()
//!     .map(|item| item.and_then(|value| value.as_int()).map(|n| n * 2))
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//! assert_eq!(doubled, vec![2, 4, 6]);
//! ```

mod attribute;
mod display;
#[cfg(feature = "serde")]
mod serialization;

pub use attribute::Attribute;

use std::collections::BTreeMap;
use std::rc::Rc;

use crate::error::{ChainError, Result};
use crate::function::Function;
use crate::placeholder::Placeholder;
use crate::stream::{LazySeq, StreamTemplate};

/// A dynamically typed value held by a chain cursor.
#[derive(Clone, Debug, Default)]
pub enum Value {
    /// The absence of a value.
    #[default]
    None,
    /// A boolean.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// A floating point number.
    Float(f64),
    /// An immutable string.
    Str(Rc<str>),
    /// An immutable list.
    List(Rc<[Value]>),
    /// An immutable tuple.
    Tuple(Rc<[Value]>),
    /// A mapping from string keys to values, ordered by key.
    Dict(Rc<BTreeMap<String, Value>>),
    /// A callable operation.
    Function(Function),
    /// A lazy-stream template awaiting a source.
    Stream(StreamTemplate),
    /// A live, single-pass lazy sequence.
    Seq(LazySeq),
    /// The placeholder sentinel.
    Placeholder,
}

impl Value {
    /// Builds a list from anything convertible into values.
    pub fn list<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Self>,
    {
        Self::List(items.into_iter().map(Into::into).collect())
    }

    /// Builds a tuple from anything convertible into values.
    pub fn tuple<I, T>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Self>,
    {
        Self::Tuple(items.into_iter().map(Into::into).collect())
    }

    /// Builds a dict from `(key, value)` pairs.
    ///
    /// Later entries replace earlier ones with the same key.
    pub fn dict<I, K, T>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, T)>,
        K: Into<String>,
        T: Into<Self>,
    {
        Self::Dict(Rc::new(
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        ))
    }

    /// Returns the name of the value's type, as used in error messages.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Str(_) => "str",
            Self::List(_) => "list",
            Self::Tuple(_) => "tuple",
            Self::Dict(_) => "dict",
            Self::Function(_) => "function",
            Self::Stream(_) => "stream",
            Self::Seq(_) => "sequence",
            Self::Placeholder => "placeholder",
        }
    }

    /// Returns `true` if this is the placeholder sentinel.
    #[must_use]
    pub const fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder)
    }

    /// Truthiness: empty containers, zero, `None` and `false` are falsy.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::None => false,
            Self::Bool(flag) => *flag,
            Self::Int(number) => *number != 0,
            Self::Float(number) => *number != 0.0,
            Self::Str(text) => !text.is_empty(),
            Self::List(items) | Self::Tuple(items) => !items.is_empty(),
            Self::Dict(entries) => !entries.is_empty(),
            Self::Function(_) | Self::Stream(_) | Self::Seq(_) | Self::Placeholder => true,
        }
    }

    /// Returns the integer inside an `Int`.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::UnexpectedType`] for any other variant.
    pub fn as_int(&self) -> Result<i64> {
        match self {
            Self::Int(number) => Ok(*number),
            other => Err(other.unexpected("int")),
        }
    }

    /// Returns the number inside a `Float` or an `Int`.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::UnexpectedType`] for non-numeric variants.
    #[allow(clippy::cast_precision_loss)]
    pub fn as_float(&self) -> Result<f64> {
        match self {
            Self::Float(number) => Ok(*number),
            Self::Int(number) => Ok(*number as f64),
            other => Err(other.unexpected("float")),
        }
    }

    /// Returns the text inside a `Str`.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::UnexpectedType`] for any other variant.
    pub fn as_str(&self) -> Result<&str> {
        match self {
            Self::Str(text) => Ok(&**text),
            other => Err(other.unexpected("str")),
        }
    }

    /// Returns the flag inside a `Bool`.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::UnexpectedType`] for any other variant.
    pub fn as_bool(&self) -> Result<bool> {
        match self {
            Self::Bool(flag) => Ok(*flag),
            other => Err(other.unexpected("bool")),
        }
    }

    /// Returns the items of a `List` or `Tuple`.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::UnexpectedType`] for any other variant.
    pub fn as_items(&self) -> Result<&[Self]> {
        match self {
            Self::List(items) | Self::Tuple(items) => Ok(&**items),
            other => Err(other.unexpected("list or tuple")),
        }
    }

    /// Returns the entries of a `Dict`.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::UnexpectedType`] for any other variant.
    pub fn as_dict(&self) -> Result<&BTreeMap<String, Self>> {
        match self {
            Self::Dict(entries) => Ok(&**entries),
            other => Err(other.unexpected("dict")),
        }
    }

    /// Returns the function inside a `Function`.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::NotCallable`] for any other variant.
    pub fn as_function(&self) -> Result<&Function> {
        match self {
            Self::Function(function) => Ok(function),
            other => Err(ChainError::NotCallable {
                type_name: other.type_name(),
            }),
        }
    }

    /// Turns the value into a lazy sequence.
    ///
    /// Lists and tuples yield their items, strings yield one-character
    /// strings, dicts yield their keys. A `Seq` yields itself: the returned
    /// sequence shares the same single-pass cursor. The placeholder yields
    /// itself once.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::NotIterable`] for scalars, functions and stream
    /// templates.
    pub fn iter(&self) -> Result<LazySeq> {
        match self {
            Self::List(items) | Self::Tuple(items) => Ok(LazySeq::from_shared(Rc::clone(items))),
            Self::Str(text) => {
                let text = Rc::clone(text);
                let mut offset = 0;
                Ok(LazySeq::new(std::iter::from_fn(move || {
                    let character = text[offset..].chars().next()?;
                    offset += character.len_utf8();
                    Some(Ok(Self::from(character)))
                })))
            }
            Self::Dict(entries) => Ok(LazySeq::from_values(
                entries
                    .keys()
                    .map(|key| Self::from(key.as_str()))
                    .collect::<Vec<_>>(),
            )),
            Self::Seq(sequence) => Ok(sequence.clone()),
            Self::Placeholder => Ok(LazySeq::from_values([Self::Placeholder])),
            other => Err(ChainError::NotIterable {
                type_name: other.type_name(),
            }),
        }
    }

    /// Iterates the value to completion and collects its items.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::NotIterable`] if the value cannot be iterated, or
    /// the first error raised while pulling an element.
    pub fn collect_items(&self) -> Result<Vec<Self>> {
        self.iter()?.collect()
    }

    /// The `str()` conversion: strings render without quotes, everything
    /// else renders as its representation.
    #[must_use]
    pub fn to_text(&self) -> String {
        match self {
            Self::Str(text) => text.to_string(),
            other => other.to_string(),
        }
    }

    pub(crate) fn unexpected(&self, expected: &'static str) -> ChainError {
        ChainError::UnexpectedType {
            expected,
            found: self.type_name(),
        }
    }
}

impl PartialEq for Value {
    #[allow(clippy::cast_precision_loss)]
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::None, Self::None) | (Self::Placeholder, Self::Placeholder) => true,
            (Self::Bool(left), Self::Bool(right)) => left == right,
            (Self::Int(left), Self::Int(right)) => left == right,
            (Self::Float(left), Self::Float(right)) => left == right,
            (Self::Int(integer), Self::Float(float)) | (Self::Float(float), Self::Int(integer)) => {
                *integer as f64 == *float
            }
            (Self::Str(left), Self::Str(right)) => left == right,
            (Self::List(left), Self::List(right)) | (Self::Tuple(left), Self::Tuple(right)) => {
                left == right
            }
            (Self::Dict(left), Self::Dict(right)) => left == right,
            (Self::Function(left), Self::Function(right)) => left.ptr_eq(right),
            (Self::Stream(left), Self::Stream(right)) => left.ptr_eq(right),
            (Self::Seq(left), Self::Seq(right)) => left.ptr_eq(right),
            _ => false,
        }
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl From<()> for Value {
    fn from((): ()) -> Self {
        Self::None
    }
}

impl From<bool> for Value {
    fn from(flag: bool) -> Self {
        Self::Bool(flag)
    }
}

impl From<i64> for Value {
    fn from(number: i64) -> Self {
        Self::Int(number)
    }
}

impl From<i32> for Value {
    fn from(number: i32) -> Self {
        Self::Int(i64::from(number))
    }
}

impl From<f64> for Value {
    fn from(number: f64) -> Self {
        Self::Float(number)
    }
}

impl From<char> for Value {
    fn from(character: char) -> Self {
        let mut buffer = [0; 4];
        Self::Str(Rc::from(&*character.encode_utf8(&mut buffer)))
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Self::Str(Rc::from(text))
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Self::Str(Rc::from(text))
    }
}

impl<T: Into<Self>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Self::list(items)
    }
}

impl From<Function> for Value {
    fn from(function: Function) -> Self {
        Self::Function(function)
    }
}

impl From<StreamTemplate> for Value {
    fn from(template: StreamTemplate) -> Self {
        Self::Stream(template)
    }
}

impl From<LazySeq> for Value {
    fn from(sequence: LazySeq) -> Self {
        Self::Seq(sequence)
    }
}

impl From<Placeholder> for Value {
    fn from(_: Placeholder) -> Self {
        Self::Placeholder
    }
}
