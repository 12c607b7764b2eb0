//! Call arguments.

use std::collections::BTreeMap;

use smallvec::SmallVec;

use crate::error::{ChainError, Result};
use crate::value::Value;

/// The positional and keyword arguments of one call.
///
/// Build them with the [`args!`](crate::args) macro or the builder methods.
///
/// # Examples
///
/// ```rust
/// use chainlink::{ANS, Args, Value, args};
///
/// let built = Args::new().with(1).with(ANS).with_keyword("y", "b");
/// assert_eq!(built, args![1, ANS; y = "b"]);
/// assert_eq!(built.len(), 3);
/// assert!(built.contains_placeholder());
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Args {
    pub(crate) positional: SmallVec<[Value; 4]>,
    pub(crate) keywords: BTreeMap<String, Value>,
}

impl Args {
    /// Creates an empty argument list.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an argument list from positional values.
    pub fn from_positional<I, T>(values: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Value>,
    {
        Self {
            positional: values.into_iter().map(Into::into).collect(),
            keywords: BTreeMap::new(),
        }
    }

    /// Appends a positional argument.
    pub fn push(&mut self, value: impl Into<Value>) {
        self.positional.push(value.into());
    }

    /// Inserts a positional argument in front of the others.
    pub fn prepend(&mut self, value: impl Into<Value>) {
        self.positional.insert(0, value.into());
    }

    /// Sets a keyword argument, replacing any previous value for `name`.
    pub fn insert_keyword(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.keywords.insert(name.into(), value.into());
    }

    /// Builder form of [`push`](Self::push).
    #[must_use]
    pub fn with(mut self, value: impl Into<Value>) -> Self {
        self.push(value);
        self
    }

    /// Builder form of [`insert_keyword`](Self::insert_keyword).
    #[must_use]
    pub fn with_keyword(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert_keyword(name, value);
        self
    }

    /// The positional arguments, in order.
    #[must_use]
    pub fn positional(&self) -> &[Value] {
        &self.positional
    }

    /// The keyword arguments, ordered by name.
    #[must_use]
    pub const fn keywords(&self) -> &BTreeMap<String, Value> {
        &self.keywords
    }

    /// Total number of positional and keyword arguments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positional.len() + self.keywords.len()
    }

    /// Returns `true` if there are no arguments at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if any positional or keyword argument is the placeholder.
    #[must_use]
    pub fn contains_placeholder(&self) -> bool {
        self.positional.iter().any(Value::is_placeholder)
            || self.keywords.values().any(Value::is_placeholder)
    }

    /// Binds the arguments to named parameters.
    ///
    /// Positional arguments fill `parameters` in order, then keyword arguments
    /// fill the remaining parameters by name. The bound values are returned in
    /// parameter order.
    ///
    /// # Errors
    ///
    /// - [`ChainError::Arity`] if there are more positional arguments than
    ///   parameters.
    /// - [`ChainError::UnexpectedKeyword`] if a keyword names no parameter or
    ///   a parameter that was already bound positionally.
    /// - [`ChainError::MissingArgument`] if a parameter is left unbound.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chainlink::{Value, args};
    ///
    /// let [x, y, z] = args!["a"; z = "c", y = "b"].bind("f", ["x", "y", "z"]).unwrap();
    /// assert_eq!((x, y, z), (Value::from("a"), Value::from("b"), Value::from("c")));
    /// ```
    pub fn bind<const N: usize>(self, function: &str, parameters: [&str; N]) -> Result<[Value; N]> {
        if self.positional.len() > N {
            return Err(ChainError::Arity {
                function: function.to_string(),
                expected: N,
                given: self.positional.len(),
            });
        }
        let mut slots: [Option<Value>; N] = std::array::from_fn(|_| None);
        for (slot, value) in slots.iter_mut().zip(self.positional) {
            *slot = Some(value);
        }
        for (keyword, value) in self.keywords {
            let index = parameters
                .iter()
                .position(|parameter| *parameter == keyword)
                .filter(|index| slots[*index].is_none())
                .ok_or_else(|| ChainError::UnexpectedKeyword {
                    function: function.to_string(),
                    keyword: keyword.clone(),
                })?;
            slots[index] = Some(value);
        }
        if let Some(index) = slots.iter().position(Option::is_none) {
            return Err(ChainError::MissingArgument {
                function: function.to_string(),
                parameter: parameters[index].to_string(),
            });
        }
        Ok(slots.map(Option::unwrap_or_default))
    }
}

/// Builds an [`Args`] value.
///
/// Positional arguments come first; keyword arguments follow a `;`.
///
/// ```rust
/// use chainlink::{ANS, args};
///
/// let positional = args![1, 2];
/// let mixed = args![ANS; y = "b", z = ANS];
/// let keywords_only = args![; key = 3];
///
/// assert_eq!(positional.len(), 2);
/// assert_eq!(mixed.len(), 3);
/// assert_eq!(keywords_only.positional().len(), 0);
/// ```
#[macro_export]
macro_rules! args {
    () => {
        $crate::Args::new()
    };

    ($($value:expr),* ; $($name:ident = $keyword_value:expr),* $(,)?) => {{
        let mut arguments = $crate::Args::new();
        $(arguments.push($value);)*
        $(arguments.insert_keyword(stringify!($name), $keyword_value);)*
        arguments
    }};

    ($($value:expr),+ $(,)?) => {{
        let mut arguments = $crate::Args::new();
        $(arguments.push($value);)+
        arguments
    }};
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placeholder::ANS;
    use rstest::rstest;

    #[rstest]
    fn test_macro_forms() {
        let arguments = args![1, ANS; y = "b"];
        assert_eq!(
            arguments.positional(),
            &[Value::from(1), Value::Placeholder][..]
        );
        assert_eq!(arguments.keywords().get("y"), Some(&Value::from("b")));
        assert!(args![].is_empty());
    }

    #[rstest]
    fn test_prepend() {
        let mut arguments = args![2];
        arguments.prepend(1);
        assert_eq!(arguments, args![1, 2]);
    }

    #[rstest]
    fn test_bind_positional_then_keywords() {
        let [x, y] = args![1; y = 2].bind("f", ["x", "y"]).unwrap();
        assert_eq!((x, y), (Value::from(1), Value::from(2)));
    }

    #[rstest]
    fn test_bind_too_many_positional() {
        assert_eq!(
            args![1, 2, 3].bind("f", ["x", "y"]).err(),
            Some(ChainError::Arity {
                function: "f".to_string(),
                expected: 2,
                given: 3
            })
        );
    }

    #[rstest]
    #[case(args![1; x = 2])]
    #[case(args![1; w = 2])]
    fn test_bind_rejects_keyword(#[case] arguments: Args) {
        assert!(matches!(
            arguments.bind("f", ["x", "y"]),
            Err(ChainError::UnexpectedKeyword { .. })
        ));
    }

    #[rstest]
    fn test_bind_missing() {
        assert_eq!(
            args![1].bind("f", ["x", "y"]).err(),
            Some(ChainError::MissingArgument {
                function: "f".to_string(),
                parameter: "y".to_string()
            })
        );
    }
}
