//! The placeholder sentinel and argument substitution.
//!
//! [`ANS`] stands for "the answer of the previous stage". It has two uses:
//!
//! - As a call argument, it marks where the current value is injected. A stage
//!   that mentions the placeholder receives the current value only at the
//!   marked positions; a stage that does not mention it receives the current
//!   value as its first positional argument.
//! - As the source of a [`StreamTemplate`](crate::StreamTemplate), it marks
//!   the stream as awaiting the upstream sequence.

use std::fmt;

use crate::function::Args;
use crate::value::Value;

/// Marker type of the placeholder.
///
/// `Placeholder` is a unit struct, so [`ANS`] is its only value and comparing
/// against it is an identity check.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Placeholder;

/// The placeholder constant.
///
/// # Examples
///
/// ```rust
/// use chainlink::{ANS, Value, args};
///
/// let arguments = args![0, ANS];
/// assert_eq!(arguments.positional()[1], Value::Placeholder);
/// assert_eq!(ANS.to_string(), "<placeholder ANS>");
/// ```
pub const ANS: Placeholder = Placeholder;

impl fmt::Display for Placeholder {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("<placeholder ANS>")
    }
}

/// Iterating the placeholder yields the placeholder itself, so it can stand
/// in wherever a sequence is expected.
impl IntoIterator for Placeholder {
    type Item = Self;
    type IntoIter = std::iter::Once<Self>;

    fn into_iter(self) -> Self::IntoIter {
        std::iter::once(self)
    }
}

/// Replaces every placeholder in `args` with `current`.
///
/// Returns the rewritten arguments and whether at least one replacement
/// happened. Arguments that are not the placeholder are left untouched.
///
/// # Examples
///
/// ```rust
/// use chainlink::{ANS, Value, args, substitute};
///
/// let (rewritten, used) = substitute(&Value::from(9), &args![0, ANS; y = ANS]);
/// assert!(used);
/// assert_eq!(rewritten, args![0, 9; y = 9]);
///
/// let (untouched, used) = substitute(&Value::from(9), &args![1]);
/// assert!(!used);
/// assert_eq!(untouched, args![1]);
/// ```
#[must_use]
pub fn substitute(current: &Value, args: &Args) -> (Args, bool) {
    let mut used = false;
    let mut replace = |value: &Value| {
        if value.is_placeholder() {
            used = true;
            current.clone()
        } else {
            value.clone()
        }
    };
    let positional = args.positional.iter().map(&mut replace).collect();
    let keywords = args
        .keywords
        .iter()
        .map(|(name, value)| (name.clone(), replace(value)))
        .collect();
    (
        Args {
            positional,
            keywords,
        },
        used,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args;
    use rstest::rstest;

    #[rstest]
    fn test_placeholder_iterates_to_itself() {
        assert_eq!(ANS.into_iter().collect::<Vec<_>>(), vec![ANS]);
    }

    #[rstest]
    fn test_substitute_every_occurrence() {
        let (rewritten, used) = substitute(&Value::from("z"), &args![ANS, ANS; z = ANS]);
        assert!(used);
        assert_eq!(rewritten, args!["z", "z"; z = "z"]);
    }

    #[rstest]
    fn test_substitute_keywords_only() {
        let (rewritten, used) = substitute(&Value::from(1), &args!["x"; y = ANS]);
        assert!(used);
        assert_eq!(rewritten, args!["x"; y = 1]);
    }

    #[rstest]
    fn test_nested_placeholder_is_not_substituted() {
        let nested = Value::list([Value::Placeholder]);
        let (rewritten, used) = substitute(&Value::from(1), &args![nested.clone()]);
        assert!(!used);
        assert_eq!(rewritten, args![nested]);
    }
}
