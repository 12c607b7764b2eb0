//! Re-targeting a template onto a real upstream sequence.

use crate::error::{ChainError, Result};
use crate::function::Args;
use crate::value::Value;

use super::{LazySeq, Step, StreamTemplate};

/// Builds a lazy sequence from `template`, iterating over `upstream` in place
/// of the placeholder.
///
/// The preconditions are checked in order and the first violation wins:
///
/// 1. `args` must be empty, otherwise [`ChainError::ArgumentCount`] reports
///    how many arguments were supplied.
/// 2. The template must declare exactly one source, otherwise
///    [`ChainError::StructuralViolation`].
/// 3. That source must be the placeholder, otherwise
///    [`ChainError::SourceIdentity`] names the declared source's type.
///
/// The returned sequence is lazy: no element of `upstream` is pulled until the
/// sequence itself is iterated. The template is not consumed.
///
/// # Errors
///
/// Besides the three precondition failures, returns
/// [`ChainError::NotIterable`] if `upstream` cannot be iterated.
pub fn rebind(template: &StreamTemplate, args: &Args, upstream: &Value) -> Result<LazySeq> {
    if !args.is_empty() {
        return Err(ChainError::ArgumentCount { count: args.len() });
    }
    let [source] = template.sources() else {
        return Err(ChainError::StructuralViolation {
            bindings: template.sources().len(),
        });
    };
    if !source.is_placeholder() {
        return Err(ChainError::SourceIdentity {
            type_name: source.type_name(),
        });
    }
    tracing::trace!(steps = template.step_count(), upstream = upstream.type_name(), "rebinding stream");
    Ok(LazySeq::new(Rebound {
        upstream: upstream.iter()?,
        template: template.clone(),
    }))
}

struct Rebound {
    upstream: LazySeq,
    template: StreamTemplate,
}

impl Iterator for Rebound {
    type Item = Result<Value>;

    fn next(&mut self) -> Option<Self::Item> {
        'elements: loop {
            let mut value = match self.upstream.next()? {
                Ok(value) => value,
                Err(error) => return Some(Err(error)),
            };
            for step in self.template.steps() {
                match step {
                    Step::Map(transform) => match transform(value) {
                        Ok(mapped) => value = mapped,
                        Err(error) => return Some(Err(error)),
                    },
                    Step::Filter(predicate) => match predicate(&value) {
                        Ok(true) => {}
                        Ok(false) => continue 'elements,
                        Err(error) => return Some(Err(error)),
                    },
                }
            }
            return Some(Ok(value));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args;
    use crate::placeholder::ANS;
    use rstest::rstest;

    fn even(value: &Value) -> Result<bool> {
        Ok(value.as_int()? % 2 == 0)
    }

    #[rstest]
    fn test_filter_then_map() {
        let template = StreamTemplate::over(ANS)
            .filter(even)
            .map(|value| Ok(Value::from(value.as_int()? + 2)));
        let sequence = rebind(&template, &args![], &Value::list(1..=6)).unwrap();
        assert_eq!(
            sequence.collect_values().unwrap(),
            vec![Value::from(4), Value::from(6), Value::from(8)]
        );
    }

    #[rstest]
    #[case(args![1, 2], 2)]
    #[case(args![1, 2; z = 3], 3)]
    #[case(args![; z = 3], 1)]
    fn test_arguments_are_rejected_first(#[case] arguments: Args, #[case] count: usize) {
        let illegal = StreamTemplate::over(Value::list([1])).and_over(ANS);
        assert_eq!(
            rebind(&illegal, &arguments, &Value::list([1])).err(),
            Some(ChainError::ArgumentCount { count })
        );
    }

    #[rstest]
    fn test_multiple_bindings_before_source_identity() {
        let template = StreamTemplate::over(Value::tuple([1, 2])).and_over(ANS);
        assert_eq!(
            rebind(&template, &args![], &Value::list([1])).err(),
            Some(ChainError::StructuralViolation { bindings: 2 })
        );
    }

    #[rstest]
    fn test_source_must_be_placeholder() {
        let template = StreamTemplate::over(Value::tuple([1, 2]));
        assert_eq!(
            rebind(&template, &args![], &Value::from("abc")).err(),
            Some(ChainError::SourceIdentity { type_name: "tuple" })
        );
    }

    #[rstest]
    fn test_upstream_must_be_iterable() {
        let template = StreamTemplate::over(ANS);
        assert_eq!(
            rebind(&template, &args![], &Value::from(9)).err(),
            Some(ChainError::NotIterable { type_name: "int" })
        );
    }

    #[rstest]
    fn test_step_errors_surface_when_iterated() {
        let template = StreamTemplate::over(ANS).filter(even);
        let sequence = rebind(&template, &args![], &Value::list(["a"])).unwrap();
        assert_eq!(
            sequence.collect_values(),
            Err(ChainError::UnexpectedType {
                expected: "int",
                found: "str"
            })
        );
    }
}
