//! Deferred, reusable chains.

use std::fmt;
use std::rc::Rc;

use crate::error::Result;
use crate::function::{Args, Function};
use crate::value::Value;

use super::link::Link;
use super::stage::StageDescriptor;

const UNNAMED: &str = "chain.Function";

/// Starts a deferred chain whose first stage is `operation`.
///
/// # Examples
///
/// ```rust
/// use chainlink::{ANS, Function, StreamTemplate, Value, build};
///
/// let materialize = Function::unary("list", |value| Ok(Value::list(value.collect_items()?)));
/// let evens_plus_two = build(StreamTemplate::over(ANS).filter(|value| Ok(value.as_int()? % 2 == 0)))
///     .apply(StreamTemplate::over(ANS).map(|value| Ok(Value::from(value.as_int()? + 2))))
///     .apply(materialize)
///     .compile();
///
/// assert_eq!(evens_plus_two.call(Value::list(1..=6)).unwrap(), Value::list([4, 6, 8]));
/// assert_eq!(evens_plus_two.call(Value::list(7..=12)).unwrap(), Value::list([10, 12, 14]));
/// ```
pub fn build(operation: impl Into<Value>) -> ChainBuilder {
    ChainBuilder::new().apply(operation)
}

/// Starts a deferred chain whose first stage is `operation` with `args`.
pub fn build_with(operation: impl Into<Value>, args: Args) -> ChainBuilder {
    ChainBuilder::new().apply_with(operation, args)
}

/// Records stages without running them.
///
/// Nothing is validated while recording; an illegal stage fails when the
/// compiled chain is called.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ChainBuilder {
    stages: Vec<StageDescriptor>,
}

impl ChainBuilder {
    /// Creates a builder with no stages. Its compiled chain returns its input.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `operation` with no extra arguments.
    #[must_use]
    pub fn apply(self, operation: impl Into<Value>) -> Self {
        self.apply_with(operation, Args::new())
    }

    /// Records `operation` with `args`.
    #[must_use]
    pub fn apply_with(mut self, operation: impl Into<Value>, args: Args) -> Self {
        self.stages.push(StageDescriptor::new(operation, args));
        self
    }

    /// The recorded stages, in order.
    #[must_use]
    pub fn stages(&self) -> &[StageDescriptor] {
        &self.stages
    }

    /// Number of recorded stages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Returns `true` if no stage has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Freezes the recorded stages into an unnamed reusable chain.
    #[must_use]
    pub fn compile(self) -> CompiledChain {
        CompiledChain {
            stages: self.stages.into(),
            label: None,
        }
    }

    /// Freezes the recorded stages into a reusable chain named `label`.
    #[must_use]
    pub fn compile_named(self, label: impl Into<Rc<str>>) -> CompiledChain {
        CompiledChain {
            label: Some(label.into()),
            ..self.compile()
        }
    }
}

/// A reusable chain.
///
/// Each call replays the recorded stages on a fresh [`Link`], so calls are
/// independent of each other: stream stages are rebuilt from their templates
/// every time.
#[derive(Clone, Debug)]
pub struct CompiledChain {
    stages: Rc<[StageDescriptor]>,
    label: Option<Rc<str>>,
}

impl CompiledChain {
    /// Runs the chain on `initial` and returns the final value.
    ///
    /// # Errors
    ///
    /// Returns the error of the first stage that fails; later stages do not
    /// run.
    pub fn call(&self, initial: impl Into<Value>) -> Result<Value> {
        tracing::debug!(
            chain = self.name(),
            stages = self.stages.len(),
            "replaying compiled chain"
        );
        let mut link = Link::new(initial);
        for stage in self.stages.iter() {
            link.apply_stage(stage)?;
        }
        Ok(link.into_result())
    }

    /// The label given at compile time, or `chain.Function`.
    #[must_use]
    pub fn name(&self) -> &str {
        self.label.as_deref().unwrap_or(UNNAMED)
    }

    /// Number of recorded stages.
    #[must_use]
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    /// Wraps the chain as a unary [`Function`], so it can be used as a stage
    /// of another chain.
    #[must_use]
    pub fn into_function(self) -> Function {
        let name = self.name().to_string();
        Function::unary(name, move |value| self.call(value))
    }
}

impl fmt::Display for CompiledChain {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.label {
            Some(label) => write!(formatter, "<function {label}>"),
            None => write!(formatter, "<{UNNAMED} object>"),
        }
    }
}
