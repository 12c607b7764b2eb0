//! Lazy-stream templates.
//!
//! A [`StreamTemplate`] describes a per-element transformation over a source
//! without touching the source. It is the stage form of a lazy sequence: a
//! template written over the placeholder [`ANS`](crate::ANS) is re-targeted at
//! execution time onto the real upstream sequence by [`rebind`].
//!
//! Templates are data (the declared sources plus a list of map and filter
//! steps), never a half-consumed iterator. Every rebind builds a fresh
//! [`LazySeq`] from the same template, so a template can be replayed any
//! number of times.
//!
//! # Examples
//!
//! ```rust
//! use chainlink::{ANS, StreamTemplate, Value, args, rebind};
//!
//! let doubled = StreamTemplate::over(ANS).map(|value| Ok(Value::from(value.as_int()? * 2)));
//!
//! let first = rebind(&doubled, &args![], &Value::list([1, 2, 3])).unwrap();
//! let second = rebind(&doubled, &args![], &Value::list([10])).unwrap();
//!
//! assert_eq!(first.collect_values().unwrap(), vec![Value::from(2), Value::from(4), Value::from(6)]);
//! assert_eq!(second.collect_values().unwrap(), vec![Value::from(20)]);
//! ```

mod rebind;
mod sequence;

pub use rebind::rebind;
pub use sequence::LazySeq;

use std::fmt;
use std::rc::Rc;

use smallvec::{SmallVec, smallvec};

use crate::error::Result;
use crate::value::Value;

type MapStep = dyn Fn(Value) -> Result<Value>;
type FilterStep = dyn Fn(&Value) -> Result<bool>;

/// One per-element step of a template.
#[derive(Clone)]
pub(crate) enum Step {
    Map(Rc<MapStep>),
    Filter(Rc<FilterStep>),
}

#[derive(Clone)]
struct Template {
    sources: SmallVec<[Value; 1]>,
    steps: Vec<Step>,
}

/// An immutable description of a lazy per-element transformation.
///
/// Steps run in the order they were declared. Cloning shares the template.
#[derive(Clone)]
pub struct StreamTemplate {
    template: Rc<Template>,
}

impl StreamTemplate {
    /// Declares a template iterating over `source`.
    ///
    /// Use [`ANS`](crate::ANS) as the source for a chain stage.
    pub fn over(source: impl Into<Value>) -> Self {
        Self {
            template: Rc::new(Template {
                sources: smallvec![source.into()],
                steps: Vec::new(),
            }),
        }
    }

    /// Declares an additional, nested source binding.
    ///
    /// Such templates can be built but are rejected when used as a stage: a
    /// stage stream must iterate over exactly one source.
    #[must_use]
    pub fn and_over(self, source: impl Into<Value>) -> Self {
        self.modify(|template| template.sources.push(source.into()))
    }

    /// Appends an element transformation.
    #[must_use]
    pub fn map<F>(self, transform: F) -> Self
    where
        F: Fn(Value) -> Result<Value> + 'static,
    {
        self.modify(|template| template.steps.push(Step::Map(Rc::new(transform))))
    }

    /// Appends a predicate; elements for which it returns `false` are skipped.
    #[must_use]
    pub fn filter<F>(self, predicate: F) -> Self
    where
        F: Fn(&Value) -> Result<bool> + 'static,
    {
        self.modify(|template| template.steps.push(Step::Filter(Rc::new(predicate))))
    }

    /// The declared source bindings, in declaration order.
    #[must_use]
    pub fn sources(&self) -> &[Value] {
        &self.template.sources
    }

    /// Number of map and filter steps.
    #[must_use]
    pub fn step_count(&self) -> usize {
        self.template.steps.len()
    }

    /// Returns `true` if both handles share the same template.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.template, &other.template)
    }

    pub(crate) fn steps(&self) -> &[Step] {
        &self.template.steps
    }

    fn modify(self, change: impl FnOnce(&mut Template)) -> Self {
        let mut template = Rc::unwrap_or_clone(self.template);
        change(&mut template);
        Self {
            template: Rc::new(template),
        }
    }
}

impl fmt::Debug for StreamTemplate {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("StreamTemplate")
            .field("sources", &self.template.sources)
            .field("steps", &self.template.steps.len())
            .finish()
    }
}
