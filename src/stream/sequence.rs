//! Live lazy sequences.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::error::{ChainError, Result};
use crate::value::Value;

type Cursor = Box<dyn Iterator<Item = Result<Value>>>;

/// A single-pass lazy sequence of values.
///
/// A `LazySeq` performs no work until it is iterated. Clones share the same
/// cursor: pulling an element through one handle advances all of them, and
/// once exhausted the sequence stays exhausted.
///
/// Errors raised while producing an element are yielded as `Err` items.
///
/// # Examples
///
/// ```rust
/// use chainlink::{LazySeq, Value};
///
/// let sequence = LazySeq::from_values([Value::from(1), Value::from(2)]);
/// let mut handle = sequence.clone();
/// assert_eq!(handle.next(), Some(Ok(Value::from(1))));
/// assert_eq!(sequence.collect_values().unwrap(), vec![Value::from(2)]);
/// assert!(sequence.collect_values().unwrap().is_empty());
/// ```
#[derive(Clone)]
pub struct LazySeq {
    cursor: Rc<RefCell<Cursor>>,
}

impl LazySeq {
    /// Wraps an iterator of fallible values.
    pub fn new<I>(iterator: I) -> Self
    where
        I: Iterator<Item = Result<Value>> + 'static,
    {
        Self {
            cursor: Rc::new(RefCell::new(Box::new(iterator))),
        }
    }

    /// Wraps an iterator of values.
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = Value>,
        I::IntoIter: 'static,
    {
        Self::new(values.into_iter().map(Ok))
    }

    pub(crate) fn from_shared(items: Rc<[Value]>) -> Self {
        let mut index = 0;
        Self::new(std::iter::from_fn(move || {
            let item = items.get(index)?.clone();
            index += 1;
            Some(Ok(item))
        }))
    }

    /// Drains the remaining elements.
    ///
    /// # Errors
    ///
    /// Returns the first error yielded by the sequence.
    pub fn collect_values(&self) -> Result<Vec<Value>> {
        self.clone().collect()
    }

    /// Returns `true` if both handles share the same cursor.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.cursor, &other.cursor)
    }
}

impl Iterator for LazySeq {
    type Item = Result<Value>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.cursor.try_borrow_mut() {
            Ok(mut cursor) => cursor.next(),
            Err(_) => Some(Err(ChainError::operation(
                "sequence is already being iterated",
            ))),
        }
    }
}

static_assertions::assert_not_impl_any!(LazySeq: Send, Sync);

impl fmt::Debug for LazySeq {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("LazySeq(..)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::cell::Cell;

    #[rstest]
    fn test_no_work_until_iterated() {
        let pulled = Rc::new(Cell::new(0));
        let counter = Rc::clone(&pulled);
        let mut sequence = LazySeq::new((1..=3).map(move |number| {
            counter.set(counter.get() + 1);
            Ok(Value::from(number))
        }));
        assert_eq!(pulled.get(), 0);
        assert_eq!(sequence.next(), Some(Ok(Value::from(1))));
        assert_eq!(pulled.get(), 1);
    }

    #[rstest]
    fn test_reentrant_iteration_is_an_error() {
        let holder: Rc<RefCell<Option<LazySeq>>> = Rc::new(RefCell::new(None));
        let inner = Rc::clone(&holder);
        let sequence = LazySeq::new(std::iter::from_fn(move || {
            let mut own = inner.borrow().clone()?;
            own.next()
        }));
        *holder.borrow_mut() = Some(sequence.clone());
        assert_eq!(
            sequence.collect_values(),
            Err(ChainError::operation("sequence is already being iterated"))
        );
    }

    #[rstest]
    fn test_from_shared_does_not_copy_items() {
        let items: Rc<[Value]> = Rc::from(vec![Value::from(1), Value::from(2)]);
        let sequence = LazySeq::from_shared(Rc::clone(&items));
        assert_eq!(Rc::strong_count(&items), 2);
        assert_eq!(
            sequence.collect_values().unwrap(),
            vec![Value::from(1), Value::from(2)]
        );
    }
}
