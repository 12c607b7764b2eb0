//! A small library of ready-made stage functions.
//!
//! Each builtin is a constructor returning a fresh [`Function`], meant to be
//! passed straight to [`Link::apply`](crate::Link::apply) or
//! [`ChainBuilder::apply`](crate::ChainBuilder::apply).
//!
//! | builtin      | parameters                   | result                                  |
//! |--------------|------------------------------|-----------------------------------------|
//! | [`identity`] | value                        | the value                               |
//! | [`add`]      | left, right                  | sum or concatenation                    |
//! | [`mul`]      | left, right                  | product or repetition                   |
//! | [`list`]     | iterable                     | materialized list                       |
//! | [`tuple`]    | iterable                     | materialized tuple                      |
//! | [`string`]   | value                        | text form                               |
//! | [`boolean`]  | value                        | truthiness of the value                 |
//! | [`reversed`] | list, tuple or str           | lazy reversed sequence                  |
//! | [`range`]    | [start,] stop [, step]       | lazy integer sequence                   |
//! | [`product`]  | iterables...                 | lazy cartesian product of tuples        |
//! | [`sum`]      | iterable                     | sum of the items                        |
//! | [`len`]      | list, tuple, str or dict     | length                                  |
//! | [`replace`]  | text, old, new               | text with `old` replaced by `new`       |
//! | [`join`]     | items, separator             | items joined by the separator           |
//! | [`unpack`]   | value, function              | `function` called with `value` spread   |
//!
//! # Examples
//!
//! ```rust
//! use chainlink::builtins::{add, string};
//! use chainlink::{Value, args, begin};
//!
//! let mut link = begin(15);
//! link.apply_with(add(), args![15]).unwrap().apply(string()).unwrap();
//! assert_eq!(link.result(), &Value::from("30"));
//! ```

use std::rc::Rc;

use crate::error::{ChainError, Result};
use crate::function::{Args, Function};
use crate::stream::LazySeq;
use crate::value::Value;

/// Returns its argument unchanged.
#[must_use]
pub fn identity() -> Function {
    Function::unary("identity", Ok)
}

/// Adds numbers or concatenates strings, lists and tuples.
///
/// Mixing an int with a float yields a float.
#[must_use]
pub fn add() -> Function {
    Function::binary("add", |left, right| add_values(&left, &right))
}

/// Multiplies numbers or repeats a string or list by an int.
#[must_use]
pub fn mul() -> Function {
    Function::binary("mul", |left, right| mul_values(&left, &right))
}

/// Drains any iterable into a list. This is the usual terminal stage after
/// stream stages.
#[must_use]
pub fn list() -> Function {
    Function::unary("list", |value| Ok(Value::list(value.collect_items()?)))
}

/// Drains any iterable into a tuple.
#[must_use]
pub fn tuple() -> Function {
    Function::unary("tuple", |value| Ok(Value::tuple(value.collect_items()?)))
}

/// Converts a value to its text form.
#[must_use]
pub fn string() -> Function {
    Function::unary("str", |value| Ok(Value::from(value.to_text())))
}

/// The truthiness of a value: empty containers, zero, `None` and `false`
/// are falsy.
#[must_use]
pub fn boolean() -> Function {
    Function::unary("bool", |value| Ok(Value::Bool(value.is_truthy())))
}

/// Iterates a list, tuple or string backwards, lazily.
#[must_use]
pub fn reversed() -> Function {
    Function::unary("reversed", |value| {
        let items: Rc<[Value]> = match &value {
            Value::List(items) | Value::Tuple(items) => Rc::clone(items),
            Value::Str(_) => value.collect_items()?.into(),
            other => return Err(other.unexpected("list, tuple or str")),
        };
        let mut remaining = items.len();
        Ok(Value::Seq(LazySeq::new(std::iter::from_fn(move || {
            remaining = remaining.checked_sub(1)?;
            Some(Ok(items[remaining].clone()))
        }))))
    })
}

/// A lazy sequence of integers: `range(stop)`, `range(start, stop)` or
/// `range(start, stop, step)`.
#[must_use]
pub fn range() -> Function {
    Function::new("range", |args: Args| {
        let (start, stop, step) = match args.len() {
            1 => {
                let [stop] = args.bind("range", ["stop"])?;
                (0, stop.as_int()?, 1)
            }
            2 => {
                let [start, stop] = args.bind("range", ["start", "stop"])?;
                (start.as_int()?, stop.as_int()?, 1)
            }
            _ => {
                let [start, stop, step] = args.bind("range", ["start", "stop", "step"])?;
                (start.as_int()?, stop.as_int()?, step.as_int()?)
            }
        };
        if step == 0 {
            return Err(ChainError::operation("range() step must not be zero"));
        }
        let numbers = std::iter::successors(Some(start), move |number| number.checked_add(step))
            .take_while(move |number| if step > 0 { *number < stop } else { *number > stop })
            .map(|number| Ok(Value::Int(number)));
        Ok(Value::Seq(LazySeq::new(numbers)))
    })
}

/// The cartesian product of its positional arguments, as a lazy sequence of
/// tuples.
///
/// The inputs are drained when the function is called; the tuples are
/// produced on demand.
#[must_use]
pub fn product() -> Function {
    Function::new("product", |args: Args| {
        if let Some(keyword) = args.keywords().keys().next() {
            return Err(ChainError::UnexpectedKeyword {
                function: "product".to_string(),
                keyword: keyword.clone(),
            });
        }
        let pools = args
            .positional()
            .iter()
            .map(Value::collect_items)
            .collect::<Result<Vec<_>>>()?;
        Ok(Value::Seq(LazySeq::new(Product::new(pools))))
    })
}

/// Sums the items of an iterable, starting from `0`.
#[must_use]
pub fn sum() -> Function {
    Function::unary("sum", |value| {
        value
            .iter()?
            .try_fold(Value::Int(0), |total, item| add_values(&total, &item?))
    })
}

/// The number of items of a list, tuple, string or dict.
#[must_use]
pub fn len() -> Function {
    Function::unary("len", |value| {
        let length = match &value {
            Value::List(items) | Value::Tuple(items) => items.len(),
            Value::Str(text) => text.chars().count(),
            Value::Dict(entries) => entries.len(),
            other => return Err(other.unexpected("list, tuple, str or dict")),
        };
        i64::try_from(length)
            .map(Value::Int)
            .map_err(|_| ChainError::operation("length does not fit in an int"))
    })
}

/// Replaces every occurrence of `old` in `text` with `new`.
#[must_use]
pub fn replace() -> Function {
    Function::new("replace", |args: Args| {
        let [text, old, new] = args.bind("replace", ["text", "old", "new"])?;
        Ok(Value::from(text.as_str()?.replace(old.as_str()?, new.as_str()?)))
    })
}

/// Joins the string items of an iterable with a separator.
#[must_use]
pub fn join() -> Function {
    Function::new("join", |args: Args| {
        let [items, separator] = args.bind("join", ["items", "separator"])?;
        separator.method("join")?.call(Args::new().with(items))
    })
}

/// Calls `function` with `value` spread into its arguments.
///
/// A list or tuple becomes the positional arguments, a dict becomes the
/// keyword arguments, and any other value is passed as the only argument.
///
/// # Examples
///
/// ```rust
/// use chainlink::builtins::unpack;
/// use chainlink::{Args, Function, Value, args, begin};
///
/// let point = Function::new("point", |args: Args| {
///     let [x, y] = args.bind("point", ["x", "y"])?;
///     Ok(Value::tuple([x, y]))
/// });
/// let mut link = begin(Value::dict([("y", 2), ("x", 1)]));
/// link.apply_with(unpack(), args![point]).unwrap();
/// assert_eq!(link.result(), &Value::tuple([1, 2]));
/// ```
#[must_use]
pub fn unpack() -> Function {
    Function::new("unpack", |args: Args| {
        let [value, function] = args.bind("unpack", ["value", "function"])?;
        let spread = match value {
            Value::List(items) | Value::Tuple(items) => {
                Args::from_positional(items.iter().cloned())
            }
            Value::Dict(entries) => entries
                .iter()
                .fold(Args::new(), |spread, (key, item)| {
                    spread.with_keyword(key.as_str(), item.clone())
                }),
            other => Args::new().with(other),
        };
        function.as_function()?.call(spread)
    })
}

// =============================================================================
// Arithmetic
// =============================================================================

fn overflow(operation: &str) -> ChainError {
    ChainError::operation(format!("integer overflow in {operation}"))
}

fn concatenate(left: &[Value], right: &[Value]) -> Rc<[Value]> {
    left.iter().chain(right).cloned().collect()
}

fn add_values(left: &Value, right: &Value) -> Result<Value> {
    match (left, right) {
        (Value::Int(first), Value::Int(second)) => first
            .checked_add(*second)
            .map(Value::Int)
            .ok_or_else(|| overflow("add")),
        (Value::Float(_) | Value::Int(_), Value::Float(_) | Value::Int(_)) => {
            Ok(Value::Float(left.as_float()? + right.as_float()?))
        }
        (Value::Str(first), Value::Str(second)) => Ok(Value::from(format!("{first}{second}"))),
        (Value::List(first), Value::List(second)) => Ok(Value::List(concatenate(first, second))),
        (Value::Tuple(first), Value::Tuple(second)) => {
            Ok(Value::Tuple(concatenate(first, second)))
        }
        (Value::Int(_) | Value::Float(_) | Value::Str(_) | Value::List(_) | Value::Tuple(_), other) => {
            Err(other.unexpected(left.type_name()))
        }
        (other, _) => Err(other.unexpected("int, float, str, list or tuple")),
    }
}

/// Length of `unit` repeated `times` times, refused when the result would
/// exceed `isize::MAX` bytes.
fn repeated_len(unit: usize, times: i64, element_size: usize) -> Result<usize> {
    let times = usize::try_from(times).unwrap_or(0);
    let too_long = || ChainError::operation("repeated sequence is too long");
    let length = unit.checked_mul(times).ok_or_else(too_long)?;
    let bytes = length.checked_mul(element_size).ok_or_else(too_long)?;
    if isize::try_from(bytes).is_err() {
        return Err(too_long());
    }
    Ok(length)
}

fn repeat(items: &[Value], times: i64) -> Result<Rc<[Value]>> {
    let length = repeated_len(items.len(), times, std::mem::size_of::<Value>())?;
    Ok(items.iter().cycle().take(length).cloned().collect())
}

fn mul_values(left: &Value, right: &Value) -> Result<Value> {
    match (left, right) {
        (Value::Int(first), Value::Int(second)) => first
            .checked_mul(*second)
            .map(Value::Int)
            .ok_or_else(|| overflow("mul")),
        (Value::Float(_) | Value::Int(_), Value::Float(_) | Value::Int(_)) => {
            Ok(Value::Float(left.as_float()? * right.as_float()?))
        }
        (Value::Str(text), Value::Int(times)) | (Value::Int(times), Value::Str(text)) => {
            repeated_len(text.len(), *times, 1)?;
            Ok(Value::from(text.repeat(usize::try_from(*times).unwrap_or(0))))
        }
        (Value::List(items), Value::Int(times)) | (Value::Int(times), Value::List(items)) => {
            Ok(Value::List(repeat(items, *times)?))
        }
        (Value::Int(_) | Value::Float(_) | Value::Str(_) | Value::List(_), other) => {
            Err(other.unexpected("int"))
        }
        (other, _) => Err(other.unexpected("int, float, str or list")),
    }
}

// =============================================================================
// Cartesian product
// =============================================================================

struct Product {
    pools: Vec<Vec<Value>>,
    indices: Vec<usize>,
    exhausted: bool,
}

impl Product {
    fn new(pools: Vec<Vec<Value>>) -> Self {
        let exhausted = pools.iter().any(Vec::is_empty);
        Self {
            indices: vec![0; pools.len()],
            pools,
            exhausted,
        }
    }

    fn advance(&mut self) {
        for position in (0..self.indices.len()).rev() {
            self.indices[position] += 1;
            if self.indices[position] < self.pools[position].len() {
                return;
            }
            self.indices[position] = 0;
        }
        self.exhausted = true;
    }
}

impl Iterator for Product {
    type Item = Result<Value>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }
        let combination = Value::tuple(
            self.indices
                .iter()
                .zip(&self.pools)
                .map(|(index, pool)| pool[*index].clone()),
        );
        self.advance();
        Some(Ok(combination))
    }
}
