//! Attribute resolution on values.
//!
//! Chains can call a method on the value they hold without leaving the chain
//! (see [`Link::method`](crate::Link::method)). Resolution is a capability
//! check against a fixed table per value type:
//!
//! | type            | fields           | methods                                                                  |
//! |-----------------|------------------|--------------------------------------------------------------------------|
//! | `str`           |                  | `upper`, `lower`, `strip`, `replace`, `split`, `join`, `startswith`, `endswith`, `count` |
//! | `list`, `tuple` |                  | `count`, `index`, `copy`                                                 |
//! | `dict`          | every key        | `keys`, `values`, `items`, `get`                                         |
//! | `int`           | `real`, `imag`   | `bit_length`                                                             |
//! | `float`         | `real`, `imag`   | `is_integer`                                                             |
//!
//! Dict keys shadow dict methods, which gives dicts attribute-style field
//! reads.

use crate::error::{ChainError, Result};
use crate::function::{Args, Function};

use super::Value;

/// The outcome of resolving a name on a value.
#[derive(Clone, Debug, PartialEq)]
pub enum Attribute {
    /// A method already bound to its receiver.
    Method(Function),
    /// A plain field. It is callable only if it holds a [`Value::Function`].
    Field(Value),
}

type MethodBody = fn(&Value, Args) -> Result<Value>;

impl Value {
    /// Resolves `name` on this value.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::AttributeMissing`] if the value's type has no
    /// such field or method.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use chainlink::{Args, Attribute, Value};
    ///
    /// let Attribute::Method(upper) = Value::from("abc").attribute("upper").unwrap() else {
    ///     panic!("expected a method");
    /// };
    /// assert_eq!(upper.call(Args::new()).unwrap(), Value::from("ABC"));
    ///
    /// assert_eq!(
    ///     Value::from(1).attribute("imag").unwrap(),
    ///     Attribute::Field(Value::from(0))
    /// );
    /// ```
    pub fn attribute(&self, name: &str) -> Result<Attribute> {
        if let Some(field) = self.field(name) {
            return Ok(Attribute::Field(field));
        }
        let body = method_body(self, name).ok_or_else(|| ChainError::AttributeMissing {
            type_name: self.type_name(),
            attribute: name.to_string(),
        })?;
        let receiver = self.clone();
        let qualified = format!("{}.{name}", self.type_name());
        Ok(Attribute::Method(Function::new(qualified, move |args| {
            body(&receiver, args)
        })))
    }

    /// Resolves `name` to something that can be called.
    ///
    /// # Errors
    ///
    /// Returns [`ChainError::AttributeMissing`] if nothing is found and
    /// [`ChainError::NotCallable`] if the name resolves to a field that does
    /// not hold a function.
    pub fn method(&self, name: &str) -> Result<Function> {
        match self.attribute(name)? {
            Attribute::Method(function) | Attribute::Field(Self::Function(function)) => Ok(function),
            Attribute::Field(other) => Err(ChainError::NotCallable {
                type_name: other.type_name(),
            }),
        }
    }

    fn field(&self, name: &str) -> Option<Self> {
        match (self, name) {
            (Self::Dict(entries), key) => entries.get(key).cloned(),
            (Self::Int(number), "real") => Some(Self::Int(*number)),
            (Self::Int(_), "imag") => Some(Self::Int(0)),
            (Self::Float(number), "real") => Some(Self::Float(*number)),
            (Self::Float(_), "imag") => Some(Self::Float(0.0)),
            _ => None,
        }
    }
}

fn method_body(receiver: &Value, name: &str) -> Option<MethodBody> {
    let body: MethodBody = match (receiver, name) {
        (Value::Str(_), "upper") => str_upper,
        (Value::Str(_), "lower") => str_lower,
        (Value::Str(_), "strip") => str_strip,
        (Value::Str(_), "replace") => str_replace,
        (Value::Str(_), "split") => str_split,
        (Value::Str(_), "join") => str_join,
        (Value::Str(_), "startswith") => str_startswith,
        (Value::Str(_), "endswith") => str_endswith,
        (Value::Str(_), "count") => str_count,
        (Value::List(_) | Value::Tuple(_), "count") => items_count,
        (Value::List(_) | Value::Tuple(_), "index") => items_index,
        (Value::List(_) | Value::Tuple(_), "copy") => copy,
        (Value::Dict(_), "keys") => dict_keys,
        (Value::Dict(_), "values") => dict_values,
        (Value::Dict(_), "items") => dict_items,
        (Value::Dict(_), "get") => dict_get,
        (Value::Int(_), "bit_length") => int_bit_length,
        (Value::Float(_), "is_integer") => float_is_integer,
        _ => return None,
    };
    Some(body)
}

fn count_value(count: usize) -> Result<Value> {
    i64::try_from(count)
        .map(Value::Int)
        .map_err(|_| ChainError::operation("count does not fit in an int"))
}

// =============================================================================
// str
// =============================================================================

fn str_upper(receiver: &Value, args: Args) -> Result<Value> {
    let [] = args.bind("str.upper", [])?;
    Ok(Value::from(receiver.as_str()?.to_uppercase()))
}

fn str_lower(receiver: &Value, args: Args) -> Result<Value> {
    let [] = args.bind("str.lower", [])?;
    Ok(Value::from(receiver.as_str()?.to_lowercase()))
}

fn str_strip(receiver: &Value, args: Args) -> Result<Value> {
    let [] = args.bind("str.strip", [])?;
    Ok(Value::from(receiver.as_str()?.trim()))
}

fn str_replace(receiver: &Value, args: Args) -> Result<Value> {
    let [old, new] = args.bind("str.replace", ["old", "new"])?;
    Ok(Value::from(
        receiver.as_str()?.replace(old.as_str()?, new.as_str()?),
    ))
}

fn str_split(receiver: &Value, args: Args) -> Result<Value> {
    let text = receiver.as_str()?;
    if args.is_empty() {
        return Ok(Value::list(text.split_whitespace()));
    }
    let [separator] = args.bind("str.split", ["sep"])?;
    let separator = separator.as_str()?;
    if separator.is_empty() {
        return Err(ChainError::operation("empty separator"));
    }
    Ok(Value::list(text.split(separator)))
}

fn str_join(receiver: &Value, args: Args) -> Result<Value> {
    let [iterable] = args.bind("str.join", ["iterable"])?;
    let parts = iterable.collect_items()?;
    let parts = parts
        .iter()
        .map(Value::as_str)
        .collect::<Result<Vec<_>>>()?;
    Ok(Value::from(parts.join(receiver.as_str()?)))
}

fn str_startswith(receiver: &Value, args: Args) -> Result<Value> {
    let [prefix] = args.bind("str.startswith", ["prefix"])?;
    Ok(Value::from(receiver.as_str()?.starts_with(prefix.as_str()?)))
}

fn str_endswith(receiver: &Value, args: Args) -> Result<Value> {
    let [suffix] = args.bind("str.endswith", ["suffix"])?;
    Ok(Value::from(receiver.as_str()?.ends_with(suffix.as_str()?)))
}

fn str_count(receiver: &Value, args: Args) -> Result<Value> {
    let [needle] = args.bind("str.count", ["sub"])?;
    count_value(receiver.as_str()?.matches(needle.as_str()?).count())
}

// =============================================================================
// list, tuple
// =============================================================================

fn items_count(receiver: &Value, args: Args) -> Result<Value> {
    let [needle] = args.bind("count", ["value"])?;
    count_value(
        receiver
            .as_items()?
            .iter()
            .filter(|item| **item == needle)
            .count(),
    )
}

fn items_index(receiver: &Value, args: Args) -> Result<Value> {
    let [needle] = args.bind("index", ["value"])?;
    let position = receiver
        .as_items()?
        .iter()
        .position(|item| *item == needle)
        .ok_or_else(|| {
            ChainError::operation(format!("{needle} is not in {}", receiver.type_name()))
        })?;
    count_value(position)
}

fn copy(receiver: &Value, args: Args) -> Result<Value> {
    let [] = args.bind("copy", [])?;
    Ok(receiver.clone())
}

// =============================================================================
// dict
// =============================================================================

fn dict_keys(receiver: &Value, args: Args) -> Result<Value> {
    let [] = args.bind("dict.keys", [])?;
    Ok(Value::list(receiver.as_dict()?.keys().map(String::as_str)))
}

fn dict_values(receiver: &Value, args: Args) -> Result<Value> {
    let [] = args.bind("dict.values", [])?;
    Ok(Value::list(receiver.as_dict()?.values().cloned()))
}

fn dict_items(receiver: &Value, args: Args) -> Result<Value> {
    let [] = args.bind("dict.items", [])?;
    Ok(Value::list(receiver.as_dict()?.iter().map(|(key, value)| {
        Value::tuple([Value::from(key.as_str()), value.clone()])
    })))
}

fn dict_get(receiver: &Value, args: Args) -> Result<Value> {
    let [key] = args.bind("dict.get", ["key"])?;
    Ok(receiver
        .as_dict()?
        .get(key.as_str()?)
        .cloned()
        .unwrap_or_default())
}

// =============================================================================
// int, float
// =============================================================================

fn int_bit_length(receiver: &Value, args: Args) -> Result<Value> {
    let [] = args.bind("int.bit_length", [])?;
    let bits = u64::BITS - receiver.as_int()?.unsigned_abs().leading_zeros();
    Ok(Value::Int(i64::from(bits)))
}

#[allow(clippy::float_cmp)]
fn float_is_integer(receiver: &Value, args: Args) -> Result<Value> {
    let [] = args.bind("float.is_integer", [])?;
    let number = receiver.as_float()?;
    Ok(Value::Bool(number.is_finite() && number.fract() == 0.0))
}
