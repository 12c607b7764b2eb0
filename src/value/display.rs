//! Representation of values.

use std::fmt;

use super::Value;

impl fmt::Display for Value {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => formatter.write_str("None"),
            Self::Bool(true) => formatter.write_str("True"),
            Self::Bool(false) => formatter.write_str("False"),
            Self::Int(number) => write!(formatter, "{number}"),
            Self::Float(number) => write_float(formatter, *number),
            Self::Str(text) => write_quoted(formatter, text),
            Self::List(items) => {
                formatter.write_str("[")?;
                write_items(formatter, items)?;
                formatter.write_str("]")
            }
            Self::Tuple(items) => {
                formatter.write_str("(")?;
                write_items(formatter, items)?;
                if items.len() == 1 {
                    formatter.write_str(",")?;
                }
                formatter.write_str(")")
            }
            Self::Dict(entries) => {
                formatter.write_str("{")?;
                for (index, (key, value)) in entries.iter().enumerate() {
                    if index > 0 {
                        formatter.write_str(", ")?;
                    }
                    write_quoted(formatter, key)?;
                    write!(formatter, ": {value}")?;
                }
                formatter.write_str("}")
            }
            Self::Function(function) => write!(formatter, "{function}"),
            Self::Stream(_) => formatter.write_str("<stream>"),
            Self::Seq(_) => formatter.write_str("<sequence>"),
            Self::Placeholder => write!(formatter, "{}", crate::placeholder::ANS),
        }
    }
}

/// Python float repr: shortest round-trip digits, scientific notation with a
/// signed two-digit exponent outside `1e-4 <= |x| < 1e16`.
fn write_float(formatter: &mut fmt::Formatter<'_>, number: f64) -> fmt::Result {
    if number.is_nan() {
        return formatter.write_str("nan");
    }
    if number.is_infinite() {
        return formatter.write_str(if number > 0.0 { "inf" } else { "-inf" });
    }
    let shortest = format!("{number:?}");
    match shortest.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = exponent
                .strip_prefix('-')
                .map_or(("+", exponent), |digits| ("-", digits));
            write!(formatter, "{mantissa}e{sign}{digits:0>2}")
        }
        None => formatter.write_str(&shortest),
    }
}

fn write_items(formatter: &mut fmt::Formatter<'_>, items: &[Value]) -> fmt::Result {
    for (index, item) in items.iter().enumerate() {
        if index > 0 {
            formatter.write_str(", ")?;
        }
        write!(formatter, "{item}")?;
    }
    Ok(())
}

fn write_quoted(formatter: &mut fmt::Formatter<'_>, text: &str) -> fmt::Result {
    formatter.write_str("'")?;
    for character in text.chars() {
        match character {
            '\'' => formatter.write_str("\\'")?,
            '\\' => formatter.write_str("\\\\")?,
            '\n' => formatter.write_str("\\n")?,
            other => write!(formatter, "{other}")?,
        }
    }
    formatter.write_str("'")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Value::None, "None")]
    #[case(Value::from(false), "False")]
    #[case(Value::from(30), "30")]
    #[case(Value::from(1.0), "1.0")]
    #[case(Value::from(-2.5), "-2.5")]
    #[case(Value::from(1e15), "1000000000000000.0")]
    #[case(Value::from(1e16), "1e+16")]
    #[case(Value::from(1e20), "1e+20")]
    #[case(Value::from(1.5e300), "1.5e+300")]
    #[case(Value::from(0.0001), "0.0001")]
    #[case(Value::from(1e-5), "1e-05")]
    #[case(Value::from(-2.5e-10), "-2.5e-10")]
    #[case(Value::from(f64::NAN), "nan")]
    #[case(Value::from(f64::INFINITY), "inf")]
    #[case(Value::from(f64::NEG_INFINITY), "-inf")]
    #[case(Value::from("it's"), "'it\\'s'")]
    #[case(Value::list([1, 2]), "[1, 2]")]
    #[case(Value::tuple([1]), "(1,)")]
    #[case(Value::tuple([Value::from(1), Value::from("a")]), "(1, 'a')")]
    #[case(Value::dict([("x", 1)]), "{'x': 1}")]
    #[case(Value::Placeholder, "<placeholder ANS>")]
    fn test_display(#[case] value: Value, #[case] expected: &str) {
        assert_eq!(value.to_string(), expected);
    }

    #[rstest]
    fn test_to_text_leaves_strings_unquoted() {
        assert_eq!(Value::from("abc").to_text(), "abc");
        assert_eq!(Value::from(30).to_text(), "30");
    }
}
