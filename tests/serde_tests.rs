#![cfg(feature = "serde")]
//! Tests for the `serde` support of `Value`.

use chainlink::{ANS, Function, Value};
use rstest::rstest;

#[rstest]
#[case(Value::None, "null")]
#[case(Value::from(true), "true")]
#[case(Value::from(-3), "-3")]
#[case(Value::from("chain"), "\"chain\"")]
#[case(Value::tuple([1, 2]), "[1,2]")]
#[case(Value::dict([("b", 2), ("a", 1)]), "{\"a\":1,\"b\":2}")]
fn test_serialize(#[case] value: Value, #[case] expected: &str) {
    assert_eq!(serde_json::to_string(&value).unwrap(), expected);
}

#[rstest]
fn test_deserialize_nested() {
    let value: Value = serde_json::from_str(r#"{"items": [1, 2.5, "x"], "flag": null}"#).unwrap();
    assert_eq!(
        value,
        Value::dict([
            ("flag", Value::None),
            (
                "items",
                Value::list([Value::from(1), Value::from(2.5), Value::from("x")])
            ),
        ])
    );
}

#[rstest]
fn test_deserialize_out_of_range_integer() {
    let result: Result<Value, _> = serde_json::from_str("18446744073709551615");
    assert!(result.is_err());
}

#[rstest]
#[case(Value::from(Function::unary("same", Ok)), "function")]
#[case(Value::from(ANS), "placeholder")]
fn test_behavioral_values_refuse_to_serialize(#[case] value: Value, #[case] type_name: &str) {
    let error = serde_json::to_string(&value).unwrap_err();
    assert_eq!(
        error.to_string(),
        format!("cannot serialize a '{type_name}' value")
    );
}
