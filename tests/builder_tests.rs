//! Integration tests for deferred chains.

#![cfg(feature = "builtins")]

use chainlink::builtins::{add, len, list, mul, reversed, string};
use chainlink::StageDescriptor;
use chainlink::prelude::*;
use rstest::{fixture, rstest};

#[fixture]
fn evens_plus_two() -> CompiledChain {
    build(StreamTemplate::over(ANS).filter(|value| Ok(value.as_int()? % 2 == 0)))
        .apply(StreamTemplate::over(ANS).map(|value| Ok(Value::from(value.as_int()? + 2))))
        .apply(list())
        .compile()
}

// =============================================================================
// Replay
// =============================================================================

#[rstest]
fn test_rebuild_independence(evens_plus_two: CompiledChain) {
    assert_eq!(
        evens_plus_two.call(Value::list(1..=6)).unwrap(),
        Value::list([4, 6, 8])
    );
    assert_eq!(
        evens_plus_two.call(Value::list(7..=12)).unwrap(),
        Value::list([10, 12, 14])
    );
    assert_eq!(
        evens_plus_two.call(Value::list(1..=6)).unwrap(),
        Value::list([4, 6, 8])
    );
}

#[rstest]
fn test_failed_call_does_not_poison_chain(evens_plus_two: CompiledChain) {
    assert!(evens_plus_two.call(5).is_err());
    assert_eq!(
        evens_plus_two.call(Value::list([2])).unwrap(),
        Value::list([4])
    );
}

#[rstest]
fn test_builder_matches_direct_chain() {
    let deferred = build_with(add(), args![1])
        .apply_with(mul(), args![ANS, 3])
        .apply(string())
        .compile();

    let mut direct = begin(4);
    direct
        .apply_with(add(), args![1])
        .unwrap()
        .apply_with(mul(), args![ANS, 3])
        .unwrap()
        .apply(string())
        .unwrap();

    assert_eq!(deferred.call(4).unwrap(), direct.into_result());
}

#[rstest]
fn test_builder_is_cloneable_before_compile() {
    let base = build(reversed());
    let as_list = base.clone().apply(list()).compile();
    let as_length = base.apply(list()).apply(len()).compile();
    assert_eq!(as_list.call("abc").unwrap(), Value::list(["c", "b", "a"]));
    assert_eq!(as_length.call("abc").unwrap(), Value::from(3));
}

#[rstest]
fn test_builder_records_stages_in_order() {
    let empty = ChainBuilder::new();
    assert!(empty.is_empty());
    assert_eq!(empty.len(), 0);

    let builder = build_with(add(), args![1])
        .apply(StreamTemplate::over(ANS))
        .apply_with(mul(), args![ANS, 3]);
    assert!(!builder.is_empty());
    assert_eq!(builder.len(), 3);

    let kinds: Vec<String> = builder
        .stages()
        .iter()
        .map(|stage| stage.stage().to_string())
        .collect();
    assert_eq!(kinds, ["call add", "stream", "call mul"]);

    let operations: Vec<&str> = builder
        .stages()
        .iter()
        .map(|stage| stage.operation().type_name())
        .collect();
    assert_eq!(operations, ["function", "stream", "function"]);

    let recorded: Vec<&Args> = builder.stages().iter().map(StageDescriptor::args).collect();
    assert_eq!(recorded, [&args![1], &Args::new(), &args![ANS, 3]]);
}

// =============================================================================
// Labels and nesting
// =============================================================================

#[rstest]
#[case(None, "chain.Function", "<chain.Function object>")]
#[case(Some("shout"), "shout", "<function shout>")]
fn test_labels(#[case] label: Option<&str>, #[case] name: &str, #[case] display: &str) {
    let builder = build(string());
    let chain = match label {
        Some(label) => builder.compile_named(label),
        None => builder.compile(),
    };
    assert_eq!(chain.name(), name);
    assert_eq!(chain.to_string(), display);
}

#[rstest]
fn test_compiled_chain_as_stage() {
    let increment_twice = build_with(add(), args![1])
        .apply_with(add(), args![1])
        .compile_named("increment_twice")
        .into_function();
    assert_eq!(increment_twice.name(), "increment_twice");

    let outer = build(increment_twice.clone())
        .apply(increment_twice)
        .compile();
    assert_eq!(outer.call(0).unwrap(), Value::from(4));
}

#[rstest]
fn test_compiled_chain_inside_stream() {
    let square = build_with(mul(), args![ANS, ANS]).compile().into_function();
    let squares = StreamTemplate::over(ANS).map(move |value| square.call(args![value]));
    let mut link = begin(Value::list([1, 2, 3]));
    link.apply(squares).unwrap().apply(list()).unwrap();
    assert_eq!(link.result(), &Value::list([1, 4, 9]));
}

#[rstest]
fn test_invalid_stage_reported_on_call() {
    let chain = build(string()).apply(Value::None).compile();
    assert_eq!(
        chain.call(1).unwrap_err(),
        ChainError::TypeMismatch { type_name: "none" }
    );
}
