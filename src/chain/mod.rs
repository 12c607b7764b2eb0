//! Left-to-right evaluation of heterogeneous stages.
//!
//! A chain replaces nested calls `f(g(h(x)))` with a cursor that threads a
//! current value through `h`, then `g`, then `f`:
//!
//! ```rust
//! use chainlink::{ANS, Function, StreamTemplate, Value, begin};
//!
//! let reversed = Function::unary("reversed", |value| {
//!     let mut items = value.collect_items()?;
//!     items.reverse();
//!     Ok(Value::list(items))
//! });
//! let upper = StreamTemplate::over(ANS).map(|value| Ok(Value::from(value.as_str()?.to_uppercase())));
//! let materialize = Function::unary("list", |value| Ok(Value::list(value.collect_items()?)));
//!
//! let mut link = begin("abcd");
//! link.apply(reversed).unwrap().apply(upper).unwrap().apply(materialize).unwrap();
//! assert_eq!(link.result(), &Value::list(["D", "C", "B", "A"]));
//! ```
//!
//! # Stages
//!
//! Each stage is classified by [`Stage::classify`]:
//!
//! - A [`Function`](crate::Function) is called. If its arguments contain the
//!   placeholder, the current value goes exactly where the placeholders are;
//!   otherwise it is prepended as the first positional argument.
//! - A [`StreamTemplate`](crate::StreamTemplate) is rebound onto the current
//!   value, producing a lazy sequence. Stream stages take no arguments.
//! - Anything else fails with [`ChainError::TypeMismatch`](crate::ChainError).
//!
//! # Deferred chains
//!
//! [`build`] records stages without running them; [`ChainBuilder::compile`]
//! turns the record into a [`CompiledChain`] that can be called many times.

mod builder;
mod link;
mod stage;

pub use builder::{ChainBuilder, CompiledChain, build, build_with};
pub use link::{Link, begin};
pub use stage::{Stage, StageDescriptor};

static_assertions::assert_not_impl_any!(Link: Send, Sync);
static_assertions::assert_not_impl_any!(CompiledChain: Send, Sync);
