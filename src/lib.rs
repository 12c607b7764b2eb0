//! # chainlink
//!
//! Left-to-right pipelines over dynamic values.
//!
//! ## Overview
//!
//! `chainlink` replaces nested calls `f(g(h(x)))` with a chain that threads a
//! current value through each stage in turn:
//!
//! - **Cursor**: [`begin`] starts a [`Link`] holding a value; each
//!   [`Link::apply`] feeds the held value to the next stage.
//! - **Placeholder**: [`ANS`] marks where the held value goes in a stage's
//!   arguments. Without it, the held value is the first argument.
//! - **Lazy streams**: a [`StreamTemplate`] written over [`ANS`] is rebound
//!   onto the held value, producing a [`LazySeq`] that does no work until a
//!   terminal stage drains it.
//! - **Reusable chains**: [`build`] records stages and
//!   [`ChainBuilder::compile`] turns them into a [`CompiledChain`] that can be
//!   called on any number of inputs.
//!
//! ## Feature Flags
//!
//! - `builtins` (default): ready-made stage functions in [`builtins`]
//! - `serde`: `Serialize`/`Deserialize` for the data variants of [`Value`]
//!
//! ## Example
//!
//! ```rust
//! use chainlink::builtins::{list, reversed};
//! use chainlink::prelude::*;
//!
//! let upper = StreamTemplate::over(ANS).map(|value| Ok(Value::from(value.as_str()?.to_uppercase())));
//!
//! let mut link = begin("abcd");
//! link.apply(reversed())?.apply(upper)?.apply(list())?;
//! assert_eq!(link.result(), &Value::list(["D", "C", "B", "A"]));
//! # Ok::<(), ChainError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

/// Prelude module for convenient imports.
///
/// Re-exports the types and functions needed to build chains.
///
/// # Usage
///
/// ```rust
/// use chainlink::prelude::*;
/// ```
pub mod prelude {
    pub use crate::args;
    pub use crate::chain::{ChainBuilder, CompiledChain, Link, begin, build, build_with};
    pub use crate::error::{ChainError, Result};
    pub use crate::function::{Args, Function};
    pub use crate::placeholder::ANS;
    pub use crate::stream::{LazySeq, StreamTemplate};
    pub use crate::value::Value;
}

mod chain;
mod error;
mod function;
mod placeholder;
mod stream;
mod value;

#[cfg(feature = "builtins")]
pub mod builtins;

pub use chain::{
    ChainBuilder, CompiledChain, Link, Stage, StageDescriptor, begin, build, build_with,
};
pub use error::{ChainError, Result};
pub use function::{Args, Function};
pub use placeholder::{ANS, Placeholder, substitute};
pub use stream::{LazySeq, StreamTemplate, rebind};
pub use value::{Attribute, Value};
