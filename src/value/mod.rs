//! # Value Module
//!
//! Dynamic values carried through construction: raw input, normalized input and
//! converted fields. `Collection` and `Fluent` are the container views produced by
//! the matching converters.

mod collection;
mod core;
mod fluent;

pub use self::core::*;
pub use collection::Collection;
pub use fluent::Fluent;
