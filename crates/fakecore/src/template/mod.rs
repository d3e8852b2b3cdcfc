//! Template engine: placeholder grammar, resolution and recursive merge
//!
//! A skeleton is a plain `serde_json::Value` (the crate enables
//! `preserve_order`, so object keys keep insertion order). Every string leaf
//! is read as a placeholder: `name` or `name:arg1:arg2`.

pub mod merge;
pub mod placeholder;
pub mod resolver;

pub use merge::{merge, merged};
pub use placeholder::Placeholder;
pub use resolver::Resolver;
