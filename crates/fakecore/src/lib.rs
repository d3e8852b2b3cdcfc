//! Fakecore - synthetic Telegram Bot API payloads for tests
//!
//! This library turns declarative payload skeletons into concrete updates,
//! without any transport. The `fakebot` crate builds the fake API on top of it.
//!
//! # Module Structure
//!
//! - `core`: Configuration, errors and logging
//! - `template`: Placeholder grammar, resolver and recursive merge
//! - `generators`: Named value generators (ids, names, timestamps, commands)
//! - `payloads`: Skeleton library, command entities and the payload factory
//!
//! # Example
//!
//! ```
//! use fakecore::PayloadFactory;
//!
//! let update = PayloadFactory::new()
//!     .command_message("start", None)
//!     .to_value()
//!     .unwrap();
//!
//! assert_eq!(update["message"]["text"], "/start");
//! assert_eq!(update["message"]["entities"][0]["length"], 6);
//! ```

pub mod core;
pub mod generators;
pub mod payloads;
pub mod template;

// Re-export commonly used types for convenience
pub use self::core::{config, FactoryError, FactoryResult};
pub use generators::{FakeRng, GeneratorRegistry};
pub use payloads::{command_entities, BuilderState, Fragment, PayloadFactory};
pub use template::{merge, merged, Placeholder, Resolver};
