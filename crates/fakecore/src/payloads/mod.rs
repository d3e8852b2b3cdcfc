//! Synthetic Bot API payloads
//!
//! - `skeletons`: the fragment library (update, message, user, chat, ...)
//! - `entities`: `bot_command` entity computation for command texts
//! - `factory`: the fluent builder that turns skeletons into concrete updates

pub mod entities;
pub mod factory;
pub mod skeletons;

pub use entities::{command_entities, CommandEntity};
pub use factory::{BuilderState, PayloadFactory};
pub use skeletons::Fragment;
