//! Fakebot - a fake Telegram Bot API for bot tests
//!
//! Bots under test talk to a [`BotApi`]. In tests that is a [`FakeApi`]
//! which records every call and answers from a queue of canned responses.
//! Updates to drive the bot come from `fakecore::PayloadFactory`.
//!
//! # Module Structure
//!
//! - `api`: The `BotApi` capability, responses and errors
//! - `testing`: Fake transport, call assertions, command recording, `FakeBot`
//!
//! # Example
//!
//! ```
//! use fakebot::{AssertCalls, BotApi, FakeApi};
//! use serde_json::json;
//!
//! let api = FakeApi::with_responses([json!({"ok": true, "result": {"message_id": 1}})]);
//! let sent = api.send_message(json!({"chat_id": 7, "text": "hi"})).unwrap();
//!
//! assert_eq!(sent.get("result.message_id"), Some(&json!(1)));
//! api.assert_message_sent("hi", Some("7"));
//! ```

pub mod api;
pub mod testing;

// Re-export commonly used types for convenience
pub use api::{ApiError, ApiResponse, ApiResult, BotApi};
pub use testing::{
    AssertCalls, AssertCommands, BotError, CommandContext, Constraint, FakeApi, FakeBot, FakeResponse, RecordedCall,
};
