//! Test doubles for code that talks to the Bot API
//!
//! - `fake_api`: recording transport with a FIFO response queue
//! - `assertions`: call log queries and `assert_*` helpers
//! - `commands`: command parsing, routing and the processed-command log
//! - `bot`: `FakeBot`, tying the three together

pub mod assertions;
pub mod bot;
pub mod commands;
pub mod fake_api;

pub use assertions::{AssertCalls, AssertionError, Constraint};
pub use bot::{BotError, CommandContext, FakeBot};
pub use commands::{parse_command, AssertCommands, CommandRecord, CommandRouter};
pub use fake_api::{FakeApi, FakeResponse, RecordedCall};
