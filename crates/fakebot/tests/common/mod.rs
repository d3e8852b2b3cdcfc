//! Common test utilities
//!
//! Shared by the fakebot integration tests

#![allow(dead_code)]

use fakebot::{BotError, FakeBot};
use fakecore::PayloadFactory;
use serde_json::{json, Value};

/// Fake bot with `/start` and `/echo` registered and a lenient response queue
pub fn greeting_bot() -> FakeBot {
    let mut bot = FakeBot::new();
    bot.fail_when_empty(false);
    bot.register_command("start", |ctx| {
        ctx.reply("Welcome!")?;
        Ok(())
    })
    .register_command("echo", |ctx| {
        if ctx.args().is_empty() {
            return Err(BotError::handler(ctx.name(), "nothing to echo"));
        }
        ctx.reply(ctx.arguments())?;
        Ok(())
    });
    bot
}

/// A `/name args` update with a fixed chat id
pub fn command_in_chat(name: &str, args: Option<&str>, chat_id: i64) -> anyhow::Result<Value> {
    let update = PayloadFactory::new()
        .command_message(name, args)
        .merge_payload(json!({"message": {"chat": {"id": chat_id}}}))?
        .to_value()?;
    Ok(update)
}

/// `{ok: true, result: <message>}` as `sendMessage` would answer
pub fn sent_message_response(message_id: i64, text: &str) -> Value {
    json!({
        "ok": true,
        "result": {"message_id": message_id, "text": text, "chat": {"id": 1, "type": "private"}}
    })
}
