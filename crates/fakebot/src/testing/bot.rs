//! Fake bot: command routing on top of a [`FakeApi`]
//!
//! Feed it updates built with `fakecore::PayloadFactory`, let registered
//! handlers call the API, then assert on the calls and on the commands that
//! were processed.
//!
//! ```
//! use fakebot::testing::{AssertCalls, AssertCommands, FakeBot};
//! use fakecore::PayloadFactory;
//!
//! let mut bot = FakeBot::new();
//! bot.register_command("start", |ctx| {
//!     ctx.reply("Welcome!")?;
//!     Ok(())
//! });
//!
//! let update = PayloadFactory::new().command_message("start", None).to_value().unwrap();
//! bot.process_update(&update).unwrap();
//!
//! bot.assert_command_processed("start", None);
//! bot.assert_message_sent("Welcome!", None);
//! ```

use fakecore::config;
use serde_json::{json, Value};
use std::sync::Arc;
use thiserror::Error;

use super::assertions::AssertCalls;
use super::commands::{parse_command, AssertCommands, CommandLog, CommandRecord, CommandRouter, ParsedCommand};
use super::fake_api::{FakeApi, FakeResponse, RecordedCall};
use crate::api::{ApiError, ApiResponse, ApiResult, BotApi};

/// Errors surfaced while processing an update
#[derive(Error, Debug)]
pub enum BotError {
    /// A handler's API call failed
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// A handler gave up for its own reasons
    #[error("Handler for /{command} failed: {message}")]
    Handler { command: String, message: String },
}

impl BotError {
    pub fn handler(command: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Handler {
            command: command.into(),
            message: message.into(),
        }
    }
}

/// What a command handler gets to see
pub struct CommandContext<'a> {
    pub command: &'a ParsedCommand,
    /// The whole update being processed
    pub update: &'a Value,
    api: &'a dyn BotApi,
}

impl<'a> CommandContext<'a> {
    pub fn name(&self) -> &str {
        &self.command.name
    }

    /// `message.chat.id` of the update
    pub fn chat_id(&self) -> Option<&'a Value> {
        self.update.pointer("/message/chat/id")
    }

    /// Full message text, command included
    pub fn text(&self) -> &'a str {
        self.update.pointer("/message/text").and_then(Value::as_str).unwrap_or_default()
    }

    /// Text after the command token
    pub fn arguments(&self) -> &str {
        &self.command.text
    }

    pub fn args(&self) -> &[String] {
        &self.command.args
    }

    pub fn api(&self) -> &'a dyn BotApi {
        self.api
    }

    /// `sendMessage` to the chat the update came from
    pub fn reply(&self, text: &str) -> ApiResult<ApiResponse> {
        let chat_id = self.chat_id().cloned().unwrap_or(Value::Null);
        self.api.send_message(json!({ "chat_id": chat_id, "text": text }))
    }
}

/// A bot wired to a [`FakeApi`] with a minimal command router
#[derive(Debug)]
pub struct FakeBot {
    name: String,
    token: String,
    api: Arc<FakeApi>,
    router: CommandRouter,
    commands: CommandLog,
}

impl Default for FakeBot {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeBot {
    pub fn new() -> Self {
        Self::with_api(Arc::new(FakeApi::new()))
    }

    /// Bot whose API answers with `responses` first
    pub fn with_responses<I, R>(responses: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<FakeResponse>,
    {
        Self::with_api(Arc::new(FakeApi::with_responses(responses)))
    }

    pub fn with_api(api: Arc<FakeApi>) -> Self {
        Self {
            name: config::bot::NAME.to_string(),
            token: config::bot::TOKEN.to_string(),
            api,
            router: CommandRouter::new(),
            commands: CommandLog::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    /// Shared handle to the fake transport
    pub fn api(&self) -> &Arc<FakeApi> {
        &self.api
    }

    pub fn router(&self) -> &CommandRouter {
        &self.router
    }

    pub fn register_command<F>(&mut self, name: &str, handler: F) -> &mut Self
    where
        F: Fn(&CommandContext<'_>) -> Result<(), BotError> + 'static,
    {
        self.router.register_command(name, handler);
        self
    }

    pub fn add_responses<I, R>(&self, responses: I) -> &Self
    where
        I: IntoIterator<Item = R>,
        R: Into<FakeResponse>,
    {
        self.api.add_responses(responses);
        self
    }

    pub fn fail_when_empty(&self, enabled: bool) -> &Self {
        self.api.fail_when_empty(enabled);
        self
    }

    /// Records a processed command by hand, for handlers driven outside `process_update`
    pub fn record_command(&self, name: &str, arguments: serde_json::Map<String, Value>) {
        self.commands.record(name, arguments);
    }

    /// Routes a `/command` message to its handler.
    ///
    /// Updates without message text, plain text, and unregistered commands
    /// are ignored. The command is recorded before its handler runs.
    pub fn process_update(&self, update: &Value) -> Result<&Self, BotError> {
        let Some(text) = update.pointer("/message/text").and_then(Value::as_str) else {
            log::trace!("update without message text ignored");
            return Ok(self);
        };
        let Some(command) = parse_command(text) else {
            log::trace!("non-command message ignored");
            return Ok(self);
        };
        let Some(handler) = self.router.handler(&command.name) else {
            log::debug!("no handler for /{}", command.name);
            return Ok(self);
        };

        self.commands.record(&command.name, command.record_arguments());

        let context = CommandContext {
            command: &command,
            update,
            api: self.api.as_ref(),
        };
        handler(&context)?;
        Ok(self)
    }
}

impl BotApi for FakeBot {
    fn invoke(&self, method: &str, arguments: Value) -> ApiResult<ApiResponse> {
        self.api.invoke(method, arguments)
    }
}

impl AssertCalls for FakeBot {
    fn calls(&self) -> Vec<RecordedCall> {
        self.api.recorded_calls()
    }
}

impl AssertCommands for FakeBot {
    fn command_records(&self) -> Vec<CommandRecord> {
        self.commands.records()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Constraint;
    use fakecore::PayloadFactory;
    use std::cell::Cell;
    use std::rc::Rc;

    fn command_update(name: &str, args: Option<&str>) -> Value {
        PayloadFactory::new().command_message(name, args).to_value().unwrap()
    }

    fn echo_bot() -> FakeBot {
        let mut bot = FakeBot::new();
        bot.fail_when_empty(false);
        bot.register_command("echo", |ctx| {
            ctx.reply(ctx.arguments())?;
            Ok(())
        });
        bot
    }

    // ==================== Identity Tests ====================

    #[test]
    fn test_fake_identity() {
        let bot = FakeBot::new();
        assert_eq!(bot.name(), "fake");
        assert_eq!(bot.token(), "fake-token-for-testing");
    }

    // ==================== Processing Tests ====================

    #[test]
    fn test_command_routed_to_handler() {
        let bot = echo_bot();
        let update = command_update("echo", Some("hello there"));
        bot.process_update(&update).unwrap();

        let chat_id = update["message"]["chat"]["id"].to_string();
        bot.assert_message_sent("hello there", Some(&chat_id));
        bot.assert_sent_times("sendMessage", 1);
        bot.assert_command_processed("echo", Some(&Constraint::subset(json!({"args": ["hello", "there"]}))));
    }

    #[test]
    fn test_non_commands_ignored() {
        let bot = echo_bot();
        let text = PayloadFactory::new().text_message("just chatting").to_value().unwrap();
        let query = PayloadFactory::new().callback_query("press").to_value().unwrap();

        bot.process_update(&text).unwrap().process_update(&query).unwrap();

        bot.assert_nothing_sent();
        bot.assert_no_commands_processed();
    }

    #[test]
    fn test_unregistered_command_not_recorded() {
        let bot = echo_bot();
        bot.process_update(&command_update("unknown", None)).unwrap();
        bot.assert_command_not_processed("unknown", None);
        bot.assert_nothing_sent();
    }

    #[test]
    fn test_command_case_insensitive() {
        let bot = echo_bot();
        bot.process_update(&command_update("ECHO", Some("x"))).unwrap();
        assert_eq!(bot.processed_commands(&["echo"]).len(), 1);
    }

    #[test]
    fn test_handler_api_error_propagates_after_recording() {
        let bot = echo_bot();
        bot.fail_when_empty(true);

        let err = bot.process_update(&command_update("echo", Some("hi"))).unwrap_err();
        assert!(matches!(err, BotError::Api(ApiError::NoFakeResponsesLeft)));
        bot.assert_command_processed("echo", None);
        bot.assert_sent("sendMessage");
    }

    #[test]
    fn test_handler_error() {
        let mut bot = FakeBot::new();
        bot.register_command("fail", |ctx| Err(BotError::handler(ctx.name(), "not today")));

        let err = bot.process_update(&command_update("fail", None)).unwrap_err();
        assert_eq!(err.to_string(), "Handler for /fail failed: not today");
    }

    #[test]
    fn test_context_exposes_update() {
        let seen = Rc::new(Cell::new(0_i64));
        let captured = Rc::clone(&seen);

        let mut bot = FakeBot::new();
        bot.register_command("whoami", move |ctx| {
            assert_eq!(ctx.text(), "/whoami now");
            assert_eq!(ctx.args().to_vec(), vec!["now"]);
            captured.set(ctx.chat_id().and_then(Value::as_i64).unwrap_or_default());
            Ok(())
        });

        let update = command_update("whoami", Some("now"));
        bot.process_update(&update).unwrap();
        assert_eq!(Some(seen.get()), update["message"]["chat"]["id"].as_i64());
    }

    #[test]
    fn test_bot_proxies_api_calls() {
        let bot = FakeBot::with_responses([json!({"ok": true, "result": {"id": 1, "is_bot": true}})]);
        let me = bot.get_me().unwrap();
        assert_eq!(me.get("result.is_bot"), Some(&json!(true)));
        bot.assert_sent("getMe");
        bot.api().assert_sent_times("getMe", 1);
    }
}
