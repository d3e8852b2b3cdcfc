//! End-to-end flows: synthetic update in, recorded API calls out

mod common;

use common::{command_in_chat, greeting_bot, sent_message_response};
use fakebot::testing::AssertionError;
use fakebot::{ApiError, AssertCalls, AssertCommands, BotApi, BotError, Constraint, FakeApi, FakeBot};
use fakecore::PayloadFactory;
use pretty_assertions::assert_eq;
use serde_json::json;
use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;

#[test]
fn test_start_sends_one_welcome_to_update_chat() -> anyhow::Result<()> {
    let bot = greeting_bot();
    let update = PayloadFactory::new().command_message("start", None).to_value()?;
    let chat_id = update["message"]["chat"]["id"].clone();

    bot.process_update(&update)?;

    bot.assert_sent_times("sendMessage", 1);
    bot.assert_sent_matching("sendMessage", json!({"chat_id": chat_id, "text": "Welcome!"}));
    bot.assert_command_processed("start", None);
    Ok(())
}

#[test]
fn test_conversation_is_recorded_in_order() -> anyhow::Result<()> {
    let bot = greeting_bot();
    bot.process_update(&command_in_chat("start", None, 42)?)?
        .process_update(&command_in_chat("echo", Some("ping"), 42)?)?
        .process_update(&PayloadFactory::new().text_message("thanks").to_value()?)?;

    let methods: Vec<String> = bot.calls().into_iter().map(|call| call.method).collect();
    assert_eq!(methods, vec!["sendMessage", "sendMessage"]);
    bot.assert_message_sent("Welcome!", Some("42"));
    bot.assert_message_sent("ping", Some("42"));
    bot.assert_message_sent_count(2);

    let names: Vec<String> = bot.processed_commands(&[]).into_iter().map(|record| record.name).collect();
    assert_eq!(names, vec!["start", "echo"]);
    Ok(())
}

#[test]
fn test_queued_responses_reach_the_handler() -> anyhow::Result<()> {
    let mut bot = FakeBot::with_responses([sent_message_response(77, "Welcome!")]);
    bot.fail_when_empty(true);

    let seen = Rc::new(Cell::new(None));
    let slot = Rc::clone(&seen);
    bot.register_command("start", move |ctx| {
        let response = ctx.reply("Welcome!")?;
        slot.set(response.get("result.message_id").and_then(|id| id.as_i64()));
        Ok(())
    });

    bot.process_update(&command_in_chat("start", None, 1)?)?;
    assert_eq!(seen.get(), Some(77));

    let err = bot.process_update(&command_in_chat("start", None, 1)?).unwrap_err();
    assert!(matches!(err, BotError::Api(ApiError::NoFakeResponsesLeft)));
    bot.assert_sent_times("sendMessage", 2);
    Ok(())
}

#[test]
fn test_shared_api_handle_sees_bot_calls() -> anyhow::Result<()> {
    let api = Arc::new(FakeApi::new());
    api.fail_when_empty(false);

    let mut bot = FakeBot::with_api(Arc::clone(&api));
    bot.register_command("start", |ctx| {
        ctx.api().send_chat_action(json!({"action": "typing"}))?;
        ctx.reply("hi")?;
        Ok(())
    });
    bot.process_update(&command_in_chat("start", None, 5)?)?;

    api.assert_sent("sendChatAction");
    api.assert_not_sent("sendPhoto");
    api.assert_not_sent_matching("sendMessage", json!({"text": "bye"}));
    assert_eq!(api.recorded_calls()[1].sequence, 1);
    Ok(())
}

#[test]
fn test_bot_shared_by_handle() -> anyhow::Result<()> {
    let bot = Rc::new(greeting_bot());
    let other = Rc::clone(&bot);

    bot.process_update(&command_in_chat("start", None, 1)?)?;
    other.process_update(&command_in_chat("echo", Some("again"), 1)?)?;

    bot.assert_message_sent_count(2);
    other.assert_command_processed("echo", None);
    Ok(())
}

#[test]
fn test_handler_failure_still_recorded() -> anyhow::Result<()> {
    let bot = greeting_bot();
    let err = bot.process_update(&command_in_chat("echo", None, 3)?).unwrap_err();

    assert_eq!(err.to_string(), "Handler for /echo failed: nothing to echo");
    bot.assert_command_processed("echo", Some(&Constraint::subset(json!({"text": ""}))));
    bot.assert_nothing_sent();
    Ok(())
}

#[test]
fn test_failed_expectations_explain_themselves() -> anyhow::Result<()> {
    let bot = greeting_bot();
    bot.process_update(&command_in_chat("echo", Some("one"), 9)?)?;

    let err: AssertionError = bot.check_message_sent("two", Some("9")).unwrap_err();
    let text = err.to_string();
    assert!(text.contains("no calls matched the provided constraint"));
    assert!(text.contains("--- Request 1 ---"));
    assert!(text.contains("\"text\": \"one\""));

    let err = bot.check_nothing_sent().unwrap_err().to_string();
    assert!(err.contains("Methods sent: sendMessage"));

    assert!(bot.check_command_not_processed("echo", None).is_err());
    assert!(bot.check_no_commands_processed().is_err());
    Ok(())
}

#[test]
#[should_panic(expected = "The expected [sendMessage] method was sent 0 times instead of 1 times.")]
fn test_assert_sent_times_panics() {
    let bot = FakeBot::new();
    bot.assert_sent_times("sendMessage", 1);
}

#[test]
fn test_bot_is_a_bot_api() -> anyhow::Result<()> {
    let bot = FakeBot::new();
    bot.fail_when_empty(false);
    let api: &dyn BotApi = &bot;
    let response = api.get_me()?;
    assert_eq!(response.result(), &json!(true));
    bot.assert_sent("getMe");
    Ok(())
}
