//! Bot API flavoured generators
//!
//! Ids with a stable digit count, file ids, bot identities, and the command
//! helpers used to build `/command` messages. `from`, `chat` and `botFrom`
//! hand back skeletons, which the resolver fills in with the same RNG.

use fake::faker::lorem::en::Word;
use fake::faker::name::en::FirstName;
use fake::Fake;
use rand::Rng;

use super::faker::{alphanumeric, bothify_text};
use super::{
    arg_or, concrete, length_arg, value_to_text, FakeRng, Generated, GeneratorError, GeneratorRegistry, GeneratorResult,
    GeneratorSpec,
};
use crate::core::config;
use crate::payloads::{entities, Fragment};

/// Prefix marking a `commandWithArgs` argument as a generator call
const FAKER_ARG_PREFIX: &str = "faker-";

pub(super) fn register(registry: &mut GeneratorRegistry) {
    registry
        .register(GeneratorSpec::new("id", 0, Some(1), id))
        .register(GeneratorSpec::new("idString", 0, Some(1), id_string))
        .register(GeneratorSpec::new("fileId", 0, Some(1), file_id))
        .register(GeneratorSpec::new("botName", 0, Some(0), bot_name))
        .register(GeneratorSpec::new("botUserName", 0, Some(0), bot_user_name))
        .register(GeneratorSpec::new("from", 0, Some(0), from))
        .register(GeneratorSpec::new("chat", 0, Some(0), chat))
        .register(GeneratorSpec::new("botFrom", 0, Some(0), bot_from))
        .register(GeneratorSpec::new("commandEntities", 1, None, command_entities))
        .register(GeneratorSpec::new("command", 0, Some(1), command))
        .register(GeneratorSpec::new("commandWithArgs", 0, None, command_with_args));
}

/// Integer with exactly `digits` decimal digits, always starting with `1`
pub fn fixed_digit_id(rng: &mut FakeRng, digits: usize) -> Result<i64, GeneratorError> {
    if digits == 0 || digits > config::generators::MAX_ID_DIGITS {
        return Err(GeneratorError::InvalidArgument {
            name: "id".to_string(),
            arg: digits.to_string(),
            reason: format!("digits must be 1..={}", config::generators::MAX_ID_DIGITS),
        });
    }
    let floor = 10_i64.pow(digits as u32 - 1);
    Ok(floor + rng.gen_range(0..floor))
}

fn id(_: &GeneratorRegistry, rng: &mut FakeRng, args: &[String]) -> GeneratorResult {
    let digits = arg_or("id", args, 0, config::generators::ID_DIGITS)?;
    concrete(fixed_digit_id(rng, digits)?)
}

fn id_string(_: &GeneratorRegistry, rng: &mut FakeRng, args: &[String]) -> GeneratorResult {
    let digits = arg_or("idString", args, 0, config::generators::ID_DIGITS)?;
    concrete(fixed_digit_id(rng, digits)?.to_string())
}

fn file_id(_: &GeneratorRegistry, rng: &mut FakeRng, args: &[String]) -> GeneratorResult {
    let length = length_arg(
        "fileId",
        args,
        0,
        config::generators::FILE_ID_LENGTH,
        config::generators::MAX_TEXT_LENGTH,
    )?;
    concrete(alphanumeric(rng, length))
}

fn bot_name(_: &GeneratorRegistry, rng: &mut FakeRng, _: &[String]) -> GeneratorResult {
    let first: String = FirstName().fake_with_rng(rng);
    concrete(format!("{first} Bot"))
}

fn bot_user_name(_: &GeneratorRegistry, rng: &mut FakeRng, _: &[String]) -> GeneratorResult {
    let first: String = FirstName().fake_with_rng(rng);
    concrete(format!("{first}Bot"))
}

fn from(_: &GeneratorRegistry, _: &mut FakeRng, _: &[String]) -> GeneratorResult {
    Ok(Generated::Skeleton(Fragment::From.skeleton()))
}

fn chat(_: &GeneratorRegistry, _: &mut FakeRng, _: &[String]) -> GeneratorResult {
    Ok(Generated::Skeleton(Fragment::Chat.skeleton()))
}

fn bot_from(_: &GeneratorRegistry, _: &mut FakeRng, _: &[String]) -> GeneratorResult {
    Ok(Generated::Skeleton(Fragment::BotFrom.skeleton()))
}

/// `commandEntities:<text>`; colons inside the text split into args, so they are rejoined
fn command_entities(_: &GeneratorRegistry, _: &mut FakeRng, args: &[String]) -> GeneratorResult {
    concrete(entities::command_entities_value(&args.join(":")))
}

/// `/` plus a literal name, a `?`/`#` pattern, or a random word
pub fn command_text(rng: &mut FakeRng, name: Option<&str>) -> String {
    match name.filter(|name| !name.is_empty()) {
        Some(pattern) if pattern.contains(['?', '#']) => format!("/{}", bothify_text(rng, pattern)),
        Some(name) => format!("/{name}"),
        None => format!("/{}", Word().fake_with_rng::<String, _>(rng)),
    }
}

fn command(_: &GeneratorRegistry, rng: &mut FakeRng, args: &[String]) -> GeneratorResult {
    concrete(command_text(rng, args.first().map(String::as_str)))
}

/// `commandWithArgs:<name>[:arg...]`
///
/// Arguments of the form `faker-<gen>` or `faker-<gen>-<arg>` are replaced by
/// a call to that generator. A failing call leaves `<gen>` (or `<gen>-<arg>`)
/// in the text instead.
fn command_with_args(registry: &GeneratorRegistry, rng: &mut FakeRng, args: &[String]) -> GeneratorResult {
    let (name, rest) = match args.split_first() {
        Some((name, rest)) => (Some(name.as_str()), rest),
        None => (None, args),
    };
    let mut text = command_text(rng, name);

    for arg in rest {
        let piece = match arg.strip_prefix(FAKER_ARG_PREFIX) {
            Some(call) => faker_arg(registry, rng, call),
            None => arg.clone(),
        };
        text.push(' ');
        text.push_str(&piece);
    }

    concrete(text.trim().to_string())
}

fn faker_arg(registry: &GeneratorRegistry, rng: &mut FakeRng, call: &str) -> String {
    let (name, args) = match call.split_once('-') {
        Some((name, arg)) => (name, vec![arg.to_string()]),
        None => (call, Vec::new()),
    };

    match registry.invoke(name, &args, rng) {
        Ok(generated) => value_to_text(&generated.into_value()),
        Err(e) => {
            log::trace!("commandWithArgs: {e}, keeping `{call}`");
            call.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use serde_json::json;

    fn invoke(name: &str, args: &[&str], seed: u64) -> GeneratorResult {
        let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
        let mut rng = FakeRng::seed_from_u64(seed);
        GeneratorRegistry::global().invoke(name, &args, &mut rng)
    }

    fn text(name: &str, args: &[&str], seed: u64) -> String {
        value_to_text(&invoke(name, args, seed).unwrap().into_value())
    }

    // ==================== Id Tests ====================

    #[test]
    fn test_id_has_requested_digits_and_leading_one() {
        for digits in [1usize, 5, 9, 16, 18] {
            for seed in 0..10 {
                let id = text("id", &[&digits.to_string()], seed);
                assert_eq!(id.len(), digits, "id {id} for {digits} digits");
                assert!(id.starts_with('1'));
            }
        }
    }

    #[test]
    fn test_id_default_is_nine_digit_integer() {
        let value = invoke("id", &[], 42).unwrap().into_value();
        assert!(value.is_i64());
        assert_eq!(value.to_string().len(), 9);
    }

    #[test]
    fn test_id_string_is_string() {
        let value = invoke("idString", &["16"], 1).unwrap().into_value();
        assert_eq!(value.as_str().map(str::len), Some(16));
    }

    #[test]
    fn test_id_rejects_bad_digits() {
        assert!(invoke("id", &["0"], 1).is_err());
        assert!(invoke("id", &["19"], 1).is_err());
        assert!(invoke("id", &["nine"], 1).is_err());
    }

    #[test]
    fn test_file_id_length() {
        assert_eq!(text("fileId", &[], 1).len(), 36);
        assert_eq!(text("fileId", &["16"], 1).len(), 16);
    }

    // ==================== Identity Tests ====================

    #[test]
    fn test_bot_names() {
        assert!(text("botName", &[], 3).ends_with(" Bot"));
        let user = text("botUserName", &[], 3);
        assert!(user.ends_with("Bot"));
        assert!(!user.contains(' '));
    }

    #[test]
    fn test_composites_return_skeletons() {
        let generated = invoke("from", &[], 1).unwrap();
        assert_eq!(generated, Generated::Skeleton(Fragment::From.skeleton()));

        let generated = invoke("botFrom", &[], 1).unwrap();
        match generated {
            Generated::Skeleton(skeleton) => assert_eq!(skeleton["is_bot"], json!(true)),
            other => panic!("expected skeleton, got {other:?}"),
        }

        assert!(matches!(invoke("chat", &[], 1).unwrap(), Generated::Skeleton(_)));
    }

    // ==================== Command Tests ====================

    #[test]
    fn test_command_entities_generator() {
        let value = invoke("commandEntities", &["/start"], 1).unwrap().into_value();
        assert_eq!(value, json!([{"offset": 0, "length": 6, "type": "bot_command"}]));

        let value = invoke("commandEntities", &["hello"], 1).unwrap().into_value();
        assert_eq!(value, json!([]));
    }

    #[test]
    fn test_command_entities_requires_text() {
        assert!(matches!(
            invoke("commandEntities", &[], 1),
            Err(GeneratorError::Arity { .. })
        ));
    }

    #[test]
    fn test_command_literal_and_pattern() {
        assert_eq!(text("command", &["start"], 1), "/start");

        let patterned = text("command", &["cmd_##"], 1);
        assert!(patterned.starts_with("/cmd_"));
        assert!(patterned[5..].chars().all(|c| c.is_ascii_digit()));

        let lettered = text("command", &["x?"], 1);
        assert!(lettered.as_bytes()[2].is_ascii_lowercase());
    }

    #[test]
    fn test_command_random_word_when_missing() {
        for args in [&[][..], &[""][..]] {
            let command = text("command", args, 8);
            assert!(command.starts_with('/'));
            assert!(command.len() > 1);
        }
    }

    #[test]
    fn test_command_with_plain_args() {
        assert_eq!(text("commandWithArgs", &["echo", "hello", "world"], 1), "/echo hello world");
        assert_eq!(text("commandWithArgs", &["start"], 1), "/start");
    }

    #[test]
    fn test_command_with_faker_args() {
        let command = text("commandWithArgs", &["ban", "faker-id-5"], 11);
        let (head, tail) = command.split_once(' ').unwrap();
        assert_eq!(head, "/ban");
        assert_eq!(tail.len(), 5);
        assert!(tail.starts_with('1'));

        let command = text("commandWithArgs", &["greet", "faker-firstName"], 11);
        assert!(command.starts_with("/greet "));
        assert!(command.len() > "/greet ".len());
    }

    #[test]
    fn test_command_with_failing_faker_arg_keeps_name() {
        let command = text("commandWithArgs", &["x", "faker-nothingHere"], 1);
        assert_eq!(command, "/x nothingHere");

        let command = text("commandWithArgs", &["x", "faker-id-abc"], 1);
        assert_eq!(command, "/x id-abc");
    }
}
