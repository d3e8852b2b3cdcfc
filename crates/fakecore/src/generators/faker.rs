//! General-purpose faker leaves
//!
//! Names, words and MIME types come from the `fake` crate; everything is drawn
//! from the RNG passed in by the resolver.

use fake::faker::filesystem::en::{FileName, MimeType};
use fake::faker::internet::en::Username;
use fake::faker::lorem::en::{Sentence, Word};
use fake::faker::name::en::{FirstName, LastName, Name};
use fake::Fake;
use rand::distributions::Alphanumeric;
use rand::Rng;

use super::{arg_or, concrete, length_arg, FakeRng, GeneratorError, GeneratorRegistry, GeneratorResult, GeneratorSpec};
use crate::core::config;

/// IETF tags Telegram clients commonly report as `language_code`
const LANGUAGE_CODES: &[&str] = &["en", "de", "es", "fr", "it", "pt-br", "ru", "uk", "tr", "id", "ja", "ko"];

pub(super) fn register(registry: &mut GeneratorRegistry) {
    registry
        .register(GeneratorSpec::new("firstName", 0, Some(0), first_name))
        .register(GeneratorSpec::new("lastName", 0, Some(0), last_name))
        .register(GeneratorSpec::new("name", 0, Some(0), name))
        .register(GeneratorSpec::new("userName", 0, Some(0), user_name))
        .register(GeneratorSpec::new("word", 0, Some(0), word))
        .register(GeneratorSpec::new("sentence", 0, Some(1), sentence))
        .register(GeneratorSpec::new("languageCode", 0, Some(0), language_code))
        .register(GeneratorSpec::new("mimeType", 0, Some(0), mime_type))
        .register(GeneratorSpec::new("fileName", 0, Some(0), file_name))
        .register(GeneratorSpec::new("numberBetween", 0, Some(2), number_between))
        .register(GeneratorSpec::new("randomNumber", 0, Some(1), random_number))
        .register(GeneratorSpec::new("boolean", 0, Some(1), boolean))
        .register(GeneratorSpec::new("unixTime", 0, Some(0), unix_time))
        .register(GeneratorSpec::new("uuid", 0, Some(0), uuid))
        .register(GeneratorSpec::new("token", 0, Some(1), token))
        .register(GeneratorSpec::new("lexify", 0, Some(1), lexify))
        .register(GeneratorSpec::new("numerify", 0, Some(1), numerify))
        .register(GeneratorSpec::new("bothify", 0, Some(1), bothify));
}

fn first_name(_: &GeneratorRegistry, rng: &mut FakeRng, _: &[String]) -> GeneratorResult {
    concrete(FirstName().fake_with_rng::<String, _>(rng))
}

fn last_name(_: &GeneratorRegistry, rng: &mut FakeRng, _: &[String]) -> GeneratorResult {
    concrete(LastName().fake_with_rng::<String, _>(rng))
}

fn name(_: &GeneratorRegistry, rng: &mut FakeRng, _: &[String]) -> GeneratorResult {
    concrete(Name().fake_with_rng::<String, _>(rng))
}

fn user_name(_: &GeneratorRegistry, rng: &mut FakeRng, _: &[String]) -> GeneratorResult {
    concrete(Username().fake_with_rng::<String, _>(rng))
}

fn word(_: &GeneratorRegistry, rng: &mut FakeRng, _: &[String]) -> GeneratorResult {
    concrete(Word().fake_with_rng::<String, _>(rng))
}

/// `sentence[:words]` - `words` lorem words, default 4..10
fn sentence(_: &GeneratorRegistry, rng: &mut FakeRng, args: &[String]) -> GeneratorResult {
    let words = length_arg("sentence", args, 0, 0, config::generators::MAX_SENTENCE_WORDS)?;
    let range = match words.checked_add(1) {
        Some(end) if words > 0 => words..end,
        _ => 4..10,
    };
    concrete(Sentence(range).fake_with_rng::<String, _>(rng))
}

fn language_code(_: &GeneratorRegistry, rng: &mut FakeRng, _: &[String]) -> GeneratorResult {
    concrete(LANGUAGE_CODES[rng.gen_range(0..LANGUAGE_CODES.len())])
}

fn mime_type(_: &GeneratorRegistry, rng: &mut FakeRng, _: &[String]) -> GeneratorResult {
    concrete(MimeType().fake_with_rng::<String, _>(rng))
}

fn file_name(_: &GeneratorRegistry, rng: &mut FakeRng, _: &[String]) -> GeneratorResult {
    concrete(FileName().fake_with_rng::<String, _>(rng))
}

/// `numberBetween[:min[:max]]`, inclusive; swapped bounds are reordered
fn number_between(_: &GeneratorRegistry, rng: &mut FakeRng, args: &[String]) -> GeneratorResult {
    let min: i64 = arg_or("numberBetween", args, 0, 0)?;
    let max: i64 = arg_or("numberBetween", args, 1, config::generators::NUMBER_BETWEEN_MAX)?;
    let (low, high) = if min <= max { (min, max) } else { (max, min) };
    concrete(rng.gen_range(low..=high))
}

/// `randomNumber[:digits]` - at most `digits` digits, leading zeros dropped
fn random_number(_: &GeneratorRegistry, rng: &mut FakeRng, args: &[String]) -> GeneratorResult {
    let digits: usize = arg_or("randomNumber", args, 0, config::generators::ID_DIGITS)?;
    let upper = pow10("randomNumber", digits)?;
    concrete(rng.gen_range(0..upper))
}

/// `boolean[:percent]` - true with `percent` % chance, default 50
fn boolean(_: &GeneratorRegistry, rng: &mut FakeRng, args: &[String]) -> GeneratorResult {
    let percent: u32 = arg_or("boolean", args, 0, 50)?;
    concrete(rng.gen_ratio(percent.min(100), 100))
}

/// Epoch seconds at most a year before the RNG's clock anchor
fn unix_time(_: &GeneratorRegistry, rng: &mut FakeRng, _: &[String]) -> GeneratorResult {
    let now = rng.now();
    concrete(rng.gen_range(now - config::generators::UNIX_TIME_WINDOW_SECS..=now))
}

fn uuid(_: &GeneratorRegistry, rng: &mut FakeRng, _: &[String]) -> GeneratorResult {
    let bytes: [u8; 16] = rng.gen();
    concrete(uuid::Builder::from_random_bytes(bytes).into_uuid().to_string())
}

/// `token[:length]` - alphanumeric, default 32 characters
fn token(_: &GeneratorRegistry, rng: &mut FakeRng, args: &[String]) -> GeneratorResult {
    let length = length_arg("token", args, 0, 32, config::generators::MAX_TEXT_LENGTH)?;
    concrete(alphanumeric(rng, length))
}

fn lexify(_: &GeneratorRegistry, rng: &mut FakeRng, args: &[String]) -> GeneratorResult {
    let pattern = pattern_arg("lexify", args, "????")?;
    concrete(fill_pattern(rng, pattern, true, false))
}

fn numerify(_: &GeneratorRegistry, rng: &mut FakeRng, args: &[String]) -> GeneratorResult {
    let pattern = pattern_arg("numerify", args, "###")?;
    concrete(fill_pattern(rng, pattern, false, true))
}

fn bothify(_: &GeneratorRegistry, rng: &mut FakeRng, args: &[String]) -> GeneratorResult {
    let pattern = pattern_arg("bothify", args, "## ??")?;
    concrete(bothify_text(rng, pattern))
}

fn pattern_arg<'a>(name: &str, args: &'a [String], default: &'a str) -> Result<&'a str, GeneratorError> {
    let pattern = args.first().map_or(default, String::as_str);
    if pattern.chars().count() > config::generators::MAX_TEXT_LENGTH {
        return Err(GeneratorError::InvalidArgument {
            name: name.to_string(),
            arg: format!("{}...", pattern.chars().take(16).collect::<String>()),
            reason: format!("pattern longer than {} characters", config::generators::MAX_TEXT_LENGTH),
        });
    }
    Ok(pattern)
}

/// Replaces `?` with a random lowercase letter and `#` with a random digit
pub fn bothify_text(rng: &mut FakeRng, pattern: &str) -> String {
    fill_pattern(rng, pattern, true, true)
}

fn fill_pattern(rng: &mut FakeRng, pattern: &str, letters: bool, digits: bool) -> String {
    pattern
        .chars()
        .map(|ch| match ch {
            '?' if letters => char::from(rng.gen_range(b'a'..=b'z')),
            '#' if digits => char::from(rng.gen_range(b'0'..=b'9')),
            other => other,
        })
        .collect()
}

/// Random `[A-Za-z0-9]` string of exactly `length` characters
pub fn alphanumeric(rng: &mut FakeRng, length: usize) -> String {
    (0..length).map(|_| char::from(rng.sample(Alphanumeric))).collect()
}

/// 10^digits for 1..=18 digits
pub(super) fn pow10(name: &str, digits: usize) -> Result<i64, GeneratorError> {
    if digits == 0 || digits > config::generators::MAX_ID_DIGITS {
        return Err(GeneratorError::InvalidArgument {
            name: name.to_string(),
            arg: digits.to_string(),
            reason: format!("digits must be 1..={}", config::generators::MAX_ID_DIGITS),
        });
    }
    Ok(10_i64.pow(digits as u32))
}
