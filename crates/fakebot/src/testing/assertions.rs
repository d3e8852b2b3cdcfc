//! Assertions over recorded Bot API calls
//!
//! Each `assert_*` method has a `check_*` twin returning the diagnostic
//! instead of panicking. Failure messages name the methods that were sent and,
//! for constraint misses, print the calls for that method as pretty JSON.

use itertools::Itertools;
use serde_json::{Map, Value};
use std::fmt;
use thiserror::Error;

use super::fake_api::RecordedCall;
use fakecore::generators::value_to_text;

/// Arguments map of a recorded call
pub type Arguments = Map<String, Value>;

/// Narrows which calls of a method count as a match
pub enum Constraint {
    /// Every key is present with an identical value
    Subset(Arguments),
    /// Arbitrary test over the arguments; `label` is shown on failure
    Predicate {
        label: String,
        test: Box<dyn Fn(&Arguments) -> bool>,
    },
}

impl Constraint {
    /// Subset constraint from a JSON object; other values require `{"value": v}`
    pub fn subset(expected: Value) -> Self {
        match expected {
            Value::Object(map) => Self::Subset(map),
            other => {
                let mut map = Map::new();
                map.insert("value".to_string(), other);
                Self::Subset(map)
            }
        }
    }

    pub fn predicate(test: impl Fn(&Arguments) -> bool + 'static) -> Self {
        Self::labelled("A custom predicate constraint.", test)
    }

    pub fn labelled(label: impl Into<String>, test: impl Fn(&Arguments) -> bool + 'static) -> Self {
        Self::Predicate {
            label: label.into(),
            test: Box::new(test),
        }
    }

    pub fn matches(&self, arguments: &Arguments) -> bool {
        match self {
            Self::Subset(expected) => expected
                .iter()
                .all(|(key, value)| arguments.get(key) == Some(value)),
            Self::Predicate { test, .. } => test(arguments),
        }
    }

    fn describe(&self) -> String {
        match self {
            Self::Subset(expected) => pretty(&Value::Object(expected.clone())),
            Self::Predicate { label, .. } => label.clone(),
        }
    }
}

impl From<Value> for Constraint {
    fn from(expected: Value) -> Self {
        Self::subset(expected)
    }
}

impl fmt::Debug for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Subset(expected) => f.debug_tuple("Subset").field(expected).finish(),
            Self::Predicate { label, .. } => f.debug_struct("Predicate").field("label", label).finish_non_exhaustive(),
        }
    }
}

/// A failed expectation, carrying the full diagnostic text
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct AssertionError(pub String);

impl AssertionError {
    fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

pub type AssertionResult = Result<(), AssertionError>;

/// Panics with the diagnostic, attributing the panic to the caller's line
#[track_caller]
#[allow(clippy::panic)]
pub(crate) fn ensure(result: AssertionResult) {
    if let Err(e) = result {
        panic!("{e}");
    }
}

/// Query and assertion language over a call log
pub trait AssertCalls {
    /// Every recorded call, in call order
    fn calls(&self) -> Vec<RecordedCall>;

    fn sent_by_method(&self, method: &str) -> Vec<RecordedCall> {
        self.calls().into_iter().filter(|call| call.method == method).collect()
    }

    /// Calls of `method` that satisfy `constraint` (all of them for `None`)
    fn sent(&self, method: &str, constraint: Option<&Constraint>) -> Vec<RecordedCall> {
        self.sent_by_method(method)
            .into_iter()
            .filter(|call| constraint.map_or(true, |c| c.matches(&call.arguments)))
            .collect()
    }

    fn check_sent(&self, method: &str) -> AssertionResult {
        let calls = self.calls();
        if calls.iter().any(|call| call.method == method) {
            return Ok(());
        }
        let mut message = format!("The expected [{method}] request was not sent.");
        if !calls.is_empty() {
            message.push_str(&format!("\nMethods sent instead: {}", method_names(&calls)));
        }
        Err(AssertionError::new(message))
    }

    fn check_sent_matching(&self, method: &str, constraint: &Constraint) -> AssertionResult {
        self.check_sent(method)?;
        if !self.sent(method, Some(constraint)).is_empty() {
            return Ok(());
        }
        Err(AssertionError::new(format!(
            "The [{method}] request was sent, but no calls matched the provided constraint.\n\n\
             Requests received for '{method}':\n{}\n\nExpected constraint:\n{}",
            format_calls(&self.sent_by_method(method)),
            constraint.describe()
        )))
    }

    fn check_not_sent(&self, method: &str) -> AssertionResult {
        let matching = self.sent_by_method(method);
        if matching.is_empty() {
            return Ok(());
        }
        Err(AssertionError::new(format!(
            "The unexpected [{method}] request was sent.\n\nRequests sent for '{method}':\n{}",
            format_calls(&matching)
        )))
    }

    fn check_not_sent_matching(&self, method: &str, constraint: &Constraint) -> AssertionResult {
        let matching = self.sent(method, Some(constraint));
        if matching.is_empty() {
            return Ok(());
        }
        Err(AssertionError::new(format!(
            "The unexpected [{method}] request was sent.\n\nMatching requests for '{method}':\n{}",
            format_calls(&matching)
        )))
    }

    fn check_sent_times(&self, method: &str, times: usize) -> AssertionResult {
        let calls = self.calls();
        let count = calls.iter().filter(|call| call.method == method).count();
        if count == times {
            return Ok(());
        }
        let mut message = format!("The expected [{method}] method was sent {count} times instead of {times} times.");
        if !calls.is_empty() {
            message.push_str(&format!("\nMethods sent instead: {}", method_names(&calls)));
        }
        Err(AssertionError::new(message))
    }

    fn check_nothing_sent(&self) -> AssertionResult {
        let calls = self.calls();
        if calls.is_empty() {
            return Ok(());
        }
        Err(AssertionError::new(format!(
            "Expected no requests to be sent, but the following were sent:\nMethods sent: {}\n\n{}",
            method_names(&calls),
            format_calls(&calls)
        )))
    }

    /// A `sendMessage` with exactly `text`, optionally to `chat_id` (compared as text)
    fn check_message_sent(&self, text: &str, chat_id: Option<&str>) -> AssertionResult {
        let expected = text.to_string();
        let constraint = message_constraint(format!("sendMessage with text {text:?}"), chat_id, move |actual| {
            actual == expected
        });
        self.check_sent_matching("sendMessage", &constraint)
    }

    /// A `sendMessage` whose text contains `fragment`, optionally to `chat_id`
    fn check_message_contains(&self, fragment: &str, chat_id: Option<&str>) -> AssertionResult {
        let expected = fragment.to_string();
        let constraint = message_constraint(format!("sendMessage with text containing {fragment:?}"), chat_id, move |actual| {
            actual.contains(&expected)
        });
        self.check_sent_matching("sendMessage", &constraint)
    }

    fn check_message_sent_count(&self, count: usize) -> AssertionResult {
        let actual = self.sent_by_method("sendMessage").len();
        if actual == count {
            return Ok(());
        }
        Err(AssertionError::new(format!(
            "The sendMessage method was called {actual} times instead of {count} times."
        )))
    }

    #[track_caller]
    fn assert_sent(&self, method: &str) {
        ensure(self.check_sent(method));
    }

    #[track_caller]
    fn assert_sent_matching(&self, method: &str, constraint: impl Into<Constraint>)
    where
        Self: Sized,
    {
        ensure(self.check_sent_matching(method, &constraint.into()));
    }

    #[track_caller]
    fn assert_not_sent(&self, method: &str) {
        ensure(self.check_not_sent(method));
    }

    #[track_caller]
    fn assert_not_sent_matching(&self, method: &str, constraint: impl Into<Constraint>)
    where
        Self: Sized,
    {
        ensure(self.check_not_sent_matching(method, &constraint.into()));
    }

    #[track_caller]
    fn assert_sent_times(&self, method: &str, times: usize) {
        ensure(self.check_sent_times(method, times));
    }

    #[track_caller]
    fn assert_nothing_sent(&self) {
        ensure(self.check_nothing_sent());
    }

    #[track_caller]
    fn assert_message_sent(&self, text: &str, chat_id: Option<&str>) {
        ensure(self.check_message_sent(text, chat_id));
    }

    #[track_caller]
    fn assert_message_contains(&self, fragment: &str, chat_id: Option<&str>) {
        ensure(self.check_message_contains(fragment, chat_id));
    }

    #[track_caller]
    fn assert_message_sent_count(&self, count: usize) {
        ensure(self.check_message_sent_count(count));
    }
}

impl AssertCalls for Vec<RecordedCall> {
    fn calls(&self) -> Vec<RecordedCall> {
        self.clone()
    }
}

fn message_constraint(
    label: String,
    chat_id: Option<&str>,
    text_matches: impl Fn(&str) -> bool + 'static,
) -> Constraint {
    let chat_id = chat_id.map(str::to_string);
    let label = match &chat_id {
        Some(chat) => format!("{label} to chat {chat}"),
        None => label,
    };
    Constraint::labelled(label, move |arguments| {
        let text = arguments.get("text").and_then(Value::as_str).unwrap_or_default();
        let chat_matches = chat_id.as_deref().map_or(true, |expected| {
            arguments.get("chat_id").map(value_to_text).unwrap_or_default() == expected
        });
        text_matches(text) && chat_matches
    })
}

fn method_names(calls: &[RecordedCall]) -> String {
    calls.iter().map(|call| call.method.as_str()).unique().join(", ")
}

/// `--- Request N ---` blocks with pretty-printed arguments
fn format_calls(calls: &[RecordedCall]) -> String {
    calls
        .iter()
        .enumerate()
        .map(|(index, call)| format!("--- Request {} ---\n{}", index + 1, pretty(&Value::Object(call.arguments.clone()))))
        .join("\n")
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}
