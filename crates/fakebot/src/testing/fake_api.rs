//! In-memory Bot API transport
//!
//! Every call is appended to an ordered log, then answered from a FIFO queue
//! of canned responses regardless of which method was called. With the queue
//! empty the answer is `{ok: true, result: true}`, or
//! [`ApiError::NoFakeResponsesLeft`] once `fail_when_empty` is switched on.

use fakecore::config;
use parking_lot::Mutex;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::VecDeque;

use super::assertions::AssertCalls;
use crate::api::{ApiError, ApiResponse, ApiResult, BotApi};

/// One call the bot under test made
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordedCall {
    pub method: String,
    pub arguments: Map<String, Value>,
    /// Position in the call log, starting at 0
    pub sequence: usize,
}

impl RecordedCall {
    pub fn argument(&self, key: &str) -> Option<&Value> {
        self.arguments.get(key)
    }
}

/// A queued answer: a response body or a simulated API failure
#[derive(Debug, Clone, PartialEq)]
pub enum FakeResponse {
    Value(Value),
    Error(ApiError),
}

impl From<Value> for FakeResponse {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<ApiError> for FakeResponse {
    fn from(error: ApiError) -> Self {
        Self::Error(error)
    }
}

impl From<ApiResponse> for FakeResponse {
    fn from(response: ApiResponse) -> Self {
        Self::Value(response.into_inner())
    }
}

#[derive(Debug, Default)]
struct FakeState {
    calls: Vec<RecordedCall>,
    responses: VecDeque<FakeResponse>,
    fail_when_empty: bool,
}

/// Fake transport recording calls and replaying queued responses
#[derive(Debug)]
pub struct FakeApi {
    state: Mutex<FakeState>,
}

impl Default for FakeApi {
    fn default() -> Self {
        Self::new()
    }
}

impl FakeApi {
    /// Empty queue; `fail_when_empty` follows `FAKEBOT_FAIL_WHEN_EMPTY`
    pub fn new() -> Self {
        Self {
            state: Mutex::new(FakeState {
                fail_when_empty: *config::FAIL_WHEN_EMPTY,
                ..FakeState::default()
            }),
        }
    }

    pub fn with_responses<I, R>(responses: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<FakeResponse>,
    {
        let api = Self::new();
        api.add_responses(responses);
        api
    }

    /// Appends to the tail of the queue; safe to call between calls
    pub fn add_responses<I, R>(&self, responses: I) -> &Self
    where
        I: IntoIterator<Item = R>,
        R: Into<FakeResponse>,
    {
        self.state.lock().responses.extend(responses.into_iter().map(Into::into));
        self
    }

    pub fn add_response(&self, response: impl Into<FakeResponse>) -> &Self {
        self.add_responses([response])
    }

    /// Fail calls made while the queue is empty instead of answering with the default
    pub fn fail_when_empty(&self, enabled: bool) -> &Self {
        self.state.lock().fail_when_empty = enabled;
        self
    }

    pub fn pending_responses(&self) -> usize {
        self.state.lock().responses.len()
    }

    /// Snapshot of the call log, in call order
    pub fn recorded_calls(&self) -> Vec<RecordedCall> {
        self.state.lock().calls.clone()
    }

    pub fn call_count(&self) -> usize {
        self.state.lock().calls.len()
    }
}

impl BotApi for FakeApi {
    fn invoke(&self, method: &str, arguments: Value) -> ApiResult<ApiResponse> {
        let mut state = self.state.lock();

        let sequence = state.calls.len();
        state.calls.push(RecordedCall {
            method: method.to_string(),
            arguments: argument_map(arguments),
            sequence,
        });
        log::debug!("fake api call #{sequence}: {method}");

        match state.responses.pop_front() {
            Some(FakeResponse::Value(body)) => Ok(ApiResponse::new(body)),
            Some(FakeResponse::Error(error)) => {
                log::debug!("fake api call #{sequence}: answering with {error}");
                Err(error)
            }
            None if state.fail_when_empty => {
                log::warn!("fake api call #{sequence} ({method}) with no responses left");
                Err(ApiError::NoFakeResponsesLeft)
            }
            None => Ok(ApiResponse::new(config::bot::default_response())),
        }
    }
}

impl AssertCalls for FakeApi {
    fn calls(&self) -> Vec<RecordedCall> {
        self.recorded_calls()
    }
}

fn argument_map(arguments: Value) -> Map<String, Value> {
    match arguments {
        Value::Object(map) => map,
        Value::Null => Map::new(),
        other => {
            let mut map = Map::new();
            map.insert("value".to_string(), other);
            map
        }
    }
}
