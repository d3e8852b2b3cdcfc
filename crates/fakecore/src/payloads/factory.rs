//! Fluent payload factory
//!
//! A scenario method (`text_message`, `command_message`, ...) stores a base
//! template; overrides deep-merge into it; a terminal call (`to_value`,
//! `to_vec`, `as_result`, `as_json`, `to_typed`) resolves the template
//! `times` times and resets the builder.
//!
//! ```
//! use fakecore::PayloadFactory;
//! use serde_json::json;
//!
//! let mut factory = PayloadFactory::new();
//! let updates = factory
//!     .text_message("Hello")
//!     .times(2)
//!     .merge_payload(json!({"message": {"chat": {"id": 42}}}))
//!     .unwrap()
//!     .to_vec()
//!     .unwrap();
//!
//! assert_eq!(updates.len(), 2);
//! assert_eq!(updates[1]["message"]["chat"]["id"], 42);
//! assert_eq!(updates[1]["message"]["chat"]["type"], "private");
//! ```

use rand::SeedableRng;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use super::entities::command_entities_value;
use super::skeletons::Fragment;
use crate::core::{config, FactoryError, FactoryResult};
use crate::generators::{FakeRng, GeneratorRegistry};
use crate::template::{merge, merged, Resolver};

/// Mutable configuration of a factory between terminal calls
#[derive(Debug, Clone, PartialEq)]
pub struct BuilderState {
    /// Skeleton set by the last scenario method, with overrides merged in
    pub template: Option<Value>,
    /// Payloads produced by the next terminal call (always >= 1)
    pub times: usize,
    /// Seed for the next terminal call; survives `reset`
    pub seed: Option<u64>,
}

impl Default for BuilderState {
    fn default() -> Self {
        Self {
            template: None,
            times: 1,
            seed: *config::DEFAULT_SEED,
        }
    }
}

impl BuilderState {
    /// Clears the template and the repeat count. The seed is kept.
    pub fn reset(&mut self) {
        self.template = None;
        self.times = 1;
    }

    fn rng(&self) -> FakeRng {
        match self.seed {
            Some(seed) => FakeRng::seed_from_u64(seed),
            None => FakeRng::from_entropy(),
        }
    }
}

/// Builds synthetic Telegram updates from the skeleton library
#[derive(Debug, Clone)]
pub struct PayloadFactory {
    state: BuilderState,
    registry: &'static GeneratorRegistry,
}

impl Default for PayloadFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl PayloadFactory {
    pub fn new() -> Self {
        Self::with_registry(GeneratorRegistry::global())
    }

    /// Factory resolving placeholders against a custom registry
    pub fn with_registry(registry: &'static GeneratorRegistry) -> Self {
        Self {
            state: BuilderState::default(),
            registry,
        }
    }

    pub fn state(&self) -> &BuilderState {
        &self.state
    }

    /// Number of payloads the next terminal call produces; 0 is treated as 1
    pub fn times(&mut self, count: usize) -> &mut Self {
        if count == 0 {
            log::warn!("times(0) requested, producing a single payload");
        }
        self.state.times = count.max(1);
        self
    }

    /// Makes every following terminal call reproducible
    pub fn seed(&mut self, seed: u64) -> &mut Self {
        self.state.seed = Some(seed);
        self
    }

    // ==================== Scenarios ====================

    /// Plain text message with no entities
    pub fn text_message(&mut self, text: &str) -> &mut Self {
        self.set_message(json!({ "text": text, "entities": [] }))
    }

    /// `/name` or `/name args`, with the matching `bot_command` entity
    pub fn command_message(&mut self, name: &str, args: Option<&str>) -> &mut Self {
        let text = match args.filter(|args| !args.is_empty()) {
            Some(args) => format!("/{name} {args}"),
            None => format!("/{name}"),
        };
        let entities = command_entities_value(&text);
        self.set_message(json!({ "text": text, "entities": entities }))
    }

    /// Callback query carrying `data`; its message is a regular bot message
    pub fn callback_query(&mut self, data: &str) -> &mut Self {
        let query = merged(Fragment::CallbackQuery.skeleton(), json!({ "data": data }));
        self.set_update("callback_query", query)
    }

    /// Message with a single photo size
    pub fn photo_message(&mut self) -> &mut Self {
        self.set_message(json!({ "photo": [Fragment::Photo.skeleton()] }))
    }

    /// Message with a document attachment
    pub fn document_message(&mut self) -> &mut Self {
        self.set_message(json!({ "document": Fragment::Document.skeleton() }))
    }

    /// Uses a bare fragment (`user`, `chat`, `botFrom`, ...) as the template
    pub fn fragment(&mut self, name: &str) -> FactoryResult<&mut Self> {
        let fragment = name
            .parse::<Fragment>()
            .map_err(|_| FactoryError::UnknownFragment(name.to_string()))?;
        Ok(self.from_fragment(fragment))
    }

    pub fn from_fragment(&mut self, fragment: Fragment) -> &mut Self {
        self.state.template = Some(fragment.skeleton());
        self
    }

    fn set_message(&mut self, specifics: Value) -> &mut Self {
        self.set_update("message", merged(Fragment::Message.skeleton(), specifics))
    }

    fn set_update(&mut self, key: &str, body: Value) -> &mut Self {
        let mut patch = serde_json::Map::new();
        patch.insert(key.to_string(), body);
        let mut update = Fragment::Update.skeleton();
        merge(&mut update, Value::Object(patch));
        self.state.template = Some(update);
        self
    }

    // ==================== Overrides ====================

    /// Deep-merges `overrides` into the current template.
    ///
    /// String leaves in `overrides` are placeholders like any other leaf.
    pub fn merge_payload(&mut self, overrides: Value) -> FactoryResult<&mut Self> {
        let template = self.state.template.as_mut().ok_or(FactoryError::NoTemplate)?;
        if !overrides.is_object() {
            return Err(FactoryError::InvalidOverride(overrides.to_string()));
        }
        merge(template, overrides);
        Ok(self)
    }

    /// Merges `{field: value}` at the top level; `camelCase` names become `snake_case`
    pub fn with_field(&mut self, name: &str, value: impl Into<Value>) -> FactoryResult<&mut Self> {
        let mut patch = serde_json::Map::new();
        patch.insert(snake_case(name), value.into());
        self.merge_payload(Value::Object(patch))
    }

    // ==================== Terminals ====================

    /// One payload as-is, or an array when `times > 1`
    pub fn to_value(&mut self) -> FactoryResult<Value> {
        let mut payloads = self.generate()?;
        if payloads.len() == 1 {
            Ok(payloads.remove(0))
        } else {
            Ok(Value::Array(payloads))
        }
    }

    pub fn to_vec(&mut self) -> FactoryResult<Vec<Value>> {
        self.generate()
    }

    /// `{ok: true, result: ...}`, the shape of a successful Bot API response
    pub fn as_result(&mut self) -> FactoryResult<Value> {
        Ok(json!({ "ok": true, "result": self.to_value()? }))
    }

    pub fn as_json(&mut self) -> FactoryResult<String> {
        Ok(serde_json::to_string(&self.to_value()?)?)
    }

    /// Deserializes every payload into `T`
    pub fn to_typed<T: DeserializeOwned>(&mut self) -> FactoryResult<Vec<T>> {
        self.generate()?
            .into_iter()
            .map(|payload| serde_json::from_value(payload).map_err(FactoryError::from))
            .collect()
    }

    fn generate(&mut self) -> FactoryResult<Vec<Value>> {
        let template = self.state.template.take();
        let times = self.state.times;
        self.state.reset();

        let template = template.ok_or(FactoryError::NoTemplate)?;
        let mut rng = self.state.rng();
        let mut resolver = Resolver::new(self.registry, &mut rng);

        log::debug!("generating {times} payload(s), seed {:?}", self.state.seed);
        Ok((0..times).map(|_| resolver.resolve(&template)).collect())
    }
}

/// Typed top-level overrides
macro_rules! with_fields {
    ($($method:ident => $field:literal),* $(,)?) => {
        impl PayloadFactory {
            $(
                #[doc = concat!("Merges `{\"", $field, "\": value}` into the template")]
                pub fn $method(&mut self, value: impl Into<Value>) -> FactoryResult<&mut Self> {
                    self.with_field($field, value)
                }
            )*
        }
    };
}

with_fields! {
    with_update_id => "update_id",
    with_message => "message",
    with_callback_query => "callback_query",
    with_id => "id",
    with_text => "text",
    with_first_name => "first_name",
    with_username => "username",
    with_is_bot => "is_bot",
    with_chat => "chat",
    with_from => "from",
    with_date => "date",
    with_data => "data",
}

/// `updateId` / `UpdateId` -> `update_id`
fn snake_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len() + 4);
    for ch in name.chars() {
        if ch.is_uppercase() {
            if !out.is_empty() && !out.ends_with('_') {
                out.push('_');
            }
            out.extend(ch.to_lowercase());
        } else {
            out.push(ch);
        }
    }
    out
}
