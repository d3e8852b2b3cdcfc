//! Placeholder resolution
//!
//! Walks a skeleton and replaces every string leaf by the value of the
//! generator it names. Lookup order for a leaf `name[:args]`:
//!
//! 1. generator `name`, if registered and the arity fits
//! 2. skeleton fragment `name`, only when no arguments were given
//! 3. the original string, unchanged
//!
//! Resolution itself never fails.

use serde_json::Value;

use super::placeholder::Placeholder;
use crate::core::config;
use crate::generators::{FakeRng, Generated, GeneratorRegistry};
use crate::payloads::Fragment;

/// One resolution pass over skeletons, drawing from a single RNG.
///
/// Reusing the same resolver (or RNG) for several skeletons continues the
/// random sequence, so a seeded RNG reproduces a whole batch.
pub struct Resolver<'a> {
    registry: &'a GeneratorRegistry,
    rng: &'a mut FakeRng,
    depth: usize,
}

impl<'a> Resolver<'a> {
    pub fn new(registry: &'a GeneratorRegistry, rng: &'a mut FakeRng) -> Self {
        Self { registry, rng, depth: 0 }
    }

    /// Returns a fully resolved copy of `skeleton`
    pub fn resolve(&mut self, skeleton: &Value) -> Value {
        match skeleton {
            Value::String(raw) => self.resolve_placeholder(raw),
            Value::Array(items) => Value::Array(items.iter().map(|item| self.resolve(item)).collect()),
            Value::Object(fields) => Value::Object(
                fields
                    .iter()
                    .map(|(key, value)| (key.clone(), self.resolve(value)))
                    .collect(),
            ),
            other => other.clone(),
        }
    }

    fn resolve_placeholder(&mut self, raw: &str) -> Value {
        let placeholder = Placeholder::parse(raw);

        match self.registry.invoke(&placeholder.name, &placeholder.args, &mut *self.rng) {
            Ok(Generated::Value(value)) => return value,
            Ok(Generated::Skeleton(skeleton)) => {
                if let Some(value) = self.descend(raw, &skeleton) {
                    return value;
                }
            }
            Err(e) => log::trace!("placeholder {raw:?} not generated: {e}"),
        }

        if !placeholder.has_args() {
            if let Ok(fragment) = placeholder.name.parse::<Fragment>() {
                if let Some(value) = self.descend(raw, &fragment.skeleton()) {
                    return value;
                }
            }
        }

        Value::String(raw.to_string())
    }

    fn descend(&mut self, raw: &str, skeleton: &Value) -> Option<Value> {
        if self.depth >= config::generators::MAX_RESOLVE_DEPTH {
            log::warn!("placeholder {raw:?} nested too deep, left as text");
            return None;
        }
        self.depth += 1;
        let value = self.resolve(skeleton);
        self.depth -= 1;
        Some(value)
    }
}
