//! Common test utilities
//!
//! Shared by the fakecore integration tests

#![allow(dead_code)]

use fakecore::PayloadFactory;
use serde_json::Value;

/// Seed used wherever a test needs reproducible payloads
pub const TEST_SEED: u64 = 20_240_601;

/// Factory with the test seed already applied
pub fn seeded_factory() -> PayloadFactory {
    let mut factory = PayloadFactory::new();
    factory.seed(TEST_SEED);
    factory
}

/// Walks `value` and returns every string leaf with its dotted path
pub fn string_leaves(value: &Value) -> Vec<(String, String)> {
    let mut leaves = Vec::new();
    collect(value, String::new(), &mut leaves);
    leaves
}

fn collect(value: &Value, path: String, out: &mut Vec<(String, String)>) {
    match value {
        Value::String(text) => out.push((path, text.clone())),
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                collect(item, format!("{path}.{index}"), out);
            }
        }
        Value::Object(fields) => {
            for (key, item) in fields {
                let child = if path.is_empty() { key.clone() } else { format!("{path}.{key}") };
                collect(item, child, out);
            }
        }
        _ => {}
    }
}
