//! Recursive merge of a patch into a base value
//!
//! For a key present in both where both values are objects, merge recursively;
//! otherwise the patch value replaces the base value. New keys are appended, so
//! the base's key order is preserved.

use serde_json::Value;

/// Deep-merges `patch` into `base` in place.
///
/// A non-object `base` is replaced wholesale, as is any leaf. Arrays are
/// leaves: a patch array replaces the base array.
pub fn merge(base: &mut Value, patch: Value) {
    match (base, patch) {
        (Value::Object(base_map), Value::Object(patch_map)) => {
            for (key, patch_value) in patch_map {
                let both_objects = patch_value.is_object() && base_map.get(&key).is_some_and(Value::is_object);
                if !both_objects {
                    base_map.insert(key, patch_value);
                } else if let Some(base_value) = base_map.get_mut(&key) {
                    merge(base_value, patch_value);
                }
            }
        }
        (base, patch) => *base = patch,
    }
}

/// Returns `base` with `patch` merged in.
pub fn merged(mut base: Value, patch: Value) -> Value {
    merge(&mut base, patch);
    base
}
