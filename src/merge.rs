//! Structural JSON merges used by `apply`, `sync` and `fill`.

use crate::models::rules::RuleSet;
use serde_json::{Map, Value as Json};

/// Recursively merge `source` into `target`, source wins.
///
/// - Object values are merged key by key; a non-object found in `target` at
///   that key is replaced by an object first.
/// - Every other value (strings, numbers, arrays, null) overwrites the target
///   value wholesale. Arrays are never merged element-wise.
///
/// Keys present only in `target` are left untouched.
pub fn deep_merge(target: &mut Map<String, Json>, source: &Map<String, Json>) {
    for (key, value) in source {
        match value {
            Json::Object(child) => {
                let slot = crate::locale::ensure_object(target, key);
                deep_merge(slot, child);
            }
            other => {
                target.insert(key.clone(), other.clone());
            }
        }
    }
}

/// Add every rule from `rules` that `existing` does not already have a key for.
///
/// Existing entries are never touched. Returns the ids that were added, in
/// rule set order.
pub fn add_missing_rules(existing: &mut Map<String, Json>, rules: &RuleSet) -> Vec<String> {
    let mut added = Vec::new();
    for rule in rules.iter() {
        if existing.contains_key(&rule.id) {
            continue;
        }
        existing.insert(rule.id.clone(), rule.to_locale_entry());
        added.push(rule.id.clone());
    }
    added
}

/// Copy into `target` every key of `reference` it does not have yet.
///
/// Objects recurse by key and arrays by index; a missing key or trailing
/// array element is copied whole from `reference`. Values already in
/// `target` are never replaced, even when their type differs.
pub fn fill_missing(target: &mut Map<String, Json>, reference: &Map<String, Json>) {
    for (key, value) in reference {
        match target.get_mut(key) {
            Some(existing) => fill_value(existing, value),
            None => {
                target.insert(key.clone(), value.clone());
            }
        }
    }
}

fn fill_value(target: &mut Json, reference: &Json) {
    match (target, reference) {
        (Json::Object(t), Json::Object(r)) => fill_missing(t, r),
        (Json::Array(t), Json::Array(r)) => {
            for (i, value) in r.iter().enumerate() {
                match t.get_mut(i) {
                    Some(existing) => fill_value(existing, value),
                    None => t.push(value.clone()),
                }
            }
        }
        _ => {}
    }
}
