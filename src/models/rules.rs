//! Rule metadata: the baseline text seeded into every locale.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value as Json};
use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// One code-quality rule with its baseline message and suggestion.
pub struct RuleRecord {
    pub id: String,
    pub message: String,
    pub suggestion: String,
}

impl RuleRecord {
    /// Locale entry for this rule: `{"message": .., "suggestion": ..}`.
    pub fn to_locale_entry(&self) -> Json {
        json!({
            "message": self.message,
            "suggestion": self.suggestion,
        })
    }
}

#[derive(Debug, Clone, Default)]
/// Rules keyed by id. The first record for an id wins; extraction order is kept
/// so seeded locale entries come out in source order.
pub struct RuleSet {
    records: Vec<RuleRecord>,
    ids: HashSet<String>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `record` unless its id is already present. Returns whether it was added.
    pub fn insert(&mut self, record: RuleRecord) -> bool {
        if self.ids.contains(&record.id) {
            return false;
        }
        self.ids.insert(record.id.clone());
        self.records.push(record);
        true
    }

    pub fn get(&self, id: &str) -> Option<&RuleRecord> {
        if !self.ids.contains(id) {
            return None;
        }
        self.records.iter().find(|r| r.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RuleRecord> {
        self.records.iter()
    }

    /// Drop every rule whose id is listed in `ids`.
    pub fn remove_ids(&mut self, ids: &[String]) {
        if ids.is_empty() {
            return;
        }
        self.records.retain(|r| !ids.contains(&r.id));
        self.ids.retain(|id| !ids.contains(id));
    }

    /// JSON mapping `{id: {message, suggestion}}` in extraction order.
    pub fn to_json(&self) -> Json {
        let mut map = serde_json::Map::new();
        for r in &self.records {
            map.insert(r.id.clone(), r.to_locale_entry());
        }
        Json::Object(map)
    }
}

#[derive(Debug, Deserialize)]
/// Structured rule source (`rules.toml`, `rules.json`, `rules.yaml`).
pub struct RuleFile {
    #[serde(default)]
    pub rules: Vec<RuleEntry>,
}

#[derive(Debug, Deserialize)]
/// A rule entry in a structured rule source.
pub struct RuleEntry {
    pub id: String,
    pub message: String,
    #[serde(default)]
    pub suggestion: Option<String>,
}
