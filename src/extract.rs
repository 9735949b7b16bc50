//! Rule metadata extraction.
//!
//! Rule definitions usually live in source code (`{ id: '..', message: '..' }`
//! object literals). They are not parsed with a grammar: every `id: '` occurrence
//! starts a block that runs to the next one, and the `id`, `message` and
//! `suggestion` string literals are picked out of each block by delimiter
//! scanning. An `id:` inside an unrelated string or comment also opens a block.
//!
//! Structured rule files (`.toml`, `.json`, `.yaml`) skip the scan entirely and
//! are deserialized into [`RuleFile`].

use crate::error::LocaleError;
use crate::models::rules::{RuleFile, RuleRecord, RuleSet};
use regex::Regex;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

const QUOTES: [char; 3] = ['\'', '"', '`'];

// Group 1 is the opening quote of the block's own id literal.
static ID_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"\bid\s*:\s*(['"])"#).expect("id boundary pattern"));

/// Return the string literal assigned to `key` in `text`.
///
/// The key is looked up as `key:` first, then `'key':`, then `"key":`.
/// Returns `None` when the value is not a quoted literal (a variable, a
/// regex) or when the literal is never closed. A quote preceded by a
/// backslash does not close the literal; such escaped quotes are returned
/// as plain quote characters.
pub fn extract_string_literal(text: &str, key: &str) -> Option<String> {
    let pos = text
        .find(&format!("{key}:"))
        .or_else(|| text.find(&format!("'{key}':")))
        .or_else(|| text.find(&format!("\"{key}\":")))?;
    let colon = pos + text[pos..].find(':')?;
    read_literal(text[colon + 1..].trim_start())
}

/// Read the quoted literal that `value` starts with.
fn read_literal(value: &str) -> Option<String> {
    let quote = value.chars().next().filter(|c| QUOTES.contains(c))?;
    let body = &value[quote.len_utf8()..];
    for (i, _) in body.match_indices(quote) {
        if i == 0 || body.as_bytes()[i - 1] != b'\\' {
            return Some(unescape_quote(&body[..i], quote));
        }
    }
    None
}

fn unescape_quote(raw: &str, quote: char) -> String {
    raw.replace(&format!("\\{quote}"), &quote.to_string())
}

/// Extract every rule block from `source`.
///
/// The id is read at the boundary that opened the block, so spacing such as
/// `id : 'x'` cannot make the scan pick up some later `uuid:` instead.
/// Blocks with an empty id or without a `message` are skipped; `suggestion`
/// defaults to an empty string. The first block for a given id wins.
pub fn extract_rules(source: &str) -> RuleSet {
    // (block start, id quote offset)
    let starts: Vec<(usize, usize)> = ID_BOUNDARY
        .captures_iter(source)
        .filter_map(|c| Some((c.get(0)?.start(), c.get(1)?.start())))
        .collect();
    let mut rules = RuleSet::new();
    for (i, &(start, quote_at)) in starts.iter().enumerate() {
        let end = starts.get(i + 1).map(|s| s.0).unwrap_or(source.len());
        let block = &source[start..end];
        let Some(id) = read_literal(&source[quote_at..end]).filter(|id| !id.is_empty()) else {
            continue;
        };
        // Only an absent message skips the block; `message: ''` is kept as an
        // empty translation.
        let Some(message) = extract_string_literal(block, "message") else {
            continue;
        };
        let suggestion = extract_string_literal(block, "suggestion").unwrap_or_default();
        rules.insert(RuleRecord {
            id,
            message,
            suggestion,
        });
    }
    rules
}

/// Load a rule set from `path`, choosing structured parsing by extension and
/// falling back to the block scanner for source files.
pub fn load_rules(path: &Path) -> Result<RuleSet, LocaleError> {
    let text = fs::read_to_string(path).map_err(|e| LocaleError::RulesSource {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    let invalid = |reason: String| LocaleError::RulesSource {
        path: path.to_path_buf(),
        reason,
    };
    let file: RuleFile = match ext.as_str() {
        "toml" => toml::from_str(&text).map_err(|e| invalid(e.to_string()))?,
        "json" => serde_json::from_str(&text).map_err(|e| invalid(e.to_string()))?,
        "yaml" | "yml" => serde_yaml::from_str(&text).map_err(|e| invalid(e.to_string()))?,
        _ => return Ok(extract_rules(&text)),
    };
    let mut rules = RuleSet::new();
    for entry in file.rules {
        if entry.id.is_empty() {
            continue;
        }
        rules.insert(RuleRecord {
            id: entry.id,
            message: entry.message,
            suggestion: entry.suggestion.unwrap_or_default(),
        });
    }
    Ok(rules)
}
