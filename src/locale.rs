//! Locale document I/O and the `codeQuality.rules` section helpers.
//!
//! Documents are read with serde_json's `preserve_order` so keys come back
//! out in the order they were written, and are written back pretty-printed
//! with a configurable indent and non-ASCII characters left as-is.

use crate::error::LocaleError;
use serde::Serialize;
use serde_json::{Map, Value as Json};
use std::fs;
use std::path::{Path, PathBuf};

pub const SECTION: &str = "codeQuality";
pub const RULES: &str = "rules";

/// A locale file discovered in the locale directory.
#[derive(Debug, Clone)]
pub struct LocaleFile {
    pub lang: String,
    pub path: PathBuf,
}

/// List `<dir>/*.json` sorted by path. The language is the file stem.
pub fn discover(dir: &Path) -> Result<Vec<LocaleFile>, LocaleError> {
    if !dir.is_dir() {
        return Err(LocaleError::LocalesDir(dir.to_path_buf()));
    }
    let pattern = dir.join("*.json").to_string_lossy().to_string();
    let mut files: Vec<LocaleFile> = Vec::new();
    let entries = glob::glob(&pattern).map_err(|_| LocaleError::LocalesDir(dir.to_path_buf()))?;
    for path in entries.flatten() {
        if !path.is_file() {
            continue;
        }
        if let Some(stem) = path.file_stem() {
            files.push(LocaleFile {
                lang: stem.to_string_lossy().to_string(),
                path,
            });
        }
    }
    files.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(files)
}

/// Path of the locale file for `lang`, rejecting codes that would escape `dir`.
pub fn path_for(dir: &Path, lang: &str) -> Result<PathBuf, LocaleError> {
    let invalid = |reason: &str| LocaleError::InvalidLanguage {
        lang: lang.to_string(),
        reason: reason.to_string(),
    };
    if lang.trim().is_empty() {
        return Err(invalid("empty"));
    }
    if lang == "." || lang == ".." || lang.contains(['/', '\\']) {
        return Err(invalid("must be a plain file name"));
    }
    Ok(dir.join(format!("{lang}.json")))
}

/// Read and parse a locale document. The root must be an object.
pub fn load(path: &Path) -> Result<(Map<String, Json>, String), LocaleError> {
    let text = fs::read_to_string(path).map_err(|source| LocaleError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let doc: Json = serde_json::from_str(&text).map_err(|source| LocaleError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    match doc {
        Json::Object(map) => Ok((map, text)),
        _ => Err(LocaleError::NotObject {
            path: path.to_path_buf(),
        }),
    }
}

/// Pretty-print `doc` with `indent` spaces per level.
pub fn render(doc: &Map<String, Json>, indent: usize) -> String {
    let pad = " ".repeat(indent);
    let fmt = serde_json::ser::PrettyFormatter::with_indent(pad.as_bytes());
    let mut buf = Vec::new();
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, fmt);
    // Map<String, Value> serialization into a Vec cannot fail.
    if doc.serialize(&mut ser).is_err() {
        return String::new();
    }
    String::from_utf8(buf).unwrap_or_default()
}

/// Write `rendered` to `path`, creating the parent directory if needed.
pub fn save(path: &Path, rendered: &str) -> Result<(), LocaleError> {
    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }
    fs::write(path, rendered).map_err(|source| LocaleError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Make sure `doc.codeQuality.rules` exists as an object and return it.
///
/// A non-object value found at either level is replaced by an empty object.
pub fn ensure_rules_section(doc: &mut Map<String, Json>) -> &mut Map<String, Json> {
    let section = ensure_object(doc, SECTION);
    ensure_object(section, RULES)
}

/// Return the object at `doc[key]`, inserting or replacing it as needed.
pub fn ensure_object<'a>(doc: &'a mut Map<String, Json>, key: &str) -> &'a mut Map<String, Json> {
    object_in(
        doc.entry(key.to_string())
            .or_insert_with(|| Json::Object(Map::new())),
    )
}

/// Replace a non-object `value` with an empty object, then borrow the object.
fn object_in(value: &mut Json) -> &mut Map<String, Json> {
    match value {
        Json::Object(map) => map,
        other => {
            *other = Json::Object(Map::new());
            object_in(other)
        }
    }
}

/// Flatten a document into dotted leaf keys. Objects recurse by key and
/// arrays by index (`list.0`); scalars are leaves. Empty objects and arrays
/// contribute no keys.
pub fn flatten_keys(doc: &Map<String, Json>) -> Vec<String> {
    let mut out = Vec::new();
    for (k, v) in doc {
        flatten_into(v, k, &mut out);
    }
    out
}

fn flatten_into(value: &Json, key: &str, out: &mut Vec<String>) {
    match value {
        Json::Object(map) => {
            for (k, v) in map {
                flatten_into(v, &format!("{key}.{k}"), out);
            }
        }
        Json::Array(items) => {
            for (i, v) in items.iter().enumerate() {
                flatten_into(v, &format!("{key}.{i}"), out);
            }
        }
        _ => out.push(key.to_string()),
    }
}

#[derive(Debug, Serialize)]
/// Outcome of processing one locale file.
pub struct LocaleAction {
    pub lang: String,
    pub file: String,
    /// False when the file did not exist and was initialized empty.
    pub existed: bool,
    /// Rule ids seeded by `sync`, or dotted keys copied in by `fill`.
    pub added: Vec<String>,
    /// Rendered output differs from what was on disk.
    pub changed: bool,
    pub wrote: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    fn obj(v: Json) -> Map<String, Json> {
        v.as_object().unwrap().clone()
    }

    #[test]
    fn test_discover_sorted_json_only() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("fr.json"), "{}").unwrap();
        std::fs::write(dir.path().join("de.json"), "{}").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "x").unwrap();
        let files = discover(dir.path()).unwrap();
        let langs: Vec<_> = files.iter().map(|f| f.lang.as_str()).collect();
        assert_eq!(langs, vec!["de", "fr"]);
        assert!(matches!(
            discover(&dir.path().join("missing")),
            Err(LocaleError::LocalesDir(_))
        ));
    }

    #[test]
    fn test_path_for_rejects_traversal() {
        let dir = Path::new("locales");
        assert_eq!(path_for(dir, "pt-BR").unwrap(), dir.join("pt-BR.json"));
        assert!(path_for(dir, "../secrets").is_err());
        assert!(path_for(dir, "..").is_err());
        assert!(path_for(dir, "").is_err());
    }

    #[test]
    fn test_load_errors() {
        let dir = tempdir().unwrap();
        let arr = dir.path().join("arr.json");
        std::fs::write(&arr, "[1, 2]").unwrap();
        assert!(matches!(load(&arr), Err(LocaleError::NotObject { .. })));
        let bad = dir.path().join("bad.json");
        std::fs::write(&bad, "{").unwrap();
        assert!(matches!(load(&bad), Err(LocaleError::Parse { .. })));
        assert!(matches!(
            load(&dir.path().join("none.json")),
            Err(LocaleError::Read { .. })
        ));
    }

    #[test]
    fn test_render_indent_and_unicode() {
        let doc = obj(json!({"b": {"msg": "Éviter 日本"}, "a": 1}));
        let out = render(&doc, 4);
        assert_eq!(out, "{\n    \"b\": {\n        \"msg\": \"Éviter 日本\"\n    },\n    \"a\": 1\n}");
        assert!(render(&doc, 2).starts_with("{\n  \"b\""));
    }

    #[test]
    fn test_ensure_rules_section_creates_and_replaces() {
        let mut empty = Map::new();
        ensure_rules_section(&mut empty);
        assert_eq!(Json::Object(empty), json!({"codeQuality": {"rules": {}}}));

        let mut list = obj(json!({"codeQuality": [1], "after": true}));
        ensure_rules_section(&mut list);
        assert_eq!(
            Json::Object(list),
            json!({"codeQuality": {"rules": {}}, "after": true})
        );

        let mut odd = obj(json!({"codeQuality": {"rules": "oops", "title": "T"}}));
        ensure_rules_section(&mut odd).insert("x".into(), json!(1));
        assert_eq!(
            Json::Object(odd),
            json!({"codeQuality": {"rules": {"x": 1}, "title": "T"}})
        );
    }

    #[test]
    fn test_flatten_keys() {
        let v = obj(json!({"a": {"b": "x", "c": {"d": 1}}, "e": [1, {"g": 2}], "f": {}, "h": [], "i": null}));
        assert_eq!(flatten_keys(&v), vec!["a.b", "a.c.d", "e.0", "e.1.g", "i"]);
    }
}
