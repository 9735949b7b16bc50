//! Locale synchronization runners.
//!
//! - [`run_apply`] merges an externally supplied translations payload
//!   (`{lang: {codeQuality: {...}}}`) into `<locales>/<lang>.json`.
//! - [`run_sync`] seeds every locale file with the extracted rule set, adding
//!   only rule ids a file does not have yet.
//!
//! Every file goes through read, transform, then write. A failure on one file
//! is recorded and the run moves on; only an unreadable payload or a missing
//! locale directory aborts, and both happen before any write. `sync` loads and
//! transforms all files into a [`SyncPlan`] first and commits it afterwards.

use crate::error::LocaleError;
use crate::locale::{self, LocaleAction};
use crate::merge::{add_missing_rules, deep_merge};
use crate::models::rules::RuleSet;
use serde_json::{Map, Value as Json};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
/// Write behavior shared by both runners.
pub struct SyncOptions {
    /// Persist processed files. When false, results report what would change.
    pub write: bool,
    /// Indent width for written JSON.
    pub indent: usize,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            write: true,
            indent: 4,
        }
    }
}

#[derive(Debug, Default)]
/// Per-file results plus the recoverable errors collected on the way.
pub struct SyncReport {
    pub actions: Vec<LocaleAction>,
    pub errors: Vec<LocaleError>,
    /// Payload languages left out by the `[apply].languages` filter.
    pub skipped: Vec<String>,
}

impl SyncReport {
    pub fn would_write(&self) -> bool {
        self.actions.iter().any(|a| a.changed)
    }
}

/// Apply a translations payload to the locale directory.
///
/// When `languages` is set, payload entries for other languages are skipped.
pub fn run_apply(
    locales_dir: &Path,
    payload_path: &Path,
    languages: Option<&[String]>,
    opts: &SyncOptions,
) -> Result<SyncReport, LocaleError> {
    let payload = read_payload(payload_path)?;
    let mut report = SyncReport::default();
    for (lang, entry) in &payload {
        if let Some(allowed) = languages {
            if !allowed.iter().any(|l| l == lang) {
                report.skipped.push(lang.clone());
                continue;
            }
        }
        match apply_language(locales_dir, lang, entry, opts) {
            Ok((action, write_err)) => {
                report.actions.push(action);
                report.errors.extend(write_err);
            }
            Err(e) => report.errors.push(e),
        }
    }
    Ok(report)
}

fn read_payload(path: &Path) -> Result<Map<String, Json>, LocaleError> {
    let invalid = |reason: String| LocaleError::Payload {
        path: path.to_path_buf(),
        reason,
    };
    let text = fs::read_to_string(path).map_err(|e| invalid(e.to_string()))?;
    match serde_json::from_str::<Json>(&text).map_err(|e| invalid(e.to_string()))? {
        Json::Object(map) => Ok(map),
        _ => Err(invalid("expected an object keyed by language code".into())),
    }
}

/// Merge one payload entry into its locale file. A write failure still yields
/// the action (with `wrote = false`) alongside the error.
fn apply_language(
    locales_dir: &Path,
    lang: &str,
    entry: &Json,
    opts: &SyncOptions,
) -> Result<(LocaleAction, Option<LocaleError>), LocaleError> {
    let Json::Object(entry) = entry else {
        return Err(LocaleError::PayloadEntry {
            lang: lang.to_string(),
            reason: "expected an object".into(),
        });
    };
    let incoming = match entry.get(locale::SECTION) {
        None => None,
        Some(Json::Object(section)) => Some(section),
        Some(_) => {
            return Err(LocaleError::PayloadEntry {
                lang: lang.to_string(),
                reason: format!("'{}' is not an object", locale::SECTION),
            })
        }
    };
    // `codeQuality.rules` must stay a mapping after the merge.
    if let Some(rules) = incoming.and_then(|section| section.get(locale::RULES)) {
        if !rules.is_object() {
            return Err(LocaleError::PayloadEntry {
                lang: lang.to_string(),
                reason: format!("'{}.{}' is not an object", locale::SECTION, locale::RULES),
            });
        }
    }
    let path = locale::path_for(locales_dir, lang)?;
    let existed = path.exists();
    let (mut doc, original) = if existed {
        locale::load(&path)?
    } else {
        (Map::new(), String::new())
    };

    locale::ensure_rules_section(&mut doc);
    if let Some(section) = incoming {
        deep_merge(locale::ensure_object(&mut doc, locale::SECTION), section);
    }
    Ok(PendingLocale {
        lang: lang.to_string(),
        path,
        existed,
        added: Vec::new(),
        doc,
        original,
    }
    .finish(opts))
}

/// Seed every locale file in `locales_dir` with rules it does not have yet.
pub fn run_sync(
    locales_dir: &Path,
    rules: &RuleSet,
    opts: &SyncOptions,
) -> Result<SyncReport, LocaleError> {
    Ok(plan_sync(locales_dir, rules)?.commit(opts))
}

/// Load every locale file and add the missing rules in memory. Nothing is
/// written until [`SyncPlan::commit`].
pub fn plan_sync(locales_dir: &Path, rules: &RuleSet) -> Result<SyncPlan, LocaleError> {
    let files = locale::discover(locales_dir)?;
    let mut plan = SyncPlan::default();
    for file in files {
        let (mut doc, original) = match locale::load(&file.path) {
            Ok(loaded) => loaded,
            Err(e) => {
                plan.errors.push(e);
                continue;
            }
        };
        let added = add_missing_rules(locale::ensure_rules_section(&mut doc), rules);
        plan.pending.push(PendingLocale {
            lang: file.lang,
            path: file.path,
            existed: true,
            added,
            doc,
            original,
        });
    }
    Ok(plan)
}

#[derive(Debug)]
/// A transformed locale document waiting to be rendered and persisted.
pub struct PendingLocale {
    pub lang: String,
    pub path: PathBuf,
    pub existed: bool,
    /// Keys added to the document (rule ids, or dotted paths for `fill`).
    pub added: Vec<String>,
    pub doc: Map<String, Json>,
    /// File content as read; empty for a file that did not exist.
    pub original: String,
}

impl PendingLocale {
    /// Render the document, persist it when writing, and describe the outcome.
    /// A write failure still yields the action (with `wrote = false`).
    pub fn finish(self, opts: &SyncOptions) -> (LocaleAction, Option<LocaleError>) {
        let rendered = locale::render(&self.doc, opts.indent);
        let changed = !self.existed || rendered != self.original;
        let mut wrote = false;
        let mut err = None;
        if opts.write {
            match locale::save(&self.path, &rendered) {
                Ok(()) => wrote = true,
                Err(e) => err = Some(e),
            }
        }
        let action = LocaleAction {
            lang: self.lang,
            file: crate::utils::rel_to_wd(&self.path),
            existed: self.existed,
            added: self.added,
            changed,
            wrote,
        };
        (action, err)
    }
}

#[derive(Debug, Default)]
/// Documents loaded and transformed by a runner, plus the files that failed
/// to load.
pub struct SyncPlan {
    pub pending: Vec<PendingLocale>,
    pub errors: Vec<LocaleError>,
}

impl SyncPlan {
    /// Persist every pending document. Each write failure is reported for its
    /// file and the remaining files are still written.
    pub fn commit(self, opts: &SyncOptions) -> SyncReport {
        let mut report = SyncReport {
            errors: self.errors,
            ..Default::default()
        };
        for pending in self.pending {
            let (action, write_err) = pending.finish(opts);
            report.actions.push(action);
            report.errors.extend(write_err);
        }
        report
    }
}
