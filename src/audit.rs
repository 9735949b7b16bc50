//! Locale audit: report keys present in the reference locale but missing from
//! the others, and optionally fill them in with the reference value.
//!
//! Keys are compared as flattened dotted paths of leaf values. Only missing
//! keys are reported; a key whose value still matches the reference text is
//! not flagged since many strings are legitimately identical across languages.

use crate::error::LocaleError;
use crate::locale;
use crate::merge::fill_missing;
use crate::models::{AuditResult, AuditSummary, LocaleGap};
use crate::sync::{PendingLocale, SyncOptions, SyncPlan, SyncReport};
use rayon::prelude::*;
use serde_json::{Map, Value as Json};
use std::collections::HashSet;
use std::path::Path;

/// Audit every locale in `locales_dir` against `<reference>.json`.
///
/// A missing or unreadable reference locale is fatal; other files that fail
/// to load are returned as errors and left out of the result.
pub fn run_audit(
    locales_dir: &Path,
    reference: &str,
) -> Result<(AuditResult, Vec<LocaleError>), LocaleError> {
    let files = locale::discover(locales_dir)?;
    let ref_doc = load_reference(locales_dir, reference)?;
    let ref_keys = locale::flatten_keys(&ref_doc);

    // Each file is read and flattened on its own; nothing is shared but the
    // reference key list.
    let outcomes: Vec<Result<LocaleGap, LocaleError>> = files
        .par_iter()
        .filter(|f| f.lang != reference)
        .map(|f| -> Result<LocaleGap, LocaleError> {
            let (doc, _) = locale::load(&f.path)?;
            let have: HashSet<String> = locale::flatten_keys(&doc).into_iter().collect();
            let missing: Vec<String> = ref_keys
                .iter()
                .filter(|k| !have.contains(*k))
                .cloned()
                .collect();
            Ok(LocaleGap {
                lang: f.lang.clone(),
                file: crate::utils::rel_to_wd(&f.path),
                namespaces: count_namespaces(&missing),
                missing,
            })
        })
        .collect();

    let mut gaps = Vec::new();
    let mut errors = Vec::new();
    for outcome in outcomes {
        match outcome {
            Ok(gap) => gaps.push(gap),
            Err(e) => errors.push(e),
        }
    }
    gaps.sort_by(|a, b| a.lang.cmp(&b.lang));
    let summary = AuditSummary {
        reference: reference.to_string(),
        locales: gaps.len(),
        missing: gaps.iter().map(|g| g.missing.len()).sum(),
        errors: errors.len(),
    };
    Ok((AuditResult { gaps, summary }, errors))
}

/// Fill every locale in `locales_dir` with the keys it is missing compared to
/// `<reference>.json`, copying the reference value.
pub fn run_fill(
    locales_dir: &Path,
    reference: &str,
    opts: &SyncOptions,
) -> Result<SyncReport, LocaleError> {
    Ok(plan_fill(locales_dir, reference)?.commit(opts))
}

/// Load and fill every non-reference locale in memory. Existing values are
/// never overwritten; `added` lists the dotted keys that were filled.
pub fn plan_fill(locales_dir: &Path, reference: &str) -> Result<SyncPlan, LocaleError> {
    let files = locale::discover(locales_dir)?;
    let ref_doc = load_reference(locales_dir, reference)?;
    let ref_keys = locale::flatten_keys(&ref_doc);

    let outcomes: Vec<Result<PendingLocale, LocaleError>> = files
        .par_iter()
        .filter(|f| f.lang != reference)
        .map(|f| -> Result<PendingLocale, LocaleError> {
            let (mut doc, original) = locale::load(&f.path)?;
            let before: HashSet<String> = locale::flatten_keys(&doc).into_iter().collect();
            fill_missing(&mut doc, &ref_doc);
            let after: HashSet<String> = locale::flatten_keys(&doc).into_iter().collect();
            let added = ref_keys
                .iter()
                .filter(|k| !before.contains(*k) && after.contains(*k))
                .cloned()
                .collect();
            Ok(PendingLocale {
                lang: f.lang.clone(),
                path: f.path.clone(),
                existed: true,
                added,
                doc,
                original,
            })
        })
        .collect();

    let mut plan = SyncPlan::default();
    for outcome in outcomes {
        match outcome {
            Ok(pending) => plan.pending.push(pending),
            Err(e) => plan.errors.push(e),
        }
    }
    Ok(plan)
}

fn load_reference(locales_dir: &Path, reference: &str) -> Result<Map<String, Json>, LocaleError> {
    let path = locale::path_for(locales_dir, reference)?;
    let (doc, _) = locale::load(&path)?;
    Ok(doc)
}

/// Count missing keys per top-level namespace, in first-seen order.
fn count_namespaces(missing: &[String]) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for key in missing {
        let ns = key.split('.').next().unwrap_or(key.as_str());
        match counts.iter_mut().find(|(n, _)| n == ns) {
            Some((_, c)) => *c += 1,
            None => counts.push((ns.to_string(), 1)),
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_audit_reports_missing_by_namespace() {
        let tmp = tempdir().unwrap();
        std::fs::write(
            tmp.path().join("en.json"),
            r#"{"codeQuality": {"title": "Code", "rules": {"a": {"message": "m"}}}, "home": {"hi": "Hi"}}"#,
        )
        .unwrap();
        std::fs::write(
            tmp.path().join("fr.json"),
            r#"{"codeQuality": {"title": "Code"}, "extra": 1}"#,
        )
        .unwrap();
        std::fs::write(tmp.path().join("de.json"), r#"{"codeQuality": {"title": "Code", "rules": {"a": {"message": "m"}}}, "home": {"hi": "Hallo"}}"#).unwrap();
        std::fs::write(tmp.path().join("zz.json"), "nope").unwrap();

        let (res, errors) = run_audit(tmp.path(), "en").unwrap();
        assert_eq!(errors.len(), 1);
        assert_eq!(res.gaps.len(), 2);
        assert_eq!(res.gaps[0].lang, "de");
        assert!(res.gaps[0].missing.is_empty());
        let fr = &res.gaps[1];
        assert_eq!(fr.missing, vec!["codeQuality.rules.a.message", "home.hi"]);
        assert_eq!(
            fr.namespaces,
            vec![("codeQuality".to_string(), 1), ("home".to_string(), 1)]
        );
        assert_eq!(res.summary.missing, 2);
    }

    #[test]
    fn test_audit_requires_reference() {
        let tmp = tempdir().unwrap();
        std::fs::write(tmp.path().join("fr.json"), "{}").unwrap();
        assert!(matches!(
            run_audit(tmp.path(), "en"),
            Err(LocaleError::Read { .. })
        ));
    }

    #[test]
    fn test_audit_counts_array_elements() {
        let tmp = tempdir().unwrap();
        std::fs::write(tmp.path().join("en.json"), r#"{"steps": ["a", "b", "c"]}"#).unwrap();
        std::fs::write(tmp.path().join("fr.json"), r#"{"steps": ["a"]}"#).unwrap();
        let (res, _) = run_audit(tmp.path(), "en").unwrap();
        assert_eq!(res.gaps[0].missing, vec!["steps.1", "steps.2"]);
    }

    #[test]
    fn test_fill_copies_missing_keys_only() {
        let tmp = tempdir().unwrap();
        std::fs::write(
            tmp.path().join("en.json"),
            r#"{"codeQuality": {"analyzing": "Analyzing codebase...", "severity": {"error": "Error", "info": "Info"}}, "home": {"hi": "Hi"}}"#,
        )
        .unwrap();
        std::fs::write(
            tmp.path().join("fr.json"),
            r#"{"codeQuality": {"severity": {"error": "Erreur"}}, "home": "Accueil"}"#,
        )
        .unwrap();
        std::fs::write(tmp.path().join("zz.json"), "[]").unwrap();

        let report = run_fill(tmp.path(), "en", &SyncOptions::default()).unwrap();
        assert_eq!(report.errors.len(), 1);
        assert!(matches!(report.errors[0], LocaleError::NotObject { .. }));
        assert_eq!(report.actions.len(), 1);
        let fr = &report.actions[0];
        assert_eq!(
            fr.added,
            vec!["codeQuality.analyzing", "codeQuality.severity.info"]
        );
        assert!(fr.wrote);

        let doc: Json =
            serde_json::from_str(&std::fs::read_to_string(tmp.path().join("fr.json")).unwrap())
                .unwrap();
        assert_eq!(doc["codeQuality"]["analyzing"], "Analyzing codebase...");
        assert_eq!(doc["codeQuality"]["severity"]["error"], "Erreur");
        assert_eq!(doc["codeQuality"]["severity"]["info"], "Info");
        // A scalar where the reference has an object stays as it is.
        assert_eq!(doc["home"], "Accueil");
        assert_eq!(std::fs::read_to_string(tmp.path().join("zz.json")).unwrap(), "[]");

        let again = run_fill(tmp.path(), "en", &SyncOptions::default()).unwrap();
        assert!(again.actions[0].added.is_empty());
        assert!(!again.actions[0].changed);
    }

    #[test]
    fn test_fill_dry_run_and_missing_reference() {
        let tmp = tempdir().unwrap();
        std::fs::write(tmp.path().join("en.json"), r#"{"a": "A"}"#).unwrap();
        std::fs::write(tmp.path().join("de.json"), "{}").unwrap();
        let opts = SyncOptions {
            write: false,
            indent: 4,
        };
        let report = run_fill(tmp.path(), "en", &opts).unwrap();
        assert!(report.would_write());
        assert_eq!(report.actions[0].added, vec!["a"]);
        assert_eq!(std::fs::read_to_string(tmp.path().join("de.json")).unwrap(), "{}");
        assert!(run_fill(tmp.path(), "ja", &opts).is_err());
    }
}
