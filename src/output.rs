//! Output rendering for apply, sync, fill, extract, and audit commands.
//!
//! Supports `human` (default) and `json` outputs. The JSON form includes
//! per-item fields and a top-level summary.

use crate::error::LocaleError;
use crate::locale::LocaleAction;
use crate::models::rules::RuleSet;
use crate::models::AuditResult;
use crate::sync::SyncReport;
use owo_colors::OwoColorize;
use serde_json::json;
use serde_json::Value as JsonVal;

fn use_colors(output: &str) -> bool {
    output != "json" && crate::utils::colors_enabled()
}

fn print_json(v: &JsonVal) {
    match serde_json::to_string_pretty(v) {
        Ok(s) => println!("{}", s),
        Err(e) => eprintln!("{} {}", crate::utils::error_prefix(), e),
    }
}

/// One progress line for a processed locale file. `noun` names what
/// `added` holds (`rules` or `keys`).
pub fn action_line(a: &LocaleAction, write: bool, noun: &str) -> String {
    let name = crate::utils::file_label(std::path::Path::new(&a.file));
    let mut line = if !a.existed {
        format!("created {}", name)
    } else if a.changed {
        format!("updated {}", name)
    } else {
        format!("unchanged {}", name)
    };
    if !a.added.is_empty() {
        line.push_str(&format!(" (+{} {})", a.added.len(), noun));
    }
    if !write && a.changed {
        line.push_str(" [would write]");
    }
    line
}

/// Print `apply`/`sync`/`fill` results: one line per file, one per error, then
/// a summary.
pub fn print_sync(report: &SyncReport, output: &str, write: bool, noun: &str) {
    match output {
        "json" => print_json(&compose_sync_json(report, write)),
        _ => {
            let color = use_colors(output);
            for a in &report.actions {
                let line = action_line(a, write, noun);
                let icon = if !a.existed {
                    "✚"
                } else if a.changed {
                    "✔"
                } else {
                    "·"
                };
                if color {
                    if a.changed {
                        println!("{} {}", icon.green().bold(), line);
                    } else {
                        println!("{} {}", icon.bright_black(), line.bright_black());
                    }
                } else {
                    println!("{} {}", icon, line);
                }
            }
            for lang in &report.skipped {
                println!("⏭️  skipped {} (not in [apply].languages)", lang);
            }
            print_errors(&report.errors, color);
            let summary = format!(
                "— Summary — files={} changed={} wrote={} errors={}",
                report.actions.len(),
                report.actions.iter().filter(|a| a.changed).count(),
                report.actions.iter().filter(|a| a.wrote).count(),
                report.errors.len()
            );
            if color {
                println!("{}", summary.bold());
            } else {
                println!("{}", summary);
            }
        }
    }
}

fn print_errors(errors: &[LocaleError], color: bool) {
    for e in errors {
        if color {
            println!("{} {}", "✖".red(), e.to_string().red());
        } else {
            println!("✖ {}", e);
        }
    }
}

fn errors_json(errors: &[LocaleError]) -> Vec<JsonVal> {
    errors
        .iter()
        .map(|e| json!({"subject": e.subject(), "message": e.to_string()}))
        .collect()
}

/// Compose sync JSON object (pure) for testing/snapshot purposes.
pub fn compose_sync_json(report: &SyncReport, write: bool) -> JsonVal {
    let summary = json!({
        "files": report.actions.len(),
        "changed": report.actions.iter().filter(|a| a.changed).count(),
        "wrote": report.actions.iter().filter(|a| a.wrote).count(),
        "added": report.actions.iter().map(|a| a.added.len()).sum::<usize>(),
        "errors": report.errors.len(),
        "write": write,
    });
    json!({
        "results": report.actions,
        "skipped": report.skipped,
        "errors": errors_json(&report.errors),
        "summary": summary,
    })
}

/// Print an extracted rule set: JSON mapping or one line per rule.
pub fn print_rules(rules: &RuleSet, output: &str) {
    match output {
        "json" => print_json(&rules.to_json()),
        _ => {
            let color = use_colors(output);
            for r in rules.iter() {
                if color {
                    println!("{} — {}", r.id.bold(), r.message);
                } else {
                    println!("{} — {}", r.id, r.message);
                }
                if !r.suggestion.is_empty() {
                    println!("    ↳ {}", r.suggestion);
                }
            }
            println!("Extracted {} rules.", rules.len());
        }
    }
}

/// Print audit results per locale.
pub fn print_audit(res: &AuditResult, errors: &[LocaleError], output: &str) {
    match output {
        "json" => {
            let mut out = serde_json::to_value(res).unwrap_or(JsonVal::Null);
            out["errors"] = JsonVal::Array(errors_json(errors));
            print_json(&out);
        }
        _ => {
            let color = use_colors(output);
            for gap in &res.gaps {
                if gap.missing.is_empty() {
                    println!("[{}] All keys present.", gap.lang);
                    continue;
                }
                let head = format!("[{}] Missing {} keys:", gap.lang, gap.missing.len());
                if color {
                    println!("{}", head.yellow().bold());
                } else {
                    println!("{}", head);
                }
                for (ns, count) in &gap.namespaces {
                    println!("  - {}: {} missing keys", ns, count);
                }
                let examples: Vec<&str> = gap.missing.iter().take(3).map(String::as_str).collect();
                println!("  Examples: {}", examples.join(", "));
            }
            print_errors(errors, color);
            if res.summary.missing == 0 {
                println!(
                    "All locales have the same keys as {}.json.",
                    res.summary.reference
                );
            } else {
                println!(
                    "Found {} missing keys across {} locales.",
                    res.summary.missing, res.summary.locales
                );
            }
        }
    }
}
