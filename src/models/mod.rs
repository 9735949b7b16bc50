//! Shared data models for rule metadata and audit output.

pub mod rules;

use serde::Serialize;

#[derive(Debug, Serialize)]
/// Missing keys in one locale compared to the reference locale.
pub struct LocaleGap {
    pub lang: String,
    pub file: String,
    pub missing: Vec<String>,
    /// Missing key count per top-level namespace, in first-seen order.
    pub namespaces: Vec<(String, usize)>,
}

#[derive(Debug, Serialize)]
/// Aggregated audit summary used by printers.
pub struct AuditSummary {
    pub reference: String,
    pub locales: usize,
    pub missing: usize,
    pub errors: usize,
}

#[derive(Debug, Serialize)]
/// Audit results container.
pub struct AuditResult {
    pub gaps: Vec<LocaleGap>,
    pub summary: AuditSummary,
}
