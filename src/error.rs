//! Error kinds for locale processing.
//!
//! Per-file errors (`Read`, `Parse`, `NotObject`, `Write`, `InvalidLanguage`,
//! `PayloadEntry`) are collected next to the per-file results and never stop a
//! run. `Payload`, `RulesSource` and `LocalesDir` are fatal and abort before
//! anything is written.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LocaleError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON in {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("{} does not hold a JSON object at its root", .path.display())]
    NotObject { path: PathBuf },
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid language code '{lang}': {reason}")]
    InvalidLanguage { lang: String, reason: String },
    #[error("payload entry for '{lang}': {reason}")]
    PayloadEntry { lang: String, reason: String },
    #[error("translations payload {}: {reason}", .path.display())]
    Payload { path: PathBuf, reason: String },
    #[error("rules source {}: {reason}", .path.display())]
    RulesSource { path: PathBuf, reason: String },
    #[error("locale directory not found: {}", .0.display())]
    LocalesDir(PathBuf),
}

impl LocaleError {
    /// Path or language the error is about, for one-line reporting.
    pub fn subject(&self) -> String {
        match self {
            LocaleError::Read { path, .. }
            | LocaleError::Parse { path, .. }
            | LocaleError::NotObject { path }
            | LocaleError::Write { path, .. }
            | LocaleError::Payload { path, .. }
            | LocaleError::RulesSource { path, .. }
            | LocaleError::LocalesDir(path) => crate::utils::rel_to_wd(path),
            LocaleError::InvalidLanguage { lang, .. } | LocaleError::PayloadEntry { lang, .. } => {
                lang.clone()
            }
        }
    }

    /// True for errors that abort the whole command.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            LocaleError::Payload { .. } | LocaleError::RulesSource { .. } | LocaleError::LocalesDir(_)
        )
    }
}
