//! localesync core library.
//!
//! This crate keeps per-language locale JSON files in step with the
//! code-quality rule metadata of an application, and applies externally
//! supplied translation payloads to them.
//!
//! High-level modules:
//! - `cli`: CLI argument parsing (binary uses this).
//! - `config`: Discovery and effective configuration resolution.
//! - `extract`: Rule id/message/suggestion extraction from source or data files.
//! - `merge`: Deep merge and additive rule seeding over JSON objects.
//! - `locale`: Locale file discovery, load/save, and section helpers.
//! - `sync`: The `apply` and `sync` runners.
//! - `audit`: Missing-key report and fill against a reference locale.
//! - `models`: Rule and audit data models.
//! - `output`: Human/JSON printers.
//! - `error`: Error kinds.
//! - `utils`: Supporting helpers.
pub mod audit;
pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod locale;
pub mod merge;
pub mod models;
pub mod output;
pub mod sync;
pub mod utils;
