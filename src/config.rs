//! Configuration discovery and effective settings resolution.
//!
//! localesync reads `localesync.toml|yaml|yml` from the repository root (or
//! closest ancestor) and merges it with CLI flags to produce an `Effective`
//! config.
//! Defaults:
//! - `locales`: `src/locales`
//! - `rules`: `src/utils/codeQualityRules.ts`
//! - `output`: `human`
//! - `reference`: `en`
//! - `indent`: 4
//!
//! Overrides precedence: CLI > config file > defaults.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_LOCALES: &str = "src/locales";
pub const DEFAULT_RULES: &str = "src/utils/codeQualityRules.ts";
pub const DEFAULT_REFERENCE: &str = "en";
pub const DEFAULT_INDENT: usize = 4;

const CONFIG_NAMES: [&str; 3] = ["localesync.toml", "localesync.yaml", "localesync.yml"];

#[derive(Debug, Default, Deserialize, Clone)]
/// Root configuration loaded from `localesync.toml|yaml`.
pub struct LocalesyncConfig {
    pub locales: Option<String>,
    pub rules: Option<String>,
    pub output: Option<String>,
    pub reference: Option<String>,
    pub indent: Option<usize>,
    #[serde(default)]
    pub sync: Option<SyncCfg>,
    #[serde(default)]
    pub apply: Option<ApplyCfg>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// `[sync]` section.
pub struct SyncCfg {
    /// Rule ids never seeded into locale files.
    #[serde(default)]
    pub ignore: Vec<String>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// `[apply]` section.
pub struct ApplyCfg {
    /// Restrict payload application to these language codes.
    pub languages: Option<Vec<String>>,
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by commands after applying precedence.
pub struct Effective {
    pub repo_root: PathBuf,
    pub locales_dir: PathBuf,
    pub rules_source: PathBuf,
    pub output: String,
    pub reference: String,
    pub indent: usize,
    pub sync_ignore: Vec<String>,
    pub apply_languages: Option<Vec<String>>,
    /// Whether a config file was found at the repo root.
    pub config_found: bool,
}

#[derive(Debug, Default, Clone)]
/// CLI values that take precedence over the config file.
pub struct CliOverrides<'a> {
    pub repo_root: Option<&'a str>,
    pub locales: Option<&'a str>,
    pub rules: Option<&'a str>,
    pub output: Option<&'a str>,
    pub reference: Option<&'a str>,
}

/// Walk upward from `start` to detect the repository root.
///
/// Stops when a `localesync.toml|yaml|yml` or a `.git` directory is found.
pub fn detect_repo_root(start: &Path) -> PathBuf {
    let mut cur = start;
    loop {
        if CONFIG_NAMES.iter().any(|n| cur.join(n).exists()) || cur.join(".git").exists() {
            return cur.to_path_buf();
        }
        match cur.parent() {
            Some(p) => cur = p,
            None => return start.to_path_buf(),
        }
    }
}

/// Load `LocalesyncConfig` from `root`, or `Ok(None)` when no file exists.
///
/// A file that exists but does not parse is an error.
pub fn load_config(root: &Path) -> Result<Option<LocalesyncConfig>, String> {
    for name in CONFIG_NAMES {
        let p = root.join(name);
        if !p.exists() {
            continue;
        }
        let s = fs::read_to_string(&p).map_err(|e| format!("{}: {}", p.display(), e))?;
        let cfg: LocalesyncConfig = if name.ends_with(".toml") {
            toml::from_str(&s).map_err(|e| format!("{}: {}", p.display(), e))?
        } else {
            serde_yaml::from_str(&s).map_err(|e| format!("{}: {}", p.display(), e))?
        };
        return Ok(Some(cfg));
    }
    Ok(None)
}

/// Resolve `Effective` by merging CLI flags, discovered config, and defaults.
pub fn resolve_effective(cli: &CliOverrides<'_>) -> Result<Effective, String> {
    let start = PathBuf::from(cli.repo_root.unwrap_or("."));
    let repo_root = detect_repo_root(&start);
    let loaded = load_config(&repo_root)?;
    let config_found = loaded.is_some();
    let cfg = loaded.unwrap_or_default();

    let locales = cli
        .locales
        .map(str::to_string)
        .or(cfg.locales)
        .unwrap_or_else(|| DEFAULT_LOCALES.to_string());
    let rules = cli
        .rules
        .map(str::to_string)
        .or(cfg.rules)
        .unwrap_or_else(|| DEFAULT_RULES.to_string());
    let output = cli
        .output
        .map(str::to_string)
        .or(cfg.output)
        .unwrap_or_else(|| "human".to_string());
    if output != "human" && output != "json" {
        return Err(format!("unknown output mode '{output}' (expected human|json)"));
    }
    let reference = cli
        .reference
        .map(str::to_string)
        .or(cfg.reference)
        .unwrap_or_else(|| DEFAULT_REFERENCE.to_string());

    Ok(Effective {
        locales_dir: repo_root.join(locales),
        rules_source: repo_root.join(rules),
        output,
        reference,
        indent: cfg.indent.unwrap_or(DEFAULT_INDENT),
        sync_ignore: cfg.sync.map(|s| s.ignore).unwrap_or_default(),
        apply_languages: cfg.apply.and_then(|a| a.languages),
        config_found,
        repo_root,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    fn at(root: &Path) -> CliOverrides<'_> {
        CliOverrides {
            repo_root: root.to_str(),
            ..Default::default()
        }
    }

    #[test]
    fn test_detect_and_load_toml() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        let mut f = fs::File::create(root.join("localesync.toml")).unwrap();
        writeln!(
            f,
            "{}",
            r#"
locales = "app/i18n"
rules = "rules/quality.toml"
output = "json"
indent = 2
[sync]
ignore = ["debugger"]
[apply]
languages = ["fr"]
    "#
        )
        .unwrap();

        let eff = resolve_effective(&at(root)).unwrap();
        assert!(eff.config_found);
        assert_eq!(eff.locales_dir, root.join("app/i18n"));
        assert_eq!(eff.rules_source, root.join("rules/quality.toml"));
        assert_eq!(eff.output, "json");
        assert_eq!(eff.indent, 2);
        assert_eq!(eff.sync_ignore, vec!["debugger"]);
        assert_eq!(eff.apply_languages, Some(vec!["fr".to_string()]));
    }

    #[test]
    fn test_load_yaml_and_defaults() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("localesync.yaml"), "reference: es\n").unwrap();

        let eff = resolve_effective(&at(root)).unwrap();
        assert_eq!(eff.reference, "es");
        assert_eq!(eff.locales_dir, root.join(DEFAULT_LOCALES));
        assert_eq!(eff.rules_source, root.join(DEFAULT_RULES));
        assert_eq!(eff.output, "human");
        assert_eq!(eff.indent, 4);
        assert!(eff.sync_ignore.is_empty());
        assert!(eff.apply_languages.is_none());
    }

    #[test]
    fn test_cli_precedence_and_repo_root_walk() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("localesync.toml"), "locales = \"a\"\noutput = \"json\"\n").unwrap();
        let nested = root.join("pkg/sub");
        fs::create_dir_all(&nested).unwrap();

        let cli = CliOverrides {
            repo_root: nested.to_str(),
            locales: Some("b"),
            output: Some("human"),
            ..Default::default()
        };
        let eff = resolve_effective(&cli).unwrap();
        assert_eq!(eff.repo_root, root.to_path_buf());
        assert_eq!(eff.locales_dir, root.join("b"));
        assert_eq!(eff.output, "human");
    }

    #[test]
    fn test_invalid_config_and_output_are_errors() {
        let dir = tempdir().unwrap();
        let root = dir.path();
        fs::write(root.join("localesync.toml"), "locales = [").unwrap();
        assert!(resolve_effective(&at(root)).is_err());

        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();
        let cli = CliOverrides {
            repo_root: dir.path().to_str(),
            output: Some("xml"),
            ..Default::default()
        };
        assert!(resolve_effective(&cli).is_err());
    }
}
