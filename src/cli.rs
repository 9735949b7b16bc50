//! CLI argument parsing via `clap`.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "localesync",
    version,
    about = "Keep per-language locale files in step with code-quality rule metadata",
    long_about = "localesync — merge translation payloads into locale JSON files and seed them with rule metadata extracted from source.\n\nConfiguration precedence: CLI > localesync.toml > defaults.",
    after_help = "Examples:\n  localesync apply translations.json\n  localesync sync --rules src/utils/codeQualityRules.ts --check\n  localesync extract --output json\n  localesync audit --reference en\n  localesync fill --dry-run",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
/// Supported subcommands.
pub enum Commands {
    /// Show version
    #[command(about = "Show version", long_about = "Print the current localesync version.")]
    Version,
    /// Merge a translations payload into locale files
    #[command(
        about = "Apply translations payload",
        long_about = "Deep-merge the `codeQuality` subtree of each language in a payload shaped {lang: {codeQuality: {...}}} into <locales>/<lang>.json. Missing locale files are created.",
        after_help = "Examples:\n  localesync apply translations.json\n  localesync apply translations.json --dry-run"
    )]
    Apply {
        #[arg(help = "Path to the translations payload JSON")]
        payload: String,
        #[command(flatten)]
        common: CommonArgs,
        #[command(flatten)]
        mode: WriteMode,
    },
    /// Seed locale files with extracted rule metadata
    #[command(
        about = "Sync rule metadata into locales",
        long_about = "Extract rule id/message/suggestion from the rules source and add every rule missing from each locale's codeQuality.rules. Existing entries are never overwritten.",
        after_help = "Examples:\n  localesync sync\n  localesync sync --rules rules.toml --check"
    )]
    Sync {
        #[arg(long, help = "Rules source: code file scanned for rule blocks, or .toml/.json/.yaml data")]
        rules: Option<String>,
        #[command(flatten)]
        common: CommonArgs,
        #[command(flatten)]
        mode: WriteMode,
    },
    /// Print the rule metadata extracted from the rules source
    #[command(
        about = "Extract rule metadata",
        long_about = "Run rule extraction only and print the result. Nothing is written."
    )]
    Extract {
        #[arg(long, help = "Rules source: code file scanned for rule blocks, or .toml/.json/.yaml data")]
        rules: Option<String>,
        #[arg(long, help = "Repository root (default: current dir)")]
        repo_root: Option<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
    },
    /// Report keys missing from locales compared to a reference locale
    #[command(
        about = "Audit locale keys",
        long_about = "Compare every locale's leaf keys against the reference locale and list what is missing, grouped by top-level namespace."
    )]
    Audit {
        #[arg(long, help = "Reference language code (default: en)")]
        reference: Option<String>,
        #[command(flatten)]
        common: CommonArgs,
        #[arg(long, action = clap::ArgAction::SetTrue, help = "Exit non-zero if any key is missing")]
        check: bool,
    },
    /// Copy keys missing from locales in from the reference locale
    #[command(
        about = "Fill missing locale keys",
        long_about = "Add every key the reference locale has and a locale lacks, using the reference value. Existing values are never overwritten.",
        after_help = "Examples:\n  localesync fill\n  localesync fill --reference en --check"
    )]
    Fill {
        #[arg(long, help = "Reference language code (default: en)")]
        reference: Option<String>,
        #[command(flatten)]
        common: CommonArgs,
        #[command(flatten)]
        mode: WriteMode,
    },
}

#[derive(clap::Args)]
/// Options shared by commands that work on the locale directory.
pub struct CommonArgs {
    #[arg(long, help = "Repository root (default: current dir)")]
    pub repo_root: Option<String>,
    #[arg(long, help = "Locale directory (default: src/locales)")]
    pub locales: Option<String>,
    #[arg(long, help = "Output mode: human|json (default: human)")]
    pub output: Option<String>,
}

#[derive(clap::Args)]
/// Write control for `apply`, `sync` and `fill`.
pub struct WriteMode {
    #[arg(long, action = clap::ArgAction::SetTrue, help = "Report planned writes without changing files")]
    pub dry_run: bool,
    #[arg(long, action = clap::ArgAction::SetTrue, help = "Exit non-zero if any file would change (implies --dry-run)")]
    pub check: bool,
}

impl WriteMode {
    pub fn write(&self) -> bool {
        !(self.dry_run || self.check)
    }
}
