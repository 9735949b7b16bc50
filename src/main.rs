//! localesync CLI binary entry point.
//! Delegates to modules for apply/sync/fill/extract/audit and prints results.

use clap::Parser;
use localesync::cli::{Cli, Commands, CommonArgs};
use localesync::config::{self, CliOverrides, Effective};
use localesync::error::LocaleError;
use localesync::sync::SyncOptions;
use localesync::{audit, extract, output, sync, utils};

fn main() {
    let cli = Cli::parse();
    match cli.cmd {
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::Apply {
            payload,
            common,
            mode,
        } => {
            let eff = effective(&common, None, None);
            let write = mode.write();
            let opts = SyncOptions {
                write,
                indent: eff.indent,
            };
            if let (Some(langs), false) = (eff.apply_languages.as_ref(), eff.output == "json") {
                eprintln!(
                    "{} Applying only languages from [apply].languages: {}",
                    utils::info_prefix(),
                    langs.join(", ")
                );
            }
            // The payload path is taken relative to the working directory.
            let payload_path = std::path::PathBuf::from(&payload);
            let report = match sync::run_apply(
                &eff.locales_dir,
                &payload_path,
                eff.apply_languages.as_deref(),
                &opts,
            ) {
                Ok(r) => r,
                Err(e) => fatal(&e),
            };
            output::print_sync(&report, &eff.output, write, "rules");
            if mode.check && report.would_write() {
                std::process::exit(1);
            }
        }
        Commands::Sync {
            rules,
            common,
            mode,
        } => {
            let eff = effective(&common, rules.as_deref(), None);
            let mut rule_set = match extract::load_rules(&eff.rules_source) {
                Ok(r) => r,
                Err(e) => fatal(&e),
            };
            rule_set.remove_ids(&eff.sync_ignore);
            if eff.output != "json" {
                println!("Extracted {} rules.", rule_set.len());
            }
            let write = mode.write();
            let opts = SyncOptions {
                write,
                indent: eff.indent,
            };
            let report = match sync::run_sync(&eff.locales_dir, &rule_set, &opts) {
                Ok(r) => r,
                Err(e) => fatal(&e),
            };
            output::print_sync(&report, &eff.output, write, "rules");
            if mode.check && report.would_write() {
                std::process::exit(1);
            }
        }
        Commands::Extract {
            rules,
            repo_root,
            output: out,
        } => {
            let common = CommonArgs {
                repo_root,
                locales: None,
                output: out,
            };
            let eff = effective(&common, rules.as_deref(), None);
            match extract::load_rules(&eff.rules_source) {
                Ok(r) => output::print_rules(&r, &eff.output),
                Err(e) => fatal(&e),
            }
        }
        Commands::Audit {
            reference,
            common,
            check,
        } => {
            let eff = effective(&common, None, reference.as_deref());
            let (res, errors) = match audit::run_audit(&eff.locales_dir, &eff.reference) {
                Ok(r) => r,
                Err(e) => fatal(&e),
            };
            output::print_audit(&res, &errors, &eff.output);
            if check && res.summary.missing > 0 {
                std::process::exit(1);
            }
        }
        Commands::Fill {
            reference,
            common,
            mode,
        } => {
            let eff = effective(&common, None, reference.as_deref());
            let write = mode.write();
            let opts = SyncOptions {
                write,
                indent: eff.indent,
            };
            let report = match audit::run_fill(&eff.locales_dir, &eff.reference, &opts) {
                Ok(r) => r,
                Err(e) => fatal(&e),
            };
            output::print_sync(&report, &eff.output, write, "keys");
            if mode.check && report.would_write() {
                std::process::exit(1);
            }
        }
    }
}

/// Resolve configuration or exit with status 2.
fn effective(common: &CommonArgs, rules: Option<&str>, reference: Option<&str>) -> Effective {
    let cli = CliOverrides {
        repo_root: common.repo_root.as_deref(),
        locales: common.locales.as_deref(),
        rules,
        output: common.output.as_deref(),
        reference,
    };
    match config::resolve_effective(&cli) {
        Ok(eff) => {
            if !eff.config_found && eff.output != "json" {
                eprintln!(
                    "{} No localesync.toml found; using defaults.",
                    utils::note_prefix()
                );
            }
            eff
        }
        Err(msg) => {
            eprintln!("{} invalid configuration: {}", utils::error_prefix(), msg);
            std::process::exit(2);
        }
    }
}

fn fatal(e: &LocaleError) -> ! {
    eprintln!("{} {}", utils::error_prefix(), e);
    std::process::exit(2);
}
