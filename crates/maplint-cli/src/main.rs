//! maplint CLI - detects Map values used as plain objects in TypeScript

mod analyze;

use analyze::AnalyzeArgs;
use anyhow::Result;
use clap::Parser;
use colored::*;
use maplint_analyze::checks::CheckRegistry;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "maplint")]
#[command(version)]
#[command(about = "Finds TypeScript Map values accessed like plain objects")]
struct Cli {
    /// Files or directories to analyze (default: paths from the config file)
    paths: Vec<PathBuf>,

    /// Path to config file (default: auto-detect .maplint.toml)
    #[arg(long, short = 'c', value_name = "PATH", conflicts_with = "no_config")]
    config: Option<PathBuf>,

    /// Ignore config files
    #[arg(long)]
    no_config: bool,

    /// Output format: raw, json, table, github
    #[arg(long, value_name = "FORMAT")]
    error_format: Option<String>,

    /// Write a baseline of the current issues to PATH and exit
    #[arg(long, value_name = "PATH")]
    generate_baseline: Option<PathBuf>,

    /// Suppress issues recorded in a baseline file
    #[arg(long, value_name = "PATH")]
    baseline: Option<PathBuf>,

    /// List available checks and exit
    #[arg(long)]
    list_checks: bool,

    /// Write a detailed debug log to PATH
    #[arg(long, value_name = "PATH")]
    debug_log: Option<PathBuf>,

    /// Show verbose output
    #[arg(long, short = 'v')]
    verbose: bool,
}

fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", "Error".red(), e);
            ExitCode::from(1)
        }
    }
}

fn run() -> Result<ExitCode> {
    let cli = Cli::parse();

    if cli.list_checks {
        println!("{}", "Available checks:".bold());
        for check in CheckRegistry::with_builtin_checks().all_checks() {
            println!("  {} - {}", check.id().green(), check.description());
        }
        return Ok(ExitCode::SUCCESS);
    }

    analyze::run_analyze(AnalyzeArgs {
        paths: cli.paths,
        config: cli.config,
        no_config: cli.no_config,
        error_format: cli.error_format,
        generate_baseline: cli.generate_baseline,
        baseline: cli.baseline,
        debug_log: cli.debug_log,
        verbose: cli.verbose,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_arguments() {
        let cli = Cli::try_parse_from([
            "maplint",
            "src",
            "lib/index.ts",
            "--error-format",
            "json",
            "--baseline",
            "maplint-baseline.json",
            "-v",
        ])
        .unwrap();

        assert_eq!(cli.paths, vec![PathBuf::from("src"), PathBuf::from("lib/index.ts")]);
        assert_eq!(cli.error_format.as_deref(), Some("json"));
        assert_eq!(cli.baseline, Some(PathBuf::from("maplint-baseline.json")));
        assert!(cli.verbose);
        assert!(!cli.list_checks);
    }

    #[test]
    fn test_config_conflicts_with_no_config() {
        assert!(Cli::try_parse_from(["maplint", "--config", "a.toml", "--no-config"]).is_err());
    }
}
