//! Running an analysis from command line arguments

use anyhow::{Context, Result};
use colored::*;
use maplint_analyze::{
    baseline::Baseline,
    config::MaplintConfig,
    logging,
    output::{format_issues, OutputFormat},
    Analyzer,
};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Options for one analysis run
pub struct AnalyzeArgs {
    /// Paths to analyze; falls back to the configured paths
    pub paths: Vec<PathBuf>,
    /// Explicit config file
    pub config: Option<PathBuf>,
    /// Ignore config files
    pub no_config: bool,
    /// Output format: raw, json, table, github
    pub error_format: Option<String>,
    pub generate_baseline: Option<PathBuf>,
    pub baseline: Option<PathBuf>,
    /// Debug log file path (enables detailed logging)
    pub debug_log: Option<PathBuf>,
    pub verbose: bool,
}

/// Run the analysis and print the report
pub fn run_analyze(args: AnalyzeArgs) -> Result<ExitCode> {
    if let Some(log_path) = &args.debug_log {
        match logging::init_logger(Some(log_path)) {
            Ok(path) => {
                if args.verbose {
                    eprintln!("{}: Debug log writing to {}", "Debug".bold(), path.display());
                }
            }
            Err(e) => {
                eprintln!("{}: Failed to initialize debug log: {}", "Warning".yellow(), e);
            }
        }
    }

    let current_dir = std::env::current_dir().context("Failed to determine current directory")?;
    let config = load_config(&args, &current_dir)?;
    let format = output_format(args.error_format.as_deref(), &config)?;

    let analyzer = Analyzer::new(config);

    let paths_to_analyze: Vec<&Path> = if args.paths.is_empty() {
        analyzer.config().paths.iter().map(|p| p.as_path()).collect()
    } else {
        args.paths.iter().map(|p| p.as_path()).collect()
    };

    if paths_to_analyze.is_empty() {
        eprintln!("{}: No paths specified for analysis", "Error".red());
        eprintln!("Specify paths on the command line or in .maplint.toml");
        return Ok(ExitCode::from(1));
    }

    for path in &paths_to_analyze {
        if !path.exists() {
            eprintln!("{}: Path does not exist: {}", "Warning".yellow(), path.display());
        }
    }

    if args.verbose {
        eprintln!(
            "{}: {}",
            "Analyzing".bold(),
            paths_to_analyze
                .iter()
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(", ")
        );
    }

    let mut issues = analyzer.analyze_paths(&paths_to_analyze)?;

    if let Some(baseline_output) = &args.generate_baseline {
        let baseline = Baseline::generate(&issues);
        baseline
            .save(baseline_output)
            .with_context(|| format!("Failed to write baseline {}", baseline_output.display()))?;
        eprintln!(
            "{}: Generated baseline with {} entries to {}",
            "Done".green(),
            baseline.entries.len(),
            baseline_output.display()
        );
        return Ok(ExitCode::SUCCESS);
    }

    if let Some(baseline_path) = &args.baseline {
        if baseline_path.exists() {
            let baseline = Baseline::load(baseline_path)
                .with_context(|| format!("Failed to load baseline {}", baseline_path.display()))?;
            let before = issues.len();
            issues = baseline.filter(issues);
            if args.verbose {
                eprintln!(
                    "{}: Baseline {} suppressed {} issues",
                    "Info".bold(),
                    baseline_path.display(),
                    before - issues.len()
                );
            }
        } else {
            eprintln!("{}: Baseline file not found: {}", "Warning".yellow(), baseline_path.display());
        }
    }

    print!("{}", format_issues(&issues, format));

    if args.verbose {
        eprintln!(
            "{}: {} issues in {} files",
            "Summary".bold(),
            issues.len(),
            issues.file_count()
        );
    }

    if issues.error_count() > 0 {
        Ok(ExitCode::from(1))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

/// Resolve the configuration from flags or by searching upward from `current_dir`
fn load_config(args: &AnalyzeArgs, current_dir: &Path) -> Result<MaplintConfig> {
    if args.no_config {
        if args.verbose {
            eprintln!("{}: Ignoring config files (--no-config)", "Info".bold());
        }
        return Ok(MaplintConfig::default());
    }

    if let Some(config_path) = &args.config {
        if !config_path.exists() {
            anyhow::bail!("Configuration file not found: {}", config_path.display());
        }
        return MaplintConfig::load(config_path)
            .with_context(|| format!("Failed to load {}", config_path.display()));
    }

    if let Some(config_path) = MaplintConfig::find_config(current_dir) {
        if args.verbose {
            eprintln!("{}: {}", "Using config".bold(), config_path.display());
        }
        return MaplintConfig::load(&config_path)
            .with_context(|| format!("Failed to load {}", config_path.display()));
    }

    Ok(MaplintConfig::default())
}

/// The command line format wins over the configured one
fn output_format(flag: Option<&str>, config: &MaplintConfig) -> Result<OutputFormat> {
    match flag.or(config.output.format.as_deref()) {
        Some(name) => name
            .parse()
            .map_err(|e: String| anyhow::anyhow!("{}. Valid options: raw, json, table, github", e)),
        None => Ok(OutputFormat::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maplint_analyze::config::CONFIG_FILE_NAME;
    use std::fs;
    use tempfile::TempDir;

    fn args() -> AnalyzeArgs {
        AnalyzeArgs {
            paths: Vec::new(),
            config: None,
            no_config: false,
            error_format: None,
            generate_baseline: None,
            baseline: None,
            debug_log: None,
            verbose: false,
        }
    }

    #[test]
    fn test_output_format_precedence() {
        let config = MaplintConfig::parse("[output]\nformat = \"github\"\n").unwrap();
        assert_eq!(output_format(None, &config).unwrap(), OutputFormat::Github);
        assert_eq!(output_format(Some("raw"), &config).unwrap(), OutputFormat::Raw);
        assert_eq!(output_format(None, &MaplintConfig::default()).unwrap(), OutputFormat::Table);
        assert!(output_format(Some("xml"), &config).is_err());
    }

    #[test]
    fn test_load_config_discovers_file() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join(CONFIG_FILE_NAME), "paths = [\"src\"]\n").unwrap();
        let nested = temp.path().join("src");
        fs::create_dir_all(&nested).unwrap();

        let config = load_config(&args(), &nested).unwrap();
        assert_eq!(config.paths, vec![temp.path().join("src")]);

        let ignored = load_config(&AnalyzeArgs { no_config: true, ..args() }, &nested).unwrap();
        assert!(ignored.paths.is_empty());
    }

    #[test]
    fn test_load_config_missing_explicit_file() {
        let temp = TempDir::new().unwrap();
        let missing = AnalyzeArgs {
            config: Some(temp.path().join("missing.toml")),
            ..args()
        };
        assert!(load_config(&missing, temp.path()).is_err());
    }

    #[test]
    fn test_load_config_reports_invalid_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "[output]\nformat = \"xml\"\n").unwrap();

        let error = load_config(&AnalyzeArgs { config: Some(path), ..args() }, temp.path()).unwrap_err();
        assert!(format!("{:#}", error).contains("unknown output format"));
    }
}
