//! maplint-analyze: detects Map values used as plain objects in TypeScript
//!
//! This crate provides:
//!
//! - A small type model with a per-file symbol table and block scopes
//! - An expression resolver that infers types from annotations and initializers
//! - The `map.objectAccess` check
//! - `.maplint.toml` configuration with ignore rules
//! - Multiple output formats (raw, json, table, github)
//! - Baseline support for gradual adoption
//!
//! # Example
//!
//! ```no_run
//! use maplint_analyze::{Analyzer, config::MaplintConfig, output::OutputFormat};
//! use std::path::Path;
//!
//! let config = MaplintConfig::load(Path::new(".maplint.toml")).unwrap();
//! let analyzer = Analyzer::new(config);
//!
//! let issues = analyzer.analyze_paths(&[Path::new("src/")]).unwrap();
//!
//! let output = maplint_analyze::output::format_issues(&issues, OutputFormat::Table);
//! println!("{}", output);
//! ```

pub mod baseline;
pub mod checks;
pub mod config;
pub mod issue;
pub mod logging;
pub mod output;
pub mod resolver;
pub mod scope;
pub mod symbols;
pub mod types;

use checks::{CheckContext, CheckRegistry};
use config::MaplintConfig;
use issue::{Issue, IssueCollection};
use maplint_syntax::{parse_file_content, LineIndex};
use rayon::prelude::*;
use resolver::{NodeScopeResolver, SymbolCollector};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Check id used for syntax errors
pub const PARSE_ERROR_ID: &str = "parse.error";

/// Main analyzer that runs the enabled checks over TypeScript sources
pub struct Analyzer {
    config: MaplintConfig,
    registry: CheckRegistry,
}

impl Analyzer {
    /// Create a new analyzer with the given configuration
    pub fn new(config: MaplintConfig) -> Self {
        let registry = CheckRegistry::with_builtin_checks();
        Self { config, registry }
    }

    /// Create analyzer with default configuration
    pub fn with_defaults() -> Self {
        Self::new(MaplintConfig::default())
    }

    /// Get the current configuration
    pub fn config(&self) -> &MaplintConfig {
        &self.config
    }

    /// Registered checks, including disabled ones
    pub fn registry(&self) -> &CheckRegistry {
        &self.registry
    }

    /// Analyze a single file
    pub fn analyze_file(&self, path: &Path) -> Result<IssueCollection, AnalyzeError> {
        let source = fs::read_to_string(path)?;
        self.analyze_source(path, &source)
    }

    /// Analyze source code with a given path
    pub fn analyze_source(&self, path: &Path, source: &str) -> Result<IssueCollection, AnalyzeError> {
        Ok(self.analyze_source_counted(path, source).0)
    }

    /// Issues that survive the ignore rules, plus how many were dropped
    fn analyze_source_counted(&self, path: &Path, source: &str) -> (IssueCollection, usize) {
        let arena = bumpalo::Bump::new();
        let (program, parse_error) = parse_file_content(&arena, source);
        let line_index = LineIndex::new(source);

        let mut issues = IssueCollection::new();

        // Statements before the error are still checked
        if let Some(error) = parse_error {
            let position = line_index.position(source, error.span().start_offset());
            issues.add(
                Issue::error(
                    PARSE_ERROR_ID,
                    error.to_string(),
                    path.to_path_buf(),
                    position.line,
                    position.column,
                )
                .with_identifier(PARSE_ERROR_ID),
            );
        }

        let symbols = SymbolCollector::new().collect(program);
        let checks = self.registry.enabled_checks(&self.config.checks.disabled);
        if !checks.is_empty() {
            let ctx = CheckContext::new(path, source, &line_index);
            issues.extend(NodeScopeResolver::new(&symbols, &checks, &ctx).analyze(program));
        }

        let filtered = issues.retain(|issue| {
            !self.config.should_ignore_error(
                &issue.message,
                &issue.file,
                issue.line,
                issue.identifier.as_deref(),
            )
        });
        issues.sort();

        (issues, filtered)
    }

    /// Expand directories into the analyzable files below them
    ///
    /// Explicitly named files are kept as given.
    pub fn collect_files(&self, paths: &[&Path]) -> Vec<PathBuf> {
        let mut files = Vec::new();

        for path in paths {
            if path.is_file() {
                files.push(path.to_path_buf());
            } else if path.is_dir() {
                for entry in WalkDir::new(path)
                    .follow_links(true)
                    .sort_by_file_name()
                    .into_iter()
                    .filter_map(|e| e.ok())
                {
                    let entry_path = entry.path();
                    if entry_path.is_file()
                        && self.config.has_analyzed_extension(entry_path)
                        && !self.config.is_excluded(entry_path)
                    {
                        files.push(entry_path.to_path_buf());
                    }
                }
            } else {
                logging::log_file_failure(path, "path does not exist");
            }
        }

        files
    }

    /// Analyze multiple paths (files or directories)
    pub fn analyze_paths(&self, paths: &[&Path]) -> Result<IssueCollection, AnalyzeError> {
        let files = self.collect_files(paths);
        logging::log_analysis_start(files.len());

        let results: Vec<_> = files
            .par_iter()
            .map(|file| {
                let source = fs::read_to_string(file)?;
                Ok::<_, std::io::Error>(self.analyze_source_counted(file, &source))
            })
            .collect();

        let mut combined = IssueCollection::new();
        let mut filtered_total = 0;
        for (file, result) in files.iter().zip(results) {
            match result {
                Ok((issues, filtered)) => {
                    filtered_total += filtered;
                    combined.extend(issues);
                }
                Err(e) => {
                    logging::log_file_failure(file, &e.to_string());
                    eprintln!("Warning: {}: {}", file.display(), e);
                }
            }
        }

        combined.sort();
        logging::log_analysis_complete(combined.len() + filtered_total, filtered_total);
        Ok(combined)
    }

    /// Analyze paths specified in the configuration
    pub fn analyze_configured_paths(&self) -> Result<IssueCollection, AnalyzeError> {
        let paths: Vec<_> = self.config.paths.iter().map(|p| p.as_path()).collect();
        if paths.is_empty() {
            return Err(AnalyzeError::NoPathsConfigured);
        }
        self.analyze_paths(&paths)
    }
}

/// Errors that can occur during analysis
#[derive(Debug, thiserror::Error)]
pub enum AnalyzeError {
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("No paths configured for analysis")]
    NoPathsConfigured,

    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::map_access::MESSAGE_ID;

    fn analyze(analyzer: &Analyzer, source: &str) -> IssueCollection {
        analyzer.analyze_source(Path::new("test.ts"), source).unwrap()
    }

    #[test]
    fn test_analyzer_creation() {
        let analyzer = Analyzer::with_defaults();
        assert!(analyzer.config().checks.disabled.is_empty());
        assert_eq!(analyzer.registry().all_checks().len(), 1);
    }

    #[test]
    fn test_analyze_clean_source() {
        let analyzer = Analyzer::with_defaults();
        let issues = analyze(&analyzer, "const m = new Map<string, number>();\nm.set(\"a\", 1);\n");
        assert!(issues.is_empty());
    }

    #[test]
    fn test_analyze_reports_map_access() {
        let analyzer = Analyzer::with_defaults();
        let issues = analyze(&analyzer, "const m = new Map();\nconst v = m[\"a\"];\n");
        assert_eq!(issues.len(), 1);
        let issue = &issues.issues()[0];
        assert_eq!(issue.check_id, MESSAGE_ID);
        assert_eq!((issue.line, issue.column), (2, 11));
        assert_eq!(issue.file, PathBuf::from("test.ts"));
    }

    #[test]
    fn test_parse_error_keeps_earlier_statements() {
        let analyzer = Analyzer::with_defaults();
        let issues = analyze(&analyzer, "const m = new Map();\nm[\"a\"] = 1;\nconst = ;\n");

        assert_eq!(issues.len(), 2);
        assert_eq!(issues.issues()[0].line, 2);
        assert_eq!(issues.issues()[0].check_id, MESSAGE_ID);
        assert_eq!(issues.issues()[1].line, 3);
        assert_eq!(issues.issues()[1].check_id, PARSE_ERROR_ID);
        assert!(issues.issues()[1].message.starts_with("Syntax error"));
    }

    #[test]
    fn test_deeply_nested_source_is_a_parse_error() {
        let analyzer = Analyzer::with_defaults();
        let source = format!(
            "const m = new Map();\nm[\"a\"] = 1;\nconst x = {}1{};\n",
            "[".repeat(5000),
            "]".repeat(5000)
        );
        let issues = analyze(&analyzer, &source);

        assert_eq!(issues.len(), 2);
        assert_eq!(issues.issues()[0].check_id, MESSAGE_ID);
        assert_eq!(issues.issues()[1].check_id, PARSE_ERROR_ID);
        assert_eq!(issues.issues()[1].line, 3);
        assert!(issues.issues()[1].message.contains("nesting"));
    }

    #[test]
    fn test_disabled_check_is_not_run() {
        let config = MaplintConfig::parse("[checks]\ndisabled = [\"map.objectAccess\"]\n").unwrap();
        let analyzer = Analyzer::new(config);
        assert!(analyze(&analyzer, "const m = new Map();\nm[\"a\"] = 1;\n").is_empty());
    }

    #[test]
    fn test_ignore_rules_filter_issues() {
        let config = MaplintConfig::parse("[[ignore_errors]]\npath = \"*.ts\"\nidentifier = \"map.objectAccess\"\n").unwrap();
        let analyzer = Analyzer::new(config);
        let issues = analyze(&analyzer, "const m = new Map();\nm[\"a\"] = 1;\nconst = ;\n");
        assert_eq!(issues.len(), 1);
        assert_eq!(issues.issues()[0].check_id, PARSE_ERROR_ID);
    }

    #[test]
    fn test_no_configured_paths() {
        let analyzer = Analyzer::with_defaults();
        assert!(matches!(
            analyzer.analyze_configured_paths(),
            Err(AnalyzeError::NoPathsConfigured)
        ));
    }
}
