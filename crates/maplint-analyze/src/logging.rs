//! Logging module for maplint-analyze
//!
//! Optional debug log of configuration loading, path exclusion, error
//! filtering and analysis progress. Nothing is written until
//! `init_logger` has been called.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Global logger instance
static LOGGER: Mutex<Option<AnalyzeLogger>> = Mutex::new(None);

/// Logger for analyze operations
pub struct AnalyzeLogger {
    file: File,
    path: PathBuf,
}

impl AnalyzeLogger {
    /// Create a new logger writing to the specified path
    pub fn new(log_path: &Path) -> std::io::Result<Self> {
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(log_path)?;

        Ok(Self {
            file,
            path: log_path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write a log message
    pub fn log(&mut self, message: &str) {
        let timestamp = chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f");
        let _ = writeln!(self.file, "[{}] {}", timestamp, message);
        let _ = self.file.flush();
    }

    /// Log a section header
    pub fn section(&mut self, title: &str) {
        let separator = "=".repeat(60);
        self.log(&separator);
        self.log(title);
        self.log(&separator);
    }

    /// Log a subsection
    pub fn subsection(&mut self, title: &str) {
        let separator = "-".repeat(40);
        self.log(&separator);
        self.log(title);
        self.log(&separator);
    }
}

/// Initialize the global logger
///
/// Without an explicit path the log goes to a timestamped file in the
/// system temp directory.
pub fn init_logger(log_path: Option<&Path>) -> std::io::Result<PathBuf> {
    let path = log_path.map(|p| p.to_path_buf()).unwrap_or_else(|| {
        let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        std::env::temp_dir().join(format!("maplint-{}.log", timestamp))
    });

    let logger = AnalyzeLogger::new(&path)?;

    if let Ok(mut guard) = LOGGER.lock() {
        *guard = Some(logger);
    }

    Ok(path)
}

/// Log a message to the global logger
pub fn log(message: &str) {
    if let Ok(mut guard) = LOGGER.lock() {
        if let Some(ref mut logger) = *guard {
            logger.log(message);
        }
    }
}

/// Log a section header
pub fn section(title: &str) {
    if let Ok(mut guard) = LOGGER.lock() {
        if let Some(ref mut logger) = *guard {
            logger.section(title);
        }
    }
}

/// Log a subsection
pub fn subsection(title: &str) {
    if let Ok(mut guard) = LOGGER.lock() {
        if let Some(ref mut logger) = *guard {
            logger.subsection(title);
        }
    }
}

/// Check if logging is enabled
pub fn is_enabled() -> bool {
    LOGGER.lock().map(|guard| guard.is_some()).unwrap_or(false)
}

/// Log configuration loading
pub fn log_config_load(path: &Path) {
    section("CONFIGURATION LOADING");
    log(&format!("Loading config from: {}", path.display()));
}

/// Log individual ignore error pattern
pub fn log_ignore_error_pattern(index: usize, message: Option<&str>, identifier: Option<&str>, path: Option<&str>) {
    let mut pattern_info = format!("  [{}] message: {}", index, message.unwrap_or("*"));
    if let Some(id) = identifier {
        pattern_info.push_str(&format!(", identifier: {}", id));
    }
    if let Some(p) = path {
        pattern_info.push_str(&format!(", path: {}", p));
    }
    log(&pattern_info);
}

/// Log summary of configuration
pub fn log_config_summary(
    paths_count: usize,
    extensions: &[String],
    exclude_count: usize,
    disabled_checks: &[String],
    ignore_errors_count: usize,
) {
    section("CONFIGURATION SUMMARY");
    log(&format!("Paths to analyze: {}", paths_count));
    log(&format!("Extensions: {}", extensions.join(", ")));
    log(&format!("Exclude patterns: {}", exclude_count));
    if disabled_checks.is_empty() {
        log("Disabled checks: none");
    } else {
        log(&format!("Disabled checks: {}", disabled_checks.join(", ")));
    }
    log(&format!("Ignore error patterns: {}", ignore_errors_count));
}

/// Log a path skipped by an exclude pattern
pub fn log_exclusion(path: &Path, pattern: &str) {
    log(&format!("EXCLUDED: {} (matched: {})", path.display(), pattern));
}

/// Log error filtering decision
pub fn log_error_filter(file: &Path, line: usize, message: &str, identifier: Option<&str>, reason: &str) {
    log(&format!("FILTERED: {}:{} - {}", file.display(), line, message));
    if let Some(id) = identifier {
        log(&format!("  Identifier: {}", id));
    }
    log(&format!("  Matched by: {}", reason));
}

/// Log a file that could not be read or parsed
pub fn log_file_failure(file: &Path, error: &str) {
    log(&format!("FAILED: {} - {}", file.display(), error));
}

/// Log analysis start
pub fn log_analysis_start(files_count: usize) {
    section("ANALYSIS START");
    log(&format!("Analyzing {} files", files_count));
}

/// Log analysis complete
pub fn log_analysis_complete(total_errors: usize, filtered_errors: usize) {
    section("ANALYSIS COMPLETE");
    log(&format!("Total errors found: {}", total_errors));
    log(&format!("Errors filtered by ignore patterns: {}", filtered_errors));
    log(&format!(
        "Errors reported: {}",
        total_errors.saturating_sub(filtered_errors)
    ));
}
