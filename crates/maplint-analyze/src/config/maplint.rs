//! `.maplint.toml` configuration parsing

use crate::logging;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the configuration file searched for
pub const CONFIG_FILE_NAME: &str = ".maplint.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Error pattern to ignore
///
/// Every field that is set must match for an issue to be ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct IgnoreError {
    /// Substring of the message, or a regex when wrapped in `#…#`
    pub message: Option<String>,
    /// Glob matched against the file path
    pub path: Option<String>,
    /// Exact issue identifier
    pub identifier: Option<String>,
}

impl IgnoreError {
    fn is_empty(&self) -> bool {
        self.message.is_none() && self.path.is_none() && self.identifier.is_none()
    }

    /// Why this pattern matches the issue, or `None` when it doesn't
    fn matches(&self, message: &str, path: &Path, identifier: Option<&str>) -> Option<String> {
        let mut reasons = Vec::new();

        if let Some(expected) = &self.identifier {
            if identifier != Some(expected.as_str()) {
                return None;
            }
            reasons.push(format!("identifier match: {}", expected));
        }

        if let Some(pattern) = &self.path {
            if !path_matches_glob(path, pattern) {
                return None;
            }
            reasons.push(format!("path glob: {}", pattern));
        }

        if let Some(pattern) = &self.message {
            match regex_pattern(pattern) {
                Some(expression) => {
                    let Ok(re) = regex::Regex::new(expression) else {
                        return None;
                    };
                    if !re.is_match(message) {
                        return None;
                    }
                    reasons.push(format!("regex pattern: {}", pattern));
                }
                None => {
                    if !message.contains(pattern.as_str()) {
                        return None;
                    }
                    reasons.push(format!("message contains: {}", pattern));
                }
            }
        }

        Some(reasons.join(", "))
    }
}

/// The inner expression of a `#…#` pattern
fn regex_pattern(pattern: &str) -> Option<&str> {
    pattern
        .strip_prefix('#')
        .and_then(|rest| rest.strip_suffix('#'))
        .filter(|inner| !inner.is_empty())
}

/// Match a glob against the whole path or any trailing run of its components
fn path_matches_glob(path: &Path, pattern: &str) -> bool {
    let Ok(re) = fnmatch_regex::glob_to_regex(pattern) else {
        return false;
    };
    let components: Vec<_> = path.components().collect();
    (0..components.len()).any(|start| {
        let suffix: PathBuf = components[start..].iter().collect();
        re.is_match(&suffix.to_string_lossy())
    })
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ChecksConfig {
    /// Check ids that are not run
    pub disabled: Vec<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Output format: "table", "raw", "json" or "github"
    pub format: Option<String>,
}

/// maplint configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MaplintConfig {
    /// Paths to analyze, relative to the config file
    pub paths: Vec<PathBuf>,
    /// File extensions that are analyzed
    pub extensions: Vec<String>,
    /// Directory prefixes (`name/`) or globs to skip
    pub exclude: Vec<String>,
    pub checks: ChecksConfig,
    pub ignore_errors: Vec<IgnoreError>,
    pub output: OutputConfig,
}

impl Default for MaplintConfig {
    fn default() -> Self {
        Self {
            paths: Vec::new(),
            extensions: vec!["ts".to_string(), "mts".to_string(), "cts".to_string()],
            exclude: Vec::new(),
            checks: ChecksConfig::default(),
            ignore_errors: Vec::new(),
            output: OutputConfig::default(),
        }
    }
}

impl MaplintConfig {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        logging::log_config_load(path);

        let content = fs::read_to_string(path)?;
        let mut config = Self::parse(&content)?;

        let base_dir = path.parent().unwrap_or(Path::new("."));
        config.paths = config
            .paths
            .iter()
            .map(|p| if p.is_absolute() { p.clone() } else { base_dir.join(p) })
            .collect();

        for (index, ignore) in config.ignore_errors.iter().enumerate() {
            logging::log_ignore_error_pattern(
                index,
                ignore.message.as_deref(),
                ignore.identifier.as_deref(),
                ignore.path.as_deref(),
            );
        }
        logging::log_config_summary(
            config.paths.len(),
            &config.extensions,
            config.exclude.len(),
            &config.checks.disabled,
            config.ignore_errors.len(),
        );

        Ok(config)
    }

    /// Parse and validate configuration text
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let mut config: Self = toml::from_str(content)?;

        if let Some(position) = config.ignore_errors.iter().position(IgnoreError::is_empty) {
            return Err(ConfigError::InvalidConfig(format!(
                "ignore_errors[{}] needs a message, path or identifier",
                position
            )));
        }
        if let Some(format) = &config.output.format {
            if !matches!(format.as_str(), "table" | "raw" | "json" | "github") {
                return Err(ConfigError::InvalidConfig(format!(
                    "unknown output format '{}'",
                    format
                )));
            }
        }
        for extension in &mut config.extensions {
            *extension = extension.trim_start_matches('.').to_string();
        }

        Ok(config)
    }

    /// Find `.maplint.toml` in `start_dir` or any of its parents
    pub fn find_config(start_dir: &Path) -> Option<PathBuf> {
        start_dir
            .ancestors()
            .map(|dir| dir.join(CONFIG_FILE_NAME))
            .find(|candidate| candidate.is_file())
    }

    /// Whether the file has one of the analyzed extensions
    pub fn has_analyzed_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|wanted| wanted == ext))
    }

    /// Check if a path should be excluded
    pub fn is_excluded(&self, path: &Path) -> bool {
        let path_str = path.to_string_lossy();

        for pattern in &self.exclude {
            if let Some(dir) = pattern.strip_suffix('/') {
                if path_str.contains(&format!("/{}/", dir)) || path_str.starts_with(&format!("{}/", dir)) {
                    logging::log_exclusion(path, pattern);
                    return true;
                }
                continue;
            }

            if let Ok(glob_pattern) = glob::Pattern::new(pattern) {
                let file_name_matches = path
                    .file_name()
                    .is_some_and(|name| glob_pattern.matches(&name.to_string_lossy()));
                if glob_pattern.matches(&path_str) || file_name_matches {
                    logging::log_exclusion(path, pattern);
                    return true;
                }
            }
        }
        false
    }

    /// Check if an error should be ignored
    pub fn should_ignore_error(&self, message: &str, path: &Path, line: usize, identifier: Option<&str>) -> bool {
        for ignore in &self.ignore_errors {
            if let Some(reason) = ignore.matches(message, path, identifier) {
                logging::log_error_filter(path, line, message, identifier, &reason);
                return true;
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_parse_full_config() {
        let config = MaplintConfig::parse(
            r##"
paths = ["src"]
extensions = [".ts", "mts"]
exclude = ["node_modules/", "*.d.ts"]

[checks]
disabled = ["map.objectAccess"]

[[ignore_errors]]
message = "Map values"
path = "src/legacy/*"

[[ignore_errors]]
identifier = "parse.error"

[output]
format = "json"
"##,
        )
        .unwrap();

        assert_eq!(config.paths, vec![PathBuf::from("src")]);
        assert_eq!(config.extensions, vec!["ts".to_string(), "mts".to_string()]);
        assert_eq!(config.checks.disabled, vec!["map.objectAccess".to_string()]);
        assert_eq!(config.ignore_errors.len(), 2);
        assert_eq!(config.output.format.as_deref(), Some("json"));
    }

    #[test]
    fn test_defaults() {
        let config = MaplintConfig::parse("").unwrap();
        assert!(config.paths.is_empty());
        assert_eq!(config.extensions, vec!["ts", "mts", "cts"]);
        assert!(config.checks.disabled.is_empty());
        assert!(config.output.format.is_none());
    }

    #[test]
    fn test_invalid_config() {
        assert!(matches!(
            MaplintConfig::parse("[[ignore_errors]]\n"),
            Err(ConfigError::InvalidConfig(_))
        ));
        assert!(matches!(
            MaplintConfig::parse("[output]\nformat = \"xml\"\n"),
            Err(ConfigError::InvalidConfig(_))
        ));
        assert!(matches!(
            MaplintConfig::parse("paths = 3"),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_load_resolves_paths_against_config_dir() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join(CONFIG_FILE_NAME);
        fs::write(&config_path, "paths = [\"src\"]\n").unwrap();

        let config = MaplintConfig::load(&config_path).unwrap();
        assert_eq!(config.paths, vec![temp.path().join("src")]);
    }

    #[test]
    fn test_find_config_searches_upward() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();
        fs::write(temp.path().join(CONFIG_FILE_NAME), "").unwrap();

        assert_eq!(
            MaplintConfig::find_config(&nested),
            Some(temp.path().join(CONFIG_FILE_NAME))
        );
    }

    #[test]
    fn test_exclusions_and_extensions() {
        let config = MaplintConfig::parse("exclude = [\"node_modules/\", \"*.d.ts\"]").unwrap();
        assert!(config.is_excluded(Path::new("/repo/node_modules/pkg/index.ts")));
        assert!(config.is_excluded(Path::new("src/types.d.ts")));
        assert!(!config.is_excluded(Path::new("src/index.ts")));

        assert!(config.has_analyzed_extension(Path::new("src/index.ts")));
        assert!(config.has_analyzed_extension(Path::new("src/index.mts")));
        assert!(!config.has_analyzed_extension(Path::new("src/view.tsx")));
        assert!(!config.has_analyzed_extension(Path::new("README")));
    }

    #[test]
    fn test_should_ignore_error() {
        let config = MaplintConfig::parse(
            r##"
[[ignore_errors]]
message = "Map values"
path = "src/legacy/*"

[[ignore_errors]]
message = "#^Syntax error: unexpected \\S+#"

[[ignore_errors]]
identifier = "custom.check"
"##,
        )
        .unwrap();

        let legacy = Path::new("/repo/src/legacy/cache.ts");
        let current = Path::new("/repo/src/cache.ts");

        assert!(config.should_ignore_error("Map values must be ...", legacy, 1, Some("map.objectAccess")));
        assert!(!config.should_ignore_error("Map values must be ...", current, 1, Some("map.objectAccess")));
        assert!(config.should_ignore_error("Syntax error: unexpected '}'", current, 3, Some("parse.error")));
        assert!(config.should_ignore_error("anything", current, 1, Some("custom.check")));
        assert!(!config.should_ignore_error("anything", current, 1, None));
    }
}
