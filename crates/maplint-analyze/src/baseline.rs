//! Baseline support for gradual adoption
//!
//! A baseline records the issues a codebase already has, grouped by file
//! and message, so only new issues are reported.

use crate::issue::IssueCollection;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BaselineError {
    #[error("Failed to access baseline file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Invalid baseline JSON: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// A baseline entry representing tolerated issues
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaselineEntry {
    pub message: String,
    pub count: usize,
    /// File path as reported; empty matches any file
    #[serde(default)]
    pub path: String,
}

/// Baseline file structure
#[derive(Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Baseline {
    #[serde(default)]
    pub entries: Vec<BaselineEntry>,
}

impl Baseline {
    /// Create a new empty baseline
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a baseline from a JSON file
    pub fn load(path: &Path) -> Result<Self, BaselineError> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Generate a baseline from a collection of issues
    ///
    /// Entries are ordered by path, then message.
    pub fn generate(issues: &IssueCollection) -> Self {
        let mut grouped: BTreeMap<(String, String), usize> = BTreeMap::new();

        for issue in issues.issues() {
            let key = (issue.file.display().to_string(), issue.message.clone());
            *grouped.entry(key).or_insert(0) += 1;
        }

        let entries = grouped
            .into_iter()
            .map(|((path, message), count)| BaselineEntry {
                message,
                count,
                path,
            })
            .collect();

        Baseline { entries }
    }

    /// Save baseline to a file as pretty-printed JSON
    pub fn save(&self, path: &Path) -> Result<(), BaselineError> {
        let mut content = serde_json::to_string_pretty(self)?;
        content.push('\n');
        fs::write(path, content)?;
        Ok(())
    }

    /// Drop issues covered by the baseline
    ///
    /// Each entry suppresses at most `count` issues; entries with an empty
    /// path apply to any file.
    pub fn filter(&self, issues: IssueCollection) -> IssueCollection {
        let mut remaining: BTreeMap<(String, String), usize> = BTreeMap::new();
        for entry in &self.entries {
            *remaining
                .entry((entry.path.clone(), entry.message.clone()))
                .or_insert(0) += entry.count;
        }

        let mut filtered = IssueCollection::new();

        for issue in issues.into_issues() {
            let exact = (issue.file.display().to_string(), issue.message.clone());
            let any_file = (String::new(), issue.message.clone());

            let covered = [exact, any_file].into_iter().any(|key| match remaining.get_mut(&key) {
                Some(count) if *count > 0 => {
                    *count -= 1;
                    true
                }
                _ => false,
            });

            if !covered {
                filtered.add(issue);
            }
        }

        filtered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issue::Issue;
    use std::path::PathBuf;
    use tempfile::TempDir;

    fn issue(file: &str, message: &str, line: usize) -> Issue {
        Issue::error("map.objectAccess", message, PathBuf::from(file), line, 1)
    }

    #[test]
    fn test_generate_baseline() {
        let mut issues = IssueCollection::new();
        issues.add(issue("src/b.ts", "Error 1", 10));
        issues.add(issue("src/b.ts", "Error 1", 20));
        issues.add(issue("src/a.ts", "Error 2", 5));

        let baseline = Baseline::generate(&issues);
        assert_eq!(baseline.entries.len(), 2);
        assert_eq!(baseline.entries[0].path, "src/a.ts");
        assert_eq!(baseline.entries[1].count, 2);
    }

    #[test]
    fn test_filter_baseline() {
        let baseline = Baseline {
            entries: vec![BaselineEntry {
                message: "Error 1".to_string(),
                count: 1,
                path: "src/a.ts".to_string(),
            }],
        };

        let mut issues = IssueCollection::new();
        issues.add(issue("src/a.ts", "Error 1", 10));
        issues.add(issue("src/a.ts", "Error 1", 12));
        issues.add(issue("src/a.ts", "Error 2", 20));

        let filtered = baseline.filter(issues);
        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered.issues()[0].line, 12);
        assert_eq!(filtered.issues()[1].message, "Error 2");
    }

    #[test]
    fn test_entry_without_path_matches_any_file() {
        let baseline: Baseline =
            serde_json::from_str(r#"{"entries": [{"message": "Error 1", "count": 2}]}"#).unwrap();

        let mut issues = IssueCollection::new();
        issues.add(issue("src/a.ts", "Error 1", 1));
        issues.add(issue("src/b.ts", "Error 1", 1));
        issues.add(issue("src/c.ts", "Error 1", 1));

        assert_eq!(baseline.filter(issues).len(), 1);
    }

    #[test]
    fn test_save_and_load() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("maplint-baseline.json");

        let mut issues = IssueCollection::new();
        issues.add(issue("src/a.ts", "Error 1", 1));
        let baseline = Baseline::generate(&issues);
        baseline.save(&path).unwrap();

        assert_eq!(Baseline::load(&path).unwrap(), baseline);
    }

    #[test]
    fn test_load_rejects_invalid_json() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("baseline.json");
        fs::write(&path, "parameters:\n").unwrap();
        assert!(matches!(Baseline::load(&path), Err(BaselineError::JsonError(_))));
    }
}
