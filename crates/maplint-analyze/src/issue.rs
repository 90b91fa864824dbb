//! Issues reported by checks and by the analyzer itself

use std::path::PathBuf;

/// Severity level for issues
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    /// Must be fixed; makes the run fail
    Error,
    /// Reported but does not affect the exit status
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// A single issue found during analysis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    /// The check that found this issue (e.g. "map.objectAccess", "parse.error")
    pub check_id: String,
    pub severity: Severity,
    /// Human-readable message
    pub message: String,
    pub file: PathBuf,
    /// Line number (1-based)
    pub line: usize,
    /// Column number (1-based, in characters)
    pub column: usize,
    /// Stable identifier used by ignore rules
    pub identifier: Option<String>,
    /// Optional hint for fixing the issue
    pub tip: Option<String>,
}

impl Issue {
    /// Create a new error issue
    pub fn error(
        check_id: impl Into<String>,
        message: impl Into<String>,
        file: PathBuf,
        line: usize,
        column: usize,
    ) -> Self {
        Self::new(Severity::Error, check_id, message, file, line, column)
    }

    /// Create a new warning issue
    pub fn warning(
        check_id: impl Into<String>,
        message: impl Into<String>,
        file: PathBuf,
        line: usize,
        column: usize,
    ) -> Self {
        Self::new(Severity::Warning, check_id, message, file, line, column)
    }

    fn new(
        severity: Severity,
        check_id: impl Into<String>,
        message: impl Into<String>,
        file: PathBuf,
        line: usize,
        column: usize,
    ) -> Self {
        Self {
            check_id: check_id.into(),
            severity,
            message: message.into(),
            file,
            line,
            column,
            identifier: None,
            tip: None,
        }
    }

    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }

    pub fn with_tip(mut self, tip: impl Into<String>) -> Self {
        self.tip = Some(tip.into());
        self
    }
}

/// Collection of issues from analysis
#[derive(Debug, Default)]
pub struct IssueCollection {
    issues: Vec<Issue>,
}

impl IssueCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, issue: Issue) {
        self.issues.push(issue);
    }

    pub fn extend(&mut self, issues: impl IntoIterator<Item = Issue>) {
        self.issues.extend(issues);
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    pub fn into_issues(self) -> Vec<Issue> {
        self.issues
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Keep only the issues matching `keep`; returns how many were dropped
    pub fn retain(&mut self, mut keep: impl FnMut(&Issue) -> bool) -> usize {
        let before = self.issues.len();
        self.issues.retain(|issue| keep(issue));
        before - self.issues.len()
    }

    pub fn error_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Error)
            .count()
    }

    pub fn warning_count(&self) -> usize {
        self.issues
            .iter()
            .filter(|i| i.severity == Severity::Warning)
            .count()
    }

    /// Number of distinct files with at least one issue
    pub fn file_count(&self) -> usize {
        let mut files: Vec<_> = self.issues.iter().map(|i| &i.file).collect();
        files.sort();
        files.dedup();
        files.len()
    }

    /// Sort issues by file, then line, then column, then message
    pub fn sort(&mut self) {
        self.issues.sort_by(|a, b| {
            a.file
                .cmp(&b.file)
                .then_with(|| a.line.cmp(&b.line))
                .then_with(|| a.column.cmp(&b.column))
                .then_with(|| a.message.cmp(&b.message))
        });
    }
}

impl IntoIterator for IssueCollection {
    type Item = Issue;
    type IntoIter = std::vec::IntoIter<Issue>;

    fn into_iter(self) -> Self::IntoIter {
        self.issues.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_issue_creation() {
        let issue = Issue::error(
            "map.objectAccess",
            "Map values must be accessed through the Map API",
            PathBuf::from("/src/cache.ts"),
            10,
            5,
        )
        .with_identifier("map.objectAccess")
        .with_tip("Use .get() instead");

        assert_eq!(issue.check_id, "map.objectAccess");
        assert_eq!(issue.severity, Severity::Error);
        assert_eq!(issue.line, 10);
        assert_eq!(issue.identifier, Some("map.objectAccess".to_string()));
    }

    #[test]
    fn test_issue_collection() {
        let mut collection = IssueCollection::new();
        collection.add(Issue::error("test", "Error 1", PathBuf::from("/a.ts"), 1, 1));
        collection.add(Issue::warning("test", "Warning 1", PathBuf::from("/b.ts"), 2, 1));

        assert_eq!(collection.len(), 2);
        assert_eq!(collection.error_count(), 1);
        assert_eq!(collection.warning_count(), 1);
        assert_eq!(collection.file_count(), 2);
    }

    #[test]
    fn test_sort_and_retain() {
        let mut collection = IssueCollection::new();
        collection.add(Issue::error("test", "later", PathBuf::from("/a.ts"), 3, 1));
        collection.add(Issue::error("test", "first", PathBuf::from("/a.ts"), 1, 7));
        collection.add(Issue::error("test", "other", PathBuf::from("/0.ts"), 9, 1));
        collection.sort();

        let messages: Vec<_> = collection.issues().iter().map(|i| i.message.as_str()).collect();
        assert_eq!(messages, vec!["other", "first", "later"]);

        let dropped = collection.retain(|issue| issue.line != 1);
        assert_eq!(dropped, 1);
        assert_eq!(collection.len(), 2);
    }
}
