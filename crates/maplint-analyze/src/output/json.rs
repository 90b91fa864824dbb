//! JSON output format

use super::Formatter;
use crate::issue::{Issue, IssueCollection, Severity};
use serde::Serialize;
use std::collections::BTreeMap;

pub struct JsonFormatter;

#[derive(Serialize)]
struct JsonOutput {
    totals: Totals,
    files: BTreeMap<String, FileErrors>,
}

#[derive(Serialize)]
struct Totals {
    errors: usize,
    warnings: usize,
    file_errors: usize,
}

#[derive(Serialize)]
struct FileErrors {
    errors: usize,
    messages: Vec<FileMessage>,
}

#[derive(Serialize)]
struct FileMessage {
    message: String,
    line: usize,
    column: usize,
    severity: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    identifier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tip: Option<String>,
}

impl From<&Issue> for FileMessage {
    fn from(issue: &Issue) -> Self {
        FileMessage {
            message: issue.message.clone(),
            line: issue.line,
            column: issue.column,
            severity: issue.severity.to_string(),
            identifier: issue.identifier.clone(),
            tip: issue.tip.clone(),
        }
    }
}

impl Formatter for JsonFormatter {
    fn format(&self, issues: &IssueCollection) -> String {
        let mut files: BTreeMap<String, FileErrors> = BTreeMap::new();

        for issue in issues.issues() {
            let entry = files
                .entry(issue.file.display().to_string())
                .or_insert_with(|| FileErrors {
                    errors: 0,
                    messages: Vec::new(),
                });
            if issue.severity == Severity::Error {
                entry.errors += 1;
            }
            entry.messages.push(FileMessage::from(issue));
        }

        let output = JsonOutput {
            totals: Totals {
                errors: issues.error_count(),
                warnings: issues.warning_count(),
                file_errors: files.len(),
            },
            files,
        };

        serde_json::to_string_pretty(&output).unwrap_or_else(|_| "{}".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_json_format() {
        let mut issues = IssueCollection::new();
        issues.add(
            Issue::error("map.objectAccess", "Map misuse", PathBuf::from("src/cache.ts"), 10, 5)
                .with_identifier("map.objectAccess")
                .with_tip("Use get()"),
        );
        issues.add(Issue::warning("parse.error", "Odd", PathBuf::from("src/cache.ts"), 12, 1));

        let output = JsonFormatter.format(&issues);
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["totals"]["errors"], 1);
        assert_eq!(value["totals"]["warnings"], 1);
        assert_eq!(value["totals"]["file_errors"], 1);

        let file = &value["files"]["src/cache.ts"];
        assert_eq!(file["errors"], 1);
        assert_eq!(file["messages"][0]["column"], 5);
        assert_eq!(file["messages"][0]["identifier"], "map.objectAccess");
        assert_eq!(file["messages"][0]["tip"], "Use get()");
        assert!(file["messages"][1].get("tip").is_none());
    }

    #[test]
    fn test_json_empty() {
        let output = JsonFormatter.format(&IssueCollection::new());
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["totals"]["errors"], 0);
        assert!(value["files"].as_object().unwrap().is_empty());
    }
}
