//! Table output format (default, human-readable)

use super::Formatter;
use crate::issue::{Issue, IssueCollection, Severity};
use std::collections::BTreeMap;

pub struct TableFormatter;

fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

impl Formatter for TableFormatter {
    fn format(&self, issues: &IssueCollection) -> String {
        if issues.is_empty() {
            return " [OK] No errors\n".to_string();
        }

        let mut output = String::new();

        let mut files: BTreeMap<String, Vec<&Issue>> = BTreeMap::new();
        for issue in issues.issues() {
            files.entry(issue.file.display().to_string()).or_default().push(issue);
        }

        for (file_path, file_issues) in files {
            output.push_str(&format!("\n -- {} --\n\n", file_path));

            for issue in file_issues {
                let severity_marker = match issue.severity {
                    Severity::Error => "ERROR",
                    Severity::Warning => "WARNING",
                };

                output.push_str(&format!(
                    " {} {}:{}  {}\n",
                    severity_marker, issue.line, issue.column, issue.message
                ));

                if let Some(tip) = &issue.tip {
                    output.push_str(&format!("       Tip: {}\n", tip));
                }
            }
        }

        if issues.error_count() > 0 {
            output.push_str(&format!(
                "\n [ERROR] Found {} error{}\n",
                issues.error_count(),
                plural(issues.error_count())
            ));
        }

        if issues.warning_count() > 0 {
            output.push_str(&format!(
                " [WARNING] Found {} warning{}\n",
                issues.warning_count(),
                plural(issues.warning_count())
            ));
        }

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_table_format_empty() {
        let output = TableFormatter.format(&IssueCollection::new());
        assert!(output.contains("[OK]"));
    }

    #[test]
    fn test_table_format_with_errors() {
        let mut issues = IssueCollection::new();
        issues.add(
            Issue::error("map.objectAccess", "Map misuse", PathBuf::from("src/cache.ts"), 10, 5)
                .with_tip("Use get()"),
        );
        issues.add(Issue::error("map.objectAccess", "Map misuse", PathBuf::from("src/cache.ts"), 12, 3));

        let output = TableFormatter.format(&issues);

        assert!(output.contains("-- src/cache.ts --"));
        assert!(output.contains("ERROR 10:5  Map misuse"));
        assert!(output.contains("Tip: Use get()"));
        assert!(output.contains("[ERROR] Found 2 errors"));
        assert!(!output.contains("[WARNING]"));
    }
}
