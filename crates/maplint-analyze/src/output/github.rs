//! GitHub Actions annotations output format

use super::Formatter;
use crate::issue::{IssueCollection, Severity};

pub struct GithubFormatter;

impl Formatter for GithubFormatter {
    fn format(&self, issues: &IssueCollection) -> String {
        let mut output = String::new();

        for issue in issues.issues() {
            let level = match issue.severity {
                Severity::Error => "error",
                Severity::Warning => "warning",
            };

            // ::error file={name},line={line},col={col},title={id}::{message}
            output.push_str(&format!(
                "::{} file={},line={},col={},title={}::{}\n",
                level,
                escape_property(&issue.file.display().to_string()),
                issue.line,
                issue.column,
                escape_property(issue.identifier.as_deref().unwrap_or(&issue.check_id)),
                escape_message(&issue.message)
            ));
        }

        output
    }
}

fn escape_message(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Property values additionally escape the separators `:` and `,`
fn escape_property(value: &str) -> String {
    escape_message(value).replace(':', "%3A").replace(',', "%2C")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issue::Issue;
    use std::path::PathBuf;

    #[test]
    fn test_github_format() {
        let mut issues = IssueCollection::new();
        issues.add(
            Issue::error("map.objectAccess", "Map misuse", PathBuf::from("src/cache.ts"), 10, 5)
                .with_identifier("map.objectAccess"),
        );

        let output = GithubFormatter.format(&issues);
        assert_eq!(
            output,
            "::error file=src/cache.ts,line=10,col=5,title=map.objectAccess::Map misuse\n"
        );
    }

    #[test]
    fn test_escaping() {
        assert_eq!(escape_message("line1\nline2"), "line1%0Aline2");
        assert_eq!(escape_message("100%"), "100%25");
        assert_eq!(escape_property("a:b,c"), "a%3Ab%2Cc");
    }
}
