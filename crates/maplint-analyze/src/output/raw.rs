//! Raw output format
//!
//! One issue per line, no headers or summary: `file:line:message`

use super::Formatter;
use crate::issue::IssueCollection;

pub struct RawFormatter;

impl Formatter for RawFormatter {
    fn format(&self, issues: &IssueCollection) -> String {
        let mut sorted_issues: Vec<_> = issues.issues().iter().collect();
        sorted_issues.sort_by(|a, b| {
            a.file
                .cmp(&b.file)
                .then_with(|| a.line.cmp(&b.line))
                .then_with(|| a.column.cmp(&b.column))
        });

        sorted_issues
            .into_iter()
            .map(|issue| {
                format!("{}:{}:{}\n", issue.file.display(), issue.line, issue.message)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issue::Issue;
    use std::path::PathBuf;

    #[test]
    fn test_raw_format_is_sorted() {
        let mut issues = IssueCollection::new();
        issues.add(Issue::error("map.objectAccess", "Second", PathBuf::from("src/b.ts"), 1, 1));
        issues.add(Issue::error("map.objectAccess", "First", PathBuf::from("src/a.ts"), 3, 7));

        let output = RawFormatter.format(&issues);
        assert_eq!(output, "src/a.ts:3:First\nsrc/b.ts:1:Second\n");
    }
}
