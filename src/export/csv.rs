// SPDX-License-Identifier: MIT
// Export formatters — CSV.

use crate::export::{COLUMNS, STEP_SEPARATOR};
use crate::generate::model::TestCaseSet;

/// Render the record set as CSV: one fixed header row, one row per case.
///
/// `Steps` is flattened by joining each step with `"; "`, which loses the
/// step count as a distinct column. An empty set still produces the header.
pub fn format(set: &TestCaseSet) -> String {
    let mut out = String::new();
    out.push_str(&COLUMNS.join(","));
    out.push('\n');
    for tc in &set.test_cases {
        let steps = tc.steps.join(STEP_SEPARATOR);
        let row = [
            tc.id.as_str(),
            tc.title.as_str(),
            tc.scenario.as_str(),
            tc.case_type.as_str(),
            steps.as_str(),
            tc.expected_result.as_str(),
            tc.status.as_str(),
        ];
        let escaped: Vec<String> = row.iter().map(|field| csv_escape(field)).collect();
        out.push_str(&escaped.join(","));
        out.push('\n');
    }
    out
}

fn csv_escape(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate::model::TestCase;

    #[test]
    fn empty_set_is_header_only() {
        let out = format(&TestCaseSet::default());
        assert_eq!(out, "ID,Title,Scenario,Type,Steps,Expected Result,Status\n");
    }

    #[test]
    fn fields_with_commas_are_quoted() {
        let set = TestCaseSet {
            test_cases: vec![TestCase {
                id: "TC-001".to_string(),
                scenario: "Enter a, b, and c".to_string(),
                ..TestCase::default()
            }],
            ..TestCaseSet::default()
        };
        let out = format(&set);
        assert!(out.contains("\"Enter a, b, and c\""));
    }

    #[test]
    fn embedded_quotes_are_doubled() {
        assert_eq!(csv_escape(r#"say "hi""#), r#""say ""hi""""#);
        assert_eq!(csv_escape("plain"), "plain");
        assert_eq!(csv_escape("two\nlines"), "\"two\nlines\"");
    }
}
