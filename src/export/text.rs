// SPDX-License-Identifier: MIT
// Export formatters — human-readable text.

use std::fmt::Write as _;

use crate::generate::model::TestCaseSet;

const RULE_WIDTH: usize = 60;

/// Render the record set as a plain-text report for direct human reading —
/// not designed for re-parsing.
pub fn format(set: &TestCaseSet) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Module: {}", set.module);
    let _ = writeln!(out, "Total Test Cases: {}", set.test_cases.len());
    out.push('\n');

    for tc in &set.test_cases {
        let _ = writeln!(out, "ID: {}", tc.id);
        let _ = writeln!(out, "Title: {}", tc.title);
        let _ = writeln!(out, "Scenario: {}", tc.scenario);
        let _ = writeln!(out, "Type: {}", tc.case_type);
        out.push_str("Steps:\n");
        for (i, step) in tc.steps.iter().enumerate() {
            let _ = writeln!(out, "  {}. {}", i + 1, step);
        }
        let _ = writeln!(out, "Expected Result: {}", tc.expected_result);
        let _ = writeln!(out, "Status: {}", tc.status);
        out.push_str(&"-".repeat(RULE_WIDTH));
        out.push('\n');
    }
    out
}
