// SPDX-License-Identifier: MIT
// Test case generation — record model and normalization.

use serde::Serialize;
use serde_json::Value;

/// Default status for a record that arrives without one.
pub const DEFAULT_STATUS: &str = "Pending";

/// One generated test scenario.
///
/// Every field has a declared default so a record missing optional keys
/// normalizes instead of failing. `case_type` and `status` are open strings:
/// the model is asked for Functional/Negative/Boundary/Security and
/// Pending/Passed/Failed, but an unrecognized label passes through to every
/// formatter unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct TestCase {
    pub id: String,
    pub title: String,
    pub scenario: String,
    /// The "type" key in the wire format.
    pub case_type: String,
    pub steps: Vec<String>,
    pub expected_result: String,
    pub status: String,
}

impl Default for TestCase {
    fn default() -> Self {
        Self {
            id: String::new(),
            title: String::new(),
            scenario: String::new(),
            case_type: String::new(),
            steps: Vec::new(),
            expected_result: String::new(),
            status: DEFAULT_STATUS.to_string(),
        }
    }
}

impl TestCase {
    /// Normalize one decoded record. Absent keys resolve to defaults;
    /// present values pass through without validation.
    pub fn from_value(value: &Value) -> Self {
        Self {
            id: str_field(value, "id"),
            title: str_field(value, "title"),
            scenario: str_field(value, "scenario"),
            case_type: str_field(value, "type"),
            steps: value
                .get("steps")
                .and_then(Value::as_array)
                .map(|steps| {
                    steps
                        .iter()
                        .filter_map(Value::as_str)
                        .map(str::to_string)
                        .collect()
                })
                .unwrap_or_default(),
            expected_result: str_field(value, "expected_result"),
            status: value
                .get("status")
                .and_then(Value::as_str)
                .unwrap_or(DEFAULT_STATUS)
                .to_string(),
        }
    }
}

/// The full decoded generation result.
///
/// `total_test_cases` is carried as-received and never reconciled against
/// `test_cases.len()` — callers must not rely on it being accurate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TestCaseSet {
    pub module: String,
    pub total_test_cases: u64,
    pub test_cases: Vec<TestCase>,
}

impl TestCaseSet {
    /// Normalize a decoded JSON value into a record set.
    ///
    /// A missing `test_cases` key normalizes to an empty sequence rather
    /// than failing, so formatters are safe to call on raw decoded output.
    pub fn from_value(value: &Value) -> Self {
        let test_cases = value
            .get("test_cases")
            .and_then(Value::as_array)
            .map(|cases| cases.iter().map(TestCase::from_value).collect())
            .unwrap_or_default();
        Self {
            module: str_field(value, "module"),
            total_test_cases: value
                .get("total_test_cases")
                .and_then(Value::as_u64)
                .unwrap_or(0),
            test_cases,
        }
    }
}

fn str_field(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_string()
}

// ─── Generation outcome ───────────────────────────────────────────────────────

/// Decode failure carrying the offending completion text.
///
/// The raw text is preserved verbatim so a human can judge whether to retry
/// with a reworded description.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationFailure {
    pub error: String,
    pub raw_response: String,
}

/// Result of one generation call: the decoded structure, or a failure that
/// is a first-class value rather than a caught fault.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationOutcome {
    /// The completion decoded as JSON. Held as the raw value so the JSON
    /// export is a structural round-trip, fields verbatim.
    Success(Value),
    /// Transport or decode failure; `raw_response` is empty when no
    /// response body was received.
    Failure(GenerationFailure),
}

impl GenerationOutcome {
    pub fn failure(error: impl Into<String>, raw_response: impl Into<String>) -> Self {
        Self::Failure(GenerationFailure {
            error: error.into(),
            raw_response: raw_response.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_test_cases_normalizes_to_empty() {
        let set = TestCaseSet::from_value(&json!({ "module": "Login form" }));
        assert_eq!(set.module, "Login form");
        assert!(set.test_cases.is_empty());
    }

    #[test]
    fn absent_fields_get_defaults() {
        let set = TestCaseSet::from_value(&json!({
            "test_cases": [{ "id": "TC-001" }]
        }));
        let tc = &set.test_cases[0];
        assert_eq!(tc.id, "TC-001");
        assert_eq!(tc.title, "");
        assert_eq!(tc.scenario, "");
        assert_eq!(tc.case_type, "");
        assert!(tc.steps.is_empty());
        assert_eq!(tc.status, "Pending");
    }

    #[test]
    fn unrecognized_status_passes_through() {
        let set = TestCaseSet::from_value(&json!({
            "test_cases": [{ "id": "TC-001", "status": "Blocked" }]
        }));
        assert_eq!(set.test_cases[0].status, "Blocked");
    }

    #[test]
    fn declared_total_is_not_reconciled() {
        let set = TestCaseSet::from_value(&json!({
            "total_test_cases": 99,
            "test_cases": [{ "id": "TC-001" }]
        }));
        assert_eq!(set.total_test_cases, 99);
        assert_eq!(set.test_cases.len(), 1);
    }

    #[test]
    fn record_order_is_preserved() {
        let set = TestCaseSet::from_value(&json!({
            "test_cases": [
                { "id": "TC-002" },
                { "id": "TC-001" },
                { "id": "TC-003" }
            ]
        }));
        let ids: Vec<&str> = set.test_cases.iter().map(|tc| tc.id.as_str()).collect();
        assert_eq!(ids, ["TC-002", "TC-001", "TC-003"]);
    }
}
