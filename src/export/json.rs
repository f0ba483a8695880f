// SPDX-License-Identifier: MIT
// Export formatters — JSON.

use serde_json::Value;

/// Re-serialize the decoded set with 2-space indentation.
///
/// This is a structural round-trip, not a re-derivation: whatever fields
/// exist in the input appear in the output verbatim, so it operates on the
/// raw value rather than the normalized record type.
pub fn format(set: &Value) -> String {
    // Serializing a serde_json::Value cannot fail.
    serde_json::to_string_pretty(set).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn round_trips_unknown_fields() {
        let set = json!({
            "module": "Login form",
            "extra_field": "kept verbatim",
            "test_cases": [{ "id": "TC-001", "custom": 42 }]
        });
        let text = format(&set);
        let reparsed: Value = serde_json::from_str(&text).unwrap();
        assert_eq!(reparsed, set);
    }

    #[test]
    fn uses_two_space_indentation() {
        let text = format(&json!({ "module": "X" }));
        assert!(text.contains("\n  \"module\""));
    }
}
