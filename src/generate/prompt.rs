// SPDX-License-Identifier: MIT
// Test case generation — prompt template.

/// Instruction template sent with every generation request.
///
/// `{module}` is replaced with the user-supplied description. The template
/// pins the response to strict JSON so the decode step can be a plain
/// `serde_json` parse with no repair heuristics.
pub const PROMPT_TEMPLATE: &str = r#"You are a senior QA engineer.

Generate COMPLETE test cases for the following module/page:

MODULE:
{module}

Cover:
- Functional test cases
- Negative test cases
- Boundary cases
- Validation checks
- Basic security cases

Return STRICT JSON only in this format:

{
  "module": "{module}",
  "total_test_cases": number,
  "test_cases": [
    {
      "id": "TC-001",
      "title": "",
      "scenario": "",
      "type": "Functional | Negative | Boundary | Security",
      "steps": [],
      "expected_result": "",
      "status": "Pending"
    }
  ]
}

Rules:
- ONLY JSON
- No explanation text
- Must be valid JSON
"#;

/// Substitute the module description into the instruction template.
///
/// Callers must guard against an empty description before building a prompt
/// ("module description is required") — this function does not validate.
pub fn build_prompt(module: &str) -> String {
    PROMPT_TEMPLATE.replace("{module}", module)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_contains_module_text() {
        let prompt = build_prompt("Login form");
        assert!(prompt.contains("MODULE:\nLogin form"));
        // The schema example echoes the module name back.
        assert!(prompt.contains("\"module\": \"Login form\""));
    }

    #[test]
    fn prompt_covers_required_categories() {
        let prompt = build_prompt("Checkout page");
        for category in ["Functional", "Negative", "Boundary", "Security"] {
            assert!(prompt.contains(category), "missing category: {category}");
        }
    }

    #[test]
    fn prompt_demands_strict_json() {
        let prompt = build_prompt("anything");
        assert!(prompt.contains("STRICT JSON"));
        assert!(prompt.contains("ONLY JSON"));
    }
}
