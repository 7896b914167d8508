//! Parse LLM output into raw extraction fields

use crate::error::ExtractorError;
use crate::types::RawExtraction;
use serde_json::{Map, Value};

/// Parse the model's JSON response
///
/// The response must be a single JSON object; missing fields are left unset.
pub fn parse_llm_response(response: &str) -> Result<RawExtraction, ExtractorError> {
    // JSON mode should rule out code fences, but some models add them anyway
    let json_str = extract_json(response)?;

    let json: Value = serde_json::from_str(&json_str)?;

    let obj = json
        .as_object()
        .ok_or_else(|| ExtractorError::InvalidFormat("Expected JSON object".to_string()))?;

    Ok(RawExtraction {
        batch_no: text_field(obj, "batch_no"),
        draw_date: text_field(obj, "draw_date"),
        total_applied: obj.get("total_applied").cloned(),
        quota_total: obj.get("quota_total").cloned(),
        total_won: obj.get("total_won").cloned(),
        total_lost: obj.get("total_lost").cloned(),
    })
}

/// Extract JSON from response, handling markdown code blocks
fn extract_json(response: &str) -> Result<String, ExtractorError> {
    let trimmed = response.trim();

    if trimmed.starts_with("```") {
        let lines: Vec<&str> = trimmed.lines().collect();
        if lines.len() < 2 {
            return Err(ExtractorError::InvalidFormat("Empty code block".to_string()));
        }

        // Skip the opening fence and, if present, the closing one
        let end = if lines[lines.len() - 1].trim() == "```" {
            lines.len() - 1
        } else {
            lines.len()
        };
        Ok(lines[1..end].join("\n"))
    } else {
        Ok(trimmed.to_string())
    }
}

/// A textual field; blank strings count as missing
fn text_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    match obj.get(key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_valid_json() {
        let response = r#"{
            "batch_no": "YCCQPCH0000001",
            "draw_date": "2024-01-23",
            "total_applied": "500",
            "quota_total": 100,
            "total_won": "1",
            "total_lost": null
        }"#;

        let raw = parse_llm_response(response).unwrap();
        assert_eq!(raw.batch_no.as_deref(), Some("YCCQPCH0000001"));
        assert_eq!(raw.draw_date.as_deref(), Some("2024-01-23"));
        assert_eq!(raw.total_applied, Some(json!("500")));
        assert_eq!(raw.quota_total, Some(json!(100)));
        assert_eq!(raw.total_won, Some(json!("1")));
        assert_eq!(raw.total_lost, Some(Value::Null));
    }

    #[test]
    fn test_parse_json_with_markdown_wrapper() {
        let response = "```json\n{\"batch_no\": \"YCCQPCH0000002\"}\n```";
        let raw = parse_llm_response(response).unwrap();
        assert_eq!(raw.batch_no.as_deref(), Some("YCCQPCH0000002"));
    }

    #[test]
    fn test_parse_missing_fields() {
        let raw = parse_llm_response("{}").unwrap();
        assert_eq!(raw, RawExtraction::default());
    }

    #[test]
    fn test_blank_batch_no_is_missing() {
        let raw = parse_llm_response(r#"{"batch_no": "  ", "draw_date": ""}"#).unwrap();
        assert!(raw.batch_no.is_none());
        assert!(raw.draw_date.is_none());
    }

    #[test]
    fn test_parse_invalid_json() {
        let result = parse_llm_response("This is not JSON");
        assert!(matches!(result, Err(ExtractorError::JsonParse(_))));
    }

    #[test]
    fn test_parse_json_not_object() {
        let result = parse_llm_response(r#"[{"batch_no": "x"}]"#);
        assert!(matches!(result, Err(ExtractorError::InvalidFormat(_))));
    }

    #[test]
    fn test_extract_json_from_markdown_without_language() {
        let result = extract_json("```\n{\"key\": \"value\"}\n```").unwrap();
        assert_eq!(result, "{\"key\": \"value\"}");
    }

    #[test]
    fn test_extract_json_unterminated_fence() {
        let result = extract_json("```json\n{\"key\": 1}").unwrap();
        assert_eq!(result, "{\"key\": 1}");
    }
}
