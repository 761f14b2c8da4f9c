use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

use crate::error::{RecommendationError, Result};
use crate::models::suggestion::RawSuggestion;

const FENCE: &str = "```";

fn opening_fence() -> &'static Regex {
    static OPENING_FENCE: OnceLock<Regex> = OnceLock::new();
    OPENING_FENCE.get_or_init(|| Regex::new(r"^```[a-zA-Z]*\s*").expect("opening fence pattern is valid"))
}

/// Turn a raw `generateContent` response body into suggestion records.
pub fn extract(raw_body: &str) -> Result<Vec<RawSuggestion>> {
    let data: Value = serde_json::from_str(raw_body).map_err(|e| {
        RecommendationError::ResponseMalformed(format!("upstream body is not JSON: {}", e))
    })?;

    let textual = candidate_text(&data);
    let cleaned = strip_code_fence(&textual);
    let json_text = match locate_json_start(cleaned) {
        Some(start) => &cleaned[start..],
        None => cleaned,
    };

    let parsed: Value = serde_json::from_str(json_text).map_err(|e| {
        RecommendationError::ResponseMalformed(format!("model text is not valid JSON: {}", e))
    })?;

    let items = match parsed {
        Value::Array(items) => items,
        object @ Value::Object(_) => vec![object],
        other => {
            return Err(RecommendationError::ResponseMalformed(format!(
                "expected a list or object of suggestions, got {}",
                json_kind(&other)
            )))
        }
    };

    items
        .iter()
        .enumerate()
        .map(|(idx, item)| {
            RawSuggestion::from_value(item).ok_or_else(|| {
                RecommendationError::ResponseMalformed(format!(
                    "suggestion {} is {}, not an object",
                    idx,
                    json_kind(item)
                ))
            })
        })
        .collect()
}

/// Text of the first candidate. Falls back to the whole body when the shape is unexpected.
pub fn candidate_text(data: &Value) -> String {
    let first = data
        .get("candidates")
        .and_then(Value::as_array)
        .and_then(|candidates| candidates.first())
        .and_then(|candidate| candidate.get("content"));

    match first {
        Some(Value::String(text)) => text.clone(),
        Some(content) => match content.get("parts").and_then(Value::as_array) {
            Some(parts) => parts
                .iter()
                .filter_map(|part| part.get("text").and_then(Value::as_str))
                .collect(),
            None => data.to_string(),
        },
        None => data.to_string(),
    }
}

/// Remove a surrounding markdown code fence, with or without a language tag.
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    if !trimmed.starts_with(FENCE) {
        return trimmed;
    }

    let body = match opening_fence().find(trimmed) {
        Some(fence) => &trimmed[fence.end()..],
        None => trimmed,
    };

    match body.strip_suffix(FENCE) {
        Some(inner) => inner.trim(),
        None => body,
    }
}

/// Byte offset where the JSON payload begins.
///
/// The first `[` is used when it comes before the first `{` or there is no `{`;
/// otherwise the first `{`.
pub fn locate_json_start(text: &str) -> Option<usize> {
    let first_brace = text.find('{');
    let first_bracket = text.find('[');

    match (first_bracket, first_brace) {
        (Some(bracket), Some(brace)) if bracket < brace => Some(bracket),
        (Some(bracket), None) => Some(bracket),
        (_, brace) => brace,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::cost_normalizer::normalize_base;
    use serde_json::json;

    fn wrap(text: &str) -> String {
        json!({
            "candidates": [{ "content": { "role": "model", "parts": [{ "text": text }] } }]
        })
        .to_string()
    }

    const ARRAY: &str = r#"[{"destination":"Kyoto, Kyoto","summary":"Temples.","tags":["culture"],"approxBaseCost":42000}]"#;

    #[test]
    fn test_plain_array() {
        let suggestions = extract(&wrap(ARRAY)).unwrap();

        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].destination.as_deref(), Some("Kyoto, Kyoto"));
        assert_eq!(normalize_base(&suggestions[0]), 42000.0);
    }

    #[test]
    fn test_fenced_array_matches_unfenced() {
        let fenced = format!("```json\n{}\n```", ARRAY);
        assert_eq!(extract(&wrap(&fenced)).unwrap(), extract(&wrap(ARRAY)).unwrap());

        let bare_fence = format!("```\n{}\n```", ARRAY);
        assert_eq!(extract(&wrap(&bare_fence)).unwrap(), extract(&wrap(ARRAY)).unwrap());
    }

    #[test]
    fn test_leading_prose_is_dropped() {
        let text = format!("Here are some ideas for you:\n{}", ARRAY);
        assert_eq!(extract(&wrap(&text)).unwrap().len(), 1);
    }

    #[test]
    fn test_parts_are_concatenated_in_order() {
        let body = json!({
            "candidates": [{ "content": { "parts": [
                { "text": "[{\"destination\":\"Os" },
                { "text": "aka\"}]" }
            ] } }]
        })
        .to_string();

        let suggestions = extract(&body).unwrap();
        assert_eq!(suggestions[0].destination.as_deref(), Some("Osaka"));
    }

    #[test]
    fn test_single_object_is_wrapped() {
        let suggestions = extract(&wrap(r#"{"destination":"Nara","perPerson":"9000 INR"}"#)).unwrap();

        assert_eq!(suggestions.len(), 1);
        assert_eq!(normalize_base(&suggestions[0]), 9000.0);
    }

    #[test]
    fn test_string_content_is_used_directly() {
        let body = json!({ "candidates": [{ "content": ARRAY }] }).to_string();
        assert_eq!(extract(&body).unwrap().len(), 1);
    }

    #[test]
    fn test_array_start_takes_precedence() {
        assert_eq!(locate_json_start("noise [1] {2}"), Some(6));
        assert_eq!(locate_json_start("noise {\"a\": [1]}"), Some(6));
        assert_eq!(locate_json_start("{ } [ ]"), Some(0));
        assert_eq!(locate_json_start("only [ here"), Some(5));
        assert_eq!(locate_json_start("nothing"), None);
    }

    #[test]
    fn test_parse_starts_at_array_not_object() {
        let text = r#"noise [{"destination":"Hakone"}] trailing"#;
        // trailing text after the array is not JSON
        assert!(extract(&wrap(text)).is_err());

        let text = r#"noise [{"destination":"Hakone"}]"#;
        assert_eq!(extract(&wrap(text)).unwrap()[0].destination.as_deref(), Some("Hakone"));
    }

    #[test]
    fn test_unexpected_shape_serializes_whole_body() {
        let body = json!({ "error": { "code": 500 } });
        assert_eq!(candidate_text(&body), body.to_string());

        // the whole body is itself an object, so it parses as one suggestion with no fields
        let suggestions = extract(&body.to_string()).unwrap();
        assert_eq!(suggestions, vec![RawSuggestion::default()]);
    }

    #[test]
    fn test_malformed_inputs_fail() {
        assert!(matches!(extract("not json"), Err(RecommendationError::ResponseMalformed(_))));
        assert!(matches!(extract(&wrap("sorry, no ideas")), Err(RecommendationError::ResponseMalformed(_))));
        assert!(matches!(extract(&wrap("42")), Err(RecommendationError::ResponseMalformed(_))));
        assert!(matches!(extract(&wrap("[1, 2]")), Err(RecommendationError::ResponseMalformed(_))));
    }

    #[test]
    fn test_strip_code_fence() {
        assert_eq!(strip_code_fence("  ```json\n[1]\n```  "), "[1]");
        assert_eq!(strip_code_fence("```[1]"), "[1]");
        assert_eq!(strip_code_fence("[1]"), "[1]");
    }
}
