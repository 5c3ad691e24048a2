//! Uniform success/failure envelope for tool results.

use rmcp::model::{CallToolResult, Content};
use serde::Serialize;
use serde_json::json;

/// Pretty-printed JSON of `data` as a single text block.
pub fn success_response(data: &impl Serialize) -> CallToolResult {
    match serde_json::to_string_pretty(data) {
        Ok(text) => CallToolResult::success(vec![Content::text(text)]),
        Err(e) => error_response(format!("Failed to serialize tool result: {}", e)),
    }
}

/// `{"error": message, "isError": true}` as a single error-flagged text block.
pub fn error_response(message: impl Into<String>) -> CallToolResult {
    let body = json!({ "error": message.into(), "isError": true });
    let text = serde_json::to_string_pretty(&body).unwrap_or_else(|_| body.to_string());
    CallToolResult::error(vec![Content::text(text)])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rmcp::model::RawContent;
    use serde_json::Value;

    fn text_of(result: &CallToolResult) -> &str {
        assert_eq!(result.content.len(), 1);
        match &result.content[0].raw {
            RawContent::Text(text) => &text.text,
            other => panic!("expected text content, got {other:?}"),
        }
    }

    #[test]
    fn test_success_round_trips_payload() {
        let payload = serde_json::json!({
            "id": 42,
            "fields": { "System.Title": "Ünïcode \"quoted\"", "Priority": 1.5 },
            "tags": [null, true, "x"]
        });

        let result = success_response(&payload);

        assert_ne!(result.is_error, Some(true));
        let parsed: Value = serde_json::from_str(text_of(&result)).unwrap();
        assert_eq!(parsed, payload);
    }

    #[test]
    fn test_error_envelope_shape() {
        let result = error_response("Unknown tool: nope");

        assert_eq!(result.is_error, Some(true));
        let parsed: Value = serde_json::from_str(text_of(&result)).unwrap();
        assert_eq!(
            parsed,
            serde_json::json!({ "error": "Unknown tool: nope", "isError": true })
        );
    }
}
