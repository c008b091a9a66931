//! Extraction of error messages from failed API responses.
//!
//! DNS Made Easy reports validation failures as `{"error": ["...", "..."]}`.
//! Other failures may come back with an HTML page, plain text, or nothing at
//! all, so the extraction falls back to the raw body and finally to a message
//! built from the status code.

use serde_json::Value;

/// Turn a failed response into human-readable messages. Never returns an empty list.
///
/// `expected_failure_status` is the status an operation documents for
/// rejected input (400 for creates). It only changes the synthesized message
/// used when the body carries no messages of its own.
pub(crate) fn capture_errors(
    body: &str,
    status: u16,
    expected_failure_status: Option<u16>,
) -> Vec<String> {
    let trimmed = body.trim();

    if let Ok(json) = serde_json::from_str::<Value>(trimmed) {
        let messages = messages_from_json(&json);
        if !messages.is_empty() {
            return messages;
        }
    } else if !trimmed.is_empty() {
        return vec![trimmed.to_string()];
    }

    let message = if expected_failure_status == Some(status) {
        format!("The request was rejected by the API (HTTP {status}).")
    } else {
        format!("Unexpected HTTP status code: {status}.")
    };
    vec![message]
}

fn messages_from_json(json: &Value) -> Vec<String> {
    let Some(field) = json.get("error").or_else(|| json.get("errors")) else {
        return Vec::new();
    };

    match field {
        Value::String(message) if !message.trim().is_empty() => vec![message.clone()],
        Value::Array(items) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(message) => Some(message.clone()),
                Value::Null => None,
                other => Some(other.to_string()),
            })
            .filter(|message| !message.trim().is_empty())
            .collect(),
        _ => Vec::new(),
    }
}
