//! Project-specific utilities live here.

use serde_json::{json, Value};

/// The text unchanged, or `None` when it is absent or only whitespace.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}

/// OpenAPI response object whose body is the shared envelope.
pub fn envelope_response(description: &str) -> Value {
    json!({
        "description": description,
        "content": {
            "application/json": {
                "schema": { "$ref": "#/components/schemas/Envelope" }
            }
        }
    })
}
