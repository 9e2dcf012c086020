//! JSON formatting for events

use crate::events::{Event, ObserverError};

/// Format an event as a single JSON line
pub fn format_event(event: &Event, include_private: bool) -> Result<String, ObserverError> {
    let properties = if include_private {
        Some(event.properties().clone())
    } else {
        event.sanitized_properties()
    };

    let mut json_obj = serde_json::json!({
        "timestamp": event.timestamp().to_rfc3339(),
        "name": event.name(),
        "kind": event.kind(),
        "is_error": event.is_error(),
    });

    if let Some(properties) = properties {
        if !properties.is_empty() {
            json_obj["properties"] = serde_json::Value::Object(
                properties
                    .into_iter()
                    .map(|(k, v)| (k, serde_json::Value::String(v)))
                    .collect(),
            );
        }
    }

    serde_json::to_string(&json_obj).map_err(|e| ObserverError::Serialization(e.to_string()))
}
