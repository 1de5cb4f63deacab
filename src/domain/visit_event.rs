//! Visit event model for detached visit recording.

use serde_json::Value;

/// An in-memory visit event queued for background processing.
///
/// Used to pass a redirect's metadata snapshot from the HTTP handler to the
/// background worker via a bounded channel when visit recording runs in
/// detached mode. The snapshot has credential headers stripped before the
/// event is built.
#[derive(Debug, Clone)]
pub struct VisitEvent {
    pub alias: String,
    pub metadata: Value,
}

impl VisitEvent {
    /// Creates a new visit event for the given alias.
    pub fn new(alias: String, metadata: Value) -> Self {
        Self { alias, metadata }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_visit_event_creation() {
        let event = VisitEvent::new(
            "abc123".to_string(),
            json!({ "user-agent": "Mozilla/5.0", "referer": "https://example.com" }),
        );

        assert_eq!(event.alias, "abc123");
        assert_eq!(event.metadata["referer"], "https://example.com");
    }

    #[test]
    fn test_visit_event_clone() {
        let event = VisitEvent::new("xyz".to_string(), json!({}));
        let cloned = event.clone();

        assert_eq!(cloned.alias, event.alias);
        assert_eq!(cloned.metadata, event.metadata);
    }
}
