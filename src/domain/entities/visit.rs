//! Visit record entity, one row per redirect.

use chrono::{DateTime, Utc};
use serde_json::Value;

/// A single recorded visit to a shortened link.
///
/// Appended exactly once per redirect and never mutated or deleted
/// afterwards. `metadata` is the request-header snapshot taken at redirect
/// time, with credential headers already stripped before it reaches the
/// store.
#[derive(Debug, Clone, PartialEq)]
pub struct VisitRecord {
    pub id: i64,
    pub link_alias: String,
    pub metadata: Value,
    pub created_at: DateTime<Utc>,
}

impl VisitRecord {
    /// Creates a new VisitRecord instance.
    pub fn new(id: i64, link_alias: String, metadata: Value, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            link_alias,
            metadata,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_visit_record_creation() {
        let now = Utc::now();
        let visit = VisitRecord::new(
            1,
            "abc123".to_string(),
            json!({ "user-agent": "Mozilla/5.0" }),
            now,
        );

        assert_eq!(visit.id, 1);
        assert_eq!(visit.link_alias, "abc123");
        assert_eq!(visit.metadata["user-agent"], "Mozilla/5.0");
        assert_eq!(visit.created_at, now);
    }

    #[test]
    fn test_visit_record_empty_metadata() {
        let visit = VisitRecord::new(7, "xyz".to_string(), json!({}), Utc::now());

        assert!(visit.metadata.as_object().unwrap().is_empty());
    }
}
