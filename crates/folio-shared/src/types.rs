//! Common types

use serde::{Deserialize, Serialize};

/// Record ids are opaque strings issued by the backend.
pub type EntityId = String;

/// Partial update payload: a JSON object of the fields to change.
pub type FieldPatch = serde_json::Map<String, serde_json::Value>;

/// Metadata the backend attaches to every stored record. Timestamps are kept
/// as the backend's own strings; not every store emits an offset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordMeta {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<EntityId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_by: Option<String>,
}

impl RecordMeta {
    pub fn with_id(id: impl Into<EntityId>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_meta_omits_missing_fields() {
        let meta = RecordMeta::default();
        assert_eq!(serde_json::to_string(&meta).unwrap(), "{}");

        let meta = RecordMeta::with_id("abc");
        assert_eq!(serde_json::to_string(&meta).unwrap(), r#"{"id":"abc"}"#);
    }
}
