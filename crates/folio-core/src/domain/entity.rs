//! Entity trait shared by every portfolio record type

use folio_shared::{FieldPatch, RecordMeta};
use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use serde_json::Value;
use validator::Validate;

use crate::error::DomainError;

/// A record type stored in the backend under `NAME`.
pub trait Entity:
    Serialize + DeserializeOwned + Validate + Clone + Send + Sync + std::fmt::Debug + 'static
{
    /// Backend entity name, e.g. `Publication`.
    const NAME: &'static str;
    /// Path segment used by the HTTP surface, e.g. `publications`.
    const COLLECTION: &'static str;
    /// Sort key applied when a list call names none.
    const DEFAULT_SORT: Option<&'static str>;
    /// Fields a form must fill in.
    const REQUIRED_FIELDS: &'static [&'static str];

    fn meta(&self) -> &RecordMeta;
    fn meta_mut(&mut self) -> &mut RecordMeta;

    fn id(&self) -> Option<&str> {
        self.meta().id.as_deref()
    }
}

/// Backend-managed keys a client may not patch.
const META_FIELDS: &[&str] = &["id", "created_date", "updated_date", "created_by"];

/// Rejects patches that blank out a required field and strips backend metadata.
pub fn sanitize_patch<T: Entity>(mut patch: FieldPatch) -> Result<FieldPatch, DomainError> {
    for key in META_FIELDS {
        patch.remove(*key);
    }

    if patch.is_empty() {
        return Err(DomainError::ValidationError("update has no fields".to_string()));
    }

    let mut blank: Vec<&str> = T::REQUIRED_FIELDS
        .iter()
        .copied()
        .filter(|field| patch.get(*field).is_some_and(is_blank))
        .collect();

    if blank.is_empty() {
        return Ok(patch);
    }

    blank.sort_unstable();
    Err(DomainError::ValidationError(
        blank
            .iter()
            .map(|field| format!("{} is required", field))
            .collect::<Vec<_>>()
            .join(", "),
    ))
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

pub(crate) fn default_true() -> bool {
    true
}

/// Visibility flags count as on unless explicitly `false`.
pub(crate) fn true_unless_false<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(true))
}

macro_rules! impl_entity {
    ($ty:ty, $name:literal, $collection:literal, $sort:expr, [$($field:literal),* $(,)?]) => {
        impl $crate::domain::entity::Entity for $ty {
            const NAME: &'static str = $name;
            const COLLECTION: &'static str = $collection;
            const DEFAULT_SORT: Option<&'static str> = $sort;
            const REQUIRED_FIELDS: &'static [&'static str] = &[$($field),*];

            fn meta(&self) -> &folio_shared::RecordMeta {
                &self.meta
            }

            fn meta_mut(&mut self) -> &mut folio_shared::RecordMeta {
                &mut self.meta
            }
        }
    };
}

pub(crate) use impl_entity;
