//! DashMap-backed entity repository
//!
//! Mirrors the BaaS contract: ids and timestamps are assigned on create,
//! `sort` takes `field` or `-field`, updates merge a field patch.

use std::cmp::Ordering;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use dashmap::DashMap;
use serde_json::Value;
use tracing::debug;
use uuid::Uuid;

use folio_core::domain::Entity;
use folio_core::error::DomainError;
use folio_core::repositories::EntityRepository;
use folio_shared::utils::parse_sort_key;
use folio_shared::FieldPatch;

struct Slot<T> {
    seq: u64,
    record: T,
}

pub struct MemoryEntityRepository<T> {
    records: DashMap<String, Slot<T>>,
    next_seq: AtomicU64,
}

impl<T: Entity> Default for MemoryEntityRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Entity> MemoryEntityRepository<T> {
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
            next_seq: AtomicU64::new(0),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn not_found(id: &str) -> DomainError {
        DomainError::NotFound {
            entity: T::NAME,
            id: id.to_string(),
        }
    }
}

fn now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn to_value<T: Entity>(record: &T) -> Result<Value, DomainError> {
    serde_json::to_value(record).map_err(|e| DomainError::InternalError(e.to_string()))
}

fn is_missing(value: &Value, field: &str) -> bool {
    matches!(value.get(field), None | Some(Value::Null))
}

/// Numbers numerically, strings lexically, missing and null values last.
fn compare_field(a: &Value, b: &Value, field: &str) -> Ordering {
    match (a.get(field), b.get(field)) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .unwrap_or_default()
            .partial_cmp(&y.as_f64().unwrap_or_default())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        (None | Some(Value::Null), None | Some(Value::Null)) => Ordering::Equal,
        (None | Some(Value::Null), _) => Ordering::Greater,
        (_, None | Some(Value::Null)) => Ordering::Less,
        _ => Ordering::Equal,
    }
}

#[async_trait]
impl<T: Entity> EntityRepository<T> for MemoryEntityRepository<T> {
    async fn list(&self, sort: Option<&str>) -> Result<Vec<T>, DomainError> {
        let mut rows: Vec<(u64, T)> = self
            .records
            .iter()
            .map(|entry| (entry.seq, entry.record.clone()))
            .collect();
        rows.sort_by_key(|(seq, _)| *seq);

        let Some(sort) = sort.filter(|s| !s.is_empty()) else {
            return Ok(rows.into_iter().map(|(_, record)| record).collect());
        };

        let (field, descending) = parse_sort_key(sort);
        let mut keyed = rows
            .into_iter()
            .map(|(_, record)| to_value(&record).map(|value| (value, record)))
            .collect::<Result<Vec<_>, _>>()?;
        keyed.sort_by(|(a, _), (b, _)| {
            let ord = compare_field(a, b, field);
            match (is_missing(a, field), is_missing(b, field)) {
                (false, false) if descending => ord.reverse(),
                _ => ord,
            }
        });
        Ok(keyed.into_iter().map(|(_, record)| record).collect())
    }

    async fn create(&self, record: &T) -> Result<T, DomainError> {
        let id = Uuid::new_v4().simple().to_string();
        let mut created = record.clone();
        let meta = created.meta_mut();
        meta.id = Some(id.clone());
        meta.created_date = Some(now());
        meta.updated_date = meta.created_date.clone();

        let seq = self.next_seq.fetch_add(1, AtomicOrdering::Relaxed);
        self.records.insert(
            id.clone(),
            Slot {
                seq,
                record: created.clone(),
            },
        );
        debug!("Stored {} {}", T::NAME, id);
        Ok(created)
    }

    async fn update(&self, id: &str, patch: &FieldPatch) -> Result<T, DomainError> {
        let mut slot = self.records.get_mut(id).ok_or_else(|| Self::not_found(id))?;

        let mut value = to_value(&slot.record)?;
        if let Value::Object(fields) = &mut value {
            for (key, field) in patch {
                fields.insert(key.clone(), field.clone());
            }
        }
        let mut updated: T = serde_json::from_value(value)
            .map_err(|e| DomainError::ValidationError(e.to_string()))?;
        updated.meta_mut().updated_date = Some(now());

        slot.record = updated.clone();
        Ok(updated)
    }

    async fn delete(&self, id: &str) -> Result<(), DomainError> {
        self.records
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| Self::not_found(id))
    }
}

#[cfg(test)]
mod tests {
    use folio_core::domain::{Award, Publication};
    use serde_json::json;

    use super::*;

    fn award(title: &str, date: &str) -> Award {
        Award {
            title: title.to_string(),
            organization: "Org".to_string(),
            date: date.to_string(),
            ..Award::default()
        }
    }

    #[tokio::test]
    async fn test_create_assigns_metadata() {
        let repo = MemoryEntityRepository::<Award>::new();
        let created = repo.create(&award("A", "2024-01-01")).await.unwrap();

        assert!(created.id().is_some());
        assert!(created.meta.created_date.is_some());
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn test_list_sorts_by_key() {
        let repo = MemoryEntityRepository::<Award>::new();
        repo.create(&award("old", "2020-01-01")).await.unwrap();
        repo.create(&award("new", "2024-01-01")).await.unwrap();
        repo.create(&award("mid", "2022-01-01")).await.unwrap();

        let titles = |records: Vec<Award>| records.into_iter().map(|a| a.title).collect::<Vec<_>>();

        assert_eq!(titles(repo.list(None).await.unwrap()), ["old", "new", "mid"]);
        assert_eq!(titles(repo.list(Some("-date")).await.unwrap()), ["new", "mid", "old"]);
        assert_eq!(titles(repo.list(Some("date")).await.unwrap()), ["old", "mid", "new"]);
    }

    #[tokio::test]
    async fn test_numeric_sort_keeps_missing_last() {
        let repo = MemoryEntityRepository::<Publication>::new();
        for (title, order) in [("c", 3), ("a", 1), ("b", 2)] {
            repo.create(&Publication {
                title: title.to_string(),
                display_order: order,
                ..Publication::default()
            })
            .await
            .unwrap();
        }

        let listed = repo.list(Some("display_order")).await.unwrap();
        let titles: Vec<_> = listed.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, ["a", "b", "c"]);

        let listed = repo.list(Some("-pdf_url")).await.unwrap();
        assert_eq!(listed.len(), 3);
    }

    #[tokio::test]
    async fn test_update_merges_patch() {
        let repo = MemoryEntityRepository::<Award>::new();
        let created = repo.create(&award("A", "2024-01-01")).await.unwrap();
        let id = created.id().unwrap().to_string();

        let patch = json!({"description": "Best paper"}).as_object().cloned().unwrap();
        let updated = repo.update(&id, &patch).await.unwrap();

        assert_eq!(updated.title, "A");
        assert_eq!(updated.description.as_deref(), Some("Best paper"));
        assert_eq!(updated.id(), Some(id.as_str()));
    }

    #[tokio::test]
    async fn test_missing_record_is_not_found() {
        let repo = MemoryEntityRepository::<Award>::new();
        let patch = json!({"title": "x"}).as_object().cloned().unwrap();

        assert!(matches!(
            repo.update("nope", &patch).await,
            Err(DomainError::NotFound { entity: "Award", .. })
        ));
        assert!(matches!(
            repo.delete("nope").await,
            Err(DomainError::NotFound { .. })
        ));
    }
}
