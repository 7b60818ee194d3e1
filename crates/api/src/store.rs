//! # Collection Store
//!
//! In-memory JSON collections behind the development API. Records are stored as raw JSON objects,
//! so the server accepts whatever shape the client sends, the way the real backend's collection
//! endpoints do. The only rules enforced here are: a collection must be one of
//! [`COLLECTIONS`], every record gets an `id`, and lookups by id or field use string comparison.

use std::collections::HashMap;
use std::path::Path;

use classdesk_core::errors::{DeskError, DeskResult};
use eyre::{Result, WrapErr};
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use uuid::Uuid;

pub const COLLECTIONS: [&str; 7] = [
    "users",
    "classes",
    "announcements",
    "requests",
    "attendance",
    "performance",
    "assignments",
];

#[derive(Debug)]
pub struct CollectionStore {
    collections: RwLock<HashMap<String, Vec<Value>>>,
}

/// Text form of a scalar for comparisons; query strings only ever carry text.
fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn has_id(record: &Value, id: &str) -> bool {
    record.get("id").and_then(as_text).as_deref() == Some(id)
}

fn matches_filters(record: &Value, filters: &HashMap<String, String>) -> bool {
    filters
        .iter()
        .all(|(field, expected)| record.get(field).and_then(as_text).as_deref() == Some(expected.as_str()))
}

fn check_collection(name: &str) -> DeskResult<()> {
    if COLLECTIONS.contains(&name) {
        Ok(())
    } else {
        Err(DeskError::NotFound(format!("Unknown collection {name:?}")))
    }
}

impl CollectionStore {
    pub fn new() -> Self {
        let collections = COLLECTIONS
            .iter()
            .map(|name| (name.to_string(), Vec::new()))
            .collect();
        Self {
            collections: RwLock::new(collections),
        }
    }

    /// Builds a store from a JSON object mapping collection names to arrays of records.
    ///
    /// Unknown collections are skipped with a warning. Records without an `id` get one.
    pub fn from_seed(seed: Value) -> DeskResult<Self> {
        let Value::Object(entries) = seed else {
            return Err(DeskError::Validation(
                "Seed data must be a JSON object of collections".to_string(),
            ));
        };

        let mut collections: HashMap<String, Vec<Value>> = COLLECTIONS
            .iter()
            .map(|name| (name.to_string(), Vec::new()))
            .collect();
        for (name, records) in entries {
            if check_collection(&name).is_err() {
                warn!("Skipping unknown seed collection {:?}", name);
                continue;
            }
            let Value::Array(records) = records else {
                return Err(DeskError::Validation(format!(
                    "Seed collection {name:?} must be an array"
                )));
            };
            let records = records
                .into_iter()
                .map(with_id)
                .collect::<DeskResult<Vec<_>>>()?;
            info!("Seeded {} with {} records", name, records.len());
            collections.insert(name, records);
        }

        Ok(Self {
            collections: RwLock::new(collections),
        })
    }

    pub async fn load_seed_file(path: &Path) -> Result<Self> {
        let raw = tokio::fs::read_to_string(path)
            .await
            .wrap_err_with(|| format!("Failed to read seed file {}", path.display()))?;
        let seed: Value = serde_json::from_str(&raw)
            .wrap_err_with(|| format!("Seed file {} is not valid JSON", path.display()))?;
        Ok(Self::from_seed(seed)?)
    }

    /// Number of records per collection.
    pub async fn counts(&self) -> HashMap<String, usize> {
        let collections = self.collections.read().await;
        collections
            .iter()
            .map(|(name, records)| (name.clone(), records.len()))
            .collect()
    }

    pub async fn list(&self, name: &str, filters: &HashMap<String, String>) -> DeskResult<Vec<Value>> {
        check_collection(name)?;
        let collections = self.collections.read().await;
        let records = collections
            .get(name)
            .map(|records| {
                records
                    .iter()
                    .filter(|record| matches_filters(record, filters))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        Ok(records)
    }

    pub async fn get(&self, name: &str, id: &str) -> DeskResult<Value> {
        check_collection(name)?;
        let collections = self.collections.read().await;
        collections
            .get(name)
            .and_then(|records| records.iter().find(|r| has_id(r, id)))
            .cloned()
            .ok_or_else(|| DeskError::NotFound(format!("{name}/{id} not found")))
    }

    pub async fn insert(&self, name: &str, record: Value) -> DeskResult<Value> {
        check_collection(name)?;
        let record = with_id(record)?;
        debug!("Inserting into {}: {}", name, record);

        let mut collections = self.collections.write().await;
        collections
            .entry(name.to_string())
            .or_default()
            .push(record.clone());
        Ok(record)
    }

    /// Shallow-merges `patch` into the record; the `id` cannot be changed.
    pub async fn update(&self, name: &str, id: &str, patch: Value) -> DeskResult<Value> {
        check_collection(name)?;
        let Value::Object(patch) = patch else {
            return Err(DeskError::Validation("Patch body must be a JSON object".to_string()));
        };

        let mut collections = self.collections.write().await;
        let record = collections
            .get_mut(name)
            .and_then(|records| records.iter_mut().find(|r| has_id(r, id)))
            .ok_or_else(|| DeskError::NotFound(format!("{name}/{id} not found")))?;

        if let Value::Object(fields) = record {
            for (key, value) in patch {
                if key != "id" {
                    fields.insert(key, value);
                }
            }
        }
        debug!("Updated {}/{}", name, id);
        Ok(record.clone())
    }

    pub async fn delete(&self, name: &str, id: &str) -> DeskResult<()> {
        check_collection(name)?;
        let mut collections = self.collections.write().await;
        let records = collections
            .get_mut(name)
            .ok_or_else(|| DeskError::NotFound(format!("{name}/{id} not found")))?;
        let before = records.len();
        records.retain(|r| !has_id(r, id));
        if records.len() == before {
            return Err(DeskError::NotFound(format!("{name}/{id} not found")));
        }
        debug!("Deleted {}/{}", name, id);
        Ok(())
    }
}

fn with_id(record: Value) -> DeskResult<Value> {
    let Value::Object(mut fields) = record else {
        return Err(DeskError::Validation("Records must be JSON objects".to_string()));
    };
    let missing = fields.get("id").and_then(as_text).map_or(true, |id| id.is_empty());
    if missing {
        fields.insert("id".to_string(), Value::String(Uuid::new_v4().to_string()));
    }
    Ok(Value::Object(fields))
}
