//! JSON file listing source.
//!
//! Reads a JSON array of [`ListingRecord`]s. Records without a `platform`
//! field, or with an empty one, are attributed to the source's platform.
//! An element that does not deserialize is handed on as a record that
//! fails validation, so it is counted as rejected instead of sinking the
//! rest of the file.

use std::path::PathBuf;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::domain::{ListingRecord, PlatformId};
use crate::error::Result;
use crate::port::ListingSource;

/// Source reading a snapshot file for one platform.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    platform: PlatformId,
    path: PathBuf,
}

impl JsonFileSource {
    #[must_use]
    pub fn new(platform: impl Into<PlatformId>, path: impl Into<PathBuf>) -> Self {
        Self {
            platform: platform.into(),
            path: path.into(),
        }
    }
}

#[async_trait]
impl ListingSource for JsonFileSource {
    fn platform(&self) -> &PlatformId {
        &self.platform
    }

    async fn fetch(&self) -> Result<Vec<ListingRecord>> {
        let content = tokio::fs::read_to_string(&self.path).await?;
        let raw: Vec<Value> = serde_json::from_str(&content)?;

        let records: Vec<ListingRecord> = raw
            .into_iter()
            .map(|value| self.to_record(value))
            .collect();

        debug!(
            platform = %self.platform,
            path = %self.path.display(),
            count = records.len(),
            "Loaded listing snapshot"
        );
        Ok(records)
    }
}

impl JsonFileSource {
    fn to_record(&self, mut value: Value) -> ListingRecord {
        if let Some(object) = value.as_object_mut() {
            let unnamed = object
                .get("platform")
                .and_then(Value::as_str)
                .map_or(true, |p| p.trim().is_empty());
            if unnamed {
                object.insert("platform".into(), Value::String(self.platform.to_string()));
            }
        }

        let id = id_hint(&value);
        serde_json::from_value(value).unwrap_or_else(|e| {
            debug!(platform = %self.platform, %id, error = %e, "Malformed listing element");
            // No question, so validation rejects it.
            ListingRecord {
                platform: self.platform.to_string(),
                id,
                ..Default::default()
            }
        })
    }
}

/// Best-effort id of a raw element, for logging and rejection.
fn id_hint(value: &Value) -> String {
    match value.get("id") {
        Some(Value::String(id)) => id.clone(),
        Some(Value::Number(id)) => id.to_string(),
        _ => String::new(),
    }
}
