//! Schema file loading.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use domo::{Column, DomoError, DomoResult, Schema, SchemaSource};

/// Dataset body layout: `{"id": ..., "schema": {"columns": [...]}, ...}`.
#[derive(Deserialize)]
struct DatasetBody {
    schema: Schema,
}

/// Bare layout: exactly `{"columns": [...]}`.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct BareSchema {
    columns: Vec<Column>,
}

/// Decodes either layout, picked by the presence of a top-level `schema` key.
pub fn parse_schema(body: &str) -> serde_json::Result<Schema> {
    let value: serde_json::Value = serde_json::from_str(body)?;
    if value.get("schema").is_some() {
        let DatasetBody { schema } = serde_json::from_value(value)?;
        Ok(schema)
    } else {
        let BareSchema { columns } = serde_json::from_value(value)?;
        Ok(Schema::new(columns))
    }
}

/// Load a schema file from disk.
pub fn load_schema_file(path: &Path) -> Result<Schema> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read schema file: {}", path.display()))?;
    parse_schema(&content).with_context(|| format!("Failed to parse schema file: {}", path.display()))
}

/// [`SchemaSource`] over exported dataset schemas, one `<dataset>.json` per
/// dataset in `dir`.
pub struct FileSchemaSource {
    dir: PathBuf,
    overrides: HashMap<String, PathBuf>,
}

impl FileSchemaSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            overrides: HashMap::new(),
        }
    }

    /// Read `dataset_id` from `path` instead of the directory.
    pub fn with_file(mut self, dataset_id: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        self.overrides.insert(dataset_id.into(), path.into());
        self
    }

    pub fn path_for(&self, dataset_id: &str) -> PathBuf {
        self.overrides
            .get(dataset_id)
            .cloned()
            .unwrap_or_else(|| self.dir.join(format!("{dataset_id}.json")))
    }
}

impl SchemaSource for FileSchemaSource {
    async fn dataset_schema(&self, dataset_id: &str) -> DomoResult<Schema> {
        let path = self.path_for(dataset_id);
        log::debug!("reading remote schema of {dataset_id} from {}", path.display());
        let body = match tokio::fs::read_to_string(&path).await {
            Ok(body) => body,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Err(DomoError::DatasetNotFound {
                    dataset_id: dataset_id.to_string(),
                });
            }
            Err(err) => return Err(err.into()),
        };
        Ok(parse_schema(&body)?)
    }
}
