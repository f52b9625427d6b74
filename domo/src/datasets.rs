//! Schema checks against datasets held by a remote system.
//!
//! Fetching is delegated to a [`SchemaSource`], which is where an HTTP
//! client (or a file export, or a test fixture) plugs in.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use crate::diff::{SchemaDiff, diff};
use crate::errors::{DomoError, DomoResult};
use crate::record::Record;
use crate::reflect::Reflector;
use crate::types::Schema;

/// Fetches the current remote schema of a dataset.
pub trait SchemaSource {
    fn dataset_schema(&self, dataset_id: &str) -> impl Future<Output = DomoResult<Schema>> + Send;
}

/// In-memory [`SchemaSource`].
#[derive(Debug, Clone, Default)]
pub struct StaticSchemaSource {
    schemas: HashMap<String, Schema>,
}

impl StaticSchemaSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dataset(mut self, dataset_id: impl Into<String>, schema: Schema) -> Self {
        self.insert(dataset_id, schema);
        self
    }

    pub fn insert(&mut self, dataset_id: impl Into<String>, schema: Schema) {
        self.schemas.insert(dataset_id.into(), schema);
    }
}

impl SchemaSource for StaticSchemaSource {
    async fn dataset_schema(&self, dataset_id: &str) -> DomoResult<Schema> {
        self.schemas
            .get(dataset_id)
            .cloned()
            .ok_or_else(|| DomoError::DatasetNotFound {
                dataset_id: dataset_id.to_string(),
            })
    }
}

/// Compares record types against the schemas of remote datasets.
pub struct DatasetsService<S> {
    source: S,
    reflector: Arc<Reflector>,
}

impl<S: SchemaSource> DatasetsService<S> {
    pub fn new(source: S, reflector: Arc<Reflector>) -> Self {
        Self { source, reflector }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn reflector(&self) -> &Reflector {
        &self.reflector
    }

    /// Cheap change check: a column count mismatch answers immediately,
    /// otherwise columns are compared by position.
    pub async fn has_schema_changed<T: Record>(&self, dataset_id: &str) -> DomoResult<bool> {
        let remote = self.source.dataset_schema(dataset_id).await?;
        let current = self.reflector.generate_schema::<T>();
        Ok(crate::diff::has_schema_changed(&current, &remote))
    }

    /// Fails with [`DomoError::SchemaChanged`] when `T` no longer matches the
    /// dataset's schema.
    pub async fn find_schema_changes<T: Record>(&self, dataset_id: &str) -> DomoResult<()> {
        let current = self.reflector.generate_schema::<T>();
        let diffs = self.compare(dataset_id, &current).await?;
        if diffs.is_empty() {
            Ok(())
        } else {
            Err(DomoError::SchemaChanged(diffs))
        }
    }

    /// Diff of an already built schema against the dataset's schema.
    pub async fn compare(&self, dataset_id: &str, current: &Schema) -> DomoResult<SchemaDiff> {
        let remote = self.source.dataset_schema(dataset_id).await?;
        let diffs = diff(current, &remote);
        log::debug!(
            "dataset {dataset_id}: {} local vs {} remote columns, {} differences",
            current.len(),
            remote.len(),
            diffs.diffs_count()
        );
        Ok(diffs)
    }
}
