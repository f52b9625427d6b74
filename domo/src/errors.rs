use std::borrow::Cow;

use thiserror::Error;

use crate::diff::SchemaDiff;

/// Top-level error type returned by the dataset schema service.
#[derive(Debug, Error)]
pub enum DomoError {
    /// The local schema differs from the dataset's remote schema.
    #[error("{0}")]
    SchemaChanged(#[from] SchemaDiff),

    /// The schema source has no dataset with this id.
    #[error("dataset `{dataset_id}` not found")]
    DatasetNotFound { dataset_id: String },

    /// Reading a schema body failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A schema body could not be decoded.
    #[error("invalid schema body: {0}")]
    Json(#[from] serde_json::Error),

    /// Any other failure reported by a schema source.
    #[error("schema source error: {message}")]
    Source { message: Cow<'static, str> },
}

impl DomoError {
    pub fn source_error(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Source {
            message: message.into(),
        }
    }

    /// The diff carried by [`DomoError::SchemaChanged`], if any.
    pub fn schema_diff(&self) -> Option<&SchemaDiff> {
        match self {
            DomoError::SchemaChanged(diff) => Some(diff),
            _ => None,
        }
    }
}

pub type DomoResult<T> = Result<T, DomoError>;
