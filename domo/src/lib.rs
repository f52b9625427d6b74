//! Domo dataset schema toolkit.
//!
//! Derives dataset schemas from Rust record types and explains how they
//! differ from the schema a dataset currently has.
//!
//! ```
//! use domo::{ColumnType, DomoRecord, Reflector};
//!
//! #[derive(DomoRecord)]
//! pub struct Sale {
//!     pub id: i64,
//!     #[domo("amount,DECIMAL")]
//!     pub total: f64,
//!     #[domo("-")]
//!     pub scratch: String,
//! }
//!
//! let schema = Reflector::new().generate_schema::<Sale>();
//! assert_eq!(schema.columns[1].name, "amount");
//! assert_eq!(schema.columns[1].column_type, ColumnType::Decimal);
//! assert_eq!(schema.len(), 2);
//! ```

extern crate self as domo;

pub mod datasets;
pub mod diff;
pub mod errors;
pub mod record;
pub mod reflect;
pub mod tags;
pub mod types;

pub use datasets::{DatasetsService, SchemaSource, StaticSchemaSource};
pub use diff::{
    MismatchKind, SchemaDiff, SchemaMismatch, diff, diff_by_name, diff_by_position, find_schema_changes,
    has_schema_changed,
};
pub use errors::{DomoError, DomoResult};
pub use record::{FieldDef, FieldKind, Record, RecordDescriptor, Reflect};
pub use reflect::{FieldInfo, Normalizer, RecordInfo, Reflector, ReflectorBuilder};
pub use types::{Column, ColumnType, Schema};

pub use domo_macros::DomoRecord;
