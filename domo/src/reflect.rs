use std::any::TypeId;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use crate::record::{Record, RecordDescriptor};
use crate::tags::{DEFAULT_TAG_SEPARATOR, parse_tag};
use crate::types::{Column, ColumnType, Schema};

/// Rewrites field and tag names before they become column names.
pub type Normalizer = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// The identity normalizer.
pub fn default_normalizer() -> Normalizer {
    Arc::new(|name: &str| name.to_string())
}

/// One flattened leaf field of a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldInfo {
    /// Accepted names; the first one is the column name.
    pub keys: Vec<String>,
    pub omit_empty: bool,
    pub column_type: ColumnType,
    /// Field positions from the outermost record down to this field.
    pub index_chain: Vec<usize>,
}

impl FieldInfo {
    /// Column name: the first key, or `""` when there are none.
    pub fn name(&self) -> &str {
        self.keys.first().map_or("", String::as_str)
    }

    pub fn matches_key(&self, key: &str) -> bool {
        let trimmed = key.trim();
        self.keys.iter().any(|k| k == key || k == trimmed)
    }

    pub fn to_column(&self) -> Column {
        Column::new(self.name(), self.column_type)
    }
}

/// Flattened field list of a record type.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RecordInfo {
    pub fields: Vec<FieldInfo>,
}

impl RecordInfo {
    pub fn to_schema(&self) -> Schema {
        self.fields.iter().map(FieldInfo::to_column).collect()
    }

    pub fn field(&self, key: &str) -> Option<&FieldInfo> {
        self.fields.iter().find(|f| f.matches_key(key))
    }
}

/// Derives dataset schemas from record types.
///
/// Results are cached per type. Lookups share a read lock; a miss computes
/// the field list without holding any lock and then inserts it, so two
/// threads racing on the same type may both compute it, and the first insert
/// wins.
pub struct Reflector {
    normalizer: Normalizer,
    tag_separator: String,
    cache: RwLock<HashMap<TypeId, Arc<RecordInfo>>>,
}

impl Default for Reflector {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Reflector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reflector")
            .field("tag_separator", &self.tag_separator)
            .field("cached_types", &self.cached_types())
            .finish_non_exhaustive()
    }
}

impl Reflector {
    pub fn new() -> Self {
        Self::builder().build()
    }

    pub fn builder() -> ReflectorBuilder {
        ReflectorBuilder::default()
    }

    /// Schema for `T`, computed once per reflector.
    pub fn generate_schema<T: Record>(&self) -> Schema {
        self.record_info::<T>().to_schema()
    }

    /// Flattened field list for `T`, computed once per reflector.
    pub fn record_info<T: Record>(&self) -> Arc<RecordInfo> {
        let key = TypeId::of::<T>();
        if let Some(info) = self
            .cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
        {
            return Arc::clone(info);
        }

        let descriptor = T::describe();
        let info = Arc::new(self.flatten(&descriptor));
        log::debug!(
            "reflected {} into {} columns",
            descriptor.name,
            info.fields.len()
        );

        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(cache.entry(key).or_insert(info))
    }

    /// Schema for a hand-built descriptor. Not cached.
    pub fn schema_for(&self, descriptor: &RecordDescriptor) -> Schema {
        self.flatten(descriptor).to_schema()
    }

    /// Field list for a hand-built descriptor. Not cached.
    pub fn flatten(&self, descriptor: &RecordDescriptor) -> RecordInfo {
        let mut fields = Vec::with_capacity(descriptor.fields.len());
        self.collect_fields(descriptor, &[], &mut fields);
        RecordInfo { fields }
    }

    pub fn cached_types(&self) -> usize {
        self.cache.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn clear_cache(&self) {
        self.cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    // Recursion depth follows the record nesting; cyclic records overflow.
    fn collect_fields(&self, record: &RecordDescriptor, parent_chain: &[usize], out: &mut Vec<FieldInfo>) {
        for (index, field) in record.fields.iter().enumerate() {
            if !field.visible {
                continue;
            }

            let mut index_chain = parent_chain.to_vec();
            index_chain.push(index);

            // Nested records contribute their columns here, ahead of the field itself.
            if let Some(nested) = field.kind.as_record() {
                self.collect_fields(nested, &index_chain, out);
            }

            if field.embedded {
                continue;
            }

            let tag = parse_tag(
                field.tag.as_deref().unwrap_or_default(),
                &self.tag_separator,
                |name| (self.normalizer)(name),
            );
            if tag.is_excluded() {
                continue;
            }

            out.push(FieldInfo {
                keys: tag.canonical_keys((self.normalizer)(&field.ident)),
                omit_empty: tag.omit_empty,
                column_type: tag
                    .column_type
                    .unwrap_or_else(|| field.kind.default_column_type()),
                index_chain,
            });
        }
    }
}

/// Configures a [`Reflector`].
pub struct ReflectorBuilder {
    normalizer: Normalizer,
    tag_separator: String,
}

impl Default for ReflectorBuilder {
    fn default() -> Self {
        Self {
            normalizer: default_normalizer(),
            tag_separator: DEFAULT_TAG_SEPARATOR.to_string(),
        }
    }
}

impl ReflectorBuilder {
    pub fn normalizer<F>(mut self, normalizer: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.normalizer = Arc::new(normalizer);
        self
    }

    pub fn tag_separator(mut self, separator: impl Into<String>) -> Self {
        self.tag_separator = separator.into();
        self
    }

    pub fn build(self) -> Reflector {
        Reflector {
            normalizer: self.normalizer,
            tag_separator: self.tag_separator,
            cache: RwLock::new(HashMap::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{FieldDef, FieldKind};

    fn sample() -> RecordDescriptor {
        RecordDescriptor::new("Sample")
            .field(FieldDef::of::<String>("Foo").tag(""))
            .field(FieldDef::of::<i64>("Bar").tag("bar"))
            .field(FieldDef::of::<f64>("Baz").tag("baz,Baz"))
            .field(FieldDef::of::<String>("IgnoreFooBar").tag("-"))
            .field(FieldDef::of::<i32>("BazBar"))
            .field(FieldDef::of::<Option<i32>>("OptionalBar").tag("obar,omitempty"))
            .field(FieldDef::of::<Option<f32>>("OptionalBaz").tag("obaz, omitempty"))
    }

    fn names(schema: &Schema) -> Vec<&str> {
        schema.columns.iter().map(|c| c.name.as_str()).collect()
    }

    #[test]
    fn flat_record_keeps_declaration_order() {
        let schema = Reflector::new().schema_for(&sample());
        assert_eq!(names(&schema), ["Foo", "bar", "baz", "BazBar", "obar", "obaz"]);
        let types: Vec<_> = schema.columns.iter().map(|c| c.column_type).collect();
        assert_eq!(
            types,
            [
                ColumnType::String,
                ColumnType::Long,
                ColumnType::Double,
                ColumnType::Long,
                ColumnType::Long,
                ColumnType::Double,
            ]
        );
    }

    #[test]
    fn field_info_tracks_keys_and_index_chain() {
        let info = Reflector::new().flatten(&sample());
        let baz = info.field("Baz").unwrap();
        assert_eq!(baz.keys, ["baz", "Baz"]);
        assert_eq!(baz.index_chain, [2]);
        assert!(info.field(" baz ").is_some());

        let obar = info.field("obar").unwrap();
        assert!(obar.omit_empty);
        assert_eq!(obar.index_chain, [5]);
        assert!(info.field("IgnoreFooBar").is_none());
    }

    #[test]
    fn field_info_without_keys_has_empty_name() {
        let info = FieldInfo {
            keys: Vec::new(),
            omit_empty: false,
            column_type: ColumnType::Long,
            index_chain: vec![0],
        };
        assert_eq!(info.name(), "");
        assert_eq!(info.to_column(), Column::new("", ColumnType::Long));
        assert!(!info.matches_key(""));
    }

    #[test]
    fn private_fields_are_skipped() {
        let record = RecordDescriptor::new("Row")
            .field(FieldDef::of::<i64>("id"))
            .field(FieldDef::of::<String>("token").visible(false));
        let schema = Reflector::new().schema_for(&record);
        assert_eq!(names(&schema), ["id"]);
    }

    #[test]
    fn nested_record_columns_come_before_the_field() {
        let record = RecordDescriptor::new("Outer")
            .field(FieldDef::of::<i64>("id"))
            .field(FieldDef::new("inner", FieldKind::Record(sample())))
            .field(FieldDef::of::<bool>("done"));
        let info = Reflector::new().flatten(&record);
        let schema = info.to_schema();
        assert_eq!(
            names(&schema),
            ["id", "Foo", "bar", "baz", "BazBar", "obar", "obaz", "inner", "done"]
        );
        assert_eq!(schema.columns[7].column_type, ColumnType::String);
        assert_eq!(info.field("bar").unwrap().index_chain, [1, 1]);
    }

    #[test]
    fn embedded_record_has_no_column_of_its_own() {
        let record = RecordDescriptor::new("Outer")
            .field(FieldDef::new("Sample", FieldKind::Record(sample())).embedded(true).tag("sample"))
            .field(FieldDef::of::<bool>("done"));
        let schema = Reflector::new().schema_for(&record);
        assert_eq!(names(&schema), ["Foo", "bar", "baz", "BazBar", "obar", "obaz", "done"]);
    }

    #[test]
    fn embedded_scalar_produces_nothing() {
        let record = RecordDescriptor::new("Outer")
            .field(FieldDef::of::<String>("Label").embedded(true))
            .field(FieldDef::of::<u8>("n"));
        let schema = Reflector::new().schema_for(&record);
        assert_eq!(names(&schema), ["n"]);
    }

    #[test]
    fn normalizer_applies_to_idents_and_tags() {
        let reflector = Reflector::builder().normalizer(|s| s.to_lowercase()).build();
        let schema = reflector.schema_for(&sample());
        assert_eq!(names(&schema), ["foo", "bar", "baz", "bazbar", "obar", "obaz"]);
    }

    #[test]
    fn custom_tag_separator() {
        let record = RecordDescriptor::new("Row").field(FieldDef::of::<f64>("amount").tag("total|DECIMAL"));
        let reflector = Reflector::builder().tag_separator("|").build();
        let schema = reflector.schema_for(&record);
        assert_eq!(schema.columns, [Column::new("total", ColumnType::Decimal)]);
    }
}
