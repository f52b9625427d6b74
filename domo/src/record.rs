//! Type descriptors consumed by the [`Reflector`](crate::reflect::Reflector).
//!
//! A record type describes itself through [`Record::describe`], usually
//! generated by `#[derive(DomoRecord)]`. Field types report what they are
//! through [`Reflect::kind`], which drives default column types and nested
//! record flattening.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::rc::Rc;
use std::sync::Arc;
use std::time::SystemTime;

use crate::types::ColumnType;

/// What a field's declared type looks like to the reflector.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Integer,
    Float,
    Text,
    Boolean,
    Timestamp,
    Date,
    /// A nested record whose fields get flattened into the parent.
    Record(RecordDescriptor),
    Other,
}

impl FieldKind {
    /// Column type used when a field's tag does not name one.
    pub fn default_column_type(&self) -> ColumnType {
        match self {
            FieldKind::Integer => ColumnType::Long,
            FieldKind::Float => ColumnType::Double,
            FieldKind::Text | FieldKind::Boolean => ColumnType::String,
            FieldKind::Timestamp => ColumnType::Datetime,
            FieldKind::Date => ColumnType::Date,
            FieldKind::Record(_) | FieldKind::Other => ColumnType::String,
        }
    }

    pub fn as_record(&self) -> Option<&RecordDescriptor> {
        match self {
            FieldKind::Record(record) => Some(record),
            _ => None,
        }
    }
}

/// Reports the [`FieldKind`] of a type.
///
/// Types the reflector has no special knowledge of can opt in with an empty
/// impl, which reports [`FieldKind::Other`] and maps to `STRING`:
///
/// ```
/// enum Region { North, South }
/// impl domo::Reflect for Region {}
/// ```
pub trait Reflect {
    /// Set by pointer-like wrappers. A wrapper only looks through a type
    /// that is not itself a wrapper, so nested indirection reports `Other`.
    const INDIRECT: bool = false;

    fn kind() -> FieldKind {
        FieldKind::Other
    }
}

/// A record type that can be turned into a dataset schema.
///
/// This trait is automatically implemented by `#[derive(DomoRecord)]`.
pub trait Record: Reflect + 'static {
    fn describe() -> RecordDescriptor;
}

/// One declared field of a record.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDef {
    /// Field identifier as declared.
    pub ident: String,
    /// Raw `domo` tag string, if any.
    pub tag: Option<String>,
    /// Embedded fields are flattened without a column of their own.
    pub embedded: bool,
    /// Private fields never produce columns.
    pub visible: bool,
    pub kind: FieldKind,
}

impl FieldDef {
    pub fn new(ident: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            ident: ident.into(),
            tag: None,
            embedded: false,
            visible: true,
            kind,
        }
    }

    /// Field whose kind comes from its Rust type.
    pub fn of<T: Reflect + ?Sized>(ident: impl Into<String>) -> Self {
        Self::new(ident, T::kind())
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub fn embedded(mut self, embedded: bool) -> Self {
        self.embedded = embedded;
        self
    }

    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }
}

/// Declared shape of a record type: its name and fields in declaration order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RecordDescriptor {
    pub name: String,
    pub fields: Vec<FieldDef>,
}

impl RecordDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    pub fn field(mut self, field: FieldDef) -> Self {
        self.fields.push(field);
        self
    }
}

macro_rules! reflect_as {
    ($kind:ident => $($ty:ty),+ $(,)?) => {
        $(
            impl Reflect for $ty {
                fn kind() -> FieldKind {
                    FieldKind::$kind
                }
            }
        )+
    };
}

reflect_as!(Integer => i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
reflect_as!(Float => f32, f64);
reflect_as!(Text => String, str, char);
reflect_as!(Boolean => bool);
reflect_as!(Timestamp => SystemTime, chrono::NaiveDateTime);
reflect_as!(Date => chrono::NaiveDate);

impl<Tz: chrono::TimeZone> Reflect for chrono::DateTime<Tz> {
    fn kind() -> FieldKind {
        FieldKind::Timestamp
    }
}

macro_rules! reflect_through {
    ($($wrapper:ident),+) => {
        $(
            impl<T: Reflect + ?Sized> Reflect for $wrapper<T> {
                const INDIRECT: bool = true;

                fn kind() -> FieldKind {
                    through::<T>()
                }
            }
        )+
    };
}

fn through<T: Reflect + ?Sized>() -> FieldKind {
    if T::INDIRECT { FieldKind::Other } else { T::kind() }
}

impl<T: Reflect> Reflect for Option<T> {
    const INDIRECT: bool = true;

    fn kind() -> FieldKind {
        through::<T>()
    }
}

reflect_through!(Box, Arc, Rc);

impl<T: Reflect + ?Sized> Reflect for &T {
    const INDIRECT: bool = true;

    fn kind() -> FieldKind {
        through::<T>()
    }
}

impl<T> Reflect for Vec<T> {}
impl<T> Reflect for [T] {}
impl<T> Reflect for HashSet<T> {}
impl<K, V> Reflect for HashMap<K, V> {}
impl<K, V> Reflect for BTreeMap<K, V> {}
impl Reflect for serde_json::Value {}
impl Reflect for uuid::Uuid {}
