//! Comparison of a locally derived schema against a remote dataset schema.
//!
//! When both schemas have the same number of columns they are compared
//! index by index, reporting renames and type changes. Otherwise columns are
//! matched by name, reporting type changes plus columns to add to or delete
//! from the remote schema. In that mode a rename shows up as a deletion of
//! the old name and an addition of the new one.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::types::{Column, ColumnType, Schema};

/// One discrepancy between a local and a remote schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaMismatch {
    pub remote_column_index: Option<usize>,
    pub remote_column_name: Option<String>,
    pub compared_column_name: Option<String>,
    pub remote_column_type: Option<ColumnType>,
    pub compared_column_type: Option<ColumnType>,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MismatchKind {
    ColumnName,
    ColumnType,
    DeleteFromRemote,
    AddToRemote,
}

impl fmt::Display for MismatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MismatchKind::ColumnName => write!(f, "~name"),
            MismatchKind::ColumnType => write!(f, "~type"),
            MismatchKind::DeleteFromRemote => write!(f, "-"),
            MismatchKind::AddToRemote => write!(f, "+"),
        }
    }
}

/// All differences found by one comparison, grouped by kind.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct SchemaDiff {
    pub name_mismatches: Vec<SchemaMismatch>,
    pub type_mismatches: Vec<SchemaMismatch>,
    /// Remote columns with no local counterpart.
    pub columns_to_delete: Vec<SchemaMismatch>,
    /// Local columns with no remote counterpart.
    pub columns_to_add: Vec<SchemaMismatch>,
}

impl SchemaDiff {
    pub fn diffs_count(&self) -> usize {
        self.name_mismatches.len()
            + self.type_mismatches.len()
            + self.columns_to_delete.len()
            + self.columns_to_add.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diffs_count() == 0
    }

    /// True when every difference is a positional rename.
    pub fn only_column_name_changes(&self) -> bool {
        self.type_mismatches.is_empty() && self.columns_to_add.is_empty() && self.columns_to_delete.is_empty()
    }

    /// Appends each category of `other` after this diff's entries.
    pub fn merge(&mut self, other: SchemaDiff) {
        self.name_mismatches.extend(other.name_mismatches);
        self.type_mismatches.extend(other.type_mismatches);
        self.columns_to_delete.extend(other.columns_to_delete);
        self.columns_to_add.extend(other.columns_to_add);
    }

    /// Every mismatch in report order: names, types, deletions, additions.
    pub fn iter(&self) -> impl Iterator<Item = (MismatchKind, &SchemaMismatch)> {
        tagged(MismatchKind::ColumnName, &self.name_mismatches)
            .chain(tagged(MismatchKind::ColumnType, &self.type_mismatches))
            .chain(tagged(MismatchKind::DeleteFromRemote, &self.columns_to_delete))
            .chain(tagged(MismatchKind::AddToRemote, &self.columns_to_add))
    }
}

fn tagged(kind: MismatchKind, list: &[SchemaMismatch]) -> impl Iterator<Item = (MismatchKind, &SchemaMismatch)> {
    list.iter().map(move |m| (kind, m))
}

impl fmt::Display for SchemaDiff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} schema differences found:", self.diffs_count())?;
        for (_, mismatch) in self.iter() {
            write!(f, "\n{}", mismatch.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for SchemaDiff {}

/// Compares `local` against `remote`, by position when the column counts
/// match and by name otherwise.
pub fn diff(local: &Schema, remote: &Schema) -> SchemaDiff {
    if local.len() == remote.len() {
        diff_by_position(local, remote)
    } else {
        diff_by_name(local, remote)
    }
}

/// `Ok(())` when nothing differs, otherwise the full diff as the error.
pub fn find_schema_changes(current: &Schema, remote: &Schema) -> Result<(), SchemaDiff> {
    let diffs = diff(current, remote);
    if diffs.is_empty() { Ok(()) } else { Err(diffs) }
}

pub fn has_schema_changed(current: &Schema, remote: &Schema) -> bool {
    if current.len() != remote.len() {
        return true;
    }
    diff_by_position(current, remote).diffs_count() > 0
}

/// Index-by-index comparison. Columns past the shorter schema are ignored.
pub fn diff_by_position(local: &Schema, remote: &Schema) -> SchemaDiff {
    let mut diffs = SchemaDiff::default();

    for (index, (ours, theirs)) in local.columns.iter().zip(&remote.columns).enumerate() {
        if ours.name != theirs.name {
            diffs.name_mismatches.push(SchemaMismatch {
                remote_column_index: Some(index),
                remote_column_name: Some(theirs.name.clone()),
                compared_column_name: Some(ours.name.clone()),
                remote_column_type: Some(theirs.column_type),
                compared_column_type: Some(ours.column_type),
                message: format!(
                    "Column Name Change: Expected column {index} to be named {}, currently it's called {}",
                    ours.name, theirs.name
                ),
            });
        }
        if ours.column_type != theirs.column_type {
            diffs.type_mismatches.push(SchemaMismatch {
                remote_column_index: Some(index),
                remote_column_name: Some(theirs.name.clone()),
                compared_column_name: Some(ours.name.clone()),
                remote_column_type: Some(theirs.column_type),
                compared_column_type: Some(ours.column_type),
                message: format!(
                    "Column Type Change: Expected column ({index}) {} to be type {}, remote type is {}",
                    ours.name, ours.column_type, theirs.column_type
                ),
            });
        }
    }

    diffs
}

/// Name-matched comparison for schemas of different lengths.
///
/// Duplicate names resolve to the last column carrying them; the earlier
/// ones are logged and otherwise ignored.
pub fn diff_by_name(local: &Schema, remote: &Schema) -> SchemaDiff {
    let mut diffs = SchemaDiff::default();
    let local_by_name = index_by_name(local, "local");
    let remote_by_name = index_by_name(remote, "remote");

    for (index, theirs) in remote.columns.iter().enumerate() {
        if remote_by_name.get(theirs.name.as_str()).map(|(i, _)| *i) != Some(index) {
            continue;
        }
        match local_by_name.get(theirs.name.as_str()) {
            Some((_, ours)) => {
                if ours.column_type != theirs.column_type {
                    diffs.type_mismatches.push(SchemaMismatch {
                        remote_column_index: Some(index),
                        remote_column_name: Some(theirs.name.clone()),
                        compared_column_name: Some(ours.name.clone()),
                        remote_column_type: Some(theirs.column_type),
                        compared_column_type: Some(ours.column_type),
                        message: format!(
                            "Column Type Change: Expected column {} ({index}) to be type {} (current remote type), found local type {}",
                            theirs.name, theirs.column_type, ours.column_type
                        ),
                    });
                }
            }
            None => diffs.columns_to_delete.push(SchemaMismatch {
                remote_column_index: Some(index),
                remote_column_name: Some(theirs.name.clone()),
                compared_column_name: None,
                remote_column_type: Some(theirs.column_type),
                compared_column_type: None,
                message: format!(
                    "Missing Column: remote column {} {} ({}) has no local counterpart; it is either missing locally or should be deleted from the remote schema",
                    index, theirs.name, theirs.column_type
                ),
            }),
        }
    }

    for (index, ours) in local.columns.iter().enumerate() {
        if local_by_name.get(ours.name.as_str()).map(|(i, _)| *i) != Some(index) {
            continue;
        }
        if !remote_by_name.contains_key(ours.name.as_str()) {
            diffs.columns_to_add.push(SchemaMismatch {
                remote_column_index: None,
                remote_column_name: None,
                compared_column_name: Some(ours.name.clone()),
                remote_column_type: None,
                compared_column_type: Some(ours.column_type),
                message: format!(
                    "Extra Column Found: local column {} ({}) is not in the remote schema; it is either extra locally or should be added to the remote schema",
                    ours.name, ours.column_type
                ),
            });
        }
    }

    diffs
}

fn index_by_name<'a>(schema: &'a Schema, side: &str) -> HashMap<&'a str, (usize, &'a Column)> {
    let mut by_name = HashMap::with_capacity(schema.len());
    for (index, column) in schema.columns.iter().enumerate() {
        if let Some((previous, _)) = by_name.insert(column.name.as_str(), (index, column)) {
            log::warn!(
                "duplicate column name `{}` in {side} schema (indexes {previous} and {index}); keeping the last",
                column.name
            );
        }
    }
    by_name
}
