//! Table snapshots.
//!
//! A [`TableSnapshot`] is the last known column layout of a table: an
//! insertion-ordered collection of [`ColumnSpec`] keyed by unique column
//! name. Alter flows diff a caller-supplied snapshot against the desired
//! layout; persistence of snapshots between runs is the caller's job.

use std::path::Path;

use forge_ddl::ColumnSpec;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Insertion-ordered column layout of one table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableSnapshot {
    columns: Vec<ColumnSpec>,
}

impl TableSnapshot {
    /// Creates an empty snapshot.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            columns: Vec::new(),
        }
    }

    /// Builds a snapshot from columns, keeping the first occurrence of each
    /// name.
    #[must_use]
    pub fn from_columns(columns: Vec<ColumnSpec>) -> Self {
        let mut snapshot = Self::new();
        for column in columns {
            snapshot.insert(column);
        }
        snapshot
    }

    /// Loads a snapshot from a JSON file.
    ///
    /// Snapshot persistence between runs is the caller's job; this is the
    /// matching loader for snapshots written with [`serde_json`].
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }

    /// Inserts a column. An existing column with the same name is replaced
    /// in place, preserving its position.
    pub fn insert(&mut self, column: ColumnSpec) {
        match self.columns.iter_mut().find(|c| c.name == column.name) {
            Some(existing) => *existing = column,
            None => self.columns.push(column),
        }
    }

    /// Renames a column in place, preserving its position and shape.
    /// Returns false when the column does not exist.
    pub fn rename(&mut self, from: &str, to: &str) -> bool {
        match self.columns.iter_mut().find(|c| c.name == from) {
            Some(column) => {
                column.name = to.to_string();
                true
            }
            None => false,
        }
    }

    /// Gets a column by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ColumnSpec> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Returns the insertion-order index of a column.
    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Columns in insertion order.
    #[must_use]
    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    /// Column names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Number of columns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether the snapshot has no columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
