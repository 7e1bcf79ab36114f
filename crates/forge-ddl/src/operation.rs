//! Column operations.
//!
//! A [`ColumnOperation`] is one atomic, dialect-independent schema change.
//! The diff engine produces them; the synthesizer turns them into SQL.

use serde::{Deserialize, Serialize};

use crate::column::{ColumnPosition, ColumnSpec};

/// One atomic change to a table's columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ColumnOperation {
    /// Add a new column.
    Add {
        /// The column to add.
        spec: ColumnSpec,
    },

    /// Change a column's type or attributes.
    Modify {
        /// The desired column definition.
        spec: ColumnSpec,
    },

    /// Rename a column.
    Rename {
        /// Current name.
        from: String,
        /// New name.
        to: String,
    },

    /// Drop a column.
    Drop {
        /// Column name.
        column: String,
    },

    /// Reposition a column.
    Move {
        /// The column being moved (full definition; some dialects must
        /// restate it).
        spec: ColumnSpec,
        /// Target position.
        position: ColumnPosition,
    },

    /// Set a column default.
    SetDefault {
        /// Column name.
        column: String,
        /// Rendered default value.
        value: String,
    },

    /// Remove a column default.
    DropDefault {
        /// Column name.
        column: String,
    },

    /// Change a column's nullability.
    SetNullable {
        /// The column (some dialects must restate the type).
        spec: ColumnSpec,
        /// Whether the column should accept NULL.
        nullable: bool,
    },

    /// Change a column's visibility (MySQL invisible columns).
    SetVisibility {
        /// Column name.
        column: String,
        /// Whether the column should be visible.
        visible: bool,
    },

    /// Change a column's character set.
    SetCharset {
        /// The column (the statement restates the type).
        spec: ColumnSpec,
        /// Character set name.
        charset: String,
    },

    /// Change a column's collation.
    SetCollation {
        /// The column (the statement restates the type).
        spec: ColumnSpec,
        /// Collation name.
        collation: String,
    },

    /// Create a secondary index.
    AddIndex {
        /// Index name.
        name: String,
        /// Indexed columns.
        columns: Vec<String>,
        /// Whether the index is unique.
        unique: bool,
    },

    /// Drop a secondary index.
    DropIndex {
        /// Index name.
        name: String,
    },

    /// Replace the table's primary key.
    SetPrimaryKey {
        /// Key columns.
        columns: Vec<String>,
    },
}

impl ColumnOperation {
    /// Creates an Add operation.
    #[must_use]
    pub const fn add(spec: ColumnSpec) -> Self {
        Self::Add { spec }
    }

    /// Creates a Rename operation.
    #[must_use]
    pub fn rename(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self::Rename {
            from: from.into(),
            to: to.into(),
        }
    }

    /// Creates a Drop operation.
    #[must_use]
    pub fn drop(column: impl Into<String>) -> Self {
        Self::Drop {
            column: column.into(),
        }
    }

    /// Returns a human-readable description of this operation.
    #[must_use]
    pub fn description(&self) -> String {
        match self {
            Self::Add { spec } => format!("Add column '{}'", spec.name),
            Self::Modify { spec } => format!("Modify column '{}'", spec.name),
            Self::Rename { from, to } => format!("Rename column '{from}' to '{to}'"),
            Self::Drop { column } => format!("Drop column '{column}'"),
            Self::Move { spec, position } => {
                format!("Move column '{}' {position}", spec.name)
            }
            Self::SetDefault { column, value } => {
                format!("Set default of '{column}' to {value}")
            }
            Self::DropDefault { column } => format!("Drop default of '{column}'"),
            Self::SetNullable { spec, nullable } => {
                if *nullable {
                    format!("Make column '{}' nullable", spec.name)
                } else {
                    format!("Make column '{}' NOT NULL", spec.name)
                }
            }
            Self::SetVisibility { column, visible } => {
                if *visible {
                    format!("Make column '{column}' visible")
                } else {
                    format!("Make column '{column}' invisible")
                }
            }
            Self::SetCharset { spec, charset } => {
                format!("Set charset of '{}' to {charset}", spec.name)
            }
            Self::SetCollation { spec, collation } => {
                format!("Set collation of '{}' to {collation}", spec.name)
            }
            Self::AddIndex { name, .. } => format!("Create index '{name}'"),
            Self::DropIndex { name } => format!("Drop index '{name}'"),
            Self::SetPrimaryKey { columns } => {
                format!("Set primary key ({})", columns.join(", "))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptions() {
        let op = ColumnOperation::add(ColumnSpec::new("email", "VARCHAR(255)"));
        assert_eq!(op.description(), "Add column 'email'");

        let op = ColumnOperation::rename("old_name", "new_name");
        assert_eq!(op.description(), "Rename column 'old_name' to 'new_name'");

        let op = ColumnOperation::SetPrimaryKey {
            columns: vec!["id".to_string(), "tenant".to_string()],
        };
        assert_eq!(op.description(), "Set primary key (id, tenant)");
    }
}
