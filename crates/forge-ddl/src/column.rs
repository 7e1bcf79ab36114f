//! Column descriptions.
//!
//! A [`ColumnSpec`] is the immutable value exchanged between the table
//! builder, the diff engine, and the synthesizer. Type and attribute strings
//! are pre-rendered by the caller and treated as opaque; only the fields the
//! diff engine must reason about independently (nullability, default,
//! charset, collation, position) are kept structured.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Where a column sits relative to its neighbours.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnPosition {
    /// First column of the table.
    First,
    /// Immediately after the named column.
    After(String),
}

impl fmt::Display for ColumnPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::First => f.write_str("FIRST"),
            Self::After(column) => write!(f, "AFTER {column}"),
        }
    }
}

/// The kind of index declared on a single column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IndexKind {
    /// Part of the primary key.
    Primary,
    /// Unique index.
    Unique,
    /// Plain secondary index.
    Index,
}

/// Auto-increment parameters for a column.
///
/// Start and step only matter on dialects whose grammar is parameterized
/// (`IDENTITY(start,step)`); flag-style dialects ignore them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoIncrement {
    /// First value handed out.
    pub start: u64,
    /// Increment between values.
    pub step: u64,
}

impl Default for AutoIncrement {
    fn default() -> Self {
        Self { start: 1, step: 1 }
    }
}

/// Description of one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSpec {
    /// Column name.
    pub name: String,
    /// Rendered type with length, e.g. `VARCHAR(255)`.
    pub type_def: String,
    /// Rendered extra attributes, e.g. `UNSIGNED`. May be empty.
    pub attrs: String,
    /// Whether the column accepts NULL.
    pub nullable: bool,
    /// Rendered default value literal or expression.
    pub default: Option<String>,
    /// Position directive, used when adding or moving.
    pub position: Option<ColumnPosition>,
    /// Index declared on this column.
    pub index: Option<IndexKind>,
    /// Character set.
    pub charset: Option<String>,
    /// Collation.
    pub collation: Option<String>,
    /// Auto-increment parameters.
    pub increment: Option<AutoIncrement>,
}

impl ColumnSpec {
    /// Creates a nullable column with the given rendered type.
    #[must_use]
    pub fn new(name: impl Into<String>, type_def: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            type_def: type_def.into(),
            attrs: String::new(),
            nullable: true,
            default: None,
            position: None,
            index: None,
            charset: None,
            collation: None,
            increment: None,
        }
    }

    /// Sets the rendered attribute string.
    #[must_use]
    pub fn attrs(mut self, attrs: impl Into<String>) -> Self {
        self.attrs = attrs.into();
        self
    }

    /// Marks the column NOT NULL.
    #[must_use]
    pub fn not_null(mut self) -> Self {
        self.nullable = false;
        self
    }

    /// Sets the default value.
    #[must_use]
    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        self.default = Some(value.into());
        self
    }

    /// Positions the column first.
    #[must_use]
    pub fn first(mut self) -> Self {
        self.position = Some(ColumnPosition::First);
        self
    }

    /// Positions the column after another.
    #[must_use]
    pub fn after(mut self, column: impl Into<String>) -> Self {
        self.position = Some(ColumnPosition::After(column.into()));
        self
    }

    /// Declares the column part of the primary key. Primary keys are NOT NULL.
    #[must_use]
    pub fn primary_key(mut self) -> Self {
        self.index = Some(IndexKind::Primary);
        self.nullable = false;
        self
    }

    /// Declares a unique index on the column.
    #[must_use]
    pub fn unique(mut self) -> Self {
        self.index = Some(IndexKind::Unique);
        self
    }

    /// Declares a plain secondary index on the column.
    #[must_use]
    pub fn indexed(mut self) -> Self {
        self.index = Some(IndexKind::Index);
        self
    }

    /// Sets the character set.
    #[must_use]
    pub fn charset(mut self, charset: impl Into<String>) -> Self {
        self.charset = Some(charset.into());
        self
    }

    /// Sets the collation.
    #[must_use]
    pub fn collation(mut self, collation: impl Into<String>) -> Self {
        self.collation = Some(collation.into());
        self
    }

    /// Enables auto-increment with the given start and step.
    #[must_use]
    pub fn auto_increment(mut self, start: u64, step: u64) -> Self {
        self.increment = Some(AutoIncrement { start, step });
        self
    }

    /// Structural equality, ignoring name, position, and index kind.
    ///
    /// This is the comparison the diff engine uses: two columns with the same
    /// shape require no operation even if one carries a position directive.
    #[must_use]
    pub fn same_shape(&self, other: &Self) -> bool {
        self.type_def == other.type_def
            && self.attrs == other.attrs
            && self.nullable == other.nullable
            && self.default == other.default
            && self.charset == other.charset
            && self.collation == other.collation
    }
}
