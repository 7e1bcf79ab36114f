//! Error types for the migration engine.

/// Errors that can occur while preparing or executing a migration flow.
///
/// Unsupported dialect capabilities are deliberately absent: those degrade to
/// advisories at the synthesis layer, never errors.
#[derive(Debug, thiserror::Error)]
pub enum ForgeError {
    /// A flow was started with an empty table name.
    #[error("Table name must not be empty")]
    EmptyTableName,

    /// An operation referenced an empty column name.
    #[error("Column name must not be empty")]
    EmptyColumnName,

    /// A rename flow was given an empty target name.
    #[error("Rename target must not be empty")]
    EmptyRenameTarget,

    /// A table definition callback produced no columns.
    #[error("Table definition for '{table}' produced no columns")]
    EmptyDefinition {
        /// The table being defined.
        table: String,
    },

    /// A statement reported zero affected rows where success was expected.
    #[error("Statement affected no rows: {sql}")]
    NoRowsAffected {
        /// The offending statement.
        sql: String,
    },

    /// Execution failure raised by a connection implementation.
    #[error("Execution failure: {0}")]
    Execution(String),

    /// Database error from the sqlx-backed connection.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Serialization error (snapshot loading).
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error (snapshot loading).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for migration operations.
pub type Result<T> = std::result::Result<T, ForgeError>;
