//! Dialect-aware DDL synthesis.
//!
//! `forge-ddl` is the pure, stateless half of the forge migration engine: it
//! maps (dialect, column operation) pairs to engine-specific SQL text. The
//! supported dialects form a closed set and every operation is total over it;
//! capability gaps (charset on SQL Server, identity reseed on Access, …)
//! degrade to an empty statement plus an advisory rather than invalid SQL.
//!
//! # Components
//!
//! - [`Dialect`] and [`DialectProfile`] — the capability table: one static
//!   profile per engine, so adding a dialect is a data change.
//! - [`ColumnSpec`] / [`ColumnOperation`] — the dialect-independent
//!   description of columns and atomic schema changes.
//! - [`Synthesizer`] — operation → SQL translation.
//! - [`NowExpr`] — fixed current date/time fragments per dialect.
//!
//! # Example
//!
//! ```
//! use forge_ddl::prelude::*;
//!
//! let synth = Synthesizer::new(Dialect::SqlServer);
//! let ddl = synth.column_ddl("t1", &ColumnOperation::rename("old_name", "new_name"));
//! assert_eq!(ddl.statements[0], "EXEC sp_rename 't1.old_name', 'new_name', 'COLUMN';\n");
//! ```
//!
//! No I/O happens here: executing the statements, transactions, and
//! reporting live in `forge-migrate`.

pub mod column;
pub mod dialect;
pub mod expr;
pub mod operation;
pub mod synthesis;

pub use column::{AutoIncrement, ColumnPosition, ColumnSpec, IndexKind};
pub use dialect::{Dialect, DialectProfile};
pub use expr::NowExpr;
pub use operation::ColumnOperation;
pub use synthesis::{Advisory, Capability, Synthesis, Synthesizer, TableOption};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::column::{AutoIncrement, ColumnPosition, ColumnSpec, IndexKind};
    pub use crate::dialect::Dialect;
    pub use crate::expr::NowExpr;
    pub use crate::operation::ColumnOperation;
    pub use crate::synthesis::{Advisory, Capability, Synthesis, Synthesizer, TableOption};
}
