//! Multi-dialect schema migration orchestration.
//!
//! `forge-migrate` pairs the pure synthesis layer in `forge-ddl` with
//! everything stateful about running a migration:
//!
//! - **Snapshots** ([`TableSnapshot`]) — the last known column layout of a
//!   table, supplied by the caller for alter flows.
//! - **Diff engine** ([`diff::Differ`]) — computes the minimal ordered list
//!   of column operations between a snapshot and the desired layout.
//! - **Blueprints** ([`TableBlueprint`]) — the fluent table definition that
//!   renders CREATE TABLE and ALTER batches.
//! - **Orchestrator** ([`Migrator`]) — drives create/alter/rename/drop flows
//!   with transactional safety and appends one [`report::ReportEntry`] per
//!   flow; failures become report entries, never panics or stray `Err`s.
//! - **Units** ([`unit::Migration`], [`unit::Seed`]) — chainable migration
//!   and seed definitions.
//!
//! # Example
//!
//! ```rust,ignore
//! use forge_migrate::prelude::*;
//!
//! let conn = SqlitePoolConnection::connect("sqlite:app.db").await?;
//! let mut fx = Migrator::new(conn, Dialect::Sqlite);
//!
//! let outcome = fx
//!     .create_table("users", true, |t| {
//!         t.add_column(ColumnSpec::new("id", "INTEGER").primary_key())
//!             .add_column(ColumnSpec::new("username", "TEXT").not_null());
//!     })
//!     .await;
//! assert!(outcome.passed());
//! ```

pub mod blueprint;
pub mod connection;
pub mod diff;
pub mod error;
pub mod migrator;
pub mod report;
pub mod snapshot;
pub mod unit;

pub use blueprint::TableBlueprint;
pub use connection::{Connection, SqlitePoolConnection};
pub use error::{ForgeError, Result};
pub use migrator::{FlowOutcome, FlowState, Migrator};
pub use report::MigrationReport;
pub use snapshot::TableSnapshot;

/// Prelude for convenient imports.
pub mod prelude {
    pub use forge_ddl::prelude::*;

    pub use crate::blueprint::TableBlueprint;
    pub use crate::connection::{Connection, SqlitePoolConnection};
    pub use crate::diff::{DiffOptions, Differ, TableDiff};
    pub use crate::error::{ForgeError, Result};
    pub use crate::migrator::{FlowOutcome, FlowState, Migrator};
    pub use crate::report::{ConsoleSink, MigrationReport, NullSink, ReportSink};
    pub use crate::snapshot::TableSnapshot;
    pub use crate::unit::{Chained, InvokeChain, Migration, Seed};
}
