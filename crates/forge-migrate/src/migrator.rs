//! Migration orchestration.
//!
//! [`Migrator`] drives the four table flows — create, alter, rename, drop —
//! against one connection. Alter, rename, and drop run inside a transaction;
//! create executes statement-by-statement (DDL creation is atomic per
//! statement). Every flow ends in a terminal [`FlowState`], appends exactly
//! one entry to the run's [`MigrationReport`], and never propagates a failure
//! to the caller: the report is the contract.

use forge_ddl::synthesis::Advisory;
use forge_ddl::{Dialect, Synthesizer};
use tracing::{debug, info, warn};

use crate::blueprint::TableBlueprint;
use crate::connection::Connection;
use crate::diff::DiffOptions;
use crate::error::ForgeError;
use crate::report::{MigrationReport, NullSink, ReportSink};
use crate::snapshot::TableSnapshot;

/// Lifecycle of one flow.
///
/// `Pending → Executing → { Committed, RolledBack, Skipped }`. `Skipped` is
/// reached only by an alter flow whose diff is empty; `RolledBack` by any
/// statement reporting zero affected rows or raising a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    /// Not yet started.
    Pending,
    /// Statements are being executed.
    Executing,
    /// All statements succeeded and the transaction (if any) committed.
    Committed,
    /// A statement failed or affected no rows; the transaction rolled back.
    RolledBack,
    /// Empty diff: nothing to execute.
    Skipped,
}

/// Terminal result of one flow.
#[derive(Debug, Clone)]
pub struct FlowOutcome {
    /// Table the flow targeted.
    pub table: String,
    /// Terminal state reached.
    pub state: FlowState,
    /// Human-readable outcome.
    pub message: String,
}

impl FlowOutcome {
    /// Whether the flow is considered successful.
    #[must_use]
    pub fn passed(&self) -> bool {
        matches!(self.state, FlowState::Committed | FlowState::Skipped)
    }
}

/// Orchestrates table flows against one connection.
pub struct Migrator<C: Connection> {
    conn: C,
    synth: Synthesizer,
    report: MigrationReport,
    sink: Box<dyn ReportSink>,
    diff_options: DiffOptions,
}

impl<C: Connection> Migrator<C> {
    /// Creates a migrator for the given connection and dialect, with a
    /// non-reporting sink.
    #[must_use]
    pub fn new(conn: C, dialect: Dialect) -> Self {
        Self {
            conn,
            synth: Synthesizer::new(dialect),
            report: MigrationReport::new(),
            sink: Box::new(NullSink),
            diff_options: DiffOptions::default(),
        }
    }

    /// Replaces the report sink.
    #[must_use]
    pub fn with_sink(mut self, sink: impl ReportSink + 'static) -> Self {
        self.sink = Box::new(sink);
        self
    }

    /// Allows alter flows to drop columns missing from the desired layout.
    #[must_use]
    pub fn allow_destructive(mut self, allow: bool) -> Self {
        self.diff_options.allow_destructive = allow;
        self
    }

    /// The dialect this migrator targets.
    #[must_use]
    pub const fn dialect(&self) -> Dialect {
        self.synth.dialect()
    }

    /// The run's report so far.
    #[must_use]
    pub const fn report(&self) -> &MigrationReport {
        &self.report
    }

    /// Borrows the underlying connection (e.g. for seeding).
    pub fn connection(&mut self) -> &mut C {
        &mut self.conn
    }

    /// Releases the connection; useful after a drop flow that prepares a
    /// drop-then-recreate cycle driven elsewhere.
    #[must_use]
    pub fn into_connection(self) -> C {
        self.conn
    }

    /// Creates a table from a blueprint definition.
    ///
    /// Runs outside an explicit transaction: table creation is treated as
    /// atomic per statement.
    pub async fn create_table(
        &mut self,
        table: &str,
        if_not_exists: bool,
        define: impl FnOnce(&mut TableBlueprint),
    ) -> FlowOutcome {
        let mut blueprint = TableBlueprint::new();
        define(&mut blueprint);

        if let Some(err) = validate(table, &blueprint) {
            return self.finish(table, FlowState::RolledBack, err.to_string());
        }
        if blueprint.is_empty() {
            let err = ForgeError::EmptyDefinition {
                table: table.to_string(),
            };
            return self.finish(table, FlowState::RolledBack, err.to_string());
        }

        let ddl = blueprint.create_ddl(&self.synth, table, if_not_exists);
        self.advise(&ddl.advisories);

        for sql in &ddl.statements {
            debug!(table = %table, sql = %sql.trim_end(), "create statement");
            match self.conn.exec(sql).await {
                Ok(0) => {
                    let err = ForgeError::NoRowsAffected {
                        sql: sql.trim_end().to_string(),
                    };
                    return self.finish(table, FlowState::RolledBack, err.to_string());
                }
                Ok(_) => {}
                Err(err) => return self.finish(table, FlowState::RolledBack, err.to_string()),
            }
        }

        self.finish(table, FlowState::Committed, format!("table '{table}' created"))
    }

    /// Alters a table toward a blueprint definition, diffed against the
    /// caller-supplied previous snapshot.
    pub async fn alter_table(
        &mut self,
        table: &str,
        previous: &TableSnapshot,
        define: impl FnOnce(&mut TableBlueprint),
    ) -> FlowOutcome {
        let mut blueprint = TableBlueprint::new();
        define(&mut blueprint);

        if let Some(err) = validate(table, &blueprint) {
            return self.finish(table, FlowState::RolledBack, err.to_string());
        }

        let ddl = blueprint.alter_ddl(&self.synth, table, previous, self.diff_options);
        self.advise(&ddl.advisories);
        if !ddl.skipped.is_empty() {
            info!(table = %table, columns = ?ddl.skipped, "columns protected from destructive drop");
        }

        if ddl.statements.is_empty() {
            let message = if ddl.skipped.is_empty() {
                "no changes".to_string()
            } else {
                format!("no changes (skipped: {})", ddl.skipped.join(", "))
            };
            return self.finish(table, FlowState::Skipped, message);
        }

        self.execute_in_transaction(table, &ddl.statements, format!("table '{table}' altered"))
            .await
    }

    /// Renames a table.
    pub async fn rename_table(&mut self, from: &str, to: &str) -> FlowOutcome {
        if from.is_empty() {
            let err = ForgeError::EmptyTableName;
            return self.finish(from, FlowState::RolledBack, err.to_string());
        }
        if to.is_empty() {
            let err = ForgeError::EmptyRenameTarget;
            return self.finish(from, FlowState::RolledBack, err.to_string());
        }

        let sql = self.synth.rename_table_ddl(from, to);
        self.execute_in_transaction(from, &[sql], format!("table '{from}' renamed to '{to}'"))
            .await
    }

    /// Drops a table. With `if_exists`, the synthesized statement carries
    /// `IF EXISTS` and the flow succeeds whenever the connection does.
    pub async fn drop_table(&mut self, table: &str, if_exists: bool) -> FlowOutcome {
        if table.is_empty() {
            let err = ForgeError::EmptyTableName;
            return self.finish(table, FlowState::RolledBack, err.to_string());
        }

        let sql = self.synth.drop_table_ddl(table, if_exists);
        self.execute_in_transaction(table, &[sql], format!("table '{table}' dropped"))
            .await
    }

    /// Executes a statement batch inside one transaction, committing only
    /// when every statement affects at least one row.
    async fn execute_in_transaction(
        &mut self,
        table: &str,
        statements: &[String],
        success: String,
    ) -> FlowOutcome {
        if let Err(err) = self.conn.begin().await {
            return self.finish(table, FlowState::RolledBack, err.to_string());
        }

        for sql in statements {
            debug!(table = %table, sql = %sql.trim_end(), "executing");
            let failure = match self.conn.exec(sql).await {
                Ok(0) => Some(
                    ForgeError::NoRowsAffected {
                        sql: sql.trim_end().to_string(),
                    }
                    .to_string(),
                ),
                Ok(_) => None,
                Err(err) => Some(err.to_string()),
            };
            if let Some(message) = failure {
                if let Err(err) = self.conn.rollback().await {
                    warn!(table = %table, error = %err, "rollback failed");
                }
                return self.finish(table, FlowState::RolledBack, message);
            }
        }

        match self.conn.commit().await {
            Ok(()) => self.finish(table, FlowState::Committed, success),
            Err(err) => self.finish(table, FlowState::RolledBack, err.to_string()),
        }
    }

    /// Records the terminal transition: one report entry, one sink call.
    fn finish(
        &mut self,
        table: &str,
        state: FlowState,
        message: impl Into<String>,
    ) -> FlowOutcome {
        let message = message.into();
        let outcome = FlowOutcome {
            table: table.to_string(),
            state,
            message: message.clone(),
        };

        if outcome.passed() {
            info!(table = %table, state = ?state, "{message}");
        } else {
            warn!(table = %table, state = ?state, "{message}");
        }

        let entry = self.report.record(table, message, outcome.passed());
        self.sink.report(entry);
        outcome
    }

    fn advise(&self, advisories: &[Advisory]) {
        for advisory in advisories {
            warn!(dialect = %advisory.dialect, "{advisory}");
        }
    }
}

/// Validation shared by the create and alter flows: reported immediately,
/// before any SQL is built.
fn validate(table: &str, blueprint: &TableBlueprint) -> Option<ForgeError> {
    if table.is_empty() {
        return Some(ForgeError::EmptyTableName);
    }
    if blueprint.columns().names().any(str::is_empty) {
        return Some(ForgeError::EmptyColumnName);
    }
    None
}

#[cfg(test)]
mod tests {
    use forge_ddl::ColumnSpec;

    use super::*;
    use crate::connection::{RecordingConnection, SqlitePoolConnection};

    fn recording(dialect: Dialect) -> Migrator<RecordingConnection> {
        Migrator::new(RecordingConnection::default(), dialect)
    }

    fn previous_users() -> TableSnapshot {
        TableSnapshot::from_columns(vec![
            ColumnSpec::new("id", "INTEGER").primary_key(),
            ColumnSpec::new("name", "TEXT"),
        ])
    }

    #[tokio::test]
    async fn test_create_flow_reports_success() {
        let mut fx = recording(Dialect::MySql);
        let outcome = fx
            .create_table("users", false, |t| {
                t.add_column(ColumnSpec::new("id", "BIGINT").primary_key());
            })
            .await;

        assert_eq!(outcome.state, FlowState::Committed);
        assert!(outcome.passed());
        assert_eq!(fx.report().len(), 1);
        assert!(fx.report().all_passed());
        // Create runs outside an explicit transaction.
        assert_eq!(fx.connection().begun, 0);
        assert_eq!(fx.connection().committed, 0);
    }

    #[tokio::test]
    async fn test_create_flow_rejects_empty_table_name() {
        let mut fx = recording(Dialect::MySql);
        let outcome = fx
            .create_table("", false, |t| {
                t.add_column(ColumnSpec::new("id", "BIGINT"));
            })
            .await;

        assert_eq!(outcome.state, FlowState::RolledBack);
        // Aborted before any SQL was built.
        assert!(fx.connection().executed.is_empty());
    }

    #[tokio::test]
    async fn test_create_flow_rejects_empty_column_name() {
        let mut fx = recording(Dialect::MySql);
        let outcome = fx
            .create_table("users", false, |t| {
                t.add_column(ColumnSpec::new("", "BIGINT"));
            })
            .await;

        assert_eq!(outcome.state, FlowState::RolledBack);
        assert!(fx.connection().executed.is_empty());
    }

    #[tokio::test]
    async fn test_create_flow_rejects_empty_definition() {
        let mut fx = recording(Dialect::MySql);
        let outcome = fx.create_table("users", false, |_| {}).await;

        assert_eq!(outcome.state, FlowState::RolledBack);
        assert!(fx.connection().executed.is_empty());
        assert!(!fx.report().all_passed());
    }

    #[tokio::test]
    async fn test_alter_flow_empty_diff_skips_without_transaction() {
        let previous = previous_users();
        let mut fx = recording(Dialect::MySql);
        let outcome = fx
            .alter_table("users", &previous, |t| {
                t.add_column(ColumnSpec::new("id", "INTEGER").primary_key())
                    .add_column(ColumnSpec::new("name", "TEXT"));
            })
            .await;

        assert_eq!(outcome.state, FlowState::Skipped);
        assert!(outcome.passed());
        assert_eq!(outcome.message, "no changes");
        assert_eq!(fx.connection().begun, 0);
        assert!(fx.connection().executed.is_empty());
    }

    #[tokio::test]
    async fn test_alter_flow_commits_batch_in_transaction() {
        let previous = previous_users();
        let mut fx = recording(Dialect::MySql);
        let outcome = fx
            .alter_table("users", &previous, |t| {
                t.add_column(ColumnSpec::new("id", "INTEGER").primary_key())
                    .add_column(ColumnSpec::new("name", "TEXT"))
                    .add_column(ColumnSpec::new("email", "VARCHAR(255)"));
            })
            .await;

        assert_eq!(outcome.state, FlowState::Committed);
        let conn = fx.connection();
        assert_eq!(conn.begun, 1);
        assert_eq!(conn.committed, 1);
        assert_eq!(conn.rolled_back, 0);
        assert_eq!(
            conn.executed,
            vec!["ALTER TABLE users ADD COLUMN email VARCHAR(255);\n"]
        );
    }

    #[tokio::test]
    async fn test_alter_flow_zero_affected_rolls_back() {
        let previous = previous_users();
        let mut conn = RecordingConnection::default();
        conn.zero_on = Some(0);
        let mut fx = Migrator::new(conn, Dialect::MySql);

        let outcome = fx
            .alter_table("users", &previous, |t| {
                t.add_column(ColumnSpec::new("id", "INTEGER").primary_key())
                    .add_column(ColumnSpec::new("name", "TEXT"))
                    .add_column(ColumnSpec::new("email", "VARCHAR(255)"));
            })
            .await;

        assert_eq!(outcome.state, FlowState::RolledBack);
        assert!(!outcome.passed());
        assert_eq!(fx.connection().rolled_back, 1);
        assert_eq!(fx.connection().committed, 0);
    }

    #[tokio::test]
    async fn test_alter_flow_failure_rolls_back() {
        let previous = previous_users();
        let mut conn = RecordingConnection::default();
        conn.fail_on = Some(0);
        let mut fx = Migrator::new(conn, Dialect::MySql);

        let outcome = fx
            .alter_table("users", &previous, |t| {
                t.add_column(ColumnSpec::new("id", "INTEGER").primary_key())
                    .add_column(ColumnSpec::new("name", "TEXT"))
                    .add_column(ColumnSpec::new("email", "VARCHAR(255)"));
            })
            .await;

        assert_eq!(outcome.state, FlowState::RolledBack);
        assert_eq!(fx.connection().rolled_back, 1);
        assert!(!fx.report().all_passed());
    }

    #[tokio::test]
    async fn test_alter_flow_protects_columns_without_destructive_flag() {
        let previous = previous_users();
        let mut fx = recording(Dialect::MySql);
        let outcome = fx
            .alter_table("users", &previous, |t| {
                t.add_column(ColumnSpec::new("id", "INTEGER").primary_key());
            })
            .await;

        assert_eq!(outcome.state, FlowState::Skipped);
        assert_eq!(outcome.message, "no changes (skipped: name)");

        let mut fx = recording(Dialect::MySql).allow_destructive(true);
        let outcome = fx
            .alter_table("users", &previous, |t| {
                t.add_column(ColumnSpec::new("id", "INTEGER").primary_key());
            })
            .await;
        assert_eq!(outcome.state, FlowState::Committed);
        assert_eq!(
            fx.connection().executed,
            vec!["ALTER TABLE users DROP COLUMN name;\n"]
        );
    }

    #[tokio::test]
    async fn test_move_dance_is_covered_by_one_transaction() {
        let previous = TableSnapshot::from_columns(vec![
            ColumnSpec::new("a", "INT"),
            ColumnSpec::new("b", "INT"),
        ]);
        let mut fx = recording(Dialect::SqlServer);
        let outcome = fx
            .alter_table("t1", &previous, |t| {
                t.add_column(ColumnSpec::new("b", "INT"))
                    .add_column(ColumnSpec::new("a", "INT"));
            })
            .await;

        assert_eq!(outcome.state, FlowState::Committed);
        let conn = fx.connection();
        // The whole shadow-column dance ran inside a single transaction.
        assert_eq!(conn.begun, 1);
        assert_eq!(conn.committed, 1);
        assert!(conn.executed.len() > 2);
    }

    #[tokio::test]
    async fn test_rename_flow() {
        let mut fx = recording(Dialect::SqlServer);
        let outcome = fx.rename_table("old_tbl", "new_tbl").await;

        assert_eq!(outcome.state, FlowState::Committed);
        assert_eq!(
            fx.connection().executed,
            vec!["EXEC sp_rename 'old_tbl', 'new_tbl';\n"]
        );
        assert_eq!(fx.connection().begun, 1);
    }

    #[tokio::test]
    async fn test_rename_flow_rejects_empty_target() {
        let mut fx = recording(Dialect::MySql);
        let outcome = fx.rename_table("users", "").await;

        assert_eq!(outcome.state, FlowState::RolledBack);
        assert!(fx.connection().executed.is_empty());
    }

    #[tokio::test]
    async fn test_drop_flow_if_exists() {
        let mut fx = recording(Dialect::Postgres);
        let outcome = fx.drop_table("users", true).await;

        assert_eq!(outcome.state, FlowState::Committed);
        assert_eq!(
            fx.connection().executed,
            vec!["DROP TABLE IF EXISTS users;\n"]
        );
    }

    #[tokio::test]
    async fn test_report_accumulates_across_flows() {
        let mut fx = recording(Dialect::MySql);
        fx.create_table("users", false, |t| {
            t.add_column(ColumnSpec::new("id", "BIGINT").primary_key());
        })
        .await;
        fx.rename_table("users", "accounts").await;
        fx.drop_table("accounts", false).await;

        assert_eq!(fx.report().len(), 3);
        assert!(fx.report().all_passed());
    }

    // End-to-end against a real database.

    async fn sqlite_migrator() -> Migrator<SqlitePoolConnection> {
        let conn = SqlitePoolConnection::connect("sqlite::memory:")
            .await
            .expect("in-memory SQLite pool");
        Migrator::new(conn, Dialect::Sqlite)
    }

    #[tokio::test]
    async fn test_sqlite_create_and_drop_end_to_end() {
        let mut fx = sqlite_migrator().await;

        let outcome = fx
            .create_table("users", false, |t| {
                t.add_column(ColumnSpec::new("id", "INTEGER").primary_key())
                    .add_column(ColumnSpec::new("username", "TEXT").not_null());
            })
            .await;
        assert_eq!(outcome.state, FlowState::Committed);

        let row: Option<(String,)> =
            sqlx::query_as("SELECT name FROM sqlite_master WHERE type='table' AND name='users'")
                .fetch_optional(fx.connection().pool())
                .await
                .unwrap();
        assert!(row.is_some());

        let outcome = fx.drop_table("users", false).await;
        assert_eq!(outcome.state, FlowState::Committed);

        let row: Option<(String,)> =
            sqlx::query_as("SELECT name FROM sqlite_master WHERE type='table' AND name='users'")
                .fetch_optional(fx.connection().pool())
                .await
                .unwrap();
        assert!(row.is_none());
    }

    #[tokio::test]
    async fn test_sqlite_alter_adds_column_end_to_end() {
        let mut fx = sqlite_migrator().await;
        fx.create_table("users", false, |t| {
            t.add_column(ColumnSpec::new("id", "INTEGER").primary_key());
        })
        .await;

        let previous =
            TableSnapshot::from_columns(vec![ColumnSpec::new("id", "INTEGER").primary_key()]);
        let outcome = fx
            .alter_table("users", &previous, |t| {
                t.add_column(ColumnSpec::new("id", "INTEGER").primary_key())
                    .add_column(ColumnSpec::new("email", "TEXT"));
            })
            .await;
        assert_eq!(outcome.state, FlowState::Committed);

        let columns: Vec<(i64, String, String, i64, Option<String>, i64)> =
            sqlx::query_as("PRAGMA table_info(users)")
                .fetch_all(fx.connection().pool())
                .await
                .unwrap();
        assert!(columns.iter().any(|c| c.1 == "email"));
    }

    #[tokio::test]
    async fn test_sqlite_drop_missing_table_fails_without_if_exists() {
        let mut fx = sqlite_migrator().await;

        let outcome = fx.drop_table("nowhere", false).await;
        assert_eq!(outcome.state, FlowState::RolledBack);
        assert!(!fx.report().all_passed());

        let outcome = fx.drop_table("nowhere", true).await;
        assert_eq!(outcome.state, FlowState::Committed);
    }
}
