//! Connection abstraction.
//!
//! The orchestrator drives everything through [`Connection`]: raw statement
//! execution plus transaction brackets. The contract deliberately overloads
//! the return value of [`Connection::exec`]: a result of `0` is the
//! orchestrator's failure signal, so implementations must report successful
//! DDL — whose row counts are otherwise meaningless — as at least `1`.

use async_trait::async_trait;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use sqlx::{Sqlite, Transaction};
use tracing::debug;

use crate::error::Result;

/// A database connection capable of executing SQL inside transactions.
///
/// One connection serves one flow at a time; callers running flows
/// concurrently must supply independent connections.
#[async_trait]
pub trait Connection: Send {
    /// Executes one statement and returns the affected-row count.
    ///
    /// Implementations must return a value `>= 1` for successful statements,
    /// including DDL.
    async fn exec(&mut self, sql: &str) -> Result<u64>;

    /// Opens a transaction.
    async fn begin(&mut self) -> Result<()>;

    /// Commits the open transaction.
    async fn commit(&mut self) -> Result<()>;

    /// Rolls back the open transaction.
    async fn rollback(&mut self) -> Result<()>;
}

/// sqlx-backed SQLite connection.
pub struct SqlitePoolConnection {
    pool: SqlitePool,
    tx: Option<Transaction<'static, Sqlite>>,
}

impl SqlitePoolConnection {
    /// Connects to the given SQLite URL.
    pub async fn connect(url: &str) -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(url)
            .await?;
        Ok(Self::from_pool(pool))
    }

    /// Wraps an existing pool.
    #[must_use]
    pub const fn from_pool(pool: SqlitePool) -> Self {
        Self { pool, tx: None }
    }

    /// Returns the underlying pool.
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl Connection for SqlitePoolConnection {
    async fn exec(&mut self, sql: &str) -> Result<u64> {
        debug!(sql = %sql.trim_end(), "Executing SQL");
        let affected = match self.tx.as_mut() {
            Some(tx) => sqlx::query(sql).execute(&mut **tx).await?.rows_affected(),
            None => sqlx::query(sql).execute(&self.pool).await?.rows_affected(),
        };
        // SQLite reports 0 affected rows for DDL; success must read as >= 1.
        Ok(affected.max(1))
    }

    async fn begin(&mut self) -> Result<()> {
        // An abandoned previous transaction rolls back on drop.
        self.tx = Some(self.pool.begin().await?);
        Ok(())
    }

    async fn commit(&mut self) -> Result<()> {
        if let Some(tx) = self.tx.take() {
            tx.commit().await?;
        }
        Ok(())
    }

    async fn rollback(&mut self) -> Result<()> {
        if let Some(tx) = self.tx.take() {
            tx.rollback().await?;
        }
        Ok(())
    }
}

/// Scripted in-memory connection used by orchestrator tests.
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingConnection {
    /// Every statement passed to `exec`, in order.
    pub executed: Vec<String>,
    pub begun: usize,
    pub committed: usize,
    pub rolled_back: usize,
    /// Return `Ok(0)` for the nth (0-based) exec call.
    pub zero_on: Option<usize>,
    /// Return an error for the nth (0-based) exec call.
    pub fail_on: Option<usize>,
}

#[cfg(test)]
#[async_trait]
impl Connection for RecordingConnection {
    async fn exec(&mut self, sql: &str) -> Result<u64> {
        let call = self.executed.len();
        self.executed.push(sql.to_string());
        if self.fail_on == Some(call) {
            return Err(crate::error::ForgeError::Execution(
                "scripted failure".to_string(),
            ));
        }
        if self.zero_on == Some(call) {
            return Ok(0);
        }
        Ok(1)
    }

    async fn begin(&mut self) -> Result<()> {
        self.begun += 1;
        Ok(())
    }

    async fn commit(&mut self) -> Result<()> {
        self.committed += 1;
        Ok(())
    }

    async fn rollback(&mut self) -> Result<()> {
        self.rolled_back += 1;
        Ok(())
    }
}
