//! Migration and seed units.
//!
//! A unit is a self-contained schema change ([`Migration`]) or data load
//! ([`Seed`]) that can declare other units to be invoked as part of its own
//! execution. The chain is an ordered, append-only list owned by the unit
//! instance; acting on it — including cycle detection and de-duplication —
//! is the external runner's job, not this layer's.

use async_trait::async_trait;

use crate::connection::Connection;
use crate::error::Result;
use crate::migrator::Migrator;

/// Ordered, append-only list of dependent unit identifiers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvokeChain {
    invoked: Vec<String>,
}

impl InvokeChain {
    /// Creates an empty chain.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            invoked: Vec::new(),
        }
    }

    /// Appends a unit identifier. Duplicates are kept; ordering is
    /// preserved.
    pub fn invoke(&mut self, unit: &str) {
        self.invoked.push(unit.to_string());
    }

    /// The identifiers invoked so far, in order.
    #[must_use]
    pub fn invoked(&self) -> &[String] {
        &self.invoked
    }

    /// Whether anything was invoked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.invoked.is_empty()
    }
}

/// Access to a unit's invoke chain.
pub trait Chained {
    /// The unit's chain.
    fn chain(&self) -> &InvokeChain;

    /// The unit's chain, mutably.
    fn chain_mut(&mut self) -> &mut InvokeChain;

    /// Registers a dependent unit to be invoked by the runner.
    fn invoke(&mut self, unit: &str) {
        self.chain_mut().invoke(unit);
    }

    /// The identifiers this unit invoked, for the runner to act on.
    fn invokes(&self) -> &[String] {
        self.chain().invoked()
    }
}

/// A schema migration unit.
#[async_trait]
pub trait Migration<C: Connection>: Chained + Send {
    /// Applies the migration.
    async fn up(&mut self, fx: &mut Migrator<C>) -> Result<()>;

    /// Reverts the migration.
    async fn down(&mut self, fx: &mut Migrator<C>) -> Result<()>;

    /// Adjusts an existing schema in place. Optional.
    async fn alter(&mut self, fx: &mut Migrator<C>) -> Result<()> {
        let _ = fx;
        Ok(())
    }
}

/// A data seeding unit.
#[async_trait]
pub trait Seed<C: Connection>: Chained + Send {
    /// Loads the seed data through the given connection.
    async fn run(&mut self, conn: &mut C) -> Result<()>;
}
