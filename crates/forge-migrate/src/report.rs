//! Migration reports and report sinks.
//!
//! The report is a per-run value owned by the orchestrator — there is no
//! process-wide state. Sinks decide what a recorded entry means for the
//! surrounding process: nothing (programmatic use) or a colorized console
//! line with optional exit-on-first-failure (command use).

use chrono::{DateTime, Utc};
use colored::Colorize;
use serde::Serialize;

/// One per-table outcome.
#[derive(Debug, Clone, Serialize)]
pub struct ReportEntry {
    /// Table the flow targeted.
    pub table: String,
    /// Human-readable outcome.
    pub message: String,
    /// Whether the flow succeeded.
    pub passed: bool,
    /// When the entry was recorded.
    pub recorded_at: DateTime<Utc>,
}

/// Append-only sequence of per-table outcomes for one run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MigrationReport {
    entries: Vec<ReportEntry>,
}

impl MigrationReport {
    /// Creates an empty report.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Appends an entry and returns a reference to it.
    pub fn record(
        &mut self,
        table: impl Into<String>,
        message: impl Into<String>,
        passed: bool,
    ) -> &ReportEntry {
        self.entries.push(ReportEntry {
            table: table.into(),
            message: message.into(),
            passed,
            recorded_at: Utc::now(),
        });
        self.entries.last().expect("entry just pushed")
    }

    /// All entries, in record order.
    #[must_use]
    pub fn entries(&self) -> &[ReportEntry] {
        &self.entries
    }

    /// Whether every recorded flow passed.
    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.entries.iter().all(|e| e.passed)
    }

    /// Entries for failed flows.
    pub fn failures(&self) -> impl Iterator<Item = &ReportEntry> {
        self.entries.iter().filter(|e| !e.passed)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Receives each report entry as it is recorded.
pub trait ReportSink: Send {
    /// Called once per terminal flow transition.
    fn report(&mut self, entry: &ReportEntry);
}

/// Sink that does nothing. The default for programmatic callers.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl ReportSink for NullSink {
    fn report(&mut self, _entry: &ReportEntry) {}
}

/// Sink for interactive/command contexts: prints a colorized line per entry
/// and, when configured, terminates the process on the first failure.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleSink {
    exit_code: Option<i32>,
}

impl ConsoleSink {
    /// Non-terminating console sink.
    #[must_use]
    pub const fn new() -> Self {
        Self { exit_code: None }
    }

    /// Console sink that exits the process with `code` on the first failed
    /// entry.
    #[must_use]
    pub const fn exit_on_failure(code: i32) -> Self {
        Self {
            exit_code: Some(code),
        }
    }
}

impl ReportSink for ConsoleSink {
    fn report(&mut self, entry: &ReportEntry) {
        if entry.passed {
            println!("{} {}: {}", "ok".green().bold(), entry.table.bold(), entry.message);
        } else {
            eprintln!(
                "{} {}: {}",
                "FAIL".red().bold(),
                entry.table.bold(),
                entry.message
            );
            if let Some(code) = self.exit_code {
                std::process::exit(code);
            }
        }
    }
}
