//! Column diff engine.
//!
//! Compares a previous snapshot against the desired layout and produces the
//! minimal ordered list of [`ColumnOperation`]s that transforms one into the
//! other. An empty operation list is the orchestrator's "no changes" signal.

use forge_ddl::{ColumnOperation, ColumnPosition, ColumnSpec};

use crate::snapshot::TableSnapshot;

/// Options controlling diff behavior.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiffOptions {
    /// Whether columns missing from the desired layout may be dropped.
    /// When false, such columns are left untouched and reported as skipped.
    pub allow_destructive: bool,
}

/// Result of diffing two snapshots.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableDiff {
    /// Operations to apply, in order.
    pub operations: Vec<ColumnOperation>,
    /// Columns that would have been dropped but were protected by the
    /// destructive-drop flag.
    pub skipped: Vec<String>,
}

impl TableDiff {
    /// Whether the diff found nothing to do.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

/// Computes column operations from snapshot differences.
#[derive(Debug, Clone, Copy, Default)]
pub struct Differ {
    options: DiffOptions,
}

impl Differ {
    /// Creates a differ with the given options.
    #[must_use]
    pub const fn new(options: DiffOptions) -> Self {
        Self { options }
    }

    /// Diffs `previous` against `desired` with no explicit renames.
    #[must_use]
    pub fn diff(&self, previous: &TableSnapshot, desired: &TableSnapshot) -> TableDiff {
        self.diff_with_renames(previous, &[], desired)
    }

    /// Diffs `previous` against `desired`, honoring explicit column renames.
    ///
    /// Renames cannot be detected from the snapshots alone (a rename is
    /// indistinguishable from drop+add), so they are declared by the caller
    /// and applied first; the renamed column is then compared under its new
    /// name.
    #[must_use]
    pub fn diff_with_renames(
        &self,
        previous: &TableSnapshot,
        renames: &[(String, String)],
        desired: &TableSnapshot,
    ) -> TableDiff {
        let mut operations = Vec::new();
        let mut skipped = Vec::new();

        let mut working = previous.clone();
        for (from, to) in renames {
            if working.rename(from, to) {
                operations.push(ColumnOperation::rename(from.clone(), to.clone()));
            }
        }

        // New columns, in declaration order.
        for column in desired.columns() {
            if working.get(&column.name).is_none() {
                operations.push(ColumnOperation::add(column.clone()));
            }
        }

        // Changed columns: independent sub-operations for exactly what
        // differs, plus moves detected from insertion order.
        for column in desired.columns() {
            if let Some(current) = working.get(&column.name) {
                operations.extend(diff_column(current, column));
            }
        }
        operations.extend(self.detect_moves(&working, desired));

        // Vanished columns, last: destructive work happens only after
        // everything else succeeded, and only when allowed.
        for column in working.columns() {
            if desired.get(&column.name).is_none() {
                if self.options.allow_destructive {
                    operations.push(ColumnOperation::drop(column.name.clone()));
                } else {
                    skipped.push(column.name.clone());
                }
            }
        }

        TableDiff {
            operations,
            skipped,
        }
    }

    /// Detects repositions by comparing each common column's predecessor on
    /// both sides, restricted to columns common to both snapshots so that an
    /// added or protected column never manufactures a move.
    fn detect_moves(
        &self,
        working: &TableSnapshot,
        desired: &TableSnapshot,
    ) -> Vec<ColumnOperation> {
        let current_order = common_columns(working, desired);
        let desired_order = common_columns(desired, working);

        let mut moves = Vec::new();
        for (idx, name) in desired_order.iter().enumerate() {
            let target = if idx == 0 {
                ColumnPosition::First
            } else {
                ColumnPosition::After(desired_order[idx - 1].clone())
            };
            let current_idx = current_order
                .iter()
                .position(|n| n == name)
                .unwrap_or_default();
            let current = if current_idx == 0 {
                ColumnPosition::First
            } else {
                ColumnPosition::After(current_order[current_idx - 1].clone())
            };

            if target != current {
                if let Some(spec) = desired.get(name) {
                    moves.push(ColumnOperation::Move {
                        spec: spec.clone(),
                        position: target,
                    });
                }
            }
        }
        moves
    }
}

/// Names of `snapshot`'s columns that also exist in `other`, in `snapshot`'s
/// insertion order.
fn common_columns(snapshot: &TableSnapshot, other: &TableSnapshot) -> Vec<String> {
    snapshot
        .columns()
        .iter()
        .filter(|c| other.get(&c.name).is_some())
        .map(|c| c.name.clone())
        .collect()
}

/// Emits the sub-operations for one column present on both sides.
fn diff_column(current: &ColumnSpec, desired: &ColumnSpec) -> Vec<ColumnOperation> {
    let mut operations = Vec::new();

    if current.type_def != desired.type_def || current.attrs != desired.attrs {
        operations.push(ColumnOperation::Modify {
            spec: desired.clone(),
        });
    }

    if current.default != desired.default {
        match &desired.default {
            Some(value) => operations.push(ColumnOperation::SetDefault {
                column: desired.name.clone(),
                value: value.clone(),
            }),
            None => operations.push(ColumnOperation::DropDefault {
                column: desired.name.clone(),
            }),
        }
    }

    if current.nullable != desired.nullable {
        operations.push(ColumnOperation::SetNullable {
            spec: desired.clone(),
            nullable: desired.nullable,
        });
    }

    if current.charset != desired.charset {
        if let Some(charset) = &desired.charset {
            operations.push(ColumnOperation::SetCharset {
                spec: desired.clone(),
                charset: charset.clone(),
            });
        }
    }

    if current.collation != desired.collation {
        if let Some(collation) = &desired.collation {
            operations.push(ColumnOperation::SetCollation {
                spec: desired.clone(),
                collation: collation.clone(),
            });
        }
    }

    operations
}
