//! Table blueprints.
//!
//! A [`TableBlueprint`] accumulates the desired shape of one table — columns
//! in declaration order, explicit column renames, table-level options — and
//! renders either full CREATE TABLE DDL or, given a previous snapshot, the
//! ALTER batch produced by the diff engine. The orchestrator consumes only
//! this surface.

use forge_ddl::synthesis::{Advisory, Synthesizer, TableOption};
use forge_ddl::{ColumnSpec, IndexKind};

use crate::diff::{DiffOptions, Differ};
use crate::snapshot::TableSnapshot;

/// Rendered CREATE TABLE output: the create statement followed by any
/// secondary index and sequence statements.
#[derive(Debug, Clone, Default)]
pub struct CreateDdl {
    /// Statements in execution order.
    pub statements: Vec<String>,
    /// Capability gaps encountered while rendering table options.
    pub advisories: Vec<Advisory>,
}

/// Rendered ALTER output.
#[derive(Debug, Clone, Default)]
pub struct AlterDdl {
    /// Statements in execution order. Empty means "no changes".
    pub statements: Vec<String>,
    /// Capability gaps encountered during synthesis.
    pub advisories: Vec<Advisory>,
    /// Columns protected from destructive drops.
    pub skipped: Vec<String>,
}

/// Accumulates the desired definition of one table.
#[derive(Debug, Clone, Default)]
pub struct TableBlueprint {
    columns: Vec<ColumnSpec>,
    renames: Vec<(String, String)>,
    options: Vec<TableOption>,
}

impl TableBlueprint {
    /// Creates an empty blueprint.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            columns: Vec::new(),
            renames: Vec::new(),
            options: Vec::new(),
        }
    }

    /// Adds a column.
    pub fn add_column(&mut self, column: ColumnSpec) -> &mut Self {
        self.columns.push(column);
        self
    }

    /// Declares a column rename to carry into the next alter.
    pub fn rename_column(&mut self, from: impl Into<String>, to: impl Into<String>) -> &mut Self {
        self.renames.push((from.into(), to.into()));
        self
    }

    /// Sets the storage engine.
    pub fn engine(&mut self, engine: impl Into<String>) -> &mut Self {
        self.options.push(TableOption::Engine(engine.into()));
        self
    }

    /// Sets the default character set.
    pub fn charset(&mut self, charset: impl Into<String>) -> &mut Self {
        self.options.push(TableOption::Charset(charset.into()));
        self
    }

    /// Sets the default collation.
    pub fn collation(&mut self, collation: impl Into<String>) -> &mut Self {
        self.options.push(TableOption::Collation(collation.into()));
        self
    }

    /// Sets the table comment.
    pub fn comment(&mut self, text: impl Into<String>) -> &mut Self {
        self.options.push(TableOption::Comment(text.into()));
        self
    }

    /// Returns the desired layout as a snapshot.
    #[must_use]
    pub fn columns(&self) -> TableSnapshot {
        TableSnapshot::from_columns(self.columns.clone())
    }

    /// Whether any columns were declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Renders full CREATE TABLE DDL.
    #[must_use]
    pub fn create_ddl(&self, synth: &Synthesizer, table: &str, if_not_exists: bool) -> CreateDdl {
        let mut ddl = CreateDdl::default();

        let primary: Vec<&ColumnSpec> = self
            .columns
            .iter()
            .filter(|c| c.index == Some(IndexKind::Primary))
            .collect();
        let composite_key = primary.len() > 1;

        let mut sql = String::from("CREATE TABLE ");
        if if_not_exists {
            sql.push_str("IF NOT EXISTS ");
        }
        sql.push_str(table);
        sql.push_str(" (\n");

        let definitions: Vec<String> = self
            .columns
            .iter()
            .map(|c| {
                // A composite key is rendered as a table constraint, not as
                // repeated inline PRIMARY KEY attributes.
                if composite_key && c.index == Some(IndexKind::Primary) {
                    let mut inline = c.clone();
                    inline.index = None;
                    synth.column_definition(&inline)
                } else {
                    synth.column_definition(c)
                }
            })
            .collect();
        sql.push_str("  ");
        sql.push_str(&definitions.join(",\n  "));

        if composite_key {
            let names: Vec<&str> = primary.iter().map(|c| c.name.as_str()).collect();
            sql.push_str(",\n  PRIMARY KEY (");
            sql.push_str(&names.join(", "));
            sql.push(')');
        }

        sql.push_str("\n)");
        for option in &self.options {
            let rendered = synth.table_option_ddl(table, option);
            if rendered.is_noop() {
                ddl.advisories.extend(rendered.advisories);
            } else {
                sql.push(' ');
                sql.push_str(&create_option_fragment(option));
            }
        }
        sql.push_str(";\n");
        ddl.statements.push(sql);

        // Companion sequences for sequence-backed increments.
        for column in &self.columns {
            if let Some(increment) = &column.increment {
                if let Some(seq) = synth.increment_sequence(table, increment) {
                    ddl.statements.push(seq);
                }
            }
        }

        // Plain secondary indexes become their own statements.
        for column in &self.columns {
            if column.index == Some(IndexKind::Index) {
                let op = forge_ddl::ColumnOperation::AddIndex {
                    name: format!("idx_{table}_{}", column.name),
                    columns: vec![column.name.clone()],
                    unique: false,
                };
                let rendered = synth.column_ddl(table, &op);
                ddl.statements.extend(rendered.statements);
            }
        }

        ddl
    }

    /// Renders the ALTER batch that brings `previous` to this blueprint's
    /// layout. An empty statement list means the table needs no changes.
    #[must_use]
    pub fn alter_ddl(
        &self,
        synth: &Synthesizer,
        table: &str,
        previous: &TableSnapshot,
        options: DiffOptions,
    ) -> AlterDdl {
        let mut ddl = AlterDdl::default();

        let diff =
            Differ::new(options).diff_with_renames(previous, &self.renames, &self.columns());
        ddl.skipped = diff.skipped;

        for operation in &diff.operations {
            let rendered = synth.column_ddl(table, operation);
            ddl.statements.extend(rendered.statements);
            ddl.advisories.extend(rendered.advisories);
        }

        for option in &self.options {
            let rendered = synth.table_option_ddl(table, option);
            ddl.statements.extend(rendered.statements);
            ddl.advisories.extend(rendered.advisories);
        }

        ddl
    }
}

/// Rendered as CREATE TABLE suffix options (MySQL-family grammar; the
/// synthesizer has already vetted dialect support).
fn create_option_fragment(option: &TableOption) -> String {
    match option {
        TableOption::Engine(engine) => format!("ENGINE = {engine}"),
        TableOption::Charset(charset) => format!("DEFAULT CHARACTER SET {charset}"),
        TableOption::Collation(collation) => format!("COLLATE = {collation}"),
        TableOption::Comment(text) => format!("COMMENT = '{text}'"),
    }
}
