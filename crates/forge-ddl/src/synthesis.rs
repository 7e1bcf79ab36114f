//! DDL synthesis.
//!
//! [`Synthesizer`] is a pure translation from (dialect, operation) to SQL
//! text. It is total: every combination produces a [`Synthesis`], and
//! capability gaps degrade to an empty statement list plus an [`Advisory`]
//! instead of invalid SQL or an error.
//!
//! Identifiers and literals are caller-trusted and interpolated verbatim; no
//! escaping or parameter binding happens here. Every synthesized statement is
//! terminated with `;\n`.

use std::fmt;

use crate::column::{AutoIncrement, ColumnPosition, ColumnSpec, IndexKind};
use crate::dialect::{
    AlterIncrementStyle, DefaultStyle, Dialect, DropIndexStyle, IncrementStyle, IndexStyle,
    MoveStrategy, PrimaryKeyStyle, RenameStyle, TableRenameStyle,
};
use crate::operation::ColumnOperation;

/// A capability a dialect may lack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Character set DDL.
    Charset,
    /// Collation DDL.
    Collation,
    /// Storage engine selection.
    Engine,
    /// Table comments.
    Comment,
    /// Column visibility.
    Visibility,
    /// Altering an existing table's increment counter.
    AlterIncrement,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Charset => "charset",
            Self::Collation => "collation",
            Self::Engine => "storage engine",
            Self::Comment => "comment",
            Self::Visibility => "column visibility",
            Self::AlterIncrement => "increment alteration",
        };
        f.write_str(name)
    }
}

/// A capability-unsupported signal: the operation was a no-op on this dialect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Advisory {
    /// The dialect that lacks the capability.
    pub dialect: Dialect,
    /// The missing capability.
    pub capability: Capability,
    /// The identifier the operation targeted.
    pub subject: String,
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} is not supported on {}; skipped for '{}'",
            self.capability, self.dialect, self.subject
        )
    }
}

/// Output of one synthesis call: zero or more statements, in execution
/// order, plus any advisories raised along the way.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Synthesis {
    /// SQL statements, each `;\n`-terminated.
    pub statements: Vec<String>,
    /// Capability gaps encountered.
    pub advisories: Vec<Advisory>,
}

impl Synthesis {
    fn statement(sql: String) -> Self {
        Self {
            statements: vec![sql],
            advisories: Vec::new(),
        }
    }

    fn statements(sql: Vec<String>) -> Self {
        Self {
            statements: sql,
            advisories: Vec::new(),
        }
    }

    fn advisory(dialect: Dialect, capability: Capability, subject: impl Into<String>) -> Self {
        Self {
            statements: Vec::new(),
            advisories: vec![Advisory {
                dialect,
                capability,
                subject: subject.into(),
            }],
        }
    }

    /// Returns true when the synthesis produced no statements.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.statements.is_empty()
    }

    /// Concatenates all statements into one batch string.
    #[must_use]
    pub fn batch(&self) -> String {
        self.statements.concat()
    }
}

/// Table-level options alterable after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableOption {
    /// Storage engine (MySQL family).
    Engine(String),
    /// Default character set.
    Charset(String),
    /// Default collation.
    Collation(String),
    /// Table comment.
    Comment(String),
}

/// Stateless DDL generator for one dialect.
#[derive(Debug, Clone, Copy)]
pub struct Synthesizer {
    dialect: Dialect,
}

impl Synthesizer {
    /// Creates a synthesizer for the given dialect.
    #[must_use]
    pub const fn new(dialect: Dialect) -> Self {
        Self { dialect }
    }

    /// Returns the dialect this synthesizer targets.
    #[must_use]
    pub const fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Renders a full column definition for CREATE TABLE, ADD COLUMN, and
    /// the modify verbs.
    #[must_use]
    pub fn column_definition(&self, spec: &ColumnSpec) -> String {
        let mut parts = vec![spec.name.clone(), spec.type_def.clone()];

        if !spec.attrs.is_empty() {
            parts.push(spec.attrs.clone());
        }
        if let Some(charset) = &spec.charset {
            if self.dialect.profile().supports_charset {
                parts.push(format!("CHARACTER SET {charset}"));
            }
        }
        if let Some(collation) = &spec.collation {
            if self.dialect.profile().supports_charset {
                parts.push(format!("COLLATE {collation}"));
            }
        }
        // Primary keys are implicitly NOT NULL.
        if !spec.nullable && spec.index != Some(IndexKind::Primary) {
            parts.push("NOT NULL".to_string());
        }
        if let Some(default) = &spec.default {
            parts.push(format!("DEFAULT {default}"));
        }
        if let Some(increment) = &spec.increment {
            let fragment = self.increment_fragment(increment);
            if !fragment.is_empty() {
                parts.push(fragment);
            }
        }
        match spec.index {
            Some(IndexKind::Primary) => parts.push("PRIMARY KEY".to_string()),
            Some(IndexKind::Unique) => parts.push("UNIQUE".to_string()),
            Some(IndexKind::Index) | None => {}
        }

        parts.join(" ")
    }

    /// Renders the creation-time auto-increment fragment.
    ///
    /// Flag-style dialects ignore start/step; Oracle produces no fragment at
    /// all (see [`Synthesizer::increment_sequence`]).
    #[must_use]
    pub fn increment_fragment(&self, increment: &AutoIncrement) -> String {
        match self.dialect.profile().increment {
            IncrementStyle::Flag(keyword) => keyword.to_string(),
            IncrementStyle::Parameterized(keyword) => {
                format!("{keyword}({},{})", increment.start, increment.step)
            }
            IncrementStyle::Sequence => String::new(),
        }
    }

    /// Returns the companion `CREATE SEQUENCE` statement for dialects whose
    /// increment is sequence-backed.
    #[must_use]
    pub fn increment_sequence(&self, table: &str, increment: &AutoIncrement) -> Option<String> {
        match self.dialect.profile().increment {
            IncrementStyle::Sequence => Some(format!(
                "CREATE SEQUENCE {table}_seq START WITH {} INCREMENT BY {};\n",
                increment.start, increment.step
            )),
            IncrementStyle::Flag(_) | IncrementStyle::Parameterized(_) => None,
        }
    }

    /// Synthesizes SQL for one column operation against `table`.
    #[must_use]
    pub fn column_ddl(&self, table: &str, operation: &ColumnOperation) -> Synthesis {
        match operation {
            ColumnOperation::Add { spec } => Synthesis::statement(format!(
                "ALTER TABLE {table} ADD COLUMN {};\n",
                self.column_definition(spec)
            )),

            ColumnOperation::Modify { spec } => Synthesis::statement(format!(
                "ALTER TABLE {table} {} {};\n",
                self.dialect.profile().modify_verb,
                self.column_definition(spec)
            )),

            ColumnOperation::Rename { from, to } => {
                Synthesis::statement(self.rename_column_sql(table, from, to))
            }

            ColumnOperation::Drop { column } => {
                Synthesis::statement(format!("ALTER TABLE {table} DROP COLUMN {column};\n"))
            }

            ColumnOperation::Move { spec, position } => {
                Synthesis::statements(self.move_column_sql(table, spec, position))
            }

            ColumnOperation::SetDefault { column, value } => {
                Synthesis::statement(self.set_default_sql(table, column, value))
            }

            ColumnOperation::DropDefault { column } => {
                Synthesis::statement(self.drop_default_sql(table, column))
            }

            ColumnOperation::SetNullable { spec, nullable } => {
                Synthesis::statement(self.set_nullable_sql(table, spec, *nullable))
            }

            ColumnOperation::SetVisibility { column, visible } => {
                if self.dialect.profile().supports_visibility {
                    let state = if *visible { "VISIBLE" } else { "INVISIBLE" };
                    Synthesis::statement(format!(
                        "ALTER TABLE {table} ALTER COLUMN {column} SET {state};\n"
                    ))
                } else {
                    Synthesis::advisory(self.dialect, Capability::Visibility, column)
                }
            }

            ColumnOperation::SetCharset { spec, charset } => {
                if self.dialect.profile().supports_charset {
                    Synthesis::statement(format!(
                        "ALTER TABLE {table} {} {} {} CHARACTER SET {charset};\n",
                        self.dialect.profile().modify_verb,
                        spec.name,
                        spec.type_def
                    ))
                } else {
                    Synthesis::advisory(self.dialect, Capability::Charset, &spec.name)
                }
            }

            ColumnOperation::SetCollation { spec, collation } => {
                if self.dialect.profile().supports_charset {
                    Synthesis::statement(format!(
                        "ALTER TABLE {table} {} {} {} COLLATE {collation};\n",
                        self.dialect.profile().modify_verb,
                        spec.name,
                        spec.type_def
                    ))
                } else {
                    Synthesis::advisory(self.dialect, Capability::Collation, &spec.name)
                }
            }

            ColumnOperation::AddIndex {
                name,
                columns,
                unique,
            } => Synthesis::statement(self.add_index_sql(table, name, columns, *unique)),

            ColumnOperation::DropIndex { name } => {
                Synthesis::statement(self.drop_index_sql(table, name))
            }

            ColumnOperation::SetPrimaryKey { columns } => {
                Synthesis::statement(self.set_primary_key_sql(table, columns))
            }
        }
    }

    fn rename_column_sql(&self, table: &str, from: &str, to: &str) -> String {
        match self.dialect.profile().rename {
            RenameStyle::StoredProcedure => {
                format!("EXEC sp_rename '{table}.{from}', '{to}', 'COLUMN';\n")
            }
            RenameStyle::WithoutTo => {
                format!("ALTER TABLE {table} RENAME COLUMN {from} {to};\n")
            }
            RenameStyle::RenameTo => {
                format!("ALTER TABLE {table} RENAME COLUMN {from} TO {to};\n")
            }
        }
    }

    /// Repositioning has no portable single statement. The multi-statement
    /// strategies depend on every prior statement succeeding; the caller is
    /// responsible for wrapping the whole batch in one transaction.
    fn move_column_sql(&self, table: &str, spec: &ColumnSpec, position: &ColumnPosition) -> Vec<String> {
        let column = &spec.name;
        match self.dialect.profile().move_strategy {
            MoveStrategy::InlinePosition => vec![format!(
                "ALTER TABLE {table} {} {} {position};\n",
                self.dialect.profile().modify_verb,
                self.column_definition(spec)
            )],

            MoveStrategy::ShadowSwap => vec![
                format!(
                    "ALTER TABLE {table} ADD COLUMN {column}_swap {};\n",
                    spec.type_def
                ),
                format!("UPDATE {table} SET {column}_swap = {column};\n"),
                format!("ALTER TABLE {table} DROP COLUMN {column};\n"),
                format!(
                    "ALTER TABLE {table} ADD COLUMN {};\n",
                    self.column_definition(spec)
                ),
                format!("UPDATE {table} SET {column} = {column}_swap;\n"),
                format!("ALTER TABLE {table} DROP COLUMN {column}_swap;\n"),
            ],

            MoveStrategy::RenameSwap => vec![
                format!("ALTER TABLE {table} RENAME COLUMN {column} TO {column}_swap;\n"),
                format!(
                    "ALTER TABLE {table} ADD COLUMN {};\n",
                    self.column_definition(spec)
                ),
                format!("UPDATE {table} SET {column} = {column}_swap;\n"),
                format!("ALTER TABLE {table} DROP COLUMN {column}_swap;\n"),
            ],
        }
    }

    fn set_default_sql(&self, table: &str, column: &str, value: &str) -> String {
        match self.dialect.profile().default_style {
            DefaultStyle::SetDefault => {
                format!("ALTER TABLE {table} ALTER COLUMN {column} SET DEFAULT {value};\n")
            }
            DefaultStyle::NamedConstraint => {
                format!("ALTER TABLE {table} ADD CONSTRAINT df_{column} DEFAULT {value} FOR {column};\n")
            }
            DefaultStyle::ModifyDefault => {
                format!("ALTER TABLE {table} MODIFY {column} DEFAULT {value};\n")
            }
        }
    }

    fn drop_default_sql(&self, table: &str, column: &str) -> String {
        match self.dialect.profile().default_style {
            DefaultStyle::SetDefault => {
                format!("ALTER TABLE {table} ALTER COLUMN {column} DROP DEFAULT;\n")
            }
            DefaultStyle::NamedConstraint => {
                format!("ALTER TABLE {table} DROP CONSTRAINT df_{column};\n")
            }
            DefaultStyle::ModifyDefault => {
                format!("ALTER TABLE {table} MODIFY {column} DEFAULT NULL;\n")
            }
        }
    }

    fn set_nullable_sql(&self, table: &str, spec: &ColumnSpec, nullable: bool) -> String {
        let profile = self.dialect.profile();
        let state = if nullable { "NULL" } else { "NOT NULL" };
        if profile.nullability_requires_type {
            format!(
                "ALTER TABLE {table} {} {} {} {state};\n",
                profile.modify_verb, spec.name, spec.type_def
            )
        } else {
            format!("ALTER TABLE {table} {} {} {state};\n", profile.modify_verb, spec.name)
        }
    }

    fn add_index_sql(&self, table: &str, name: &str, columns: &[String], unique: bool) -> String {
        let cols = columns.join(", ");
        match self.dialect.profile().index_style {
            IndexStyle::AlterTable => {
                let kind = if unique { "UNIQUE INDEX" } else { "INDEX" };
                format!("ALTER TABLE {table} ADD {kind} {name} ({cols});\n")
            }
            IndexStyle::CreateIndex => {
                let kind = if unique { "UNIQUE INDEX" } else { "INDEX" };
                format!("CREATE {kind} {name} ON {table} ({cols});\n")
            }
        }
    }

    fn drop_index_sql(&self, table: &str, name: &str) -> String {
        match self.dialect.profile().drop_index_style {
            DropIndexStyle::Bare => format!("DROP INDEX {name};\n"),
            DropIndexStyle::OnTable => format!("DROP INDEX {name} ON {table};\n"),
            DropIndexStyle::AlterTable => format!("ALTER TABLE {table} DROP INDEX {name};\n"),
        }
    }

    fn set_primary_key_sql(&self, table: &str, columns: &[String]) -> String {
        let cols = columns.join(", ");
        match self.dialect.profile().primary_key_style {
            PrimaryKeyStyle::Constraint => format!(
                "ALTER TABLE {table} DROP CONSTRAINT pk_{table}, ADD CONSTRAINT pk_{table} PRIMARY KEY ({cols});\n"
            ),
            PrimaryKeyStyle::Bare => {
                format!("ALTER TABLE {table} DROP PRIMARY KEY, ADD PRIMARY KEY ({cols});\n")
            }
        }
    }

    /// Synthesizes a table rename.
    #[must_use]
    pub fn rename_table_ddl(&self, from: &str, to: &str) -> String {
        match self.dialect.profile().table_rename {
            TableRenameStyle::StoredProcedure => {
                format!("EXEC sp_rename '{from}', '{to}';\n")
            }
            TableRenameStyle::QuotedRenameTo => {
                format!("ALTER TABLE \"{from}\" RENAME TO \"{to}\";\n")
            }
            TableRenameStyle::BracketRename => {
                format!("ALTER TABLE [{from}] RENAME [{to}];\n")
            }
            TableRenameStyle::RenameTable => {
                format!("RENAME TABLE `{from}` TO `{to}`;\n")
            }
        }
    }

    /// Synthesizes a table drop.
    #[must_use]
    pub fn drop_table_ddl(&self, table: &str, if_exists: bool) -> String {
        if if_exists {
            format!("DROP TABLE IF EXISTS {table};\n")
        } else {
            format!("DROP TABLE {table};\n")
        }
    }

    /// Synthesizes an alteration of the table's increment counter.
    ///
    /// Distinct from the creation-time fragment: this targets an existing
    /// table, and dialects whose identity columns cannot be reseeded through
    /// this grammar degrade to an advisory.
    #[must_use]
    pub fn alter_increment_ddl(&self, table: &str, value: u64) -> Synthesis {
        match self.dialect.profile().alter_increment {
            AlterIncrementStyle::TableOption => {
                Synthesis::statement(format!("ALTER TABLE {table} AUTO_INCREMENT = {value};\n"))
            }
            AlterIncrementStyle::Sequence => Synthesis::statement(format!(
                "ALTER SEQUENCE {table}_seq RESTART START WITH {value};\n"
            )),
            AlterIncrementStyle::Unsupported => {
                Synthesis::advisory(self.dialect, Capability::AlterIncrement, table)
            }
        }
    }

    /// Synthesizes a table-level option change.
    #[must_use]
    pub fn table_option_ddl(&self, table: &str, option: &TableOption) -> Synthesis {
        if !self.dialect.profile().supports_charset {
            let capability = match option {
                TableOption::Engine(_) => Capability::Engine,
                TableOption::Charset(_) => Capability::Charset,
                TableOption::Collation(_) => Capability::Collation,
                TableOption::Comment(_) => Capability::Comment,
            };
            return Synthesis::advisory(self.dialect, capability, table);
        }

        Synthesis::statement(match option {
            TableOption::Engine(engine) => {
                format!("ALTER TABLE {table} ENGINE = {engine};\n")
            }
            TableOption::Charset(charset) => {
                format!("ALTER TABLE {table} CONVERT TO CHARACTER SET {charset};\n")
            }
            TableOption::Collation(collation) => {
                format!("ALTER TABLE {table} COLLATE = {collation};\n")
            }
            TableOption::Comment(text) => {
                format!("ALTER TABLE {table} COMMENT = '{text}';\n")
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn synth(dialect: Dialect) -> Synthesizer {
        Synthesizer::new(dialect)
    }

    #[test]
    fn test_add_column_uniform() {
        let op = ColumnOperation::add(ColumnSpec::new("email", "VARCHAR(255)").not_null());
        for dialect in Dialect::ALL {
            let ddl = synth(dialect).column_ddl("users", &op);
            assert_eq!(ddl.statements.len(), 1);
            assert_eq!(
                ddl.statements[0],
                "ALTER TABLE users ADD COLUMN email VARCHAR(255) NOT NULL;\n"
            );
        }
    }

    #[test]
    fn test_modify_verbs() {
        let op = ColumnOperation::Modify {
            spec: ColumnSpec::new("age", "BIGINT"),
        };
        assert_eq!(
            synth(Dialect::MySql).column_ddl("t1", &op).statements[0],
            "ALTER TABLE t1 MODIFY COLUMN age BIGINT;\n"
        );
        assert_eq!(
            synth(Dialect::SqlServer).column_ddl("t1", &op).statements[0],
            "ALTER TABLE t1 ALTER COLUMN age BIGINT;\n"
        );
        assert_eq!(
            synth(Dialect::Oracle).column_ddl("t1", &op).statements[0],
            "ALTER TABLE t1 MODIFY age BIGINT;\n"
        );
    }

    #[test]
    fn test_rename_column_sqlserver_scenario() {
        let op = ColumnOperation::rename("old_name", "new_name");
        let ddl = synth(Dialect::SqlServer).column_ddl("t1", &op);
        assert_eq!(
            ddl.statements[0],
            "EXEC sp_rename 't1.old_name', 'new_name', 'COLUMN';\n"
        );
    }

    #[test]
    fn test_rename_column_access_has_no_to() {
        let op = ColumnOperation::rename("a", "b");
        let ddl = synth(Dialect::MsAccess).column_ddl("t1", &op);
        assert_eq!(ddl.statements[0], "ALTER TABLE t1 RENAME COLUMN a b;\n");
    }

    #[test]
    fn test_rename_column_default() {
        let op = ColumnOperation::rename("a", "b");
        let ddl = synth(Dialect::Postgres).column_ddl("t1", &op);
        assert_eq!(ddl.statements[0], "ALTER TABLE t1 RENAME COLUMN a TO b;\n");
    }

    #[test]
    fn test_move_inline() {
        let op = ColumnOperation::Move {
            spec: ColumnSpec::new("email", "VARCHAR(255)"),
            position: ColumnPosition::After("id".to_string()),
        };
        let ddl = synth(Dialect::MySql).column_ddl("users", &op);
        assert_eq!(
            ddl.statements,
            vec!["ALTER TABLE users MODIFY COLUMN email VARCHAR(255) AFTER id;\n"]
        );
    }

    #[test]
    fn test_move_shadow_swap_order() {
        let op = ColumnOperation::Move {
            spec: ColumnSpec::new("email", "VARCHAR(255)"),
            position: ColumnPosition::First,
        };
        let ddl = synth(Dialect::SqlServer).column_ddl("users", &op);
        assert_eq!(ddl.statements.len(), 6);
        assert_eq!(
            ddl.statements[0],
            "ALTER TABLE users ADD COLUMN email_swap VARCHAR(255);\n"
        );
        assert_eq!(ddl.statements[1], "UPDATE users SET email_swap = email;\n");
        assert_eq!(ddl.statements[2], "ALTER TABLE users DROP COLUMN email;\n");
        assert_eq!(
            ddl.statements[3],
            "ALTER TABLE users ADD COLUMN email VARCHAR(255);\n"
        );
        assert_eq!(ddl.statements[4], "UPDATE users SET email = email_swap;\n");
        assert_eq!(
            ddl.statements[5],
            "ALTER TABLE users DROP COLUMN email_swap;\n"
        );
    }

    #[test]
    fn test_move_rename_swap_oracle() {
        let op = ColumnOperation::Move {
            spec: ColumnSpec::new("email", "VARCHAR2(255)"),
            position: ColumnPosition::First,
        };
        let ddl = synth(Dialect::Oracle).column_ddl("users", &op);
        assert_eq!(ddl.statements.len(), 4);
        assert_eq!(
            ddl.statements[0],
            "ALTER TABLE users RENAME COLUMN email TO email_swap;\n"
        );
        assert_eq!(
            ddl.statements[3],
            "ALTER TABLE users DROP COLUMN email_swap;\n"
        );
    }

    #[test]
    fn test_set_default_styles() {
        let op = ColumnOperation::SetDefault {
            column: "status".to_string(),
            value: "'new'".to_string(),
        };
        assert_eq!(
            synth(Dialect::Postgres).column_ddl("orders", &op).statements[0],
            "ALTER TABLE orders ALTER COLUMN status SET DEFAULT 'new';\n"
        );
        assert_eq!(
            synth(Dialect::SqlServer).column_ddl("orders", &op).statements[0],
            "ALTER TABLE orders ADD CONSTRAINT df_status DEFAULT 'new' FOR status;\n"
        );
        assert_eq!(
            synth(Dialect::Oracle).column_ddl("orders", &op).statements[0],
            "ALTER TABLE orders MODIFY status DEFAULT 'new';\n"
        );
    }

    #[test]
    fn test_drop_default_sqlserver_drops_constraint() {
        let op = ColumnOperation::DropDefault {
            column: "status".to_string(),
        };
        assert_eq!(
            synth(Dialect::SqlServer).column_ddl("orders", &op).statements[0],
            "ALTER TABLE orders DROP CONSTRAINT df_status;\n"
        );
    }

    #[test]
    fn test_set_nullable() {
        let spec = ColumnSpec::new("name", "VARCHAR(100)");
        let op = ColumnOperation::SetNullable {
            spec: spec.clone(),
            nullable: false,
        };
        assert_eq!(
            synth(Dialect::MySql).column_ddl("users", &op).statements[0],
            "ALTER TABLE users MODIFY COLUMN name VARCHAR(100) NOT NULL;\n"
        );
        // Oracle omits the type.
        assert_eq!(
            synth(Dialect::Oracle).column_ddl("users", &op).statements[0],
            "ALTER TABLE users MODIFY name NOT NULL;\n"
        );
    }

    #[test]
    fn test_charset_degrades_on_unsupporting_dialects() {
        let op = ColumnOperation::SetCharset {
            spec: ColumnSpec::new("name", "VARCHAR(100)"),
            charset: "utf8mb4".to_string(),
        };
        for dialect in [Dialect::SqlServer, Dialect::MsAccess, Dialect::Oracle] {
            let ddl = synth(dialect).column_ddl("users", &op);
            assert!(ddl.is_noop());
            assert_eq!(ddl.advisories.len(), 1);
            assert_eq!(ddl.advisories[0].capability, Capability::Charset);
        }
        let ddl = synth(Dialect::MySql).column_ddl("users", &op);
        assert_eq!(
            ddl.statements[0],
            "ALTER TABLE users MODIFY COLUMN name VARCHAR(100) CHARACTER SET utf8mb4;\n"
        );
    }

    #[test]
    fn test_visibility_mysql_only() {
        let op = ColumnOperation::SetVisibility {
            column: "secret".to_string(),
            visible: false,
        };
        assert_eq!(
            synth(Dialect::MySql).column_ddl("users", &op).statements[0],
            "ALTER TABLE users ALTER COLUMN secret SET INVISIBLE;\n"
        );
        assert!(synth(Dialect::Postgres).column_ddl("users", &op).is_noop());
    }

    #[test]
    fn test_index_styles() {
        let op = ColumnOperation::AddIndex {
            name: "idx_email".to_string(),
            columns: vec!["email".to_string()],
            unique: true,
        };
        assert_eq!(
            synth(Dialect::MySql).column_ddl("users", &op).statements[0],
            "ALTER TABLE users ADD UNIQUE INDEX idx_email (email);\n"
        );
        assert_eq!(
            synth(Dialect::Postgres).column_ddl("users", &op).statements[0],
            "CREATE UNIQUE INDEX idx_email ON users (email);\n"
        );

        let drop = ColumnOperation::DropIndex {
            name: "idx_email".to_string(),
        };
        assert_eq!(
            synth(Dialect::MySql).column_ddl("users", &drop).statements[0],
            "ALTER TABLE users DROP INDEX idx_email;\n"
        );
        assert_eq!(
            synth(Dialect::SqlServer).column_ddl("users", &drop).statements[0],
            "DROP INDEX idx_email ON users;\n"
        );
        assert_eq!(
            synth(Dialect::Sqlite).column_ddl("users", &drop).statements[0],
            "DROP INDEX idx_email;\n"
        );
    }

    #[test]
    fn test_primary_key_styles() {
        let op = ColumnOperation::SetPrimaryKey {
            columns: vec!["id".to_string()],
        };
        assert_eq!(
            synth(Dialect::MySql).column_ddl("users", &op).statements[0],
            "ALTER TABLE users DROP PRIMARY KEY, ADD PRIMARY KEY (id);\n"
        );
        assert_eq!(
            synth(Dialect::SqlServer).column_ddl("users", &op).statements[0],
            "ALTER TABLE users DROP CONSTRAINT pk_users, ADD CONSTRAINT pk_users PRIMARY KEY (id);\n"
        );
    }

    #[test]
    fn test_increment_fragment_mysql_ignores_parameters() {
        let fragment = synth(Dialect::MySql).increment_fragment(&AutoIncrement {
            start: 100,
            step: 5,
        });
        assert_eq!(fragment, "AUTO_INCREMENT");
    }

    #[test]
    fn test_increment_fragment_parameterized() {
        let inc = AutoIncrement { start: 100, step: 5 };
        assert_eq!(
            synth(Dialect::SqlServer).increment_fragment(&inc),
            "IDENTITY(100,5)"
        );
        assert_eq!(
            synth(Dialect::MsAccess).increment_fragment(&inc),
            "AUTOINCREMENT(100,5)"
        );
    }

    #[test]
    fn test_increment_sequence_oracle() {
        let inc = AutoIncrement { start: 10, step: 2 };
        assert_eq!(synth(Dialect::Oracle).increment_fragment(&inc), "");
        assert_eq!(
            synth(Dialect::Oracle).increment_sequence("users", &inc),
            Some("CREATE SEQUENCE users_seq START WITH 10 INCREMENT BY 2;\n".to_string())
        );
        assert_eq!(synth(Dialect::MySql).increment_sequence("users", &inc), None);
    }

    #[test]
    fn test_alter_increment() {
        assert_eq!(
            synth(Dialect::MySql).alter_increment_ddl("users", 500).statements[0],
            "ALTER TABLE users AUTO_INCREMENT = 500;\n"
        );
        assert_eq!(
            synth(Dialect::Oracle).alter_increment_ddl("users", 500).statements[0],
            "ALTER SEQUENCE users_seq RESTART START WITH 500;\n"
        );
        let ddl = synth(Dialect::SqlServer).alter_increment_ddl("users", 500);
        assert!(ddl.is_noop());
        assert_eq!(ddl.advisories[0].capability, Capability::AlterIncrement);
    }

    #[test]
    fn test_table_rename_styles() {
        assert_eq!(
            synth(Dialect::SqlServer).rename_table_ddl("old", "new"),
            "EXEC sp_rename 'old', 'new';\n"
        );
        assert_eq!(
            synth(Dialect::Oracle).rename_table_ddl("old", "new"),
            "ALTER TABLE \"old\" RENAME TO \"new\";\n"
        );
        assert_eq!(
            synth(Dialect::MsAccess).rename_table_ddl("old", "new"),
            "ALTER TABLE [old] RENAME [new];\n"
        );
        assert_eq!(
            synth(Dialect::MySql).rename_table_ddl("old", "new"),
            "RENAME TABLE `old` TO `new`;\n"
        );
    }

    #[test]
    fn test_drop_table() {
        assert_eq!(
            synth(Dialect::Postgres).drop_table_ddl("users", false),
            "DROP TABLE users;\n"
        );
        assert_eq!(
            synth(Dialect::Postgres).drop_table_ddl("users", true),
            "DROP TABLE IF EXISTS users;\n"
        );
    }

    #[test]
    fn test_table_options() {
        let ddl = synth(Dialect::MySql)
            .table_option_ddl("users", &TableOption::Engine("InnoDB".to_string()));
        assert_eq!(ddl.statements[0], "ALTER TABLE users ENGINE = InnoDB;\n");

        let ddl = synth(Dialect::Oracle)
            .table_option_ddl("users", &TableOption::Comment("people".to_string()));
        assert!(ddl.is_noop());
        assert_eq!(ddl.advisories[0].capability, Capability::Comment);
    }

    #[test]
    fn test_statements_are_terminated_and_verbatim() {
        let ops = [
            ColumnOperation::add(ColumnSpec::new("c_one", "INT")),
            ColumnOperation::Modify {
                spec: ColumnSpec::new("c_one", "BIGINT"),
            },
            ColumnOperation::rename("c_one", "c_two"),
            ColumnOperation::drop("c_one"),
            ColumnOperation::Move {
                spec: ColumnSpec::new("c_one", "INT"),
                position: ColumnPosition::First,
            },
            ColumnOperation::SetDefault {
                column: "c_one".to_string(),
                value: "0".to_string(),
            },
            ColumnOperation::DropDefault {
                column: "c_one".to_string(),
            },
            ColumnOperation::SetNullable {
                spec: ColumnSpec::new("c_one", "INT"),
                nullable: true,
            },
            ColumnOperation::AddIndex {
                name: "idx_c_one".to_string(),
                columns: vec!["c_one".to_string()],
                unique: false,
            },
            ColumnOperation::SetPrimaryKey {
                columns: vec!["c_one".to_string()],
            },
        ];

        for dialect in Dialect::ALL {
            for op in &ops {
                let ddl = synth(dialect).column_ddl("tbl_x", op);
                // Same inputs, same outputs.
                assert_eq!(ddl, synth(dialect).column_ddl("tbl_x", op));
                for sql in &ddl.statements {
                    assert!(sql.ends_with(";\n"), "unterminated: {sql:?}");
                    assert!(sql.contains("tbl_x") || sql.contains("idx_c_one"), "missing table: {sql:?}");
                }
            }
        }
    }
}
