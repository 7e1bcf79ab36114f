//! Dialect identification and per-dialect capability profiles.
//!
//! Every structural difference between the supported engines is captured in a
//! [`DialectProfile`]: a static table of verbs, grammar styles, and capability
//! flags looked up once per synthesizer. Adding a dialect means adding a
//! profile entry, not touching the synthesis code.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A supported SQL dialect.
///
/// The set is closed. [`Dialect::Postgres`] doubles as the default grammar:
/// parsing an unrecognized dialect name falls back to it rather than failing,
/// so every caller-supplied string maps to a usable dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    /// MySQL / MariaDB.
    MySql,
    /// SQLite.
    Sqlite,
    /// PostgreSQL, and the fallback grammar for unknown engines.
    #[default]
    Postgres,
    /// Microsoft SQL Server.
    SqlServer,
    /// Microsoft Access.
    MsAccess,
    /// Oracle.
    Oracle,
}

impl Dialect {
    /// All supported dialects, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::MySql,
        Self::Sqlite,
        Self::Postgres,
        Self::SqlServer,
        Self::MsAccess,
        Self::Oracle,
    ];

    /// Returns the capability profile for this dialect.
    #[must_use]
    pub const fn profile(self) -> &'static DialectProfile {
        match self {
            Self::MySql => &MYSQL,
            Self::Sqlite => &SQLITE,
            Self::Postgres => &POSTGRES,
            Self::SqlServer => &SQL_SERVER,
            Self::MsAccess => &MS_ACCESS,
            Self::Oracle => &ORACLE,
        }
    }

    /// Returns the canonical dialect name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        self.profile().name
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Dialect {
    type Err = Infallible;

    /// Parses a dialect name. Unrecognized names fall back to
    /// [`Dialect::Postgres`], so this never fails.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.to_ascii_lowercase().as_str() {
            "mysql" | "mariadb" => Self::MySql,
            "sqlite" | "sqlite3" => Self::Sqlite,
            "sqlserver" | "sql-server" | "sqlsrv" | "mssql" => Self::SqlServer,
            "msaccess" | "ms-access" | "access" => Self::MsAccess,
            "oracle" | "oci" => Self::Oracle,
            _ => Self::Postgres,
        })
    }
}

/// How a dialect renames a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenameStyle {
    /// `EXEC sp_rename 't.old', 'new', 'COLUMN'` (SQL Server).
    StoredProcedure,
    /// `ALTER TABLE t RENAME COLUMN old new` — no `TO` (MS Access).
    WithoutTo,
    /// `ALTER TABLE t RENAME COLUMN old TO new`.
    RenameTo,
}

/// How a dialect repositions a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveStrategy {
    /// A single `MODIFY COLUMN … FIRST|AFTER x` statement.
    InlinePosition,
    /// Shadow-column dance: add a shadow, copy, drop the original, re-add,
    /// copy back, drop the shadow (SQL Server, MS Access).
    ShadowSwap,
    /// Rename to a temporary name, add, copy, drop the temporary (Oracle).
    RenameSwap,
}

/// How a dialect sets a column default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefaultStyle {
    /// `ALTER COLUMN c SET DEFAULT v` / `DROP DEFAULT`.
    SetDefault,
    /// Defaults are named constraints: `ADD CONSTRAINT df_c DEFAULT v FOR c`
    /// (SQL Server).
    NamedConstraint,
    /// `MODIFY c DEFAULT v`, dropped by defaulting back to NULL (Oracle).
    ModifyDefault,
}

/// How a dialect creates a secondary index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexStyle {
    /// `CREATE [UNIQUE] INDEX name ON t (cols)`.
    CreateIndex,
    /// `ALTER TABLE t ADD [UNIQUE] INDEX name (cols)` (MySQL).
    AlterTable,
}

/// How a dialect drops an index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropIndexStyle {
    /// `DROP INDEX name`.
    Bare,
    /// `DROP INDEX name ON t` (SQL Server, MS Access).
    OnTable,
    /// `ALTER TABLE t DROP INDEX name` (MySQL).
    AlterTable,
}

/// How a dialect replaces a primary key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimaryKeyStyle {
    /// `DROP CONSTRAINT pk_t, ADD CONSTRAINT pk_t PRIMARY KEY (…)`.
    Constraint,
    /// `DROP PRIMARY KEY, ADD PRIMARY KEY (…)` (MySQL, SQLite).
    Bare,
}

/// The creation-time auto-increment grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncrementStyle {
    /// A bare keyword; start/step parameters are ignored.
    Flag(&'static str),
    /// `KEYWORD(start,step)`.
    Parameterized(&'static str),
    /// No column fragment; a companion `CREATE SEQUENCE` statement instead
    /// (Oracle).
    Sequence,
}

/// How an existing table's increment counter is altered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlterIncrementStyle {
    /// `ALTER TABLE t AUTO_INCREMENT = n`.
    TableOption,
    /// `ALTER SEQUENCE t_seq RESTART START WITH n` (Oracle).
    Sequence,
    /// Not expressible; degrades to an advisory.
    Unsupported,
}

/// How a dialect renames a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableRenameStyle {
    /// `EXEC sp_rename 'old', 'new'` (SQL Server).
    StoredProcedure,
    /// `ALTER TABLE "old" RENAME TO "new"` (Oracle).
    QuotedRenameTo,
    /// `ALTER TABLE [old] RENAME [new]` (MS Access).
    BracketRename,
    /// `` RENAME TABLE `old` TO `new` ``.
    RenameTable,
}

/// Everything the synthesizer needs to know about one dialect.
///
/// The fields are deliberately plain data so that per-operation synthesis is
/// a lookup plus string templating rather than a switch repeated across many
/// functions.
#[derive(Debug)]
pub struct DialectProfile {
    /// Canonical dialect name.
    pub name: &'static str,
    /// Verb for altering a column definition (`MODIFY COLUMN`,
    /// `ALTER COLUMN`, `MODIFY`).
    pub modify_verb: &'static str,
    /// Column rename grammar.
    pub rename: RenameStyle,
    /// Column reposition strategy.
    pub move_strategy: MoveStrategy,
    /// Column default grammar.
    pub default_style: DefaultStyle,
    /// Secondary index creation grammar.
    pub index_style: IndexStyle,
    /// Index drop grammar.
    pub drop_index_style: DropIndexStyle,
    /// Primary key replacement grammar.
    pub primary_key_style: PrimaryKeyStyle,
    /// Creation-time auto-increment grammar.
    pub increment: IncrementStyle,
    /// Alter-time increment grammar.
    pub alter_increment: AlterIncrementStyle,
    /// Table rename grammar.
    pub table_rename: TableRenameStyle,
    /// Whether nullability changes must restate the column type.
    pub nullability_requires_type: bool,
    /// Whether charset/collation/engine/comment DDL is supported.
    pub supports_charset: bool,
    /// Whether column visibility (`SET INVISIBLE`) is supported.
    pub supports_visibility: bool,
    /// Fixed fragment for the current date.
    pub current_date: &'static str,
    /// Fixed fragment for the current time.
    pub current_time: &'static str,
    /// Fixed fragment for the current timestamp.
    pub current_timestamp: &'static str,
}

const MYSQL: DialectProfile = DialectProfile {
    name: "mysql",
    modify_verb: "MODIFY COLUMN",
    rename: RenameStyle::RenameTo,
    move_strategy: MoveStrategy::InlinePosition,
    default_style: DefaultStyle::SetDefault,
    index_style: IndexStyle::AlterTable,
    drop_index_style: DropIndexStyle::AlterTable,
    primary_key_style: PrimaryKeyStyle::Bare,
    increment: IncrementStyle::Flag("AUTO_INCREMENT"),
    alter_increment: AlterIncrementStyle::TableOption,
    table_rename: TableRenameStyle::RenameTable,
    nullability_requires_type: true,
    supports_charset: true,
    supports_visibility: true,
    current_date: "CURRENT_DATE",
    current_time: "CURRENT_TIME",
    current_timestamp: "CURRENT_TIMESTAMP",
};

const SQLITE: DialectProfile = DialectProfile {
    name: "sqlite",
    modify_verb: "MODIFY COLUMN",
    rename: RenameStyle::RenameTo,
    move_strategy: MoveStrategy::InlinePosition,
    default_style: DefaultStyle::SetDefault,
    index_style: IndexStyle::CreateIndex,
    drop_index_style: DropIndexStyle::Bare,
    primary_key_style: PrimaryKeyStyle::Bare,
    increment: IncrementStyle::Flag("AUTOINCREMENT"),
    alter_increment: AlterIncrementStyle::TableOption,
    table_rename: TableRenameStyle::RenameTable,
    nullability_requires_type: true,
    supports_charset: true,
    supports_visibility: false,
    current_date: "CURRENT_DATE",
    current_time: "CURRENT_TIME",
    current_timestamp: "CURRENT_TIMESTAMP",
};

const POSTGRES: DialectProfile = DialectProfile {
    name: "postgres",
    modify_verb: "MODIFY COLUMN",
    rename: RenameStyle::RenameTo,
    move_strategy: MoveStrategy::InlinePosition,
    default_style: DefaultStyle::SetDefault,
    index_style: IndexStyle::CreateIndex,
    drop_index_style: DropIndexStyle::Bare,
    primary_key_style: PrimaryKeyStyle::Constraint,
    increment: IncrementStyle::Flag("GENERATED BY DEFAULT AS IDENTITY"),
    alter_increment: AlterIncrementStyle::TableOption,
    table_rename: TableRenameStyle::RenameTable,
    nullability_requires_type: true,
    supports_charset: true,
    supports_visibility: false,
    current_date: "CURRENT_DATE",
    current_time: "CURRENT_TIME",
    current_timestamp: "CURRENT_TIMESTAMP",
};

const SQL_SERVER: DialectProfile = DialectProfile {
    name: "sqlserver",
    modify_verb: "ALTER COLUMN",
    rename: RenameStyle::StoredProcedure,
    move_strategy: MoveStrategy::ShadowSwap,
    default_style: DefaultStyle::NamedConstraint,
    index_style: IndexStyle::CreateIndex,
    drop_index_style: DropIndexStyle::OnTable,
    primary_key_style: PrimaryKeyStyle::Constraint,
    increment: IncrementStyle::Parameterized("IDENTITY"),
    alter_increment: AlterIncrementStyle::Unsupported,
    table_rename: TableRenameStyle::StoredProcedure,
    nullability_requires_type: true,
    supports_charset: false,
    supports_visibility: false,
    current_date: "CONVERT(DATE, GETDATE())",
    current_time: "CONVERT(TIME, GETDATE())",
    current_timestamp: "GETDATE()",
};

const MS_ACCESS: DialectProfile = DialectProfile {
    name: "msaccess",
    modify_verb: "ALTER COLUMN",
    rename: RenameStyle::WithoutTo,
    move_strategy: MoveStrategy::ShadowSwap,
    default_style: DefaultStyle::SetDefault,
    index_style: IndexStyle::CreateIndex,
    drop_index_style: DropIndexStyle::OnTable,
    primary_key_style: PrimaryKeyStyle::Constraint,
    increment: IncrementStyle::Parameterized("AUTOINCREMENT"),
    alter_increment: AlterIncrementStyle::Unsupported,
    table_rename: TableRenameStyle::BracketRename,
    nullability_requires_type: true,
    supports_charset: false,
    supports_visibility: false,
    current_date: "DATE()",
    current_time: "TIME()",
    current_timestamp: "NOW()",
};

const ORACLE: DialectProfile = DialectProfile {
    name: "oracle",
    modify_verb: "MODIFY",
    rename: RenameStyle::RenameTo,
    move_strategy: MoveStrategy::RenameSwap,
    default_style: DefaultStyle::ModifyDefault,
    index_style: IndexStyle::CreateIndex,
    drop_index_style: DropIndexStyle::Bare,
    primary_key_style: PrimaryKeyStyle::Constraint,
    increment: IncrementStyle::Sequence,
    alter_increment: AlterIncrementStyle::Sequence,
    table_rename: TableRenameStyle::QuotedRenameTo,
    nullability_requires_type: false,
    supports_charset: false,
    supports_visibility: false,
    current_date: "CURRENT_DATE",
    current_time: "CURRENT_TIMESTAMP",
    current_timestamp: "SYSDATE",
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_names() {
        assert_eq!("mysql".parse::<Dialect>().unwrap(), Dialect::MySql);
        assert_eq!("sqlite3".parse::<Dialect>().unwrap(), Dialect::Sqlite);
        assert_eq!("sql-server".parse::<Dialect>().unwrap(), Dialect::SqlServer);
        assert_eq!("MSSQL".parse::<Dialect>().unwrap(), Dialect::SqlServer);
        assert_eq!("access".parse::<Dialect>().unwrap(), Dialect::MsAccess);
        assert_eq!("oracle".parse::<Dialect>().unwrap(), Dialect::Oracle);
    }

    #[test]
    fn test_unknown_name_falls_back_to_default() {
        assert_eq!("cockroach".parse::<Dialect>().unwrap(), Dialect::Postgres);
        assert_eq!("".parse::<Dialect>().unwrap(), Dialect::Postgres);
    }

    #[test]
    fn test_every_dialect_has_a_profile() {
        for dialect in Dialect::ALL {
            let profile = dialect.profile();
            assert!(!profile.name.is_empty());
            assert!(!profile.modify_verb.is_empty());
        }
    }

    #[test]
    fn test_modify_verbs() {
        assert_eq!(Dialect::MySql.profile().modify_verb, "MODIFY COLUMN");
        assert_eq!(Dialect::SqlServer.profile().modify_verb, "ALTER COLUMN");
        assert_eq!(Dialect::MsAccess.profile().modify_verb, "ALTER COLUMN");
        assert_eq!(Dialect::Oracle.profile().modify_verb, "MODIFY");
    }

    #[test]
    fn test_charset_capability() {
        assert!(Dialect::MySql.profile().supports_charset);
        assert!(Dialect::Sqlite.profile().supports_charset);
        assert!(!Dialect::SqlServer.profile().supports_charset);
        assert!(!Dialect::MsAccess.profile().supports_charset);
        assert!(!Dialect::Oracle.profile().supports_charset);
    }
}
