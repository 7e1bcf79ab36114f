//! forge-migrate CLI
//!
//! Command-line front end for the migration engine: executes table flows
//! against a SQLite database and prints dialect-specific DDL without
//! executing it.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use forge_migrate::prelude::*;

/// Multi-dialect schema migration engine.
#[derive(Parser)]
#[command(name = "forge-migrate")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Database URL (SQLite path or connection string).
    #[arg(short, long, env = "DATABASE_URL", default_value = "sqlite:forge.db")]
    database: String,

    /// Dialect used for DDL synthesis. Unrecognized names fall back to the
    /// default grammar.
    #[arg(long, default_value = "sqlite")]
    dialect: String,

    /// Exit with status 2 on the first failed flow.
    #[arg(long)]
    strict: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Alter a table toward a desired column layout.
    Alter {
        /// Table name.
        table: String,

        /// JSON file holding the previous snapshot of the table.
        #[arg(long)]
        snapshot: PathBuf,

        /// JSON file holding the desired column list.
        #[arg(long)]
        definition: PathBuf,

        /// Allow dropping columns missing from the desired layout.
        #[arg(long)]
        allow_destructive: bool,
    },

    /// Rename a table.
    RenameTable {
        /// Current table name.
        from: String,
        /// New table name.
        to: String,
    },

    /// Drop a table.
    DropTable {
        /// Table name.
        table: String,

        /// Use DROP TABLE IF EXISTS.
        #[arg(long)]
        if_exists: bool,
    },

    /// Print synthesized DDL without executing it.
    Ddl {
        #[command(subcommand)]
        operation: DdlCommands,
    },
}

#[derive(Subcommand)]
enum DdlCommands {
    /// ALTER TABLE … ADD COLUMN.
    AddColumn {
        /// Table name.
        #[arg(short, long)]
        table: String,

        /// Column name.
        #[arg(short, long)]
        column: String,

        /// Rendered column type, e.g. "VARCHAR(255)".
        #[arg(long = "type", value_name = "TYPE")]
        type_def: String,

        /// Declare the column NOT NULL.
        #[arg(long)]
        not_null: bool,

        /// Rendered default value.
        #[arg(long)]
        default: Option<String>,
    },

    /// Rename a column.
    RenameColumn {
        /// Table name.
        #[arg(short, long)]
        table: String,

        /// Current column name.
        #[arg(long)]
        from: String,

        /// New column name.
        #[arg(long)]
        to: String,
    },

    /// Drop a column.
    DropColumn {
        /// Table name.
        #[arg(short, long)]
        table: String,

        /// Column name.
        #[arg(short, long)]
        column: String,
    },

    /// Rename a table.
    RenameTable {
        /// Current table name.
        from: String,
        /// New table name.
        to: String,
    },

    /// Drop a table.
    DropTable {
        /// Table name.
        table: String,

        /// Use DROP TABLE IF EXISTS.
        #[arg(long)]
        if_exists: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let dialect: Dialect = cli.dialect.parse().unwrap_or_default();

    match cli.command {
        Commands::Ddl { operation } => {
            let synth = Synthesizer::new(dialect);
            let ddl = match operation {
                DdlCommands::AddColumn {
                    table,
                    column,
                    type_def,
                    not_null,
                    default,
                } => {
                    let mut spec = ColumnSpec::new(column, type_def);
                    if not_null {
                        spec = spec.not_null();
                    }
                    if let Some(value) = default {
                        spec = spec.default_value(value);
                    }
                    synth.column_ddl(&table, &ColumnOperation::add(spec)).batch()
                }
                DdlCommands::RenameColumn { table, from, to } => synth
                    .column_ddl(&table, &ColumnOperation::rename(from, to))
                    .batch(),
                DdlCommands::DropColumn { table, column } => synth
                    .column_ddl(&table, &ColumnOperation::drop(column))
                    .batch(),
                DdlCommands::RenameTable { from, to } => synth.rename_table_ddl(&from, &to),
                DdlCommands::DropTable { table, if_exists } => {
                    synth.drop_table_ddl(&table, if_exists)
                }
            };
            print!("{ddl}");
        }

        Commands::Alter {
            table,
            snapshot,
            definition,
            allow_destructive,
        } => {
            let previous = TableSnapshot::from_json_file(&snapshot)?;
            let data = std::fs::read_to_string(&definition)?;
            let desired: Vec<ColumnSpec> = serde_json::from_str(&data)?;

            let mut fx = migrator(&cli.database, dialect, cli.strict)
                .await?
                .allow_destructive(allow_destructive);
            fx.alter_table(&table, &previous, |t| {
                for column in desired {
                    t.add_column(column);
                }
            })
            .await;
        }

        Commands::RenameTable { from, to } => {
            let mut fx = migrator(&cli.database, dialect, cli.strict).await?;
            fx.rename_table(&from, &to).await;
        }

        Commands::DropTable { table, if_exists } => {
            let mut fx = migrator(&cli.database, dialect, cli.strict).await?;
            fx.drop_table(&table, if_exists).await;
        }
    }

    Ok(())
}

async fn migrator(
    database: &str,
    dialect: Dialect,
    strict: bool,
) -> anyhow::Result<Migrator<SqlitePoolConnection>> {
    let conn = SqlitePoolConnection::connect(database).await?;
    let fx = Migrator::new(conn, dialect);
    Ok(if strict {
        fx.with_sink(ConsoleSink::exit_on_failure(2))
    } else {
        fx.with_sink(ConsoleSink::new())
    })
}
