// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! # xtask - confreview automation
//!
//! - `cargo xtask ci` runs clippy, the format check, the `confreview-*`
//!   rustdoc check, the build and the tests
//! - `cargo xtask migrate --database confreview.db` prepares the `SQLite`
//!   file the server is started with (`confreview-server --database`)

#![deny(
    clippy::pedantic,
    //clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use std::{
    fmt::Debug,
    io,
    path::{Path, PathBuf},
    process::Output,
    vec,
};

use cargo_metadata::MetadataCommand;
use clap::{Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use color_eyre::{
    eyre::{eyre, Context},
    Result,
};
use diesel::sql_types::{Integer, Text};
use diesel::{Connection, QueryableByName, RunQueryDsl, SqliteConnection};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use duct::cmd;
use tracing::level_filters::LevelFilter;
use tracing_log::AsTrace;

/// The same migrations `confreview-persistence` embeds.
const MIGRATIONS: EmbeddedMigrations = embed_migrations!("../crates/persistence/migrations");

/// Prefix shared by every library and binary package of the workspace.
const PACKAGE_PREFIX: &str = "confreview";

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.log_level())
        .without_time()
        .init();

    match args.run() {
        Ok(()) => (),
        Err(err) => {
            tracing::error!("{err}");
            std::process::exit(1);
        }
    }
    Ok(())
}

#[derive(Debug, Parser)]
#[command(bin_name = "cargo xtask", styles = clap_cargo::style::CLAP_STYLING)]
struct Args {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    verbosity: Verbosity<InfoLevel>,
}

impl Args {
    fn run(self) -> Result<()> {
        self.command.run()
    }

    fn log_level(&self) -> LevelFilter {
        self.verbosity.log_level_filter().as_trace()
    }
}

#[derive(Clone, Debug, Subcommand)]
enum Command {
    /// Lint, build and test the confreview crates
    CI,

    /// Build every crate and the server binary
    #[command(visible_alias = "b")]
    Build,

    /// Lint with clippy, rustfmt and rustdoc
    #[command(visible_alias = "l")]
    Lint,

    /// Run clippy with warnings denied
    #[command(visible_alias = "cl")]
    LintClippy,

    /// Build the confreview-* docs with warnings denied
    #[command(visible_alias = "d")]
    LintDocs,

    /// Check formatting
    #[command(visible_alias = "lf")]
    LintFormatting,

    /// Reformat the workspace
    #[command(visible_alias = "fmt")]
    FixFormatting,

    /// Run the unit and router tests
    #[command(visible_alias = "t")]
    Test,

    /// Write an lcov report to target/lcov.info
    #[command(visible_alias = "cov")]
    Coverage,

    /// Apply the persistence migrations to a `SQLite` database file
    #[command(visible_alias = "mg")]
    Migrate {
        /// Path of the database file; created if missing
        #[arg(long, default_value = "confreview.db")]
        database: PathBuf,
    },
}

impl Command {
    fn run(self) -> Result<()> {
        match self {
            Self::CI => ci(),
            Self::Build => build(),
            Self::Lint => lint(),
            Self::LintClippy => lint_clippy(),
            Self::LintDocs => lint_docs(),
            Self::LintFormatting => lint_format(),
            Self::FixFormatting => fix_format(),
            Self::Test => test(),
            Self::Coverage => coverage(),
            Self::Migrate { database } => migrate(&database),
        }
    }
}

fn ci() -> Result<()> {
    lint()?;
    build()?;
    test()
}

fn build() -> Result<()> {
    run_cargo(vec!["build", "--workspace", "--all-targets"])
}

fn lint() -> Result<()> {
    lint_clippy()?;
    lint_format()?;
    lint_docs()
}

fn lint_clippy() -> Result<()> {
    run_cargo(vec![
        "clippy",
        "--workspace",
        "--all-targets",
        "--",
        "-D",
        "warnings",
    ])
}

/// Build rustdoc for each confreview package the way docs.rs would
fn lint_docs() -> Result<()> {
    let meta = MetadataCommand::new()
        .exec()
        .wrap_err("failed to get cargo metadata")?;

    for package in meta
        .workspace_packages()
        .into_iter()
        .filter(|p| p.name.starts_with(PACKAGE_PREFIX))
    {
        cmd("cargo", ["doc", "--no-deps", "--package", &package.name])
            .env_remove("CARGO")
            .env("RUSTUP_TOOLCHAIN", "nightly")
            .env("RUSTDOCFLAGS", "--cfg docsrs -D warnings")
            .run_with_trace()?;
    }

    Ok(())
}

fn lint_format() -> Result<()> {
    run_cargo_nightly(vec!["fmt", "--all", "--check"])
}

fn fix_format() -> Result<()> {
    run_cargo_nightly(vec!["fmt", "--all"])
}

/// Tests run against in-memory `SQLite`, so no database setup is needed
fn test() -> Result<()> {
    run_cargo(vec!["test", "--workspace", "--all-targets"])
}

fn coverage() -> Result<()> {
    run_cargo(vec![
        "llvm-cov",
        "--workspace",
        "--lcov",
        "--output-path",
        "target/lcov.info",
    ])
}

/// Apply pending migrations to `database` and log the resulting schema
fn migrate(database: &Path) -> Result<()> {
    let url: &str = database
        .to_str()
        .ok_or_else(|| eyre!("database path is not valid UTF-8: {}", database.display()))?;
    let mut conn = SqliteConnection::establish(url)
        .wrap_err(format!("failed to open SQLite database {url}"))?;

    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| eyre!("failed to run migrations: {e}"))?;
    tracing::info!("applied {} pending migration(s) to {url}", applied.len());
    for version in &applied {
        tracing::debug!("applied migration {version}");
    }

    for table in introspect_sqlite_tables(&mut conn)? {
        tracing::info!("table {}: {}", table.name, table.columns.join(", "));
    }
    Ok(())
}

/// A table and its columns in declaration order
struct TableSummary {
    name: String,
    columns: Vec<String>,
}

/// List the confreview tables of a `SQLite` database
fn introspect_sqlite_tables(conn: &mut SqliteConnection) -> Result<Vec<TableSummary>> {
    #[derive(QueryableByName)]
    struct TableName {
        #[diesel(sql_type = Text)]
        name: String,
    }

    #[derive(QueryableByName)]
    struct ColumnInfo {
        #[diesel(sql_type = Text)]
        name: String,
        #[diesel(sql_type = Text)]
        r#type: String,
        #[diesel(sql_type = Integer)]
        pk: i32,
    }

    let tables: Vec<TableName> = diesel::sql_query(
        "SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%' \
         AND name != '__diesel_schema_migrations' ORDER BY name",
    )
    .load(conn)
    .wrap_err("failed to list SQLite tables")?;

    let mut summaries = Vec::with_capacity(tables.len());
    for table in tables {
        let columns: Vec<ColumnInfo> =
            diesel::sql_query(format!("PRAGMA table_info({})", table.name))
                .load(conn)
                .wrap_err(format!("failed to read columns of {}", table.name))?;

        summaries.push(TableSummary {
            name: table.name,
            columns: columns
                .into_iter()
                .map(|col| {
                    let key = if col.pk > 0 { " PK" } else { "" };
                    format!("{} {}{key}", col.name, col.r#type.to_uppercase())
                })
                .collect(),
        });
    }
    Ok(summaries)
}

fn run_cargo(args: Vec<&str>) -> Result<()> {
    cmd("cargo", args).run_with_trace()?;
    Ok(())
}

/// rustfmt and rustdoc flags above need the nightly toolchain
fn run_cargo_nightly(args: Vec<&str>) -> Result<()> {
    cmd("cargo", args)
        .env_remove("CARGO")
        .env("RUSTUP_TOOLCHAIN", "nightly")
        .run_with_trace()?;
    Ok(())
}

trait ExpressionExt {
    /// Run the command, logging it before and again on failure
    fn run_with_trace(&self) -> io::Result<Output>;
}

impl ExpressionExt for duct::Expression {
    fn run_with_trace(&self) -> io::Result<Output> {
        tracing::info!("running command: {:?}", self);
        self.run().inspect_err(|_| {
            tracing::error!("failed to run command: {:?}", self);
        })
    }
}
