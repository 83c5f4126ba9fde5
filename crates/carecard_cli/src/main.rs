//! Command-line front end for the care-card engine.
//!
//! # Responsibility
//! - Expose normalization, bounding, layout planning, import and the
//!   identity migration as subcommands.
//! - Print machine-readable JSON for layout output so renderers can consume it.

use carecard_core::db::Connection;
use carecard_core::{
    bound_field, default_log_level, init_logging, normalize_scientific_name, open_db,
    AverageCharMeasure, CardLayoutPlanner, EngineConfig, ImportRow, RecordService,
    SqliteRecordRepository,
};
use clap::{Parser, Subcommand};
use log::{info, warn};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "carecard", version, about = "Plant care-card engine utilities")]
struct Cli {
    /// JSON engine config; built-in defaults apply when unset
    #[arg(long, global = true, env = "CARECARD_CONFIG", value_name = "PATH")]
    config: Option<PathBuf>,
    /// Absolute directory for rolling log files; logging is off when unset
    #[arg(long, global = true, env = "CARECARD_LOG_DIR", value_name = "DIR")]
    log_dir: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the canonical form of each scientific name
    Normalize {
        #[arg(required = true)]
        names: Vec<String>,
    },
    /// Bound text to the configured limit of a field
    Bound { field: String, text: String },
    /// Print the layout of one stored record as JSON
    Card { db: PathBuf, name: String },
    /// Print the layout of every stored record, one page each, as JSON
    Catalog { db: PathBuf },
    /// Import a JSON array of header-keyed rows
    Import { db: PathBuf, rows: PathBuf },
    /// Re-normalize every stored identity
    Migrate { db: PathBuf },
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Self::Normalize { .. } => "normalize",
            Self::Bound { .. } => "bound",
            Self::Card { .. } => "card",
            Self::Catalog { .. } => "catalog",
            Self::Import { .. } => "import",
            Self::Migrate { .. } => "migrate",
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Some(log_dir) = cli.log_dir.as_deref() {
        if let Err(err) = init_logging(default_log_level(), log_dir) {
            eprintln!("warning: {err}");
        }
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), String> {
    let config = load_config(cli.config.as_deref())?;
    info!(
        "event=cli_command module=cli status=start command={}",
        cli.command.name()
    );

    match cli.command {
        Commands::Normalize { names } => {
            for name in names {
                println!("{}", normalize_scientific_name(&name));
            }
            Ok(())
        }
        Commands::Bound { field, text } => {
            println!("{}", bound_field(&field, &text, &config.field_limits));
            Ok(())
        }
        Commands::Card { db, name } => {
            let conn = open_db(&db).map_err(|err| err.to_string())?;
            let record = record_service(&conn, &config)
                .get_record(&name)
                .map_err(|err| err.to_string())?
                .ok_or_else(|| format!("no record for `{}`", normalize_scientific_name(&name)))?;
            let planner = CardLayoutPlanner::from_config(&config, AverageCharMeasure::default());
            print_json(&planner.plan_card(&record))
        }
        Commands::Catalog { db } => {
            let conn = open_db(&db).map_err(|err| err.to_string())?;
            let records = record_service(&conn, &config)
                .list_records()
                .map_err(|err| err.to_string())?;
            let planner = CardLayoutPlanner::from_config(&config, AverageCharMeasure::default());
            print_json(&planner.plan_catalog(&records))
        }
        Commands::Import { db, rows } => {
            let rows_path = rows.display();
            let document = std::fs::read_to_string(&rows)
                .map_err(|err| format!("cannot read `{rows_path}`: {err}"))?;
            let rows: Vec<ImportRow> = serde_json::from_str(&document)
                .map_err(|err| format!("`{rows_path}` is not a JSON array of rows: {err}"))?;
            let headers: Vec<&str> = rows
                .iter()
                .flat_map(|row| row.keys().map(String::as_str))
                .collect::<BTreeSet<_>>()
                .into_iter()
                .collect();

            let conn = open_db(&db).map_err(|err| err.to_string())?;
            let report = record_service(&conn, &config).import_rows(&headers, &rows);
            println!("imported {} record(s)", report.imported);
            for error in &report.errors {
                println!("{error}");
            }
            Ok(())
        }
        Commands::Migrate { db } => {
            let conn = open_db(&db).map_err(|err| err.to_string())?;
            let report = record_service(&conn, &config)
                .normalize_identities()
                .map_err(|err| err.to_string())?;
            for (from, to) in &report.renamed {
                println!("renamed {from} -> {to}");
            }
            for (from, to) in &report.conflicts {
                warn!("event=cli_migrate module=cli status=conflict from={} to={}", from, to);
                println!("conflict {from} -> {to} (left unchanged)");
            }
            Ok(())
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<EngineConfig, String> {
    match path {
        Some(path) => EngineConfig::load(path)
            .map_err(|err| format!("config `{}`: {err}", path.display())),
        None => Ok(EngineConfig::default()),
    }
}

fn record_service<'conn>(
    conn: &'conn Connection,
    config: &EngineConfig,
) -> RecordService<SqliteRecordRepository<'conn>> {
    let limits = config.field_limits.clone();
    RecordService::new(SqliteRecordRepository::new(conn, limits.clone()), limits)
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), String> {
    let rendered = serde_json::to_string_pretty(value).map_err(|err| err.to_string())?;
    println!("{rendered}");
    Ok(())
}
