//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use crate::adapters::csv_adapter::read_trades;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::memory_store::InMemoryTradeStore;
use crate::domain::error::{FieldError, JournalError, ValidationErrors};
use crate::domain::property::Property;
use crate::domain::query::SearchRequest;
use crate::domain::search::{SearchSettings, TradeSearch};
use crate::ports::config_port::ConfigPort;
use crate::ports::trade_store::TradeStore;

#[derive(Parser, Debug)]
#[command(name = "tradejournal", about = "Trade journal query tool")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a JSON search request against a CSV journal or the configured database
    Search {
        #[arg(short, long)]
        request: PathBuf,
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Load a CSV journal into the configured SQLite database
    Import {
        #[arg(short, long)]
        config: PathBuf,
        #[arg(long)]
        csv: PathBuf,
    },
    /// List filterable properties and their operators
    Properties,
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Search {
            request,
            config,
            csv,
        } => run_search(&request, config.as_ref(), csv.as_ref()),
        Command::Import { config, csv } => run_import(&config, &csv),
        Command::Properties => run_properties(),
    }
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| report(&e))
}

/// Reads a search request; malformed JSON is reported as a bad request.
pub fn load_request(path: &PathBuf) -> Result<SearchRequest, JournalError> {
    let content = fs::read_to_string(path)?;
    serde_json::from_str(&content).map_err(|e| {
        JournalError::Validation(ValidationErrors::new(vec![FieldError::new(
            "request",
            e.to_string(),
        )]))
    })
}

/// Runs `request` and renders the resulting page as JSON.
pub fn search_json(
    search: &TradeSearch,
    store: &dyn TradeStore,
    request: &SearchRequest,
    pretty: bool,
) -> Result<String, JournalError> {
    let page = search.search(store, request)?;
    let rendered = if pretty {
        serde_json::to_string_pretty(&page)
    } else {
        serde_json::to_string(&page)
    };
    rendered.map_err(|e| JournalError::Internal {
        reason: format!("failed to render page: {e}"),
    })
}

fn report(err: &JournalError) -> ExitCode {
    match err {
        JournalError::Validation(errors) => {
            eprintln!("error: invalid search request");
            for field in &errors.errors {
                eprintln!("  {field}");
            }
        }
        other => eprintln!("error: {other}"),
    }
    err.into()
}

fn run_search(
    request_path: &PathBuf,
    config_path: Option<&PathBuf>,
    csv_path: Option<&PathBuf>,
) -> ExitCode {
    let config = match config_path.map(load_config).transpose() {
        Ok(c) => c,
        Err(code) => return code,
    };

    let settings = match &config {
        Some(c) => match SearchSettings::from_config(c) {
            Ok(s) => s,
            Err(e) => return report(&e),
        },
        None => SearchSettings::default(),
    };
    let pretty = config
        .as_ref()
        .map_or(true, |c| c.get_bool("output", "pretty", true));

    let request = match load_request(request_path) {
        Ok(r) => r,
        Err(e) => return report(&e),
    };

    let store: Box<dyn TradeStore> = match (csv_path, &config) {
        (Some(csv), _) => match read_trades(csv) {
            Ok(trades) => {
                tracing::info!(count = trades.len(), path = %csv.display(), "loaded trades");
                Box::new(InMemoryTradeStore::new(trades))
            }
            Err(e) => return report(&e),
        },
        (None, Some(config)) => match open_database(config) {
            Ok(store) => store,
            Err(e) => return report(&e),
        },
        (None, None) => {
            eprintln!("error: either --csv or --config is required for search");
            return ExitCode::from(1);
        }
    };

    let search = TradeSearch::new(settings);
    match search_json(&search, store.as_ref(), &request, pretty) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => report(&e),
    }
}

#[cfg(feature = "sqlite")]
fn open_database(config: &dyn ConfigPort) -> Result<Box<dyn TradeStore>, JournalError> {
    use crate::adapters::sqlite_adapter::SqliteTradeStore;

    let store = SqliteTradeStore::from_config(config)?;
    store.initialize_schema()?;
    Ok(Box::new(store))
}

#[cfg(not(feature = "sqlite"))]
fn open_database(_config: &dyn ConfigPort) -> Result<Box<dyn TradeStore>, JournalError> {
    Err(JournalError::Database {
        reason: "sqlite feature is required to search the database".into(),
    })
}

fn run_import(config_path: &PathBuf, csv_path: &PathBuf) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let trades = match read_trades(csv_path) {
        Ok(t) => t,
        Err(e) => return report(&e),
    };

    #[cfg(feature = "sqlite")]
    {
        use crate::adapters::sqlite_adapter::SqliteTradeStore;

        let result = SqliteTradeStore::from_config(&config).and_then(|store| {
            store.initialize_schema()?;
            store.insert_trades(&trades)
        });
        match result {
            Ok(()) => {
                eprintln!("Imported {} trades from {}", trades.len(), csv_path.display());
                ExitCode::SUCCESS
            }
            Err(e) => report(&e),
        }
    }

    #[cfg(not(feature = "sqlite"))]
    {
        let _ = (&config, &trades);
        eprintln!("error: sqlite feature is required for import");
        ExitCode::from(1)
    }
}

/// One line per property: name, value type, nullability and operators.
pub fn describe_properties() -> Vec<String> {
    Property::descriptors()
        .iter()
        .map(|d| {
            let operators: Vec<&str> = d.operators.iter().map(|op| op.as_str()).collect();
            format!(
                "{:<8} {:<10} {:<9} {}",
                d.name(),
                d.value_type.as_str(),
                if d.nullable { "nullable" } else { "required" },
                operators.join(" ")
            )
        })
        .collect()
}

fn run_properties() -> ExitCode {
    for line in describe_properties() {
        println!("{line}");
    }
    ExitCode::SUCCESS
}
