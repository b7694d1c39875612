//! Developer command line: parse queries, ask them against a JSON ledger
//! file, or run an interactive shell.

pub mod output;
pub mod render;
mod shell;

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use chrono::NaiveDateTime;
use thiserror::Error;

use crate::config::{ConfigManager, QueryConfig};
use crate::core::{
    time::{Clock, FixedClock, SystemClock},
    BillQueryService, QueryParser,
};
use crate::domain::UserId;
use crate::errors::{ConfigError, LedgerError, QueryError};
use crate::utils::persistence;

pub use shell::run_shell;

/// Pins the CLI clock, e.g. `2024-05-20T12:00:00`.
pub const NOW_ENV: &str = "BILL_QUERY_NOW";

/// User-facing CLI error wrapper.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error(transparent)]
    Ledger(#[from] LedgerError),
    #[error(transparent)]
    Query(#[from] QueryError),
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("Readline error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Parse {
        text: String,
    },
    Ask {
        ledger: PathBuf,
        user_id: UserId,
        text: String,
    },
    Shell {
        ledger: PathBuf,
        user_id: UserId,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub command: Command,
    pub config: Option<PathBuf>,
    pub format: OutputFormat,
    /// Disables ANSI styling of messages.
    pub plain: bool,
}

pub const USAGE: &str = "Usage: bill_query_cli <command> [--config <file>] [--json] [--plain]\n\
     Commands:\n  \
     parse <text...>\n  \
     ask <ledger.json> <user_id> <text...>\n  \
     shell <ledger.json> <user_id>";

fn usage(reason: impl Into<String>) -> CliError {
    CliError::Usage(format!("{}\n{USAGE}", reason.into()))
}

/// Parses the arguments after the program name.
pub fn parse_args<I>(args: I) -> Result<Invocation, CliError>
where
    I: IntoIterator<Item = String>,
{
    let mut positional = Vec::new();
    let mut config = None;
    let mut format = OutputFormat::Pretty;
    let mut plain = false;

    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--json" => format = OutputFormat::Json,
            "--plain" => plain = true,
            "--config" => {
                let path = args
                    .next()
                    .ok_or_else(|| usage("--config needs a path"))?;
                config = Some(PathBuf::from(path));
            }
            _ => positional.push(arg),
        }
    }

    let mut positional = positional.into_iter();
    let name = positional.next().ok_or_else(|| usage("missing command"))?;
    let command = match name.as_str() {
        "parse" => Command::Parse {
            text: join_text(positional)?,
        },
        "ask" => {
            let ledger = positional
                .next()
                .map(PathBuf::from)
                .ok_or_else(|| usage("ask needs a ledger file"))?;
            let user_id = parse_user_id(positional.next())?;
            Command::Ask {
                ledger,
                user_id,
                text: join_text(positional)?,
            }
        }
        "shell" => {
            let ledger = positional
                .next()
                .map(PathBuf::from)
                .ok_or_else(|| usage("shell needs a ledger file"))?;
            let user_id = parse_user_id(positional.next())?;
            Command::Shell { ledger, user_id }
        }
        other => return Err(usage(format!("unknown command `{other}`"))),
    };

    Ok(Invocation {
        command,
        config,
        format,
        plain,
    })
}

fn join_text(words: impl Iterator<Item = String>) -> Result<String, CliError> {
    let text = words.collect::<Vec<_>>().join(" ");
    if text.trim().is_empty() {
        return Err(usage("missing query text"));
    }
    Ok(text)
}

fn parse_user_id(raw: Option<String>) -> Result<UserId, CliError> {
    let raw = raw.ok_or_else(|| usage("missing user id"))?;
    raw.parse()
        .map_err(|_| usage(format!("invalid user id `{raw}`")))
}

fn load_config(path: Option<&Path>) -> Result<QueryConfig, CliError> {
    let manager = match path {
        Some(path) => ConfigManager::new(path.to_path_buf()),
        None => ConfigManager::new_default()?,
    };
    Ok(manager.load()?)
}

fn cli_clock() -> Result<Arc<dyn Clock>, CliError> {
    match std::env::var(NOW_ENV) {
        Ok(raw) => {
            let now = NaiveDateTime::parse_from_str(&raw, "%Y-%m-%dT%H:%M:%S")
                .map_err(|err| usage(format!("invalid {NOW_ENV} `{raw}`: {err}")))?;
            Ok(Arc::new(FixedClock(now)))
        }
        Err(_) => Ok(Arc::new(SystemClock)),
    }
}

fn build_service(
    ledger_path: &Path,
    config: QueryConfig,
    clock: Arc<dyn Clock>,
) -> Result<BillQueryService, CliError> {
    let ledger = persistence::load_ledger_from_file(ledger_path)?;
    tracing::info!(path = %ledger_path.display(), records = ledger.len(), "ledger loaded");
    Ok(BillQueryService::new(config, Arc::new(ledger), clock))
}

pub fn run(invocation: Invocation) -> Result<(), CliError> {
    output::set_preferences(output::OutputPreferences {
        plain: invocation.plain,
    });
    let config = load_config(invocation.config.as_deref())?;
    let clock = cli_clock()?;

    match invocation.command {
        Command::Parse { text } => {
            let parser = QueryParser::new(&config, clock);
            let parsed = parser.parse_query(&text);
            println!("{}", serde_json::to_string_pretty(&parsed)?);
        }
        Command::Ask {
            ledger,
            user_id,
            text,
        } => {
            let service = build_service(&ledger, config, clock)?;
            let (_, result) = service.ask(&text, user_id)?;
            match invocation.format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
                OutputFormat::Pretty => render::print_result(&result),
            }
        }
        Command::Shell { ledger, user_id } => {
            let service = build_service(&ledger, config, clock)?;
            run_shell(&service, user_id, invocation.format)?;
        }
    }

    Ok(())
}
