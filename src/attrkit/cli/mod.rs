//! # CLI Layer
//!
//! One possible client of the attrkit library. This is the only place that:
//! - parses arguments,
//! - installs the tracing subscriber,
//! - writes to stdout/stderr.
//!
//! Everything else goes through [`AttrApi`], which returns `CmdResult` values that
//! the `print_*` functions format.

mod print;

use crate::args::{Cli, Commands};
use attrkit::api::{AttrApi, CmdResult, ConfigAction};
use attrkit::error::{AttrKitError, Result};
use clap::{CommandFactory, Parser};
use directories::ProjectDirs;
use print::{
    print_comparison, print_config, print_json, print_messages, print_sorted, print_types,
    print_values,
};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "ATTRKIT_LOG";
const HOME_ENV: &str = "ATTRKIT_HOME";

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let config_dir = resolve_config_dir(cli.config_dir)?;
    debug!(dir = %config_dir.display(), "using config dir");
    let api = AttrApi::open(config_dir)?;

    match command {
        Commands::Parse { texts } => {
            let result = api.parse(&texts)?;
            output(&result, cli.json, |r| print_values(&r.values))
        }
        Commands::Cast { text, to } => {
            let result = api.cast(&text, &to)?;
            output(&result, cli.json, |r| print_values(&r.values))
        }
        Commands::Compare { left, right } => {
            let result = api.compare(&left, &right)?;
            output(&result, cli.json, |r| {
                if let Some(comparison) = &r.comparison {
                    print_comparison(comparison);
                }
            })
        }
        Commands::Sort { named, items } => {
            let result = api.sort(&items, named)?;
            output(&result, cli.json, |r| print_sorted(&r.values))
        }
        Commands::Types => {
            let result = api.types()?;
            output(&result, cli.json, |r| print_types(&r.types))
        }
        Commands::Config { key, value } => handle_config(&api, key, value, cli.json),
    }
}

fn output(result: &CmdResult, json: bool, print: impl FnOnce(&CmdResult)) -> Result<()> {
    if json {
        return print_json(result);
    }
    print(result);
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(api: &AttrApi, key: Option<String>, value: Option<String>, json: bool) -> Result<()> {
    let action = match (key, value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(key), None) => ConfigAction::ShowKey(key),
        (Some(key), Some(value)) => ConfigAction::Set(key, value),
    };
    let show_all = matches!(action, ConfigAction::ShowAll);

    let result = api.config(action)?;
    output(&result, json, |r| {
        if let (true, Some(config)) = (show_all, &r.config) {
            print_config(config);
        }
    })
}

/// Logs go to stderr. `ATTRKIT_LOG` takes an `EnvFilter` directive and wins when
/// set; otherwise the level is `warn`, or `debug` with `--verbose`.
fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_log_level(verbose)));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn default_log_level(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "warn"
    }
}

fn resolve_config_dir(flag: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = flag {
        return Ok(dir);
    }
    if let Some(home) = std::env::var_os(HOME_ENV) {
        return Ok(PathBuf::from(home));
    }
    ProjectDirs::from("com", "attrkit", "attrkit")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| AttrKitError::Config("Could not determine config dir".to_string()))
}
