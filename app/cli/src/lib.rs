//! FILENAME: app/cli/src/lib.rs
// PURPOSE: Front-end wiring: settings, logging, store, then one command.

pub mod cli;
pub mod commands;
pub mod config;
pub mod logging;
pub mod session;

use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;
use persistence::JsonFileStore;
use pivot_engine::PivotDefinition;

pub use cli::{Cli, Command};
pub use commands::{render, Workspace};
pub use config::AppConfig;
pub use session::{Session, SessionState};

/// Applies command line flags on top of file settings.
pub fn apply_overrides(mut config: AppConfig, cli: &Cli) -> AppConfig {
    if let Some(n) = cli.sample_rows {
        config.sample_rows = n;
    }
    if let Some(n) = cli.history_limit {
        config.history_limit = n;
    }
    if let Some(path) = &cli.store {
        config.store_path = Some(path.clone());
    }
    if let Some(path) = &cli.log_file {
        config.log_file = Some(path.clone());
    }
    match (&cli.log_level, cli.verbose) {
        (Some(level), _) => config.log_level = level.clone(),
        (None, 0) => {}
        (None, 1) => config.log_level = LevelFilter::Debug.to_string(),
        (None, _) => config.log_level = LevelFilter::Trace.to_string(),
    }
    config
}

/// Runs a one-shot command and returns its JSON output.
pub fn execute(command: &Command, workspace: &mut Workspace) -> Result<String> {
    match command {
        Command::Inspect { file } => render(&workspace.inspect(file)?),
        Command::Stats { file, column } => render(&workspace.stats(file, column)?),
        Command::Group {
            file,
            by,
            value,
            function,
        } => render(&workspace.group(file, by, value, *function)?),
        Command::Pivot {
            file,
            row,
            column,
            value,
            function,
        } => {
            let definition = PivotDefinition::new(row, column, value, *function);
            render(&workspace.pivot(file, &definition)?)
        }
        Command::Export { file, output } => render(&workspace.export(file, output)?),
        Command::Recent { clear } => {
            if *clear {
                workspace.clear_recent()?;
            }
            render(&workspace.recent()?)
        }
        Command::Shell => {
            let mut session = Session::new(workspace);
            session.run(io::stdin().lock(), io::stdout().lock())?;
            Ok(String::new())
        }
    }
}

fn try_run(cli: Cli) -> Result<()> {
    let config = apply_overrides(AppConfig::load(cli.config.as_deref())?, &cli);
    logging::init(config.level_filter(), config.log_file.as_deref());
    log::debug!(target: "SYS", "config {:?}", config);

    let store_path = config.store_path();
    let store = JsonFileStore::open(&store_path)
        .with_context(|| format!("opening store {}", store_path.display()))?;
    let mut workspace = Workspace::new(config, Box::new(store));

    let output = execute(&cli.command, &mut workspace)?;
    if !output.is_empty() {
        println!("{}", output);
    }
    Ok(())
}

/// Process entry point. Returns the exit code.
pub fn run() -> i32 {
    let cli = Cli::parse();
    match try_run(cli) {
        Ok(()) => 0,
        Err(error) => {
            log::error!(target: "SYS", "{:#}", error);
            eprintln!("error: {:#}", error);
            1
        }
    }
}
