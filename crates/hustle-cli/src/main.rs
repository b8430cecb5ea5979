mod cli;
mod commands;
mod panels;
mod ui;

use std::fs;
use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use hustle_core::views;
use hustle_core::AppState;
use hustle_core::Config;
use hustle_core::DocumentStore;
use hustle_core::FileStore;
use hustle_core::LoggingConfig;
use hustle_exec::HostExecutor;

use cli::Cli;
use cli::Command;

const LOG_ENV: &str = "HUSTLE_LOG";

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match cli.config.clone().or_else(default_config_path) {
        Some(path) => Config::load(&path)?,
        None => Config::default(),
    };
    let data_dir = cli
        .data_dir
        .clone()
        .or_else(|| config.storage.data_dir.clone())
        .or_else(default_data_dir)
        .ok_or("could not determine a data directory; pass --data-dir")?;
    let command = cli.command.unwrap_or(Command::Open { route: None });

    init_logging(&config.logging, &data_dir, command.is_interactive())?;
    info!(data_dir = %data_dir.display(), key = %config.storage.key, "starting");

    let store = DocumentStore::with_key(FileStore::open(&data_dir)?, config.storage.key.clone());
    let mut state = AppState::new(store.load(), views::local_today());
    let mut executor = HostExecutor::new(store);
    let export_dir = match &config.ui.export_dir {
        Some(dir) => dir.clone(),
        None => std::env::current_dir()?,
    };

    let output = match command {
        Command::Open { route } => {
            let options = ui::UiOptions {
                start_route: route.unwrap_or(config.ui.start_route),
                toast_delay: Duration::from_millis(config.ui.toast_ms),
                export_dir,
            };
            return ui::run(state, &mut executor, options);
        }
        Command::Render { target, html } => {
            commands::render(&target, &state.document, state.today, html)?
        }
        Command::Export { out } => {
            commands::export(&mut state, &mut executor, out.unwrap_or(export_dir))?
        }
        Command::Import { file } => commands::import(&mut state, &mut executor, file)?,
        Command::Seed => commands::seed(&mut state, &mut executor)?,
        Command::OpenPlan { plan } => commands::open_plan(&mut state, &mut executor, &plan)?,
    };
    println!("{output}");
    Ok(())
}

fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("hustle").join("config.toml"))
}

fn default_data_dir() -> Option<PathBuf> {
    dirs::data_local_dir().map(|dir| dir.join("hustle"))
}

// The terminal UI owns the screen, so it logs to a file.
fn init_logging(
    config: &LoggingConfig,
    data_dir: &Path,
    to_file: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).or_else(|_| EnvFilter::try_new(&config.level))?;

    if to_file {
        fs::create_dir_all(data_dir)?;
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(data_dir.join(&config.file))?;
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .init();
    }
    Ok(())
}
