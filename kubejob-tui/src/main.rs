//! KubeJob Fabric terminal dashboard.

mod app;
mod config;
mod dashboard;
mod message;
mod paths;
mod runtime;
mod session;
mod settings;
mod views;

use std::fs;
use std::fs::File;
use std::process::ExitCode;

use log::error;
use log::info;
use log::warn;
use simplelog::Config;
use simplelog::LevelFilter;
use simplelog::WriteLogger;
use tokio::sync::mpsc;

use crate::app::App;
use crate::config::DashboardConfig;
use crate::session::SessionStore;
use crate::settings::SettingsProvider;
use crate::settings::SqliteBackend;

fn init_logging() {
    paths::rotate_logs();

    let Some(path) = paths::log_file() else {
        eprintln!("Warning: no cache directory, logging disabled");
        return;
    };
    if let Some(dir) = path.parent() {
        let _ = fs::create_dir_all(dir);
    }
    match File::create(&path) {
        Ok(file) => {
            if let Err(e) = WriteLogger::init(LevelFilter::Debug, Config::default(), file) {
                eprintln!("Warning: failed to initialize logger: {}", e);
            }
        }
        Err(e) => eprintln!("Warning: failed to create {}: {}", path.display(), e),
    }
}

async fn open_settings() -> SettingsProvider {
    let Some(path) = paths::settings_db() else {
        warn!("no data directory; settings will not persist");
        return SettingsProvider::in_memory();
    };
    if let Some(dir) = path.parent() {
        let _ = fs::create_dir_all(dir);
    }
    match SqliteBackend::open(&path).await {
        Ok(backend) => SettingsProvider::new(backend),
        Err(e) => {
            error!("failed to open settings at {}: {}", path.display(), e);
            SettingsProvider::in_memory()
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();
    info!("starting kubejob {}", env!("CARGO_PKG_VERSION"));

    let settings = open_settings().await;
    let config = match DashboardConfig::load(&settings).await {
        Ok(config) => config,
        Err(e) => {
            warn!("failed to load settings, using defaults: {}", e);
            DashboardConfig::default()
        }
    };
    let client = match config.client() {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let (tx, rx) = mpsc::unbounded_channel();
    let mut app = App::new(config, SessionStore::new(settings, client), tx);
    app.restore_session().await;

    if let Err(e) = runtime::run(app, rx).await {
        error!("terminal error: {}", e);
        eprintln!("Error: {}", e);
        return ExitCode::FAILURE;
    }
    info!("bye");
    ExitCode::SUCCESS
}
