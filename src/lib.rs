pub mod api;
pub mod commands;
pub mod config;
pub mod coordinator;
pub mod fallback;
pub mod log;
pub mod models;
pub mod sections;
pub mod ui;

use std::sync::Arc;

use anyhow::Result;
use tracing::debug;

use crate::api::ApiClient;

pub enum AppCommand {
    Summary,
    Watch { duration: Option<u64> },
    Factors { refresh: bool },
    Institutions { refresh: bool },
    Advice { refresh: bool },
    Brief { refresh: bool },
    News { limit: u32 },
    Predictions,
    Health,
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    let config = match config_path {
        Some(path) => config::AppConfig::load_from_path(path)?,
        None => config::AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let base_url = config.resolve_base_url();
    let client = ApiClient::new(&base_url)?;

    match command {
        AppCommand::Summary => commands::summary(&client).await,
        AppCommand::Watch { duration } => commands::watch(Arc::new(client), duration).await,
        AppCommand::Factors { refresh } => commands::factors(&client, refresh).await,
        AppCommand::Institutions { refresh } => commands::institutions(&client, refresh).await,
        AppCommand::Advice { refresh } => commands::advice(&client, refresh).await,
        AppCommand::Brief { refresh } => commands::brief(&client, refresh).await,
        AppCommand::News { limit } => commands::news(&client, limit).await,
        AppCommand::Predictions => commands::predictions(&client).await,
        AppCommand::Health => commands::health(&client).await,
    }
}
