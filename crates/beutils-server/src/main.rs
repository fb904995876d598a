//! Main entry point for the beutils server
//!
//! Loads settings, initializes logging, connects and migrates the database,
//! wires the configuration-driven pieces (task policy, storage backends,
//! optional Telegram bot), and starts the HTTP server.

mod bot;
mod settings;
mod startup;

use std::sync::Arc;

use sea_orm_migration::MigratorTrait;
use tracing::info;

use beutils_bot::TelegramBot;
use beutils_console::AppState;
use beutils_migration::Migrator;
use beutils_tasks::TaskRunner;

use crate::bot::LoggingUpdateHandler;
use crate::settings::Settings;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::new();

    let _logging_guard = startup::init_logging(settings.debug(), settings.log_dir().as_deref())?;
    info!(
        project = %settings.project_name(),
        environment = %settings.environment(),
        "starting beutils server"
    );

    // Database and schema
    let db = settings.database_connection().await?;
    Migrator::up(&db, None).await?;

    // Background task policy from the settings flags
    let tasks = TaskRunner::from_flags(settings.task_flags());
    info!(policy = ?tasks.policy(), "background task policy selected");

    // Telegram webhook adapter, when a token is configured
    let telegram_bot = settings.telegram_bot_token().map(|token| {
        let queued = settings.telegram_queued_updates();
        info!(queued, "telegram bot enabled");
        Arc::new(TelegramBot::new(
            &token,
            Arc::new(LoggingUpdateHandler),
            queued,
        ))
    });

    // Storage backends
    let (static_storage, media_storage) = startup::build_storages(&settings).await?;

    let state = AppState::new(db, tasks, telegram_bot, static_storage, media_storage);

    startup::http::run(&settings, state)?.await?;

    Ok(())
}
