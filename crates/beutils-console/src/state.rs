//! Shared application state for request handlers

use std::sync::Arc;

use beutils_bot::TelegramBot;
use beutils_storage::Storage;
use beutils_tasks::TaskRunner;
use sea_orm::DatabaseConnection;

/// State shared by every handler
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub tasks: TaskRunner,
    pub bot: Option<Arc<TelegramBot>>,
    pub static_storage: Arc<dyn Storage>,
    pub media_storage: Arc<dyn Storage>,
}

impl AppState {
    pub fn new(
        db: DatabaseConnection,
        tasks: TaskRunner,
        bot: Option<Arc<TelegramBot>>,
        static_storage: Arc<dyn Storage>,
        media_storage: Arc<dyn Storage>,
    ) -> Self {
        Self {
            db,
            tasks,
            bot,
            static_storage,
            media_storage,
        }
    }
}
