//! Default Telegram update handling
//!
//! The server itself only acknowledges updates; applications embedding the
//! console mount their own handler.

use beutils_bot::UpdateHandler;
use beutils_bot::teloxide::Bot;
use beutils_bot::teloxide::types::Update;
use tracing::info;

/// Logs every update it receives
pub struct LoggingUpdateHandler;

#[async_trait::async_trait]
impl UpdateHandler for LoggingUpdateHandler {
    async fn handle(&self, _bot: &Bot, update: Update) -> anyhow::Result<()> {
        info!(update_id = update.id, "received telegram update");
        Ok(())
    }
}
