//! Telegram webhook adapter
//!
//! Inbound webhook payloads are decoded into `Update` objects and routed
//! either to an unbounded queue drained by a worker task, or straight to the
//! handler. Handler errors are logged, never propagated to the webhook
//! response.

use std::sync::Arc;

use serde_json::Value;
use teloxide::Bot;
use teloxide::types::Update;
use tokio::sync::mpsc;
use tracing::error;

/// Application-side processing of Telegram updates
#[async_trait::async_trait]
pub trait UpdateHandler: Send + Sync + 'static {
    async fn handle(&self, bot: &Bot, update: Update) -> anyhow::Result<()>;
}

/// A Telegram bot fed by webhook payloads
pub struct TelegramBot {
    bot: Bot,
    handler: Arc<dyn UpdateHandler>,
    queue: Option<mpsc::UnboundedSender<Update>>,
}

impl TelegramBot {
    /// Build a bot for an API token.
    ///
    /// With `queued` enabled, updates are put on an unbounded queue and a
    /// worker task drains them; otherwise updates are handled inline in the
    /// webhook request. Must be called from within a Tokio runtime when
    /// `queued` is enabled.
    pub fn new(api_key: &str, handler: Arc<dyn UpdateHandler>, queued: bool) -> Self {
        let bot = Bot::new(api_key);

        let queue = queued.then(|| {
            let (queue_tx, mut queue_rx) = mpsc::unbounded_channel::<Update>();
            let worker_bot = bot.clone();
            let worker_handler = Arc::clone(&handler);

            tokio::spawn(async move {
                while let Some(update) = queue_rx.recv().await {
                    if let Err(err) = worker_handler.handle(&worker_bot, update).await {
                        error!(error = %err, "telegram update handler failed");
                    }
                }
            });

            queue_tx
        });

        Self {
            bot,
            handler,
            queue,
        }
    }

    pub fn bot(&self) -> &Bot {
        &self.bot
    }

    /// Process data passed in via webhook.
    ///
    /// Decodes the payload into an `Update` and passes it to the queue or
    /// the handler. Only undecodable payloads are errors.
    pub async fn process_webhook(&self, data: Value) -> anyhow::Result<()> {
        let update: Update = serde_json::from_value(data)?;

        match &self.queue {
            Some(queue) => {
                if queue.send(update).is_err() {
                    error!("telegram update worker is gone, dropping update");
                }
            }
            None => {
                if let Err(err) = self.handler.handle(&self.bot, update).await {
                    error!(error = %err, "telegram update handler failed");
                }
            }
        }

        Ok(())
    }
}
