//! Telegram webhook adapter for beutils

pub mod telegram;

// Re-export teloxide for handler implementations
pub use teloxide;

pub use telegram::{TelegramBot, UpdateHandler};
