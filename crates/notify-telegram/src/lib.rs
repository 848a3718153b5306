//! Telegram alert delivery for the breakout alerting system.

pub mod notifier;

pub use notifier::{TelegramError, TelegramNotifier, TELEGRAM_API_URL};
