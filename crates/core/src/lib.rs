pub mod config;
pub mod config_loader;
pub mod error;
pub mod position;
pub mod traits;
pub mod types;

pub use config::{AppConfig, FyersConfig, SchedulerConfig, StrategyConfig, TelegramConfig};
pub use config_loader::ConfigLoader;
pub use error::QuoteError;
pub use position::{Position, PositionStatus};
pub use traits::{Notifier, QuoteProvider, SessionGate};
pub use types::{Candle, OpeningRange, OptionType, Quote};
