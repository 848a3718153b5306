use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub fyers: FyersConfig,
    pub telegram: TelegramConfig,
    pub strategy: StrategyConfig,
    pub scheduler: SchedulerConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FyersConfig {
    pub api_url: String,
    pub client_id: String,
}

/// Telegram destination. The bot token is a secret and comes from the
/// environment or CLI, never from config files.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TelegramConfig {
    pub api_url: String,
    pub chat_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyConfig {
    /// Index whose spot price is monitored.
    pub index_symbol: String,
    /// Symbol prefix for the derived weekly option contracts.
    pub option_underlying: String,
    /// Contract lot size. Informational only — no orders are placed.
    pub lot_size: u32,
    /// Stop-loss distance below entry, in points.
    pub stop_loss_points: Decimal,
    /// Target distance above entry, in points.
    pub target_points: Decimal,
    /// Strikes are rounded to the nearest multiple of this.
    pub strike_step: u32,
    /// Bar size for the opening-range candles, in minutes.
    pub candle_resolution: String,
    /// Number of opening candles the range is derived from.
    pub opening_candle_count: usize,
    /// Delay between quote polls, in seconds.
    pub poll_interval_secs: u64,
    /// Shorter delay after a failed option-price fetch while a position is
    /// being tracked, in seconds.
    pub retry_interval_secs: u64,
    /// Delay between session-readiness checks before the cycle starts.
    pub session_poll_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    pub enabled: bool,
    /// Six-field cron expression for the daily trigger, local time.
    pub cron_schedule: String,
}

impl Default for FyersConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.fyers.in/data-rest/v2".to_string(),
            client_id: String::new(),
        }
    }
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.telegram.org".to_string(),
            chat_id: String::new(),
        }
    }
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            index_symbol: "NSE:NIFTY50-INDEX".to_string(),
            option_underlying: "NSE:NIFTY".to_string(),
            lot_size: 50,
            stop_loss_points: Decimal::from(25),
            target_points: Decimal::from(50),
            strike_step: 50,
            candle_resolution: "5".to_string(),
            opening_candle_count: 3,
            poll_interval_secs: 30,
            retry_interval_secs: 10,
            session_poll_secs: 2,
        }
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            cron_schedule: "0 0 9 * * Mon,Tue,Wed,Thu,Fri".to_string(),
        }
    }
}
