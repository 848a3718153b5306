use std::sync::Arc;

use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use orb_trade_core::{AppConfig, ConfigLoader, OptionType};
use orb_trade_fyers::{FyersClient, FyersClientConfig, Session};
use orb_trade_runner::{DailyCycle, DailyScheduler};
use orb_trade_strategy::{nearest_strike, opening_range, ContractSymbol};
use orb_trade_telegram::TelegramNotifier;

#[derive(Parser)]
#[command(name = "orb-trade")]
#[command(about = "Opening-range breakout alerts for NIFTY weekly options", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the daily scheduler (daemon mode)
    Run {
        /// Config file path
        #[arg(short, long, default_value = "config/Config.toml")]
        config: String,
        /// Fyers access token (obtained externally)
        #[arg(long, env = "FYERS_ACCESS_TOKEN", hide_env_values = true)]
        access_token: Option<String>,
        /// Telegram bot token
        #[arg(long, env = "TELEGRAM_BOT_TOKEN", hide_env_values = true)]
        bot_token: String,
    },
    /// Run a single daily cycle immediately
    RunOnce {
        /// Config file path
        #[arg(short, long, default_value = "config/Config.toml")]
        config: String,
        /// Fyers access token (obtained externally)
        #[arg(long, env = "FYERS_ACCESS_TOKEN", hide_env_values = true)]
        access_token: Option<String>,
        /// Telegram bot token
        #[arg(long, env = "TELEGRAM_BOT_TOKEN", hide_env_values = true)]
        bot_token: String,
    },
    /// Fetch and print today's opening range
    Range {
        /// Config file path
        #[arg(short, long, default_value = "config/Config.toml")]
        config: String,
        /// Fyers access token (obtained externally)
        #[arg(long, env = "FYERS_ACCESS_TOKEN", hide_env_values = true)]
        access_token: String,
    },
    /// Resolve a weekly option contract symbol (offline)
    ResolveSymbol {
        /// Spot price to derive the strike from
        #[arg(long)]
        spot: f64,
        /// Option side: call or put
        #[arg(long)]
        side: String,
        /// Reference date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,
        /// Config file path
        #[arg(short, long, default_value = "config/Config.toml")]
        config: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            config,
            access_token,
            bot_token,
        } => {
            let config = ConfigLoader::load_from(&config)?;
            let scheduler = build_scheduler(&config, access_token, &bot_token)?;
            let shutdown = scheduler.shutdown_handle();

            tokio::select! {
                result = scheduler.start() => result,
                _ = tokio::signal::ctrl_c() => {
                    tracing::info!("Interrupt received, shutting down");
                    let _ = shutdown.send(true);
                    Ok(())
                }
            }
        }
        Commands::RunOnce {
            config,
            access_token,
            bot_token,
        } => {
            let config = ConfigLoader::load_from(&config)?;
            let scheduler = build_scheduler(&config, access_token, &bot_token)?;
            let outcome = scheduler.run_once().await;
            println!("{outcome:?}");
            Ok(())
        }
        Commands::Range {
            config,
            access_token,
        } => {
            let config = ConfigLoader::load_from(&config)?;
            let client = build_client(&config, Some(access_token))?;
            let day = Local::now().date_naive();
            let range = opening_range(
                &client,
                &config.strategy.index_symbol,
                &config.strategy.candle_resolution,
                config.strategy.opening_candle_count,
                day,
            )
            .await?;
            println!(
                "{} opening range for {}: high {} / low {}",
                config.strategy.index_symbol, day, range.high, range.low
            );
            Ok(())
        }
        Commands::ResolveSymbol {
            spot,
            side,
            date,
            config,
        } => {
            let config = ConfigLoader::load_from(&config)?;
            let option_type = match side.to_ascii_lowercase().as_str() {
                "call" | "ce" => OptionType::Call,
                "put" | "pe" => OptionType::Put,
                other => anyhow::bail!("unknown option side: {other} (expected call or put)"),
            };
            let day = match date {
                Some(date) => NaiveDate::parse_from_str(&date, "%Y-%m-%d")?,
                None => Local::now().date_naive(),
            };
            let spot = rust_decimal::Decimal::try_from(spot)?;
            let strike = nearest_strike(spot, config.strategy.strike_step)
                .ok_or_else(|| anyhow::anyhow!("spot price {spot} produced no usable strike"))?;
            let symbol =
                ContractSymbol::weekly(config.strategy.option_underlying, day, strike, option_type);
            println!("{symbol}");
            Ok(())
        }
    }
}

fn build_client(config: &AppConfig, access_token: Option<String>) -> Result<FyersClient> {
    let session = match access_token {
        Some(token) => Session::with_token(token),
        None => Session::new(),
    };
    let client_config = FyersClientConfig::default()
        .with_base_url(config.fyers.api_url.clone())
        .with_client_id(config.fyers.client_id.clone());
    Ok(FyersClient::new(client_config, Arc::new(session))?)
}

fn build_scheduler(
    config: &AppConfig,
    access_token: Option<String>,
    bot_token: &str,
) -> Result<DailyScheduler> {
    let client = Arc::new(build_client(config, access_token)?);
    let notifier = Arc::new(
        TelegramNotifier::new(bot_token, config.telegram.chat_id.clone())?
            .with_api_url(config.telegram.api_url.clone()),
    );

    let cycle = DailyCycle::new(
        client.clone(),
        client,
        notifier,
        config.strategy.clone(),
    );

    Ok(DailyScheduler::new(config.scheduler.clone(), cycle))
}
