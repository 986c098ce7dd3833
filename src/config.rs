use std::str::FromStr;
use std::time::Duration;

use crate::error::ConfigError;

/// Runtime configuration, read once at startup from the environment.
/// Only the API credentials are required; everything else has a default.
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub api_secret: String,
    pub symbol: String,
    pub interval: String,
    pub fast_ema_period: usize,
    pub slow_ema_period: usize,
    pub order_quantity: f64,
    pub sleep_interval: Duration,
    pub lookback_days: u32,
    pub paper_starting_balance: f64,
    pub testnet: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            api_key: require("BINANCE_API_KEY")?,
            api_secret: require("BINANCE_API_SECRET")?,
            symbol: var_or("TRADING_SYMBOL", "BTCUSDT"),
            interval: var_or("CANDLE_INTERVAL", "5m"),
            fast_ema_period: parse_var("FAST_EMA_PERIOD", 20)?,
            slow_ema_period: parse_var("SLOW_EMA_PERIOD", 200)?,
            order_quantity: parse_var("ORDER_QUANTITY", 0.001)?,
            sleep_interval: Duration::from_secs(parse_var("SLEEP_INTERVAL_SECS", 60u64)?),
            lookback_days: parse_var("LOOKBACK_DAYS", 7)?,
            paper_starting_balance: parse_var("PAPER_STARTING_BALANCE", 1000.0)?,
            testnet: flag("BINANCE_TESTNET"),
        })
    }
}

fn require(name: &'static str) -> Result<String, ConfigError> {
    std::env::var(name).map_err(|_| ConfigError::MissingVar(name))
}

fn var_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

fn parse_var<T: FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match std::env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| ConfigError::InvalidVar { name, value: raw }),
        Err(_) => Ok(default),
    }
}

fn flag(name: &str) -> bool {
    std::env::var(name)
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}
