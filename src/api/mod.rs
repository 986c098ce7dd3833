// Exchange connectivity
pub mod binance;
pub mod retry;

use async_trait::async_trait;

use crate::error::ExchangeError;
use crate::models::{OrderConfirmation, OrderSide};

pub use binance::BinanceClient;
pub use retry::RetryPolicy;

/// One raw kline row as the exchange returns it: a heterogeneous JSON
/// array of at least six fields (open time, O, H, L, C, V, ...).
pub type RawKline = Vec<serde_json::Value>;

/// Narrow seam to the exchange. The live implementation is
/// [`BinanceClient`]; tests substitute scripted gateways.
#[async_trait]
pub trait ExchangeGateway: Send + Sync {
    /// Fetch historical candle rows for a symbol. May legitimately
    /// return zero rows.
    async fn get_historical_candles(
        &self,
        symbol: &str,
        interval: &str,
        lookback_days: u32,
    ) -> Result<Vec<RawKline>, ExchangeError>;

    /// Submit a market order for immediate execution.
    async fn create_market_order(
        &self,
        symbol: &str,
        side: OrderSide,
        quantity: f64,
    ) -> Result<OrderConfirmation, ExchangeError>;
}
