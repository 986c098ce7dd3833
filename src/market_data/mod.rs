use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::api::{ExchangeGateway, RawKline, RetryPolicy};
use crate::error::{ExchangeError, FetchError};
use crate::models::{Candle, CandleSeries};

/// Outcome of one candle retrieval.
///
/// `Empty` means the exchange answered with zero rows. That is not a
/// fault and is never retried; the caller skips the cycle's trading
/// decision.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Series(CandleSeries),
    Empty,
}

/// Wraps exchange candle retrieval with the shared retry policy and
/// normalizes raw kline rows into an ordered candle series.
pub struct MarketDataFetcher<G> {
    gateway: Arc<G>,
    retry: RetryPolicy,
}

impl<G: ExchangeGateway> MarketDataFetcher<G> {
    pub fn new(gateway: Arc<G>, retry: RetryPolicy) -> Self {
        Self { gateway, retry }
    }

    /// Fetch and normalize candles. Transport, rejection, and protocol
    /// failures are retried; exhaustion propagates as a `FetchError`.
    pub async fn fetch(
        &self,
        symbol: &str,
        interval: &str,
        lookback_days: u32,
    ) -> Result<FetchOutcome, FetchError> {
        self.retry
            .run("candle fetch", || async move {
                let rows = self
                    .gateway
                    .get_historical_candles(symbol, interval, lookback_days)
                    .await?;

                if rows.is_empty() {
                    tracing::warn!(symbol, "exchange returned no candle data");
                    return Ok(FetchOutcome::Empty);
                }

                let series = normalize(rows)?;
                Ok(FetchOutcome::Series(series))
            })
            .await
            .map_err(|source| FetchError::RetriesExhausted {
                attempts: self.retry.max_attempts,
                source,
            })
    }
}

/// Truncate each row to the six canonical OHLCV fields and build the
/// ordered series. Any malformed or out-of-order row makes the whole
/// response invalid.
fn normalize(rows: Vec<RawKline>) -> Result<CandleSeries, ExchangeError> {
    let mut candles = Vec::with_capacity(rows.len());
    for row in &rows {
        candles.push(parse_kline(row)?);
    }

    CandleSeries::from_candles(candles).ok_or_else(|| {
        ExchangeError::Protocol("kline timestamps are not strictly increasing".into())
    })
}

fn parse_kline(row: &RawKline) -> Result<Candle, ExchangeError> {
    if row.len() < 6 {
        return Err(ExchangeError::Protocol(format!(
            "kline row has {} fields, expected at least 6",
            row.len()
        )));
    }

    let open_time_ms = row[0]
        .as_i64()
        .ok_or_else(|| ExchangeError::Protocol("kline open time is not an integer".into()))?;
    let timestamp = DateTime::<Utc>::from_timestamp_millis(open_time_ms).ok_or_else(|| {
        ExchangeError::Protocol(format!("kline open time out of range: {open_time_ms}"))
    })?;

    Ok(Candle {
        timestamp,
        open: field_f64(&row[1], "open")?,
        high: field_f64(&row[2], "high")?,
        low: field_f64(&row[3], "low")?,
        close: field_f64(&row[4], "close")?,
        volume: field_f64(&row[5], "volume")?,
    })
}

// Binance sends prices as decimal strings; accept plain numbers too.
fn field_f64(value: &Value, name: &str) -> Result<f64, ExchangeError> {
    match value {
        Value::String(s) => s
            .parse()
            .map_err(|_| ExchangeError::Protocol(format!("kline {name} is not numeric: {s:?}"))),
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| ExchangeError::Protocol(format!("kline {name} is not a valid f64"))),
        other => Err(ExchangeError::Protocol(format!(
            "kline {name} has unexpected type: {other}"
        ))),
    }
}
