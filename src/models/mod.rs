use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// One OHLCV candlestick
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Candle {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

/// Ordered candle sequence, strictly increasing by timestamp
#[derive(Debug, Clone, PartialEq)]
pub struct CandleSeries {
    candles: Vec<Candle>,
}

impl CandleSeries {
    /// Build a series from candles. Returns None if any timestamp is not
    /// strictly greater than its predecessor.
    pub fn from_candles(candles: Vec<Candle>) -> Option<Self> {
        let ordered = candles
            .windows(2)
            .all(|pair| pair[0].timestamp < pair[1].timestamp);
        if ordered {
            Some(Self { candles })
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    pub fn last(&self) -> Option<&Candle> {
        self.candles.last()
    }

    pub fn candles(&self) -> &[Candle] {
        &self.candles
    }

    /// Close prices in timestamp order
    pub fn closes(&self) -> Vec<f64> {
        self.candles.iter().map(|c| c.close).collect()
    }
}

/// Trading signal
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Signal {
    Buy,
    Sell,
    Hold,
}

/// Side of a market order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum OrderSide {
    Buy,
    Sell,
}

impl OrderSide {
    /// Wire name the exchange expects
    pub fn as_wire(&self) -> &'static str {
        match self {
            OrderSide::Buy => "BUY",
            OrderSide::Sell => "SELL",
        }
    }
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}

/// Confirmation returned by the exchange for an accepted market order
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderConfirmation {
    pub order_id: i64,
    pub symbol: String,
    pub side: OrderSide,
    pub executed_qty: f64,
    pub status: String,
}

/// One simulated trade recorded by the paper ledger
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trade {
    pub id: Uuid,
    pub symbol: String,
    pub side: OrderSide,
    pub price: f64,
    pub quantity: f64,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn candle_at(secs: i64, close: f64) -> Candle {
        Candle {
            timestamp: Utc.timestamp_opt(secs, 0).unwrap(),
            open: close,
            high: close,
            low: close,
            close,
            volume: 1000.0,
        }
    }

    #[test]
    fn test_series_accepts_increasing_timestamps() {
        let series =
            CandleSeries::from_candles(vec![candle_at(0, 100.0), candle_at(60, 101.0)]).unwrap();

        assert_eq!(series.len(), 2);
        assert_eq!(series.closes(), vec![100.0, 101.0]);
        assert_eq!(series.last().unwrap().close, 101.0);
    }

    #[test]
    fn test_series_rejects_out_of_order_timestamps() {
        let result = CandleSeries::from_candles(vec![candle_at(60, 100.0), candle_at(0, 101.0)]);
        assert!(result.is_none());
    }

    #[test]
    fn test_series_rejects_duplicate_timestamps() {
        let result = CandleSeries::from_candles(vec![candle_at(60, 100.0), candle_at(60, 101.0)]);
        assert!(result.is_none());
    }

    #[test]
    fn test_empty_series_is_valid() {
        let series = CandleSeries::from_candles(vec![]).unwrap();
        assert!(series.is_empty());
        assert!(series.last().is_none());
    }

    #[test]
    fn test_order_side_wire_names() {
        assert_eq!(OrderSide::Buy.as_wire(), "BUY");
        assert_eq!(OrderSide::Sell.as_wire(), "SELL");
        assert_eq!(format!("{}", OrderSide::Sell), "SELL");
    }
}
