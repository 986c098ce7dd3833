// Trading strategy module
pub mod ema_crossover;

pub use ema_crossover::EmaCrossoverStrategy;

use crate::models::{CandleSeries, Signal};

/// Base trait for trading strategies
pub trait Strategy: Send + Sync {
    /// Compute a trading signal for the series. Total: strategies fail
    /// closed and return `Signal::Hold` when the data is insufficient.
    fn generate_signal(&self, series: &CandleSeries) -> Signal;

    /// Get strategy name
    fn name(&self) -> &str;

    /// Minimum candles required before this strategy can act
    fn min_candles_required(&self) -> usize;
}
