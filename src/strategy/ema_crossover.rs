use super::Strategy;
use crate::indicators::calculate_ema;
use crate::models::{CandleSeries, Signal};

/// Dual-EMA crossover strategy
///
/// Buy while the fast EMA of the closes sits above the slow EMA, Sell
/// while it sits below, Hold on exact equality or insufficient data.
/// The comparison always binds to the periods this instance was
/// configured with, so non-default periods compare the right series.
#[derive(Debug, Clone)]
pub struct EmaCrossoverStrategy {
    fast_period: usize,
    slow_period: usize,
}

impl EmaCrossoverStrategy {
    pub fn new(fast_period: usize, slow_period: usize) -> Self {
        Self {
            fast_period,
            slow_period,
        }
    }

    pub fn fast_period(&self) -> usize {
        self.fast_period
    }

    pub fn slow_period(&self) -> usize {
        self.slow_period
    }
}

impl Default for EmaCrossoverStrategy {
    fn default() -> Self {
        Self::new(20, 200)
    }
}

impl Strategy for EmaCrossoverStrategy {
    fn generate_signal(&self, series: &CandleSeries) -> Signal {
        if series.len() < self.slow_period {
            tracing::debug!(
                candles = series.len(),
                needed = self.slow_period,
                "insufficient data for crossover, holding"
            );
            return Signal::Hold;
        }

        let closes = series.closes();
        let fast = calculate_ema(&closes, self.fast_period);
        let slow = calculate_ema(&closes, self.slow_period);

        match (fast, slow) {
            (Some(fast), Some(slow)) if fast > slow => Signal::Buy,
            (Some(fast), Some(slow)) if fast < slow => Signal::Sell,
            _ => Signal::Hold,
        }
    }

    fn name(&self) -> &str {
        "EmaCrossoverStrategy"
    }

    fn min_candles_required(&self) -> usize {
        self.slow_period
    }
}
