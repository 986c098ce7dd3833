use std::time::Duration;

use tokio::sync::watch;
use tokio::time::{sleep, Instant};

use crate::api::ExchangeGateway;
use crate::config::Config;
use crate::execution::{OrderExecutor, OrderOutcome, PaperLedger};
use crate::market_data::{FetchOutcome, MarketDataFetcher};
use crate::models::{OrderSide, Signal};
use crate::strategy::Strategy;

/// Per-cycle parameters the scheduler threads through its components.
#[derive(Debug, Clone)]
pub struct CycleSettings {
    pub symbol: String,
    pub interval: String,
    pub lookback_days: u32,
    pub order_quantity: f64,
    pub sleep_interval: Duration,
}

impl CycleSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            symbol: config.symbol.clone(),
            interval: config.interval.clone(),
            lookback_days: config.lookback_days,
            order_quantity: config.order_quantity,
            sleep_interval: config.sleep_interval,
        }
    }
}

/// Top-level control loop: fetch → signal → (live order, paper mirror)
/// → profit log → paced sleep, indefinitely.
///
/// One cycle runs to completion before the next begins. Every failure
/// below startup is converted into a log entry plus a control decision;
/// nothing terminates the loop except the shutdown signal.
pub struct Scheduler<G: ExchangeGateway> {
    fetcher: MarketDataFetcher<G>,
    strategy: Box<dyn Strategy>,
    executor: OrderExecutor<G>,
    ledger: PaperLedger,
    settings: CycleSettings,
    shutdown: watch::Receiver<bool>,
}

impl<G: ExchangeGateway> Scheduler<G> {
    pub fn new(
        fetcher: MarketDataFetcher<G>,
        strategy: Box<dyn Strategy>,
        executor: OrderExecutor<G>,
        ledger: PaperLedger,
        settings: CycleSettings,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        Self {
            fetcher,
            strategy,
            executor,
            ledger,
            settings,
            shutdown,
        }
    }

    /// Run until the shutdown signal flips. Returns the final ledger so
    /// the caller can report closing balances.
    pub async fn run(mut self) -> PaperLedger {
        tracing::info!(
            symbol = %self.settings.symbol,
            strategy = self.strategy.name(),
            interval = %self.settings.interval,
            cadence_secs = self.settings.sleep_interval.as_secs(),
            "scheduler starting"
        );

        loop {
            if *self.shutdown.borrow() {
                break;
            }

            let cycle_start = Instant::now();
            self.run_cycle().await;

            let elapsed = cycle_start.elapsed();
            if elapsed < self.settings.sleep_interval {
                let remaining = self.settings.sleep_interval - elapsed;
                tokio::select! {
                    _ = sleep(remaining) => {}
                    _ = self.shutdown.changed() => {}
                }
            } else {
                // Overrun: start the next cycle immediately. Cadence
                // drifts rather than running catch-up cycles.
                tracing::warn!(
                    elapsed_secs = elapsed.as_secs_f64(),
                    budget_secs = self.settings.sleep_interval.as_secs_f64(),
                    "cycle overran its budget"
                );
            }
        }

        tracing::info!(
            cash = self.ledger.cash(),
            asset_quantity = self.ledger.asset_quantity(),
            paper_trades = self.ledger.trades().len(),
            "scheduler stopped"
        );
        self.ledger
    }

    async fn run_cycle(&mut self) {
        let series = match self
            .fetcher
            .fetch(
                &self.settings.symbol,
                &self.settings.interval,
                self.settings.lookback_days,
            )
            .await
        {
            Ok(FetchOutcome::Series(series)) => series,
            Ok(FetchOutcome::Empty) => {
                tracing::warn!(
                    symbol = %self.settings.symbol,
                    "no candle data this cycle, skipping trading decision"
                );
                return;
            }
            Err(e) => {
                tracing::error!(error = %e, "candle fetch failed, skipping cycle");
                return;
            }
        };

        let current_close = match series.last() {
            Some(candle) => candle.close,
            None => return,
        };

        let signal = self.strategy.generate_signal(&series);
        tracing::info!(
            signal = ?signal,
            close = current_close,
            candles = series.len(),
            "signal computed"
        );

        match signal {
            Signal::Buy => self.execute_side(OrderSide::Buy, current_close).await,
            Signal::Sell => self.execute_side(OrderSide::Sell, current_close).await,
            Signal::Hold => {}
        }

        tracing::info!(
            unrealized_profit = self.ledger.unrealized_profit(current_close),
            cash = self.ledger.cash(),
            asset_quantity = self.ledger.asset_quantity(),
            "cycle complete"
        );
    }

    /// Submit the live order, then mirror the decision into the paper
    /// ledger at the last close. The two outcomes are independent: a
    /// live failure never blocks the paper mirror, and vice versa.
    async fn execute_side(&mut self, side: OrderSide, price: f64) {
        if *self.shutdown.borrow() {
            return;
        }

        match self
            .executor
            .submit(side, &self.settings.symbol, self.settings.order_quantity)
            .await
        {
            OrderOutcome::Filled(confirmation) => {
                tracing::info!(
                    order_id = confirmation.order_id,
                    side = %side,
                    executed_qty = confirmation.executed_qty,
                    status = %confirmation.status,
                    "live order placed"
                );
            }
            OrderOutcome::Failed { attempts, error } => {
                tracing::error!(
                    attempts,
                    side = %side,
                    error = %error,
                    "live order failed, continuing"
                );
            }
        }

        if let Err(e) = self.ledger.apply(
            side,
            &self.settings.symbol,
            self.settings.order_quantity,
            price,
        ) {
            tracing::warn!(side = %side, error = %e, "paper trade rejected");
        }
    }
}
