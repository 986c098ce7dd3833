use std::sync::Arc;

use tokio::sync::watch;

use trendbot::api::{BinanceClient, RetryPolicy};
use trendbot::config::Config;
use trendbot::execution::{OrderExecutor, PaperLedger};
use trendbot::market_data::MarketDataFetcher;
use trendbot::scheduler::{CycleSettings, Scheduler};
use trendbot::strategy::EmaCrossoverStrategy;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    setup_logging();

    // Missing credentials abort here with a non-zero exit; every later
    // failure is recovered inside the scheduler loop.
    let config = Config::from_env()?;

    tracing::info!(
        symbol = %config.symbol,
        interval = %config.interval,
        fast_ema = config.fast_ema_period,
        slow_ema = config.slow_ema_period,
        order_quantity = config.order_quantity,
        cadence_secs = config.sleep_interval.as_secs(),
        testnet = config.testnet,
        "trendbot starting"
    );

    let gateway = Arc::new(BinanceClient::new(
        config.api_key.clone(),
        config.api_secret.clone(),
        config.testnet,
    ));
    let retry = RetryPolicy::default();

    let fetcher = MarketDataFetcher::new(gateway.clone(), retry);
    let executor = OrderExecutor::new(gateway, retry);
    let strategy = EmaCrossoverStrategy::new(config.fast_ema_period, config.slow_ema_period);
    let ledger = PaperLedger::new(config.paper_starting_balance);

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let scheduler = Scheduler::new(
        fetcher,
        Box::new(strategy),
        executor,
        ledger,
        CycleSettings::from_config(&config),
        shutdown_rx,
    );

    let mut scheduler_task = tokio::spawn(scheduler.run());

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("received ctrl-c, stopping after the current cycle");
            let _ = shutdown_tx.send(true);
            match (&mut scheduler_task).await {
                Ok(ledger) => {
                    tracing::info!(
                        cash = ledger.cash(),
                        asset_quantity = ledger.asset_quantity(),
                        paper_trades = ledger.trades().len(),
                        "final paper balances"
                    );
                }
                Err(e) => tracing::error!("scheduler task failed during shutdown: {e}"),
            }
        }
        result = &mut scheduler_task => {
            tracing::error!("scheduler exited unexpectedly: {result:?}");
        }
    }

    tracing::info!("trendbot stopped");
    Ok(())
}

fn setup_logging() {
    tracing_subscriber::fmt()
        .with_env_filter("trendbot=info,trendbot::scheduler=debug")
        .init();
}
