use std::sync::Arc;

use crate::api::{ExchangeGateway, RetryPolicy};
use crate::error::ExchangeError;
use crate::models::{OrderConfirmation, OrderSide};

/// Result of a live order submission. Failure is a value, never an
/// error: the scheduler logs it and moves on.
#[derive(Debug)]
pub enum OrderOutcome {
    Filled(OrderConfirmation),
    Failed { attempts: u32, error: ExchangeError },
}

impl OrderOutcome {
    pub fn is_filled(&self) -> bool {
        matches!(self, OrderOutcome::Filled(_))
    }
}

/// Wraps live order submission with the shared retry policy. The retry
/// loop returns on the first successful attempt, so at most one order
/// reaches the exchange per call.
pub struct OrderExecutor<G> {
    gateway: Arc<G>,
    retry: RetryPolicy,
}

impl<G: ExchangeGateway> OrderExecutor<G> {
    pub fn new(gateway: Arc<G>, retry: RetryPolicy) -> Self {
        Self { gateway, retry }
    }

    pub async fn submit(&self, side: OrderSide, symbol: &str, quantity: f64) -> OrderOutcome {
        let result = self
            .retry
            .run("order submission", || {
                self.gateway.create_market_order(symbol, side, quantity)
            })
            .await;

        match result {
            Ok(confirmation) => OrderOutcome::Filled(confirmation),
            Err(error) => OrderOutcome::Failed {
                attempts: self.retry.max_attempts,
                error,
            },
        }
    }
}
