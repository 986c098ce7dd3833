use chrono::Utc;
use uuid::Uuid;

use crate::error::LedgerError;
use crate::models::{OrderSide, Trade};

/// In-memory paper-trading ledger mirroring the live strategy.
///
/// Holds a simulated cash balance and asset quantity, both mutated only
/// as a pair when a simulated trade succeeds. State lives for the
/// process lifetime; restarts reset it to the configured starting cash.
#[derive(Debug, Clone)]
pub struct PaperLedger {
    cash: f64,
    asset_quantity: f64,
    trades: Vec<Trade>,
}

impl PaperLedger {
    pub fn new(starting_cash: f64) -> Self {
        Self {
            cash: starting_cash,
            asset_quantity: 0.0,
            trades: Vec::new(),
        }
    }

    /// Apply a simulated market trade at `price`. Rejections leave both
    /// balances untouched.
    pub fn apply(
        &mut self,
        side: OrderSide,
        symbol: &str,
        quantity: f64,
        price: f64,
    ) -> Result<(), LedgerError> {
        match side {
            OrderSide::Buy => {
                let cost = quantity * price;
                if self.cash < cost {
                    return Err(LedgerError::InsufficientFunds {
                        cash: self.cash,
                        required: cost,
                    });
                }
                self.cash -= cost;
                self.asset_quantity += quantity;
            }
            OrderSide::Sell => {
                if self.asset_quantity < quantity {
                    return Err(LedgerError::InsufficientAsset {
                        held: self.asset_quantity,
                        requested: quantity,
                    });
                }
                self.cash += quantity * price;
                self.asset_quantity -= quantity;
            }
        }

        self.trades.push(Trade {
            id: Uuid::new_v4(),
            symbol: symbol.to_string(),
            side,
            price,
            quantity,
            timestamp: Utc::now(),
        });

        tracing::info!(
            side = %side,
            symbol,
            quantity,
            price,
            cash = self.cash,
            asset_quantity = self.asset_quantity,
            "paper trade recorded"
        );

        Ok(())
    }

    /// Unrealized profit at `current_price`, defined as
    /// `asset_quantity * current_price - cash`.
    ///
    /// This is deliberately the ledger's historical definition, not
    /// mark-to-market P&L (cash is subtracted rather than added back).
    /// Readings are comparable with each other, not with the starting
    /// balance.
    pub fn unrealized_profit(&self, current_price: f64) -> f64 {
        self.asset_quantity * current_price - self.cash
    }

    pub fn cash(&self) -> f64 {
        self.cash
    }

    pub fn asset_quantity(&self) -> f64 {
        self.asset_quantity
    }

    pub fn trades(&self) -> &[Trade] {
        &self.trades
    }
}
