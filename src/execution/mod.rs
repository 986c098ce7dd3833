// Order execution and paper bookkeeping
pub mod order_executor;
pub mod paper_ledger;

pub use order_executor::{OrderExecutor, OrderOutcome};
pub use paper_ledger::PaperLedger;
