use thiserror::Error;

/// Startup configuration failure. The only fatal error in the system:
/// the process exits before the scheduler ever runs.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    MissingVar(&'static str),

    #[error("invalid value for {name}: {value:?}")]
    InvalidVar { name: &'static str, value: String },
}

/// A single failed exchange interaction (transport, rejection, or a
/// response we could not make sense of). Retryable.
#[derive(Debug, Error)]
pub enum ExchangeError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("exchange API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("malformed exchange response: {0}")]
    Protocol(String),
}

/// Candle retrieval failed after exhausting the retry policy. Recovered
/// by the scheduler, which skips the cycle's trading decision.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("candle fetch failed after {attempts} attempts: {source}")]
    RetriesExhausted {
        attempts: u32,
        #[source]
        source: ExchangeError,
    },
}

/// Ledger-local rejection of a simulated trade. Balances are untouched.
#[derive(Debug, Error, PartialEq)]
pub enum LedgerError {
    #[error("insufficient cash: have {cash:.2}, need {required:.2}")]
    InsufficientFunds { cash: f64, required: f64 },

    #[error("insufficient asset balance: have {held}, need {requested}")]
    InsufficientAsset { held: f64, requested: f64 },
}
