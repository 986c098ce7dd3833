use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, Utc};
use hmac::{Hmac, Mac};
use reqwest::Client;
use serde::Deserialize;
use sha2::Sha256;

use crate::api::{ExchangeGateway, RawKline};
use crate::error::ExchangeError;
use crate::models::{OrderConfirmation, OrderSide};

const MAINNET_API_BASE: &str = "https://api.binance.com";
const TESTNET_API_BASE: &str = "https://testnet.binance.vision";
const KLINES_LIMIT: u32 = 1000;
const RECV_WINDOW_MS: u64 = 5000;

/// Client for the Binance spot REST API
#[derive(Clone)]
pub struct BinanceClient {
    client: Client,
    base_url: String,
    api_key: String,
    api_secret: String,
}

// ============== Response Types ==============

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OrderResponseRaw {
    order_id: i64,
    symbol: String,
    status: String,
    executed_qty: String,
}

// ============== Implementation ==============

impl BinanceClient {
    pub fn new(api_key: String, api_secret: String, testnet: bool) -> Self {
        let base_url = if testnet {
            TESTNET_API_BASE
        } else {
            MAINNET_API_BASE
        };

        Self {
            client: Client::new(),
            base_url: base_url.to_string(),
            api_key,
            api_secret,
        }
    }

    /// Point the client at a different REST base (used by HTTP-level tests)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// HMAC-SHA256 signature over the query string, hex encoded
    fn sign(&self, query: &str) -> String {
        let mut mac = Hmac::<Sha256>::new_from_slice(self.api_secret.as_bytes())
            .expect("HMAC accepts keys of any length");
        mac.update(query.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    async fn error_for_status(response: reqwest::Response) -> Result<reqwest::Response, ExchangeError> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        Err(ExchangeError::Api { status, body })
    }
}

#[async_trait]
impl ExchangeGateway for BinanceClient {
    /// Endpoint: GET /api/v3/klines (public, unsigned)
    async fn get_historical_candles(
        &self,
        symbol: &str,
        interval: &str,
        lookback_days: u32,
    ) -> Result<Vec<RawKline>, ExchangeError> {
        let start_time = Utc::now() - ChronoDuration::days(lookback_days as i64);
        let url = format!(
            "{}/api/v3/klines?symbol={}&interval={}&startTime={}&limit={}",
            self.base_url,
            symbol,
            interval,
            start_time.timestamp_millis(),
            KLINES_LIMIT
        );

        let response = self.client.get(&url).send().await?;
        let response = Self::error_for_status(response).await?;

        let rows: Vec<RawKline> = response.json().await?;
        Ok(rows)
    }

    /// Endpoint: POST /api/v3/order (signed)
    async fn create_market_order(
        &self,
        symbol: &str,
        side: OrderSide,
        quantity: f64,
    ) -> Result<OrderConfirmation, ExchangeError> {
        let timestamp = Utc::now().timestamp_millis();
        let query = format!(
            "symbol={}&side={}&type=MARKET&quantity={}&recvWindow={}&timestamp={}",
            symbol,
            side.as_wire(),
            quantity,
            RECV_WINDOW_MS,
            timestamp
        );
        let signature = self.sign(&query);
        let url = format!(
            "{}/api/v3/order?{}&signature={}",
            self.base_url, query, signature
        );

        let response = self
            .client
            .post(&url)
            .header("X-MBX-APIKEY", &self.api_key)
            .send()
            .await?;
        let response = Self::error_for_status(response).await?;

        let raw: OrderResponseRaw = response.json().await?;
        let executed_qty = raw.executed_qty.parse().map_err(|_| {
            ExchangeError::Protocol(format!(
                "executedQty is not numeric: {:?}",
                raw.executed_qty
            ))
        })?;

        Ok(OrderConfirmation {
            order_id: raw.order_id,
            symbol: raw.symbol,
            side,
            executed_qty,
            status: raw.status,
        })
    }
}
