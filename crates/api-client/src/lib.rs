use crate::auth::sign_request;
use async_trait::async_trait;
use configuration::ApiConfig;
use core_types::OrderSide;
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::Method;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use std::time::Duration;

mod auth;
pub mod error;
pub mod responses;

// --- Public API ---
pub use error::ApiError;
pub use responses::{ApiErrorResponse, OrderResponse, ServerTimeResponse};

/// Time-in-force attached to every LIMIT order: Good-Til-Canceled.
pub const DEFAULT_TIME_IN_FORCE: &str = "GTC";

/// The generic, abstract interface for a trading exchange API client.
/// This trait is the contract the order executor uses, allowing the
/// underlying implementation (live or mock) to be swapped out.
///
/// Every method performs exactly one HTTP request. Nothing is retried.
#[async_trait]
pub trait ApiClient: Send + Sync {
    /// Checks that the REST API is reachable.
    async fn ping(&self) -> Result<(), ApiError>;

    /// Fetches the exchange clock in milliseconds since the epoch.
    async fn server_time(&self) -> Result<i64, ApiError>;

    /// Places a MARKET order. (Authenticated)
    async fn place_market_order(
        &self,
        symbol: &str,
        side: OrderSide,
        quantity: Decimal,
    ) -> Result<OrderResponse, ApiError>;

    /// Places a GTC LIMIT order. (Authenticated)
    async fn place_limit_order(
        &self,
        symbol: &str,
        side: OrderSide,
        quantity: Decimal,
        price: Decimal,
    ) -> Result<OrderResponse, ApiError>;
}

/// A concrete implementation of the `ApiClient` for the Binance USDT-M Futures
/// REST API (the testnet by default).
#[derive(Clone)]
pub struct BinanceClient {
    client: reqwest::Client,
    base_url: String,
    api_secret: String,
    recv_window_ms: u64,
}

impl BinanceClient {
    /// Builds a client from the API settings. Fails when the key or secret is
    /// missing, so a misconfigured bot stops before any order is attempted.
    pub fn new(api_config: &ApiConfig) -> Result<Self, ApiError> {
        let credentials = api_config.credentials()?;

        let mut api_key = HeaderValue::from_str(credentials.key)
            .map_err(|_| ApiError::InvalidRequest("API key contains invalid characters".into()))?;
        api_key.set_sensitive(true);
        let mut headers = HeaderMap::new();
        headers.insert("X-MBX-APIKEY", api_key);

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(api_config.timeout_secs))
            .build()
            .map_err(|e| ApiError::InvalidRequest(format!("failed to build HTTP client: {e}")))?;

        tracing::info!(base_url = %api_config.base_url, "Binance Futures client initialized");

        Ok(Self {
            client,
            base_url: api_config.base_url.trim_end_matches('/').to_string(),
            api_secret: credentials.secret.to_string(),
            recv_window_ms: api_config.recv_window_ms,
        })
    }

    async fn get_public<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%path, "Sending public request");
        let response = self.client.get(&url).send().await?;
        Self::read_response(response).await
    }

    async fn send_signed<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        mut params: BTreeMap<&str, String>,
    ) -> Result<T, ApiError> {
        params.insert("recvWindow", self.recv_window_ms.to_string());
        params.insert("timestamp", chrono::Utc::now().timestamp_millis().to_string());

        let query_string = serde_qs::to_string(&params)
            .map_err(|e| ApiError::InvalidRequest(format!("failed to encode parameters: {e}")))?;
        let signature = sign_request(&self.api_secret, &query_string);

        let url = format!(
            "{}{}?{}&signature={}",
            self.base_url, path, query_string, signature
        );

        tracing::debug!(%method, %path, "Sending signed request");
        let response = self.client.request(method, &url).send().await?;
        Self::read_response(response).await
    }

    async fn read_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        let status = response.status();
        let text = response.text().await?;

        if status.is_success() {
            tracing::debug!(%status, body = %text, "API response received");
            serde_json::from_str::<T>(&text).map_err(|e| {
                ApiError::Deserialization(format!(
                    "Failed to deserialize response (HTTP {}): {}. Original text: {}",
                    status, e, text
                ))
            })
        } else {
            let api_error: ApiErrorResponse = serde_json::from_str(&text).map_err(|e| {
                ApiError::Deserialization(format!(
                    "Failed to deserialize error response (HTTP {}): {}. Original text: {}",
                    status, e, text
                ))
            })?;
            Err(ApiError::from_exchange(status.as_u16(), api_error.code, api_error.msg))
        }
    }

    async fn place_order(&self, params: BTreeMap<&str, String>) -> Result<OrderResponse, ApiError> {
        self.send_signed(Method::POST, "/fapi/v1/order", params).await
    }
}

fn order_params(
    symbol: &str,
    side: OrderSide,
    order_type: &str,
    quantity: Decimal,
) -> Result<BTreeMap<&'static str, String>, ApiError> {
    if symbol.trim().is_empty() {
        return Err(ApiError::InvalidRequest("symbol must not be empty".into()));
    }
    if quantity <= Decimal::ZERO {
        return Err(ApiError::InvalidRequest(format!(
            "quantity must be positive, got {quantity}"
        )));
    }

    let mut params = BTreeMap::new();
    params.insert("symbol", symbol.to_string());
    params.insert("side", side.as_str().to_string());
    params.insert("type", order_type.to_string());
    params.insert("quantity", quantity.normalize().to_string());
    Ok(params)
}

#[async_trait]
impl ApiClient for BinanceClient {
    async fn ping(&self) -> Result<(), ApiError> {
        let _: serde_json::Value = self.get_public("/fapi/v1/ping").await?;
        Ok(())
    }

    async fn server_time(&self) -> Result<i64, ApiError> {
        let response: ServerTimeResponse = self.get_public("/fapi/v1/time").await?;
        Ok(response.server_time)
    }

    async fn place_market_order(
        &self,
        symbol: &str,
        side: OrderSide,
        quantity: Decimal,
    ) -> Result<OrderResponse, ApiError> {
        let params = order_params(symbol, side, "MARKET", quantity)?;
        self.place_order(params).await
    }

    async fn place_limit_order(
        &self,
        symbol: &str,
        side: OrderSide,
        quantity: Decimal,
        price: Decimal,
    ) -> Result<OrderResponse, ApiError> {
        if price <= Decimal::ZERO {
            return Err(ApiError::InvalidRequest(format!(
                "price must be positive, got {price}"
            )));
        }
        let mut params = order_params(symbol, side, "LIMIT", quantity)?;
        params.insert("price", price.normalize().to_string());
        params.insert("timeInForce", DEFAULT_TIME_IN_FORCE.to_string());
        self.place_order(params).await
    }
}
