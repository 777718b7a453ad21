use chrono::{DateTime, Utc};
use core_types::{OrderRequest, RawOrderRequest};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Enum representing the severity of a log message for structured logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLevel {
    Info,
    Warn,
    Error,
}

/// Which presentation layer an order came in through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InterfaceSource {
    #[serde(rename = "CLI")]
    Cli,
    #[serde(rename = "UI")]
    Ui,
}

impl InterfaceSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            InterfaceSource::Cli => "CLI",
            InterfaceSource::Ui => "UI",
        }
    }
}

impl fmt::Display for InterfaceSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The stages of a single order's lifecycle that end up in the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderEventKind {
    RequestReceived,
    OrderPlaced,
    ValidationFailed,
    ApiError,
    NetworkError,
}

impl OrderEventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderEventKind::RequestReceived => "request-received",
            OrderEventKind::OrderPlaced => "order-placed",
            OrderEventKind::ValidationFailed => "validation-failed",
            OrderEventKind::ApiError => "api-error",
            OrderEventKind::NetworkError => "network-error",
        }
    }

    pub fn level(&self) -> LogLevel {
        match self {
            OrderEventKind::RequestReceived | OrderEventKind::OrderPlaced => LogLevel::Info,
            OrderEventKind::ValidationFailed => LogLevel::Warn,
            OrderEventKind::ApiError | OrderEventKind::NetworkError => LogLevel::Error,
        }
    }
}

impl fmt::Display for OrderEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One structured log record about an order.
///
/// Field values are kept as display strings: a `RequestReceived` event carries
/// whatever the user typed, before any normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderEvent {
    pub timestamp: DateTime<Utc>,
    pub kind: OrderEventKind,
    pub source: InterfaceSource,
    pub symbol: String,
    pub side: String,
    #[serde(rename = "type")]
    pub order_type: String,
    pub quantity: String,
    pub price: Option<String>,
    /// Free-form detail: the order id and status, or the failure reason.
    pub detail: Option<String>,
}

impl OrderEvent {
    pub fn from_raw(kind: OrderEventKind, source: InterfaceSource, raw: &RawOrderRequest) -> Self {
        let field = |value: &Option<String>| value.clone().unwrap_or_default();
        Self {
            timestamp: Utc::now(),
            kind,
            source,
            symbol: field(&raw.symbol),
            side: field(&raw.side),
            order_type: field(&raw.order_type),
            quantity: field(&raw.quantity),
            price: raw
                .price
                .as_deref()
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(String::from),
            detail: None,
        }
    }

    pub fn from_order(kind: OrderEventKind, source: InterfaceSource, order: &OrderRequest) -> Self {
        Self {
            timestamp: Utc::now(),
            kind,
            source,
            symbol: order.symbol().to_string(),
            side: order.side().to_string(),
            order_type: order.order_type().to_string(),
            quantity: order.quantity().to_string(),
            price: order.price().map(|p| p.to_string()),
            detail: None,
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}
