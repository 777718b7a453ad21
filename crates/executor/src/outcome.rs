use api_client::{ApiError, OrderResponse};
use core_types::{OrderSide, OrderType};
use rust_decimal::Decimal;
use serde::Serialize;

/// The result of one order submission that passed validation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum OrderOutcome {
    Placed(PlacedOrder),
    Failed(OrderFailure),
}

impl OrderOutcome {
    pub fn is_placed(&self) -> bool {
        matches!(self, OrderOutcome::Placed(_))
    }
}

/// An order the exchange accepted.
///
/// Optional fields are `None` when the exchange did not report them. A zero
/// `avgPrice` (nothing filled yet) and the zero `price` Binance returns for
/// MARKET orders are reported as absent too.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedOrder {
    pub order_id: i64,
    pub symbol: String,
    pub side: OrderSide,
    pub order_type: OrderType,
    pub status: String,
    pub orig_qty: Option<Decimal>,
    pub executed_qty: Option<Decimal>,
    pub price: Option<Decimal>,
    pub avg_price: Option<Decimal>,
    pub time_in_force: Option<String>,
}

impl From<OrderResponse> for PlacedOrder {
    fn from(response: OrderResponse) -> Self {
        let non_zero = |value: Option<Decimal>| value.filter(|v| !v.is_zero());
        Self {
            order_id: response.order_id,
            symbol: response.symbol,
            side: response.side,
            order_type: response.order_type,
            status: response.status,
            orig_qty: response.orig_qty,
            executed_qty: response.executed_qty,
            price: non_zero(response.price),
            avg_price: non_zero(response.avg_price),
            time_in_force: response.time_in_force,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FailureKind {
    /// The client refused the request before sending it. Validated input
    /// should never get here.
    ValidationEcho,
    /// The exchange answered with an error, or with something unreadable.
    Api { code: Option<i32> },
    /// The exchange could not be reached.
    Network,
}

/// A failed placement: what to show the user, plus detail for the log.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderFailure {
    #[serde(flatten)]
    pub kind: FailureKind,
    pub message: String,
    #[serde(skip)]
    pub detail: String,
}

impl From<&ApiError> for OrderFailure {
    fn from(error: &ApiError) -> Self {
        let detail = error.to_string();
        let (kind, message) = match error {
            ApiError::Authentication { message, .. } | ApiError::Rejected { message, .. } => (
                FailureKind::Api { code: error.code() },
                format!("Order rejected by exchange: {message}"),
            ),
            ApiError::Network(_) => (
                FailureKind::Network,
                "Failed to send order request. Please check your network connection.".to_string(),
            ),
            ApiError::Deserialization(_) => (
                FailureKind::Api { code: None },
                "Unexpected response from exchange.".to_string(),
            ),
            ApiError::InvalidRequest(reason) => (FailureKind::ValidationEcho, reason.clone()),
            ApiError::Configuration(e) => (FailureKind::ValidationEcho, e.to_string()),
        };
        Self { kind, message, detail }
    }
}
