use crate::enums::{OrderSide, OrderType};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Order parameters exactly as a presentation layer collected them.
///
/// Every field is an optional string so that CLI flags and form inputs can be
/// handed over untouched; nothing here has been checked yet. Use
/// [`crate::validate_order`] to turn it into an [`OrderRequest`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawOrderRequest {
    pub symbol: Option<String>,
    pub side: Option<String>,
    #[serde(rename = "type", alias = "order_type")]
    pub order_type: Option<String>,
    pub quantity: Option<String>,
    pub price: Option<String>,
}

impl RawOrderRequest {
    pub fn new(
        symbol: impl Into<String>,
        side: impl Into<String>,
        order_type: impl Into<String>,
        quantity: impl Into<String>,
    ) -> Self {
        Self {
            symbol: Some(symbol.into()),
            side: Some(side.into()),
            order_type: Some(order_type.into()),
            quantity: Some(quantity.into()),
            price: None,
        }
    }

    pub fn with_price(mut self, price: impl Into<String>) -> Self {
        self.price = Some(price.into());
        self
    }

    /// The price as supplied, or "N/A" when none was given. Used for log lines.
    pub fn price_display(&self) -> &str {
        match self.price.as_deref().map(str::trim) {
            Some(p) if !p.is_empty() => p,
            _ => "N/A",
        }
    }
}

/// A validated, normalized order.
///
/// Instances only come out of the validator, so holding one guarantees: the
/// symbol is non-empty and upper-case, the quantity is strictly positive, and a
/// price is present (and positive) if and only if the order is a LIMIT order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderRequest {
    symbol: String,
    side: OrderSide,
    order_type: OrderType,
    quantity: Decimal,
    price: Option<Decimal>,
}

impl OrderRequest {
    pub(crate) fn new(
        symbol: String,
        side: OrderSide,
        order_type: OrderType,
        quantity: Decimal,
        price: Option<Decimal>,
    ) -> Self {
        Self {
            symbol,
            side,
            order_type,
            quantity,
            price,
        }
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn side(&self) -> OrderSide {
        self.side
    }

    pub fn order_type(&self) -> OrderType {
        self.order_type
    }

    pub fn quantity(&self) -> Decimal {
        self.quantity
    }

    /// The limit price. Always `None` for MARKET orders.
    pub fn price(&self) -> Option<Decimal> {
        self.price
    }
}
