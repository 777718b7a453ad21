//! Order input validation.
//!
//! Checks run in a fixed order and stop at the first failure:
//! symbol, side, type, quantity, then price. Nothing in here performs I/O, so
//! the same raw request always produces the same result.

use crate::enums::{OrderSide, OrderType};
use crate::error::{OrderField, ValidationError};
use crate::structs::{OrderRequest, RawOrderRequest};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Validates and normalizes a raw order request.
pub fn validate_order(raw: &RawOrderRequest) -> Result<OrderRequest, ValidationError> {
    let symbol = validate_symbol(raw.symbol.as_deref())?;
    let side = validate_side(raw.side.as_deref())?;
    let order_type = validate_order_type(raw.order_type.as_deref())?;
    let quantity = validate_quantity(raw.quantity.as_deref())?;
    let price = validate_price(raw.price.as_deref(), order_type)?;

    Ok(OrderRequest::new(symbol, side, order_type, quantity, price))
}

pub fn validate_symbol(symbol: Option<&str>) -> Result<String, ValidationError> {
    match non_blank(symbol) {
        Some(s) => Ok(s.to_uppercase()),
        None => Err(ValidationError::new(OrderField::Symbol, "symbol is required")),
    }
}

pub fn validate_side(side: Option<&str>) -> Result<OrderSide, ValidationError> {
    let side = side.ok_or_else(|| ValidationError::new(OrderField::Side, "Order side is required."))?;
    side.parse::<OrderSide>().map_err(|_| {
        ValidationError::new(
            OrderField::Side,
            format!(
                "Invalid order side. Allowed values are {}.",
                OrderSide::ALLOWED.join(" or ")
            ),
        )
    })
}

pub fn validate_order_type(order_type: Option<&str>) -> Result<OrderType, ValidationError> {
    let order_type = order_type
        .ok_or_else(|| ValidationError::new(OrderField::Type, "Order type is required."))?;
    order_type.parse::<OrderType>().map_err(|_| {
        ValidationError::new(
            OrderField::Type,
            format!(
                "Invalid order type. Allowed values are {}.",
                OrderType::ALLOWED.join(" or ")
            ),
        )
    })
}

pub fn validate_quantity(quantity: Option<&str>) -> Result<Decimal, ValidationError> {
    let quantity = non_blank(quantity)
        .ok_or_else(|| ValidationError::new(OrderField::Quantity, "Quantity is required."))?;
    let quantity = parse_decimal(quantity)
        .ok_or_else(|| ValidationError::new(OrderField::Quantity, "Quantity must be a valid number."))?;
    if quantity <= Decimal::ZERO {
        return Err(ValidationError::new(
            OrderField::Quantity,
            "Quantity must be a positive number.",
        ));
    }
    Ok(quantity)
}

/// MARKET orders drop whatever price was supplied, parseable or not.
pub fn validate_price(
    price: Option<&str>,
    order_type: OrderType,
) -> Result<Option<Decimal>, ValidationError> {
    if !order_type.requires_price() {
        return Ok(None);
    }

    let price = non_blank(price).ok_or_else(|| {
        ValidationError::new(OrderField::Price, "Price is required for LIMIT orders.")
    })?;
    let price = parse_decimal(price)
        .ok_or_else(|| ValidationError::new(OrderField::Price, "Price must be a valid number."))?;
    if price <= Decimal::ZERO {
        return Err(ValidationError::new(
            OrderField::Price,
            "Price must be a positive number.",
        ));
    }
    Ok(Some(price))
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Accepts plain ("0.01") and scientific ("1e-2") notation.
///
/// Values too small for `Decimal` round to zero when parsed; those are
/// rejected here rather than reported as non-positive.
fn parse_decimal(value: &str) -> Option<Decimal> {
    let parsed = Decimal::from_str(value)
        .or_else(|_| Decimal::from_scientific(value))
        .ok()?
        .normalize();
    if parsed.is_zero() && has_nonzero_digit(value) {
        return None;
    }
    Some(parsed)
}

/// Whether the mantissa (the part before any exponent) has a digit other than zero.
fn has_nonzero_digit(value: &str) -> bool {
    value
        .split(['e', 'E'])
        .next()
        .is_some_and(|mantissa| mantissa.chars().any(|c| matches!(c, '1'..='9')))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn market(side: &str, quantity: &str) -> RawOrderRequest {
        RawOrderRequest::new("BTCUSDT", side, "MARKET", quantity)
    }

    #[test]
    fn scenario_a_market_buy_is_valid() {
        let order = validate_order(&market("BUY", "0.01")).unwrap();
        assert_eq!(order.symbol(), "BTCUSDT");
        assert_eq!(order.side(), OrderSide::Buy);
        assert_eq!(order.order_type(), OrderType::Market);
        assert_eq!(order.quantity(), dec!(0.01));
        assert_eq!(order.price(), None);
    }

    #[test]
    fn scenario_b_limit_sell_with_price_is_valid() {
        let raw = RawOrderRequest::new("BTCUSDT", "SELL", "LIMIT", "0.01").with_price("45000");
        let order = validate_order(&raw).unwrap();
        assert_eq!(order.side(), OrderSide::Sell);
        assert_eq!(order.order_type(), OrderType::Limit);
        assert_eq!(order.price(), Some(dec!(45000)));
    }

    #[test]
    fn scenario_c_limit_without_price_fails_on_price() {
        let raw = RawOrderRequest::new("BTCUSDT", "BUY", "LIMIT", "0.01");
        let err = validate_order(&raw).unwrap_err();
        assert_eq!(err.field, OrderField::Price);
        assert_eq!(err.reason, "Price is required for LIMIT orders.");
    }

    #[test]
    fn scenario_d_unknown_side_fails_on_side() {
        let err = validate_order(&market("HOLD", "0.01")).unwrap_err();
        assert_eq!(err.field, OrderField::Side);
        assert_eq!(err.reason, "Invalid order side. Allowed values are BUY or SELL.");
    }

    #[test]
    fn normalizes_case_and_whitespace() {
        let raw = RawOrderRequest::new("  btcusdt ", " sell", "limit ", " 0.5 ").with_price(" 45000.10 ");
        let order = validate_order(&raw).unwrap();
        assert_eq!(order.symbol(), "BTCUSDT");
        assert_eq!(order.side(), OrderSide::Sell);
        assert_eq!(order.order_type(), OrderType::Limit);
        assert_eq!(order.quantity(), dec!(0.5));
        assert_eq!(order.price(), Some(dec!(45000.1)));
    }

    #[test]
    fn blank_or_missing_symbol_is_rejected() {
        for symbol in [None, Some(""), Some("   ")] {
            let raw = RawOrderRequest {
                symbol: symbol.map(String::from),
                ..market("BUY", "0.01")
            };
            let err = validate_order(&raw).unwrap_err();
            assert_eq!(err.field, OrderField::Symbol);
            assert_eq!(err.reason, "symbol is required");
        }
    }

    #[test]
    fn symbol_is_checked_before_everything_else() {
        let raw = RawOrderRequest::new("", "HOLD", "STOP", "-1");
        assert_eq!(validate_order(&raw).unwrap_err().field, OrderField::Symbol);
    }

    #[test]
    fn missing_side_and_type_have_their_own_messages() {
        let raw = RawOrderRequest {
            side: None,
            ..market("BUY", "1")
        };
        assert_eq!(validate_order(&raw).unwrap_err().reason, "Order side is required.");

        let raw = RawOrderRequest {
            order_type: None,
            ..market("BUY", "1")
        };
        let err = validate_order(&raw).unwrap_err();
        assert_eq!(err.field, OrderField::Type);
        assert_eq!(err.reason, "Order type is required.");
    }

    #[test]
    fn unknown_type_fails_on_type() {
        let raw = RawOrderRequest::new("BTCUSDT", "BUY", "STOP_MARKET", "0.01");
        let err = validate_order(&raw).unwrap_err();
        assert_eq!(err.field, OrderField::Type);
        assert_eq!(err.reason, "Invalid order type. Allowed values are MARKET or LIMIT.");
        assert_eq!(err.field.as_str(), "type");
    }

    #[test]
    fn underflowing_quantity_is_not_a_valid_number() {
        for quantity in ["0.00000000000000000000000000001", "1e-40"] {
            let err = validate_order(&market("BUY", quantity)).unwrap_err();
            assert_eq!(err.field, OrderField::Quantity, "quantity {quantity:?}");
            assert_eq!(err.reason, "Quantity must be a valid number.");
        }
        // A written-out zero is still a non-positive number.
        let err = validate_order(&market("BUY", "0.000000000000000000000000000000")).unwrap_err();
        assert_eq!(err.reason, "Quantity must be a positive number.");
    }

    #[test]
    fn underflowing_limit_price_is_not_a_valid_number() {
        let raw = RawOrderRequest::new("BTCUSDT", "BUY", "LIMIT", "1")
            .with_price("0.000000000000000000000000000000001");
        let err = validate_order(&raw).unwrap_err();
        assert_eq!(err.field, OrderField::Price);
        assert_eq!(err.reason, "Price must be a valid number.");
    }

    #[test]
    fn any_invalid_side_fails_on_side() {
        for side in ["HOLD", "", "long", "b", "BUY SELL", "sel"] {
            let err = validate_order(&market(side, "0.01")).unwrap_err();
            assert_eq!(err.field, OrderField::Side, "side {side:?}");
        }
        for side in ["buy", "Buy", "SELL", "sElL"] {
            assert!(validate_order(&market(side, "0.01")).is_ok(), "side {side:?}");
        }
    }

    #[test]
    fn non_positive_quantity_fails_regardless_of_price() {
        for quantity in ["0", "0.0", "-0.01", "-5", "0e3"] {
            let market_err = validate_order(&market("BUY", quantity)).unwrap_err();
            assert_eq!(market_err.field, OrderField::Quantity);
            assert_eq!(market_err.reason, "Quantity must be a positive number.");

            // A LIMIT order with a missing price still reports the quantity first.
            let limit = RawOrderRequest::new("BTCUSDT", "SELL", "LIMIT", quantity);
            assert_eq!(validate_order(&limit).unwrap_err().field, OrderField::Quantity);
        }
    }

    #[test]
    fn unparseable_or_missing_quantity_fails_on_quantity() {
        let err = validate_order(&market("BUY", "abc")).unwrap_err();
        assert_eq!(err.field, OrderField::Quantity);
        assert_eq!(err.reason, "Quantity must be a valid number.");

        let err = validate_order(&market("BUY", " ")).unwrap_err();
        assert_eq!(err.reason, "Quantity is required.");

        for quantity in ["NaN", "inf", "1,5"] {
            assert_eq!(
                validate_order(&market("BUY", quantity)).unwrap_err().field,
                OrderField::Quantity
            );
        }
    }

    #[test]
    fn scientific_notation_is_accepted() {
        let order = validate_order(&market("BUY", "1e-2")).unwrap();
        assert_eq!(order.quantity(), dec!(0.01));
    }

    #[test]
    fn market_orders_ignore_any_price() {
        for price in ["45000", "-1", "0", "not-a-number", ""] {
            let raw = market("SELL", "0.01").with_price(price);
            let order = validate_order(&raw).unwrap();
            assert_eq!(order.price(), None, "price {price:?}");
        }
    }

    #[test]
    fn limit_price_must_be_a_positive_number() {
        let base = RawOrderRequest::new("ETHUSDT", "BUY", "LIMIT", "1");

        let err = validate_order(&base.clone().with_price("0")).unwrap_err();
        assert_eq!(err.field, OrderField::Price);
        assert_eq!(err.reason, "Price must be a positive number.");

        let err = validate_order(&base.clone().with_price("-2500")).unwrap_err();
        assert_eq!(err.reason, "Price must be a positive number.");

        let err = validate_order(&base.clone().with_price("twelve")).unwrap_err();
        assert_eq!(err.reason, "Price must be a valid number.");

        let err = validate_order(&base.with_price("  ")).unwrap_err();
        assert_eq!(err.reason, "Price is required for LIMIT orders.");
    }

    #[test]
    fn validation_is_idempotent() {
        let requests = [
            market("BUY", "0.01"),
            market("HOLD", "0.01"),
            RawOrderRequest::new("BTCUSDT", "BUY", "LIMIT", "0.01"),
            RawOrderRequest::new("btcusdt", "sell", "limit", "2").with_price("100"),
        ];
        for raw in &requests {
            assert_eq!(validate_order(raw), validate_order(raw));
        }
    }
}
