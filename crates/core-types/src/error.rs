use std::fmt;
use thiserror::Error;

/// The order field a validation failure refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrderField {
    Symbol,
    Side,
    Type,
    Quantity,
    Price,
}

impl OrderField {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderField::Symbol => "symbol",
            OrderField::Side => "side",
            OrderField::Type => "type",
            OrderField::Quantity => "quantity",
            OrderField::Price => "price",
        }
    }
}

impl fmt::Display for OrderField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user input error. Exactly one is reported per validation call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{reason}")]
pub struct ValidationError {
    pub field: OrderField,
    pub reason: String,
}

impl ValidationError {
    pub fn new(field: OrderField, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}
