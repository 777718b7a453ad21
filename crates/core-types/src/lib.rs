pub mod enums;
pub mod error;
pub mod structs;
pub mod validation;

// Re-export the core types to provide a clean public API.
pub use enums::{OrderSide, OrderType};
pub use error::{OrderField, ValidationError};
pub use structs::{OrderRequest, RawOrderRequest};
pub use validation::validate_order;
