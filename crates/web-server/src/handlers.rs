use crate::{AppState, error::AppError};
use axum::{Json, extract::State, response::Html};
use core_types::RawOrderRequest;
use events::InterfaceSource;
use executor::{OrderOutcome, PlacedOrder};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const ORDER_FORM: &str = include_str!("form.html");

/// A form field that may arrive as a JSON string or a JSON number.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum FormValue {
    Text(String),
    Number(serde_json::Number),
}

impl FormValue {
    fn into_raw(self) -> String {
        match self {
            FormValue::Text(s) => s,
            FormValue::Number(n) => n.to_string(),
        }
    }
}

/// The body of `POST /api/orders`.
#[derive(Debug, Deserialize)]
pub struct OrderForm {
    pub symbol: Option<String>,
    pub side: Option<String>,
    #[serde(rename = "type", alias = "order_type")]
    pub order_type: Option<String>,
    pub quantity: Option<FormValue>,
    pub price: Option<FormValue>,
}

impl From<OrderForm> for RawOrderRequest {
    fn from(form: OrderForm) -> Self {
        RawOrderRequest {
            symbol: form.symbol,
            side: form.side,
            order_type: form.order_type,
            quantity: form.quantity.map(FormValue::into_raw),
            price: form.price.map(FormValue::into_raw),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ConnectivityResponse {
    pub reachable: bool,
    pub server_time: i64,
}

/// # GET /
pub async fn order_form() -> Html<&'static str> {
    Html(ORDER_FORM)
}

/// # POST /api/orders
/// Validates and places a single order submitted from the form.
pub async fn place_order(
    State(state): State<Arc<AppState>>,
    Json(form): Json<OrderForm>,
) -> Result<Json<PlacedOrder>, AppError> {
    let raw = RawOrderRequest::from(form);
    match state.executor.submit(&raw, InterfaceSource::Ui).await? {
        OrderOutcome::Placed(placed) => Ok(Json(placed)),
        OrderOutcome::Failed(failure) => Err(AppError::Order(failure)),
    }
}

/// # GET /api/connectivity
pub async fn connectivity(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ConnectivityResponse>, AppError> {
    let server_time = state.executor.check_connectivity().await?;
    Ok(Json(ConnectivityResponse {
        reachable: true,
        server_time,
    }))
}
