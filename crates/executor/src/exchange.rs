use crate::outcome::{FailureKind, OrderFailure, OrderOutcome, PlacedOrder};
use api_client::{ApiClient, ApiError, OrderResponse};
use core_types::{OrderRequest, OrderType, RawOrderRequest, ValidationError, validate_order};
use events::{InterfaceSource, OrderEvent, OrderEventKind, OrderJournal};
use std::sync::Arc;

/// Sends validated orders to the exchange and reports what happened.
///
/// The executor keeps no state of its own between calls: every `execute` is
/// one request to the exchange client and one outcome. There are no retries.
#[derive(Clone)]
pub struct OrderExecutor {
    api_client: Arc<dyn ApiClient>,
    journal: Arc<dyn OrderJournal>,
}

impl OrderExecutor {
    pub fn new(api_client: Arc<dyn ApiClient>, journal: Arc<dyn OrderJournal>) -> Self {
        Self { api_client, journal }
    }

    /// Validates a raw request and, if it is valid, executes it.
    ///
    /// Validation failures are returned before anything is sent to the
    /// exchange.
    pub async fn submit(
        &self,
        raw: &RawOrderRequest,
        source: InterfaceSource,
    ) -> Result<OrderOutcome, ValidationError> {
        self.journal.record(&OrderEvent::from_raw(
            OrderEventKind::RequestReceived,
            source,
            raw,
        ));

        let order = match validate_order(raw) {
            Ok(order) => order,
            Err(e) => {
                self.journal.record(
                    &OrderEvent::from_raw(OrderEventKind::ValidationFailed, source, raw)
                        .with_detail(format!("field={} reason={}", e.field, e.reason)),
                );
                return Err(e);
            }
        };

        Ok(self.execute(&order, source).await)
    }

    /// Places a validated order with exactly one call to the exchange client.
    pub async fn execute(&self, order: &OrderRequest, source: InterfaceSource) -> OrderOutcome {
        tracing::debug!(?order, "Sending order to exchange");

        let result = self.send(order).await;

        match result {
            Ok(response) => {
                let placed = PlacedOrder::from(response);
                self.journal.record(
                    &OrderEvent::from_order(OrderEventKind::OrderPlaced, source, order).with_detail(
                        format!(
                            "order_id={} status={} executed_qty={} avg_price={}",
                            placed.order_id,
                            placed.status,
                            display_or_na(placed.executed_qty),
                            display_or_na(placed.avg_price),
                        ),
                    ),
                );
                OrderOutcome::Placed(placed)
            }
            Err(e) => {
                let failure = OrderFailure::from(&e);
                let kind = match failure.kind {
                    FailureKind::Network => OrderEventKind::NetworkError,
                    FailureKind::Api { .. } => OrderEventKind::ApiError,
                    FailureKind::ValidationEcho => OrderEventKind::ValidationFailed,
                };
                self.journal.record(
                    &OrderEvent::from_order(kind, source, order).with_detail(failure.detail.clone()),
                );
                OrderOutcome::Failed(failure)
            }
        }
    }

    async fn send(&self, order: &OrderRequest) -> Result<OrderResponse, ApiError> {
        match (order.order_type(), order.price()) {
            (OrderType::Market, _) => {
                self.api_client
                    .place_market_order(order.symbol(), order.side(), order.quantity())
                    .await
            }
            (OrderType::Limit, Some(price)) => {
                self.api_client
                    .place_limit_order(order.symbol(), order.side(), order.quantity(), price)
                    .await
            }
            // Unreachable for validator-built requests.
            (OrderType::Limit, None) => Err(ApiError::InvalidRequest(
                "LIMIT order is missing its price".into(),
            )),
        }
    }

    /// Checks that the exchange is reachable. Returns the server time.
    pub async fn check_connectivity(&self) -> Result<i64, ApiError> {
        self.api_client.ping().await?;
        let server_time = self.api_client.server_time().await?;
        tracing::info!(server_time, "Connection test successful: exchange is reachable");
        Ok(server_time)
    }
}

fn display_or_na<T: std::fmt::Display>(value: Option<T>) -> String {
    value.map_or_else(|| "N/A".to_string(), |v| v.to_string())
}
