use crate::messages::{LogLevel, OrderEvent};
use std::sync::{Mutex, PoisonError};

/// The logging capability handed to the order executor.
///
/// Passing it in explicitly keeps the executor free of ambient globals and lets
/// tests observe exactly which events an order produced.
pub trait OrderJournal: Send + Sync {
    fn record(&self, event: &OrderEvent);
}

/// Forwards order events to the process-wide `tracing` subscriber.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingJournal;

macro_rules! emit {
    ($macro:ident, $event:ident) => {
        tracing::$macro!(
            event = %$event.kind,
            symbol = %$event.symbol,
            side = %$event.side,
            r#type = %$event.order_type,
            quantity = %$event.quantity,
            price = $event.price.as_deref().unwrap_or("N/A"),
            source = %$event.source,
            "{}",
            describe($event)
        )
    };
}

impl OrderJournal for TracingJournal {
    fn record(&self, event: &OrderEvent) {
        match event.kind.level() {
            LogLevel::Info => emit!(info, event),
            LogLevel::Warn => emit!(warn, event),
            LogLevel::Error => emit!(error, event),
        }
    }
}

fn describe(event: &OrderEvent) -> String {
    match &event.detail {
        Some(detail) => format!("{} | {}", event.kind, detail),
        None => event.kind.to_string(),
    }
}

/// Keeps events in memory. Handy for tests and for surfacing a request's
/// history to a UI.
#[derive(Debug, Default)]
pub struct MemoryJournal {
    events: Mutex<Vec<OrderEvent>>,
}

impl MemoryJournal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<OrderEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl OrderJournal for MemoryJournal {
    fn record(&self, event: &OrderEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::messages::{InterfaceSource, OrderEventKind};
    use core_types::{RawOrderRequest, validate_order};
    use std::io;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn captured(f: impl FnOnce()) -> String {
        let buffer = SharedBuffer::default();
        let writer = buffer.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        let bytes = buffer.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn tracing_journal_writes_structured_fields() {
        let raw = RawOrderRequest::new("btcusdt", "buy", "limit", "0.01").with_price("45000");
        let order = validate_order(&raw).unwrap();
        let event = OrderEvent::from_order(OrderEventKind::OrderPlaced, InterfaceSource::Cli, &order)
            .with_detail("order_id=42 status=NEW");

        let output = captured(|| TracingJournal.record(&event));

        assert!(output.contains("INFO"), "{output}");
        assert!(output.contains("order-placed | order_id=42 status=NEW"), "{output}");
        assert!(output.contains("event=order-placed"), "{output}");
        assert!(output.contains("symbol=BTCUSDT"), "{output}");
        assert!(output.contains(" type=LIMIT"), "{output}");
        assert!(output.contains("price=\"45000\""), "{output}");
        assert!(output.contains("source=CLI"), "{output}");
    }

    #[test]
    fn failures_are_logged_at_higher_levels() {
        let raw = RawOrderRequest::new("BTCUSDT", "HOLD", "MARKET", "1");
        let warn = OrderEvent::from_raw(OrderEventKind::ValidationFailed, InterfaceSource::Ui, &raw);
        let error = OrderEvent::from_raw(OrderEventKind::NetworkError, InterfaceSource::Ui, &raw);

        let output = captured(|| {
            TracingJournal.record(&warn);
            TracingJournal.record(&error);
        });

        assert!(output.contains("WARN"), "{output}");
        assert!(output.contains("ERROR"), "{output}");
        assert!(output.contains("price=\"N/A\""), "{output}");
        assert!(output.contains("source=UI"), "{output}");
    }

    #[test]
    fn memory_journal_keeps_events_in_order() {
        let journal = MemoryJournal::new();
        let raw = RawOrderRequest::new("ETHUSDT", "SELL", "MARKET", "2").with_price("  ");
        journal.record(&OrderEvent::from_raw(OrderEventKind::RequestReceived, InterfaceSource::Cli, &raw));
        journal.record(&OrderEvent::from_raw(OrderEventKind::ApiError, InterfaceSource::Cli, &raw));

        let kinds: Vec<_> = journal.events().iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![OrderEventKind::RequestReceived, OrderEventKind::ApiError]);
        assert_eq!(journal.events()[0].price, None);
    }
}
