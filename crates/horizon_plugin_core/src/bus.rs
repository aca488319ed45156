//! In-process publish/subscribe bus.
//!
//! Handlers are keyed by event name. Publishing is fire-and-forget from the
//! caller's point of view: handler failures are logged and never returned.

use crate::events::{Event, EventError, EventHandler, TypedEventHandler};
use compact_str::CompactString;
use dashmap::DashMap;
use futures::stream::{FuturesUnordered, StreamExt};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, error};

/// Bus statistics for monitoring.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct EventBusStats {
    /// Total number of registered handlers
    pub total_handlers: usize,
    /// Total number of events emitted since the bus was created
    pub events_emitted: u64,
}

/// The event bus that routes published events to registered handlers.
pub struct EventBus {
    handlers: DashMap<CompactString, Vec<Arc<dyn EventHandler>>>,
    events_emitted: AtomicU64,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("handlers", &"[handlers]")
            .field("events_emitted", &self.events_emitted.load(Ordering::Relaxed))
            .finish()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            handlers: DashMap::new(),
            events_emitted: AtomicU64::new(0),
        }
    }

    /// Registers a typed handler for `event_name`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use horizon_plugin_core::EventBus;
    ///
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let bus = EventBus::new();
    /// bus.on("greeting", |event: String| {
    ///     println!("got {event}");
    ///     Ok(())
    /// });
    /// bus.emit("greeting", &"hello".to_string()).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn on<T, F>(&self, event_name: &str, handler: F)
    where
        T: Event + 'static,
        F: Fn(T) -> Result<(), EventError> + Send + Sync + 'static,
    {
        let handler_name = format!("{}::{}", event_name, T::type_name());
        let typed = TypedEventHandler::new(handler_name, handler);
        self.handlers
            .entry(CompactString::new(event_name))
            .or_default()
            .push(Arc::new(typed));
        debug!("📝 Registered handler for {}", event_name);
    }

    /// Publishes `event` to every handler registered under `event_name`.
    ///
    /// Only serialization of the event itself can fail; handler errors are
    /// logged and swallowed.
    pub async fn emit<T>(&self, event_name: &str, event: &T) -> Result<(), EventError>
    where
        T: Event,
    {
        let data: Arc<[u8]> = Arc::from(<T as Event>::serialize(event)?);

        // Clone the handler list so the shard guard is not held across awaits.
        let event_handlers = self
            .handlers
            .get(event_name)
            .map(|entry| entry.value().clone());
        self.events_emitted.fetch_add(1, Ordering::Relaxed);

        let Some(event_handlers) = event_handlers else {
            debug!("📭 No handlers for event: {}", event_name);
            return Ok(());
        };

        debug!("📤 Emitting {} to {} handlers", event_name, event_handlers.len());
        let mut futures = FuturesUnordered::new();
        for handler in event_handlers {
            let data = data.clone();
            futures.push(async move {
                if let Err(e) = handler.handle(&data).await {
                    error!("❌ Handler {} failed: {}", handler.handler_name(), e);
                }
            });
        }
        while futures.next().await.is_some() {}

        Ok(())
    }

    /// Removes every handler registered under `event_name`.
    pub fn clear(&self, event_name: &str) -> usize {
        self.handlers
            .remove(event_name)
            .map(|(_, handlers)| handlers.len())
            .unwrap_or(0)
    }

    pub fn stats(&self) -> EventBusStats {
        EventBusStats {
            total_handlers: self.handlers.iter().map(|entry| entry.value().len()).sum(),
            events_emitted: self.events_emitted.load(Ordering::Relaxed),
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
