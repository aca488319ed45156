//! # Event Traits
//!
//! The [`Event`] trait, handler abstractions and [`EventError`] used by the
//! in-process [`EventBus`](crate::EventBus).
//!
//! Any `Serialize + DeserializeOwned + Send + Sync + Debug` type is an event;
//! events travel through the bus as JSON so handlers registered by different
//! modules stay decoupled from each other's concrete types.

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use std::{any::{Any, TypeId}, fmt::Debug};

/// Core trait that all events implement.
///
/// Events must be Send + Sync as handlers may run on any runtime worker.
pub trait Event: Send + Sync + Any + Debug {
    /// Returns a stable type name for debugging and routing.
    fn type_name() -> &'static str
    where
        Self: Sized;

    /// Serializes the event to bytes.
    fn serialize(&self) -> Result<Vec<u8>, EventError>;

    /// Deserializes an event from bytes.
    fn deserialize(data: &[u8]) -> Result<Self, EventError>
    where
        Self: Sized;

    /// Returns this event as `&dyn Any`.
    fn as_any(&self) -> &dyn Any;
}

impl<T> Event for T
where
    T: Serialize + DeserializeOwned + Send + Sync + Any + Debug + 'static,
{
    fn type_name() -> &'static str {
        std::any::type_name::<T>()
    }

    fn serialize(&self) -> Result<Vec<u8>, EventError> {
        serde_json::to_vec(self).map_err(|e| {
            tracing::error!(
                "🔴 Event serialization failed for type '{}': {} (event debug: {:?})",
                Self::type_name(),
                e,
                self
            );
            EventError::Serialization(e)
        })
    }

    fn deserialize(data: &[u8]) -> Result<Self, EventError> {
        serde_json::from_slice(data).map_err(|e| {
            tracing::error!(
                "🔴 Event deserialization failed for type '{}': {} (data length: {} bytes)",
                Self::type_name(),
                e,
                data.len()
            );
            EventError::Deserialization(e)
        })
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// Type-erased handler stored by the bus.
///
/// Most callers never implement this directly; [`EventBus::on`](crate::EventBus::on)
/// wraps closures in a [`TypedEventHandler`].
#[async_trait]
pub trait EventHandler: Send + Sync + 'static + Debug {
    /// Handles an event from serialized data.
    async fn handle(&self, data: &[u8]) -> Result<(), EventError>;

    /// Returns the TypeId of the event type this handler expects.
    fn expected_type_id(&self) -> TypeId;

    /// Returns a human-readable name for this handler.
    fn handler_name(&self) -> &str;
}

/// Bridges a typed closure to the type-erased [`EventHandler`] trait.
pub struct TypedEventHandler<T, F>
where
    T: Event,
    F: Fn(T) -> Result<(), EventError> + Send + Sync,
{
    handler: F,
    name: String,
    _phantom: std::marker::PhantomData<fn(T)>,
}

impl<T, F> Debug for TypedEventHandler<T, F>
where
    T: Event,
    F: Fn(T) -> Result<(), EventError> + Send + Sync,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypedEventHandler")
            .field("name", &self.name)
            .finish()
    }
}

impl<T, F> TypedEventHandler<T, F>
where
    T: Event,
    F: Fn(T) -> Result<(), EventError> + Send + Sync,
{
    pub fn new(name: String, handler: F) -> Self {
        Self {
            handler,
            name,
            _phantom: std::marker::PhantomData,
        }
    }
}

#[async_trait]
impl<T, F> EventHandler for TypedEventHandler<T, F>
where
    T: Event,
    F: Fn(T) -> Result<(), EventError> + Send + Sync + 'static,
{
    async fn handle(&self, data: &[u8]) -> Result<(), EventError> {
        match T::deserialize(data) {
            Ok(event) => (self.handler)(event),
            Err(e) => {
                // A payload of another shape under the same key; skip this handler.
                tracing::warn!(
                    "🟡 EventHandler '{}' (expects type '{}'): {}. Handler skipped.",
                    self.name,
                    std::any::type_name::<T>(),
                    e
                );
                Ok(())
            }
        }
    }

    fn expected_type_id(&self) -> TypeId {
        TypeId::of::<T>()
    }

    fn handler_name(&self) -> &str {
        &self.name
    }
}

/// Errors produced while publishing or handling events.
#[derive(Debug, thiserror::Error)]
pub enum EventError {
    /// Serialization failed when converting an event to bytes
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    /// Deserialization failed when converting bytes to an event
    #[error("Deserialization error: {0}")]
    Deserialization(serde_json::Error),
    /// A handler reported a failure while processing an event
    #[error("Handler execution error: {0}")]
    HandlerExecution(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Ping {
        seq: u32,
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    struct Pong {
        reply: String,
    }

    #[tokio::test]
    async fn test_typed_handler_receives_event() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let handler = TypedEventHandler::new("ping".to_string(), move |event: Ping| {
            sink.lock().unwrap().push(event.seq);
            Ok(())
        });

        let data = Event::serialize(&Ping { seq: 7 }).unwrap();
        handler.handle(&data).await.unwrap();

        assert_eq!(*seen.lock().unwrap(), vec![7]);
        assert_eq!(handler.expected_type_id(), TypeId::of::<Ping>());
        assert_eq!(handler.handler_name(), "ping");
    }

    #[tokio::test]
    async fn test_mismatched_payload_is_skipped() {
        let handler = TypedEventHandler::new("pong".to_string(), |_event: Pong| {
            Err(EventError::HandlerExecution("should not run".to_string()))
        });

        let data = Event::serialize(&Ping { seq: 1 }).unwrap();
        assert!(handler.handle(&data).await.is_ok());
    }
}
