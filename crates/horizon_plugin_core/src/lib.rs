//! # Horizon Plugin Core
//!
//! Shared building blocks for the Horizon plugin modules:
//!
//! - [`PlayerId`] and [`Vec3`] - identity and geometry types
//! - [`Event`] and [`EventBus`] - type-safe, JSON-backed publish/subscribe
//! - [`ShutdownState`] - graceful shutdown coordination
//!
//! ## Quick Start
//!
//! ```rust
//! use horizon_plugin_core::{EventBus, PlayerId};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Debug, Serialize, Deserialize)]
//! struct PlayerGreeted {
//!     player: PlayerId,
//! }
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let bus = EventBus::new();
//! bus.on("player_greeted", |event: PlayerGreeted| {
//!     println!("greeted {}", event.player);
//!     Ok(())
//! });
//! bus.emit("player_greeted", &PlayerGreeted { player: PlayerId::new() }).await?;
//! # Ok(())
//! # }
//! ```

pub mod bus;
pub mod events;
pub mod shutdown;
pub mod types;

pub use bus::{EventBus, EventBusStats};
pub use events::{Event, EventError, EventHandler, TypedEventHandler};
pub use shutdown::ShutdownState;
pub use types::{PlayerId, Vec3};

pub use async_trait::async_trait;
