//! # Horizon NPC
//!
//! Per-tick behaviors for non-player characters.
//!
//! Actors implement [`NpcActor`], behaviors implement [`NpcBehavior`], and the
//! [`NpcController`] pairs each actor with its [`BehaviorSet`]. A
//! [`TickDriver`] calls [`NpcController::tick_all`] at a fixed rate until the
//! server shuts down.

pub mod actor;
pub mod behavior;
pub mod controller;
pub mod driver;

pub use actor::{NpcActor, NpcId, Orientation, SimpleNpc, EYE_HEIGHT};
pub use behavior::{BehaviorSet, LookToBehavior, NpcBehavior, TargetSupplier};
pub use controller::NpcController;
pub use driver::TickDriver;
