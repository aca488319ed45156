//! Fixed-rate scheduler that ticks an [`NpcController`] until shutdown.

use crate::controller::NpcController;
use horizon_plugin_core::ShutdownState;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

/// Drives [`NpcController::tick_all`] on a tokio interval.
#[derive(Debug, Clone)]
pub struct TickDriver {
    controller: Arc<NpcController>,
    interval: Duration,
}

impl TickDriver {
    pub fn new(controller: Arc<NpcController>, interval: Duration) -> Self {
        Self { controller, interval }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Spawns the tick loop on the current runtime.
    ///
    /// The task exits on the first tick after `shutdown` is initiated and
    /// yields the number of ticks it ran. Returns `None` when the interval is
    /// zero, which disables ticking.
    pub fn spawn(self, shutdown: ShutdownState) -> Option<JoinHandle<u64>> {
        if self.interval.is_zero() {
            info!("⏸️ NPC ticking disabled");
            return None;
        }

        info!("⏱️ Ticking NPCs every {:?}", self.interval);
        Some(tokio::spawn(async move {
            let mut interval = tokio::time::interval(self.interval);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            let mut ticks = 0u64;

            loop {
                interval.tick().await;
                if shutdown.is_shutdown_initiated() {
                    break;
                }
                self.controller.tick_all();
                ticks += 1;
            }

            debug!("🛑 Tick driver stopped after {} tick(s)", ticks);
            ticks
        }))
    }
}
