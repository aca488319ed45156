//! Main application logic and lifecycle management.
//!
//! The `Application` wires the inventory session tracker and the NPC
//! controller to headless host collaborators, drives NPC ticks and tears
//! everything down on shutdown.

use crate::{
    cli::CliArgs,
    config::AppConfig,
    host::{log_notifications, LoggingDisplay},
    logging::display_banner,
    signals::{setup_signal_handlers, setup_signal_handlers_silent},
};
use horizon_inventory::{
    AnimatedMenu, InventoryService, MenuView, PlayerListenerRegistry, SessionTracker, SlotRenderer,
};
use horizon_npc::{BehaviorSet, LookToBehavior, NpcController, SimpleNpc, TickDriver, EYE_HEIGHT};
use horizon_plugin_core::{EventBus, ShutdownState, Vec3};
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn};

/// How long shutdown waits for the tick driver to observe the shutdown flag.
const TICK_DRIVER_GRACE: Duration = Duration::from_secs(2);

/// Main application struct.
///
/// Owns the configuration, the event bus every inventory notification is
/// published on, the inventory service and the NPC controller.
pub struct Application {
    config: AppConfig,
    events: Arc<EventBus>,
    inventory: InventoryService,
    listeners: Arc<PlayerListenerRegistry>,
    npcs: Arc<NpcController>,
}

impl Application {
    /// Loads configuration, applies CLI overrides, validates settings and
    /// builds the runtime components.
    pub async fn new(args: CliArgs) -> Result<Self, Box<dyn std::error::Error>> {
        info!("🔧 Loading configuration from: {}", args.config_path.display());
        let mut config = AppConfig::load_from_file(&args.config_path).await?;
        apply_overrides(&mut config, &args);

        if let Err(e) = config.validate() {
            return Err(format!("Configuration validation failed: {e}").into());
        } else {
            info!("✅ Configuration loaded and validated successfully");
        }

        display_banner();
        Ok(Self::from_config(config))
    }

    /// Builds the runtime from an already validated configuration.
    pub fn from_config(config: AppConfig) -> Self {
        let events = Arc::new(EventBus::new());
        log_notifications(&events);

        let listeners = Arc::new(PlayerListenerRegistry::new());
        let tracker = Arc::new(SessionTracker::new(
            Arc::new(SlotRenderer::new(config.inventory.max_rows)),
            Arc::new(LoggingDisplay::new()),
            listeners.clone(),
        ));
        let inventory = InventoryService::new(tracker, events.clone());

        let npcs = Arc::new(NpcController::new());
        spawn_default_npcs(&npcs);

        Self {
            config,
            events,
            inventory,
            listeners,
            npcs,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn inventory(&self) -> &InventoryService {
        &self.inventory
    }

    pub fn listeners(&self) -> &Arc<PlayerListenerRegistry> {
        &self.listeners
    }

    pub fn npcs(&self) -> &Arc<NpcController> {
        &self.npcs
    }

    /// Wraps `menu` in an [`AnimatedMenu`] cycling `frames` at the configured period.
    pub fn animated_menu(&self, menu: MenuView, frames: Vec<String>) -> AnimatedMenu {
        AnimatedMenu::new(menu, frames, self.config.inventory.animation_period())
    }

    /// Runs until a termination signal arrives, then shuts down gracefully.
    pub async fn run(self) -> Result<(), Box<dyn std::error::Error>> {
        info!("🌟 Starting Horizon inventory host");
        self.log_configuration_summary();

        let shutdown_state = ShutdownState::new();
        let tick_handle = TickDriver::new(self.npcs.clone(), self.config.runtime.tick_interval())
            .spawn(shutdown_state.clone());

        info!("✅ Horizon is now running!");
        info!("🛑 Press Ctrl+C to gracefully shutdown");

        let signal_shutdown_state = setup_signal_handlers().await?;

        // merciless shutdown
        tokio::spawn(async move {
            if let Err(e) = setup_signal_handlers_silent().await {
                error!("Failed to set up merciless shutdown signal handler: {e}");
                return;
            }

            warn!("Shutdown handler received again! I'll make this quick.");
            std::process::exit(1);
        });

        if signal_shutdown_state.is_shutdown_initiated() {
            shutdown_state.initiate_shutdown();
        }

        self.shutdown(shutdown_state, tick_handle).await;
        Ok(())
    }

    /// Stops ticking, closes every open session and despawns all NPCs.
    pub async fn shutdown(
        &self,
        shutdown_state: ShutdownState,
        tick_handle: Option<tokio::task::JoinHandle<u64>>,
    ) {
        shutdown_state.initiate_shutdown();
        info!("🛑 Shutdown signal received, beginning graceful shutdown...");

        info!("⏱️ Phase 1: Stopping NPC ticks...");
        if let Some(handle) = tick_handle {
            match tokio::time::timeout(TICK_DRIVER_GRACE, handle).await {
                Ok(Ok(ticks)) => info!("✅ Tick driver stopped after {} ticks", ticks),
                Ok(Err(e)) => error!("❌ Tick driver failed: {}", e),
                Err(_) => warn!("⏰ Tick driver did not stop within {:?}", TICK_DRIVER_GRACE),
            }
        }

        info!("🎒 Phase 2: Closing inventory sessions...");
        let closed = self.inventory.close_all().await;
        info!("✅ Closed {} inventory session(s)", closed);

        info!("🧹 Phase 3: Despawning NPCs...");
        self.npcs.despawn_all();

        shutdown_state.complete_shutdown();

        let stats = self.events.stats();
        info!("📊 Final Statistics:");
        info!("  - Total events emitted: {}", stats.events_emitted);
        info!("  - Handlers registered: {}", stats.total_handlers);
        info!("✅ Horizon shutdown complete");
    }

    fn log_configuration_summary(&self) {
        info!("📋 Configuration Summary:");
        info!("  ⏱️ Tick interval: {}ms", self.config.runtime.tick_interval_ms);
        info!(
            "  🎞️ Animation period: {}ms",
            self.config.inventory.animation_period_ms
        );
        info!("  📦 Max rows: {}", self.config.inventory.max_rows);
        info!("  🤖 NPCs: {}", self.npcs.len());
    }
}

fn apply_overrides(config: &mut AppConfig, args: &CliArgs) {
    if let Some(log_level) = &args.log_level {
        config.logging.level = log_level.clone();
    }

    if args.json_logs {
        config.logging.json_format = true;
    }

    if let Some(tick_interval_ms) = args.tick_interval_ms {
        config.runtime.tick_interval_ms = tick_interval_ms;
    }
}

/// A guide standing at the world spawn, facing the spawn point's entrance.
fn spawn_default_npcs(npcs: &NpcController) {
    let spawn = Vec3::new(0.0, 64.0, 0.0);
    let entrance = Vec3::new(0.0, spawn.y + EYE_HEIGHT, 8.0);
    npcs.spawn(
        SimpleNpc::new("Guide", spawn),
        BehaviorSet::new().with(LookToBehavior::fixed(entrance)),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use horizon_inventory::{ItemStack, TrackedView};
    use horizon_plugin_core::PlayerId;
    use std::path::PathBuf;

    fn args(tick_interval_ms: Option<u64>) -> CliArgs {
        CliArgs {
            config_path: PathBuf::from("unused.toml"),
            log_level: Some("debug".to_string()),
            json_logs: true,
            tick_interval_ms,
        }
    }

    #[test]
    fn test_apply_overrides() {
        let mut config = AppConfig::default();
        apply_overrides(&mut config, &args(Some(10)));

        assert_eq!(config.logging.level, "debug");
        assert!(config.logging.json_format);
        assert_eq!(config.runtime.tick_interval_ms, 10);
    }

    #[test]
    fn test_overrides_keep_file_values_when_absent() {
        let mut config = AppConfig::default();
        config.runtime.tick_interval_ms = 25;
        apply_overrides(&mut config, &args(None));
        assert_eq!(config.runtime.tick_interval_ms, 25);
    }

    #[tokio::test]
    async fn test_new_creates_config_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut cli = args(None);
        cli.config_path = dir.path().join("config.toml");

        let app = Application::new(cli.clone()).await.unwrap();

        assert!(cli.config_path.exists());
        assert_eq!(app.config().logging.level, "debug");
        assert_eq!(app.npcs().len(), 1);
    }

    #[tokio::test]
    async fn test_new_rejects_invalid_config() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        tokio::fs::write(&path, "[inventory]\nmax_rows = 9\n").await.unwrap();

        let mut cli = args(None);
        cli.config_path = path;

        assert!(Application::new(cli).await.is_err());
    }

    #[tokio::test]
    async fn test_shutdown_closes_sessions_and_npcs() {
        let app = Application::from_config(AppConfig::default());
        let player = PlayerId::new();
        let menu = MenuView::new("Main", 3).with_item(4, ItemStack::new("COMPASS"));
        app.inventory().open(TrackedView::plain(menu), player).await;

        let shutdown_state = ShutdownState::new();
        let handle = TickDriver::new(app.npcs().clone(), Duration::from_millis(5))
            .spawn(shutdown_state.clone());

        app.shutdown(shutdown_state.clone(), handle).await;

        assert!(shutdown_state.is_shutdown_complete());
        assert!(!app.inventory().tracker().has_session(player));
        assert!(app.npcs().is_empty());
    }

    #[tokio::test]
    async fn test_shutdown_stops_animated_menus() {
        let app = Application::from_config(AppConfig::default());
        let player = PlayerId::new();
        let menu = Arc::new(app.animated_menu(
            MenuView::new("Shop", 2),
            vec!["Shop".to_string(), "Shop *".to_string()],
        ));

        app.inventory().open(TrackedView::Animated(menu.clone()), player).await;
        assert!(menu.is_running());
        assert!(app.inventory().tracker().is_animated(player));

        app.shutdown(ShutdownState::new(), None).await;
        assert!(!menu.is_running());
    }
}
