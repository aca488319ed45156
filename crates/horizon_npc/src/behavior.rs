//! # NPC Behaviors
//!
//! A behavior is a unit of work run once per scheduling tick for every actor
//! it is attached to. Behaviors keep no per-tick state; anything that changes
//! between ticks is resolved again on the next call.

use crate::actor::NpcActor;
use horizon_plugin_core::Vec3;
use tracing::trace;

/// Work attached to an actor and invoked once per tick.
pub trait NpcBehavior: Send + Sync {
    /// Human-readable name used in logs.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    fn on_tick(&self, npc: &mut dyn NpcActor);
}

/// Supplier of the point a [`LookToBehavior`] faces.
pub type TargetSupplier = Box<dyn Fn() -> Option<Vec3> + Send + Sync>;

/// Turns the actor toward a target resolved fresh on every tick.
///
/// # Examples
///
/// ```rust
/// use horizon_npc::{LookToBehavior, NpcBehavior, SimpleNpc};
/// use horizon_plugin_core::Vec3;
///
/// let mut npc = SimpleNpc::new("Guard", Vec3::zero());
/// let behavior = LookToBehavior::fixed(Vec3::new(-10.0, 1.62, 0.0));
/// behavior.on_tick(&mut npc);
/// assert!((npc.orientation().yaw - 90.0).abs() < 1e-9);
/// ```
pub struct LookToBehavior {
    target: TargetSupplier,
}

impl LookToBehavior {
    pub fn new<F>(target: F) -> Self
    where
        F: Fn() -> Option<Vec3> + Send + Sync + 'static,
    {
        Self {
            target: Box::new(target),
        }
    }

    /// Always faces `point`.
    pub fn fixed(point: Vec3) -> Self {
        Self::new(move || Some(point))
    }

    /// Replaces the target supplier.
    pub fn target<F>(mut self, target: F) -> Self
    where
        F: Fn() -> Option<Vec3> + Send + Sync + 'static,
    {
        self.target = Box::new(target);
        self
    }
}

impl std::fmt::Debug for LookToBehavior {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LookToBehavior").finish_non_exhaustive()
    }
}

impl NpcBehavior for LookToBehavior {
    fn name(&self) -> &str {
        "look_to"
    }

    fn on_tick(&self, npc: &mut dyn NpcActor) {
        match (self.target)() {
            Some(point) => npc.look_to(point),
            None => trace!("👀 No look target for {} this tick", npc.id()),
        }
    }
}

/// The ordered behaviors attached to one actor.
#[derive(Default)]
pub struct BehaviorSet {
    behaviors: Vec<Box<dyn NpcBehavior>>,
}

impl std::fmt::Debug for BehaviorSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.behaviors.iter().map(|behavior| behavior.name()))
            .finish()
    }
}

impl BehaviorSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, behavior: impl NpcBehavior + 'static) -> Self {
        self.attach(behavior);
        self
    }

    pub fn attach(&mut self, behavior: impl NpcBehavior + 'static) -> &mut Self {
        self.behaviors.push(Box::new(behavior));
        self
    }

    /// Runs every behavior once, in attach order.
    pub fn tick(&self, npc: &mut dyn NpcActor) {
        for behavior in &self.behaviors {
            behavior.on_tick(npc);
        }
    }

    pub fn len(&self) -> usize {
        self.behaviors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.behaviors.is_empty()
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::RecordingActor;
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_target_is_resolved_every_tick() {
        let target = Arc::new(Mutex::new(Vec3::new(1.0, 2.0, 3.0)));
        let source = target.clone();
        let behavior = LookToBehavior::new(move || Some(*source.lock().unwrap()));
        let mut actor = RecordingActor::default();

        behavior.on_tick(&mut actor);
        assert_eq!(actor.looks, vec![Vec3::new(1.0, 2.0, 3.0)]);

        *target.lock().unwrap() = Vec3::new(-4.0, 0.0, 9.0);
        behavior.on_tick(&mut actor);
        assert_eq!(actor.looks, vec![Vec3::new(1.0, 2.0, 3.0), Vec3::new(-4.0, 0.0, 9.0)]);
    }

    #[test]
    fn test_absent_target_is_noop() {
        let behavior = LookToBehavior::new(|| None);
        let mut actor = RecordingActor::default();

        behavior.on_tick(&mut actor);
        assert!(actor.looks.is_empty());
    }

    #[test]
    fn test_target_builder_replaces_supplier() {
        let behavior = LookToBehavior::new(|| None).target(|| Some(Vec3::new(0.0, 1.0, 0.0)));
        let mut actor = RecordingActor::default();

        behavior.on_tick(&mut actor);
        assert_eq!(actor.looks, vec![Vec3::new(0.0, 1.0, 0.0)]);
    }

    #[test]
    fn test_behavior_set_runs_in_order() {
        let set = BehaviorSet::new()
            .with(LookToBehavior::fixed(Vec3::new(1.0, 0.0, 0.0)))
            .with(LookToBehavior::fixed(Vec3::new(2.0, 0.0, 0.0)));
        let mut actor = RecordingActor::default();

        set.tick(&mut actor);

        assert_eq!(set.len(), 2);
        assert_eq!(actor.looks, vec![Vec3::new(1.0, 0.0, 0.0), Vec3::new(2.0, 0.0, 0.0)]);
        assert_eq!(format!("{set:?}"), r#"["look_to", "look_to"]"#);
    }
}
