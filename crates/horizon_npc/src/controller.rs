//! Registry of spawned NPCs and the behaviors attached to each.

use crate::actor::{NpcActor, NpcId};
use crate::behavior::BehaviorSet;
use dashmap::DashMap;
use horizon_plugin_core::Vec3;
use tracing::{debug, info};

struct NpcEntry {
    actor: Box<dyn NpcActor>,
    behaviors: BehaviorSet,
}

/// Owns every spawned actor and ticks their behaviors.
///
/// Target suppliers run while the actor's entry is locked, so they must not
/// call back into the controller.
#[derive(Default)]
pub struct NpcController {
    npcs: DashMap<NpcId, NpcEntry>,
}

impl std::fmt::Debug for NpcController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NpcController")
            .field("npcs", &self.npcs.len())
            .finish()
    }
}

impl NpcController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `actor` with its behaviors, replacing any actor with the same id.
    pub fn spawn(&self, actor: impl NpcActor + 'static, behaviors: BehaviorSet) -> NpcId {
        let id = actor.id();
        debug!("🤖 Spawning NPC {} with {} behavior(s)", id, behaviors.len());
        self.npcs.insert(
            id,
            NpcEntry {
                actor: Box::new(actor),
                behaviors,
            },
        );
        id
    }

    pub fn despawn(&self, id: NpcId) -> bool {
        let removed = self.npcs.remove(&id).is_some();
        if removed {
            debug!("🗑️ Despawned NPC {}", id);
        }
        removed
    }

    /// Runs one tick for every NPC; returns how many were ticked.
    pub fn tick_all(&self) -> usize {
        let mut ticked = 0;
        for mut entry in self.npcs.iter_mut() {
            let NpcEntry { actor, behaviors } = entry.value_mut();
            behaviors.tick(actor.as_mut());
            ticked += 1;
        }
        ticked
    }

    pub fn position_of(&self, id: NpcId) -> Option<Vec3> {
        self.npcs.get(&id).map(|entry| entry.actor.position())
    }

    /// Runs `f` against the actor registered under `id`.
    pub fn with_actor<R>(&self, id: NpcId, f: impl FnOnce(&dyn NpcActor) -> R) -> Option<R> {
        self.npcs.get(&id).map(|entry| f(entry.actor.as_ref()))
    }

    pub fn despawn_all(&self) -> usize {
        let count = self.npcs.len();
        self.npcs.clear();
        if count > 0 {
            info!("🧹 Despawned {} NPC(s)", count);
        }
        count
    }

    pub fn len(&self) -> usize {
        self.npcs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.npcs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::SimpleNpc;
    use crate::behavior::test_support::RecordingActor;
    use crate::behavior::LookToBehavior;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_spawn_tick_despawn() {
        let controller = NpcController::new();
        let npc = SimpleNpc::new("Guard", Vec3::new(0.0, 64.0, 0.0));
        let id = controller.spawn(
            npc,
            BehaviorSet::new().with(LookToBehavior::fixed(Vec3::new(-10.0, 64.0 + 1.62, 0.0))),
        );

        assert_eq!(controller.len(), 1);
        assert_eq!(controller.tick_all(), 1);
        assert_eq!(controller.position_of(id), Some(Vec3::new(0.0, 64.0, 0.0)));

        assert!(controller.despawn(id));
        assert!(!controller.despawn(id));
        assert!(controller.is_empty());
        assert_eq!(controller.tick_all(), 0);
    }

    #[test]
    fn test_each_tick_faces_current_target() {
        let controller = NpcController::new();
        let target = Arc::new(Mutex::new(Some(Vec3::new(1.0, 0.0, 0.0))));
        let source = target.clone();
        let looks = Arc::new(Mutex::new(Vec::new()));

        struct SharedActor {
            inner: RecordingActor,
            looks: Arc<Mutex<Vec<Vec3>>>,
        }

        impl NpcActor for SharedActor {
            fn id(&self) -> NpcId {
                self.inner.id()
            }

            fn position(&self) -> Vec3 {
                self.inner.position()
            }

            fn look_to(&mut self, target: Vec3) {
                self.looks.lock().unwrap().push(target);
            }
        }

        controller.spawn(
            SharedActor {
                inner: RecordingActor::default(),
                looks: looks.clone(),
            },
            BehaviorSet::new().with(LookToBehavior::new(move || *source.lock().unwrap())),
        );

        controller.tick_all();
        *target.lock().unwrap() = Some(Vec3::new(2.0, 0.0, 0.0));
        controller.tick_all();
        *target.lock().unwrap() = None;
        controller.tick_all();

        assert_eq!(
            *looks.lock().unwrap(),
            vec![Vec3::new(1.0, 0.0, 0.0), Vec3::new(2.0, 0.0, 0.0)]
        );
    }

    #[test]
    fn test_with_actor_and_despawn_all() {
        let controller = NpcController::new();
        let id = controller.spawn(SimpleNpc::new("A", Vec3::zero()), BehaviorSet::new());
        controller.spawn(SimpleNpc::new("B", Vec3::zero()), BehaviorSet::new());

        assert_eq!(controller.with_actor(id, |actor| actor.id()), Some(id));
        assert_eq!(controller.despawn_all(), 2);
        assert_eq!(controller.with_actor(id, |actor| actor.id()), None);
    }
}
