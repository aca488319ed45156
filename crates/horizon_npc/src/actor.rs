//! Controllable actors and their facing.

use horizon_plugin_core::Vec3;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Height of an actor's eyes above its feet position.
pub const EYE_HEIGHT: f64 = 1.62;

/// Unique identifier of a spawned NPC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NpcId(pub Uuid);

impl NpcId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for NpcId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for NpcId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Facing of an actor in degrees.
///
/// `yaw` 0 faces +Z and grows clockwise seen from above (90 faces -X).
/// `pitch` is negative when looking up.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Orientation {
    pub yaw: f64,
    pub pitch: f64,
}

impl Orientation {
    pub fn new(yaw: f64, pitch: f64) -> Self {
        Self { yaw, pitch }
    }

    /// The orientation an observer at `from` needs to look at `to`.
    ///
    /// Returns the default orientation when both points coincide.
    pub fn facing(from: Vec3, to: Vec3) -> Self {
        let delta = to.sub(from);
        if delta.length() == 0.0 {
            return Self::default();
        }
        let horizontal = (delta.x * delta.x + delta.z * delta.z).sqrt();
        let yaw = (-delta.x).atan2(delta.z).to_degrees();
        let pitch = -delta.y.atan2(horizontal).to_degrees();
        Self { yaw, pitch }
    }
}

/// An actor a behavior can steer. Implemented by host-side NPC wrappers.
pub trait NpcActor: Send + Sync {
    fn id(&self) -> NpcId;

    /// Feet position in world space.
    fn position(&self) -> Vec3;

    /// Turns the actor to face `target`.
    fn look_to(&mut self, target: Vec3);
}

/// A self-contained actor that just records its position and facing.
#[derive(Debug, Clone)]
pub struct SimpleNpc {
    id: NpcId,
    name: String,
    position: Vec3,
    orientation: Orientation,
}

impl SimpleNpc {
    pub fn new(name: impl Into<String>, position: Vec3) -> Self {
        Self {
            id: NpcId::new(),
            name: name.into(),
            position,
            orientation: Orientation::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn eye_position(&self) -> Vec3 {
        Vec3::new(self.position.x, self.position.y + EYE_HEIGHT, self.position.z)
    }

    pub fn teleport(&mut self, position: Vec3) {
        self.position = position;
    }
}

impl NpcActor for SimpleNpc {
    fn id(&self) -> NpcId {
        self.id
    }

    fn position(&self) -> Vec3 {
        self.position
    }

    fn look_to(&mut self, target: Vec3) {
        self.orientation = Orientation::facing(self.eye_position(), target);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!((actual - expected).abs() < 1e-9, "{actual} != {expected}");
    }

    #[test]
    fn test_facing_horizontal_directions() {
        let origin = Vec3::zero();

        assert_close(Orientation::facing(origin, Vec3::new(0.0, 0.0, 5.0)).yaw, 0.0);
        assert_close(Orientation::facing(origin, Vec3::new(-5.0, 0.0, 0.0)).yaw, 90.0);
        assert_close(Orientation::facing(origin, Vec3::new(5.0, 0.0, 0.0)).yaw, -90.0);
        assert_close(Orientation::facing(origin, Vec3::new(0.0, 0.0, 5.0)).pitch, 0.0);
    }

    #[test]
    fn test_facing_vertical() {
        let up = Orientation::facing(Vec3::zero(), Vec3::new(0.0, 10.0, 0.0));
        assert_close(up.pitch, -90.0);

        let down = Orientation::facing(Vec3::zero(), Vec3::new(1.0, -1.0, 0.0));
        assert_close(down.pitch, 45.0);
    }

    #[test]
    fn test_facing_same_point() {
        let point = Vec3::new(3.0, 4.0, 5.0);
        assert_eq!(Orientation::facing(point, point), Orientation::default());
    }

    #[test]
    fn test_simple_npc_looks_from_eyes() {
        let mut npc = SimpleNpc::new("Guide", Vec3::zero());
        npc.look_to(Vec3::new(0.0, EYE_HEIGHT, 10.0));

        assert_close(npc.orientation().yaw, 0.0);
        assert_close(npc.orientation().pitch, 0.0);
        assert_eq!(npc.name(), "Guide");
    }
}
