//! # Core Type Definitions
//!
//! Identifiers and geometry shared by every Horizon plugin module.
//!
//! - [`PlayerId`] - Unique identifier for a connected player
//! - [`Vec3`] - 3D point in world space with double precision

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a player.
///
/// A wrapper around UUID so player identities cannot be confused with
/// other ids (view ids, npc ids) in the framework.
///
/// # Examples
///
/// ```rust
/// use horizon_plugin_core::PlayerId;
///
/// let player_id = PlayerId::new();
/// let parsed = PlayerId::from_str("550e8400-e29b-41d4-a716-446655440000")?;
/// println!("Player ID: {}", parsed);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub Uuid);

impl PlayerId {
    /// Creates a new random player ID using UUID v4.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parses a player ID from a string representation.
    ///
    /// Returns `Err(uuid::Error)` with details about the parsing failure
    /// when the string is not a valid UUID.
    pub fn from_str(s: &str) -> Result<Self, uuid::Error> {
        Uuid::parse_str(s).map(Self)
    }
}

impl std::str::FromStr for PlayerId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str(s)
    }
}

impl Default for PlayerId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A point (or direction) in world space.
///
/// # Examples
///
/// ```rust
/// use horizon_plugin_core::Vec3;
///
/// let spawn = Vec3::new(0.0, 64.0, 0.0);
/// let target = Vec3::new(3.0, 64.0, 4.0);
/// assert_eq!(spawn.distance(target), 5.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    /// X coordinate (east-west axis)
    pub x: f64,
    /// Y coordinate (vertical axis)
    pub y: f64,
    /// Z coordinate (north-south axis)
    pub z: f64,
}

impl Vec3 {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Creates a zero vector (0, 0, 0).
    pub fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// Component-wise difference `self - other`.
    pub fn sub(&self, other: Vec3) -> Vec3 {
        Vec3::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }

    /// Euclidean length of this vector.
    pub fn length(&self) -> f64 {
        (self.x * self.x + self.y * self.y + self.z * self.z).sqrt()
    }

    /// Euclidean distance to another point.
    pub fn distance(&self, other: Vec3) -> f64 {
        self.sub(other).length()
    }
}

impl Default for Vec3 {
    fn default() -> Self {
        Self::zero()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_id_round_trips_through_display() {
        let id = PlayerId::new();
        let parsed: PlayerId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_player_id_rejects_garbage() {
        assert!(PlayerId::from_str("not-a-uuid").is_err());
    }

    #[test]
    fn test_vec3_distance() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 6.0, 3.0);
        assert_eq!(a.distance(b), 5.0);
        assert_eq!(b.sub(a), Vec3::new(3.0, 4.0, 0.0));
        assert_eq!(Vec3::default(), Vec3::zero());
    }
}
