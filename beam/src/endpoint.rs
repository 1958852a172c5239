//! Beam endpoints and the worlds they live in.

use std::fmt;

use codec::Placement;
use glam::DVec3;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifies a coordinate space. Positions in different worlds are not comparable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorldId(Uuid);

impl WorldId {
    #[must_use]
    pub const fn new(id: Uuid) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn uuid(self) -> Uuid {
        self.0
    }
}

impl From<Uuid> for WorldId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl fmt::Display for WorldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One end of a beam: a position and orientation in a world.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BeamEndpoint {
    pub world: WorldId,
    pub position: DVec3,
    #[serde(default)]
    pub yaw: f32,
    #[serde(default)]
    pub pitch: f32,
}

impl BeamEndpoint {
    #[must_use]
    pub const fn new(world: WorldId, position: DVec3) -> Self {
        Self {
            world,
            position,
            yaw: 0.0,
            pitch: 0.0,
        }
    }

    #[must_use]
    pub fn with_rotation(mut self, yaw: f32, pitch: f32) -> Self {
        self.yaw = yaw;
        self.pitch = pitch;
        self
    }

    /// The entity placement this endpoint maps to.
    #[must_use]
    pub const fn placement(&self) -> Placement {
        Placement::new(self.position, self.yaw, self.pitch)
    }

    #[must_use]
    pub fn distance_squared(&self, point: DVec3) -> f64 {
        self.position.distance_squared(point)
    }

    /// True when every coordinate and angle is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.yaw.is_finite() && self.pitch.is_finite()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_squared() {
        let endpoint = BeamEndpoint::new(WorldId::new(Uuid::nil()), DVec3::new(0.0, 64.0, 0.0));
        assert_eq!(endpoint.distance_squared(DVec3::new(3.0, 68.0, 0.0)), 25.0);
    }

    #[test]
    fn placement_carries_rotation() {
        let endpoint = BeamEndpoint::new(WorldId::new(Uuid::nil()), DVec3::ONE).with_rotation(90.0, -45.0);
        let placement = endpoint.placement();
        assert_eq!(placement.position, DVec3::ONE);
        assert_eq!(placement.yaw, 90.0);
        assert_eq!(placement.pitch, -45.0);
    }

    #[test]
    fn non_finite_detected() {
        let world = WorldId::new(Uuid::nil());
        assert!(BeamEndpoint::new(world, DVec3::ZERO).is_finite());
        assert!(!BeamEndpoint::new(world, DVec3::new(f64::NAN, 0.0, 0.0)).is_finite());
        assert!(!BeamEndpoint::new(world, DVec3::ZERO)
            .with_rotation(f32::INFINITY, 0.0)
            .is_finite());
    }

    #[test]
    fn endpoint_json_defaults_rotation() {
        let json = r#"{"world":"00000000-0000-0000-0000-000000000001","position":[1.0,2.0,3.0]}"#;
        let endpoint: BeamEndpoint = serde_json::from_str(json).unwrap();
        assert_eq!(endpoint.world, WorldId::new(Uuid::from_u128(1)));
        assert_eq!(endpoint.position, DVec3::new(1.0, 2.0, 3.0));
        assert_eq!(endpoint.yaw, 0.0);
    }
}
