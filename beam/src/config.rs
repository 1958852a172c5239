//! Beam configuration.

use serde::{Deserialize, Serialize};
use wire::ProtocolVersion;

use crate::error::ConfigError;

/// Default distance from either endpoint within which the beam is shown.
pub const DEFAULT_VIEWING_RADIUS: f64 = 100.0;

/// Default number of ticks between visibility checks.
pub const DEFAULT_UPDATE_PERIOD: u32 = 5;

/// Per-beam settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BeamConfig {
    /// Distance from either endpoint within which the beam is shown.
    pub viewing_radius: f64,
    /// Ticks between visibility checks.
    pub update_period: u32,
    /// Ticks before the first visibility check.
    pub initial_delay: u32,
    /// Protocol the packets are encoded for.
    pub protocol: ProtocolVersion,
}

impl Default for BeamConfig {
    fn default() -> Self {
        Self {
            viewing_radius: DEFAULT_VIEWING_RADIUS,
            update_period: DEFAULT_UPDATE_PERIOD,
            initial_delay: 0,
            protocol: ProtocolVersion::default(),
        }
    }
}

impl BeamConfig {
    #[must_use]
    pub fn with_viewing_radius(mut self, radius: f64) -> Self {
        self.viewing_radius = radius;
        self
    }

    #[must_use]
    pub const fn with_update_period(mut self, period: u32) -> Self {
        self.update_period = period;
        self
    }

    #[must_use]
    pub const fn with_protocol(mut self, protocol: ProtocolVersion) -> Self {
        self.protocol = protocol;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.viewing_radius.is_finite() && self.viewing_radius > 0.0) {
            return Err(ConfigError::NonPositiveRadius {
                radius: self.viewing_radius,
            });
        }
        if self.update_period == 0 {
            return Err(ConfigError::ZeroUpdatePeriod);
        }
        Ok(())
    }

    /// Squared viewing radius, compared against squared distances.
    #[must_use]
    pub fn viewing_radius_squared(&self) -> f64 {
        self.viewing_radius * self.viewing_radius
    }
}
