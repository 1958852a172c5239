//! Error types for beam operations.

use thiserror::Error;

use crate::endpoint::WorldId;

/// Result type for beam operations.
pub type BeamResult<T> = Result<T, BeamError>;

/// Errors surfaced by the renderer, the visibility controller and `ClientBeam`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BeamError {
    /// Bad endpoints or settings. Raised at construction or relocation.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),

    /// The operation is not allowed in the current lifecycle state.
    #[error("invalid state: {0}")]
    InvalidState(#[from] StateError),

    /// The observer channel did not accept a packet.
    #[error(transparent)]
    DeliveryFailed(#[from] DeliveryFailed),
}

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("endpoints are in different worlds ({start} and {end})")]
    CrossWorldEndpoints { start: WorldId, end: WorldId },

    #[error("endpoint is in world {actual}, beam is in world {expected}")]
    WrongWorld { expected: WorldId, actual: WorldId },

    #[error("endpoint coordinates must be finite")]
    NonFiniteCoordinate,

    #[error("viewing radius must be finite and positive, got {radius}")]
    NonPositiveRadius { radius: f64 },

    #[error("update period must be at least one tick")]
    ZeroUpdatePeriod,
}

/// Lifecycle errors. These indicate a caller bug and are never retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StateError {
    #[error("beam is already active")]
    AlreadyActive,

    #[error("beam is not active")]
    NotActive,

    #[error("observer is offline, closed or in another world")]
    ObserverUnreachable,
}

/// The observer channel is closed or rejected a packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("packet delivery to observer failed")]
pub struct DeliveryFailed;

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::*;

    #[test]
    fn error_display_cross_world() {
        let err = BeamError::from(ConfigError::CrossWorldEndpoints {
            start: WorldId::new(Uuid::from_u128(1)),
            end: WorldId::new(Uuid::from_u128(2)),
        });
        let msg = err.to_string();
        assert!(msg.starts_with("invalid configuration"));
        assert!(msg.contains("different worlds"));
    }

    #[test]
    fn error_display_radius() {
        let err = ConfigError::NonPositiveRadius { radius: -1.5 };
        assert!(err.to_string().contains("-1.5"));
    }

    #[test]
    fn delivery_failed_is_transparent() {
        let err = BeamError::from(DeliveryFailed);
        assert_eq!(err.to_string(), DeliveryFailed.to_string());
    }

    #[test]
    fn error_equality() {
        assert_eq!(
            BeamError::from(StateError::NotActive),
            BeamError::InvalidState(StateError::NotActive)
        );
        assert_ne!(
            BeamError::from(StateError::NotActive),
            BeamError::from(StateError::AlreadyActive)
        );
    }
}
