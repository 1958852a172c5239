//! Client-side guardian beams.
//!
//! A beam links two points with the guardian laser effect. It is made of
//! two entities that exist only on one observer's client: an invisible
//! guardian at the start endpoint, targeting an invisible squid at the end.
//!
//! - [`BeamRenderer`] owns the packets and sends them on request.
//! - [`VisibilityController`] decides each tick whether the observer should see the beam.
//! - [`ClientBeam`] binds a controller to a host [`TickDriver`].
//!
//! # Design Principles
//!
//! - **Per observer** - One beam renders to exactly one observer channel.
//! - **No half beams** - The observer sees both entities or neither.
//! - **Injected collaborators** - Scheduling, delivery and positions come from the host.
//!
//! ```
//! use beam::{BeamConfig, BeamEndpoint, ManualTickDriver, WorldId};
//! use glam::DVec3;
//! use uuid::Uuid;
//!
//! let world = WorldId::new(Uuid::nil());
//! let start = BeamEndpoint::new(world, DVec3::new(0.0, 64.0, 0.0));
//! let config = BeamConfig::default();
//! assert!(config.validate().is_ok());
//! assert_eq!(start.distance_squared(DVec3::new(3.0, 68.0, 0.0)), 25.0);
//! let driver = ManualTickDriver::new();
//! assert_eq!(driver.pending(), 0);
//! ```

mod client;
mod config;
mod driver;
mod endpoint;
mod error;
mod observer;
mod renderer;
#[cfg(test)]
mod testing;
mod visibility;

pub use client::ClientBeam;
pub use config::{BeamConfig, DEFAULT_UPDATE_PERIOD, DEFAULT_VIEWING_RADIUS};
pub use driver::{ManualTickDriver, TaskId, TaskStatus, TickDriver, TickTask};
pub use endpoint::{BeamEndpoint, WorldId};
pub use error::{BeamError, BeamResult, ConfigError, DeliveryFailed, StateError};
pub use observer::{Observer, ObserverChannel, ObserverStatus, PositionProvider};
pub use renderer::{BeamRenderer, FakeEntity};
pub use visibility::{Visibility, VisibilityController};
