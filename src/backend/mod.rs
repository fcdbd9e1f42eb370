//! Physics backends.

mod traits;

pub use traits::{JumpPhysicsBackend, NoOpBackendPlugin};

#[cfg(feature = "avian2d")]
pub use crate::avian::Avian2dBackend;
