//! Configuration for shapecast surface probes.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Dimensions of the ground and wall shapecasts used by physics backends
/// that detect surfaces themselves.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Distance from the character center to the ground at which it still
    /// counts as grounded.
    pub ground_distance: f32,

    /// Width of the ground detection shapecast.
    pub ground_cast_width: f32,

    /// Distance from the character center to a wall at which it counts as
    /// touching.
    pub wall_distance: f32,

    /// Height of the wall detection shapecasts.
    pub wall_cast_height: f32,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            ground_distance: 10.0,
            ground_cast_width: 11.0,
            wall_distance: 8.0,
            wall_cast_height: 12.0,
        }
    }
}
