//! Configuration for movement throttling while charging.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Speed and acceleration multipliers handed to the movement controller.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementThrottleConfig {
    /// Walk speed multiplier while charging a ground jump (0.0-1.0).
    pub charging_speed: f32,

    /// Walk acceleration multiplier while charging a ground jump (0.0-1.0).
    pub charging_acceleration: f32,

    /// Speed multiplier while attached to a wall (wall charge or after a
    /// vertical wall jump).
    pub wall_speed: f32,

    /// Acceleration multiplier while attached to a wall.
    pub wall_acceleration: f32,
}

impl Default for MovementThrottleConfig {
    fn default() -> Self {
        Self {
            charging_speed: 0.5,
            charging_acceleration: 0.5,
            wall_speed: 0.0,
            wall_acceleration: 0.0,
        }
    }
}
