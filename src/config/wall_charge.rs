//! Configuration for wall-jump charging.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Configuration for wall-jump charging.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WallChargeConfig {
    /// Whether wall charging is enabled.
    pub enabled: bool,

    /// Vertical impulse of an uncharged wall jump.
    pub min_wall_jump_force: f32,

    /// Vertical impulse of a fully charged wall jump.
    pub max_wall_jump_force: f32,

    /// Seconds of holding needed to reach `max_wall_jump_force`.
    pub max_wall_charge_time: f32,

    /// Horizontal impulse pushing the character off the wall.
    pub wall_detach_force: f32,

    /// Seconds of continuous wall contact before a press starts a wall charge.
    pub min_wall_contact_time: f32,
}

impl Default for WallChargeConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            min_wall_jump_force: 7.0,
            max_wall_jump_force: 12.0,
            max_wall_charge_time: 1.0,
            wall_detach_force: 6.0,
            min_wall_contact_time: 0.05,
        }
    }
}
