//! Configuration for ground and buffered charge jumps.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Configuration for ground and buffered charge jumps.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChargeConfig {
    /// Vertical impulse of an uncharged (tapped) jump.
    pub min_jump_force: f32,

    /// Vertical impulse of a fully charged jump.
    pub max_jump_force: f32,

    /// Seconds of holding needed to reach `max_jump_force`.
    pub max_charge_time: f32,

    /// Seconds after any jump during which a new charge cannot start.
    pub jump_cooldown: f32,

    /// Grace period (seconds) after leaving the ground during which a press
    /// still starts a ground charge.
    pub coyote_time: f32,

    /// Force multiplier applied while the catnip power-up is active.
    pub catnip_multiplier: f32,

    /// Horizontal input magnitude below which the stick counts as centered.
    pub input_deadzone: f32,
}

impl Default for ChargeConfig {
    fn default() -> Self {
        Self {
            min_jump_force: 8.5,
            max_jump_force: 14.0,
            max_charge_time: 2.0,
            jump_cooldown: 0.2,
            coyote_time: 0.1,
            catnip_multiplier: 1.25,
            input_deadzone: 0.1,
        }
    }
}
