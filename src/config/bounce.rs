//! Configuration for post-jump wall bounces.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Configuration for post-jump wall bounces.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BounceConfig {
    /// Horizontal rebound speed off the wall.
    pub wall_bounce_force: f32,

    /// Seconds after a charged jump during which touching a wall bounces.
    pub wall_bounce_window: f32,

    /// Scale of `wall_bounce_force` added to the vertical velocity.
    pub vertical_multiplier: f32,

    /// Whether existing horizontal speed toward the bounce direction is kept.
    pub preserve_momentum: bool,

    /// Fraction of existing horizontal speed kept when `preserve_momentum` is set.
    pub momentum_preservation: f32,
}

impl Default for BounceConfig {
    fn default() -> Self {
        Self {
            wall_bounce_force: 8.0,
            wall_bounce_window: 0.6,
            vertical_multiplier: 0.5,
            preserve_momentum: true,
            momentum_preservation: 0.9,
        }
    }
}
