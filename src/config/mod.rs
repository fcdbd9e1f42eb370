//! Jump configuration.
//!
//! [`JumpConfig`] groups the tuning values of every part of the jump
//! machine. Each group lives in its own module and has sensible defaults,
//! so most games only override a handful of fields through the `with_*`
//! builders.

mod bounce;
mod charge;
mod error;
mod probe;
mod sync;
mod throttle;
mod wall_charge;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

pub use bounce::BounceConfig;
pub use charge::ChargeConfig;
pub use error::JumpConfigError;
pub use probe::ProbeConfig;
pub use sync::SyncConfig;
pub use throttle::MovementThrottleConfig;
pub use wall_charge::WallChargeConfig;

/// Complete tuning of a charge-jump character.
///
/// # Example
///
/// ```rust
/// use msg_charge_jump::prelude::*;
///
/// let config = JumpConfig::default()
///     .with_jump_forces(8.5, 14.0)
///     .with_max_charge_time(2.0)
///     .with_jump_cooldown(0.0);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct JumpConfig {
    pub charge: ChargeConfig,
    pub wall: WallChargeConfig,
    pub bounce: BounceConfig,
    pub throttle: MovementThrottleConfig,
    pub sync: SyncConfig,
}

impl JumpConfig {
    pub fn with_jump_forces(mut self, min: f32, max: f32) -> Self {
        self.charge.min_jump_force = min;
        self.charge.max_jump_force = max;
        self
    }

    pub fn with_max_charge_time(mut self, seconds: f32) -> Self {
        self.charge.max_charge_time = seconds;
        self
    }

    pub fn with_jump_cooldown(mut self, seconds: f32) -> Self {
        self.charge.jump_cooldown = seconds;
        self
    }

    pub fn with_coyote_time(mut self, seconds: f32) -> Self {
        self.charge.coyote_time = seconds;
        self
    }

    pub fn with_wall_jump_forces(mut self, min: f32, max: f32) -> Self {
        self.wall.min_wall_jump_force = min;
        self.wall.max_wall_jump_force = max;
        self
    }

    pub fn with_max_wall_charge_time(mut self, seconds: f32) -> Self {
        self.wall.max_wall_charge_time = seconds;
        self
    }

    pub fn with_wall_detach_force(mut self, force: f32) -> Self {
        self.wall.wall_detach_force = force;
        self
    }

    pub fn with_min_wall_contact_time(mut self, seconds: f32) -> Self {
        self.wall.min_wall_contact_time = seconds;
        self
    }

    pub fn with_wall_bounce(mut self, force: f32, window: f32) -> Self {
        self.bounce.wall_bounce_force = force;
        self.bounce.wall_bounce_window = window;
        self
    }

    pub fn with_momentum_preservation(mut self, factor: Option<f32>) -> Self {
        self.bounce.preserve_momentum = factor.is_some();
        if let Some(factor) = factor {
            self.bounce.momentum_preservation = factor;
        }
        self
    }

    pub fn with_push_interval(mut self, seconds: f32) -> Self {
        self.sync.push_interval = seconds;
        self
    }

    /// Check that every value can drive the machine.
    ///
    /// Charge times, the sync interval and the smoothing rate must be
    /// positive; everything else must be finite and non-negative, and each
    /// min/max force pair must be ordered.
    pub fn validate(&self) -> Result<(), JumpConfigError> {
        let c = &self.charge;
        let w = &self.wall;
        let b = &self.bounce;
        let t = &self.throttle;
        let s = &self.sync;

        positive("charge.max_charge_time", c.max_charge_time)?;
        positive("wall.max_wall_charge_time", w.max_wall_charge_time)?;
        positive("sync.push_interval", s.push_interval)?;
        positive("sync.smoothing_rate", s.smoothing_rate)?;

        for (field, value) in [
            ("charge.min_jump_force", c.min_jump_force),
            ("charge.max_jump_force", c.max_jump_force),
            ("charge.jump_cooldown", c.jump_cooldown),
            ("charge.coyote_time", c.coyote_time),
            ("charge.catnip_multiplier", c.catnip_multiplier),
            ("charge.input_deadzone", c.input_deadzone),
            ("wall.min_wall_jump_force", w.min_wall_jump_force),
            ("wall.max_wall_jump_force", w.max_wall_jump_force),
            ("wall.wall_detach_force", w.wall_detach_force),
            ("wall.min_wall_contact_time", w.min_wall_contact_time),
            ("bounce.wall_bounce_force", b.wall_bounce_force),
            ("bounce.wall_bounce_window", b.wall_bounce_window),
            ("bounce.vertical_multiplier", b.vertical_multiplier),
            ("bounce.momentum_preservation", b.momentum_preservation),
            ("throttle.charging_speed", t.charging_speed),
            ("throttle.charging_acceleration", t.charging_acceleration),
            ("throttle.wall_speed", t.wall_speed),
            ("throttle.wall_acceleration", t.wall_acceleration),
        ] {
            non_negative(field, value)?;
        }

        ordered(
            ("charge.min_jump_force", c.min_jump_force),
            ("charge.max_jump_force", c.max_jump_force),
        )?;
        ordered(
            ("wall.min_wall_jump_force", w.min_wall_jump_force),
            ("wall.max_wall_jump_force", w.max_wall_jump_force),
        )
    }
}

fn finite(field: &'static str, value: f32) -> Result<(), JumpConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(JumpConfigError::NonFinite { field, value })
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), JumpConfigError> {
    finite(field, value)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(JumpConfigError::NonPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), JumpConfigError> {
    finite(field, value)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(JumpConfigError::Negative { field, value })
    }
}

fn ordered(
    (min_field, min): (&'static str, f32),
    (max_field, max): (&'static str, f32),
) -> Result<(), JumpConfigError> {
    if min <= max {
        Ok(())
    } else {
        Err(JumpConfigError::InvertedRange {
            min_field,
            min,
            max_field,
            max,
        })
    }
}
