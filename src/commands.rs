//! Jump machine output.
//!
//! The machine never touches physics or presentation directly. During its
//! tick it records what it wants in [`JumpCommands`]; the apply phase hands
//! the velocity override to the physics backend and copies indicator state
//! into [`ChargeIndicator`] and [`JumpMovementModifiers`].

use bevy::prelude::*;

/// Velocity components to overwrite. `None` leaves a component untouched.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Default)]
pub struct VelocityOverride {
    pub x: Option<f32>,
    pub y: Option<f32>,
}

impl VelocityOverride {
    pub fn new(x: Option<f32>, y: Option<f32>) -> Self {
        Self { x, y }
    }

    /// Combine with a later override; components set later win.
    pub fn merge(self, later: VelocityOverride) -> Self {
        Self {
            x: later.x.or(self.x),
            y: later.y.or(self.y),
        }
    }

    /// Apply to `velocity`.
    pub fn apply_to(self, velocity: Vec2) -> Vec2 {
        Vec2::new(self.x.unwrap_or(velocity.x), self.y.unwrap_or(velocity.y))
    }
}

/// State of the charge bar as the machine wants it displayed.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Default)]
pub struct IndicatorState {
    pub active: bool,
    /// Charge fraction (0.0-1.0).
    pub progress: f32,
    pub fully_charged: bool,
}

/// Per-frame output buffer of the jump machine.
#[derive(Component, Reflect, Debug, Clone, Copy, Default)]
#[reflect(Component)]
pub struct JumpCommands {
    impulse: Option<VelocityOverride>,
    indicator: IndicatorState,
    queued: bool,
}

impl JumpCommands {
    /// Request a velocity overwrite. Several requests in one frame merge.
    pub fn apply_impulse(&mut self, vx: Option<f32>, vy: Option<f32>) {
        let request = VelocityOverride::new(vx, vy);
        self.impulse = Some(match self.impulse {
            Some(pending) => pending.merge(request),
            None => request,
        });
    }

    pub fn set_charge_indicator(&mut self, active: bool, progress: f32, fully_charged: bool) {
        self.indicator = IndicatorState {
            active,
            progress: progress.clamp(0.0, 1.0),
            fully_charged,
        };
    }

    /// Show or hide the "jump queued for landing" marker.
    pub fn set_queued_flag(&mut self, queued: bool) {
        self.queued = queued;
    }

    /// The pending impulse, if any, without consuming it.
    pub fn pending_impulse(&self) -> Option<VelocityOverride> {
        self.impulse
    }

    /// Consume the pending impulse.
    pub fn take_impulse(&mut self) -> Option<VelocityOverride> {
        self.impulse.take()
    }

    pub fn indicator(&self) -> IndicatorState {
        self.indicator
    }

    pub fn queued(&self) -> bool {
        self.queued
    }
}

/// Charge bar state for the presentation layer.
#[derive(Component, Reflect, Debug, Clone, Copy, Default, PartialEq)]
#[reflect(Component)]
pub struct ChargeIndicator {
    pub active: bool,
    /// Charge fraction (0.0-1.0).
    pub progress: f32,
    pub fully_charged: bool,
    /// A released air charge is waiting for ground contact.
    pub queued: bool,
}

impl ChargeIndicator {
    pub fn from_commands(commands: &JumpCommands) -> Self {
        let indicator = commands.indicator();
        Self {
            active: indicator.active,
            progress: indicator.progress,
            fully_charged: indicator.fully_charged,
            queued: commands.queued(),
        }
    }
}

/// Multipliers the movement controller applies to walk speed and
/// acceleration while the jump machine throttles movement.
#[derive(Component, Reflect, Debug, Clone, Copy, PartialEq)]
#[reflect(Component)]
pub struct JumpMovementModifiers {
    pub speed: f32,
    pub acceleration: f32,
}

impl Default for JumpMovementModifiers {
    fn default() -> Self {
        Self {
            speed: 1.0,
            acceleration: 1.0,
        }
    }
}
