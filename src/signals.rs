//! Per-tick input snapshot for the jump machine.

use bevy::prelude::*;

use crate::detection::{JumpSensors, WallSide};
use crate::intent::JumpInput;

/// Everything the jump machine reads during one tick.
///
/// Built from the character's [`JumpInput`], [`JumpSensors`] and current
/// velocity; tests construct it directly with the builder methods.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct JumpSignals {
    pub pressed: bool,
    pub held: bool,
    pub released: bool,
    pub grounded: bool,
    pub wall: WallSide,
    pub wall_contact_duration: f32,
    /// Horizontal input (-1.0 = left, 1.0 = right).
    pub horizontal_input: f32,
    pub velocity: Vec2,
    pub catnip: bool,
    pub paused: bool,
}

impl JumpSignals {
    pub fn gather(input: &JumpInput, sensors: &JumpSensors, velocity: Vec2) -> Self {
        Self {
            pressed: input.just_pressed(),
            held: input.is_held(),
            released: input.just_released(),
            grounded: sensors.grounded,
            wall: sensors.wall,
            wall_contact_duration: sensors.wall_contact_duration,
            horizontal_input: input.axis,
            velocity,
            catnip: false,
            paused: false,
        }
    }

    /// Grounded, no wall, button up.
    pub fn grounded() -> Self {
        Self {
            grounded: true,
            ..default()
        }
    }

    /// Airborne, no wall, button up.
    pub fn airborne() -> Self {
        Self::default()
    }

    /// Button pressed this tick (and held).
    pub fn pressing(mut self) -> Self {
        self.pressed = true;
        self.held = true;
        self.released = false;
        self
    }

    /// Button held without an edge.
    pub fn holding(mut self) -> Self {
        self.pressed = false;
        self.held = true;
        self.released = false;
        self
    }

    /// Button released this tick.
    pub fn releasing(mut self) -> Self {
        self.pressed = false;
        self.held = false;
        self.released = true;
        self
    }

    pub fn with_wall(mut self, wall: WallSide, contact_duration: f32) -> Self {
        self.wall = wall;
        self.wall_contact_duration = contact_duration;
        self
    }

    pub fn with_input(mut self, horizontal: f32) -> Self {
        self.horizontal_input = horizontal;
        self
    }

    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    pub fn with_catnip(mut self, catnip: bool) -> Self {
        self.catnip = catnip;
        self
    }

    pub fn with_paused(mut self, paused: bool) -> Self {
        self.paused = paused;
        self
    }
}
