//! Environment signals.
//!
//! These structures hold what the environment (ground and wall detection)
//! reports about the character each frame. The jump machine only reads
//! them; a physics backend or the game fills them in.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Which wall, if any, the character is touching.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum WallSide {
    #[default]
    None,
    Left,
    Right,
}

impl WallSide {
    /// Resolve wall contacts on both sides into one side.
    ///
    /// When both sides touch (a narrow shaft) the left wall wins so the
    /// result is stable from frame to frame.
    pub fn from_contacts(left: bool, right: bool) -> Self {
        match (left, right) {
            (true, _) => Self::Left,
            (false, true) => Self::Right,
            (false, false) => Self::None,
        }
    }

    /// -1.0 for the left wall, 1.0 for the right wall, 0.0 for none.
    pub fn sign(self) -> f32 {
        match self {
            Self::None => 0.0,
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }

    pub fn is_touching(self) -> bool {
        self != Self::None
    }

    /// Whether horizontal `input` points away from this wall.
    pub fn pushes_away(self, input: f32, deadzone: f32) -> bool {
        match self {
            Self::None => false,
            Self::Left => input > deadzone,
            Self::Right => input < -deadzone,
        }
    }
}

/// Ground and wall contact reported by the environment.
#[derive(Component, Reflect, Debug, Clone, Copy, Default, PartialEq)]
#[reflect(Component)]
pub struct JumpSensors {
    /// Whether the character stands on the ground.
    pub grounded: bool,
    /// The wall the character is touching.
    pub wall: WallSide,
    /// Seconds of uninterrupted contact with `wall`.
    pub wall_contact_duration: f32,
}

impl JumpSensors {
    pub fn grounded() -> Self {
        Self {
            grounded: true,
            ..default()
        }
    }

    pub fn airborne() -> Self {
        Self::default()
    }

    /// Airborne and touching `wall` for `duration` seconds.
    pub fn on_wall(wall: WallSide, duration: f32) -> Self {
        Self {
            grounded: false,
            wall,
            wall_contact_duration: if wall.is_touching() { duration } else { 0.0 },
        }
    }

    /// Record this frame's wall contacts, accumulating contact duration while
    /// the same wall stays in contact.
    pub fn update_wall_contacts(&mut self, left: bool, right: bool, dt: f32) {
        let wall = WallSide::from_contacts(left, right);
        if wall.is_touching() && wall == self.wall {
            self.wall_contact_duration += dt;
        } else {
            self.wall_contact_duration = 0.0;
        }
        self.wall = wall;
    }
}
