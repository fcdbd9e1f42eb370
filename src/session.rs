//! Charge bookkeeping.
//!
//! A [`ChargeSession`] lives only while the button is being charged.
//! [`StoredCharge`] survives state changes so progress gathered in the air
//! can be spent on landing. A [`BounceWindow`] follows every charged ground
//! jump.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::timer::{clamped_elapsed, rebase};

/// Horizontal direction sign captured when a charge starts.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Neutral,
    Right,
}

impl Facing {
    /// Direction of `value`, treating `|value| <= deadzone` as neutral.
    pub fn from_value(value: f32, deadzone: f32) -> Self {
        if value > deadzone {
            Self::Right
        } else if value < -deadzone {
            Self::Left
        } else {
            Self::Neutral
        }
    }

    pub fn sign(self) -> f32 {
        match self {
            Self::Left => -1.0,
            Self::Neutral => 0.0,
            Self::Right => 1.0,
        }
    }

    /// Whether both directions are set and point opposite ways.
    pub fn opposes(self, other: Facing) -> bool {
        matches!(
            (self, other),
            (Self::Left, Self::Right) | (Self::Right, Self::Left)
        )
    }
}

/// A charge in progress.
#[derive(Reflect, Debug, Clone, Copy, PartialEq)]
pub struct ChargeSession {
    start_time: f64,
    direction: Facing,
    fully_charged: bool,
}

impl ChargeSession {
    /// Start charging at `now`.
    pub fn start(now: f64, direction: Facing) -> Self {
        Self {
            start_time: now,
            direction,
            fully_charged: false,
        }
    }

    /// Continue a charge that had already reached `progress` seconds.
    pub fn resume(now: f64, progress: f32, direction: Facing) -> Self {
        Self {
            start_time: now - f64::from(progress.max(0.0)),
            direction,
            fully_charged: false,
        }
    }

    pub fn start_time(&self) -> f64 {
        self.start_time
    }

    pub fn direction(&self) -> Facing {
        self.direction
    }

    pub fn is_fully_charged(&self) -> bool {
        self.fully_charged
    }

    /// Charge time at `now`, clamped to `max`.
    pub fn elapsed(&self, now: f64, max: f32) -> f32 {
        clamped_elapsed(self.start_time, now, max)
    }

    /// Sample the charge and latch `fully_charged` once `max` is reached.
    pub fn refresh(&mut self, now: f64, max: f32) -> f32 {
        let elapsed = self.elapsed(now, max);
        if elapsed >= max {
            self.fully_charged = true;
        }
        elapsed
    }

    /// Move the session into another time basis, keeping the fraction charged.
    pub fn rebase(&mut self, now: f64, from_max: f32, to_max: f32) {
        let progress = rebase(self.elapsed(now, from_max), from_max, to_max);
        self.start_time = now - f64::from(progress);
        self.fully_charged = progress >= to_max;
    }
}

/// Charge gathered in the air, waiting to be resumed or spent on landing.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Default)]
pub struct StoredCharge {
    progress: f32,
}

impl StoredCharge {
    /// Store `progress` seconds, clamped to `[0, max]`.
    pub fn store(&mut self, progress: f32, max: f32) {
        self.progress = progress.clamp(0.0, max.max(0.0));
    }

    pub fn progress(&self) -> f32 {
        self.progress
    }

    pub fn is_empty(&self) -> bool {
        self.progress <= 0.0
    }

    /// Consume the stored progress, leaving the store empty.
    pub fn take(&mut self) -> f32 {
        std::mem::take(&mut self.progress)
    }

    pub fn clear(&mut self) {
        self.progress = 0.0;
    }
}

/// Time box after a charged jump during which one wall bounce is allowed.
#[derive(Reflect, Debug, Clone, Copy, PartialEq)]
pub struct BounceWindow {
    end_time: f64,
    has_bounced: bool,
}

impl BounceWindow {
    pub fn open(now: f64, duration: f32) -> Self {
        Self {
            end_time: now + f64::from(duration.max(0.0)),
            has_bounced: false,
        }
    }

    pub fn end_time(&self) -> f64 {
        self.end_time
    }

    pub fn has_bounced(&self) -> bool {
        self.has_bounced
    }

    pub fn is_open(&self, now: f64) -> bool {
        now <= self.end_time
    }

    /// Claim the window's bounce. Returns `false` once the bounce has been
    /// used or the window has expired.
    pub fn try_bounce(&mut self, now: f64) -> bool {
        if self.has_bounced || !self.is_open(now) {
            return false;
        }
        self.has_bounced = true;
        true
    }
}
