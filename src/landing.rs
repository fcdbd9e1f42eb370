//! Landing reconciliation.
//!
//! When a character touches down, whatever charge or bounce state it
//! carried through the air has to be resolved exactly once: fire the
//! waiting jump, keep charging on the ground, or drop the charge because
//! the character grabbed a wall instead of landing cleanly.

use bevy::prelude::*;

use crate::commands::JumpCommands;
use crate::machine::{ChargeJump, DIRECTION_EPSILON, JumpState};
use crate::session::{ChargeSession, Facing};
use crate::signals::JumpSignals;

/// How a landing was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LandingOutcome {
    /// The call was not a false→true grounded flip.
    NotALanding,
    /// Nothing was in flight.
    Plain,
    /// Landed against a wall with air charge; the charge was dropped.
    CancelledAtWall,
    /// A wall charge was still active; it was dropped.
    CancelledWallCharge,
    /// The waiting jump fired.
    Fired,
    /// The button is still held; charging continues on the ground.
    ContinuedCharging,
}

impl ChargeJump {
    /// Resolve a grounded flip.
    ///
    /// [`tick`](ChargeJump::tick) calls this once per false→true flip of
    /// `signals.grounded`. Collaborators that detect landings themselves may
    /// call it directly; the machine then treats itself as grounded and the
    /// next tick does not resolve the same landing again.
    pub fn on_landing(
        &mut self,
        was_grounded: bool,
        is_grounded_now: bool,
        signals: &JumpSignals,
        out: &mut JumpCommands,
    ) -> LandingOutcome {
        if was_grounded || !is_grounded_now {
            return LandingOutcome::NotALanding;
        }
        self.was_grounded = true;

        if self.state == JumpState::Bouncing {
            self.bounce = None;
            self.state = JumpState::Idle;
        }

        let touching_wall = signals.wall.is_touching();
        let outcome = if touching_wall
            && (self.state == JumpState::Buffered || !self.stored.is_empty())
        {
            self.discard_charge();
            LandingOutcome::CancelledAtWall
        } else if self.state == JumpState::WallCharging {
            self.discard_charge();
            LandingOutcome::CancelledWallCharge
        } else if self.state == JumpState::Charging {
            let charge = self.charge_time();
            self.execute_jump(charge, signals, out);
            LandingOutcome::Fired
        } else if self.state == JumpState::Buffered {
            if signals.held {
                // Same session, same start time: the air charge keeps growing.
                self.state = JumpState::Charging;
                LandingOutcome::ContinuedCharging
            } else {
                let charge = self.charge_time();
                self.execute_jump(charge, signals, out);
                LandingOutcome::Fired
            }
        } else if !self.stored.is_empty() {
            let progress = self.stored.take();
            if signals.held {
                let direction = Facing::from_value(signals.velocity.x, DIRECTION_EPSILON);
                self.session = Some(ChargeSession::resume(self.clock, progress, direction));
                self.release_pending = false;
                self.state = JumpState::Charging;
                LandingOutcome::ContinuedCharging
            } else {
                self.execute_jump(progress, signals, out);
                LandingOutcome::Fired
            }
        } else if self.release_pending {
            self.execute_jump(0.0, signals, out);
            LandingOutcome::Fired
        } else {
            LandingOutcome::Plain
        };

        self.release_pending = false;
        self.post_wall_jump = None;
        out.set_queued_flag(false);

        if outcome != LandingOutcome::Plain {
            debug!(?outcome, state = ?self.state, "landing reconciled");
        }
        outcome
    }
}
