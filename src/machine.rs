//! The charge-jump state machine.
//!
//! [`ChargeJump`] is the authoritative jump state of one character. Each
//! frame it is fed a [`JumpSignals`] snapshot and writes what it wants done
//! into [`JumpCommands`]. All timestamps live on the machine's own clock,
//! which only advances on unpaused ticks, so pausing freezes every charge,
//! cooldown and bounce window exactly where it was.
//!
//! Transitions are evaluated in this order every tick:
//!
//! 1. grounded flip false→true: [landing reconciliation](ChargeJump::on_landing)
//! 2. press edge (only from [`JumpState::Idle`])
//! 3. release edge
//! 4. continuous checks (wall contact, max charge, leaving the ground,
//!    bounce window, post-wall-jump detach)
//!
//! Invalid triggers are silent no-ops.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::commands::{ChargeIndicator, JumpCommands, JumpMovementModifiers};
use crate::config::{JumpConfig, JumpConfigError};
use crate::detection::{JumpSensors, WallSide};
use crate::intent::JumpInput;
use crate::session::{BounceWindow, ChargeSession, Facing, StoredCharge};
use crate::signals::JumpSignals;
use crate::sync::SnapshotPublisher;
use crate::timer::{lerp_clamped, progress_fraction, rebase, seconds_between};

/// Horizontal speed below which the character counts as standing still when
/// capturing a charge direction.
pub(crate) const DIRECTION_EPSILON: f32 = 1e-3;

/// Aerial / charge state of a character.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum JumpState {
    /// No charge in progress and no bounce window open.
    #[default]
    Idle,
    /// Charging a ground jump.
    Charging,
    /// Charging while airborne; the jump waits for ground contact.
    Buffered,
    /// Charging a wall jump while sliding on a wall.
    WallCharging,
    /// A charged jump just fired; touching a wall now bounces.
    Bouncing,
}

impl JumpState {
    pub fn is_charging(self) -> bool {
        matches!(self, Self::Charging | Self::Buffered | Self::WallCharging)
    }
}

/// Authoritative charge-jump state machine of one character.
///
/// # Example
///
/// ```rust
/// use msg_charge_jump::prelude::*;
///
/// let config = JumpConfig::default().with_jump_cooldown(0.0);
/// let mut jump = ChargeJump::new(config).unwrap();
/// let mut commands = JumpCommands::default();
///
/// jump.tick(0.0, &JumpSignals::grounded(), &mut commands);
/// jump.tick(0.1, &JumpSignals::grounded().pressing(), &mut commands);
/// assert_eq!(jump.state(), JumpState::Charging);
///
/// jump.tick(0.5, &JumpSignals::grounded().releasing(), &mut commands);
/// assert_eq!(jump.state(), JumpState::Bouncing);
/// assert!(commands.take_impulse().is_some());
/// ```
#[derive(Component, Reflect, Debug, Clone)]
#[reflect(Component)]
#[require(
    JumpInput,
    JumpSensors,
    JumpCommands,
    ChargeIndicator,
    JumpMovementModifiers,
    SnapshotPublisher
)]
pub struct ChargeJump {
    pub(crate) config: JumpConfig,
    pub(crate) state: JumpState,
    pub(crate) clock: f64,
    pub(crate) session: Option<ChargeSession>,
    pub(crate) stored: StoredCharge,
    pub(crate) bounce: Option<BounceWindow>,
    /// A buffered charge was released in the air and fires on landing.
    pub(crate) release_pending: bool,
    pub(crate) last_jump_time: Option<f64>,
    pub(crate) last_grounded_time: Option<f64>,
    pub(crate) was_grounded: bool,
    pub(crate) last_wall: WallSide,
    /// Wall the current wall charge is anchored to.
    pub(crate) charge_wall: WallSide,
    /// Wall of a vertical wall jump that has not detached yet.
    pub(crate) post_wall_jump: Option<WallSide>,
}

impl Default for ChargeJump {
    fn default() -> Self {
        Self::from_config(JumpConfig::default())
    }
}

impl ChargeJump {
    /// Create a machine, rejecting configurations that cannot drive it.
    pub fn new(config: JumpConfig) -> Result<Self, JumpConfigError> {
        config.validate()?;
        Ok(Self::from_config(config))
    }

    fn from_config(config: JumpConfig) -> Self {
        Self {
            config,
            state: JumpState::Idle,
            clock: 0.0,
            session: None,
            stored: StoredCharge::default(),
            bounce: None,
            release_pending: false,
            last_jump_time: None,
            last_grounded_time: None,
            was_grounded: false,
            last_wall: WallSide::None,
            charge_wall: WallSide::None,
            post_wall_jump: None,
        }
    }

    pub fn config(&self) -> &JumpConfig {
        &self.config
    }

    pub fn state(&self) -> JumpState {
        self.state
    }

    /// Seconds of unpaused ticks since the machine was created.
    pub fn clock(&self) -> f64 {
        self.clock
    }

    pub fn session(&self) -> Option<&ChargeSession> {
        self.session.as_ref()
    }

    /// Seconds of charge stored for landing.
    pub fn stored_charge(&self) -> f32 {
        self.stored.progress()
    }

    pub fn bounce_window(&self) -> Option<BounceWindow> {
        self.bounce
    }

    pub fn is_release_pending(&self) -> bool {
        self.release_pending
    }

    pub fn is_post_wall_jump(&self) -> bool {
        self.post_wall_jump.is_some()
    }

    pub fn is_charging(&self) -> bool {
        self.state.is_charging()
    }

    /// Whether air charge is waiting for ground contact, either still being
    /// charged or already released.
    pub fn has_buffered_charge_in_air(&self) -> bool {
        self.state == JumpState::Buffered
            || (self.state == JumpState::Idle && (!self.stored.is_empty() || self.release_pending))
    }

    pub fn is_on_cooldown(&self) -> bool {
        self.last_jump_time
            .is_some_and(|t| seconds_between(t, self.clock) < self.config.charge.jump_cooldown)
    }

    pub fn is_fully_charged(&self) -> bool {
        self.session.is_some_and(|s| s.is_fully_charged())
    }

    /// Max charge time of the active state's time basis.
    fn charge_basis(&self) -> f32 {
        match self.state {
            JumpState::WallCharging => self.config.wall.max_wall_charge_time,
            _ => self.config.charge.max_charge_time,
        }
    }

    /// Seconds charged so far in the active session.
    pub fn charge_time(&self) -> f32 {
        self.session
            .map(|s| s.elapsed(self.clock, self.charge_basis()))
            .unwrap_or(0.0)
    }

    /// Charge fraction (0.0-1.0) for display. A charge stored in the air is
    /// reported while it waits for landing.
    pub fn charge_progress(&self) -> f32 {
        if self.session.is_some() {
            progress_fraction(self.charge_time(), self.charge_basis())
        } else if self.state == JumpState::Idle && !self.stored.is_empty() {
            progress_fraction(self.stored.progress(), self.config.charge.max_charge_time)
        } else {
            0.0
        }
    }

    /// `(speed, acceleration)` multipliers for the movement controller.
    pub fn movement_multipliers(&self) -> (f32, f32) {
        let throttle = &self.config.throttle;
        if self.state == JumpState::WallCharging || self.post_wall_jump.is_some() {
            (throttle.wall_speed, throttle.wall_acceleration)
        } else if self.state == JumpState::Charging {
            (throttle.charging_speed, throttle.charging_acceleration)
        } else {
            (1.0, 1.0)
        }
    }

    /// Advance the machine by `dt` seconds.
    pub fn tick(&mut self, dt: f32, signals: &JumpSignals, out: &mut JumpCommands) {
        if signals.paused {
            return;
        }

        self.clock += f64::from(dt.max(0.0));
        if signals.grounded {
            self.last_grounded_time = Some(self.clock);
        }

        if !self.was_grounded && signals.grounded {
            self.on_landing(false, true, signals, out);
        }
        self.was_grounded = signals.grounded;

        self.handle_press(signals);
        self.handle_release(signals, out);
        self.update_continuous(signals, out);

        self.last_wall = signals.wall;
        self.publish_indicator(out);
    }

    fn handle_press(&mut self, signals: &JumpSignals) {
        if !signals.pressed || self.state != JumpState::Idle || self.is_on_cooldown() {
            return;
        }

        let now = self.clock;
        let direction = Facing::from_value(signals.velocity.x, DIRECTION_EPSILON);

        if self.is_wall_sliding(signals) {
            // Wall and ground charge pools are independent; a pending air
            // charge is abandoned once the wall is grabbed.
            self.stored.clear();
            self.release_pending = false;
            self.session = Some(ChargeSession::start(now, Facing::Neutral));
            self.charge_wall = signals.wall;
            self.state = JumpState::WallCharging;
            debug!(wall = ?signals.wall, "wall charge started");
        } else if signals.grounded || self.in_coyote_time() {
            self.stored.clear();
            self.release_pending = false;
            self.session = Some(ChargeSession::start(now, direction));
            self.state = JumpState::Charging;
            debug!(grounded = signals.grounded, "ground charge started");
        } else if !self.stored.is_empty() {
            let progress = self.stored.take();
            self.release_pending = false;
            self.session = Some(ChargeSession::resume(now, progress, direction));
            self.state = JumpState::Buffered;
            debug!(progress, "air charge resumed");
        } else {
            self.session = Some(ChargeSession::start(now, direction));
            self.state = JumpState::Buffered;
            debug!("air charge started");
        }
    }

    fn handle_release(&mut self, signals: &JumpSignals, out: &mut JumpCommands) {
        if !signals.released {
            return;
        }

        match self.state {
            JumpState::Charging => {
                let charge = self.charge_time();
                self.execute_jump(charge, signals, out);
            }
            JumpState::Buffered if signals.grounded => {
                let charge = self.charge_time();
                self.execute_jump(charge, signals, out);
            }
            JumpState::Buffered => {
                let charge = self.charge_time();
                self.stored.store(charge, self.config.charge.max_charge_time);
                self.release_pending = true;
                self.session = None;
                self.state = JumpState::Idle;
                out.set_queued_flag(true);
                debug!(charge, "air charge released, jump queued for landing");
            }
            JumpState::WallCharging => {
                let charge = self.charge_time();
                self.execute_wall_jump(charge, signals, out);
            }
            JumpState::Idle | JumpState::Bouncing => {}
        }
    }

    fn update_continuous(&mut self, signals: &JumpSignals, out: &mut JumpCommands) {
        let now = self.clock;
        let basis = self.charge_basis();

        match self.state {
            JumpState::Charging => {
                if !signals.grounded {
                    // Walked off an edge (or a coyote press): fire with what
                    // has been charged so far.
                    let charge = self.charge_time();
                    debug!(charge, "left the ground while charging");
                    self.execute_jump(charge, signals, out);
                } else if signals.wall.is_touching() && !self.last_wall.is_touching() {
                    self.convert_to_wall_jump(signals.wall);
                } else if let Some(session) = self.session.as_mut() {
                    let charge = session.refresh(now, basis);
                    if session.is_fully_charged() {
                        debug!(charge, "max charge reached");
                        self.execute_jump(charge, signals, out);
                    }
                }
            }
            JumpState::Buffered => {
                if let Some(session) = self.session.as_mut() {
                    session.refresh(now, basis);
                }
            }
            JumpState::WallCharging => {
                if !signals.wall.is_touching() {
                    self.cancel_charge(signals.grounded);
                } else if let Some(session) = self.session.as_mut() {
                    session.refresh(now, basis);
                }
            }
            JumpState::Bouncing => self.update_bounce(signals, out),
            JumpState::Idle => self.update_wall_detach(signals, out),
        }
    }

    fn update_bounce(&mut self, signals: &JumpSignals, out: &mut JumpCommands) {
        let now = self.clock;
        let Some(window) = self.bounce.as_mut() else {
            self.state = JumpState::Idle;
            return;
        };

        if !window.is_open(now) {
            self.bounce = None;
            self.state = JumpState::Idle;
            return;
        }

        // Only a wall met during the arc bounces; a wall the character was
        // already touching when it jumped is slid along.
        let new_contact = signals.wall.is_touching() && !self.last_wall.is_touching();
        if signals.grounded || !new_contact || !window.try_bounce(now) {
            return;
        }

        let bounce = &self.config.bounce;
        let direction = -signals.wall.sign();
        let velocity = signals.velocity;

        let mut speed = bounce.wall_bounce_force;
        if bounce.preserve_momentum && velocity.x * direction > 0.0 {
            speed = speed.max(velocity.x.abs() * bounce.momentum_preservation);
        }
        let vertical = velocity.y.max(0.0) + bounce.wall_bounce_force * bounce.vertical_multiplier;

        out.apply_impulse(Some(direction * speed), Some(vertical));
        self.bounce = None;
        self.state = JumpState::Idle;
        debug!(wall = ?signals.wall, speed, vertical, "wall bounce");
    }

    fn update_wall_detach(&mut self, signals: &JumpSignals, out: &mut JumpCommands) {
        let Some(wall) = self.post_wall_jump else {
            return;
        };
        if signals.grounded
            || !wall.pushes_away(signals.horizontal_input, self.config.charge.input_deadzone)
        {
            return;
        }

        out.apply_impulse(Some(-wall.sign() * self.config.wall.wall_detach_force), None);
        self.post_wall_jump = None;
        debug!(?wall, "detached from wall after vertical wall jump");
    }

    fn is_wall_sliding(&self, signals: &JumpSignals) -> bool {
        self.config.wall.enabled
            && !signals.grounded
            && signals.wall.is_touching()
            && signals.wall_contact_duration >= self.config.wall.min_wall_contact_time
    }

    /// Recently grounded, and no jump has fired since.
    fn in_coyote_time(&self) -> bool {
        let Some(grounded_at) = self.last_grounded_time else {
            return false;
        };
        let jumped_since = self.last_jump_time.is_some_and(|t| t >= grounded_at);
        !jumped_since && seconds_between(grounded_at, self.clock) <= self.config.charge.coyote_time
    }

    /// Fire a ground jump with `charge` seconds of charge.
    pub(crate) fn execute_jump(&mut self, charge: f32, signals: &JumpSignals, out: &mut JumpCommands) {
        let c = &self.config.charge;
        let fraction = progress_fraction(charge, c.max_charge_time);
        let mut force = lerp_clamped(c.min_jump_force, c.max_jump_force, fraction);
        if signals.catnip {
            force *= c.catnip_multiplier;
        }

        let direction = self.session.map(|s| s.direction()).unwrap_or_default();
        let input = Facing::from_value(signals.horizontal_input, c.input_deadzone);
        let vx = direction.opposes(input).then_some(0.0);
        out.apply_impulse(vx, Some(force));

        let now = self.clock;
        self.session = None;
        self.stored.clear();
        self.release_pending = false;
        self.last_jump_time = Some(now);
        self.bounce = Some(BounceWindow::open(now, self.config.bounce.wall_bounce_window));
        self.state = JumpState::Bouncing;
        debug!(force, charge, cancel_momentum = vx.is_some(), "charged jump");
    }

    /// Fire a wall jump with `charge` seconds of wall charge.
    pub(crate) fn execute_wall_jump(
        &mut self,
        charge: f32,
        signals: &JumpSignals,
        out: &mut JumpCommands,
    ) {
        let w = &self.config.wall;
        let fraction = progress_fraction(charge, w.max_wall_charge_time);
        let vertical = lerp_clamped(w.min_wall_jump_force, w.max_wall_jump_force, fraction);

        let wall = if signals.wall.is_touching() {
            signals.wall
        } else {
            self.charge_wall
        };

        if wall.pushes_away(signals.horizontal_input, self.config.charge.input_deadzone) {
            out.apply_impulse(Some(-wall.sign() * w.wall_detach_force), Some(vertical));
            self.post_wall_jump = None;
        } else {
            out.apply_impulse(None, Some(vertical));
            self.post_wall_jump = wall.is_touching().then_some(wall);
        }

        self.session = None;
        self.charge_wall = WallSide::None;
        self.last_jump_time = Some(self.clock);
        self.state = JumpState::Idle;
        debug!(vertical, charge, ?wall, detached = self.post_wall_jump.is_none(), "wall jump");
    }

    /// Cancel the active charge.
    ///
    /// When airborne the charge is kept in the store (converted to the
    /// ground time basis) so it can be resumed or spent on landing.
    pub fn cancel_charge(&mut self, grounded: bool) {
        if !self.state.is_charging() {
            return;
        }

        if let Some(session) = self.session.take() {
            if !grounded {
                let ground_max = self.config.charge.max_charge_time;
                let mut progress = session.elapsed(self.clock, self.charge_basis());
                if self.state == JumpState::WallCharging {
                    progress = rebase(progress, self.config.wall.max_wall_charge_time, ground_max);
                }
                self.stored.store(progress, ground_max);
            }
        }

        self.charge_wall = WallSide::None;
        self.state = JumpState::Idle;
        debug!(stored = self.stored.progress(), "charge cancelled");
    }

    /// Turn a ground charge into a wall charge against `wall`, keeping the
    /// charged fraction.
    pub fn convert_to_wall_jump(&mut self, wall: WallSide) {
        if self.state != JumpState::Charging || !wall.is_touching() || !self.config.wall.enabled {
            return;
        }

        let now = self.clock;
        let from = self.config.charge.max_charge_time;
        let to = self.config.wall.max_wall_charge_time;
        if let Some(session) = self.session.as_mut() {
            session.rebase(now, from, to);
        }
        self.charge_wall = wall;
        self.state = JumpState::WallCharging;
        debug!(?wall, "ground charge converted to wall charge");
    }

    /// Drop every trace of the current charge without firing.
    pub(crate) fn discard_charge(&mut self) {
        self.session = None;
        self.stored.clear();
        self.release_pending = false;
        self.charge_wall = WallSide::None;
        if self.state.is_charging() {
            self.state = JumpState::Idle;
        }
    }

    fn publish_indicator(&self, out: &mut JumpCommands) {
        out.set_charge_indicator(self.is_charging(), self.charge_progress(), self.is_fully_charged());
        out.set_queued_flag(self.has_buffered_charge_in_air() && self.state == JumpState::Idle);
    }
}
