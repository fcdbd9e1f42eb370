//! Observer synchronization.
//!
//! The owning client is the only authority on jump state. It publishes a
//! compact [`JumpSnapshot`] whenever the [`JumpState`] changes and, while a
//! charge is active, on a fixed interval. Observers apply those snapshots to
//! a [`ChargeObserver`], which only drives a cosmetic charge bar.
//!
//! The channel is one-way and best-effort: a lost or reordered snapshot
//! makes a spectator's bar less accurate and never affects gameplay.
//! Moving snapshots between clients is left to the game's transport; the
//! plugin emits [`JumpSnapshotPublished`] and consumes
//! [`JumpSnapshotReceived`].

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config::JumpConfig;
use crate::machine::{ChargeJump, JumpState};

/// State pushed from the owner to observers.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct JumpSnapshot {
    /// Increments with every snapshot from one owner; wraps around.
    pub sequence: u32,
    pub state: JumpState,
    pub is_charging: bool,
    /// Charge fraction (0.0-1.0).
    pub charge_progress: f32,
    pub fully_charged: bool,
}

impl JumpSnapshot {
    pub fn capture(jump: &ChargeJump, sequence: u32) -> Self {
        Self {
            sequence,
            state: jump.state(),
            is_charging: jump.is_charging(),
            charge_progress: jump.charge_progress(),
            fully_charged: jump.is_fully_charged(),
        }
    }

    /// Whether this snapshot was published after `other`, allowing for
    /// sequence wrap-around.
    pub fn is_newer_than(&self, other: u32) -> bool {
        (self.sequence.wrapping_sub(other) as i32) > 0
    }
}

/// Owner-side publish bookkeeping.
#[derive(Component, Reflect, Debug, Clone, Default)]
#[reflect(Component)]
pub struct SnapshotPublisher {
    last_state: Option<JumpState>,
    since_push: f32,
    next_sequence: u32,
}

impl SnapshotPublisher {
    /// Return a snapshot if one is due: on every state change, and every
    /// `push_interval` seconds while charging.
    pub fn poll(&mut self, jump: &ChargeJump, dt: f32) -> Option<JumpSnapshot> {
        self.since_push += dt.max(0.0);

        let state = jump.state();
        let changed = self.last_state != Some(state);
        let periodic = jump.is_charging() && self.since_push >= jump.config().sync.push_interval;
        if !changed && !periodic {
            return None;
        }

        self.last_state = Some(state);
        self.since_push = 0.0;
        let snapshot = JumpSnapshot::capture(jump, self.next_sequence);
        self.next_sequence = self.next_sequence.wrapping_add(1);
        Some(snapshot)
    }
}

/// Observer-side replica of another player's charge bar.
#[derive(Component, Reflect, Debug, Clone)]
#[reflect(Component)]
pub struct ChargeObserver {
    state: JumpState,
    is_charging: bool,
    fully_charged: bool,
    target_progress: f32,
    displayed_progress: f32,
    last_sequence: Option<u32>,
    max_charge_time: f32,
    max_wall_charge_time: f32,
    smoothing_rate: f32,
}

impl Default for ChargeObserver {
    fn default() -> Self {
        Self::new(&JumpConfig::default())
    }
}

impl ChargeObserver {
    /// Observer using the same tuning as the owner.
    pub fn new(config: &JumpConfig) -> Self {
        Self {
            state: JumpState::Idle,
            is_charging: false,
            fully_charged: false,
            target_progress: 0.0,
            displayed_progress: 0.0,
            last_sequence: None,
            max_charge_time: config.charge.max_charge_time,
            max_wall_charge_time: config.wall.max_wall_charge_time,
            smoothing_rate: config.sync.smoothing_rate,
        }
    }

    pub fn state(&self) -> JumpState {
        self.state
    }

    pub fn is_charging(&self) -> bool {
        self.is_charging
    }

    pub fn is_fully_charged(&self) -> bool {
        self.fully_charged
    }

    /// Latest authoritative (or extrapolated) progress.
    pub fn target_progress(&self) -> f32 {
        self.target_progress
    }

    /// Progress to draw this frame.
    pub fn displayed_progress(&self) -> f32 {
        self.displayed_progress
    }

    /// Apply a received snapshot. Snapshots older than the last applied one
    /// are dropped; returns whether it was applied.
    pub fn apply(&mut self, snapshot: &JumpSnapshot) -> bool {
        if let Some(last) = self.last_sequence {
            if !snapshot.is_newer_than(last) {
                trace!(sequence = snapshot.sequence, last, "dropped stale jump snapshot");
                return false;
            }
        }

        self.last_sequence = Some(snapshot.sequence);
        self.state = snapshot.state;
        self.is_charging = snapshot.is_charging;
        self.fully_charged = snapshot.fully_charged;
        self.target_progress = snapshot.charge_progress.clamp(0.0, 1.0);
        true
    }

    /// Advance the replica by `dt` seconds.
    ///
    /// While charging, the target keeps growing at the owner's charge rate
    /// between snapshots. The displayed value eases toward the target and
    /// never jumps to it.
    pub fn advance(&mut self, dt: f32) {
        let dt = dt.max(0.0);

        if self.is_charging && !self.fully_charged {
            let basis = match self.state {
                JumpState::WallCharging => self.max_wall_charge_time,
                _ => self.max_charge_time,
            };
            if basis > 0.0 {
                self.target_progress = (self.target_progress + dt / basis).min(1.0);
            }
        }

        let blend = 1.0 - (-self.smoothing_rate * dt).exp();
        self.displayed_progress += (self.target_progress - self.displayed_progress) * blend;
    }
}

/// A snapshot left an owning character; hand it to the transport.
#[derive(Message, Debug, Clone, Copy)]
pub struct JumpSnapshotPublished {
    pub entity: Entity,
    pub snapshot: JumpSnapshot,
}

/// A snapshot arrived for an observer entity; written by the transport.
#[derive(Message, Debug, Clone, Copy)]
pub struct JumpSnapshotReceived {
    pub observer: Entity,
    pub snapshot: JumpSnapshot,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::JumpCommands;
    use crate::signals::JumpSignals;

    fn snapshot(sequence: u32, state: JumpState, progress: f32) -> JumpSnapshot {
        JumpSnapshot {
            sequence,
            state,
            is_charging: state.is_charging(),
            charge_progress: progress,
            fully_charged: progress >= 1.0,
        }
    }

    #[test]
    fn publisher_pushes_once_per_state_change() {
        let mut jump = ChargeJump::default();
        let mut out = JumpCommands::default();
        let mut publisher = SnapshotPublisher::default();

        // Initial state is always announced.
        assert!(publisher.poll(&jump, 0.0).is_some());
        assert!(publisher.poll(&jump, 0.016).is_none());

        jump.tick(0.0, &JumpSignals::grounded(), &mut out);
        jump.tick(0.016, &JumpSignals::grounded().pressing(), &mut out);
        let pushed = publisher.poll(&jump, 0.016).unwrap();
        assert_eq!(pushed.state, JumpState::Charging);
        assert!(pushed.is_charging);
        assert_eq!(pushed.sequence, 1);
    }

    #[test]
    fn publisher_pushes_periodically_while_charging() {
        let mut jump = ChargeJump::default();
        let mut out = JumpCommands::default();
        let mut publisher = SnapshotPublisher::default();
        jump.tick(0.0, &JumpSignals::grounded(), &mut out);
        jump.tick(0.01, &JumpSignals::grounded().pressing(), &mut out);
        publisher.poll(&jump, 0.0);

        let mut pushes = 0;
        for _ in 0..60 {
            jump.tick(0.01, &JumpSignals::grounded().holding(), &mut out);
            if publisher.poll(&jump, 0.01).is_some() {
                pushes += 1;
            }
        }
        // 0.6s of charging at a 0.1s interval.
        assert!((5..=6).contains(&pushes), "pushes = {pushes}");
    }

    #[test]
    fn publisher_is_quiet_while_idle() {
        let jump = ChargeJump::default();
        let mut publisher = SnapshotPublisher::default();
        publisher.poll(&jump, 0.0);
        for _ in 0..100 {
            assert!(publisher.poll(&jump, 0.05).is_none());
        }
    }

    #[test]
    fn observer_applies_flags_immediately() {
        let mut observer = ChargeObserver::default();
        assert!(observer.apply(&snapshot(0, JumpState::Charging, 0.4)));
        assert!(observer.is_charging());
        assert_eq!(observer.state(), JumpState::Charging);
        assert_eq!(observer.target_progress(), 0.4);
        assert_eq!(observer.displayed_progress(), 0.0);
    }

    #[test]
    fn observer_smooths_without_snapping() {
        let config = JumpConfig::default();
        let mut observer = ChargeObserver::new(&config);
        observer.apply(&snapshot(0, JumpState::Idle, 0.8));

        let mut previous = observer.displayed_progress();
        for _ in 0..30 {
            observer.advance(1.0 / 60.0);
            let shown = observer.displayed_progress();
            assert!(shown > previous);
            assert!(shown < 0.8);
            previous = shown;
        }
    }

    #[test]
    fn observer_drops_stale_snapshots() {
        let mut observer = ChargeObserver::default();
        assert!(observer.apply(&snapshot(5, JumpState::Charging, 0.5)));
        assert!(!observer.apply(&snapshot(4, JumpState::Idle, 0.0)));
        assert!(!observer.apply(&snapshot(5, JumpState::Idle, 0.0)));
        assert_eq!(observer.state(), JumpState::Charging);
        assert!(observer.apply(&snapshot(6, JumpState::Bouncing, 0.0)));
    }

    #[test]
    fn sequence_comparison_wraps() {
        let wrapped = snapshot(2, JumpState::Idle, 0.0);
        assert!(wrapped.is_newer_than(u32::MAX - 1));
        assert!(!snapshot(u32::MAX, JumpState::Idle, 0.0).is_newer_than(3));
    }

    #[test]
    fn observer_extrapolates_between_snapshots() {
        let config = JumpConfig::default().with_max_charge_time(2.0);
        let mut observer = ChargeObserver::new(&config);
        observer.apply(&snapshot(0, JumpState::Charging, 0.25));

        for _ in 0..10 {
            observer.advance(0.05);
        }
        // Half a second at 2s per full charge.
        assert!((observer.target_progress() - 0.5).abs() < 1e-4);

        for _ in 0..100 {
            observer.advance(0.05);
        }
        assert_eq!(observer.target_progress(), 1.0);
    }

    #[test]
    fn snapshot_serializes() {
        let snapshot = snapshot(7, JumpState::WallCharging, 0.5);
        let json = serde_json::to_string(&snapshot).unwrap();
        let decoded: JumpSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, snapshot);
    }
}
