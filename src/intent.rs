//! Jump input components.
//!
//! Input collaborators (keyboard, gamepad, AI) write the jump button state
//! and horizontal axis here. The crate latches button edges once per frame
//! before the jump machine runs.

use bevy::prelude::*;

/// Jump button and horizontal axis for one character.
///
/// # Example
///
/// ```rust
/// use msg_charge_jump::prelude::*;
///
/// let mut input = JumpInput::new();
/// input.press();
/// input.latch_edges();
/// assert!(input.just_pressed());
/// assert!(input.is_held());
///
/// input.latch_edges();
/// assert!(!input.just_pressed());
///
/// input.release();
/// input.latch_edges();
/// assert!(input.just_released());
/// ```
#[derive(Component, Reflect, Debug, Clone, Copy, Default)]
#[reflect(Component)]
pub struct JumpInput {
    /// Horizontal input (-1.0 = left, 1.0 = right).
    pub axis: f32,
    held: bool,
    was_held: bool,
    pending_press: bool,
    pending_release: bool,
    pressed: bool,
    released: bool,
}

impl JumpInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Press the jump button. A press followed by a release within the same
    /// frame still produces both edges.
    pub fn press(&mut self) {
        if !self.held {
            self.pending_press = true;
        }
        self.held = true;
    }

    /// Release the jump button.
    pub fn release(&mut self) {
        if self.held {
            self.pending_release = true;
        }
        self.held = false;
    }

    /// Set the button from a polled "is down" value.
    pub fn set_held(&mut self, held: bool) {
        if held {
            self.press();
        } else {
            self.release();
        }
    }

    /// Set the horizontal axis (-1.0 = left, 1.0 = right).
    pub fn set_axis(&mut self, axis: f32) {
        self.axis = axis.clamp(-1.0, 1.0);
    }

    /// Compute this frame's edges from the button changes since the last latch.
    pub fn latch_edges(&mut self) {
        self.pressed = self.pending_press || (self.held && !self.was_held);
        self.released = self.pending_release || (!self.held && self.was_held);
        self.pending_press = false;
        self.pending_release = false;
        self.was_held = self.held;
    }

    pub fn just_pressed(&self) -> bool {
        self.pressed
    }

    pub fn just_released(&self) -> bool {
        self.released
    }

    pub fn is_held(&self) -> bool {
        self.held
    }
}

/// Marker for an active catnip power-up; scales ground jump force by
/// [`ChargeConfig::catnip_multiplier`](crate::config::ChargeConfig::catnip_multiplier).
#[derive(Component, Reflect, Debug, Clone, Copy, Default)]
#[reflect(Component)]
pub struct CatnipBuff;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn jump_input_default() {
        let input = JumpInput::new();
        assert!(!input.is_held());
        assert!(!input.just_pressed());
        assert!(!input.just_released());
        assert_eq!(input.axis, 0.0);
    }

    #[test]
    fn edges_last_one_latch() {
        let mut input = JumpInput::new();
        input.press();
        input.latch_edges();
        assert!(input.just_pressed());

        input.latch_edges();
        assert!(!input.just_pressed());
        assert!(input.is_held());
    }

    #[test]
    fn tap_within_one_frame_yields_both_edges() {
        let mut input = JumpInput::new();
        input.press();
        input.release();
        input.latch_edges();

        assert!(input.just_pressed());
        assert!(input.just_released());
        assert!(!input.is_held());
    }

    #[test]
    fn repeated_press_is_one_edge() {
        let mut input = JumpInput::new();
        input.press();
        input.latch_edges();
        input.press();
        input.latch_edges();
        assert!(!input.just_pressed());
    }

    #[test]
    fn release_without_press_is_ignored() {
        let mut input = JumpInput::new();
        input.release();
        input.latch_edges();
        assert!(!input.just_released());
    }

    #[test]
    fn polled_held_state_produces_edges() {
        let mut input = JumpInput::new();
        input.set_held(true);
        input.latch_edges();
        assert!(input.just_pressed());

        input.set_held(true);
        input.latch_edges();
        assert!(!input.just_pressed());

        input.set_held(false);
        input.latch_edges();
        assert!(input.just_released());
    }

    #[test]
    fn axis_is_clamped() {
        let mut input = JumpInput::new();
        input.set_axis(5.0);
        assert_eq!(input.axis, 1.0);
        input.set_axis(-5.0);
        assert_eq!(input.axis, -1.0);
    }
}
