//! Clamped elapsed-time helpers.
//!
//! Every timer in the crate is sampled as `now - start` on the owning
//! machine's clock. Timestamps are `f64` seconds so a clock that has run for
//! days still resolves a single frame; only the difference is narrowed to
//! `f32`. These helpers keep the sampled values inside their valid range so
//! floating-point overshoot never yields more than a full charge.

/// Elapsed time since `start`, clamped to `[0, max]`.
pub fn clamped_elapsed(start: f64, now: f64, max: f32) -> f32 {
    seconds_between(start, now).clamp(0.0, max.max(0.0))
}

/// `now - then` in seconds, narrowed to `f32`.
pub fn seconds_between(then: f64, now: f64) -> f32 {
    (now - then) as f32
}

/// Fraction of `max` covered by `elapsed`, clamped to `[0, 1]`.
///
/// A non-positive `max` means the charge is instantly full.
pub fn progress_fraction(elapsed: f32, max: f32) -> f32 {
    if max <= 0.0 {
        return 1.0;
    }
    (elapsed / max).clamp(0.0, 1.0)
}

/// Linear interpolation with `t` clamped to `[0, 1]`.
pub fn lerp_clamped(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t.clamp(0.0, 1.0)
}

/// Converts charge progress between two time bases, keeping the fraction.
///
/// Used when a ground charge turns into a wall charge (and back, when a
/// cancelled wall charge is stored for landing).
pub fn rebase(progress: f32, from_max: f32, to_max: f32) -> f32 {
    progress_fraction(progress, from_max) * to_max.max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamped_elapsed_stays_in_range() {
        assert_eq!(clamped_elapsed(1.0, 0.5, 2.0), 0.0);
        assert_eq!(clamped_elapsed(1.0, 1.5, 2.0), 0.5);
        assert_eq!(clamped_elapsed(1.0, 10.0, 2.0), 2.0);
    }

    #[test]
    fn clamped_elapsed_is_monotonic_for_fixed_start() {
        let mut previous = 0.0;
        for step in 0..400 {
            let now = step as f64 * 0.013;
            let elapsed = clamped_elapsed(0.2, now, 2.0);
            assert!((0.0..=2.0).contains(&elapsed));
            assert!(elapsed >= previous);
            previous = elapsed;
        }
    }

    #[test]
    fn negative_max_collapses_to_zero() {
        assert_eq!(clamped_elapsed(0.0, 5.0, -1.0), 0.0);
    }

    #[test]
    fn progress_fraction_clamps() {
        assert_eq!(progress_fraction(0.5, 2.0), 0.25);
        assert_eq!(progress_fraction(3.0, 2.0), 1.0);
        assert_eq!(progress_fraction(-1.0, 2.0), 0.0);
        assert_eq!(progress_fraction(0.0, 0.0), 1.0);
    }

    #[test]
    fn lerp_matches_jump_force_curve() {
        assert!((lerp_clamped(8.5, 14.0, 0.25) - 9.875).abs() < 1e-5);
        assert_eq!(lerp_clamped(8.5, 14.0, 2.0), 14.0);
        assert_eq!(lerp_clamped(8.5, 14.0, -1.0), 8.5);
    }

    #[test]
    fn rebase_keeps_fraction() {
        // Half of a 2s ground charge is half of a 1s wall charge.
        assert!((rebase(1.0, 2.0, 1.0) - 0.5).abs() < 1e-6);
        assert!((rebase(0.5, 1.0, 2.0) - 1.0).abs() < 1e-6);
        assert_eq!(rebase(5.0, 2.0, 1.0), 1.0);
    }
}
