//! Wheel-driven uniform scale of the globe and its pins.

/// Apply one raw wheel delta to `current`.
///
/// Positive deltas (scrolling down) shrink the globe. The result is clamped
/// into `[min, max]`; a non-finite result leaves the scale unchanged.
#[must_use]
pub fn apply_delta(current: f64, raw_delta: f64, sensitivity: f64, min: f64, max: f64) -> f64 {
    let next = current - raw_delta * sensitivity;
    if next.is_finite() {
        next.clamp(min, max)
    } else {
        current
    }
}

/// Holds the current zoom scale.
#[derive(Debug, Clone)]
pub struct ZoomController {
    min: f64,
    max: f64,
    sensitivity: f64,
    scale: f64,
}

impl ZoomController {
    /// Bounds must satisfy `min <= max`; `initial` is clamped into them.
    #[must_use]
    pub fn new(min: f64, max: f64, sensitivity: f64, initial: f64) -> Self {
        let initial = if initial.is_finite() { initial } else { 1.0 };
        Self {
            min,
            max,
            sensitivity,
            scale: initial.clamp(min, max),
        }
    }

    /// Handle a wheel event and return the new scale.
    pub fn on_wheel(&mut self, raw_delta: f64) -> f64 {
        let next = apply_delta(self.scale, raw_delta, self.sensitivity, self.min, self.max);
        tracing::trace!(raw_delta, scale = next, "zoom wheel");
        self.scale = next;
        next
    }

    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    #[must_use]
    pub fn bounds(&self) -> (f64, f64) {
        (self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn controller() -> ZoomController {
        ZoomController::new(0.5, 2.0, 0.001, 1.0)
    }

    #[test]
    fn scroll_down_shrinks() {
        let mut zoom = controller();
        assert!((zoom.on_wheel(100.0) - 0.9).abs() < 1e-12);
    }

    #[test]
    fn scroll_up_grows() {
        let mut zoom = controller();
        assert!((zoom.on_wheel(-250.0) - 1.25).abs() < 1e-12);
    }

    #[test]
    fn clamps_at_bounds() {
        let mut zoom = controller();
        assert_eq!(zoom.on_wheel(1_000_000.0), 0.5);
        assert_eq!(zoom.on_wheel(-1_000_000.0), 2.0);
    }

    #[test]
    fn non_finite_delta_is_ignored() {
        let mut zoom = controller();
        assert_eq!(zoom.on_wheel(f64::NAN), 1.0);
        assert_eq!(zoom.on_wheel(f64::INFINITY), 1.0);
    }

    #[test]
    fn initial_is_clamped() {
        assert_eq!(ZoomController::new(0.5, 2.0, 0.001, 7.0).scale(), 2.0);
        assert_eq!(ZoomController::new(0.5, 2.0, 0.001, f64::NAN).scale(), 1.0);
    }

    proptest! {
        #[test]
        fn stays_in_bounds(deltas in proptest::collection::vec(-5000.0f64..5000.0, 0..64)) {
            let mut zoom = controller();
            for delta in deltas {
                let scale = zoom.on_wheel(delta);
                prop_assert!((0.5..=2.0).contains(&scale));
            }
        }

        #[test]
        fn monotone_in_delta(current in 0.5f64..2.0, a in -3000.0f64..3000.0, b in -3000.0f64..3000.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let from_lo = apply_delta(current, lo, 0.001, 0.5, 2.0);
            let from_hi = apply_delta(current, hi, 0.001, 0.5, 2.0);
            prop_assert!(from_hi <= from_lo);
        }
    }
}
