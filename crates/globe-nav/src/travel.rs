//! Camera travel state machine.
//!
//! The controller eases the viewpoint toward a target position, one step per
//! rendered frame, and reports arrival exactly once:
//!
//! ```text
//! Idle ──begin_travel──▶ Traveling ──converged──▶ ArrivedThisFrame ──consume / next frame──▶ Idle
//!                          ▲    │
//!                          └────┘ begin_travel replaces the target
//! ```

use glam::DVec3;

use crate::coords::SpherePosition;

/// Current phase of the viewpoint animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TravelState {
    /// No animation in progress.
    Idle,
    /// Easing toward `target`.
    Traveling { target: SpherePosition },
    /// The viewpoint reached its target on the most recent frame.
    ArrivedThisFrame,
}

/// Drives the viewpoint toward a travel target.
#[derive(Debug, Clone)]
pub struct TravelController {
    state: TravelState,
    /// Fraction of the remaining distance covered per second.
    rate: f64,
    /// Snap distance for arrival.
    arrival_epsilon: f64,
}

impl TravelController {
    #[must_use]
    pub fn new(rate: f64, arrival_epsilon: f64) -> Self {
        Self {
            state: TravelState::Idle,
            rate,
            arrival_epsilon,
        }
    }

    #[must_use]
    pub fn state(&self) -> TravelState {
        self.state
    }

    #[must_use]
    pub fn is_traveling(&self) -> bool {
        matches!(self.state, TravelState::Traveling { .. })
    }

    /// The target of the in-flight travel, if any.
    #[must_use]
    pub fn target(&self) -> Option<SpherePosition> {
        match self.state {
            TravelState::Traveling { target } => Some(target),
            _ => None,
        }
    }

    /// Start traveling to `target`, replacing any in-flight target.
    pub fn begin_travel(&mut self, target: SpherePosition) {
        tracing::debug!(target = ?target.as_dvec3(), "travel started");
        self.state = TravelState::Traveling { target };
    }

    /// Advance the animation by one frame.
    ///
    /// Returns where the viewpoint should be this frame; the caller orients the
    /// view toward the origin from there. When not traveling the current
    /// position is returned unchanged. On the converging frame the target is
    /// returned exactly.
    pub fn advance(&mut self, current: DVec3, elapsed_seconds: f64) -> DVec3 {
        let target = match self.state {
            TravelState::Traveling { target } => target.as_dvec3(),
            TravelState::ArrivedThisFrame => {
                // Nobody consumed last frame's arrival; it expires now.
                self.state = TravelState::Idle;
                return current;
            }
            TravelState::Idle => return current,
        };

        let step = (self.rate * elapsed_seconds.max(0.0)).min(1.0);
        let next = current.lerp(target, step);

        if next.distance(target) < self.arrival_epsilon {
            tracing::debug!("travel arrived");
            self.state = TravelState::ArrivedThisFrame;
            target
        } else {
            next
        }
    }

    /// Returns true exactly once per arrival, moving the controller back to idle.
    pub fn consume_arrival(&mut self) -> bool {
        if self.state == TravelState::ArrivedThisFrame {
            self.state = TravelState::Idle;
            true
        } else {
            false
        }
    }
}
