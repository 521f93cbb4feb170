//! Error types for the globe-nav crate.

use std::fmt;

/// Rejected navigator configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum SettingsError {
    /// A length, rate, or tolerance that must be strictly positive was not.
    NotPositive {
        /// Name of the offending field.
        field: &'static str,
        /// The value that was supplied.
        value: f64,
    },
    /// The zoom bounds are inverted.
    InvertedZoomBounds {
        /// Configured lower bound.
        min: f64,
        /// Configured upper bound.
        max: f64,
    },
    /// The travel radius would put the viewpoint inside the pins at full zoom.
    TravelInsideGlobe {
        /// Configured travel radius.
        travel_radius: f64,
        /// Distance of the pin centers from the origin at the largest zoom scale.
        outermost_pin: f64,
    },
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotPositive { field, value } => {
                write!(f, "{field} must be positive, got {value}")
            }
            Self::InvertedZoomBounds { min, max } => {
                write!(f, "zoom bounds are inverted: min {min} > max {max}")
            }
            Self::TravelInsideGlobe {
                travel_radius,
                outermost_pin,
            } => write!(
                f,
                "travel radius {travel_radius} does not clear the pins at radius {outermost_pin}"
            ),
        }
    }
}

impl std::error::Error for SettingsError {}
