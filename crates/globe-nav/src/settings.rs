//! Tunable navigator configuration.

use serde::{Deserialize, Serialize};

use crate::error::SettingsError;
use crate::selection::MediaKind;

/// Settings for the globe navigator.
///
/// Every field has a default, so a settings file only needs the values it
/// overrides.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigatorSettings {
    /// Radius of the globe mesh at zoom scale 1.
    ///
    /// Also used by the center tracker; the two must match or the reported
    /// center drifts away from the pins.
    pub globe_radius: f64,
    /// Height of pin centers above the globe surface.
    pub marker_offset: f64,
    /// Radius of a pin at zoom scale 1.
    pub marker_radius: f64,
    /// Distance from the globe center the viewpoint travels to when a pin is selected.
    pub travel_radius: f64,
    /// Fraction of the remaining distance covered per second of travel.
    pub travel_rate: f64,
    /// Distance below which travel snaps to its target and counts as arrived.
    pub arrival_epsilon: f64,
    /// Minimum change in degrees before a new center coordinate is published.
    pub center_threshold_degrees: f64,
    /// Smallest zoom scale.
    pub min_scale: f64,
    /// Largest zoom scale.
    pub max_scale: f64,
    /// Scale change per unit of raw wheel delta.
    pub zoom_sensitivity: f64,
    /// Zoom scale at startup, clamped into the bounds.
    pub initial_scale: f64,
    /// Which media the panel requests for a location on arrival.
    pub panel_media: MediaKind,
}

impl Default for NavigatorSettings {
    fn default() -> Self {
        Self {
            globe_radius: 2.0,
            marker_offset: 0.05,
            marker_radius: 0.05,
            travel_radius: 5.0,
            travel_rate: 3.0,
            arrival_epsilon: 0.01,
            center_threshold_degrees: 0.01,
            min_scale: 0.5,
            max_scale: 2.0,
            zoom_sensitivity: 0.001,
            initial_scale: 1.0,
            panel_media: MediaKind::Images,
        }
    }
}

impl NavigatorSettings {
    /// Check that the settings describe a usable globe.
    pub fn validate(&self) -> Result<(), SettingsError> {
        for (field, value) in [
            ("globe_radius", self.globe_radius),
            ("marker_radius", self.marker_radius),
            ("travel_radius", self.travel_radius),
            ("travel_rate", self.travel_rate),
            ("arrival_epsilon", self.arrival_epsilon),
            ("center_threshold_degrees", self.center_threshold_degrees),
            ("min_scale", self.min_scale),
            ("zoom_sensitivity", self.zoom_sensitivity),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(SettingsError::NotPositive { field, value });
            }
        }
        if !self.marker_offset.is_finite() || self.marker_offset < 0.0 {
            return Err(SettingsError::NotPositive {
                field: "marker_offset",
                value: self.marker_offset,
            });
        }
        if !self.max_scale.is_finite() || self.min_scale > self.max_scale {
            return Err(SettingsError::InvertedZoomBounds {
                min: self.min_scale,
                max: self.max_scale,
            });
        }
        let outermost_pin = (self.globe_radius + self.marker_offset) * self.max_scale;
        if self.travel_radius <= outermost_pin {
            return Err(SettingsError::TravelInsideGlobe {
                travel_radius: self.travel_radius,
                outermost_pin,
            });
        }
        Ok(())
    }
}
