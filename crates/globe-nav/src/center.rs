//! Tracking the geographic point the viewpoint is aimed at.

use glam::DVec3;

use crate::coords::{GeoCoordinate, to_geo_coordinate};
use crate::picking::{Ray, intersect_sphere};

/// Geographic point under the center of the view for a viewpoint facing the origin.
///
/// `view_direction` points from the eye toward the globe center, so the visible
/// surface point it is aimed at lies opposite to it on the sphere.
#[must_use]
pub fn sample(view_direction: DVec3, radius: f64) -> GeoCoordinate {
    let surface = -view_direction.normalize_or_zero() * radius;
    to_geo_coordinate(surface)
}

/// Geographic point where an arbitrary view ray first meets the sphere.
///
/// Returns `None` if the ray misses the globe.
#[must_use]
pub fn sample_ray(ray: Ray, radius: f64) -> Option<GeoCoordinate> {
    let distance = intersect_sphere(ray, DVec3::ZERO, radius)?;
    Some(to_geo_coordinate(ray.at(distance)))
}

/// True if `current` moved more than `threshold_degrees` from `previous` on either axis.
#[must_use]
pub fn should_publish(
    previous: GeoCoordinate,
    current: GeoCoordinate,
    threshold_degrees: f64,
) -> bool {
    (current.latitude - previous.latitude).abs() > threshold_degrees
        || (current.longitude - previous.longitude).abs() > threshold_degrees
}

/// Samples the view center every frame and publishes it when it changes enough.
#[derive(Debug, Clone)]
pub struct CenterTracker {
    radius: f64,
    threshold_degrees: f64,
    current: GeoCoordinate,
    published: Option<GeoCoordinate>,
}

impl CenterTracker {
    /// `radius` must be the same radius the markers are placed with.
    #[must_use]
    pub fn new(radius: f64, threshold_degrees: f64) -> Self {
        Self {
            radius,
            threshold_degrees,
            current: GeoCoordinate::default(),
            published: None,
        }
    }

    /// Resample from the current view direction.
    ///
    /// Returns the new center if it should be published to observers. The
    /// first sample is always published.
    pub fn update(&mut self, view_direction: DVec3) -> Option<GeoCoordinate> {
        self.current = sample(view_direction, self.radius);
        let publish = self
            .published
            .is_none_or(|previous| should_publish(previous, self.current, self.threshold_degrees));
        if publish {
            self.published = Some(self.current);
            Some(self.current)
        } else {
            None
        }
    }

    /// The center from the most recent frame, published or not.
    #[must_use]
    pub fn current(&self) -> GeoCoordinate {
        self.current
    }

    /// The last value handed to observers.
    #[must_use]
    pub fn published(&self) -> Option<GeoCoordinate> {
        self.published
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::to_sphere_position;
    use proptest::prelude::*;

    #[test]
    fn eye_over_marker_reads_marker_coordinate() {
        let coord = GeoCoordinate::new(35.6762, 139.6503);
        let eye = to_sphere_position(coord, 5.0).as_dvec3();
        let center = sample(-eye.normalize(), 2.0);
        assert!((center.latitude - coord.latitude).abs() < 1e-9);
        assert!((center.longitude - coord.longitude).abs() < 1e-9);
    }

    #[test]
    fn ray_sample_hits_near_side() {
        let coord = GeoCoordinate::new(-12.0, 77.0);
        let eye = to_sphere_position(coord, 5.0).as_dvec3();
        let center = sample_ray(Ray::new(eye, -eye), 2.0).unwrap();
        assert!((center.latitude - coord.latitude).abs() < 1e-9);
        assert!((center.longitude - coord.longitude).abs() < 1e-9);
    }

    #[test]
    fn ray_sample_misses() {
        let ray = Ray::new(DVec3::new(0.0, 0.0, 5.0), DVec3::X);
        assert!(sample_ray(ray, 2.0).is_none());
    }

    #[test]
    fn tracker_publishes_first_then_only_on_change() {
        let mut tracker = CenterTracker::new(2.0, 0.01);
        let dir = -to_sphere_position(GeoCoordinate::new(10.0, 20.0), 1.0).as_dvec3();
        assert!(tracker.update(dir).is_some());
        assert!(tracker.update(dir).is_none());

        let moved = -to_sphere_position(GeoCoordinate::new(10.5, 20.0), 1.0).as_dvec3();
        let published = tracker.update(moved).unwrap();
        assert!((published.latitude - 10.5).abs() < 1e-9);
        assert_eq!(tracker.published(), Some(published));
    }

    #[test]
    fn tracker_tracks_small_drift_without_publishing() {
        let mut tracker = CenterTracker::new(2.0, 0.01);
        tracker.update(-to_sphere_position(GeoCoordinate::new(0.0, 0.0), 1.0).as_dvec3());
        let drift = -to_sphere_position(GeoCoordinate::new(0.005, 0.0), 1.0).as_dvec3();
        assert!(tracker.update(drift).is_none());
        assert!((tracker.current().latitude - 0.005).abs() < 1e-9);
    }

    proptest! {
        #[test]
        fn publish_threshold(
            lat in -80.0f64..80.0,
            lon in -170.0f64..170.0,
            dlat in -0.02f64..0.02,
            dlon in -0.02f64..0.02,
        ) {
            let threshold = 0.01;
            let a = GeoCoordinate::new(lat, lon);
            let b = GeoCoordinate::new(lat + dlat, lon + dlon);
            let expected = (b.latitude - a.latitude).abs() > threshold
                || (b.longitude - a.longitude).abs() > threshold;
            prop_assert_eq!(should_publish(a, b, threshold), expected);
            if dlat.abs() < 0.009 && dlon.abs() < 0.009 {
                prop_assert!(!should_publish(a, b, threshold));
            }
            if dlat.abs() > 0.011 || dlon.abs() > 0.011 {
                prop_assert!(should_publish(a, b, threshold));
            }
        }
    }
}
