//! Coordinate conversion between geographic coordinates and globe-space positions.
//!
//! The globe is a sphere centered at the origin with +Y through the north pole.
//! Longitude 0 lies on +X and longitude +90 on -Z.

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GeoCoordinate {
    /// Degrees north of the equator, in `[-90, 90]`.
    pub latitude: f64,
    /// Degrees east of the reference meridian, in `[-180, 180]`.
    pub longitude: f64,
}

impl GeoCoordinate {
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Returns true if both components are finite and inside the documented ranges.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }

    /// Clamp latitude into `[-90, 90]` and wrap longitude into `[-180, 180]`.
    ///
    /// Returns `None` if either component is not finite.
    #[must_use]
    pub fn sanitized(self) -> Option<Self> {
        if !self.latitude.is_finite() || !self.longitude.is_finite() {
            return None;
        }
        Some(Self {
            latitude: self.latitude.clamp(-90.0, 90.0),
            longitude: wrap_longitude(self.longitude),
        })
    }
}

/// A point on (or at a fixed height above) the globe.
///
/// Only produced by [`to_sphere_position`], so the radius it was built with is
/// always the distance from the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpherePosition(DVec3);

impl SpherePosition {
    /// The position as a plain vector.
    #[must_use]
    pub fn as_dvec3(self) -> DVec3 {
        self.0
    }

    /// Distance from the globe center.
    #[must_use]
    pub fn radius(self) -> f64 {
        self.0.length()
    }

    /// Convert back to latitude and longitude.
    #[must_use]
    pub fn to_geo(self) -> GeoCoordinate {
        to_geo_coordinate(self.0)
    }
}

impl From<SpherePosition> for DVec3 {
    fn from(position: SpherePosition) -> Self {
        position.0
    }
}

/// Convert latitude and longitude (degrees) to a position on a sphere of `radius`.
///
/// `radius` must be positive.
#[must_use]
pub fn to_sphere_position(coord: GeoCoordinate, radius: f64) -> SpherePosition {
    let phi = (90.0 - coord.latitude).to_radians();
    let theta = (coord.longitude + 180.0).to_radians();
    let (sin_phi, cos_phi) = phi.sin_cos();
    let (sin_theta, cos_theta) = theta.sin_cos();
    SpherePosition(DVec3::new(
        -radius * sin_phi * cos_theta,
        radius * cos_phi,
        radius * sin_phi * sin_theta,
    ))
}

/// Convert a globe-space position back to latitude and longitude (degrees).
///
/// Inverse of [`to_sphere_position`] for any radius. At the poles longitude is
/// undefined and whatever `atan2` yields is returned.
#[must_use]
pub fn to_geo_coordinate(position: DVec3) -> GeoCoordinate {
    let r = position.length();
    if r == 0.0 {
        return GeoCoordinate::default();
    }
    let latitude = 90.0 - (position.y / r).clamp(-1.0, 1.0).acos().to_degrees();
    // x = -r sin(phi) cos(theta) and z = r sin(phi) sin(theta) give
    // atan2(z, x) = 180 - theta = -longitude.
    let longitude = wrap_longitude(-position.z.atan2(position.x).to_degrees());
    GeoCoordinate {
        latitude,
        longitude,
    }
}

/// Wrap a longitude in degrees into `[-180, 180]`.
#[must_use]
pub fn wrap_longitude(longitude: f64) -> f64 {
    if (-180.0..=180.0).contains(&longitude) {
        return longitude;
    }
    let wrapped = (longitude + 180.0).rem_euclid(360.0) - 180.0;
    // rem_euclid maps +180 to -180; keep the sign the caller gave.
    if wrapped == -180.0 && longitude > 0.0 {
        180.0
    } else {
        wrapped
    }
}
