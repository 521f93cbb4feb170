//! Ray picking against the globe and its pins.

use glam::DVec3;

use crate::markers::LocationId;
use crate::navigator::MarkerPlacement;

/// A world-space ray.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: DVec3,
    pub dir: DVec3,
}

impl Ray {
    #[must_use]
    pub fn new(origin: DVec3, dir: DVec3) -> Self {
        Self { origin, dir }
    }

    /// Point at `distance` along the normalized direction.
    #[must_use]
    pub fn at(&self, distance: f64) -> DVec3 {
        self.origin + self.dir.normalize_or_zero() * distance
    }
}

/// Distance along `ray` (normalized) to the first intersection with a sphere.
///
/// A ray starting inside the sphere reports the exit point. Returns `None` if
/// the sphere is missed or lies entirely behind the origin.
#[must_use]
pub fn intersect_sphere(ray: Ray, center: DVec3, radius: f64) -> Option<f64> {
    let dir = ray.dir.try_normalize()?;
    let oc = ray.origin - center;
    let b = oc.dot(dir);
    let c = oc.length_squared() - radius * radius;
    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }
    let sqrt_d = discriminant.sqrt();
    let near = -b - sqrt_d;
    if near >= 0.0 {
        return Some(near);
    }
    let far = -b + sqrt_d;
    (far >= 0.0).then_some(far)
}

/// Nearest pin hit by `ray` that is not hidden behind the globe.
///
/// Ordering contract:
/// - The closest hit along the ray wins.
/// - On equal distance the lower [`LocationId`] wins.
#[must_use]
pub fn pick_marker(ray: Ray, placements: &[MarkerPlacement], globe_radius: f64) -> Option<LocationId> {
    let globe_hit = intersect_sphere(ray, DVec3::ZERO, globe_radius);

    placements
        .iter()
        .filter_map(|placement| {
            let distance = intersect_sphere(ray, placement.position, placement.radius)?;
            let occluded = globe_hit.is_some_and(|globe| globe < distance);
            (!occluded).then_some((distance, placement.id))
        })
        .min_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)))
        .map(|(_, id)| id)
}
