//! The set of location pins shown on the globe.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::coords::GeoCoordinate;

/// Identifier of a location record in the external collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocationId(pub i64);

impl fmt::Display for LocationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A selectable pin tied to a geographic coordinate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationMarker {
    pub id: LocationId,
    pub coordinate: GeoCoordinate,
    pub display_name: String,
}

impl LocationMarker {
    #[must_use]
    pub fn new(id: LocationId, coordinate: GeoCoordinate, display_name: impl Into<String>) -> Self {
        Self {
            id,
            coordinate,
            display_name: display_name.into(),
        }
    }
}

/// Holds the loaded markers.
///
/// The set is only ever replaced as a whole. Snapshots returned by
/// [`MarkerRegistry::all`] share the underlying storage and stay valid across
/// later reloads, so readers see either the old set or the new one.
#[derive(Debug, Clone)]
pub struct MarkerRegistry {
    markers: Arc<[LocationMarker]>,
    generation: u64,
}

impl Default for MarkerRegistry {
    fn default() -> Self {
        Self {
            markers: Arc::from(Vec::new()),
            generation: 0,
        }
    }
}

impl MarkerRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole marker set.
    ///
    /// Coordinates are sanitized on the way in: latitude is clamped to
    /// `[-90, 90]` and longitude wrapped into `[-180, 180]`. Markers with
    /// non-finite coordinates or a duplicate id are dropped. Returns the number
    /// of markers kept.
    pub fn load(&mut self, markers: impl IntoIterator<Item = LocationMarker>) -> usize {
        let mut seen = HashSet::new();
        let mut kept = Vec::new();

        for mut marker in markers {
            let Some(coordinate) = marker.coordinate.sanitized() else {
                tracing::warn!(
                    location_id = %marker.id,
                    name = %marker.display_name,
                    "dropping marker with non-finite coordinate"
                );
                continue;
            };
            if coordinate != marker.coordinate {
                tracing::warn!(
                    location_id = %marker.id,
                    latitude = marker.coordinate.latitude,
                    longitude = marker.coordinate.longitude,
                    "clamped out-of-range marker coordinate"
                );
                marker.coordinate = coordinate;
            }
            if !seen.insert(marker.id) {
                tracing::warn!(location_id = %marker.id, "dropping marker with duplicate id");
                continue;
            }
            kept.push(marker);
        }

        let count = kept.len();
        self.markers = Arc::from(kept);
        self.generation += 1;
        tracing::info!(count, generation = self.generation, "loaded markers");
        count
    }

    /// Read-only snapshot of the current set.
    #[must_use]
    pub fn all(&self) -> Arc<[LocationMarker]> {
        Arc::clone(&self.markers)
    }

    /// Look up a marker by id.
    #[must_use]
    pub fn get(&self, id: LocationId) -> Option<&LocationMarker> {
        self.markers.iter().find(|m| m.id == id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Incremented on every [`MarkerRegistry::load`], so hosts can tell when to
    /// rebuild their pin meshes.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marker(id: i64, lat: f64, lon: f64) -> LocationMarker {
        LocationMarker::new(LocationId(id), GeoCoordinate::new(lat, lon), format!("place {id}"))
    }

    #[test]
    fn load_replaces_whole_set() {
        let mut registry = MarkerRegistry::new();
        registry.load([marker(1, 10.0, 20.0), marker(2, -5.0, 100.0)]);
        let before = registry.all();

        registry.load([marker(3, 0.0, 0.0)]);

        assert_eq!(before.len(), 2);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.all()[0].id, LocationId(3));
        assert!(registry.get(LocationId(1)).is_none());
        assert_eq!(registry.generation(), 2);
    }

    #[test]
    fn load_clamps_out_of_range() {
        let mut registry = MarkerRegistry::new();
        registry.load([marker(1, 123.0, -200.0)]);
        let m = registry.get(LocationId(1)).unwrap();
        assert!((m.coordinate.latitude - 90.0).abs() < 1e-12);
        assert!((m.coordinate.longitude - 160.0).abs() < 1e-12);
    }

    #[test]
    fn load_drops_non_finite_and_duplicates() {
        let mut registry = MarkerRegistry::new();
        let kept = registry.load([
            marker(1, 10.0, 10.0),
            marker(2, f64::NAN, 0.0),
            marker(1, 20.0, 20.0),
        ]);
        assert_eq!(kept, 1);
        assert!((registry.get(LocationId(1)).unwrap().coordinate.latitude - 10.0).abs() < 1e-12);
    }

    #[test]
    fn empty_by_default() {
        let registry = MarkerRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.generation(), 0);
    }
}
