//! Wire types returned by the portfolio API.

use globe_nav::{GeoCoordinate, LocationId, LocationMarker, MediaItem};
use serde::Deserialize;

/// A decimal the API may send either as a JSON number or as a string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum Decimal {
    Number(f64),
    Text(String),
}

impl Decimal {
    /// The parsed value, or `None` if it is not a finite number.
    #[must_use]
    pub fn value(&self) -> Option<f64> {
        let value = match self {
            Decimal::Number(n) => *n,
            Decimal::Text(s) => s.trim().parse().ok()?,
        };
        value.is_finite().then_some(value)
    }
}

/// A location as listed by `/api/locations`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationRecord {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    pub latitude: Decimal,
    pub longitude: Decimal,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl LocationRecord {
    /// Convert to a globe marker. Returns `None` if a coordinate does not parse.
    #[must_use]
    pub fn to_marker(&self) -> Option<LocationMarker> {
        let coordinate = GeoCoordinate::new(self.latitude.value()?, self.longitude.value()?);
        Some(LocationMarker::new(
            LocationId(self.id),
            coordinate,
            self.name.clone(),
        ))
    }
}

/// Convert records to markers, dropping the ones whose coordinates do not parse.
#[must_use]
pub fn into_markers(records: impl IntoIterator<Item = LocationRecord>) -> Vec<LocationMarker> {
    records
        .into_iter()
        .filter_map(|record| {
            let marker = record.to_marker();
            if marker.is_none() {
                tracing::warn!(
                    location_id = record.id,
                    name = %record.name,
                    latitude = ?record.latitude,
                    longitude = ?record.longitude,
                    "dropping location with unparseable coordinates"
                );
            }
            marker
        })
        .collect()
}

/// An image or video attached to a location.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationMedia {
    pub id: String,
    pub file_url: String,
}

impl From<LocationMedia> for MediaItem {
    fn from(media: LocationMedia) -> Self {
        MediaItem {
            id: media.id,
            file_url: media.file_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_string_coordinates() {
        let json = r#"[
            {"id": 3, "name": "Kyoto", "state": "Kyoto", "country": "Japan",
             "latitude": "35.0116", "longitude": "135.7681",
             "createdAt": "2024-05-01T10:00:00.000Z"},
            {"id": 4, "name": "Reykjavik", "latitude": 64.1466, "longitude": -21.9426}
        ]"#;
        let records: Vec<LocationRecord> = serde_json::from_str(json).unwrap();
        let markers = into_markers(records);

        assert_eq!(markers.len(), 2);
        assert_eq!(markers[0].id, LocationId(3));
        assert_eq!(markers[0].display_name, "Kyoto");
        assert!((markers[0].coordinate.latitude - 35.0116).abs() < 1e-12);
        assert!((markers[1].coordinate.longitude + 21.9426).abs() < 1e-12);
    }

    #[test]
    fn drops_unparseable_coordinates() {
        let json = r#"[
            {"id": 1, "name": "Nowhere", "latitude": "north", "longitude": "0"},
            {"id": 2, "name": "Null Island", "latitude": "0", "longitude": "0"}
        ]"#;
        let records: Vec<LocationRecord> = serde_json::from_str(json).unwrap();
        let markers = into_markers(records);
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].id, LocationId(2));
    }

    #[test]
    fn decodes_media() {
        let json = r#"[{"id": "img-1", "fileUrl": "https://cloud.example/remote.php/dav/a.jpg"}]"#;
        let media: Vec<LocationMedia> = serde_json::from_str(json).unwrap();
        let item = MediaItem::from(media[0].clone());
        assert_eq!(item.id, "img-1");
        assert_eq!(item.file_url, "https://cloud.example/remote.php/dav/a.jpg");
    }

    #[test]
    fn rejects_non_finite_decimal() {
        assert_eq!(Decimal::Text("NaN".into()).value(), None);
        assert_eq!(Decimal::Text(" 12.5 ".into()).value(), Some(12.5));
    }
}
