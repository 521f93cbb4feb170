//! HTTP client for the portfolio API.

use serde::de::DeserializeOwned;

use crate::error::{Error, Result};
use crate::types::{LocationMedia, LocationRecord};
use globe_nav::{LocationId, MediaItem, MediaKind};

/// Default API origin for local development.
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Client for the location and media endpoints.
///
/// Cloning is cheap: the underlying `reqwest::Client` shares its connection
/// pool between clones.
#[derive(Debug, Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: String,
}

impl Default for Client {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl Client {
    /// Create a client for the API served at `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_http(reqwest::Client::new(), base_url)
    }

    /// Create a client with a custom HTTP client.
    #[must_use]
    pub fn with_http(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { http, base_url }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Fetch every location.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request fails or the response cannot be decoded.
    pub async fn fetch_locations(&self) -> Result<Vec<LocationRecord>> {
        self.get_json(&self.locations_url()).await
    }

    /// Fetch the images attached to a location.
    pub async fn fetch_location_images(&self, id: LocationId) -> Result<Vec<LocationMedia>> {
        self.get_json(&self.location_media_url(id, MediaKind::Images))
            .await
    }

    /// Fetch the videos attached to a location.
    pub async fn fetch_location_videos(&self, id: LocationId) -> Result<Vec<LocationMedia>> {
        self.get_json(&self.location_media_url(id, MediaKind::Videos))
            .await
    }

    /// Fetch media of `kind` and convert it to panel items.
    pub async fn fetch_location_media(
        &self,
        id: LocationId,
        kind: MediaKind,
    ) -> Result<Vec<MediaItem>> {
        let media = match kind {
            MediaKind::Images => self.fetch_location_images(id).await?,
            MediaKind::Videos => self.fetch_location_videos(id).await?,
        };
        Ok(media.into_iter().map(MediaItem::from).collect())
    }

    /// URL that serves `file_url` through the site's authenticated media proxy.
    #[must_use]
    pub fn photo_proxy_url(&self, file_url: &str) -> String {
        format!(
            "{}/api/photo-proxy?url={}",
            self.base_url,
            urlencoding::encode(file_url)
        )
    }

    fn locations_url(&self) -> String {
        format!("{}/api/locations", self.base_url)
    }

    fn location_media_url(&self, id: LocationId, kind: MediaKind) -> String {
        let segment = match kind {
            MediaKind::Images => "images",
            MediaKind::Videos => "videos",
        };
        format!("{}/api/locations/{id}/{segment}", self.base_url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        tracing::debug!(url, "fetching");

        let response = self.http.get(url).send().await.map_err(|e| Error::Http {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        response.json().await.map_err(|e| Error::Json {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_endpoint_urls() {
        let client = Client::new("https://portfolio.example/");
        assert_eq!(client.base_url(), "https://portfolio.example");
        assert_eq!(client.locations_url(), "https://portfolio.example/api/locations");
        assert_eq!(
            client.location_media_url(LocationId(12), MediaKind::Images),
            "https://portfolio.example/api/locations/12/images"
        );
        assert_eq!(
            client.location_media_url(LocationId(12), MediaKind::Videos),
            "https://portfolio.example/api/locations/12/videos"
        );
    }

    #[test]
    fn proxy_url_encodes_source() {
        let client = Client::default();
        assert_eq!(
            client.photo_proxy_url("https://cloud.example/dav/My Trip/a b.jpg?x=1&y=2"),
            "http://localhost:3000/api/photo-proxy?url=https%3A%2F%2Fcloud.example%2Fdav%2FMy%20Trip%2Fa%20b.jpg%3Fx%3D1%26y%3D2"
        );
    }

    #[tokio::test]
    async fn malformed_base_url_is_http_error() {
        // The request fails while building, before any connection is attempted.
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(2))
            .build()
            .unwrap();
        let client = Client::with_http(http, "http://[::1");
        let err = client.fetch_locations().await.unwrap_err();
        assert!(matches!(err, Error::Http { ref url, .. } if url == "http://[::1/api/locations"));
    }
}
