//! Nominatim-compatible geocoder client.
//!
//! Resolves a street address to a latitude/longitude pair so deliveries
//! can be plotted on the map. Addresses are suffixed with the configured
//! delivery region before the lookup, matching how drivers write them on
//! the forms ("Av. Aconquija 1500" rather than a full postal address).
//!
//! # API Reference
//!
//! - Endpoint: `GET {base_url}/search?format=json&q=<address>`
//! - Response: JSON array of hits; `lat`/`lon` are decimal strings
//! - The first hit wins; an empty array means the address is unknown

use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when geocoding an address.
#[derive(Debug, Error)]
pub enum GeocoderError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The geocoder returned no results for the address.
    #[error("No results for address: {0}")]
    NoResults(String),

    /// A result was returned but its coordinates could not be parsed.
    #[error("Parse error: {0}")]
    Parse(String),
}

/// A single hit in a Nominatim search response.
///
/// Nominatim serializes coordinates as decimal strings.
#[derive(Debug, Deserialize)]
struct SearchHit {
    lat: String,
    lon: String,
}

/// A geocoded position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// Geocoder API client.
#[derive(Clone)]
pub struct GeocoderClient {
    inner: Arc<GeocoderClientInner>,
}

struct GeocoderClientInner {
    client: reqwest::Client,
    base_url: String,
    region: String,
}

impl GeocoderClient {
    /// Create a new geocoder client.
    ///
    /// # Errors
    ///
    /// Returns `GeocoderError::Http` if the HTTP client fails to build.
    pub fn new(base_url: &str, region: &str) -> Result<Self, GeocoderError> {
        // Nominatim's usage policy requires an identifying User-Agent.
        let client = reqwest::Client::builder()
            .user_agent(concat!("mercadito/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            inner: Arc::new(GeocoderClientInner {
                client,
                base_url: base_url.trim_end_matches('/').to_string(),
                region: region.to_string(),
            }),
        })
    }

    /// Geocode a street address within the configured region.
    ///
    /// # Errors
    ///
    /// Returns `GeocoderError::NoResults` if the geocoder knows nothing
    /// about the address, `GeocoderError::Parse` if the response
    /// coordinates are malformed, or `GeocoderError::Http` on transport
    /// failure.
    pub async fn geocode(&self, address: &str) -> Result<Coordinates, GeocoderError> {
        let query = format!("{address}, {}", self.inner.region);
        let url = format!("{}/search", self.inner.base_url);

        let hits: Vec<SearchHit> = self
            .inner
            .client
            .get(&url)
            .query(&[("format", "json"), ("q", &query)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        first_coordinates(&hits).ok_or_else(|| match hits.first() {
            Some(hit) => GeocoderError::Parse(format!(
                "unparseable coordinates lat={} lon={}",
                hit.lat, hit.lon
            )),
            None => GeocoderError::NoResults(address.to_string()),
        })
    }
}

/// Parse the first hit's coordinates, if any.
fn first_coordinates(hits: &[SearchHit]) -> Option<Coordinates> {
    let hit = hits.first()?;
    let lat = hit.lat.parse::<f64>().ok()?;
    let lon = hit.lon.parse::<f64>().ok()?;
    Some(Coordinates { lat, lon })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_first_coordinates_takes_first_hit() {
        let hits: Vec<SearchHit> = serde_json::from_str(
            r#"[
                {"lat": "-26.8083", "lon": "-65.2176"},
                {"lat": "-26.9000", "lon": "-65.3000"}
            ]"#,
        )
        .unwrap();

        let coords = first_coordinates(&hits).unwrap();
        assert!((coords.lat - (-26.8083)).abs() < f64::EPSILON);
        assert!((coords.lon - (-65.2176)).abs() < f64::EPSILON);
    }

    #[test]
    fn test_first_coordinates_empty() {
        assert!(first_coordinates(&[]).is_none());
    }

    #[test]
    fn test_first_coordinates_malformed() {
        let hits: Vec<SearchHit> =
            serde_json::from_str(r#"[{"lat": "not-a-number", "lon": "-65.2176"}]"#).unwrap();
        assert!(first_coordinates(&hits).is_none());
    }

    #[test]
    fn test_search_hit_ignores_extra_fields() {
        // Real Nominatim responses carry many more fields per hit.
        let hits: Vec<SearchHit> = serde_json::from_str(
            r#"[{"place_id": 1, "display_name": "somewhere", "lat": "1.5", "lon": "2.5"}]"#,
        )
        .unwrap();
        assert!(first_coordinates(&hits).is_some());
    }
}
