//! Map and photo enrichment.
//!
//! Enrichment is optional and never fatal. A geocoder failure is logged and
//! reduced to `show_map = false`; the numeric result row is not touched.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tokio::time::Instant;

use apod_core::error::{ApodError, ApodResult};
use apod_core::types::PropertyRecord;

use crate::error::{DataError, DataResult};

// =============================================================================
// GEO POINT
// =============================================================================

/// A WGS84 coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in degrees.
    pub latitude: f64,
    /// Longitude in degrees.
    pub longitude: f64,
}

impl GeoPoint {
    /// Creates a point.
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// OpenStreetMap link centered on the point with a marker.
    #[must_use]
    pub fn map_url(&self) -> String {
        format!(
            "https://www.openstreetmap.org/?mlat={lat:.6}&mlon={lon:.6}#map=17/{lat:.6}/{lon:.6}",
            lat = self.latitude,
            lon = self.longitude
        )
    }
}

// =============================================================================
// GEOCODER
// =============================================================================

/// Address to coordinate lookup.
///
/// `Ok(None)` means the service answered but knows no such address.
#[async_trait]
pub trait Geocoder: Send + Sync {
    /// Looks up an address.
    async fn geocode(&self, address: &str) -> ApodResult<Option<GeoPoint>>;

    /// Name used in logs and error messages.
    fn name(&self) -> &str;
}

/// In-memory geocoder backed by a fixed table.
///
/// Lookups ignore case and surrounding whitespace.
#[derive(Debug, Clone, Default)]
pub struct StaticGeocoder {
    points: HashMap<String, GeoPoint>,
}

impl StaticGeocoder {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry.
    #[must_use]
    pub fn with_point(mut self, address: &str, point: GeoPoint) -> Self {
        self.points.insert(normalize(address), point);
        self
    }
}

#[async_trait]
impl Geocoder for StaticGeocoder {
    async fn geocode(&self, address: &str) -> ApodResult<Option<GeoPoint>> {
        Ok(self.points.get(&normalize(address)).copied())
    }

    fn name(&self) -> &str {
        "static"
    }
}

fn normalize(address: &str) -> String {
    address.trim().to_lowercase()
}

/// Default Nominatim endpoint.
pub const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";

/// Nominatim usage policy allows one request per second.
const NOMINATIM_MIN_INTERVAL: Duration = Duration::from_secs(1);

/// Geocoder backed by the OpenStreetMap Nominatim search API.
///
/// Requests are spaced at least one second apart.
#[derive(Debug)]
pub struct NominatimGeocoder {
    client: reqwest::Client,
    base_url: String,
    min_interval: Duration,
    last_request: Mutex<Option<Instant>>,
}

#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
}

impl NominatimGeocoder {
    /// Creates a geocoder against the public endpoint.
    ///
    /// Nominatim rejects requests without an identifying user agent.
    pub fn new(user_agent: &str) -> DataResult<Self> {
        Self::with_base_url(user_agent, NOMINATIM_URL)
    }

    /// Creates a geocoder against a self-hosted or mock endpoint.
    pub fn with_base_url(user_agent: &str, base_url: impl Into<String>) -> DataResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| DataError::Client(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            min_interval: NOMINATIM_MIN_INTERVAL,
            last_request: Mutex::new(None),
        })
    }

    /// Overrides the spacing between requests.
    #[must_use]
    pub fn with_min_interval(mut self, interval: Duration) -> Self {
        self.min_interval = interval;
        self
    }

    async fn throttle(&self) {
        let mut last = self.last_request.lock().await;
        if let Some(previous) = *last {
            let elapsed = previous.elapsed();
            if elapsed < self.min_interval {
                tokio::time::sleep(self.min_interval - elapsed).await;
            }
        }
        *last = Some(Instant::now());
    }

    fn upstream(&self, reason: impl std::fmt::Display) -> ApodError {
        ApodError::upstream(self.name(), reason.to_string())
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn geocode(&self, address: &str) -> ApodResult<Option<GeoPoint>> {
        self.throttle().await;

        let url = format!("{}/search", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("q", address), ("format", "json"), ("limit", "1")])
            .send()
            .await
            .map_err(|e| self.upstream(e))?
            .error_for_status()
            .map_err(|e| self.upstream(e))?;

        let places: Vec<NominatimPlace> = response.json().await.map_err(|e| self.upstream(e))?;

        let Some(place) = places.into_iter().next() else {
            return Ok(None);
        };
        let latitude = place
            .lat
            .parse::<f64>()
            .map_err(|_| self.upstream(format!("bad latitude '{}'", place.lat)))?;
        let longitude = place
            .lon
            .parse::<f64>()
            .map_err(|_| self.upstream(format!("bad longitude '{}'", place.lon)))?;

        Ok(Some(GeoPoint::new(latitude, longitude)))
    }

    fn name(&self) -> &str {
        "nominatim"
    }
}

// =============================================================================
// ENRICHMENT
// =============================================================================

/// Presentation extras for one listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Enrichment {
    /// Address the lookup was made for.
    pub address: String,
    /// Coordinates, when the lookup succeeded.
    pub location: Option<GeoPoint>,
    /// Photo URL carried over from the listing.
    pub photo_url: Option<String>,
    /// Whether a map should be shown.
    pub show_map: bool,
}

impl Enrichment {
    /// Map link, when a map should be shown.
    #[must_use]
    pub fn map_url(&self) -> Option<String> {
        self.location
            .filter(|_| self.show_map)
            .map(|point| point.map_url())
    }
}

/// Looks up the map location for one listing.
///
/// Never fails. Any geocoder error becomes a warning and `show_map = false`.
pub async fn enrich_listing<G>(geocoder: &G, record: &PropertyRecord) -> Enrichment
where
    G: Geocoder + ?Sized,
{
    let location = match geocoder.geocode(&record.address).await {
        Ok(Some(point)) => Some(point),
        Ok(None) => {
            log::info!("{}: no match for '{}'", geocoder.name(), record.address);
            None
        }
        Err(err) => {
            log::warn!("map lookup skipped for '{}': {}", record.address, err);
            None
        }
    };

    Enrichment {
        address: record.address.clone(),
        show_map: location.is_some(),
        location,
        photo_url: record.photo_url.clone(),
    }
}

/// Enriches listings one after another, preserving order.
pub async fn enrich_all<G>(geocoder: &G, records: &[PropertyRecord]) -> Vec<Enrichment>
where
    G: Geocoder + ?Sized,
{
    let mut enriched = Vec::with_capacity(records.len());
    for record in records {
        enriched.push(enrich_listing(geocoder, record).await);
    }
    enriched
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_url() {
        let point = GeoPoint::new(40.7128, -74.006);
        assert_eq!(
            point.map_url(),
            "https://www.openstreetmap.org/?mlat=40.712800&mlon=-74.006000#map=17/40.712800/-74.006000"
        );
    }

    #[test]
    fn test_map_url_hidden_without_show_map() {
        let enrichment = Enrichment {
            address: "1 A St".to_string(),
            location: Some(GeoPoint::new(1.0, 2.0)),
            photo_url: None,
            show_map: false,
        };
        assert_eq!(enrichment.map_url(), None);
    }

    #[test]
    fn test_nominatim_base_url_trimmed() {
        let geocoder = NominatimGeocoder::with_base_url("apod-tests", "http://localhost:8080/")
            .unwrap()
            .with_min_interval(Duration::ZERO);
        assert_eq!(geocoder.base_url, "http://localhost:8080");
        assert_eq!(geocoder.name(), "nominatim");
    }

    #[tokio::test]
    async fn test_static_geocoder_ignores_case() {
        let geocoder = StaticGeocoder::new().with_point("5 Oak Ave", GeoPoint::new(1.5, 2.5));
        let found = geocoder.geocode("  5 OAK AVE ").await.unwrap();
        assert_eq!(found, Some(GeoPoint::new(1.5, 2.5)));
        assert_eq!(geocoder.geocode("6 Oak Ave").await.unwrap(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_nominatim_requests_are_spaced() {
        let geocoder = NominatimGeocoder::with_base_url("apod-tests", "http://localhost:8080")
            .unwrap()
            .with_min_interval(Duration::from_secs(1));

        let start = Instant::now();
        geocoder.throttle().await;
        assert_eq!(start.elapsed(), Duration::ZERO);

        geocoder.throttle().await;
        geocoder.throttle().await;
        let elapsed = start.elapsed();
        assert!(elapsed >= Duration::from_secs(2), "elapsed {elapsed:?}");
        assert!(elapsed < Duration::from_secs(3), "elapsed {elapsed:?}");
    }

    #[tokio::test(start_paused = true)]
    async fn test_nominatim_no_wait_after_interval() {
        let geocoder = NominatimGeocoder::with_base_url("apod-tests", "http://localhost:8080")
            .unwrap()
            .with_min_interval(Duration::from_secs(1));

        geocoder.throttle().await;
        tokio::time::advance(Duration::from_secs(5)).await;

        let before = Instant::now();
        geocoder.throttle().await;
        assert_eq!(before.elapsed(), Duration::ZERO);
    }
}
