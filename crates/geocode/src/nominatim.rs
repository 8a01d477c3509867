//! Nominatim (OpenStreetMap) provider.
//!
//! `GET {base}/search?q=<query>&format=json&limit=1` returns a JSON
//! array of candidate matches; `lat`/`lon` are string fields. The body
//! is untrusted: possibly empty, possibly malformed.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use trove_core::Coordinate;

use crate::provider::{build_client, read_json};
use crate::{GeocodeError, GeocodeProvider};

pub struct NominatimProvider {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct NominatimMatch {
    lat: String,
    lon: String,
}

impl NominatimProvider {
    /// Creates a provider against the given base URL.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, GeocodeError> {
        Ok(Self {
            client: build_client(timeout)?,
            base_url: base_url.trim_end_matches('/').to_owned(),
        })
    }
}

#[async_trait]
impl GeocodeProvider for NominatimProvider {
    fn name(&self) -> &'static str {
        "nominatim"
    }

    async fn lookup(&self, query: &str) -> Result<Option<Coordinate>, GeocodeError> {
        let response = self
            .client
            .get(format!("{}/search", self.base_url))
            .query(&[("q", query), ("format", "json"), ("limit", "1")])
            .send()
            .await?;

        let matches: Vec<NominatimMatch> = read_json(response, "nominatim search response").await?;
        let Some(first) = matches.first() else {
            return Ok(None);
        };

        let (Ok(lat), Ok(lon)) = (first.lat.parse::<f64>(), first.lon.parse::<f64>()) else {
            return Err(GeocodeError::OutOfRange(format!("{}, {}", first.lat, first.lon)));
        };
        Coordinate::new(lat, lon)
            .map(Some)
            .ok_or_else(|| GeocodeError::OutOfRange(format!("{lat}, {lon}")))
    }
}
