//! Photon (komoot) provider, the fallback behind Nominatim.
//!
//! `GET {base}/api?q=<query>&limit=1` returns a GeoJSON
//! FeatureCollection; coordinates come as `[lon, lat]`.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use trove_core::Coordinate;

use crate::provider::{build_client, read_json};
use crate::{GeocodeError, GeocodeProvider};

pub struct PhotonProvider {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct FeatureCollection {
    #[serde(default)]
    features: Vec<Feature>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    coordinates: Vec<f64>,
}

impl PhotonProvider {
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
impl GeocodeProvider for PhotonProvider {
    fn name(&self) -> &'static str {
        "photon"
    }

    async fn lookup(&self, query: &str) -> Result<Option<Coordinate>, GeocodeError> {
        let response = self
            .client
            .get(format!("{}/api", self.base_url))
            .query(&[("q", query), ("limit", "1")])
            .send()
            .await?;

        let collection: FeatureCollection = read_json(response, "photon api response").await?;
        let Some(feature) = collection.features.first() else {
            return Ok(None);
        };

        // GeoJSON position order is [lon, lat].
        let [lon, lat, ..] = feature.geometry.coordinates.as_slice() else {
            return Err(GeocodeError::OutOfRange(format!(
                "coordinate array of length {}",
                feature.geometry.coordinates.len()
            )));
        };
        Coordinate::new(*lat, *lon)
            .map(Some)
            .ok_or_else(|| GeocodeError::OutOfRange(format!("{lat}, {lon}")))
    }
}
