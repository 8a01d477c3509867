//! Ordered provider chain with a direct-parse fast path.

use std::time::Duration;

use trove_core::Coordinate;

use crate::{GeocodeError, GeocodeProvider, NominatimProvider, PhotonProvider};

/// Resolves free-text locations to coordinates.
///
/// Input that already parses as a `"lat, lon"` pair never hits the
/// network. Otherwise providers are tried in order and the first
/// non-empty result wins. Unresolved is a valid outcome, not an error:
/// callers persist the record with an absent coordinate.
pub struct LocationResolver {
    providers: Vec<Box<dyn GeocodeProvider>>,
}

impl LocationResolver {
    /// Builds the default chain: Nominatim first, Photon as fallback.
    ///
    /// # Errors
    /// Returns an error if an HTTP client cannot be built.
    pub fn new(
        nominatim_url: &str,
        photon_url: &str,
        timeout: Duration,
    ) -> Result<Self, GeocodeError> {
        Ok(Self {
            providers: vec![
                Box::new(NominatimProvider::new(nominatim_url, timeout)?),
                Box::new(PhotonProvider::new(photon_url, timeout)?),
            ],
        })
    }

    /// Builds a resolver from an explicit provider list (tests, custom chains).
    #[must_use]
    pub fn with_providers(providers: Vec<Box<dyn GeocodeProvider>>) -> Self {
        Self { providers }
    }

    /// Resolves a location string to a coordinate, or `None` when the
    /// input is empty, no provider has a match, or every provider fails.
    pub async fn resolve(&self, location: &str) -> Option<Coordinate> {
        let location = location.trim();
        if location.is_empty() {
            return None;
        }

        if let Some(coord) = Coordinate::parse(location) {
            tracing::debug!(%coord, "input already a coordinate pair");
            return Some(coord);
        }

        for provider in &self.providers {
            match provider.lookup(location).await {
                Ok(Some(coord)) => {
                    tracing::debug!(provider = provider.name(), %coord, query = location, "resolved");
                    return Some(coord);
                },
                Ok(None) => {
                    tracing::debug!(provider = provider.name(), query = location, "no match");
                },
                Err(e) => {
                    tracing::warn!(provider = provider.name(), query = location, error = %e, "provider failed");
                },
            }
        }

        tracing::info!(query = location, "location unresolved by all providers");
        None
    }
}

impl std::fmt::Debug for LocationResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.providers.iter().map(|p| p.name()).collect();
        f.debug_struct("LocationResolver").field("providers", &names).finish()
    }
}
