//! Geocoding for trove: place name → coordinate pair.
//!
//! Providers implement [`GeocodeProvider`] and are tried in configured
//! order by [`LocationResolver`]. An input that already parses as a
//! coordinate pair short-circuits the chain. All provider failures
//! degrade to "unresolved" — records are persisted without a coordinate
//! rather than failing creation.

mod error;
mod nominatim;
mod photon;
mod provider;
mod resolver;

pub use error::GeocodeError;
pub use nominatim::NominatimProvider;
pub use photon::PhotonProvider;
pub use provider::GeocodeProvider;
pub use resolver::LocationResolver;

#[cfg(test)]
mod tests;
