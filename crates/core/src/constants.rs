//! Shared constants for trove.

/// Maximum number of results for any list/search query.
pub const MAX_QUERY_LIMIT: usize = 1000;

/// Default number of results when limit is not specified by the caller.
pub const DEFAULT_QUERY_LIMIT: usize = 100;

/// Per-provider geocoding request timeout in seconds.
pub const GEOCODE_TIMEOUT_SECS: u64 = 5;

/// User-Agent sent to geocoding providers (Nominatim requires one).
pub const GEOCODE_USER_AGENT: &str = concat!("trove/", env!("CARGO_PKG_VERSION"));

/// Default Nominatim endpoint.
pub const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";

/// Default Photon endpoint.
pub const PHOTON_URL: &str = "https://photon.komoot.io";
