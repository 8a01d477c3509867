use std::time::Duration;

use async_trait::async_trait;
use trove_core::constants::GEOCODE_USER_AGENT;
use trove_core::Coordinate;

use crate::GeocodeError;

/// One geocoding backend in the fallback chain.
#[async_trait]
pub trait GeocodeProvider: Send + Sync {
    /// Provider name for logging.
    fn name(&self) -> &'static str;

    /// Looks up a place name. `Ok(None)` means the provider answered
    /// but had no match; errors mean the provider was unusable.
    async fn lookup(&self, query: &str) -> Result<Option<Coordinate>, GeocodeError>;
}

/// Builds the shared HTTP client for providers: bounded timeout and the
/// User-Agent Nominatim's usage policy requires.
pub(crate) fn build_client(timeout: Duration) -> Result<reqwest::Client, GeocodeError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(GEOCODE_USER_AGENT)
        .build()
        .map_err(|e| GeocodeError::ClientInit(e.to_string()))
}

/// Reads a successful JSON body, mapping status and parse failures.
pub(crate) async fn read_json<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
    context: &str,
) -> Result<T, GeocodeError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_else(|_| "could not read error body".to_owned());
        return Err(GeocodeError::HttpStatus { code: status.as_u16(), body });
    }
    let body = response.text().await?;
    serde_json::from_str(&body).map_err(|e| GeocodeError::JsonParse {
        context: format!("{context} (body: {})", truncate(&body, 200)),
        source: e,
    })
}

/// Truncates a string to the given maximum length at a char boundary.
pub(crate) fn truncate(s: &str, max_len: usize) -> &str {
    if s.len() <= max_len {
        s
    } else {
        let mut end = max_len;
        while end > 0 && !s.is_char_boundary(end) {
            end = end.saturating_sub(1);
        }
        s.get(..end).unwrap_or("")
    }
}
