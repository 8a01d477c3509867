use thiserror::Error;

/// Errors from a single geocoding provider call.
///
/// The resolver treats every variant as "no result from this provider"
/// and moves on to the next one; only client construction surfaces to
/// the caller.
#[derive(Debug, Error)]
pub enum GeocodeError {
    /// HTTP client could not be built (TLS backend failure).
    #[error("client init: {0}")]
    ClientInit(String),

    /// Request failed (connect error, timeout).
    #[error("http request: {0}")]
    HttpRequest(#[from] reqwest::Error),

    /// Provider returned a non-success status.
    #[error("http status {code}: {body}")]
    HttpStatus { code: u16, body: String },

    /// Response body was not the expected JSON shape.
    #[error("malformed response: {context}")]
    JsonParse {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// Provider returned coordinates outside WGS84 bounds.
    #[error("coordinates out of range: {0}")]
    OutOfRange(String),
}
