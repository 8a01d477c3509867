use serde::Deserialize;
use trove_core::constants::DEFAULT_QUERY_LIMIT;
use trove_core::ArtifactFilter;

/// Query parameters for `GET /api/artifacts`.
#[derive(Debug, Deserialize)]
pub struct ArtifactQuery {
    /// Substring search over name, description, and original location.
    pub q: Option<String>,
    pub era: Option<String>,
    pub material: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    DEFAULT_QUERY_LIMIT
}

impl From<ArtifactQuery> for ArtifactFilter {
    fn from(query: ArtifactQuery) -> Self {
        Self { query: query.q, era: query.era, material: query.material, limit: query.limit }
    }
}
