use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::Coordinate;

/// A catalogued find: one row of the artifacts table.
///
/// GPS coordinate, image, and QR reference are optional — resolution or
/// upload may fail without blocking record creation. Rows are immutable
/// after creation apart from the QR reference filled in right after
/// insert; there is no edit flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Artifact {
    pub id: i64,
    pub inventory_number: String,
    pub name: String,
    pub era: Option<String>,
    pub material: Option<String>,
    pub dimensions: Option<String>,
    pub storage_location: Option<String>,
    /// Free-text location as entered ("Zwickau" or "50.83, 12.48").
    pub original_location: Option<String>,
    /// Resolved coordinate; `None` when resolution failed or was skipped.
    pub gps: Option<Coordinate>,
    pub description: Option<String>,
    pub image_path: Option<String>,
    pub qr_path: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Fields supplied by the create form, before numbering and resolution.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArtifactDraft {
    pub name: String,
    pub era: Option<String>,
    pub material: Option<String>,
    pub dimensions: Option<String>,
    pub storage_location: Option<String>,
    pub original_location: Option<String>,
    pub description: Option<String>,
}

/// Filter for listing/searching artifacts.
#[derive(Debug, Clone, Default)]
pub struct ArtifactFilter {
    /// Substring match over name, description, and original location.
    pub query: Option<String>,
    pub era: Option<String>,
    pub material: Option<String>,
    pub limit: usize,
}

/// A map annotation derived from a record's resolved coordinate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Marker {
    pub id: i64,
    pub name: String,
    pub era: Option<String>,
    pub lat: f64,
    pub lon: f64,
    pub image_path: Option<String>,
    pub original_location: Option<String>,
}

impl Marker {
    /// Builds a marker for an artifact with a resolved coordinate.
    /// Returns `None` for rows without one.
    #[must_use]
    pub fn from_artifact(artifact: &Artifact) -> Option<Self> {
        let coord = artifact.gps?;
        Some(Self {
            id: artifact.id,
            name: artifact.name.clone(),
            era: artifact.era.clone(),
            lat: coord.lat,
            lon: coord.lon,
            image_path: artifact.image_path.clone(),
            original_location: artifact.original_location.clone(),
        })
    }
}
