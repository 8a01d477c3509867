//! Uploaded images and generated QR files.
//!
//! Files live under one configured directory and are referenced by
//! relative-ish string paths stored on the artifact row, matching how
//! the records were kept before this service existed.

use std::path::{Path, PathBuf};

use qrcode::render::svg;
use qrcode::QrCode;

use crate::ServiceError;

#[derive(Debug, Clone)]
pub struct MediaStore {
    root: PathBuf,
}

impl MediaStore {
    /// Creates the store, making sure the directory exists.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, ServiceError> {
        let root = root.into();
        std::fs::create_dir_all(&root).map_err(ServiceError::Upload)?;
        Ok(Self { root })
    }

    /// Writes an uploaded image under a timestamped, sanitized name and
    /// returns the stored path.
    pub fn save_upload(&self, original_name: &str, bytes: &[u8]) -> Result<String, ServiceError> {
        let filename =
            format!("{}_{}", chrono::Utc::now().timestamp_micros(), sanitize(original_name));
        let path = self.root.join(filename);
        std::fs::write(&path, bytes).map_err(ServiceError::Upload)?;
        Ok(path.to_string_lossy().into_owned())
    }

    /// Renders a QR code for the given content as an SVG file named
    /// after the artifact id, returning the stored path.
    pub fn write_qr(&self, artifact_id: i64, content: &str) -> Result<String, ServiceError> {
        let code = QrCode::new(content.as_bytes())
            .map_err(|e| ServiceError::InvalidInput(format!("QR content: {e}")))?;
        let image = code.render::<svg::Color<'_>>().min_dimensions(200, 200).build();
        let path = self.root.join(format!("qr_{artifact_id}.svg"));
        std::fs::write(&path, image).map_err(ServiceError::Upload)?;
        Ok(path.to_string_lossy().into_owned())
    }

    /// Best-effort file removal; failures are logged and swallowed so a
    /// half-missing file never blocks record deletion.
    pub fn remove_quiet(&self, stored_path: &str) {
        let path = Path::new(stored_path);
        if let Err(e) = std::fs::remove_file(path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(path = stored_path, error = %e, "could not remove media file");
            }
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

/// Keeps only filename-safe characters; empty results become "upload".
fn sanitize(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') { c } else { '_' })
        .collect();
    let cleaned = cleaned.trim_matches('.').to_owned();
    if cleaned.is_empty() {
        "upload".to_owned()
    } else {
        cleaned
    }
}
