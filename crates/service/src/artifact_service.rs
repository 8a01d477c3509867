use std::sync::Arc;

use tokio::task::spawn_blocking;
use trove_core::{Artifact, ArtifactDraft, ArtifactFilter, Marker};
use trove_geocode::LocationResolver;
use trove_storage::Storage;

use crate::{MediaStore, ServiceError};

/// An image received with the create form.
#[derive(Debug, Clone)]
pub struct Upload {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Orchestrates the artifact lifecycle: resolve, number, persist, label.
pub struct ArtifactService {
    storage: Arc<Storage>,
    resolver: Arc<LocationResolver>,
    media: MediaStore,
    public_url: String,
}

impl ArtifactService {
    #[must_use]
    pub fn new(
        storage: Arc<Storage>,
        resolver: Arc<LocationResolver>,
        media: MediaStore,
        public_url: String,
    ) -> Self {
        Self { storage, resolver, media, public_url: public_url.trim_end_matches('/').to_owned() }
    }

    /// Creates an artifact from form input.
    ///
    /// Location resolution is attempted first and its failure is not an
    /// error: the record is persisted with an absent coordinate. The QR
    /// label is rendered after the insert (it encodes the record's URL)
    /// and its failure is swallowed the same way.
    pub async fn create(
        &self,
        draft: ArtifactDraft,
        image: Option<Upload>,
    ) -> Result<Artifact, ServiceError> {
        if draft.name.trim().is_empty() {
            return Err(ServiceError::InvalidInput("artifact name must not be empty".to_owned()));
        }

        let gps = match draft.original_location.as_deref() {
            Some(location) => self.resolver.resolve(location).await,
            None => None,
        };

        let storage = Arc::clone(&self.storage);
        let media = self.media.clone();
        let public_url = self.public_url.clone();
        let artifact = spawn_blocking(move || {
            let image_path = match image {
                Some(upload) => Some(media.save_upload(&upload.filename, &upload.bytes)?),
                None => None,
            };
            let artifact = storage.create_artifact(&draft, gps, image_path)?;

            let qr_content = format!("{public_url}/api/artifacts/{}", artifact.id);
            let qr_path = match media.write_qr(artifact.id, &qr_content) {
                Ok(path) => match storage.set_qr_path(artifact.id, &path) {
                    Ok(()) => Some(path),
                    Err(e) => {
                        tracing::warn!(id = artifact.id, error = %e, "could not attach QR reference");
                        None
                    },
                },
                Err(e) => {
                    tracing::warn!(id = artifact.id, error = %e, "QR generation failed");
                    None
                },
            };
            Ok::<_, ServiceError>((artifact, qr_path))
        })
        .await?
        .map(|(mut artifact, qr_path)| {
            artifact.qr_path = qr_path;
            artifact
        })?;

        tracing::info!(
            id = artifact.id,
            inventory_number = %artifact.inventory_number,
            resolved = artifact.gps.is_some(),
            "artifact created"
        );
        Ok(artifact)
    }

    pub async fn get(&self, id: i64) -> Result<Option<Artifact>, ServiceError> {
        let storage = Arc::clone(&self.storage);
        Ok(spawn_blocking(move || storage.get_artifact(id)).await??)
    }

    pub async fn list(&self, filter: ArtifactFilter) -> Result<Vec<Artifact>, ServiceError> {
        let storage = Arc::clone(&self.storage);
        Ok(spawn_blocking(move || storage.list_artifacts(&filter)).await??)
    }

    /// Deletes an artifact and its files. Returns the removed record, or
    /// `None` when the id does not exist — a defined not-found, not an
    /// error. File removal failures are logged and swallowed.
    pub async fn delete(&self, id: i64) -> Result<Option<Artifact>, ServiceError> {
        let storage = Arc::clone(&self.storage);
        let media = self.media.clone();
        let removed = spawn_blocking(move || {
            let removed = storage.delete_artifact(id)?;
            if let Some(artifact) = &removed {
                if let Some(path) = &artifact.image_path {
                    media.remove_quiet(path);
                }
                if let Some(path) = &artifact.qr_path {
                    media.remove_quiet(path);
                }
            }
            Ok::<_, ServiceError>(removed)
        })
        .await??;

        if removed.is_some() {
            tracing::info!(id, "artifact deleted");
        }
        Ok(removed)
    }

    /// Map markers for every record with a resolved coordinate.
    /// Records without one (or with malformed stored values) are
    /// skipped. Goes through the unbounded marker query, not the
    /// limit-clamped listing: the map must show every located record.
    pub async fn markers(&self) -> Result<Vec<Marker>, ServiceError> {
        let storage = Arc::clone(&self.storage);
        let artifacts = spawn_blocking(move || storage.marker_artifacts()).await??;
        Ok(artifacts.iter().filter_map(Marker::from_artifact).collect())
    }

    pub async fn count(&self) -> Result<i64, ServiceError> {
        let storage = Arc::clone(&self.storage);
        Ok(spawn_blocking(move || storage.count_artifacts()).await??)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tempfile::TempDir;
    use trove_core::ArtifactDraft;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    async fn service_with_mocks(nominatim: &MockServer, photon: &MockServer) -> (ArtifactService, TempDir) {
        let dir = TempDir::new().unwrap();
        let storage = Arc::new(Storage::new(&dir.path().join("test.db")).unwrap());
        let resolver = Arc::new(
            LocationResolver::new(&nominatim.uri(), &photon.uri(), Duration::from_secs(2)).unwrap(),
        );
        let media = MediaStore::new(dir.path().join("uploads")).unwrap();
        let service =
            ArtifactService::new(storage, resolver, media, "http://127.0.0.1:8080".to_owned());
        (service, dir)
    }

    fn draft(name: &str, location: Option<&str>) -> ArtifactDraft {
        ArtifactDraft {
            name: name.to_owned(),
            era: Some("Bronze Age".to_owned()),
            original_location: location.map(str::to_owned),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn create_resolves_location_and_writes_qr() {
        let nominatim = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"lat": "50.7", "lon": "12.5"}
            ])))
            .mount(&nominatim)
            .await;
        let photon = MockServer::start().await;

        let (service, _dir) = service_with_mocks(&nominatim, &photon).await;
        let artifact = service.create(draft("Axe head", Some("Zwickau")), None).await.unwrap();

        assert_eq!(artifact.inventory_number, "AR-00001");
        assert_eq!(artifact.gps.unwrap().to_string(), "50.70000, 12.50000");
        let qr = artifact.qr_path.expect("QR path attached");
        assert!(std::fs::read_to_string(&qr).unwrap().contains("<svg"));
    }

    #[tokio::test]
    async fn create_survives_unresolvable_location() {
        let nominatim = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(500).set_body_string("down"))
            .mount(&nominatim)
            .await;
        let photon = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "type": "FeatureCollection", "features": []
            })))
            .mount(&photon)
            .await;

        let (service, _dir) = service_with_mocks(&nominatim, &photon).await;
        let artifact = service.create(draft("Shard", Some("Atlantis")), None).await.unwrap();
        assert!(artifact.gps.is_none());
        assert!(service.get(artifact.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn create_with_coordinate_input_skips_network() {
        let nominatim = MockServer::start().await;
        let photon = MockServer::start().await;
        let (service, _dir) = service_with_mocks(&nominatim, &photon).await;

        let artifact =
            service.create(draft("Coin", Some("50.83, 12.48")), None).await.unwrap();
        assert_eq!(artifact.gps.unwrap().to_string(), "50.83000, 12.48000");
        assert!(nominatim.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn create_rejects_empty_name() {
        let nominatim = MockServer::start().await;
        let photon = MockServer::start().await;
        let (service, _dir) = service_with_mocks(&nominatim, &photon).await;

        let err = service.create(draft("   ", None), None).await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn create_stores_upload() {
        let nominatim = MockServer::start().await;
        let photon = MockServer::start().await;
        let (service, _dir) = service_with_mocks(&nominatim, &photon).await;

        let upload = Upload { filename: "find.jpg".to_owned(), bytes: b"jpegdata".to_vec() };
        let artifact = service.create(draft("Fibula", None), Some(upload)).await.unwrap();
        let stored = artifact.image_path.expect("image stored");
        assert_eq!(std::fs::read(&stored).unwrap(), b"jpegdata");
    }

    #[tokio::test]
    async fn delete_removes_row_and_files() {
        let nominatim = MockServer::start().await;
        let photon = MockServer::start().await;
        let (service, _dir) = service_with_mocks(&nominatim, &photon).await;

        let upload = Upload { filename: "doomed.jpg".to_owned(), bytes: b"x".to_vec() };
        let artifact = service.create(draft("Doomed", None), Some(upload)).await.unwrap();
        let image = artifact.image_path.clone().unwrap();
        let qr = artifact.qr_path.clone().unwrap();

        let removed = service.delete(artifact.id).await.unwrap();
        assert!(removed.is_some());
        assert!(!std::path::Path::new(&image).exists());
        assert!(!std::path::Path::new(&qr).exists());
        assert!(service.get(artifact.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_missing_id_is_defined_not_found() {
        let nominatim = MockServer::start().await;
        let photon = MockServer::start().await;
        let (service, _dir) = service_with_mocks(&nominatim, &photon).await;
        assert!(service.delete(404).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn markers_skip_unresolved_records() {
        let nominatim = MockServer::start().await;
        let photon = MockServer::start().await;
        let (service, _dir) = service_with_mocks(&nominatim, &photon).await;

        service.create(draft("Located", Some("50.7, 12.5")), None).await.unwrap();
        service.create(draft("Unlocated", None), None).await.unwrap();

        let markers = service.markers().await.unwrap();
        assert_eq!(markers.len(), 1);
        assert_eq!(markers[0].name, "Located");
        assert!((markers[0].lat - 50.7).abs() < 1e-9);
    }
}
