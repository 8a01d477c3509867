//! Artifact CRUD handlers.

use std::sync::Arc;

use axum::extract::{Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use trove_core::{Artifact, ArtifactDraft, Marker};
use trove_service::Upload;

use crate::api_error::ApiError;
use crate::query_types::ArtifactQuery;
use crate::response_types::DeleteResponse;
use crate::AppState;

pub async fn list_artifacts(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ArtifactQuery>,
) -> Result<Json<Vec<Artifact>>, ApiError> {
    Ok(Json(state.artifacts.list(query.into()).await?))
}

pub async fn get_artifact(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Artifact>, ApiError> {
    state
        .artifacts
        .get(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("artifact {id} not found")))
}

pub async fn get_markers(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Marker>>, ApiError> {
    Ok(Json(state.artifacts.markers().await?))
}

/// `POST /api/artifacts` — multipart form with the record's text fields
/// and an optional `image` part.
pub async fn create_artifact(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<Artifact>), ApiError> {
    let (draft, image) = read_create_form(multipart).await?;
    let artifact = state.artifacts.create(draft, image).await?;
    Ok((StatusCode::CREATED, Json(artifact)))
}

pub async fn delete_artifact(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<DeleteResponse>, ApiError> {
    match state.artifacts.delete(id).await? {
        Some(removed) => Ok(Json(DeleteResponse {
            deleted: true,
            id,
            inventory_number: Some(removed.inventory_number),
        })),
        None => Err(ApiError::NotFound(format!("artifact {id} not found"))),
    }
}

/// Collects the multipart fields into a draft plus optional upload.
/// Unknown fields are ignored; empty text fields become `None`.
async fn read_create_form(
    mut multipart: Multipart,
) -> Result<(ArtifactDraft, Option<Upload>), ApiError> {
    let mut draft = ArtifactDraft::default();
    let mut image = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("multipart: {e}")))?
    {
        let Some(name) = field.name().map(str::to_owned) else {
            continue;
        };

        if name == "image" {
            let filename = field.file_name().unwrap_or("upload").to_owned();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiError::BadRequest(format!("image upload: {e}")))?;
            if !bytes.is_empty() {
                image = Some(Upload { filename, bytes: bytes.to_vec() });
            }
            continue;
        }

        let value = field
            .text()
            .await
            .map_err(|e| ApiError::BadRequest(format!("field {name}: {e}")))?;
        let value = value.trim().to_owned();
        let opt = (!value.is_empty()).then_some(value.clone());

        match name.as_str() {
            "name" => draft.name = value,
            "era" => draft.era = opt,
            "material" => draft.material = opt,
            "dimensions" => draft.dimensions = opt,
            "storage_location" => draft.storage_location = opt,
            "location" => draft.original_location = opt,
            "description" => draft.description = opt,
            _ => {},
        }
    }

    Ok((draft, image))
}
