//! Business logic layer for trove.
//!
//! `ArtifactService` wires the resolver, the store, and the media
//! directory into the create/list/delete flows the HTTP layer exposes.

mod artifact_service;
mod error;
mod media;

pub use artifact_service::{ArtifactService, Upload};
pub use error::ServiceError;
pub use media::MediaStore;
