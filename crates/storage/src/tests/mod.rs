//! Test utilities and module declarations for storage tests.

use tempfile::TempDir;
use trove_core::ArtifactDraft;

use crate::Storage;

pub fn create_test_storage() -> (Storage, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("test.db");
    let storage = Storage::new(&db_path).unwrap();
    (storage, temp_dir)
}

pub fn create_test_draft(name: &str) -> ArtifactDraft {
    ArtifactDraft {
        name: name.to_owned(),
        era: Some("Bronze Age".to_owned()),
        material: Some("bronze".to_owned()),
        dimensions: Some("12 x 4 cm".to_owned()),
        storage_location: Some("shelf B3".to_owned()),
        original_location: Some("Zwickau".to_owned()),
        description: Some(format!("Test find {name}")),
    }
}
