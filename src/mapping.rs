use std::{fs, path::Path};

use crate::{error::ApiError, models::MappingEntry};

/// Reads the bundled document describing how categorical clinical fields are
/// encoded. Read on every call, like the model artifact.
pub fn load_mapping(path: &Path) -> Result<Vec<MappingEntry>, ApiError> {
	let raw = fs::read_to_string(path).map_err(|e| {
		ApiError::Internal(format!("Unable to read mapping file {}: {}", path.display(), e))
	})?;
	serde_json::from_str(&raw).map_err(|e| {
		ApiError::Internal(format!("Mapping file {} is not valid: {}", path.display(), e))
	})
}
