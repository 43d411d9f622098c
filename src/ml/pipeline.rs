use std::{fs, path::Path};

use serde::{Deserialize, Serialize};

use super::{estimator::Estimator, scaler::Scaler, ArtifactError, Classifier};
use crate::features::{FeatureVector, FEATURE_COUNT, FEATURE_NAMES};

pub const FORMAT_VERSION: u32 = 1;

/// An exported scaler + estimator pair, as written by the training process.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pipeline {
	pub format_version: u32,
	pub feature_names: Vec<String>,
	#[serde(default)]
	pub scaler: Scaler,
	pub estimator: Estimator,
}

impl Pipeline {
	/// Reads and checks an artifact.
	///
	/// # Errors
	/// [`ArtifactError`] when the file is missing or unreadable, is not a
	/// pipeline document, has an unsupported version, or was trained on a
	/// different feature order.
	pub fn load(path: impl AsRef<Path>) -> Result<Self, ArtifactError> {
		let path = path.as_ref();
		log::debug!("Loading model artifact from {}", path.display());
		let bytes = fs::read(path)
			.map_err(|source| ArtifactError::Io { path: path.to_path_buf(), source })?;
		let pipeline: Pipeline = serde_json::from_slice(&bytes)
			.map_err(|source| ArtifactError::Corrupt { path: path.to_path_buf(), source })?;
		pipeline.check()?;
		Ok(pipeline)
	}

	pub fn check(&self) -> Result<(), ArtifactError> {
		if self.format_version != FORMAT_VERSION {
			return Err(ArtifactError::UnsupportedVersion {
				found: self.format_version,
				expected: FORMAT_VERSION,
			});
		}
		if self.feature_names.iter().map(String::as_str).ne(FEATURE_NAMES.iter().copied()) {
			return Err(ArtifactError::Incompatible(format!(
				"feature order {:?} does not match {:?}",
				self.feature_names, FEATURE_NAMES
			)));
		}
		self.scaler.check(FEATURE_COUNT)?;
		self.estimator.check(FEATURE_COUNT)
	}

	pub fn predict_row(&self, row: &[f64]) -> i32 {
		self.estimator.predict(&self.scaler.transform(row))
	}
}

impl Classifier for Pipeline {
	fn predict(&self, features: &FeatureVector) -> Result<i32, ArtifactError> {
		Ok(self.predict_row(features.as_slice()))
	}
}
