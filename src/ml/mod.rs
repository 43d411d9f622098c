//! Inference over pre-trained pipeline artifacts.
//!
//! Training happens elsewhere; this module only reads the exported artifact
//! and runs single-row predictions against it.

pub mod estimator;
pub mod evaluate;
pub mod pipeline;
pub mod scaler;

use std::{path::PathBuf, sync::Arc};

use thiserror::Error;

use crate::features::FeatureVector;
pub use pipeline::Pipeline;

#[derive(Debug, Error)]
pub enum ArtifactError {
	#[error("model artifact {} could not be read: {source}", .path.display())]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("model artifact {} is corrupt: {source}", .path.display())]
	Corrupt {
		path: PathBuf,
		#[source]
		source: serde_json::Error,
	},

	#[error("model artifact format version {found} is not supported (expected {expected})")]
	UnsupportedVersion { found: u32, expected: u32 },

	#[error("model artifact is incompatible: {0}")]
	Incompatible(String),
}

/// Binary classifier over a single feature row. Labels are 0 or 1.
#[cfg_attr(test, mockall::automock)]
pub trait Classifier: Send + Sync {
	fn predict(&self, features: &FeatureVector) -> Result<i32, ArtifactError>;
}

/// Where the create handler gets its classifier from.
#[derive(Clone)]
pub enum ModelSource {
	/// Read the artifact from disk on every request.
	Reload(PathBuf),
	/// Loaded once at start-up and shared read-only.
	Preloaded(Arc<dyn Classifier>),
}

impl ModelSource {
	pub fn classifier(&self) -> Result<Arc<dyn Classifier>, ArtifactError> {
		match self {
			ModelSource::Reload(path) => Ok(Arc::new(Pipeline::load(path)?)),
			ModelSource::Preloaded(classifier) => Ok(Arc::clone(classifier)),
		}
	}
}
