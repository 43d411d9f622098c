use serde::{Deserialize, Serialize};

use super::ArtifactError;

/// Per-column transform applied before the estimator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Scaler {
	#[default]
	Identity,
	/// `(x - min) / (max - min)`; a zero range divides by one.
	MinMax { min: Vec<f64>, max: Vec<f64> },
	/// `(x - mean) / scale`; a zero scale divides by one.
	Standard { mean: Vec<f64>, scale: Vec<f64> },
}

impl Scaler {
	pub fn check(&self, width: usize) -> Result<(), ArtifactError> {
		let (a, b, name) = match self {
			Scaler::Identity => return Ok(()),
			Scaler::MinMax { min, max } => (min.len(), max.len(), "min_max"),
			Scaler::Standard { mean, scale } => (mean.len(), scale.len(), "standard"),
		};
		if a != width || b != width {
			return Err(ArtifactError::Incompatible(format!(
				"{} scaler has {}/{} columns, expected {}",
				name, a, b, width
			)));
		}
		Ok(())
	}

	pub fn transform(&self, row: &[f64]) -> Vec<f64> {
		match self {
			Scaler::Identity => row.to_vec(),
			Scaler::MinMax { min, max } => row
				.iter()
				.zip(min.iter().zip(max))
				.map(|(x, (lo, hi))| (x - lo) / non_zero(hi - lo))
				.collect(),
			Scaler::Standard { mean, scale } => row
				.iter()
				.zip(mean.iter().zip(scale))
				.map(|(x, (mu, s))| (x - mu) / non_zero(*s))
				.collect(),
		}
	}
}

fn non_zero(value: f64) -> f64 {
	if value == 0.0 {
		1.0
	} else {
		value
	}
}
