//! Accuracy of a classifier over a labelled CSV dataset.
//!
//! The dataset has a header row, the eleven feature columns in training
//! order, and the 0/1 label in the last column.

use std::path::Path;

use anyhow::{bail, Context};

use super::{ArtifactError, Classifier};
use crate::features::{FeatureVector, FEATURE_COUNT};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
	pub rows: Vec<FeatureVector>,
	pub labels: Vec<i32>,
}

impl Dataset {
	pub fn len(&self) -> usize {
		self.rows.len()
	}

	pub fn is_empty(&self) -> bool {
		self.rows.is_empty()
	}
}

pub fn load_dataset(path: impl AsRef<Path>) -> anyhow::Result<Dataset> {
	let path = path.as_ref();
	let mut reader = csv::Reader::from_path(path)
		.with_context(|| format!("unable to open dataset {}", path.display()))?;
	let mut dataset = Dataset::default();

	for (i, record) in reader.records().enumerate() {
		// Header is line 1.
		let line = i + 2;
		let record = record.with_context(|| format!("{}: bad CSV record", line))?;
		if record.len() != FEATURE_COUNT + 1 {
			bail!("{}: expected {} columns, found {}", line, FEATURE_COUNT + 1, record.len());
		}

		let mut values = [0.0; FEATURE_COUNT + 1];
		for (slot, field) in values.iter_mut().zip(record.iter()) {
			*slot = field
				.trim()
				.parse::<f64>()
				.with_context(|| format!("{}: '{}' is not a number", line, field))?;
		}

		let label = values[FEATURE_COUNT];
		if label != 0.0 && label != 1.0 {
			bail!("{}: label {} is not 0 or 1", line, label);
		}

		let mut features = [0.0; FEATURE_COUNT];
		features.copy_from_slice(&values[..FEATURE_COUNT]);
		dataset.rows.push(FeatureVector(features));
		dataset.labels.push(label as i32);
	}

	Ok(dataset)
}

/// Fraction of rows whose prediction equals the label. An empty dataset
/// scores zero.
pub fn accuracy(classifier: &dyn Classifier, dataset: &Dataset) -> Result<f64, ArtifactError> {
	if dataset.is_empty() {
		return Ok(0.0);
	}
	let mut correct = 0usize;
	for (row, label) in dataset.rows.iter().zip(&dataset.labels) {
		if classifier.predict(row)? == *label {
			correct += 1;
		}
	}
	Ok(correct as f64 / dataset.len() as f64)
}

/// Fails when `accuracy` is below `min_accuracy`.
pub fn check_accuracy(accuracy: f64, min_accuracy: f64) -> anyhow::Result<()> {
	if accuracy < min_accuracy {
		bail!("accuracy {:.4} is below the required {:.4}", accuracy, min_accuracy);
	}
	Ok(())
}
