use std::{collections::BTreeMap, f64::consts::PI};

use serde::{Deserialize, Serialize};

use super::ArtifactError;

const LABELS: [i32; 2] = [0, 1];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Estimator {
	/// k-nearest neighbours over the stored (already scaled) training rows,
	/// Euclidean distance, uniform weights.
	Knn { k: usize, points: Vec<Vec<f64>>, labels: Vec<i32> },
	/// Gaussian naive Bayes. `variances` already include any smoothing
	/// applied at training time.
	GaussianNb {
		classes: Vec<i32>,
		priors: Vec<f64>,
		means: Vec<Vec<f64>>,
		variances: Vec<Vec<f64>>,
	},
}

impl Estimator {
	pub fn check(&self, width: usize) -> Result<(), ArtifactError> {
		match self {
			Estimator::Knn { k, points, labels } => {
				if points.is_empty() {
					return incompatible("knn has no training points".to_string());
				}
				if *k == 0 || *k > points.len() {
					return incompatible(format!("knn k={} with {} points", k, points.len()));
				}
				if labels.len() != points.len() {
					return incompatible(format!(
						"knn has {} labels for {} points",
						labels.len(),
						points.len()
					));
				}
				check_rows("knn point", points, width)?;
				check_labels(labels)
			},
			Estimator::GaussianNb { classes, priors, means, variances } => {
				if classes.is_empty() {
					return incompatible("gaussian_nb has no classes".to_string());
				}
				if priors.len() != classes.len() ||
					means.len() != classes.len() ||
					variances.len() != classes.len()
				{
					return incompatible(format!(
						"gaussian_nb parameter counts differ from {} classes",
						classes.len()
					));
				}
				check_rows("gaussian_nb mean", means, width)?;
				check_rows("gaussian_nb variance", variances, width)?;
				if priors.iter().any(|p| *p <= 0.0) {
					return incompatible("gaussian_nb priors must be positive".to_string());
				}
				if variances.iter().flatten().any(|v| *v <= 0.0) {
					return incompatible("gaussian_nb variances must be positive".to_string());
				}
				check_labels(classes)
			},
		}
	}

	/// Expects a row already passed through the pipeline's scaler and a model
	/// that passed [`Estimator::check`].
	pub fn predict(&self, row: &[f64]) -> i32 {
		match self {
			Estimator::Knn { k, points, labels } => {
				let mut neighbours: Vec<(f64, i32)> = points
					.iter()
					.zip(labels)
					.map(|(point, label)| (squared_distance(point, row), *label))
					.collect();
				// Stable sort: equal distances keep training order.
				neighbours.sort_by(|a, b| a.0.total_cmp(&b.0));

				let mut votes: BTreeMap<i32, usize> = BTreeMap::new();
				for (_, label) in neighbours.iter().take(*k) {
					*votes.entry(*label).or_default() += 1;
				}
				// Ties go to the smallest label.
				let mut best = (LABELS[0], 0);
				for (label, count) in votes {
					if count > best.1 {
						best = (label, count);
					}
				}
				best.0
			},
			Estimator::GaussianNb { classes, priors, means, variances } => {
				let mut best = (classes[0], f64::NEG_INFINITY);
				for (i, class) in classes.iter().enumerate() {
					let log_likelihood: f64 = row
						.iter()
						.zip(means[i].iter().zip(&variances[i]))
						.map(|(x, (mu, var))| (2.0 * PI * var).ln() + (x - mu).powi(2) / var)
						.sum();
					let score = priors[i].ln() - 0.5 * log_likelihood;
					if score > best.1 {
						best = (*class, score);
					}
				}
				best.0
			},
		}
	}
}

fn squared_distance(a: &[f64], b: &[f64]) -> f64 {
	a.iter().zip(b).map(|(x, y)| (x - y).powi(2)).sum()
}

fn incompatible(message: String) -> Result<(), ArtifactError> {
	Err(ArtifactError::Incompatible(message))
}

fn check_rows(what: &str, rows: &[Vec<f64>], width: usize) -> Result<(), ArtifactError> {
	match rows.iter().position(|row| row.len() != width) {
		Some(i) => incompatible(format!(
			"{} {} has {} columns, expected {}",
			what,
			i,
			rows[i].len(),
			width
		)),
		None => Ok(()),
	}
}

fn check_labels(labels: &[i32]) -> Result<(), ArtifactError> {
	match labels.iter().find(|label| !LABELS.contains(label)) {
		Some(label) => incompatible(format!("label {} is not 0 or 1", label)),
		None => Ok(()),
	}
}
