use crate::models::ClinicalInput;

pub const FEATURE_COUNT: usize = 11;

/// Column order the classifier was trained on. Artifacts carry their own copy
/// and are rejected at load time when it differs.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
	"age",
	"sex",
	"chest_pain_type",
	"resting_bp",
	"cholesterol",
	"fasting_bs",
	"resting_ecg",
	"max_hr",
	"exercise_angina",
	"oldpeak",
	"st_slope",
];

/// A single row of model input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector(pub [f64; FEATURE_COUNT]);

impl FeatureVector {
	pub fn as_slice(&self) -> &[f64] {
		&self.0
	}
}

impl From<&ClinicalInput> for FeatureVector {
	fn from(input: &ClinicalInput) -> Self {
		// Exhaustive destructuring: adding a field to ClinicalInput breaks this
		// until it is placed in the vector.
		let ClinicalInput {
			age,
			sex,
			chest_pain_type,
			resting_bp,
			cholesterol,
			fasting_bs,
			resting_ecg,
			max_hr,
			exercise_angina,
			oldpeak,
			st_slope,
		} = *input;

		FeatureVector([
			f64::from(age),
			f64::from(sex),
			f64::from(chest_pain_type),
			f64::from(resting_bp),
			f64::from(cholesterol),
			f64::from(fasting_bs),
			f64::from(resting_ecg),
			f64::from(max_hr),
			f64::from(exercise_angina),
			oldpeak,
			f64::from(st_slope),
		])
	}
}
