use crate::{
	features::{FeatureVector, FEATURE_NAMES},
	ml::{
		estimator::Estimator,
		evaluate::{accuracy, check_accuracy, load_dataset},
		scaler::Scaler,
		ArtifactError, Classifier, ModelSource, Pipeline,
	},
	tests::{
		fixtures::{TestFixtures, HEALTHY, SICK},
		test_utils::{temp_path, write_artifact, write_temp_file},
	},
};

fn features(input: crate::models::ClinicalInput) -> FeatureVector {
	FeatureVector::from(&input)
}

#[test]
fn test_feature_vector_follows_training_order() {
	let input = TestFixtures::sick_input();
	let vector = FeatureVector::from(&input);

	assert_eq!(vector.0, SICK);
	assert_eq!(FEATURE_NAMES[0], "age");
	assert_eq!(FEATURE_NAMES[9], "oldpeak");
	assert_eq!(FEATURE_NAMES[10], "st_slope");
}

#[test]
fn test_load_artifact_from_disk() {
	let pipeline = TestFixtures::knn_pipeline();
	let path = write_artifact(&pipeline);

	let loaded = Pipeline::load(&path).unwrap();
	assert_eq!(loaded, pipeline);
}

#[test]
fn test_load_missing_artifact() {
	let err = Pipeline::load(temp_path("json")).unwrap_err();
	assert!(matches!(err, ArtifactError::Io { .. }), "unexpected error: {err}");
}

#[test]
fn test_load_corrupt_artifact() {
	let path = write_temp_file("json", "\u{80}not a pipeline");
	let err = Pipeline::load(&path).unwrap_err();
	assert!(matches!(err, ArtifactError::Corrupt { .. }), "unexpected error: {err}");
}

#[test]
fn test_load_rejects_unknown_version() {
	let mut pipeline = TestFixtures::knn_pipeline();
	pipeline.format_version = 7;
	let path = write_artifact(&pipeline);

	let err = Pipeline::load(&path).unwrap_err();
	assert!(matches!(err, ArtifactError::UnsupportedVersion { found: 7, expected: 1 }));
}

#[test]
fn test_load_rejects_different_feature_order() {
	let mut pipeline = TestFixtures::knn_pipeline();
	pipeline.feature_names.swap(0, 1);
	let path = write_artifact(&pipeline);

	let err = Pipeline::load(&path).unwrap_err();
	assert!(matches!(err, ArtifactError::Incompatible(_)), "unexpected error: {err}");
}

#[test]
fn test_check_rejects_inconsistent_estimators() {
	let too_many_neighbours = TestFixtures::pipeline(
		Scaler::Identity,
		Estimator::Knn { k: 3, points: vec![HEALTHY.to_vec()], labels: vec![0] },
	);
	assert!(too_many_neighbours.check().is_err());

	let short_row = TestFixtures::pipeline(
		Scaler::Identity,
		Estimator::Knn { k: 1, points: vec![vec![1.0, 2.0]], labels: vec![0] },
	);
	assert!(short_row.check().is_err());

	let bad_label = TestFixtures::pipeline(
		Scaler::Identity,
		Estimator::Knn { k: 1, points: vec![HEALTHY.to_vec()], labels: vec![2] },
	);
	assert!(bad_label.check().is_err());

	let zero_variance = TestFixtures::pipeline(
		Scaler::Identity,
		Estimator::GaussianNb {
			classes: vec![0, 1],
			priors: vec![0.5, 0.5],
			means: vec![HEALTHY.to_vec(), SICK.to_vec()],
			variances: vec![vec![0.0; 11], vec![1.0; 11]],
		},
	);
	assert!(zero_variance.check().is_err());

	let bad_scaler = TestFixtures::pipeline(
		Scaler::Standard { mean: vec![0.0; 3], scale: vec![1.0; 3] },
		Estimator::Knn { k: 1, points: vec![HEALTHY.to_vec()], labels: vec![0] },
	);
	assert!(bad_scaler.check().is_err());
}

#[test]
fn test_knn_predicts_nearest_class() {
	let pipeline = TestFixtures::knn_pipeline();

	assert_eq!(pipeline.predict(&features(TestFixtures::healthy_input())).unwrap(), 0);
	assert_eq!(pipeline.predict(&features(TestFixtures::sick_input())).unwrap(), 1);
}

#[test]
fn test_knn_tie_goes_to_smallest_label() {
	let mut far = HEALTHY;
	far[0] += 10.0;
	let mut near = HEALTHY;
	near[0] -= 10.0;
	let pipeline = TestFixtures::pipeline(
		Scaler::Identity,
		Estimator::Knn { k: 2, points: vec![far.to_vec(), near.to_vec()], labels: vec![1, 0] },
	);

	assert_eq!(pipeline.predict_row(&HEALTHY), 0);
}

#[test]
fn test_gaussian_nb_predicts_closest_mean() {
	let pipeline = TestFixtures::gaussian_nb_pipeline();

	assert_eq!(pipeline.predict_row(&HEALTHY), 0);
	assert_eq!(pipeline.predict_row(&SICK), 1);
}

#[test]
fn test_prediction_is_deterministic() {
	let path = write_artifact(&TestFixtures::knn_pipeline());
	let source = ModelSource::Reload(path.to_path_buf());
	let row = features(TestFixtures::sick_input());

	let first = source.classifier().unwrap().predict(&row).unwrap();
	let second = source.classifier().unwrap().predict(&row).unwrap();
	assert_eq!(first, second);
}

#[test]
fn test_scalers() {
	let min_max = Scaler::MinMax { min: vec![0.0, 5.0], max: vec![10.0, 5.0] };
	assert_eq!(min_max.transform(&[5.0, 7.0]), vec![0.5, 2.0]);

	let standard = Scaler::Standard { mean: vec![10.0, 1.0], scale: vec![2.0, 0.0] };
	assert_eq!(standard.transform(&[14.0, 3.0]), vec![2.0, 2.0]);

	assert_eq!(Scaler::Identity.transform(&[1.5, -2.0]), vec![1.5, -2.0]);
}

#[test]
fn test_scaled_pipeline_from_json() {
	let mut min = HEALTHY.to_vec();
	let mut max = SICK.to_vec();
	for (lo, hi) in min.iter_mut().zip(max.iter_mut()) {
		if lo > hi {
			std::mem::swap(lo, hi);
		}
	}
	let scaler = Scaler::MinMax { min, max };
	let points = vec![scaler.transform(&HEALTHY), scaler.transform(&SICK)];
	let json = serde_json::json!({
		"format_version": 1,
		"feature_names": FEATURE_NAMES,
		"scaler": scaler,
		"estimator": { "kind": "knn", "k": 1, "points": points, "labels": [0, 1] },
	});
	let path = write_temp_file("json", &json.to_string());

	let pipeline = Pipeline::load(&path).unwrap();
	assert_eq!(pipeline.predict_row(&HEALTHY), 0);
	assert_eq!(pipeline.predict_row(&SICK), 1);
}

fn csv_row(row: &[f64; 11], label: i32) -> String {
	let mut fields: Vec<String> = row.iter().map(|v| v.to_string()).collect();
	fields.push(label.to_string());
	fields.join(",")
}

#[test]
fn test_accuracy_on_labelled_dataset() {
	let header = "age,sex,chest,rest,cholesterol,fasting,resting,max,exercise,oldpeak,stslope,target";
	let csv = [
		header.to_string(),
		csv_row(&HEALTHY, 0),
		csv_row(&SICK, 1),
		csv_row(&SICK, 1),
		// mislabelled on purpose
		csv_row(&HEALTHY, 1),
	]
	.join("\n");
	let path = write_temp_file("csv", &csv);

	let dataset = load_dataset(&path).unwrap();
	assert_eq!(dataset.len(), 4);

	let pipeline = TestFixtures::knn_pipeline();
	let score = accuracy(&pipeline, &dataset).unwrap();
	assert!((score - 0.75).abs() < f64::EPSILON, "accuracy was {score}");

	let err = check_accuracy(score, 0.78).unwrap_err();
	assert_eq!(err.to_string(), "accuracy 0.7500 is below the required 0.7800");
	assert!(check_accuracy(score, 0.75).is_ok());
}

#[test]
fn test_accuracy_threshold() {
	assert!(check_accuracy(1.0, 0.78).is_ok());
	assert!(check_accuracy(0.78, 0.78).is_ok());
	assert!(check_accuracy(0.7799, 0.78).is_err());
	assert!(check_accuracy(0.0, 0.78).is_err());
}

#[test]
fn test_dataset_rejects_wrong_column_count() {
	let path = write_temp_file("csv", "a,b,c\n1,2,3\n");
	assert!(load_dataset(&path).is_err());
}
