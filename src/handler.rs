use std::path::PathBuf;

use crate::{
	db::DbPool,
	error::ApiError,
	features::FeatureVector,
	mapping,
	ml::ModelSource,
	models::{ApiResponse, CategoryPayload, ClinicalPayload, ListParams, TransactionPayload},
	repo::{CategoryRepo, ClinicalRepo, LedgerRepo},
};
use actix_web::{web, HttpResponse};

/// Shared, read-only settings for the clinical routes.
#[derive(Clone)]
pub struct ClinicalState {
	pub model: ModelSource,
	pub mapping_path: PathBuf,
}

#[derive(Debug)]
pub struct CategoryHandler {}

impl CategoryHandler {
	pub async fn create_category_handler(
		pool: web::Data<DbPool>,
		req: web::Json<CategoryPayload>,
	) -> Result<HttpResponse, ApiError> {
		let name = req.into_inner().into_valid()?;
		log::info!("Attempting to create category: {}", name);

		let category = web::block(move || {
			let mut conn = pool.get()?;
			CategoryRepo::create_category(&mut conn, &name)
		})
		.await??;

		Ok(HttpResponse::Ok().json(ApiResponse::success(category)))
	}

	pub async fn list_categories_handler(pool: web::Data<DbPool>) -> Result<HttpResponse, ApiError> {
		let totals = web::block(move || {
			let mut conn = pool.get()?;
			LedgerRepo::list_categories_with_totals(&mut conn)
		})
		.await??;

		log::info!("Successfully computed totals for {} categories", totals.len());
		Ok(HttpResponse::Ok().json(ApiResponse::success(totals)))
	}
}

#[derive(Debug)]
pub struct LedgerHandler {}

impl LedgerHandler {
	pub async fn create_transaction_handler(
		pool: web::Data<DbPool>,
		req: web::Json<TransactionPayload>,
	) -> Result<HttpResponse, ApiError> {
		let new_transaction = req.into_inner().into_valid()?;
		log::info!(
			"Creating {} of {} cents in category {}",
			new_transaction.kind.as_str(),
			new_transaction.amount_cents,
			new_transaction.category_id
		);

		let transaction = web::block(move || {
			let mut conn = pool.get()?;
			LedgerRepo::create_transaction(&mut conn, &new_transaction)
		})
		.await??;

		Ok(HttpResponse::Ok().json(ApiResponse::success(transaction)))
	}

	pub async fn list_transactions_handler(
		pool: web::Data<DbPool>,
		params: web::Query<ListParams>,
	) -> Result<HttpResponse, ApiError> {
		let order = params.order()?;
		log::info!("Listing transactions ordered {:?}", order);

		let transactions = web::block(move || {
			let mut conn = pool.get()?;
			LedgerRepo::list_transactions(&mut conn, order)
		})
		.await??;

		log::info!("Successfully retrieved {} transactions", transactions.len());
		Ok(HttpResponse::Ok().json(ApiResponse::success(transactions)))
	}

	pub async fn delete_transaction_handler(
		pool: web::Data<DbPool>,
		path: web::Path<i32>,
	) -> Result<HttpResponse, ApiError> {
		let transaction_id = path.into_inner();

		web::block(move || {
			let mut conn = pool.get()?;
			LedgerRepo::delete_transaction(&mut conn, transaction_id)
		})
		.await??;

		Ok(HttpResponse::Ok().json(ApiResponse::success("Transaction successfully deleted")))
	}
}

#[derive(Debug)]
pub struct ClinicalHandler {}

impl ClinicalHandler {
	/// Validates the measurements, scores them and stores inputs plus label.
	/// A failing classifier means nothing is written.
	pub async fn create_transaction_handler(
		pool: web::Data<DbPool>,
		state: web::Data<ClinicalState>,
		req: web::Json<ClinicalPayload>,
	) -> Result<HttpResponse, ApiError> {
		let input = req.into_inner().into_valid()?;
		let features = FeatureVector::from(&input);
		let model = state.model.clone();

		let record = web::block(move || {
			let classifier = model.classifier()?;
			let heart_disease = classifier.predict(&features)?;
			log::info!("Classifier predicted heart_disease={}", heart_disease);

			let mut conn = pool.get()?;
			ClinicalRepo::create_transaction(&mut conn, input, heart_disease)
		})
		.await??;

		Ok(HttpResponse::Ok().json(ApiResponse::success(record)))
	}

	pub async fn list_transactions_handler(
		pool: web::Data<DbPool>,
		params: web::Query<ListParams>,
	) -> Result<HttpResponse, ApiError> {
		let order = params.order()?;

		let records = web::block(move || {
			let mut conn = pool.get()?;
			ClinicalRepo::list_transactions(&mut conn, order)
		})
		.await??;

		log::info!("Successfully retrieved {} clinical transactions", records.len());
		Ok(HttpResponse::Ok().json(ApiResponse::success(records)))
	}

	pub async fn delete_transaction_handler(
		pool: web::Data<DbPool>,
		path: web::Path<i32>,
	) -> Result<HttpResponse, ApiError> {
		let transaction_id = path.into_inner();

		web::block(move || {
			let mut conn = pool.get()?;
			ClinicalRepo::delete_transaction(&mut conn, transaction_id)
		})
		.await??;

		Ok(HttpResponse::Ok().json(ApiResponse::success("Transaction successfully deleted")))
	}

	pub async fn mapping_handler(state: web::Data<ClinicalState>) -> Result<HttpResponse, ApiError> {
		let path = state.mapping_path.clone();
		let mapping = web::block(move || mapping::load_mapping(&path)).await??;
		Ok(HttpResponse::Ok().json(ApiResponse::success(mapping)))
	}
}
