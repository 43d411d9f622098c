use actix_web::{error::BlockingError, http::StatusCode, web, HttpResponse, ResponseError};
use diesel::{
	r2d2::PoolError,
	result::{DatabaseErrorKind, Error as DieselError},
};
use thiserror::Error;
use validator::ValidationErrors;

use crate::{ml::ArtifactError, models::ApiResponse};

/// Every failure a handler can produce. Each variant maps to one status code;
/// the message is returned to the client as-is.
#[derive(Debug, Error)]
pub enum ApiError {
	#[error("{}", format_validation(.0))]
	Validation(#[from] ValidationErrors),

	#[error("{0}")]
	BadRequest(String),

	#[error("{0}")]
	InvalidArgument(String),

	#[error("{0}")]
	Conflict(String),

	#[error("{0}")]
	Reference(String),

	#[error("{0} not found")]
	NotFound(&'static str),

	#[error(transparent)]
	Artifact(#[from] ArtifactError),

	#[error("Database error: {0}")]
	Database(diesel::result::Error),

	#[error("Database connection error: {0}")]
	Pool(#[from] PoolError),

	#[error("{0}")]
	Internal(String),
}

/// Constraint violations become client errors; everything else is a 500.
impl From<diesel::result::Error> for ApiError {
	fn from(e: diesel::result::Error) -> Self {
		match e {
			DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) =>
				ApiError::Conflict(info.message().to_string()),
			DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) =>
				ApiError::Reference(info.message().to_string()),
			other => ApiError::Database(other),
		}
	}
}

impl From<BlockingError> for ApiError {
	fn from(e: BlockingError) -> Self {
		ApiError::Internal(e.to_string())
	}
}

impl ResponseError for ApiError {
	fn status_code(&self) -> StatusCode {
		match self {
			ApiError::Validation(_) |
			ApiError::BadRequest(_) |
			ApiError::InvalidArgument(_) |
			ApiError::Conflict(_) |
			ApiError::Reference(_) => StatusCode::BAD_REQUEST,
			ApiError::NotFound(_) => StatusCode::NOT_FOUND,
			ApiError::Artifact(_) |
			ApiError::Database(_) |
			ApiError::Pool(_) |
			ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
		}
	}

	fn error_response(&self) -> HttpResponse {
		let status = self.status_code();
		if status.is_server_error() {
			log::error!("Request failed: {}", self);
		} else {
			log::warn!("Request rejected: {}", self);
		}
		HttpResponse::build(status).json(ApiResponse::<()>::error(self.to_string()))
	}
}

/// Flattens field errors into `field: message` pairs sorted by field name so
/// the output is stable.
fn format_validation(errors: &ValidationErrors) -> String {
	let mut fields: Vec<String> = errors
		.field_errors()
		.into_iter()
		.map(|(field, errs)| {
			let messages: Vec<String> = errs
				.iter()
				.map(|e| match &e.message {
					Some(message) => message.to_string(),
					None => e.code.to_string(),
				})
				.collect();
			format!("{}: {}", field, messages.join(", "))
		})
		.collect();
	fields.sort();
	format!("Validation error: {}", fields.join("; "))
}

/// Body, query and path extraction failures use the same envelope as every
/// other error. A non-numeric path id cannot name a row, so it is a 404.
pub fn configure_extractors(cfg: &mut web::ServiceConfig) {
	cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
		ApiError::BadRequest(format!("Validation error: {}", err)).into()
	}))
	.app_data(
		web::QueryConfig::default()
			.error_handler(|err, _req| ApiError::BadRequest(err.to_string()).into()),
	)
	.app_data(
		web::PathConfig::default().error_handler(|_err, _req| ApiError::NotFound("Transaction").into()),
	);
}
