use crate::{
	error::configure_extractors,
	handler::{CategoryHandler, ClinicalHandler},
};
use actix_web::web;

pub fn init(cfg: &mut web::ServiceConfig) {
	cfg.service(
		web::scope("/api")
			.configure(configure_extractors)
			.route("/transactions", web::get().to(ClinicalHandler::list_transactions_handler))
			.route("/transaction", web::post().to(ClinicalHandler::create_transaction_handler))
			.route(
				"/transaction/{id}",
				web::delete().to(ClinicalHandler::delete_transaction_handler),
			)
			.route("/category", web::post().to(CategoryHandler::create_category_handler))
			.route("/mapping", web::get().to(ClinicalHandler::mapping_handler)),
	);
}
