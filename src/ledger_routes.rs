use crate::{
	error::configure_extractors,
	handler::{CategoryHandler, LedgerHandler},
};
use actix_web::web;

pub fn init(cfg: &mut web::ServiceConfig) {
	cfg.service(
		web::scope("/api")
			.configure(configure_extractors)
			// transactions
			.route("/transactions", web::get().to(LedgerHandler::list_transactions_handler))
			.route("/transaction", web::post().to(LedgerHandler::create_transaction_handler))
			.route("/transaction/{id}", web::delete().to(LedgerHandler::delete_transaction_handler))
			// categories
			.route("/categories", web::get().to(CategoryHandler::list_categories_handler))
			.route("/category", web::post().to(CategoryHandler::create_category_handler)),
	);
}
