mod clinical_routes;
mod config;
mod db;
mod error;
mod features;
mod handler;
mod ledger_routes;
mod mapping;
mod ml;
mod models;
mod repo;
mod schema;
#[cfg(test)]
mod tests;
mod validation;
use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use anyhow::Context;
use clap::Parser;
use config::{Cli, Command, EvaluateArgs, ServeArgs, Variant};
use env_logger::Env;
use handler::ClinicalState;
use ml::{evaluate, Classifier, ModelSource, Pipeline};
use std::sync::Arc;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
	dotenvy::dotenv().ok();
	env_logger::init_from_env(Env::default().default_filter_or("info"));

	match Cli::parse().command {
		Command::Serve(args) => serve(args).await,
		Command::Evaluate(args) => run_evaluation(args),
	}
}

async fn serve(args: ServeArgs) -> anyhow::Result<()> {
	let pool = db::get_db_pool(&args.database_url)
		.with_context(|| format!("unable to open database {}", args.database_url))?;
	db::init(&pool).context("unable to initialize the db")?;

	let model = if args.preload_model {
		let pipeline = Pipeline::load(&args.model_path)?;
		log::info!("Preloaded model from {}", args.model_path.display());
		ModelSource::Preloaded(Arc::new(pipeline))
	} else {
		ModelSource::Reload(args.model_path.clone())
	};
	let clinical = ClinicalState { model, mapping_path: args.mapping_path.clone() };
	let variant = args.variant;

	log::info!("Serving the {:?} API on: {}..", variant, args.socket_url);

	HttpServer::new(move || {
		App::new()
			.app_data(web::Data::new(pool.clone()))
			.app_data(web::Data::new(clinical.clone()))
			.wrap(
				Cors::default()
					.allow_any_origin()
					.allow_any_method()
					.allow_any_header()
					.max_age(3600),
			)
			.wrap(actix_web::middleware::Logger::default())
			.configure(|cfg| match variant {
				Variant::Ledger => ledger_routes::init(cfg),
				Variant::Clinical => clinical_routes::init(cfg),
			})
	})
	.bind(&args.socket_url)
	.with_context(|| format!("unable to bind {}", args.socket_url))?
	.run()
	.await?;

	Ok(())
}

fn run_evaluation(args: EvaluateArgs) -> anyhow::Result<()> {
	let pipeline = Pipeline::load(&args.model_path)?;
	let dataset = evaluate::load_dataset(&args.data)?;
	let accuracy = evaluate::accuracy(&pipeline as &dyn Classifier, &dataset)?;

	log::info!(
		"Accuracy of {} on {} rows: {:.4}",
		args.model_path.display(),
		dataset.len(),
		accuracy
	);
	evaluate::check_accuracy(accuracy, args.min_accuracy)
}
