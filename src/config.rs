use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Debug, Parser)]
#[command(version, about = "Ledger and clinical record API with a pre-trained classifier")]
pub struct Cli {
	#[command(subcommand)]
	pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
	/// Run the HTTP API.
	Serve(ServeArgs),
	/// Measure a model artifact's accuracy on a labelled CSV dataset.
	Evaluate(EvaluateArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Variant {
	Ledger,
	Clinical,
}

#[derive(Debug, Clone, clap::Args)]
pub struct ServeArgs {
	#[arg(long, env = "APP_VARIANT", value_enum, default_value_t = Variant::Ledger)]
	pub variant: Variant,

	/// SQLite database file.
	#[arg(long, env = "DATABASE_URL", default_value = "database.db")]
	pub database_url: String,

	#[arg(long, env = "SOCKET_URL", default_value = "127.0.0.1:5000")]
	pub socket_url: String,

	#[arg(long, env = "MODEL_PATH", default_value = "./machine-learning/pipelines/knn_norm.json")]
	pub model_path: PathBuf,

	#[arg(long, env = "MAPPING_PATH", default_value = "./assets/mapping.json")]
	pub mapping_path: PathBuf,

	/// Load the model once at start-up instead of on every request.
	#[arg(long, env = "PRELOAD_MODEL")]
	pub preload_model: bool,
}

#[derive(Debug, Clone, clap::Args)]
pub struct EvaluateArgs {
	#[arg(long, env = "MODEL_PATH")]
	pub model_path: PathBuf,

	/// CSV with a header, eleven feature columns and the label last.
	#[arg(long)]
	pub data: PathBuf,

	#[arg(long, default_value_t = 0.78)]
	pub min_accuracy: f64,
}
