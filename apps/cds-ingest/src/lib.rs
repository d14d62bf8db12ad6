use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cds_service::EligibilityFilter;
use cds_storage::{records::RecordStore, redis_store::RedisStore};

#[derive(Debug, Parser)]
#[command(
	version = cds_cli::VERSION,
	rename_all = "kebab",
	styles = cds_cli::styles(),
)]
pub struct Args {
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: PathBuf,
	/// Overrides `storage.bootstrap.collection_path`.
	#[arg(long, value_name = "FILE")]
	pub collection: Option<PathBuf>,
	/// Overrides `storage.bootstrap.topics_path`.
	#[arg(long, value_name = "FILE")]
	pub topics: Option<PathBuf>,
	/// Clear the store before loading.
	#[arg(long)]
	pub flush: bool,
	/// After loading, check one topic against `--trial`.
	#[arg(long, value_name = "QID", requires = "trial")]
	pub topic: Option<i64>,
	#[arg(long, value_name = "NCT_ID", requires = "topic")]
	pub trial: Option<String>,
}

pub fn run(args: Args) -> color_eyre::Result<()> {
	let mut config = cds_config::load(&args.config)?;
	let filter = EnvFilter::new(config.service.log_level.clone());

	tracing_subscriber::fmt().with_env_filter(filter).init();

	if let Some(path) = args.collection {
		config.storage.bootstrap.collection_path = Some(path);
	}
	if let Some(path) = args.topics {
		config.storage.bootstrap.topics_path = Some(path);
	}

	let records = RecordStore::new(RedisStore::connect(&config.storage.redis)?);

	if args.flush {
		records.flush()?;
	}

	let report = records.bootstrap(&config.storage.bootstrap)?;

	tracing::info!(
		documents = report.documents.map(|load| load.records),
		topics = report.topics.map(|load| load.records),
		"Bootstrap complete."
	);

	if let (Some(topic), Some(trial)) = (args.topic, args.trial.as_deref()) {
		let eligible = EligibilityFilter::new(&records).check(topic, trial)?;

		println!("topic {topic} / {trial}: {}", if eligible { "eligible" } else { "not eligible" });
	}

	Ok(())
}
