use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cds_domain::exclusion::ExclusionRules;
use cds_service::postprocess;

#[derive(Debug, Parser)]
#[command(
	version = cds_cli::VERSION,
	rename_all = "kebab",
	styles = cds_cli::styles(),
)]
pub struct Args {
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: PathBuf,
	/// First-stage scores: `{ "<topic>": { "<trial>": score } }`.
	#[arg(long, short = 'r', value_name = "FILE")]
	pub results: PathBuf,
	/// Patient attributes as JSON lines, in topic order.
	#[arg(long, short = 'p', value_name = "FILE")]
	pub patients: PathBuf,
	/// Trial attributes with entity-tagged criteria as JSON lines.
	#[arg(long, short = 't', value_name = "FILE")]
	pub trials: PathBuf,
	#[arg(long, short = 'o', value_name = "FILE")]
	pub output: PathBuf,
}

pub fn run(args: Args) -> color_eyre::Result<()> {
	let config = cds_config::load(&args.config)?;
	let filter = EnvFilter::new(config.service.log_level.clone());

	tracing_subscriber::fmt().with_env_filter(filter).init();

	let results = postprocess::load_results(&args.results)?;
	let patients = postprocess::load_patients(&args.patients)?;
	let trials = postprocess::load_trials(&args.trials, &config.filter)?;

	tracing::info!(
		topics = results.len(),
		patients = patients.len(),
		trials = trials.len(),
		"Loaded postprocessing inputs."
	);

	let rules = ExclusionRules::from_config(&config.filter);
	let report = postprocess::postprocess(&results, &patients, &trials, &rules)?;

	for (reason, count) in report.reason_totals() {
		tracing::info!(reason = %reason, count, "Exclusions by reason.");
	}

	postprocess::write_results(&args.output, &report.retained)?;

	tracing::info!(output = %args.output.display(), "Wrote postprocessed results.");

	Ok(())
}
