use clap::Parser;

use cds_ingest::Args;

fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = Args::parse();

	cds_ingest::run(args)
}
