use clap::Parser;

use cds_postprocess::Args;

fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = Args::parse();

	cds_postprocess::run(args)
}
