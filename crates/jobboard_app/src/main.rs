mod cli;
mod platform;

use clap::Parser;
use log::LevelFilter;

fn main() -> anyhow::Result<()> {
    let args = cli::Args::parse();
    engine_logging::initialize(args.log.into(), LevelFilter::Info, &args.log_file);
    platform::run_app(args)
}
