//! CLI entry point for vnhash.

use clap::Parser;
use vnhash_cli::{logging, CliConfig};

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();
    logging::init(config.verbose)?;
    config.run()
}
