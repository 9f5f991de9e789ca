//! Command-line configuration.

use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgAction, Parser};
use tracing::info;
use vnhash::{HashAlgorithm, RingConfig};

use crate::commands::Command;

/// Inspect key routing on a virtual-node consistent hash ring.
#[derive(Debug, Parser)]
#[command(name = "vnhash", version)]
pub struct CliConfig {
    /// JSON ring config, e.g. {"replicas": 200, "hasher": "xxh3"}
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Replica count per node (overrides the config file)
    #[arg(long, global = true)]
    pub replicas: Option<usize>,

    /// Hash algorithm: xxh3, fnv1 or sip13 (overrides the config file)
    #[arg(long, global = true)]
    pub hasher: Option<HashAlgorithm>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

impl CliConfig {
    /// Resolves ring settings: config file first, then flag overrides.
    pub fn ring_config(&self) -> anyhow::Result<RingConfig> {
        let mut config = match &self.config {
            Some(path) => RingConfig::from_path(path)
                .with_context(|| format!("loading ring config from {}", path.display()))?,
            None => RingConfig::default(),
        };

        if let Some(replicas) = self.replicas {
            config.replicas = replicas;
        }
        if let Some(hasher) = self.hasher {
            config.hasher = hasher;
        }
        Ok(config)
    }

    /// Runs the selected command and prints its result to stdout.
    ///
    /// Logging is set up by the caller (see [`crate::logging::init`]).
    pub fn run(&self) -> anyhow::Result<()> {
        let ring_config = self.ring_config()?;
        info!(replicas = ring_config.replicas, hasher = %ring_config.hasher, "building ring");

        let result = self.command.execute(&ring_config);
        print!("{result}");
        Ok(())
    }
}
