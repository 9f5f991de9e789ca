//! CLI tool for inspecting virtual-node hash rings.
//!
//! Provides commands for:
//! - Routing keys to nodes
//! - Measuring how evenly keys spread over nodes

pub mod commands;
pub mod config;
pub mod logging;

pub use commands::{Command, CommandResult, NodeSpec};
pub use config::CliConfig;
