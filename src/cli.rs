//! Command-line arguments

use clap::{Parser, Subcommand};
use relay_core::RelayConfig;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "relay")]
#[command(version, about = "Run the architect → data engineer → UI developer → integrator agent chain")]
pub struct Cli {
    /// Workspace root holding the context documents (defaults to the current directory)
    #[arg(short, long, global = true)]
    pub workspace: Option<PathBuf>,

    /// Config file to use instead of .relay.toml / ~/.config/relay/config.toml
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run all four stages and write their outputs (default)
    Run(RunArgs),
    /// Write a sample .relay.toml into the workspace
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Debug, Default, clap::Args)]
pub struct RunArgs {
    /// Output directory, relative to the workspace
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Model for every agent
    #[arg(short, long)]
    pub model: Option<String>,
}

impl RunArgs {
    /// Flags win over file and environment values
    pub fn apply(&self, config: &mut RelayConfig) {
        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }
        if let Some(model) = &self.model {
            config.llm.model = model.clone();
        }
    }
}
