//! Relay - sequential role-agent prompt chain
//!
//! Loads the workspace context, runs the architect, data engineer,
//! UI developer and integrator agents in order, and writes each agent's
//! output to a numbered markdown file.

mod cli;

use anyhow::{bail, Context, Result};
use clap::Parser;
use cli::{Cli, Command, RunArgs};
use relay_core::config::{config_path, save_config};
use relay_core::{load_config, Pipeline, PipelineReport, Role};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let workspace = resolve_workspace(cli.workspace.as_deref())?;
    tracing::debug!("relay {} in {}", relay_core::version(), workspace.display());

    let pinned = cli.workspace.is_some();
    match cli.command.unwrap_or(Command::Run(RunArgs::default())) {
        Command::Run(args) => run(&workspace, pinned, cli.config.as_deref(), &args),
        Command::Init { force } => init(&init_target(&workspace, cli.config.as_deref()), force),
    }
}

/// Logs go to stderr; `RUST_LOG` overrides the default filter
fn init_tracing(verbose: bool) {
    let default = if verbose {
        "relay=debug,relay_core=debug"
    } else {
        "relay=info,relay_core=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with_writer(std::io::stderr)
        .init();
}

/// Resolve to an absolute directory
fn resolve_workspace(path: Option<&Path>) -> Result<PathBuf> {
    let cwd = std::env::current_dir().context("Failed to read current directory")?;
    let path = match path {
        Some(p) if p.is_absolute() => p.to_path_buf(),
        Some(p) => cwd.join(p),
        None => cwd,
    };

    if !path.is_dir() {
        bail!("Workspace {} is not a directory", path.display());
    }
    Ok(path)
}

fn run(workspace: &Path, pinned: bool, config_file: Option<&Path>, args: &RunArgs) -> Result<()> {
    let mut config =
        load_config(workspace, config_file, pinned).context("Failed to load configuration")?;
    args.apply(&mut config);

    let pipeline = Pipeline::openai(config)?;
    let report = pipeline.run()?;

    print_summary(&report);
    Ok(())
}

/// `--config` names the file to write, read the same way `run` reads it;
/// otherwise the workspace `.relay.toml`
fn init_target(workspace: &Path, config_file: Option<&Path>) -> PathBuf {
    match config_file {
        Some(p) => p.to_path_buf(),
        None => config_path(workspace),
    }
}

fn init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }

    save_config(path, None).with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Wrote {}", path.display());
    Ok(())
}

fn print_summary(report: &PipelineReport) {
    println!();
    for role in Role::ALL {
        println!(
            "  {}. {:<14} {:>7} chars",
            role.stage_number(),
            role.display_name(),
            report.outputs.get(role).chars().count()
        );
    }
    if !report.degraded_context.is_empty() {
        let names: Vec<_> = report.degraded_context.iter().map(|k| k.as_str()).collect();
        println!("\n  Context unavailable (placeholders used): {}", names.join(", "));
    }
    println!("\nAll outputs saved to {}/", report.output_dir.display());
    println!("\n{}", "=".repeat(60));
    println!("RELAY WORKFLOW COMPLETE");
    println!("{}", "=".repeat(60));
    println!("\nReview the outputs and apply the changes manually.");
}
