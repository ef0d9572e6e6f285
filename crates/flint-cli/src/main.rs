//! Flint CLI - Command-line interface for the Flint buff engine

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{check, simulate};
use tracing_subscriber::filter::EnvFilter;

#[derive(Parser)]
#[command(name = "flint")]
#[command(about = "Author, check and simulate buff catalogs", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a buff catalog and list its definitions
    Check {
        /// Path to a .buffs.toml catalog
        catalog: String,
    },

    /// Apply buffs to a single entity and print the event timeline
    Simulate {
        /// Path to a .buffs.toml catalog
        catalog: String,

        /// Buff to apply at t=0 (repeatable)
        #[arg(short, long = "apply", required = true)]
        apply: Vec<String>,

        /// Number of frames to run
        #[arg(long, default_value = "60")]
        ticks: u32,

        /// Frame time in seconds
        #[arg(long, default_value = "0.1", value_parser = parse_dt)]
        dt: f64,

        /// Entity id to simulate
        #[arg(long, default_value = "1")]
        entity: u64,
    },
}

fn parse_dt(s: &str) -> Result<f64, String> {
    let dt: f64 = s.parse().map_err(|e| format!("invalid frame time: {}", e))?;
    if !dt.is_finite() || dt < 0.0 {
        return Err(format!("frame time must be a finite value >= 0, got {}", dt));
    }
    Ok(dt)
}

/// Initialize logging to stderr. `RUST_LOG` overrides the INFO default.
fn init_logging() {
    let filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::INFO.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Check { catalog } => check::run(&catalog),
        Commands::Simulate {
            catalog,
            apply,
            ticks,
            dt,
            entity,
        } => simulate::run(simulate::SimulateArgs {
            catalog,
            apply,
            ticks,
            dt,
            entity,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_dt_rejects_negative() {
        assert!(parse_dt("-0.5").is_err());
        assert!(parse_dt("abc").is_err());
        assert_eq!(parse_dt("0.25"), Ok(0.25));
    }

    #[test]
    fn simulate_requires_apply() {
        assert!(Cli::try_parse_from(["flint", "simulate", "x.buffs.toml"]).is_err());
        assert!(Cli::try_parse_from(["flint", "simulate", "x.buffs.toml", "-a", "burning"]).is_ok());
    }
}
