//! # Railgraph CLI Entry Point
//!
//! Thin shell around the library modules: initialize logging, parse the
//! command line, resolve configuration, dispatch.
//!
//! ## Usage
//!
//! ```bash
//! # Cheapest route from station 1 to station 3, 2-minute transfer penalty
//! railgraph route 1 3 --penalty 2 -D networks/metro
//!
//! # Network summary and bundle verification
//! railgraph info -D networks/metro
//! railgraph verify -D networks/metro
//! ```

use clap::Parser;
use railgraph::cli::{self, Cli, Commands};
use railgraph::config;
use railgraph_core::{Distance, RailgraphError};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

fn main() {
    let args = Cli::parse();

    // Initialize tracing — RAILGRAPH_LOG_FORMAT=json enables
    // machine-parseable output.
    let log_format = std::env::var("RAILGRAPH_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let default_filter = if args.verbose {
        "railgraph=debug,railgraph_core=debug"
    } else {
        "railgraph=info"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }

    if !args.quiet {
        print_banner();
    }

    if let Err(error) = run(&args) {
        tracing::error!(%error, "command failed");
        eprintln!("error: {}", error);
        std::process::exit(1);
    }
}

/// Resolve configuration and dispatch the command.
fn run(args: &Cli) -> Result<(), RailgraphError> {
    let config = config::load(Path::new("."))?;
    let dir = args
        .dir
        .clone()
        .or_else(|| config.artifacts_dir.clone())
        .unwrap_or_else(|| PathBuf::from("."));

    match &args.command {
        Some(Commands::Route {
            origin,
            destination,
            penalty,
        }) => {
            let penalty = match penalty.as_deref().or(config.default_penalty.as_deref()) {
                Some(text) => Distance::parse(text)?,
                None => Distance::ZERO,
            };
            cli::cmd_route(&dir, *origin, *destination, penalty, args.json_mode)
        }
        Some(Commands::Info) => cli::cmd_info(&dir, args.json_mode),
        Some(Commands::Verify) => cli::cmd_verify(&dir, args.json_mode),
        None => {
            eprintln!("no command given; see --help");
            Ok(())
        }
    }
}

fn print_banner() {
    eprintln!("railgraph v{}", env!("CARGO_PKG_VERSION"));
}
