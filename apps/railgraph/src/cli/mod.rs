//! # Railgraph CLI Module
//!
//! This module implements the CLI interface for Railgraph.
//!
//! ## Available Commands
//!
//! - `route` - Compute the cheapest route between two stations
//! - `info` - Summarize the network in an artifact directory
//! - `verify` - Decode the artifact bundle and report its exact state

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Railgraph - deterministic transit routing
///
/// Loads a persisted four-artifact network bundle and answers
/// transfer-aware shortest-route queries against it.
#[derive(Parser, Debug)]
#[command(name = "railgraph")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Directory holding the artifact bundle
    #[arg(short = 'D', long, global = true)]
    pub dir: Option<PathBuf>,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compute the cheapest route between two stations
    Route {
        /// Origin station id (1-based)
        origin: u32,

        /// Destination station id (1-based)
        destination: u32,

        /// Transfer penalty in minutes, e.g. "2" or "2.5"
        #[arg(short, long)]
        penalty: Option<String>,
    },

    /// Summarize the network in the artifact directory
    Info,

    /// Decode the artifact bundle and report whether it is consistent
    Verify,
}
