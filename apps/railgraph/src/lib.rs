//! # Railgraph - THE BINARY
//!
//! Library surface of the Railgraph CLI. The binary in `main.rs` is a thin
//! shell around these modules; keeping them in a lib target lets the
//! integration tests drive commands without spawning processes.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────┐
//! │            apps/railgraph (THE BINARY)        │
//! │                                               │
//! │  ┌──────────┐   ┌───────────┐   ┌─────────┐  │
//! │  │   CLI    │   │  Commands │   │ Config  │  │
//! │  │  (clap)  │   │ (file IO) │   │ (toml)  │  │
//! │  └────┬─────┘   └─────┬─────┘   └────┬────┘  │
//! │       └───────────────┼──────────────┘       │
//! │                       ▼                      │
//! │              ┌────────────────┐              │
//! │              │ railgraph-core │              │
//! │              │  (THE LOGIC)   │              │
//! │              └────────────────┘              │
//! └───────────────────────────────────────────────┘
//! ```

pub mod cli;
pub mod config;
