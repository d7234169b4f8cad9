//! # railgraph-core
//!
//! The deterministic transit-network engine for Railgraph - THE LOGIC.
//!
//! This crate implements the network model (stations, names, links), the
//! four-artifact text codec, and the transfer-aware route planner. It is
//! the only place network state exists; everything else consumes it.
//!
//! ## Architectural Constraints
//!
//! - Single authoritative representation: the link map. Matrices and
//!   adjacency listings are derived at encode time only.
//! - Deterministic: `BTreeMap`/`BTreeSet` everywhere, integer fixed-point
//!   distances, no floats, no randomness.
//! - Pure: no async, no network, no file I/O (the app layer owns files).
//! - Owned instances: no process-wide network; callers replace their
//!   `Network` value to re-initialize or reload.

// =============================================================================
// MODULES
// =============================================================================

pub mod formats;
pub mod network;
pub mod planner;
pub mod primitives;
pub mod query;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{
    ArtifactKind, Distance, LineCode, Link, RailgraphError, StationId, StationName, StationPair,
};

// =============================================================================
// RE-EXPORTS: Model, Codec, Planner
// =============================================================================

pub use formats::{ArtifactBundle, network_from_bundle, network_to_bundle};
pub use network::Network;
pub use planner::{Itinerary, RouteEdge, RouteGraph};
pub use query::RouteQuery;
