//! # Query Module
//!
//! Structured query types for the route planner.
//!
//! A query is plain data: validation happens in the planner so that a
//! query can be built from untrusted input and still fail with the
//! precise error taxonomy.

use crate::{Distance, StationId};
use serde::{Deserialize, Serialize};

/// A shortest-route request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteQuery {
    /// Origin station.
    pub origin: StationId,
    /// Destination station. Must differ from the origin.
    pub destination: StationId,
    /// Cost added for every line change along the route.
    pub transfer_penalty: Distance,
}

impl RouteQuery {
    /// Create a query with an explicit transfer penalty.
    #[must_use]
    pub const fn new(
        origin: StationId,
        destination: StationId,
        transfer_penalty: Distance,
    ) -> Self {
        Self {
            origin,
            destination,
            transfer_penalty,
        }
    }

    /// Create a query that ignores line changes entirely.
    #[must_use]
    pub const fn without_penalty(origin: StationId, destination: StationId) -> Self {
        Self::new(origin, destination, Distance::ZERO)
    }
}

// =============================================================================
// TESTS
// =============================================================================
