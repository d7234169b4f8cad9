//! # Network Model
//!
//! The deterministic transit-network store: stations, their names, and the
//! links between them.
//!
//! The link map is the single authoritative representation of connectivity.
//! The persisted matrices and adjacency listing are redundant views of the
//! same facts and are derived in the `formats` module at encode time only;
//! nothing here can drift out of sync with itself.
//!
//! All data structures use `BTreeMap` for deterministic ordering.
//!
//! ## Invariants
//!
//! Hold after every mutation, by construction:
//! 1. Station identifiers are exactly `1..=N`, no gaps.
//! 2. Every link joins two distinct valid stations, stored canonically.
//! 3. Every link has a positive distance and a canonical line code.
//! 4. Connectivity is symmetric (unordered pairs).
//! 5. Every station resolves to a name, explicit or default.

use crate::primitives::{MAX_NAME_LENGTH, MAX_STATION_COUNT, MIN_STATION_COUNT};
use crate::{Distance, Link, LineCode, RailgraphError, StationId, StationName, StationPair};
use std::collections::BTreeMap;

/// The transit network model.
///
/// An ordinary owned value: there is no process-wide instance. Callers that
/// need "re-initialize" or "reload" semantics replace their `Network`
/// wholesale; persistence via the `formats` module is a pure read of the
/// current state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Network {
    /// Number of stations; identifiers are `1..=station_count`.
    station_count: u32,

    /// Explicitly assigned names. Stations absent here carry the default
    /// `E<id>` name, so the map never stores a default-valued entry.
    names: BTreeMap<StationId, StationName>,

    /// The authoritative link set, keyed by canonical pair.
    links: BTreeMap<StationPair, Link>,
}

impl Network {
    /// Create a network of `n` default-named stations and no links.
    ///
    /// `n` must be within `MIN_STATION_COUNT..=MAX_STATION_COUNT`, else
    /// `RailgraphError::InvalidInput`.
    pub fn new(n: u32) -> Result<Self, RailgraphError> {
        if n < MIN_STATION_COUNT {
            return Err(RailgraphError::InvalidInput(format!(
                "station count must be at least {}",
                MIN_STATION_COUNT
            )));
        }
        if n > MAX_STATION_COUNT {
            return Err(RailgraphError::InvalidInput(format!(
                "station count {} exceeds maximum allowed {}",
                n, MAX_STATION_COUNT
            )));
        }
        Ok(Self {
            station_count: n,
            names: BTreeMap::new(),
            links: BTreeMap::new(),
        })
    }

    // =========================================================================
    // READ SURFACE
    // =========================================================================

    /// Number of stations.
    #[must_use]
    pub const fn station_count(&self) -> u32 {
        self.station_count
    }

    /// Number of links.
    #[must_use]
    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    /// Whether `id` is a valid station identifier.
    #[must_use]
    pub const fn contains_station(&self, id: StationId) -> bool {
        id.0 >= 1 && id.0 <= self.station_count
    }

    /// All station identifiers in ascending order.
    pub fn station_ids(&self) -> impl Iterator<Item = StationId> {
        (1..=self.station_count).map(StationId)
    }

    /// All stations with their resolved names, ascending by id.
    pub fn station_names(&self) -> impl Iterator<Item = (StationId, StationName)> + '_ {
        self.station_ids().map(move |id| (id, self.resolved_name(id)))
    }

    /// Resolved name of a station.
    ///
    /// Returns `RailgraphError::StationNotFound` when `id` is out of range.
    pub fn station_name(&self, id: StationId) -> Result<StationName, RailgraphError> {
        self.require_station(id)?;
        Ok(self.resolved_name(id))
    }

    /// The link between two stations, if any.
    ///
    /// Endpoint order does not matter; equal or out-of-range endpoints
    /// simply have no link.
    #[must_use]
    pub fn link(&self, a: StationId, b: StationId) -> Option<&Link> {
        StationPair::new(a, b).ok().and_then(|pair| self.links.get(&pair))
    }

    /// All links in canonical `(lower, upper)` order.
    pub fn links(&self) -> impl Iterator<Item = (StationPair, &Link)> {
        self.links.iter().map(|(pair, link)| (*pair, link))
    }

    /// Neighbor identifiers of a station, ascending.
    pub fn neighbors(&self, id: StationId) -> Result<Vec<StationId>, RailgraphError> {
        self.require_station(id)?;
        let mut result: Vec<StationId> = self
            .links
            .keys()
            .filter_map(|pair| pair.other(id))
            .collect();
        result.sort_unstable();
        Ok(result)
    }

    // =========================================================================
    // STATION MUTATIONS
    // =========================================================================

    /// Assign an explicit name to a station.
    ///
    /// The name is trimmed and must be non-empty, single-line, and within
    /// `MAX_NAME_LENGTH`. Assigning the literal default name clears the
    /// explicit entry, so encode output stays canonical.
    pub fn set_station_name(
        &mut self,
        id: StationId,
        name: &str,
    ) -> Result<(), RailgraphError> {
        self.require_station(id)?;
        let name = name.trim();
        if name.is_empty() {
            return Err(RailgraphError::InvalidInput(
                "station name must be non-empty".to_string(),
            ));
        }
        if name.len() > MAX_NAME_LENGTH {
            return Err(RailgraphError::InvalidInput(format!(
                "station name exceeds {} bytes",
                MAX_NAME_LENGTH
            )));
        }
        // Newlines would corrupt the line-oriented name artifact.
        if name.contains('\n') || name.contains('\r') {
            return Err(RailgraphError::InvalidInput(
                "station name must be a single line".to_string(),
            ));
        }

        if name == StationName::default_for(id).as_str() {
            self.names.remove(&id);
        } else {
            self.names.insert(id, StationName::new(name));
        }
        Ok(())
    }

    /// Append a new station with the next identifier and a default name.
    ///
    /// Returns the new station's id.
    pub fn add_station(&mut self) -> Result<StationId, RailgraphError> {
        if self.station_count >= MAX_STATION_COUNT {
            return Err(RailgraphError::InvalidInput(format!(
                "station count {} exceeds maximum allowed {}",
                self.station_count.saturating_add(1),
                MAX_STATION_COUNT
            )));
        }
        self.station_count += 1;
        Ok(StationId(self.station_count))
    }

    /// Remove a station, its incident links, and close the id gap.
    ///
    /// Every station `k > id` is renumbered to `k - 1`, and the rename is
    /// applied consistently to the name map and to every surviving link's
    /// endpoints. The whole transformation is built on the side and swapped
    /// in at once, so no observer can ever see a half-renumbered network.
    pub fn remove_station(&mut self, id: StationId) -> Result<(), RailgraphError> {
        self.require_station(id)?;

        let remap = |s: StationId| {
            if s.0 > id.0 { StationId(s.0 - 1) } else { s }
        };

        let names: BTreeMap<StationId, StationName> = self
            .names
            .iter()
            .filter(|(station, _)| **station != id)
            .map(|(station, name)| (remap(*station), name.clone()))
            .collect();

        // Remapping preserves canonical order: endpoints above the removed
        // id shift down together, endpoints below it do not move.
        let links: BTreeMap<StationPair, Link> = self
            .links
            .iter()
            .filter(|(pair, _)| !pair.contains(id))
            .map(|(pair, link)| {
                let pair = StationPair::from_sorted(remap(pair.lower()), remap(pair.upper()));
                (pair, *link)
            })
            .collect();

        self.names = names;
        self.links = links;
        self.station_count -= 1;
        Ok(())
    }

    // =========================================================================
    // LINK MUTATIONS
    // =========================================================================

    /// Insert or replace the link between two stations.
    ///
    /// Endpoints must be distinct valid stations and the distance positive.
    /// When the canonical pair already has a link, its distance and line
    /// are replaced in place (idempotent, no duplicate); the previous line
    /// does not survive even when it differs.
    ///
    /// Returns `true` when an existing link was replaced.
    pub fn upsert_link(
        &mut self,
        a: StationId,
        b: StationId,
        distance: Distance,
        line: LineCode,
    ) -> Result<bool, RailgraphError> {
        let pair = StationPair::new(a, b)?;
        self.require_station(pair.lower())?;
        self.require_station(pair.upper())?;
        let link = Link::new(distance, line)?;
        Ok(self.links.insert(pair, link).is_some())
    }

    /// Remove the link between two stations.
    ///
    /// Removing an absent link is a no-op, not an error; `true` is returned
    /// only when a link was actually removed.
    pub fn remove_link(&mut self, a: StationId, b: StationId) -> Result<bool, RailgraphError> {
        let pair = StationPair::new(a, b)?;
        self.require_station(pair.lower())?;
        self.require_station(pair.upper())?;
        Ok(self.links.remove(&pair).is_some())
    }

    // =========================================================================
    // INTERNAL
    // =========================================================================

    fn require_station(&self, id: StationId) -> Result<(), RailgraphError> {
        if self.contains_station(id) {
            Ok(())
        } else {
            Err(RailgraphError::StationNotFound(id))
        }
    }

    fn resolved_name(&self, id: StationId) -> StationName {
        self.names
            .get(&id)
            .cloned()
            .unwrap_or_else(|| StationName::default_for(id))
    }
}

// =============================================================================
// TESTS
// =============================================================================
