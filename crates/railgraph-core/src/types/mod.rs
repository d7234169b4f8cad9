//! # Core Type Definitions
//!
//! This module contains all core types for the Railgraph network engine:
//! - Station identifiers and names (`StationId`, `StationName`)
//! - Line codes with their canonical names (`LineCode`)
//! - Fixed-point travel distances (`Distance`)
//! - Canonical station pairs and link attributes (`StationPair`, `Link`)
//! - Persisted artifact kinds (`ArtifactKind`)
//! - Error types (`RailgraphError`)
//!
//! ## Determinism Guarantees
//!
//! All types in this module:
//! - Use integer arithmetic only (no floating-point; distances are tenths)
//! - Implement `Ord` for deterministic ordering in `BTreeMap`/`BTreeSet`
//! - Use saturating arithmetic for accumulated costs to prevent overflow

use crate::primitives::{DEFAULT_NAME_PREFIX, LINE_COUNT, LINE_NAMES};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// =============================================================================
// STATION IDENTIFIERS & NAMES
// =============================================================================

/// Identifier of a station in the network.
///
/// Station identifiers are 1-based and contiguous: a network of `N` stations
/// uses exactly `1..=N`. Removing a station renumbers every higher id down
/// by one, so identifiers are stable only between removals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StationId(pub u32);

impl StationId {
    /// Get the raw 1-based identifier value.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for StationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Display name of a station.
///
/// Stations without an explicitly assigned name fall back to the default
/// `E<id>` form.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StationName(pub String);

impl StationName {
    /// Create a station name from a string.
    #[must_use]
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// The default name for a station id (`E<id>`).
    #[must_use]
    pub fn default_for(id: StationId) -> Self {
        Self(format!("{}{}", DEFAULT_NAME_PREFIX, id.0))
    }

    /// Get the name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StationName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// LINE CODES
// =============================================================================

/// Code of a transit line, restricted to the canonical range `1..=10`.
///
/// Each code maps to exactly one canonical line name; the mapping is fixed
/// and shared with the persisted line matrix, where `0` means "no link".
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct LineCode(u8);

impl LineCode {
    /// Create a line code, validating the canonical range.
    pub fn new(code: u8) -> Result<Self, RailgraphError> {
        if code == 0 || code as usize > LINE_COUNT {
            return Err(RailgraphError::InvalidInput(format!(
                "line code {} outside canonical range 1..={}",
                code, LINE_COUNT
            )));
        }
        Ok(Self(code))
    }

    /// Resolve a canonical line name to its code.
    pub fn from_name(name: &str) -> Result<Self, RailgraphError> {
        LINE_NAMES
            .iter()
            .position(|&n| n == name)
            .map(|idx| Self(idx as u8 + 1))
            .ok_or_else(|| {
                RailgraphError::InvalidInput(format!("unknown line name '{}'", name))
            })
    }

    /// Get the raw code value.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }

    /// The canonical name of this line.
    #[must_use]
    pub fn name(self) -> &'static str {
        // Index is in range by construction: codes are validated in `new`.
        LINE_NAMES.get(self.0 as usize - 1).copied().unwrap_or("")
    }

    /// Iterate all canonical line codes in ascending order.
    pub fn all() -> impl Iterator<Item = Self> {
        (1..=LINE_COUNT as u8).map(Self)
    }
}

impl fmt::Display for LineCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// DISTANCE (FIXED-POINT TENTHS)
// =============================================================================

/// Travel distance (or accumulated route cost) in tenths of a minute.
///
/// The persisted distance matrix uses exactly one decimal digit, so tenths
/// are the exact unit of the format: `Distance::parse("5.3")` holds 53 and
/// renders back as `"5.3"` with no rounding. Costs accumulate with
/// saturating arithmetic.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Default,
)]
pub struct Distance(u64);

impl Distance {
    /// The zero distance (matrix entries without a link).
    pub const ZERO: Self = Self(0);

    /// Create a distance from a raw tenths count.
    #[must_use]
    pub const fn from_tenths(tenths: u64) -> Self {
        Self(tenths)
    }

    /// Get the raw tenths count.
    #[must_use]
    pub const fn tenths(self) -> u64 {
        self.0
    }

    /// Whether this distance is zero.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Saturating addition of two distances.
    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }

    /// Saturating multiplication by a count (e.g. penalty × transfers).
    #[must_use]
    pub const fn saturating_mul(self, count: u64) -> Self {
        Self(self.0.saturating_mul(count))
    }

    /// Parse a decimal distance with at most one fractional digit.
    ///
    /// Accepts `"5"`, `"5.0"`, and `"5.3"`. Rejects negatives, more than
    /// one fractional digit, and anything non-numeric: the persisted
    /// format carries exactly one decimal place, so extra precision is a
    /// malformed value, not something to round.
    pub fn parse(s: &str) -> Result<Self, RailgraphError> {
        let s = s.trim();
        let (whole, frac) = match s.split_once('.') {
            Some((w, f)) => (w, f),
            None => (s, ""),
        };

        if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
            return Err(RailgraphError::InvalidInput(format!(
                "malformed distance value '{}'",
                s
            )));
        }
        let whole: u64 = whole.parse().map_err(|_| {
            RailgraphError::InvalidInput(format!("distance value '{}' out of range", s))
        })?;

        let tenth: u64 = match frac {
            "" => 0,
            f if f.len() == 1 && f.bytes().all(|b| b.is_ascii_digit()) => {
                f.parse().map_err(|_| {
                    RailgraphError::InvalidInput(format!("malformed distance value '{}'", s))
                })?
            }
            _ => {
                return Err(RailgraphError::InvalidInput(format!(
                    "distance value '{}' has more than one decimal digit",
                    s
                )));
            }
        };

        whole
            .checked_mul(10)
            .and_then(|t| t.checked_add(tenth))
            .map(Self)
            .ok_or_else(|| {
                RailgraphError::InvalidInput(format!("distance value '{}' out of range", s))
            })
    }
}

impl fmt::Display for Distance {
    /// Renders with exactly one decimal digit, matching the persisted
    /// distance matrix format.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.0 / 10, self.0 % 10)
    }
}

// =============================================================================
// STATION PAIRS & LINKS
// =============================================================================

/// Canonical unordered pair of distinct stations, stored as `lower < upper`.
///
/// All link storage and lookup goes through the canonical form, so
/// `(3, 1)` and `(1, 3)` address the same link and multi-edges cannot
/// exist.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct StationPair {
    lower: StationId,
    upper: StationId,
}

impl StationPair {
    /// Canonicalize two endpoints into a pair.
    ///
    /// Returns `RailgraphError::InvalidInput` when the endpoints are equal.
    pub fn new(a: StationId, b: StationId) -> Result<Self, RailgraphError> {
        if a == b {
            return Err(RailgraphError::InvalidInput(format!(
                "station pair endpoints must be distinct (got {} twice)",
                a
            )));
        }
        if a < b {
            Ok(Self { lower: a, upper: b })
        } else {
            Ok(Self { lower: b, upper: a })
        }
    }

    /// Build a pair from endpoints the caller guarantees are ordered.
    ///
    /// Invariant: `lower < upper`. Internal constructor used where the
    /// ordering is already established (e.g. renumbering surviving links).
    pub(crate) const fn from_sorted(lower: StationId, upper: StationId) -> Self {
        Self { lower, upper }
    }

    /// The smaller endpoint.
    #[must_use]
    pub const fn lower(self) -> StationId {
        self.lower
    }

    /// The larger endpoint.
    #[must_use]
    pub const fn upper(self) -> StationId {
        self.upper
    }

    /// Whether the pair touches the given station.
    #[must_use]
    pub fn contains(self, id: StationId) -> bool {
        self.lower == id || self.upper == id
    }

    /// The endpoint opposite to `id`, if `id` is an endpoint.
    #[must_use]
    pub fn other(self, id: StationId) -> Option<StationId> {
        if self.lower == id {
            Some(self.upper)
        } else if self.upper == id {
            Some(self.lower)
        } else {
            None
        }
    }
}

impl fmt::Display for StationPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.lower, self.upper)
    }
}

/// Attributes of a link between two stations.
///
/// At most one link exists per station pair; upserting an existing pair
/// replaces both attributes, including the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Travel distance of the link. Strictly positive.
    pub distance: Distance,
    /// The line this link belongs to.
    pub line: LineCode,
}

impl Link {
    /// Create a link, validating that the distance is positive.
    pub fn new(distance: Distance, line: LineCode) -> Result<Self, RailgraphError> {
        if distance.is_zero() {
            return Err(RailgraphError::InvalidInput(
                "link distance must be positive".to_string(),
            ));
        }
        Ok(Self { distance, line })
    }
}

// =============================================================================
// ARTIFACT KINDS
// =============================================================================

/// The four artifacts of the persisted network bundle.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum ArtifactKind {
    /// Adjacency listing: `<id>-<sorted neighbor ids>` per station.
    Adjacency,
    /// Distance matrix: N×N one-decimal values.
    Distances,
    /// Line-code matrix: N×N integers, `0` where unconnected.
    Lines,
    /// Name listing: `<id>-<name>` per station.
    Names,
}

impl ArtifactKind {
    /// All artifact kinds in canonical bundle order.
    pub const ALL: [Self; 4] = [Self::Adjacency, Self::Distances, Self::Lines, Self::Names];

    /// Canonical file name used by the app layer for this artifact.
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Adjacency => "stations.txt",
            Self::Distances => "distances.txt",
            Self::Lines => "lines.txt",
            Self::Names => "station_names.txt",
        }
    }
}

impl fmt::Display for ArtifactKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

/// Render a missing-artifact list for error messages.
fn join_kinds(kinds: &[ArtifactKind]) -> String {
    let names: Vec<&str> = kinds.iter().map(|k| k.file_name()).collect();
    names.join(", ")
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors reported by the Railgraph core.
///
/// - No silent failures: the only deliberate no-op is removing an absent
///   link.
/// - All fallible operations return `Result<T, RailgraphError>`.
/// - The core never panics; every failure is recoverable by the caller.
#[derive(Debug, Error)]
pub enum RailgraphError {
    /// Malformed or out-of-range arguments.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The referenced station does not exist.
    #[error("station not found: {0}")]
    StationNotFound(StationId),

    /// Decode was asked to run without all four artifacts.
    #[error("missing artifacts: {}", join_kinds(.0))]
    MissingArtifact(Vec<ArtifactKind>),

    /// The artifacts are unparseable or mutually inconsistent.
    #[error("corrupt artifact data: {0}")]
    CorruptState(String),

    /// No path exists between two valid stations.
    #[error("no route between stations {origin} and {destination}")]
    Unreachable {
        origin: StationId,
        destination: StationId,
    },

    /// An I/O error occurred (app layer only; the core does no file I/O).
    #[error("I/O error: {0}")]
    Io(String),
}

// =============================================================================
// TESTS
// =============================================================================
