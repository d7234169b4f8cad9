//! # Artifact Bundle Codec
//!
//! Text serialization for networks: the four-artifact persisted format.
//!
//! The bundle stores connectivity three ways (adjacency listing, distance
//! matrix, line matrix). In memory only the link map is authoritative; the
//! redundant views are derived here at encode time and cross-checked
//! against each other at decode time. A bundle whose artifacts disagree is
//! rejected with `CorruptState` rather than parsed best-effort — a network
//! that decodes successfully always satisfies the model invariants.
//!
//! Artifact syntax:
//! - adjacency: one line per station, `<id>-<sorted neighbor ids>`
//!   (an isolated station renders as `<id>-`);
//! - distances: N lines of N space-separated one-decimal values;
//! - lines: N lines of N space-separated integers, `0` where unconnected;
//! - names: one line per station, `<id>-<name>`.

use crate::primitives::{LINE_COUNT, MAX_NAME_LENGTH, MAX_STATION_COUNT};
use crate::{ArtifactKind, Distance, LineCode, Network, RailgraphError, StationId};
use std::collections::BTreeSet;
use std::fmt::Write as _;

// =============================================================================
// ARTIFACT BUNDLE
// =============================================================================

/// The four text artifacts of a persisted network.
///
/// Slots are optional so the app layer can collect whatever files exist
/// and let `network_from_bundle` report every absent artifact at once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtifactBundle {
    adjacency: Option<String>,
    distances: Option<String>,
    lines: Option<String>,
    names: Option<String>,
}

impl ArtifactBundle {
    /// Create a bundle with all slots empty.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Content of one artifact slot.
    #[must_use]
    pub fn get(&self, kind: ArtifactKind) -> Option<&str> {
        match kind {
            ArtifactKind::Adjacency => self.adjacency.as_deref(),
            ArtifactKind::Distances => self.distances.as_deref(),
            ArtifactKind::Lines => self.lines.as_deref(),
            ArtifactKind::Names => self.names.as_deref(),
        }
    }

    /// Fill one artifact slot.
    pub fn set(&mut self, kind: ArtifactKind, content: String) {
        let slot = match kind {
            ArtifactKind::Adjacency => &mut self.adjacency,
            ArtifactKind::Distances => &mut self.distances,
            ArtifactKind::Lines => &mut self.lines,
            ArtifactKind::Names => &mut self.names,
        };
        *slot = Some(content);
    }

    /// The kinds whose slots are empty, in canonical order.
    #[must_use]
    pub fn missing(&self) -> Vec<ArtifactKind> {
        ArtifactKind::ALL
            .into_iter()
            .filter(|&kind| self.get(kind).is_none())
            .collect()
    }

    /// Present artifacts with their contents, in canonical order.
    pub fn artifacts(&self) -> impl Iterator<Item = (ArtifactKind, &str)> {
        ArtifactKind::ALL
            .into_iter()
            .filter_map(|kind| self.get(kind).map(|content| (kind, content)))
    }
}

// =============================================================================
// ENCODE
// =============================================================================

/// Serialize a network into a complete artifact bundle.
///
/// This is a pure transformation - no file I/O. All four slots are filled;
/// ordering follows ascending station id everywhere and distances render
/// with exactly one decimal digit.
#[must_use]
pub fn network_to_bundle(network: &Network) -> ArtifactBundle {
    let n = network.station_count() as usize;

    let mut neighbor_sets: Vec<BTreeSet<u32>> = vec![BTreeSet::new(); n];
    let mut distance_matrix = vec![vec![Distance::ZERO; n]; n];
    let mut line_matrix = vec![vec![0u8; n]; n];

    for (pair, link) in network.links() {
        let i = pair.lower().get() as usize - 1;
        let j = pair.upper().get() as usize - 1;
        neighbor_sets[i].insert(pair.upper().get());
        neighbor_sets[j].insert(pair.lower().get());
        distance_matrix[i][j] = link.distance;
        distance_matrix[j][i] = link.distance;
        line_matrix[i][j] = link.line.get();
        line_matrix[j][i] = link.line.get();
    }

    let mut adjacency = String::new();
    for (idx, neighbors) in neighbor_sets.iter().enumerate() {
        let ids: Vec<String> = neighbors.iter().map(|id| id.to_string()).collect();
        let _ = writeln!(adjacency, "{}-{}", idx + 1, ids.join(" "));
    }

    let mut distances = String::new();
    for row in &distance_matrix {
        let cells: Vec<String> = row.iter().map(|d| d.to_string()).collect();
        let _ = writeln!(distances, "{}", cells.join(" "));
    }

    let mut lines = String::new();
    for row in &line_matrix {
        let cells: Vec<String> = row.iter().map(|c| c.to_string()).collect();
        let _ = writeln!(lines, "{}", cells.join(" "));
    }

    let mut names = String::new();
    for (id, name) in network.station_names() {
        let _ = writeln!(names, "{}-{}", id, name);
    }

    let mut bundle = ArtifactBundle::empty();
    bundle.set(ArtifactKind::Adjacency, adjacency);
    bundle.set(ArtifactKind::Distances, distances);
    bundle.set(ArtifactKind::Lines, lines);
    bundle.set(ArtifactKind::Names, names);
    bundle
}

// =============================================================================
// DECODE
// =============================================================================

/// Deserialize a network from an artifact bundle.
///
/// This is a pure transformation - no file I/O.
///
/// Validation order:
/// 1. All four slots present, else `MissingArtifact` naming every absent one.
/// 2. Adjacency parsed first; its line count fixes `N`, bounded by
///    `MAX_STATION_COUNT` BEFORE any N×N matrix is parsed or allocated.
/// 3. Matrices and names parsed against that `N` (shape, value syntax,
///    canonical line codes).
/// 4. Cross-consistency: symmetric matrices and adjacency, zero diagonals,
///    and agreement between the three connectivity views. Any disagreement
///    is `CorruptState`, never a silently patched network.
pub fn network_from_bundle(bundle: &ArtifactBundle) -> Result<Network, RailgraphError> {
    let missing = bundle.missing();
    if !missing.is_empty() {
        return Err(RailgraphError::MissingArtifact(missing));
    }

    // Slots checked above; absent content cannot reach the unwraps below.
    let adjacency_text = bundle.get(ArtifactKind::Adjacency).unwrap_or_default();
    let distances_text = bundle.get(ArtifactKind::Distances).unwrap_or_default();
    let lines_text = bundle.get(ArtifactKind::Lines).unwrap_or_default();
    let names_text = bundle.get(ArtifactKind::Names).unwrap_or_default();

    let neighbor_sets = parse_adjacency(adjacency_text)?;
    let n = neighbor_sets.len();

    let distance_matrix = parse_distance_matrix(distances_text, n)?;
    let line_matrix = parse_line_matrix(lines_text, n)?;
    let names = parse_names(names_text, n)?;

    validate_consistency(&neighbor_sets, &distance_matrix, &line_matrix)?;

    build_network(&neighbor_sets, &distance_matrix, &line_matrix, &names)
}

/// Parse the adjacency listing and fix the station count.
fn parse_adjacency(text: &str) -> Result<Vec<BTreeSet<u32>>, RailgraphError> {
    let mut sets = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        let expected_id = idx as u32 + 1;
        let (id_part, neighbors_part) = line.split_once('-').ok_or_else(|| {
            RailgraphError::CorruptState(format!(
                "adjacency line {}: missing '-' separator",
                idx + 1
            ))
        })?;

        let id: u32 = id_part.trim().parse().map_err(|_| {
            RailgraphError::CorruptState(format!(
                "adjacency line {}: malformed station id '{}'",
                idx + 1,
                id_part
            ))
        })?;
        if id != expected_id {
            return Err(RailgraphError::CorruptState(format!(
                "adjacency line {}: station id {} out of sequence",
                idx + 1,
                id
            )));
        }
        if id > MAX_STATION_COUNT {
            return Err(RailgraphError::CorruptState(format!(
                "adjacency lists {} stations, more than the allowed {}",
                id, MAX_STATION_COUNT
            )));
        }

        let mut neighbors = BTreeSet::new();
        for token in neighbors_part.split_whitespace() {
            let neighbor: u32 = token.parse().map_err(|_| {
                RailgraphError::CorruptState(format!(
                    "adjacency line {}: malformed neighbor id '{}'",
                    idx + 1,
                    token
                ))
            })?;
            neighbors.insert(neighbor);
        }
        sets.push(neighbors);
    }

    if sets.is_empty() {
        return Err(RailgraphError::CorruptState(
            "adjacency artifact is empty".to_string(),
        ));
    }

    // Neighbor ids can reference stations declared on later lines, so range
    // checks run only once the full listing is known.
    let n = sets.len() as u32;
    for (idx, neighbors) in sets.iter().enumerate() {
        let own_id = idx as u32 + 1;
        for &neighbor in neighbors {
            if neighbor < 1 || neighbor > n {
                return Err(RailgraphError::CorruptState(format!(
                    "adjacency line {}: neighbor {} outside 1..={}",
                    own_id, neighbor, n
                )));
            }
            if neighbor == own_id {
                return Err(RailgraphError::CorruptState(format!(
                    "adjacency line {}: station listed as its own neighbor",
                    own_id
                )));
            }
        }
    }

    Ok(sets)
}

/// Parse the N×N distance matrix.
fn parse_distance_matrix(text: &str, n: usize) -> Result<Vec<Vec<Distance>>, RailgraphError> {
    let mut matrix = Vec::with_capacity(n);

    for (row_idx, line) in text.lines().enumerate() {
        let mut row = Vec::with_capacity(n);
        for (col_idx, token) in line.split_whitespace().enumerate() {
            let value = Distance::parse(token).map_err(|_| {
                RailgraphError::CorruptState(format!(
                    "distance matrix [{}][{}]: malformed value '{}'",
                    row_idx + 1,
                    col_idx + 1,
                    token
                ))
            })?;
            row.push(value);
        }
        if row.len() != n {
            return Err(RailgraphError::CorruptState(format!(
                "distance matrix row {} has {} columns, expected {}",
                row_idx + 1,
                row.len(),
                n
            )));
        }
        matrix.push(row);
    }

    if matrix.len() != n {
        return Err(RailgraphError::CorruptState(format!(
            "distance matrix has {} rows, expected {}",
            matrix.len(),
            n
        )));
    }
    Ok(matrix)
}

/// Parse the N×N line-code matrix. Entries are `0` or a canonical code.
fn parse_line_matrix(text: &str, n: usize) -> Result<Vec<Vec<u8>>, RailgraphError> {
    let mut matrix = Vec::with_capacity(n);

    for (row_idx, line) in text.lines().enumerate() {
        let mut row = Vec::with_capacity(n);
        for (col_idx, token) in line.split_whitespace().enumerate() {
            let value: u8 = token.parse().map_err(|_| {
                RailgraphError::CorruptState(format!(
                    "line matrix [{}][{}]: malformed value '{}'",
                    row_idx + 1,
                    col_idx + 1,
                    token
                ))
            })?;
            if value as usize > LINE_COUNT {
                return Err(RailgraphError::CorruptState(format!(
                    "line matrix [{}][{}]: code {} outside canonical range 1..={}",
                    row_idx + 1,
                    col_idx + 1,
                    value,
                    LINE_COUNT
                )));
            }
            row.push(value);
        }
        if row.len() != n {
            return Err(RailgraphError::CorruptState(format!(
                "line matrix row {} has {} columns, expected {}",
                row_idx + 1,
                row.len(),
                n
            )));
        }
        matrix.push(row);
    }

    if matrix.len() != n {
        return Err(RailgraphError::CorruptState(format!(
            "line matrix has {} rows, expected {}",
            matrix.len(),
            n
        )));
    }
    Ok(matrix)
}

/// Parse the name listing.
fn parse_names(text: &str, n: usize) -> Result<Vec<String>, RailgraphError> {
    let mut names = Vec::with_capacity(n);

    for (idx, line) in text.lines().enumerate() {
        let expected_id = idx as u32 + 1;
        let (id_part, name_part) = line.split_once('-').ok_or_else(|| {
            RailgraphError::CorruptState(format!(
                "name listing line {}: missing '-' separator",
                idx + 1
            ))
        })?;

        let id: u32 = id_part.trim().parse().map_err(|_| {
            RailgraphError::CorruptState(format!(
                "name listing line {}: malformed station id '{}'",
                idx + 1,
                id_part
            ))
        })?;
        if id != expected_id {
            return Err(RailgraphError::CorruptState(format!(
                "name listing line {}: station id {} out of sequence",
                idx + 1,
                id
            )));
        }

        let name = name_part.trim();
        if name.is_empty() {
            return Err(RailgraphError::CorruptState(format!(
                "name listing line {}: empty station name",
                idx + 1
            )));
        }
        if name.len() > MAX_NAME_LENGTH {
            return Err(RailgraphError::CorruptState(format!(
                "name listing line {}: name exceeds {} bytes",
                idx + 1,
                MAX_NAME_LENGTH
            )));
        }
        names.push(name.to_string());
    }

    if names.len() != n {
        return Err(RailgraphError::CorruptState(format!(
            "name listing has {} entries, expected {}",
            names.len(),
            n
        )));
    }
    Ok(names)
}

/// Cross-check the three connectivity views against each other.
fn validate_consistency(
    neighbor_sets: &[BTreeSet<u32>],
    distance_matrix: &[Vec<Distance>],
    line_matrix: &[Vec<u8>],
) -> Result<(), RailgraphError> {
    let n = neighbor_sets.len();

    for i in 0..n {
        if !distance_matrix[i][i].is_zero() {
            return Err(RailgraphError::CorruptState(format!(
                "distance matrix has nonzero diagonal at station {}",
                i + 1
            )));
        }
        if line_matrix[i][i] != 0 {
            return Err(RailgraphError::CorruptState(format!(
                "line matrix has nonzero diagonal at station {}",
                i + 1
            )));
        }

        for j in (i + 1)..n {
            let pair = (i + 1, j + 1);

            if distance_matrix[i][j] != distance_matrix[j][i] {
                return Err(RailgraphError::CorruptState(format!(
                    "distance matrix asymmetric at {:?}",
                    pair
                )));
            }
            if line_matrix[i][j] != line_matrix[j][i] {
                return Err(RailgraphError::CorruptState(format!(
                    "line matrix asymmetric at {:?}",
                    pair
                )));
            }

            let listed = neighbor_sets[i].contains(&(j as u32 + 1));
            let listed_back = neighbor_sets[j].contains(&(i as u32 + 1));
            if listed != listed_back {
                return Err(RailgraphError::CorruptState(format!(
                    "adjacency listing asymmetric at {:?}",
                    pair
                )));
            }

            let has_distance = !distance_matrix[i][j].is_zero();
            let has_line = line_matrix[i][j] != 0;
            if listed != has_distance || listed != has_line {
                return Err(RailgraphError::CorruptState(format!(
                    "connectivity views disagree at {:?}: adjacency={}, distance={}, line={}",
                    pair, listed, distance_matrix[i][j], line_matrix[i][j]
                )));
            }
        }
    }
    Ok(())
}

/// Assemble the validated parts into a network.
///
/// Model-level rejections at this point mean the artifacts encoded a state
/// the model itself refuses, so they surface as `CorruptState`.
fn build_network(
    neighbor_sets: &[BTreeSet<u32>],
    distance_matrix: &[Vec<Distance>],
    line_matrix: &[Vec<u8>],
    names: &[String],
) -> Result<Network, RailgraphError> {
    let mut network = Network::new(neighbor_sets.len() as u32)?;

    for (idx, name) in names.iter().enumerate() {
        network
            .set_station_name(StationId(idx as u32 + 1), name)
            .map_err(|e| {
                RailgraphError::CorruptState(format!(
                    "name listing line {}: {}",
                    idx + 1,
                    e
                ))
            })?;
    }

    // Only the canonical u < v direction is inserted; the mirrored listing
    // entry was already verified to agree.
    for (idx, neighbors) in neighbor_sets.iter().enumerate() {
        let u = idx as u32 + 1;
        for &v in neighbors.iter().filter(|&&v| v > u) {
            let i = idx;
            let j = v as usize - 1;
            let line = LineCode::new(line_matrix[i][j]).map_err(|e| {
                RailgraphError::CorruptState(format!("link ({}, {}): {}", u, v, e))
            })?;
            network
                .upsert_link(StationId(u), StationId(v), distance_matrix[i][j], line)
                .map_err(|e| {
                    RailgraphError::CorruptState(format!("link ({}, {}): {}", u, v, e))
                })?;
        }
    }

    Ok(network)
}

// =============================================================================
// TESTS
// =============================================================================
