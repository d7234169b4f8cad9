//! # CLI Command Implementations
//!
//! All file I/O of the application lives here: the core codec is pure, so
//! these commands read artifact files into a bundle and hand everything
//! else to `railgraph-core`.

use railgraph_core::{
    ArtifactBundle, ArtifactKind, Distance, Itinerary, LineCode, Network, RailgraphError,
    RouteGraph, RouteQuery, StationId, network_from_bundle,
};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info};

// =============================================================================
// FILE SIZE LIMITS
// =============================================================================

/// Maximum size of a single artifact file (10 MB).
///
/// Validated BEFORE reading, so a mislabeled or malicious file cannot pull
/// the process into reading gigabytes of "text".
const MAX_ARTIFACT_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Validate file size before reading.
fn validate_file_size(path: &Path) -> Result<(), RailgraphError> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| RailgraphError::Io(format!("cannot read file metadata: {}", e)))?;

    if metadata.len() > MAX_ARTIFACT_FILE_SIZE {
        return Err(RailgraphError::Io(format!(
            "artifact '{}' is {} bytes, more than the allowed {}",
            path.display(),
            metadata.len(),
            MAX_ARTIFACT_FILE_SIZE
        )));
    }
    Ok(())
}

// =============================================================================
// BUNDLE LOADING
// =============================================================================

/// Read whatever artifact files exist in `dir` into a bundle.
///
/// Absent files stay empty slots; the core decoder is the one that decides
/// completeness, so `verify` can report every missing artifact at once.
pub fn load_bundle(dir: &Path) -> Result<ArtifactBundle, RailgraphError> {
    let mut bundle = ArtifactBundle::empty();

    for kind in ArtifactKind::ALL {
        let path = dir.join(kind.file_name());
        if path.is_file() {
            validate_file_size(&path)?;
            let content = std::fs::read_to_string(&path).map_err(|e| {
                RailgraphError::Io(format!("cannot read '{}': {}", path.display(), e))
            })?;
            bundle.set(kind, content);
        } else {
            debug!(artifact = kind.file_name(), "artifact file not present");
        }
    }

    Ok(bundle)
}

/// Load and decode the network from an artifact directory.
pub fn load_network(dir: &Path) -> Result<Network, RailgraphError> {
    let network = network_from_bundle(&load_bundle(dir)?)?;
    info!(
        stations = network.station_count(),
        links = network.link_count(),
        "network decoded"
    );
    Ok(network)
}

// =============================================================================
// ROUTE COMMAND
// =============================================================================

/// A computed route together with the resolved station names.
#[derive(Debug, Clone, Serialize)]
pub struct RouteReport {
    /// The planner result.
    pub itinerary: Itinerary,
    /// Resolved name of every station along the path, in order.
    pub stops: Vec<String>,
}

/// Load the network and answer a route query.
pub fn plan_route(dir: &Path, query: &RouteQuery) -> Result<RouteReport, RailgraphError> {
    let network = load_network(dir)?;
    let graph = RouteGraph::build(&network);
    let itinerary = graph.shortest_path(query)?;

    let mut stops = Vec::with_capacity(itinerary.path.len());
    for station in &itinerary.path {
        stops.push(network.station_name(*station)?.to_string());
    }

    Ok(RouteReport { itinerary, stops })
}

/// Compute and print the cheapest route.
pub fn cmd_route(
    dir: &Path,
    origin: u32,
    destination: u32,
    penalty: Distance,
    json_mode: bool,
) -> Result<(), RailgraphError> {
    let query = RouteQuery::new(StationId(origin), StationId(destination), penalty);
    let report = plan_route(dir, &query)?;

    if json_mode {
        let payload = serde_json::json!({
            "path": report.itinerary.path,
            "stops": report.stops,
            "total_cost": report.itinerary.total_cost.to_string(),
            "transfers": report.itinerary.transfers,
        });
        println!("{}", render_json(&payload)?);
        return Ok(());
    }

    let legs: Vec<String> = report
        .itinerary
        .path
        .iter()
        .zip(&report.stops)
        .map(|(station, name)| format!("{} {}", station, name))
        .collect();
    println!("Route:      {}", legs.join(" -> "));
    println!(
        "Total cost: {} min ({} transfer(s), penalty {} min)",
        report.itinerary.total_cost, report.itinerary.transfers, penalty
    );
    Ok(())
}

// =============================================================================
// INFO COMMAND
// =============================================================================

/// Per-line link tally.
#[derive(Debug, Clone, Serialize)]
pub struct LineUsage {
    /// Canonical line code.
    pub code: u8,
    /// Canonical line name.
    pub name: String,
    /// Number of links on this line.
    pub links: usize,
}

/// Summary of a decoded network.
#[derive(Debug, Clone, Serialize)]
pub struct NetworkSummary {
    /// Station count.
    pub stations: u32,
    /// Link count.
    pub links: usize,
    /// Lines that carry at least one link, ascending by code.
    pub lines: Vec<LineUsage>,
    /// Stations without any link.
    pub isolated: Vec<u32>,
}

/// Load the network and summarize it.
pub fn network_summary(dir: &Path) -> Result<NetworkSummary, RailgraphError> {
    let network = load_network(dir)?;

    let mut per_line: BTreeMap<LineCode, usize> = BTreeMap::new();
    for (_, link) in network.links() {
        *per_line.entry(link.line).or_default() += 1;
    }
    let lines = per_line
        .into_iter()
        .map(|(line, links)| LineUsage {
            code: line.get(),
            name: line.name().to_string(),
            links,
        })
        .collect();

    let mut isolated = Vec::new();
    for station in network.station_ids() {
        if network.neighbors(station)?.is_empty() {
            isolated.push(station.get());
        }
    }

    Ok(NetworkSummary {
        stations: network.station_count(),
        links: network.link_count(),
        lines,
        isolated,
    })
}

/// Print the network summary.
pub fn cmd_info(dir: &Path, json_mode: bool) -> Result<(), RailgraphError> {
    let summary = network_summary(dir)?;

    if json_mode {
        let payload = serde_json::to_value(&summary)
            .map_err(|e| RailgraphError::Io(format!("JSON encoding failed: {}", e)))?;
        println!("{}", render_json(&payload)?);
        return Ok(());
    }

    println!("Stations: {}", summary.stations);
    println!("Links:    {}", summary.links);
    for usage in &summary.lines {
        println!("  line {:<2} {:<8} {} link(s)", usage.code, usage.name, usage.links);
    }
    if !summary.isolated.is_empty() {
        let ids: Vec<String> = summary.isolated.iter().map(|id| id.to_string()).collect();
        println!("Isolated: {}", ids.join(", "));
    }
    Ok(())
}

// =============================================================================
// VERIFY COMMAND
// =============================================================================

/// Decode the bundle and report its state.
///
/// A failed decode propagates, so the process exit code reflects bundle
/// validity; the error message carries the exact missing artifacts or the
/// first inconsistency found.
pub fn cmd_verify(dir: &Path, json_mode: bool) -> Result<(), RailgraphError> {
    let network = load_network(dir)?;

    if json_mode {
        let payload = serde_json::json!({
            "valid": true,
            "stations": network.station_count(),
            "links": network.link_count(),
        });
        println!("{}", render_json(&payload)?);
        return Ok(());
    }

    println!(
        "Bundle OK: {} station(s), {} link(s)",
        network.station_count(),
        network.link_count()
    );
    Ok(())
}

// =============================================================================
// INTERNAL
// =============================================================================

fn render_json(payload: &serde_json::Value) -> Result<String, RailgraphError> {
    serde_json::to_string_pretty(payload)
        .map_err(|e| RailgraphError::Io(format!("JSON encoding failed: {}", e)))
}
