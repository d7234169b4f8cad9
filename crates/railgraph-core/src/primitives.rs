//! # Innate Primitives
//!
//! Hardcoded runtime constants for the Railgraph core.
//!
//! The network starts with zero data but fixed rules: the canonical line
//! table, the default station naming scheme, and the validation limits are
//! compiled into the binary and immutable at runtime.

/// Number of canonical transit lines.
///
/// Line codes in the persisted line matrix are `1..=LINE_COUNT`; `0` marks
/// the absence of a link.
pub const LINE_COUNT: usize = 10;

/// Canonical line names, indexed by `code - 1`.
///
/// The order is fixed: it defines the code assignment and must never be
/// reordered, or persisted line matrices change meaning.
pub const LINE_NAMES: [&str; LINE_COUNT] = [
    "Blue", "Red", "Green", "Orange", "Purple", "Yellow", "Brown", "Pink", "Gray", "Black",
];

/// Prefix of default station names (`E1`, `E2`, ...).
pub const DEFAULT_NAME_PREFIX: &str = "E";

/// Minimum number of stations a network can be created with.
pub const MIN_STATION_COUNT: u32 = 1;

// =============================================================================
// INPUT VALIDATION LIMITS
// =============================================================================

/// Maximum number of stations in a network.
///
/// Enforced on creation, on `add_station`, and on decode BEFORE the N×N
/// matrices are parsed, so a corrupted adjacency artifact cannot force the
/// decoder into allocating enormous matrices.
pub const MAX_STATION_COUNT: u32 = 10_000;

/// Maximum length for explicit station names.
///
/// Names longer than this are rejected by the model and the decoder.
/// This prevents memory exhaustion from malicious or malformed input.
pub const MAX_NAME_LENGTH: usize = 256;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ten_canonical_lines() {
        assert_eq!(LINE_NAMES.len(), LINE_COUNT);
        assert_eq!(LINE_COUNT, 10);
    }

    #[test]
    fn line_names_are_distinct() {
        for (i, a) in LINE_NAMES.iter().enumerate() {
            for b in LINE_NAMES.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }
}
