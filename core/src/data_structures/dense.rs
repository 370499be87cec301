//! Dense host-array boundary
//!
//! Host numeric runtimes hand over the candidate edges as an `n x 2` array
//! of doubles stored column-major: all `a` endpoints first, then all `b`
//! endpoints. This module checks the shape and the entries of such a buffer,
//! converts it into typed edges, and writes the matching back as the one-row
//! result array with `0` marking unmatched nodes.

use log::debug;

use crate::algorithm::traits::{BipartiteMatcher, MatchingError, MatchingResult, Side};
use crate::data_structures::bipartite::Edge;

const EDGE_COLUMNS: usize = 2;

/// Largest node count or index accepted from a host array
const MAX_HOST_INDEX: f64 = u32::MAX as f64;

/// Ranked edge list decoded from a dense host array
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EdgeArray {
    edges: Vec<Edge>,
}

impl EdgeArray {
    /// Decodes a column-major `rows x columns` buffer.
    ///
    /// An empty buffer with zero rows is accepted whatever its column count.
    pub fn from_column_major(data: &[f64], rows: usize, columns: usize) -> MatchingResult<Self> {
        if rows == 0 && data.is_empty() {
            return Ok(Self::default());
        }
        if columns != EDGE_COLUMNS || rows.checked_mul(EDGE_COLUMNS) != Some(data.len()) {
            return Err(MatchingError::MalformedEdgeArray {
                len: data.len(),
                columns,
            });
        }

        let (starts, ends) = data.split_at(rows);
        let edges = starts
            .iter()
            .zip(ends)
            .enumerate()
            .map(|(row, (&a, &b))| decode_edge(row, a, b))
            .collect::<MatchingResult<Vec<_>>>()?;

        Ok(Self { edges })
    }

    /// Decodes row-major `[a, b]` pairs
    pub fn from_rows(rows: &[[f64; 2]]) -> MatchingResult<Self> {
        let edges = rows
            .iter()
            .enumerate()
            .map(|(row, &[a, b])| decode_edge(row, a, b))
            .collect::<MatchingResult<Vec<_>>>()?;

        Ok(Self { edges })
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

/// Runs `matcher` on host-array inputs and returns the one-row result array
pub fn match_dense<M: BipartiteMatcher + ?Sized>(
    matcher: &M,
    num_nodes_a: f64,
    num_nodes_b: f64,
    edges: &EdgeArray,
) -> MatchingResult<Vec<f64>> {
    let num_nodes_a = node_count(Side::A, num_nodes_a)?;
    let num_nodes_b = node_count(Side::B, num_nodes_b)?;

    let outcome = matcher.match_edges(num_nodes_a, num_nodes_b, edges.edges())?;
    debug!(
        "Dense matching produced {} pairs from {} edges",
        outcome.statistics.edges_accepted,
        edges.len()
    );

    Ok(outcome.matching.to_host_row())
}

/// Converts a host scalar node count into an integer in `1..=u32::MAX`
fn node_count(side: Side, value: f64) -> MatchingResult<usize> {
    if !value.is_finite() || value.fract() != 0.0 || value < 1.0 || value > MAX_HOST_INDEX {
        return Err(MatchingError::InvalidNodeCount { side, count: value });
    }
    Ok(value as usize)
}

/// Decodes the `row`-th (0-based) pair of host indices. Range checks against
/// the node counts are left to the matcher.
fn decode_edge(row: usize, a: f64, b: f64) -> MatchingResult<Edge> {
    Ok(Edge::new(host_index(row, 0, a)?, host_index(row, 1, b)?))
}

fn host_index(row: usize, column: usize, value: f64) -> MatchingResult<usize> {
    if !value.is_finite() || value.fract() != 0.0 || value < 0.0 || value > MAX_HOST_INDEX {
        return Err(MatchingError::InvalidIndexValue {
            row: row + 1,
            column: column + 1,
            value,
        });
    }
    Ok(value as usize)
}
