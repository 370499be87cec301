//! Core trait and error definitions for bipartite correspondence matching
//!
//! This module establishes the interface every matcher implements, together
//! with the error vocabulary shared by the algorithm, the dense host-array
//! boundary and the batch runner.
//!
//! # Key Design Principles
//! - Matchers are stateless between calls and safe to share across threads
//! - Parameters are exposed through a uniform string interface
//! - Every failure is reported as a typed `MatchingError`

use std::collections::HashMap;
use std::fmt::{self, Debug, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::algorithm::graph::matching::MatchOutcome;
use crate::data_structures::bipartite::Edge;

/// Universal algorithm identifier for type-safe dispatch
#[derive(Debug, Clone, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct AlgorithmId(String);

impl AlgorithmId {
    pub fn new(name: &str) -> Self {
        Self(name.to_owned())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// One of the two disjoint node sets of a bipartite problem
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub enum Side {
    A,
    B,
}

impl Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::A => f.write_str("A"),
            Side::B => f.write_str("B"),
        }
    }
}

/// Error types for matching operations
#[derive(Debug, Error)]
pub enum MatchingError {
    /// An edge endpoint lies outside `[1, num_nodes_a]` or `[1, num_nodes_b]`.
    /// `row` is the 1-based position of the edge in the input sequence.
    #[error("Invalid edge #{row} from {a} to {b} (valid ranges are 1..={num_nodes_a} and 1..={num_nodes_b})")]
    InvalidEdge {
        row: usize,
        a: usize,
        b: usize,
        num_nodes_a: usize,
        num_nodes_b: usize,
    },

    #[error("Side {side} has no nodes")]
    EmptySide { side: Side },

    /// Host scalar node count that is not an integer in `1..=u32::MAX`
    #[error("Number of nodes on side {side} must be a positive integer, got {count}")]
    InvalidNodeCount { side: Side, count: f64 },

    #[error("Node {a} is assigned to node {b}, but side B only has {num_nodes_b} nodes")]
    AssignmentOutOfRange { a: usize, b: usize, num_nodes_b: usize },

    #[error("Node {b} of side B is assigned more than once")]
    DuplicateAssignment { b: usize },

    #[error("Edge array must be an n x 2 array, got {len} elements in {columns} columns")]
    MalformedEdgeArray { len: usize, columns: usize },

    #[error("Edge array entry at row {row}, column {column} is not a node index: {value}")]
    InvalidIndexValue { row: usize, column: usize, value: f64 },

    #[error("Invalid parameter: {name} - {reason}")]
    InvalidParameter { name: String, reason: String },

    #[error("Invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result type alias using `MatchingError`
pub type MatchingResult<T> = std::result::Result<T, MatchingError>;

/// Algorithm complexity information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlgorithmComplexity {
    pub time_complexity: String,
    pub space_complexity: String,
    pub best_case: String,
    pub worst_case: String,
}

/// Main matcher trait
///
/// # Invariants
/// - Thread-safe execution
/// - No state carried between calls
/// - Deterministic result for a fixed edge order
pub trait BipartiteMatcher: Debug + Send + Sync {
    /// Returns the matcher's unique identifier
    fn id(&self) -> AlgorithmId;

    /// Returns the matcher's descriptive name
    fn name(&self) -> &'static str;

    /// Returns the matcher's category
    fn category(&self) -> &'static str {
        "bipartite_matching"
    }

    /// Returns the asymptotic complexity of a single call
    fn complexity(&self) -> AlgorithmComplexity;

    /// Returns all parameters with their current values
    fn parameters(&self) -> HashMap<String, String>;

    /// Gets a single parameter value
    fn get_parameter(&self, name: &str) -> Option<String> {
        self.parameters().remove(name)
    }

    /// Sets a parameter with type validation
    fn set_parameter(&mut self, name: &str, value: &str) -> MatchingResult<()>;

    /// Matches side-A nodes `1..=num_nodes_a` to side-B nodes `1..=num_nodes_b`
    /// using `edges` in the order given.
    fn match_edges(
        &self,
        num_nodes_a: usize,
        num_nodes_b: usize,
        edges: &[Edge],
    ) -> MatchingResult<MatchOutcome>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_algorithm_id_uniqueness() {
        let id1 = AlgorithmId::new("greedy");
        let id2 = AlgorithmId::new("hungarian");
        let id3 = AlgorithmId::new("greedy");

        assert_ne!(id1, id2);
        assert_eq!(id1, id3);
        assert_eq!(id1.as_str(), "greedy");
    }

    #[test]
    fn test_invalid_edge_message_names_indices() {
        let err = MatchingError::InvalidEdge {
            row: 1,
            a: 3,
            b: 1,
            num_nodes_a: 2,
            num_nodes_b: 2,
        };

        let message = err.to_string();
        assert!(message.contains("from 3 to 1"));
        assert!(message.contains("1..=2"));
    }

    #[test]
    fn test_node_count_messages() {
        let err = MatchingError::InvalidNodeCount { side: Side::B, count: 1.5 };
        assert_eq!(
            err.to_string(),
            "Number of nodes on side B must be a positive integer, got 1.5"
        );

        let err = MatchingError::EmptySide { side: Side::A };
        assert_eq!(err.to_string(), "Side A has no nodes");
    }
}
