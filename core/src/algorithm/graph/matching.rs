//! Greedy Bipartite Matching
//!
//! One-pass greedy matching of ranked correspondences between two node sets,
//! typically the keypoints detected in two images. The caller supplies the
//! candidate edges already sorted by descending desirability; the matcher
//! accepts an edge exactly when both of its endpoints are still free.
//!
//! # Algorithmic Complexity
//!
//! - **Time**: O(E) with O(1) work per edge through direct flag indexing
//! - **Space**: O(|A| + |B|) for the availability flags and the output
//!
//! # Correctness Guarantees
//!
//! - The result is a partial injection from side A into side B
//! - The result is maximal: every input edge has at least one matched endpoint
//! - For a fixed edge order the result is fully deterministic
//!
//! The scan stops as soon as `min(|A|, |B|)` edges have been accepted, since no
//! later edge can grow the matching. The result is not a maximum-weight matching.
//!
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>

use std::collections::HashMap;

use log::{debug, trace, warn};
use serde::{Deserialize, Serialize};

use crate::algorithm::traits::{
    AlgorithmComplexity, AlgorithmId, BipartiteMatcher, MatchingError, MatchingResult, Side,
};
use crate::data_structures::bipartite::{Availability, Edge, Matching};

// ═══════════════════════════════════════════════════════════════════════════════════════
// CONFIGURATION AND STATISTICS
// ═══════════════════════════════════════════════════════════════════════════════════════

/// Tunable behavior of the greedy scan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GreedyMatchingConfig {
    /// Stop scanning once both sides can no longer grow the matching
    pub early_exit: bool,

    /// After an early exit, still bounds-check the remaining edges
    pub validate_tail: bool,
}

impl Default for GreedyMatchingConfig {
    fn default() -> Self {
        Self {
            early_exit: true,
            validate_tail: false,
        }
    }
}

impl GreedyMatchingConfig {
    /// Parses a JSON configuration document. Missing fields take their
    /// default values; unknown fields are rejected.
    pub fn from_json(document: &str) -> MatchingResult<Self> {
        Ok(serde_json::from_str(document)?)
    }
}

/// Counters collected during a single matching pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchingStatistics {
    pub edges_total: usize,
    pub edges_scanned: usize,
    pub edges_accepted: usize,
    pub edges_rejected: usize,
    /// The matching reached `min(|A|, |B|)`
    pub saturated: bool,
    /// Edges were left unscanned because the matching saturated
    pub early_exit: bool,
}

/// Matching together with the statistics of the pass that produced it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchOutcome {
    pub matching: Matching,
    pub statistics: MatchingStatistics,
}

// ═══════════════════════════════════════════════════════════════════════════════════════
// GREEDY MATCHER
// ═══════════════════════════════════════════════════════════════════════════════════════

/// Order-dependent greedy matcher over a ranked edge list
#[derive(Debug, Clone, Default)]
pub struct GreedyMatching {
    config: GreedyMatchingConfig,
}

impl GreedyMatching {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: GreedyMatchingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GreedyMatchingConfig {
        &self.config
    }

    /// Runs one greedy pass over `edges` in the order given.
    ///
    /// Fails with `InvalidEdge` on the first out-of-range endpoint; no partial
    /// matching is returned in that case.
    pub fn run(
        &self,
        num_nodes_a: usize,
        num_nodes_b: usize,
        edges: &[Edge],
    ) -> MatchingResult<MatchOutcome> {
        ensure_node_count(Side::A, num_nodes_a)?;
        ensure_node_count(Side::B, num_nodes_b)?;

        debug!(
            "Greedy matching: |A|={}, |B|={}, {} candidate edges",
            num_nodes_a,
            num_nodes_b,
            edges.len()
        );

        let max_matches = num_nodes_a.min(num_nodes_b);
        let mut available = Availability::new(num_nodes_a, num_nodes_b);
        let mut matching = Matching::unmatched(num_nodes_a, num_nodes_b);
        let mut statistics = MatchingStatistics {
            edges_total: edges.len(),
            ..MatchingStatistics::default()
        };

        for (index, edge) in edges.iter().enumerate() {
            let (a, b) = locate(index, *edge, num_nodes_a, num_nodes_b)?;
            statistics.edges_scanned += 1;

            if !available.try_take(a, b) {
                statistics.edges_rejected += 1;
                continue;
            }

            matching.assign(a, b);
            statistics.edges_accepted += 1;
            trace!("Accepted edge #{}: {} -> {}", index + 1, edge.a, edge.b);

            if statistics.edges_accepted == max_matches {
                statistics.saturated = true;
                if self.config.early_exit {
                    break;
                }
            }
        }

        let scanned = statistics.edges_scanned;
        if scanned < edges.len() {
            statistics.early_exit = true;
            debug!(
                "Matching saturated at {} pairs after {} of {} edges",
                max_matches,
                scanned,
                edges.len()
            );

            if self.config.validate_tail {
                for (offset, edge) in edges[scanned..].iter().enumerate() {
                    locate(scanned + offset, *edge, num_nodes_a, num_nodes_b)?;
                }
            }
        }

        Ok(MatchOutcome {
            matching,
            statistics,
        })
    }
}

/// Matches with the default configuration and returns only the mapping
pub fn greedy_bipartite_matching(
    num_nodes_a: usize,
    num_nodes_b: usize,
    edges: &[Edge],
) -> MatchingResult<Matching> {
    GreedyMatching::new()
        .run(num_nodes_a, num_nodes_b, edges)
        .map(|outcome| outcome.matching)
}

fn ensure_node_count(side: Side, count: usize) -> MatchingResult<()> {
    if count == 0 {
        return Err(MatchingError::EmptySide { side });
    }
    Ok(())
}

/// Translates the edge at `index` to 0-based endpoints or reports it
fn locate(
    index: usize,
    edge: Edge,
    num_nodes_a: usize,
    num_nodes_b: usize,
) -> MatchingResult<(usize, usize)> {
    edge.zero_based(num_nodes_a, num_nodes_b).ok_or_else(|| {
        warn!("Invalid edge #{} from {} to {}", index + 1, edge.a, edge.b);
        MatchingError::InvalidEdge {
            row: index + 1,
            a: edge.a,
            b: edge.b,
            num_nodes_a,
            num_nodes_b,
        }
    })
}

fn parse_flag(name: &str, value: &str) -> MatchingResult<bool> {
    match value {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(MatchingError::InvalidParameter {
            name: name.to_string(),
            reason: format!("invalid value {}. Valid options: true, false", value),
        }),
    }
}

// ═══════════════════════════════════════════════════════════════════════════════════════
// MATCHER TRAIT IMPLEMENTATION
// ═══════════════════════════════════════════════════════════════════════════════════════

impl BipartiteMatcher for GreedyMatching {
    fn id(&self) -> AlgorithmId {
        AlgorithmId::new("greedy_bipartite_matching")
    }

    fn name(&self) -> &'static str {
        "Greedy Bipartite Matching"
    }

    fn complexity(&self) -> AlgorithmComplexity {
        AlgorithmComplexity {
            time_complexity: "O(E)".to_string(),
            space_complexity: "O(|A| + |B|)".to_string(),
            best_case: "O(min(|A|, |B|))".to_string(),
            worst_case: "O(E)".to_string(),
        }
    }

    fn parameters(&self) -> HashMap<String, String> {
        let mut params = HashMap::new();
        params.insert("early_exit".to_string(), self.config.early_exit.to_string());
        params.insert("validate_tail".to_string(), self.config.validate_tail.to_string());
        params
    }

    fn set_parameter(&mut self, name: &str, value: &str) -> MatchingResult<()> {
        match name {
            "early_exit" => self.config.early_exit = parse_flag(name, value)?,
            "validate_tail" => self.config.validate_tail = parse_flag(name, value)?,
            _ => {
                return Err(MatchingError::InvalidParameter {
                    name: name.to_string(),
                    reason: "unknown parameter. Valid parameters: early_exit, validate_tail"
                        .to_string(),
                })
            }
        }
        Ok(())
    }

    fn match_edges(
        &self,
        num_nodes_a: usize,
        num_nodes_b: usize,
        edges: &[Edge],
    ) -> MatchingResult<MatchOutcome> {
        self.run(num_nodes_a, num_nodes_b, edges)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════════════
// UNIT TESTS WITH PROPERTY-BASED VERIFICATION
// ═══════════════════════════════════════════════════════════════════════════════════════
