//! Parallel batch matching
//!
//! Matching problems are independent of each other: every call owns its
//! availability flags and its output. A batch of problems, such as every
//! image pair of a benchmark sequence, is therefore spread over the rayon
//! thread pool without any coordination beyond collecting the results.
//!
//! # Guarantees
//!
//! - Results are returned in input order
//! - A failing problem yields its own error and never affects the others
//! - Each result equals what a sequential call on the same problem returns

use std::time::Instant;

use log::info;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::algorithm::graph::matching::MatchOutcome;
use crate::algorithm::traits::{BipartiteMatcher, MatchingResult};
use crate::data_structures::bipartite::Edge;

/// Batches at or below this size are matched on the calling thread
const SEQUENTIAL_THRESHOLD: usize = 1;

/// One self-contained matching problem
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchingProblem {
    pub num_nodes_a: usize,
    pub num_nodes_b: usize,
    pub edges: Vec<Edge>,
}

impl MatchingProblem {
    pub fn new(num_nodes_a: usize, num_nodes_b: usize, edges: Vec<Edge>) -> Self {
        Self {
            num_nodes_a,
            num_nodes_b,
            edges,
        }
    }

    pub fn solve<M: BipartiteMatcher + ?Sized>(&self, matcher: &M) -> MatchingResult<MatchOutcome> {
        matcher.match_edges(self.num_nodes_a, self.num_nodes_b, &self.edges)
    }
}

/// Solves every problem with `matcher`, in parallel when there is more than one
pub fn match_batch<M: BipartiteMatcher + ?Sized>(
    matcher: &M,
    problems: &[MatchingProblem],
) -> Vec<MatchingResult<MatchOutcome>> {
    let start = Instant::now();

    let results: Vec<_> = if problems.len() <= SEQUENTIAL_THRESHOLD {
        problems.iter().map(|problem| problem.solve(matcher)).collect()
    } else {
        problems.par_iter().map(|problem| problem.solve(matcher)).collect()
    };

    let failures = results.iter().filter(|result| result.is_err()).count();
    info!(
        "{} matched {} problems ({} failed) in {:?}",
        matcher.name(),
        problems.len(),
        failures,
        start.elapsed()
    );

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithm::graph::matching::GreedyMatching;
    use crate::algorithm::traits::MatchingError;

    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn problem(num_a: usize, num_b: usize, pairs: &[(usize, usize)]) -> MatchingProblem {
        MatchingProblem::new(num_a, num_b, pairs.iter().copied().map(Edge::from).collect())
    }

    #[test]
    fn test_batch_preserves_order() {
        init_logging();

        let matcher = GreedyMatching::new();
        let problems: Vec<_> = (1..=32)
            .map(|n| problem(n, n, &[(n, 1), (1, n)]))
            .collect();

        let results = match_batch(&matcher, &problems);
        assert_eq!(results.len(), problems.len());

        for (problem, result) in problems.iter().zip(&results) {
            let outcome = result.as_ref().unwrap();
            assert_eq!(outcome, &problem.solve(&matcher).unwrap());
            assert_eq!(outcome.matching.get(problem.num_nodes_a), Some(1));
        }
    }

    #[test]
    fn test_failure_is_isolated() {
        let matcher = GreedyMatching::new();
        let problems = vec![
            problem(2, 2, &[(1, 1), (2, 2)]),
            problem(2, 2, &[(3, 1)]),
            problem(2, 1, &[(1, 1), (2, 1)]),
        ];

        let results = match_batch(&matcher, &problems);

        assert_eq!(results[0].as_ref().unwrap().matching.to_indices(), vec![1, 2]);
        assert!(matches!(results[1], Err(MatchingError::InvalidEdge { a: 3, .. })));
        assert_eq!(results[2].as_ref().unwrap().matching.to_indices(), vec![1, 0]);
    }

    #[test]
    fn test_single_and_empty_batches() {
        let matcher = GreedyMatching::new();

        assert!(match_batch(&matcher, &[]).is_empty());

        let results = match_batch(&matcher, &[problem(1, 1, &[(1, 1)])]);
        assert_eq!(results[0].as_ref().unwrap().matching.to_indices(), vec![1]);
    }

    #[test]
    fn test_dynamic_matcher() {
        let matcher: Box<dyn BipartiteMatcher> = Box::new(GreedyMatching::new());

        let results = match_batch(matcher.as_ref(), &[problem(1, 2, &[(1, 2)])]);
        assert_eq!(results[0].as_ref().unwrap().matching.to_indices(), vec![2]);
    }
}
