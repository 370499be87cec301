//! Bipartite correspondence data structures
//!
//! Nodes on both sides are addressed with the 1-based indices used by the
//! host array environment. Storage is 0-based; translation happens only in
//! the accessors of this module.

use serde::{Deserialize, Serialize};

use crate::algorithm::traits::MatchingError;

/// Candidate correspondence between side-A node `a` and side-B node `b`
/// (both 1-based).
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub a: usize,
    pub b: usize,
}

impl Edge {
    #[inline]
    pub fn new(a: usize, b: usize) -> Self {
        Self { a, b }
    }

    /// Returns the 0-based endpoints when both lie inside the given side sizes
    #[inline]
    pub(crate) fn zero_based(
        self,
        num_nodes_a: usize,
        num_nodes_b: usize,
    ) -> Option<(usize, usize)> {
        let in_range =
            (1..=num_nodes_a).contains(&self.a) && (1..=num_nodes_b).contains(&self.b);
        in_range.then(|| (self.a - 1, self.b - 1))
    }
}

impl From<(usize, usize)> for Edge {
    fn from((a, b): (usize, usize)) -> Self {
        Self::new(a, b)
    }
}

/// Per-side availability flags for a single matching pass
#[derive(Debug)]
pub(crate) struct Availability {
    free_a: Vec<bool>,
    free_b: Vec<bool>,
}

impl Availability {
    pub(crate) fn new(num_nodes_a: usize, num_nodes_b: usize) -> Self {
        Self {
            free_a: vec![true; num_nodes_a],
            free_b: vec![true; num_nodes_b],
        }
    }

    /// Claims both endpoints if they are still free. Indices are 0-based and
    /// must already be in range.
    #[inline]
    pub(crate) fn try_take(&mut self, a: usize, b: usize) -> bool {
        if self.free_a[a] && self.free_b[b] {
            self.free_a[a] = false;
            self.free_b[b] = false;
            true
        } else {
            false
        }
    }
}

/// Partial injective mapping from side-A nodes to side-B nodes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawMatching")]
pub struct Matching {
    num_nodes_b: usize,
    assignments: Vec<Option<usize>>,
}

/// Unchecked wire form of `Matching`
#[derive(Deserialize)]
struct RawMatching {
    num_nodes_b: usize,
    assignments: Vec<Option<usize>>,
}

impl TryFrom<RawMatching> for Matching {
    type Error = MatchingError;

    fn try_from(raw: RawMatching) -> Result<Self, Self::Error> {
        let mut seen = vec![false; raw.num_nodes_b];
        for (a, slot) in raw.assignments.iter().enumerate() {
            let Some(b) = *slot else { continue };
            match seen.get_mut(b) {
                Some(taken) if *taken => {
                    return Err(MatchingError::DuplicateAssignment { b: b + 1 })
                }
                Some(taken) => *taken = true,
                None => {
                    return Err(MatchingError::AssignmentOutOfRange {
                        a: a + 1,
                        b: b.saturating_add(1),
                        num_nodes_b: raw.num_nodes_b,
                    })
                }
            }
        }

        Ok(Self {
            num_nodes_b: raw.num_nodes_b,
            assignments: raw.assignments,
        })
    }
}

impl Matching {
    /// Creates a matching with every side-A node unmatched
    pub fn unmatched(num_nodes_a: usize, num_nodes_b: usize) -> Self {
        Self {
            num_nodes_b,
            assignments: vec![None; num_nodes_a],
        }
    }

    /// Records `a -> b` using 0-based indices
    #[inline]
    pub(crate) fn assign(&mut self, a: usize, b: usize) {
        self.assignments[a] = Some(b);
    }

    pub fn num_nodes_a(&self) -> usize {
        self.assignments.len()
    }

    pub fn num_nodes_b(&self) -> usize {
        self.num_nodes_b
    }

    /// B-node matched to the 1-based A-node `a`, if any
    pub fn get(&self, a: usize) -> Option<usize> {
        let index = a.checked_sub(1)?;
        self.assignments.get(index).copied().flatten().map(|b| b + 1)
    }

    /// Number of accepted correspondences
    pub fn len(&self) -> usize {
        self.assignments.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.assignments.iter().all(Option::is_none)
    }

    /// Matched `(a, b)` pairs in ascending order of `a`, 1-based
    pub fn pairs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.assignments
            .iter()
            .enumerate()
            .filter_map(|(a, slot)| slot.map(|b| (a + 1, b + 1)))
    }

    /// 1-based B-index per A-node, `0` for unmatched
    pub fn to_indices(&self) -> Vec<usize> {
        self.assignments
            .iter()
            .map(|slot| slot.map_or(0, |b| b + 1))
            .collect()
    }

    /// One-row host array: 1-based B-index per A-node, `0.0` for unmatched
    pub fn to_host_row(&self) -> Vec<f64> {
        self.assignments
            .iter()
            .map(|slot| slot.map_or(0.0, |b| (b + 1) as f64))
            .collect()
    }

    /// B-side occupancy: 1-based A-index per B-node, `0` for unmatched
    pub fn inverse(&self) -> Vec<usize> {
        let mut occupancy = vec![0; self.num_nodes_b];
        for (a, b) in self.pairs() {
            occupancy[b - 1] = a;
        }
        occupancy
    }

    /// Checks that no B-node is claimed by two A-nodes
    pub fn is_injective(&self) -> bool {
        let mut seen = vec![false; self.num_nodes_b];
        for b in self.assignments.iter().flatten() {
            match seen.get_mut(*b) {
                Some(flag) if !*flag => *flag = true,
                _ => return false,
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_range_translation() {
        assert_eq!(Edge::new(1, 1).zero_based(2, 3), Some((0, 0)));
        assert_eq!(Edge::new(2, 3).zero_based(2, 3), Some((1, 2)));
        assert_eq!(Edge::new(0, 1).zero_based(2, 3), None);
        assert_eq!(Edge::new(3, 1).zero_based(2, 3), None);
        assert_eq!(Edge::new(1, 4).zero_based(2, 3), None);
    }

    #[test]
    fn test_availability_claims_once() {
        let mut free = Availability::new(2, 1);

        assert!(free.try_take(0, 0));
        assert!(!free.try_take(1, 0));
        assert!(!free.try_take(0, 0));
    }

    #[test]
    fn test_matching_accessors() {
        let mut matching = Matching::unmatched(3, 4);
        matching.assign(0, 3);
        matching.assign(2, 0);

        assert_eq!(matching.num_nodes_a(), 3);
        assert_eq!(matching.num_nodes_b(), 4);
        assert_eq!(matching.len(), 2);
        assert!(!matching.is_empty());
        assert_eq!(matching.get(1), Some(4));
        assert_eq!(matching.get(2), None);
        assert_eq!(matching.get(0), None);
        assert_eq!(matching.get(4), None);
        assert_eq!(matching.pairs().collect::<Vec<_>>(), vec![(1, 4), (3, 1)]);
        assert_eq!(matching.to_indices(), vec![4, 0, 1]);
        assert_eq!(matching.to_host_row(), vec![4.0, 0.0, 1.0]);
        assert_eq!(matching.inverse(), vec![3, 0, 0, 1]);
        assert!(matching.is_injective());
    }

    #[test]
    fn test_duplicate_target_is_not_injective() {
        let mut matching = Matching::unmatched(2, 2);
        matching.assign(0, 1);
        matching.assign(1, 1);

        assert!(!matching.is_injective());
    }

    #[test]
    fn test_matching_serializes_assignments() {
        let mut matching = Matching::unmatched(2, 2);
        matching.assign(1, 0);

        let json = serde_json::to_value(&matching).unwrap();
        assert_eq!(json["assignments"], serde_json::json!([null, 0]));

        let restored: Matching = serde_json::from_value(json).unwrap();
        assert_eq!(restored, matching);
    }

    #[test]
    fn test_deserialize_rejects_out_of_range_target() {
        let err = serde_json::from_str::<Matching>(r#"{"num_nodes_b":1,"assignments":[5]}"#)
            .unwrap_err();
        assert!(err.to_string().contains("side B only has 1 nodes"));

        let err = serde_json::from_str::<Matching>(r#"{"num_nodes_b":0,"assignments":[null,0]}"#)
            .unwrap_err();
        assert!(err.to_string().contains("Node 2 is assigned to node 1"));
    }

    #[test]
    fn test_deserialize_rejects_duplicate_target() {
        let err = serde_json::from_str::<Matching>(r#"{"num_nodes_b":2,"assignments":[0,0]}"#)
            .unwrap_err();
        assert!(err.to_string().contains("Node 1 of side B is assigned more than once"));
    }

    #[test]
    fn test_deserialized_matching_keeps_invariants() {
        let matching: Matching =
            serde_json::from_str(r#"{"num_nodes_b":3,"assignments":[2,null,0]}"#).unwrap();

        assert!(matching.is_injective());
        assert_eq!(matching.to_indices(), vec![3, 0, 1]);
        assert_eq!(matching.inverse(), vec![3, 0, 1]);
    }
}
