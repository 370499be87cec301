//! Correspond Core
//! Greedy one-to-one matching of ranked feature correspondences
//! Copyright (c) 2025 Mohammad Atashi <mohammadaliatashi@icloud.com>
//!
//! Candidate correspondences between the features of two images arrive as an
//! edge list already ranked by an upstream scoring step. The matcher walks the
//! list once and keeps every edge whose endpoints are both still free.
//!
//! ```
//! use correspond_core::{greedy_bipartite_matching, Edge};
//!
//! let edges = [Edge::new(1, 2), Edge::new(2, 2), Edge::new(2, 1)];
//! let matching = greedy_bipartite_matching(2, 2, &edges).unwrap();
//! assert_eq!(matching.to_indices(), vec![2, 1]);
//! ```

pub mod algorithm;
pub mod data_structures;
pub mod optimization;

pub use self::algorithm::*;
pub use self::data_structures::*;
pub use self::optimization::*;
