//! Data structures for bipartite correspondence problems

pub mod bipartite;
pub mod dense;

pub use self::bipartite::{Edge, Matching};
pub use self::dense::{match_dense, EdgeArray};
