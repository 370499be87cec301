pub mod matching;

pub use self::matching::{
    greedy_bipartite_matching,
    GreedyMatching,
    GreedyMatchingConfig,
    MatchOutcome,
    MatchingStatistics,
};
