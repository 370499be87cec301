pub mod parallel;

pub use self::parallel::{match_batch, MatchingProblem};
