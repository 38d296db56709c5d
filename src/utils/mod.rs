//! Utility modules

pub mod fuzzy;

pub use fuzzy::{
    find_first_match, matching_blocks, similarity, Cutoff, FuzzyMatch, MatchingBlock,
};
