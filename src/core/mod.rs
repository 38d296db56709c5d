//! Core matching modules
//!
//! Contains text normalization and the layered ingredient matcher.
//! Nothing here performs I/O.

pub mod matcher;
pub mod text_normalizer;

pub use matcher::{
    find_triggers, IngredientMatch, IngredientMatcher, MatchKind, MatchThresholds,
    DEFAULT_MULTI_WORD_THRESHOLD, DEFAULT_SINGLE_WORD_THRESHOLD,
};
pub use text_normalizer::{normalize, tokens};
