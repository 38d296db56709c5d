//! Ingredient Matcher
//!
//! Decides which trigger ingredients appear in OCR text. Each trigger is
//! checked independently against three layers, most confident first:
//!
//! 1. exact containment of the normalized trigger in the normalized text
//! 2. fuzzy comparison against every run of words as long as the trigger
//! 3. fuzzy comparison against every single word

use super::text_normalizer::{normalize, tokens};
use crate::utils::fuzzy::{find_first_match, Cutoff};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::trace;

/// Default cutoff for multi-word window comparisons
pub const DEFAULT_MULTI_WORD_THRESHOLD: f64 = 0.8;

/// Default cutoff for single-word comparisons
pub const DEFAULT_SINGLE_WORD_THRESHOLD: f64 = 0.85;

/// Similarity cutoffs for the fuzzy layers
///
/// Single words must score above their cutoff; runs of two or more words may
/// also score exactly the cutoff.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchThresholds {
    pub multi_word: f64,
    pub single_word: f64,
}

impl Default for MatchThresholds {
    fn default() -> Self {
        Self {
            multi_word: DEFAULT_MULTI_WORD_THRESHOLD,
            single_word: DEFAULT_SINGLE_WORD_THRESHOLD,
        }
    }
}

/// Which layer found an ingredient
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MatchKind {
    /// Normalized trigger is a substring of the normalized text
    Exact,
    /// A run of words passed the multi-word cutoff
    Window { window: String, ratio: f64 },
    /// A single word scored above the single-word cutoff
    Word { word: String, ratio: f64 },
}

/// A trigger judged present, borrowed from the caller's list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IngredientMatch<'a> {
    pub ingredient: &'a str,
    #[serde(flatten)]
    pub kind: MatchKind,
}

/// Layered exact/fuzzy ingredient matcher
#[derive(Debug, Clone, Copy, Default)]
pub struct IngredientMatcher {
    thresholds: MatchThresholds,
}

impl IngredientMatcher {
    pub fn new(thresholds: MatchThresholds) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> MatchThresholds {
        self.thresholds
    }

    /// Set of triggers present in `raw_text`, in their original spelling
    pub fn find<'a, S: AsRef<str>>(
        &self,
        raw_text: &str,
        triggers: &'a [S],
    ) -> BTreeSet<&'a str> {
        self.explain(raw_text, triggers)
            .into_iter()
            .map(|found| found.ingredient)
            .collect()
    }

    /// Every trigger present in `raw_text` with the layer that matched it
    ///
    /// Results follow the order of `triggers`. Duplicate triggers are
    /// evaluated (and reported) independently.
    pub fn explain<'a, S: AsRef<str>>(
        &self,
        raw_text: &str,
        triggers: &'a [S],
    ) -> Vec<IngredientMatch<'a>> {
        let text = normalize(raw_text);
        let words = tokens(&text);

        triggers
            .iter()
            .filter_map(|trigger| {
                let ingredient = trigger.as_ref();
                let kind = self.match_one(&text, &words, ingredient)?;
                trace!("Flagged '{}' via {:?}", ingredient, kind);
                Some(IngredientMatch { ingredient, kind })
            })
            .collect()
    }

    fn match_one(&self, text: &str, words: &[&str], ingredient: &str) -> Option<MatchKind> {
        let ing = normalize(ingredient);
        if ing.is_empty() {
            return None;
        }

        if text.contains(ing.as_str()) {
            return Some(MatchKind::Exact);
        }

        let k = tokens(&ing).len();
        if k <= words.len() {
            // One wrong letter in a five-letter word scores exactly 0.8
            let cutoff = if k > 1 {
                Cutoff::AtLeast(self.thresholds.multi_word)
            } else {
                Cutoff::Above(self.thresholds.multi_word)
            };
            let windows = words.windows(k).map(|window| window.join(" "));
            if let Some(hit) = find_first_match(&ing, windows, cutoff) {
                return Some(MatchKind::Window {
                    window: hit.value,
                    ratio: hit.score,
                });
            }
        }

        let cutoff = Cutoff::Above(self.thresholds.single_word);
        find_first_match(&ing, words, cutoff).map(|hit| MatchKind::Word {
            word: hit.value,
            ratio: hit.score,
        })
    }
}

/// Match with the default thresholds
pub fn find_triggers<'a, S: AsRef<str>>(raw_text: &str, triggers: &'a [S]) -> BTreeSet<&'a str> {
    IngredientMatcher::default().find(raw_text, triggers)
}
