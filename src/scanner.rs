//! Label Scanner
//!
//! Glues a text source, an ingredient store and the matcher together.
//! Handles single images, multi-frame live scans and ingredient management.

use crate::config::Config;
use crate::core::{normalize, IngredientMatch, IngredientMatcher};
use crate::error::{ScanError, ScanResult};
use crate::ocr::{self, ExtractError, TextSource};
use crate::store::IngredientStore;
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Result of scanning one image (or one piece of text)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanReport {
    pub extracted_text: String,
    pub flagged_ingredients: Vec<String>,
}

/// Result of scanning several frames as one document
///
/// `all_text` holds one entry per frame, in submission order; frames that
/// could not be read contribute an empty string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FramesReport {
    pub all_text: Vec<String>,
    pub flagged_ingredients: Vec<String>,
}

/// Stored trigger ingredients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientList {
    pub ingredients: Vec<String>,
}

pub struct Scanner {
    source: Arc<dyn TextSource>,
    store: Arc<dyn IngredientStore>,
    matcher: IngredientMatcher,
    max_text_chars: usize,
}

impl Scanner {
    pub fn new(
        source: Arc<dyn TextSource>,
        store: Arc<dyn IngredientStore>,
        config: &Config,
    ) -> Self {
        Self {
            source,
            store,
            matcher: IngredientMatcher::new(config.matching),
            max_text_chars: config.max_text_chars,
        }
    }

    /// OCR one image and flag trigger ingredients in it
    ///
    /// OCR failures are not errors: the image is treated as having no text.
    pub async fn scan_image(&self, image: Vec<u8>) -> ScanResult<ScanReport> {
        let source = Arc::clone(&self.source);
        let text =
            tokio::task::spawn_blocking(move || ocr::extract_or_empty(source.as_ref(), &image))
                .await
                .unwrap_or_else(|e| {
                    warn!("⚠️ OCR task failed: {}", e);
                    String::new()
                });
        debug!("📝 OCR text: '{}'", text);
        self.scan_text(&text)
    }

    /// Flag trigger ingredients in already extracted text
    pub fn scan_text(&self, text: &str) -> ScanResult<ScanReport> {
        let flagged_ingredients = self.flag(text)?;
        Ok(ScanReport {
            extracted_text: text.to_string(),
            flagged_ingredients,
        })
    }

    /// Explain which layer flagged each trigger in `text`
    ///
    /// Applies the same length cap as [`Scanner::scan_text`].
    pub fn explain_text<'t>(
        &self,
        text: &str,
        triggers: &'t [String],
    ) -> Vec<IngredientMatch<'t>> {
        let text = cap_chars(text, self.max_text_chars);
        self.matcher.explain(text, triggers)
    }

    /// OCR every frame in parallel, then match the combined text once
    pub async fn scan_frames(&self, frames: Vec<Vec<u8>>) -> ScanResult<FramesReport> {
        if frames.is_empty() {
            return Err(ScanError::NoFrames);
        }
        self.scan_decoded(frames.into_iter().map(Ok).collect()).await
    }

    /// Like [`Scanner::scan_frames`] for base64 (or data URL) frames
    ///
    /// A frame that does not decode counts as a failed frame.
    pub async fn scan_encoded_frames(&self, frames: &[String]) -> ScanResult<FramesReport> {
        if frames.is_empty() {
            return Err(ScanError::NoFrames);
        }
        let decoded = frames.iter().map(|frame| ocr::decode_frame(frame)).collect();
        self.scan_decoded(decoded).await
    }

    async fn scan_decoded(
        &self,
        frames: Vec<Result<Vec<u8>, ExtractError>>,
    ) -> ScanResult<FramesReport> {
        info!("🎞️ Scanning {} frames", frames.len());

        let tasks = frames.into_iter().map(|frame| {
            let source = Arc::clone(&self.source);
            async move {
                let image = frame?;
                let text = tokio::task::spawn_blocking(move || source.extract_text(&image))
                    .await
                    .map_err(|e| ExtractError::Task(e.to_string()))??;
                Ok::<_, ExtractError>(text)
            }
        });

        let all_text: Vec<String> = join_all(tasks)
            .await
            .into_iter()
            .enumerate()
            .map(|(idx, result)| match result {
                Ok(text) => text,
                Err(e) => {
                    warn!("⚠️ Failed to process frame {}: {}", idx, e);
                    String::new()
                }
            })
            .collect();

        let combined = all_text.join(" ");
        let flagged_ingredients = self.flag(&combined)?;

        Ok(FramesReport {
            all_text,
            flagged_ingredients,
        })
    }

    /// Store a new trigger ingredient, returning the stored form
    ///
    /// Names are trimmed and lowercased; names with nothing left after
    /// normalization are rejected. A name that normalizes the same as a
    /// stored one is not added again and the stored spelling is returned.
    pub fn add_ingredient(&self, raw: &str) -> ScanResult<String> {
        let name = raw.trim().to_lowercase();
        let key = normalize(&name);
        if key.is_empty() {
            return Err(ScanError::MissingIngredient);
        }

        let existing = self
            .store
            .list_triggers()?
            .into_iter()
            .find(|stored| normalize(stored) == key);
        if let Some(stored) = existing {
            debug!("Ingredient '{}' matches stored '{}'", name, stored);
            return Ok(stored);
        }

        if self.store.add_trigger(&name)? {
            info!("➕ Ingredient '{}' added", name);
        } else {
            debug!("Ingredient '{}' was already stored", name);
        }
        Ok(name)
    }

    /// Stored ingredients, sorted and deduplicated
    pub fn list_ingredients(&self) -> ScanResult<Vec<String>> {
        let mut ingredients = self.store.list_triggers()?;
        ingredients.sort();
        ingredients.dedup();
        Ok(ingredients)
    }

    fn flag(&self, text: &str) -> ScanResult<Vec<String>> {
        let triggers = self.store.list_triggers()?;
        let text = cap_chars(text, self.max_text_chars);

        let found = self.matcher.find(text, &triggers);
        info!(
            "🚩 Flagged {} of {} trigger ingredients",
            found.len(),
            triggers.len()
        );
        Ok(found.into_iter().map(str::to_string).collect())
    }
}

/// Truncate `text` to at most `max` characters
fn cap_chars(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((idx, _)) => {
            warn!("✂️ Text truncated to {} characters before matching", max);
            &text[..idx]
        }
        None => text,
    }
}
