use crate::core::MatchThresholds;
use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    // Storage
    pub db_path: String,

    // Matching
    pub matching: MatchThresholds,
    /// OCR text longer than this is truncated before matching
    pub max_text_chars: usize,

    // OCR
    pub ocr: OcrConfig,

    // Meta
    pub log_level: String,
}

/// Text source settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    pub engine: String,
    pub binary: String,
    pub language: String,
    /// Tesseract page segmentation mode
    pub psm: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: dirs::data_dir()
                .unwrap_or_default()
                .join("allerlens/ingredients.db")
                .to_string_lossy()
                .to_string(),
            matching: MatchThresholds::default(),
            max_text_chars: 20_000,
            ocr: OcrConfig::default(),
            log_level: "info".to_string(),
        }
    }
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            engine: "tesseract".to_string(),
            binary: "tesseract".to_string(),
            language: "eng".to_string(),
            psm: 6,
        }
    }
}

impl Config {
    /// Load config from the default location, or create default
    pub fn load() -> Result<Self> {
        Self::load_from(&config_path())
    }

    /// Load config from `path`
    ///
    /// A missing file yields defaults. A file that fails to parse is moved
    /// aside to `*.json.corrupt` and defaults are used instead.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config = match serde_json::from_str::<Self>(&content) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("⚠️ Config file corrupted or invalid, using defaults: {}", e);
                let backup_path = path.with_extension("json.corrupt");
                let _ = std::fs::rename(path, &backup_path);
                return Ok(Self::default());
            }
        };

        config.validate()?;
        Ok(config)
    }

    /// Save config to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&config_path())
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Reject thresholds outside `[0, 1]`
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("multi_word", self.matching.multi_word),
            ("single_word", self.matching.single_word),
        ] {
            if !(0.0..=1.0).contains(&value) {
                bail!("matching.{} must be within [0, 1], got {}", name, value);
            }
        }
        if self.max_text_chars == 0 {
            bail!("max_text_chars must be greater than zero");
        }
        Ok(())
    }
}

pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("allerlens")
        .join("config.json")
}
