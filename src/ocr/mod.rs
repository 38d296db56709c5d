//! OCR (text extraction) Module
//!
//! Turns label images into best-effort text. Backends:
//! - Tesseract: local `tesseract` binary fed through stdin

pub mod tesseract;

use crate::config::OcrConfig;
use crate::error::{ScanError, ScanResult};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

pub use tesseract::TesseractSource;

/// Why a single image produced no text
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("image is empty")]
    EmptyImage,

    #[error("frame is not valid base64: {0}")]
    Decode(String),

    #[error("failed to start OCR engine: {0}")]
    Spawn(String),

    #[error("OCR engine exited with {status}: {stderr}")]
    Engine { status: String, stderr: String },

    #[error("extraction task failed: {0}")]
    Task(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Trait for OCR engines
pub trait TextSource: Send + Sync {
    /// Extract printed text from encoded image bytes
    fn extract_text(&self, image: &[u8]) -> Result<String, ExtractError>;

    /// Get the engine name
    fn name(&self) -> &str;
}

/// Extract text, degrading any failure to an empty string
pub fn extract_or_empty(source: &dyn TextSource, image: &[u8]) -> String {
    match source.extract_text(image) {
        Ok(text) => text,
        Err(e) => {
            warn!("⚠️ {} failed to extract text: {}", source.name(), e);
            String::new()
        }
    }
}

/// Decode a base64 frame from a live scan
///
/// Data URLs (`data:image/png;base64,...`) are accepted; everything up to the
/// last comma is dropped.
pub fn decode_frame(frame: &str) -> Result<Vec<u8>, ExtractError> {
    let payload = frame.rsplit(',').next().unwrap_or(frame).trim();
    STANDARD
        .decode(payload)
        .map_err(|e| ExtractError::Decode(e.to_string()))
}

/// Factory to create the configured text source
pub fn create_source(config: &OcrConfig) -> ScanResult<Arc<dyn TextSource>> {
    let source: Arc<dyn TextSource> = match config.engine.as_str() {
        "tesseract" => {
            info!(
                "  - Using Tesseract OCR (binary: {}, language: {})",
                config.binary, config.language
            );
            Arc::new(TesseractSource::new(config))
        }
        other => {
            return Err(ScanError::Config(format!("unknown OCR engine '{}'", other)));
        }
    };
    info!("✅ OCR engine '{}' initialized", source.name());
    Ok(source)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingSource;

    impl TextSource for FailingSource {
        fn extract_text(&self, _image: &[u8]) -> Result<String, ExtractError> {
            Err(ExtractError::Spawn("not installed".to_string()))
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    #[test]
    fn test_extract_or_empty_swallows_errors() {
        assert_eq!(extract_or_empty(&FailingSource, b"png"), "");
    }

    #[test]
    fn test_decode_frame_plain_and_data_url() {
        assert_eq!(decode_frame("aGVsbG8=").expect("plain"), b"hello");
        assert_eq!(
            decode_frame("data:image/jpeg;base64,aGVsbG8=").expect("data url"),
            b"hello"
        );
    }

    #[test]
    fn test_decode_frame_rejects_garbage() {
        assert!(matches!(
            decode_frame("data:image/png;base64,@@not base64@@"),
            Err(ExtractError::Decode(_))
        ));
    }

    #[test]
    fn test_unknown_engine_rejected() {
        let config = OcrConfig {
            engine: "easyocr".to_string(),
            ..OcrConfig::default()
        };
        assert!(matches!(create_source(&config), Err(ScanError::Config(_))));
    }
}
