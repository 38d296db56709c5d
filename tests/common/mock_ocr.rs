//! Mock OCR Engine for Testing
//!
//! Maps image bytes to canned text so scans are deterministic.

use allerlens::ocr::{ExtractError, TextSource};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Mock text source that returns predetermined text per image
pub struct MockOcr {
    /// Text to return for each image payload
    pub pages: HashMap<Vec<u8>, String>,
    /// Record every image received (for verification)
    pub received: Arc<Mutex<Vec<Vec<u8>>>>,
}

impl MockOcr {
    pub fn new() -> Self {
        Self {
            pages: HashMap::new(),
            received: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Register the text printed on `image`
    pub fn with_page(mut self, image: &[u8], text: &str) -> Self {
        self.pages.insert(image.to_vec(), text.to_string());
        self
    }
}

impl TextSource for MockOcr {
    fn extract_text(&self, image: &[u8]) -> Result<String, ExtractError> {
        if let Ok(mut received) = self.received.lock() {
            received.push(image.to_vec());
        }

        if image.is_empty() {
            return Err(ExtractError::EmptyImage);
        }

        // Unknown images behave like a crashed engine
        self.pages
            .get(image)
            .cloned()
            .ok_or_else(|| ExtractError::Engine {
                status: "exit status: 1".to_string(),
                stderr: "unreadable image".to_string(),
            })
    }

    fn name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_ocr_returns_pages() {
        let mock = MockOcr::new().with_page(b"img", "contains milk");
        assert_eq!(mock.extract_text(b"img").unwrap(), "contains milk");
        assert!(mock.extract_text(b"other").is_err());
        assert_eq!(mock.received.lock().unwrap().len(), 2);
    }
}
