//! Tesseract OCR backend calling a local binary

use super::{ExtractError, TextSource};
use crate::config::OcrConfig;
use std::io::Write;
use std::process::{Command, Stdio};
use tracing::{debug, error};

#[derive(Debug, Clone)]
pub struct TesseractSource {
    binary: String,
    language: String,
    psm: u8,
}

impl TesseractSource {
    pub fn new(config: &OcrConfig) -> Self {
        Self {
            binary: config.binary.clone(),
            language: config.language.clone(),
            psm: config.psm,
        }
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.binary);
        cmd.arg("stdin")
            .arg("stdout")
            .arg("-l")
            .arg(&self.language)
            .arg("--psm")
            .arg(self.psm.to_string());
        cmd
    }
}

impl TextSource for TesseractSource {
    fn extract_text(&self, image: &[u8]) -> Result<String, ExtractError> {
        if image.is_empty() {
            return Err(ExtractError::EmptyImage);
        }

        debug!("🔍 Running {} on {} byte image", self.binary, image.len());

        let mut child = self
            .command()
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                error!("❌ Failed to spawn {}: {}", self.binary, e);
                ExtractError::Spawn(e.to_string())
            })?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(image)?;
            stdin.flush()?;
        }

        let output = child.wait_with_output()?;
        if !output.status.success() {
            return Err(ExtractError::Engine {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let text = String::from_utf8_lossy(&output.stdout).trim().to_string();
        debug!("📝 Extracted {} characters", text.len());
        Ok(text)
    }

    fn name(&self) -> &str {
        "tesseract"
    }
}
