//! AllerLens Library
//!
//! Flags allergy trigger ingredients in text read from food labels,
//! tolerating OCR noise.

pub mod config;
pub mod core;
pub mod error;
pub mod ocr;
pub mod scanner;
pub mod store;
pub mod utils;

pub use crate::core::{find_triggers, normalize, IngredientMatcher, MatchThresholds};
pub use crate::error::{ScanError, ScanResult};
pub use crate::scanner::{FramesReport, ScanReport, Scanner};
