//! In-memory ingredient store for testing

use allerlens::error::ScanResult;
use allerlens::store::IngredientStore;
use std::sync::Mutex;

#[derive(Default)]
pub struct MemoryStore {
    ingredients: Mutex<Vec<String>>,
}

impl MemoryStore {
    pub fn with(ingredients: &[&str]) -> Self {
        Self {
            ingredients: Mutex::new(ingredients.iter().map(|s| s.to_string()).collect()),
        }
    }
}

impl IngredientStore for MemoryStore {
    fn list_triggers(&self) -> ScanResult<Vec<String>> {
        Ok(self.ingredients.lock()?.clone())
    }

    fn add_trigger(&self, name: &str) -> ScanResult<bool> {
        let mut ingredients = self.ingredients.lock()?;
        if ingredients.iter().any(|existing| existing == name) {
            return Ok(false);
        }
        ingredients.push(name.to_string());
        Ok(true)
    }
}
