use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::types::Translation;

/// Keyed storage for loaded translations.
pub trait TranslationCache: Send + Sync {
    fn get(&self, id: &str) -> Option<Arc<Translation>>;
    fn set(&self, id: &str, translation: Arc<Translation>);
    fn clear(&self);
}

/// Process-local cache backed by a map.
#[derive(Default)]
pub struct MemoryCache {
    entries: RwLock<HashMap<String, Arc<Translation>>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl TranslationCache for MemoryCache {
    fn get(&self, id: &str) -> Option<Arc<Translation>> {
        self.entries.read().ok()?.get(id).cloned()
    }

    fn set(&self, id: &str, translation: Arc<Translation>) {
        if let Ok(mut entries) = self.entries.write() {
            entries.insert(id.to_string(), translation);
        }
    }

    fn clear(&self) {
        if let Ok(mut entries) = self.entries.write() {
            entries.clear();
        }
    }
}
