/// Loading boundary.
///
/// Translations come from a [`TranslationSource`] (JSON files on disk or a
/// remote JSON endpoint), are normalized into [`Translation`](crate::types::Translation)
/// values, and are shared read-only through a [`TranslationStore`] that
/// coalesces concurrent loads of the same id.
mod cache;
mod source;
mod store;

use std::sync::Arc;

pub use cache::{MemoryCache, TranslationCache};
pub use source::{HttpJsonSource, JsonFileSource, TranslationSource};
pub use store::{ComparisonEntry, TranslationStore};

use crate::config::VerseKitConfig;

/// Picks the content source described by `config`: the remote endpoint when
/// `remote_url` is set, otherwise the JSON files under `data_dir`.
pub fn source_from_config(config: &VerseKitConfig) -> Arc<dyn TranslationSource> {
    match &config.remote_url {
        Some(url) => Arc::new(HttpJsonSource::new(url)),
        None => Arc::new(JsonFileSource::new(&config.data_dir)),
    }
}
