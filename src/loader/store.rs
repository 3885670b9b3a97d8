use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::OnceCell;
use tracing::{debug, info, warn};

use crate::errors::{Result, VerseKitError};
use crate::passage::{lookup, resolve_passage};
use crate::reference::parse_reference;
use crate::types::{ResolvedPassage, Translation, TranslationInfo};

use super::cache::{MemoryCache, TranslationCache};
use super::source::TranslationSource;

/// Outcome of one load attempt, shared by every caller that joined it.
type Attempt = std::result::Result<Arc<Translation>, Arc<VerseKitError>>;

/// Per-id load slot. Concurrent callers for the same id await the same cell.
type Slot = Arc<OnceCell<Attempt>>;

/// Result of comparing one translation in [`TranslationStore::compare`].
#[derive(Debug)]
pub struct ComparisonEntry {
    pub translation: String,
    pub outcome: Result<ResolvedPassage>,
}

/// Shared access to loaded translations.
///
/// At most one load per id is in flight at a time. Every caller that joins
/// an attempt receives its outcome: the same `Arc<Translation>`, or the same
/// error. A failed attempt is dropped once settled, so the next call retries.
pub struct TranslationStore {
    source: Arc<dyn TranslationSource>,
    cache: Arc<dyn TranslationCache>,
    slots: Mutex<HashMap<String, Slot>>,
    timeout: Option<Duration>,
}

impl TranslationStore {
    /// Creates a store over `source` with an in-memory cache and no timeout.
    pub fn new(source: Arc<dyn TranslationSource>) -> Self {
        Self {
            source,
            cache: Arc::new(MemoryCache::new()),
            slots: Mutex::new(HashMap::new()),
            timeout: None,
        }
    }

    /// Replaces the cache collaborator.
    pub fn with_cache(mut self, cache: Arc<dyn TranslationCache>) -> Self {
        self.cache = cache;
        self
    }

    /// Bounds each load; an expired load fails with `VerseKitError::Timeout`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Returns the translation for `id` (case-insensitive), loading it on
    /// first use.
    pub async fn get(&self, id: &str) -> Result<Arc<Translation>> {
        let id = id.trim().to_lowercase();

        if let Some(cached) = self.cache.get(&id) {
            debug!(%id, "translation cache hit");
            return Ok(cached);
        }

        let slot = {
            let mut slots = self.slots.lock().unwrap_or_else(|e| e.into_inner());
            slots.entry(id.clone()).or_default().clone()
        };

        if slot.initialized() {
            debug!(%id, "translation already loaded");
        } else {
            debug!(%id, "joining translation load");
        }

        let attempt = slot
            .get_or_init(|| async { self.load_uncached(&id).await.map_err(Arc::new) })
            .await;

        match attempt {
            Ok(translation) => Ok(Arc::clone(translation)),
            Err(err) => {
                self.forget_attempt(&id, &slot);
                Err(replay(&id, err))
            }
        }
    }

    /// Loads `reference` from translation `id` and resolves it.
    pub async fn lookup(&self, reference: &str, id: &str) -> Result<ResolvedPassage> {
        let translation = self.get(id).await?;
        Ok(lookup(reference, &translation))
    }

    /// Resolves `reference` in each of `ids`, in order. A translation that
    /// fails to load is recorded in its entry without affecting the others.
    pub async fn compare(&self, reference: &str, ids: &[String]) -> Result<Vec<ComparisonEntry>> {
        let locator = parse_reference(reference)?;

        let mut entries = Vec::with_capacity(ids.len());
        for id in ids {
            let outcome = match self.get(id).await {
                Ok(translation) => Ok(resolve_passage(&locator, &translation)),
                Err(e) => {
                    warn!(%id, error = %e, "translation unavailable for comparison");
                    Err(e)
                }
            };
            entries.push(ComparisonEntry {
                translation: id.trim().to_lowercase(),
                outcome,
            });
        }
        Ok(entries)
    }

    /// Translations the underlying source can provide.
    pub async fn available(&self) -> Result<Vec<TranslationInfo>> {
        self.source.available().await
    }

    /// Drops every loaded translation from the store and its cache.
    pub fn clear(&self) {
        let mut slots = self.slots.lock().unwrap_or_else(|e| e.into_inner());
        slots.clear();
        self.cache.clear();
        info!("translation store cleared");
    }

    /// Removes a settled failed attempt so the next call starts a fresh one.
    /// A newer slot for the same id is left alone.
    fn forget_attempt(&self, id: &str, slot: &Slot) {
        let mut slots = self.slots.lock().unwrap_or_else(|e| e.into_inner());
        if slots.get(id).is_some_and(|current| Arc::ptr_eq(current, slot)) {
            slots.remove(id);
        }
    }

    async fn load_uncached(&self, id: &str) -> Result<Arc<Translation>> {
        info!(%id, source = self.source.name(), "loading translation");

        let load = self.source.load(id);
        let result = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, load).await {
                Ok(r) => r,
                Err(_) => Err(VerseKitError::Timeout {
                    id: id.to_string(),
                    after_ms: limit.as_millis() as u64,
                }),
            },
            None => load.await,
        };

        match result {
            Ok(translation) => {
                let translation = Arc::new(translation);
                self.cache.set(id, Arc::clone(&translation));
                info!(
                    %id,
                    books = translation.books().len(),
                    "translation loaded"
                );
                Ok(translation)
            }
            Err(e) => {
                warn!(%id, error = %e, "translation load failed");
                Err(e)
            }
        }
    }
}

/// Rebuilds a shared load error for one of the callers that awaited it.
fn replay(id: &str, err: &VerseKitError) -> VerseKitError {
    match err {
        VerseKitError::TranslationLoad { id, message } => VerseKitError::TranslationLoad {
            id: id.clone(),
            message: message.clone(),
        },
        VerseKitError::Timeout { id, after_ms } => VerseKitError::Timeout {
            id: id.clone(),
            after_ms: *after_ms,
        },
        VerseKitError::UnknownTranslation { id } => {
            VerseKitError::UnknownTranslation { id: id.clone() }
        }
        VerseKitError::InvalidTranslationId { id } => {
            VerseKitError::InvalidTranslationId { id: id.clone() }
        }
        VerseKitError::Config { message } => VerseKitError::Config {
            message: message.clone(),
        },
        VerseKitError::Lookup(e) => VerseKitError::Lookup(e.clone()),
        VerseKitError::Io(_) | VerseKitError::Json(_) => VerseKitError::TranslationLoad {
            id: id.to_string(),
            message: err.to_string(),
        },
    }
}
