use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;
use walkdir::WalkDir;

use crate::errors::{Result, VerseKitError};
use crate::types::{Translation, TranslationDocument, TranslationInfo};

/// Where translations come from.
///
/// Implementations adapt their raw format to the normalized
/// [`Translation`] shape; callers never see source-specific payloads.
#[async_trait]
pub trait TranslationSource: Send + Sync {
    /// Short name used in logs, e.g. `"json-file"`.
    fn name(&self) -> &'static str;

    /// Loads one translation by id (lowercase, e.g. `kjv`).
    async fn load(&self, id: &str) -> Result<Translation>;

    /// Lists the translations this source can provide.
    async fn available(&self) -> Result<Vec<TranslationInfo>>;
}

// ---------------------------------------------------------------------------
// JSON files
// ---------------------------------------------------------------------------

/// Reads `<dir>/<id>.json` documents.
pub struct JsonFileSource {
    dir: PathBuf,
}

impl JsonFileSource {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// Path of the document for `id`.
    pub fn path_for(&self, id: &str) -> Result<PathBuf> {
        check_id(id)?;
        Ok(self.dir.join(format!("{}.json", id.to_lowercase())))
    }
}

/// Rejects ids that would escape the source's directory or URL prefix.
fn check_id(id: &str) -> Result<()> {
    if id.is_empty() || id.contains(['/', '\\']) || id.contains("..") {
        return Err(VerseKitError::InvalidTranslationId { id: id.to_string() });
    }
    Ok(())
}

#[async_trait]
impl TranslationSource for JsonFileSource {
    fn name(&self) -> &'static str {
        "json-file"
    }

    async fn load(&self, id: &str) -> Result<Translation> {
        let path = self.path_for(id)?;
        debug!(path = %path.display(), "reading translation file");

        let contents = match tokio::fs::read_to_string(&path).await {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(VerseKitError::UnknownTranslation { id: id.to_string() })
            }
            Err(e) => {
                return Err(VerseKitError::TranslationLoad {
                    id: id.to_string(),
                    message: format!("failed to read '{}': {}", path.display(), e),
                })
            }
        };

        let doc: TranslationDocument =
            serde_json::from_str(&contents).map_err(|e| VerseKitError::TranslationLoad {
                id: id.to_string(),
                message: format!("failed to parse '{}': {}", path.display(), e),
            })?;

        Translation::from_document(id, doc)
    }

    async fn available(&self) -> Result<Vec<TranslationInfo>> {
        let dir = self.dir.clone();
        let infos = tokio::task::spawn_blocking(move || scan_json_files(&dir))
            .await
            .map_err(|e| VerseKitError::Io(std::io::Error::other(e)))?;
        Ok(infos)
    }
}

/// Lists `*.json` files directly under `dir`, sorted by id.
fn scan_json_files(dir: &Path) -> Vec<TranslationInfo> {
    let mut infos: Vec<TranslationInfo> = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| {
            let path = entry.path();
            if path.extension()? != "json" {
                return None;
            }
            let id = path.file_stem()?.to_string_lossy().to_lowercase();
            Some(TranslationInfo {
                display_name: id.to_uppercase(),
                id,
            })
        })
        .collect();
    infos.sort_by(|a, b| a.id.cmp(&b.id));
    infos
}

// ---------------------------------------------------------------------------
// Remote JSON
// ---------------------------------------------------------------------------

/// Fetches `<base_url>/<id>.json` documents over HTTP.
///
/// `available()` reads `<base_url>/translations.json`, a JSON array of
/// `{ "id", "display_name" }` objects.
pub struct HttpJsonSource {
    base_url: String,
}

impl HttpJsonSource {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn url_for(&self, id: &str) -> Result<String> {
        check_id(id)?;
        Ok(format!("{}/{}.json", self.base_url, id.to_lowercase()))
    }

    fn index_url(&self) -> String {
        format!("{}/translations.json", self.base_url)
    }
}

#[async_trait]
impl TranslationSource for HttpJsonSource {
    fn name(&self) -> &'static str {
        "http-json"
    }

    async fn load(&self, id: &str) -> Result<Translation> {
        let url = self.url_for(id)?;
        debug!(%url, "fetching translation");

        let doc = match fetch_json::<TranslationDocument>(url).await {
            Ok(doc) => doc,
            Err(FetchError::NotFound(_)) => {
                return Err(VerseKitError::UnknownTranslation { id: id.to_string() })
            }
            Err(FetchError::Failed(message)) => {
                return Err(VerseKitError::TranslationLoad {
                    id: id.to_string(),
                    message,
                })
            }
        };

        Translation::from_document(id, doc)
    }

    async fn available(&self) -> Result<Vec<TranslationInfo>> {
        let url = self.index_url();
        debug!(%url, "fetching translation index");

        fetch_json::<Vec<TranslationInfo>>(url).await.map_err(|e| {
            let message = match e {
                FetchError::NotFound(url) => format!("no translation index at '{}'", url),
                FetchError::Failed(message) => message,
            };
            VerseKitError::TranslationLoad {
                id: "index".to_string(),
                message,
            }
        })
    }
}

/// Why a remote document could not be fetched.
enum FetchError {
    /// The server answered 404 for this URL.
    NotFound(String),
    /// Any other transport, status or decoding failure.
    Failed(String),
}

/// GET `url` on a blocking task and decode the JSON body.
async fn fetch_json<T>(url: String) -> std::result::Result<T, FetchError>
where
    T: serde::de::DeserializeOwned + Send + 'static,
{
    tokio::task::spawn_blocking(move || {
        let mut response = match ureq::get(&url).call() {
            Ok(r) => r,
            Err(ureq::Error::StatusCode(404)) => return Err(FetchError::NotFound(url)),
            Err(e) => {
                return Err(FetchError::Failed(format!(
                    "request to '{}' failed: {}",
                    url, e
                )))
            }
        };

        response.body_mut().read_json::<T>().map_err(|e| {
            FetchError::Failed(format!("malformed response from '{}': {}", url, e))
        })
    })
    .await
    .map_err(|e| FetchError::Failed(format!("fetch task failed: {}", e)))?
}
