use serde::Serialize;
use thiserror::Error;

/// Reasons a reference string cannot be decomposed into a locator.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
pub enum ParseError {
    #[error("empty reference")]
    Empty,

    #[error("missing book name")]
    MissingBook,

    #[error("missing chapter")]
    MissingChapter,

    #[error("invalid number")]
    InvalidNumber,

    #[error("invalid range: start > end")]
    InvertedRange,

    #[error("unexpected trailing input \"{0}\"")]
    TrailingInput(String),
}

/// Why a lookup produced no verses.
///
/// These are value errors: `resolve_passage` records them in
/// `ResolvedPassage::error` instead of returning them.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
pub enum LookupError {
    #[error("{0}")]
    Parse(#[from] ParseError),

    #[error("Book \"{token}\" not found")]
    BookNotFound { token: String },

    #[error("chapter {chapter} not found in {book}")]
    ChapterNotFound { book: String, chapter: u32 },

    #[error("verse {verse} not found in {book} {chapter}")]
    VerseNotFound {
        book: String,
        chapter: u32,
        verse: u32,
    },

    #[error("no verses found")]
    NoVerses,
}

/// Errors raised at the I/O boundary: loading translations and config.
#[derive(Error, Debug)]
pub enum VerseKitError {
    #[error("failed to load translation '{id}': {message}")]
    TranslationLoad { id: String, message: String },

    #[error("loading translation '{id}' timed out after {after_ms}ms")]
    Timeout { id: String, after_ms: u64 },

    #[error("unknown translation '{id}'")]
    UnknownTranslation { id: String },

    #[error("invalid translation id '{id}'")]
    InvalidTranslationId { id: String },

    #[error("config error: {message}")]
    Config { message: String },

    #[error("{0}")]
    Lookup(#[from] LookupError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<ParseError> for VerseKitError {
    fn from(err: ParseError) -> Self {
        VerseKitError::Lookup(LookupError::Parse(err))
    }
}

impl VerseKitError {
    /// Returns `true` for failures a caller may reasonably retry.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            VerseKitError::TranslationLoad { .. } | VerseKitError::Timeout { .. }
        )
    }
}

/// Convenience alias for results using `VerseKitError`.
pub type Result<T> = std::result::Result<T, VerseKitError>;
