pub mod config;
/// Cross references between passages, keyed by canonical reference.
pub mod crossref;
pub mod errors;
/// Text and JSON rendering for passages and search hits.
pub mod format;
pub mod loader;
/// Passage resolution: turning a [`Locator`] and a loaded [`Translation`]
/// into verse text.
///
/// Everything here is synchronous and pure. Failures are reported through
/// [`ResolvedPassage::error`] so callers branch on a single shape.
pub mod passage;
pub mod reference;
pub mod resolution;
/// Word search over a single translation.
pub mod search;
pub mod types;

pub use errors::{LookupError, ParseError, Result, VerseKitError};
pub use passage::{lookup, resolve_passage};
pub use reference::parse_reference;
pub use resolution::resolve_book_name;
pub use types::{Locator, ResolvedPassage, Translation};
