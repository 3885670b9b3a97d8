/// Book name resolution.
///
/// Maps user-typed or abbreviated book names onto the canonical names of a
/// loaded translation, trying exact, abbreviation and substring matching in
/// that order.
mod books;
mod resolver;

pub use books::{abbreviation_for, normalize_abbreviation, CANONICAL_BOOKS};
pub use resolver::{resolve_book_name, BookMatch, BookResolver, MatchTier};
