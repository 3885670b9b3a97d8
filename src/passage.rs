use std::sync::Arc;

use tracing::debug;

use crate::errors::LookupError;
use crate::reference::parse_reference;
use crate::resolution::BookResolver;
use crate::types::*;

/// Resolves a locator against a translation.
///
/// - No verse: the whole chapter, in verse order.
/// - Single verse: that verse, or `VerseNotFound`.
/// - Range: every verse in `[start, end]` that exists; gaps are skipped.
///
/// An empty result carries `LookupError::NoVerses`.
pub fn resolve_passage(locator: &Locator, translation: &Translation) -> ResolvedPassage {
    let resolver = BookResolver::for_translation(translation);
    let book_name = match resolver.resolve(&locator.book) {
        Ok(name) => name,
        Err(err) => return ResolvedPassage::failed(locator.to_string(), err),
    };

    let reference = locator.with_book(book_name);
    let Some(book) = translation.book(book_name) else {
        return ResolvedPassage::failed(
            reference,
            LookupError::BookNotFound {
                token: locator.book.clone(),
            },
        );
    };

    let Some(chapter) = book.chapter(locator.chapter) else {
        return ResolvedPassage::failed(
            reference,
            LookupError::ChapterNotFound {
                book: book.name.clone(),
                chapter: locator.chapter,
            },
        );
    };

    let verses: Vec<&Verse> = match (locator.verse_start, locator.verse_end) {
        (None, _) => chapter.verses.iter().collect(),
        (Some(number), None) => match chapter.verse(number) {
            Some(v) => vec![v],
            None => {
                return ResolvedPassage::failed(
                    reference,
                    LookupError::VerseNotFound {
                        book: book.name.clone(),
                        chapter: chapter.number,
                        verse: number,
                    },
                )
            }
        },
        (Some(start), Some(end)) => chapter
            .verses
            .iter()
            .filter(|v| v.number >= start && v.number <= end)
            .collect(),
    };

    if verses.is_empty() {
        return ResolvedPassage::failed(reference, LookupError::NoVerses);
    }

    debug!(%reference, count = verses.len(), translation = translation.id(), "resolved passage");

    ResolvedPassage {
        reference,
        verses: verses
            .into_iter()
            .map(|v| PassageVerse {
                book: book.name.clone(),
                chapter: chapter.number,
                verse: v.number,
                text: v.text.clone(),
            })
            .collect(),
        error: None,
    }
}

/// Parses `reference` and resolves it. A parse failure is recorded in the
/// returned passage rather than returned as an error.
pub fn lookup(reference: &str, translation: &Translation) -> ResolvedPassage {
    match parse_reference(reference) {
        Ok(locator) => resolve_passage(&locator, translation),
        Err(err) => ResolvedPassage::failed(reference.trim().to_string(), err.into()),
    }
}

/// Chapter numbers of the book matching `book_token`, ascending.
pub fn chapter_numbers(translation: &Translation, book_token: &str) -> Result<Vec<u32>, LookupError> {
    let name = BookResolver::for_translation(translation).resolve(book_token)?;
    Ok(translation
        .book(name)
        .map(|b| b.chapters.iter().map(|c| c.number).collect())
        .unwrap_or_default())
}

// ---------------------------------------------------------------------------
// Navigation
// ---------------------------------------------------------------------------

/// A book/chapter position in a translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterPosition {
    pub book: String,
    pub chapter: u32,
}

/// The chapter after `chapter` of `book`, moving into the next book at the
/// end of a book. `None` past the last chapter of the last book or when
/// the position does not exist.
pub fn next_chapter(translation: &Translation, book: &str, chapter: u32) -> Option<ChapterPosition> {
    let (book_idx, chapter_idx) = locate(translation, book, chapter)?;
    let books = translation.books();
    let current = &books[book_idx];

    if let Some(next) = current.chapters.get(chapter_idx + 1) {
        return Some(ChapterPosition {
            book: current.name.clone(),
            chapter: next.number,
        });
    }

    books[book_idx + 1..]
        .iter()
        .find_map(|b| b.chapters.first().map(|c| (b, c)))
        .map(|(b, c)| ChapterPosition {
            book: b.name.clone(),
            chapter: c.number,
        })
}

/// The chapter before `chapter` of `book`, moving to the last chapter of
/// the previous book at the start of a book.
pub fn previous_chapter(
    translation: &Translation,
    book: &str,
    chapter: u32,
) -> Option<ChapterPosition> {
    let (book_idx, chapter_idx) = locate(translation, book, chapter)?;
    let books = translation.books();
    let current = &books[book_idx];

    if chapter_idx > 0 {
        return Some(ChapterPosition {
            book: current.name.clone(),
            chapter: current.chapters[chapter_idx - 1].number,
        });
    }

    books[..book_idx]
        .iter()
        .rev()
        .find_map(|b| b.chapters.last().map(|c| (b, c)))
        .map(|(b, c)| ChapterPosition {
            book: b.name.clone(),
            chapter: c.number,
        })
}

fn locate(translation: &Translation, book: &str, chapter: u32) -> Option<(usize, usize)> {
    let name = BookResolver::for_translation(translation).resolve(book).ok()?;
    let book_idx = translation.book_index(name)?;
    let chapter_idx = translation.books()[book_idx]
        .chapters
        .binary_search_by_key(&chapter, |c| c.number)
        .ok()?;
    Some((book_idx, chapter_idx))
}

// ---------------------------------------------------------------------------
// Comparison
// ---------------------------------------------------------------------------

/// One translation's rendering of a compared passage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComparedPassage {
    pub translation: String,
    pub passage: ResolvedPassage,
}

/// Resolves the same locator in each translation, preserving input order.
pub fn compare_passage(locator: &Locator, translations: &[Arc<Translation>]) -> Vec<ComparedPassage> {
    translations
        .iter()
        .map(|t| ComparedPassage {
            translation: t.id().to_string(),
            passage: resolve_passage(locator, t),
        })
        .collect()
}
