use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{LookupError, Result, VerseKitError};

/// A single verse of text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verse {
    pub number: u32,
    pub text: String,
}

/// A chapter: its number and verses in ascending verse order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chapter {
    pub number: u32,
    pub verses: Vec<Verse>,
}

impl Chapter {
    /// Looks up a verse by number. Verse numbers may have gaps.
    pub fn verse(&self, number: u32) -> Option<&Verse> {
        self.verses
            .binary_search_by_key(&number, |v| v.number)
            .ok()
            .map(|idx| &self.verses[idx])
    }
}

/// A book of a translation, identified by its canonical name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub name: String,
    pub chapters: Vec<Chapter>,
}

impl Book {
    /// Looks up a chapter by number.
    pub fn chapter(&self, number: u32) -> Option<&Chapter> {
        self.chapters
            .binary_search_by_key(&number, |c| c.number)
            .ok()
            .map(|idx| &self.chapters[idx])
    }
}

/// An immutable, loaded edition of Scripture.
///
/// Construct through [`Translation::new`] or [`Translation::from_document`];
/// both sort chapters and verses and reject duplicate or zero numbers, so
/// lookups may rely on ordered, unique keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Translation {
    id: String,
    display_name: String,
    books: Vec<Book>,
}

impl Translation {
    /// Builds a translation from already-structured books.
    pub fn new(id: &str, display_name: &str, mut books: Vec<Book>) -> Result<Self> {
        let id = id.to_lowercase();
        let malformed = |message: String| VerseKitError::TranslationLoad {
            id: id.clone(),
            message: format!("malformed data: {}", message),
        };

        let mut seen_books = HashSet::new();
        for book in &mut books {
            if !seen_books.insert(book.name.clone()) {
                return Err(malformed(format!("duplicate book '{}'", book.name)));
            }

            book.chapters.sort_by_key(|c| c.number);
            let mut prev_chapter = 0;
            for chapter in &mut book.chapters {
                if chapter.number == 0 || chapter.number == prev_chapter {
                    return Err(malformed(format!(
                        "invalid or duplicate chapter {} in {}",
                        chapter.number, book.name
                    )));
                }
                prev_chapter = chapter.number;

                chapter.verses.sort_by_key(|v| v.number);
                let mut prev_verse = 0;
                for verse in &chapter.verses {
                    if verse.number == 0 || verse.number == prev_verse {
                        return Err(malformed(format!(
                            "invalid or duplicate verse {} in {} {}",
                            verse.number, book.name, chapter.number
                        )));
                    }
                    prev_verse = verse.number;
                }
            }
        }

        Ok(Self {
            display_name: display_name.to_string(),
            id,
            books,
        })
    }

    /// Normalizes a deserialized JSON document into a translation.
    pub fn from_document(id: &str, doc: TranslationDocument) -> Result<Self> {
        let books = doc
            .books
            .into_iter()
            .map(|b| Book {
                name: b.name,
                chapters: b
                    .chapters
                    .into_iter()
                    .map(|c| Chapter {
                        number: c.chapter,
                        verses: c
                            .verses
                            .into_iter()
                            .map(|v| Verse {
                                number: v.verse,
                                text: v.text,
                            })
                            .collect(),
                    })
                    .collect(),
            })
            .collect();

        let display_name = doc.translation.unwrap_or_else(|| id.to_uppercase());
        Self::new(id, &display_name, books)
    }

    /// Short lowercase code, e.g. `kjv`.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn books(&self) -> &[Book] {
        &self.books
    }

    /// Canonical book names in canonical order.
    pub fn book_names(&self) -> Vec<&str> {
        self.books.iter().map(|b| b.name.as_str()).collect()
    }

    /// Finds a book by exact canonical name.
    pub fn book(&self, name: &str) -> Option<&Book> {
        self.books.iter().find(|b| b.name == name)
    }

    /// Position of a book in canonical order.
    pub fn book_index(&self, name: &str) -> Option<usize> {
        self.books.iter().position(|b| b.name == name)
    }

    /// Summary used by listings.
    pub fn info(&self) -> TranslationInfo {
        TranslationInfo {
            id: self.id.clone(),
            display_name: self.display_name.clone(),
        }
    }
}

/// Identifier and display name of an available translation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationInfo {
    pub id: String,
    pub display_name: String,
}

// ---------------------------------------------------------------------------
// Serialized translation document
// ---------------------------------------------------------------------------

/// On-disk / over-the-wire shape of a translation.
#[derive(Debug, Clone, Deserialize)]
pub struct TranslationDocument {
    #[serde(default)]
    pub translation: Option<String>,
    pub books: Vec<DocumentBook>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DocumentBook {
    pub name: String,
    pub chapters: Vec<DocumentChapter>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DocumentChapter {
    pub chapter: u32,
    pub verses: Vec<DocumentVerse>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DocumentVerse {
    pub verse: u32,
    pub text: String,
}

// ---------------------------------------------------------------------------
// Lookup values
// ---------------------------------------------------------------------------

/// Structured form of a reference, produced by the parser.
///
/// `book` is the token as typed; it is canonicalized during resolution.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Locator {
    pub book: String,
    pub chapter: u32,
    pub verse_start: Option<u32>,
    pub verse_end: Option<u32>,
}

impl Locator {
    /// Formats the locator with a substitute book name.
    pub fn with_book(&self, book: &str) -> String {
        let mut out = format!("{} {}", book, self.chapter);
        if let Some(start) = self.verse_start {
            out.push_str(&format!(":{}", start));
            if let Some(end) = self.verse_end {
                out.push_str(&format!("-{}", end));
            }
        }
        out
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.with_book(&self.book))
    }
}

/// One verse of a resolved passage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PassageVerse {
    pub book: String,
    pub chapter: u32,
    pub verse: u32,
    pub text: String,
}

/// Result of resolving a locator against a translation.
///
/// Always returned, never raised: when nothing resolves `verses` is empty
/// and `error` says why.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedPassage {
    pub reference: String,
    pub verses: Vec<PassageVerse>,
    pub error: Option<LookupError>,
}

impl ResolvedPassage {
    pub(crate) fn failed(reference: String, error: LookupError) -> Self {
        Self {
            reference,
            verses: Vec::new(),
            error: Some(error),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}
