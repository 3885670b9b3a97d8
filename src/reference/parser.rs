use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

use crate::errors::ParseError;
use crate::types::Locator;

/// Optional leading digit ("1 John"), then one or more whitespace-separated
/// words. Stops before the chapter number.
static BOOK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:\d\s*)?\p{L}+(?:\s+\p{L}+)*").expect("valid book pattern"));

/// `chapter`, `chapter:verse` or `chapter:verse-verse`, directly after the
/// book. Accepts an en dash and stray spaces around the separators.
static CHAPTER_VERSE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(\d+)(?:\s*:\s*(\d+)(?:\s*[-\u{2013}]\s*(\d+))?)?").expect("valid chapter pattern")
});

/// Parses a human-readable reference into a [`Locator`].
///
/// Accepted forms: `"Genesis 1"`, `"John 3:16"`, `"John 3:16-18"`, with
/// multi-word books (`"Song of Solomon 2:1"`) and numbered books
/// (`"1 Corinthians 13"`). Surrounding and repeated whitespace is ignored.
///
/// An unparsable or zero chapter is an error; it never defaults to 1.
/// Anything left after the chapter/verse part (`"Genesis 1-3"`,
/// `"John 3:16,18"`) is rejected rather than dropped.
pub fn parse_reference(input: &str) -> Result<Locator, ParseError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ParseError::Empty);
    }

    let book_match = BOOK_RE.find(input).ok_or(ParseError::MissingBook)?;
    let book = normalize_whitespace(book_match.as_str());

    let rest = &input[book_match.end()..];
    let caps = CHAPTER_VERSE_RE
        .captures(rest)
        .ok_or(ParseError::MissingChapter)?;

    let trailing = rest[caps.get(0).map_or(0, |m| m.end())..].trim();
    if !trailing.is_empty() {
        return Err(ParseError::TrailingInput(trailing.to_string()));
    }

    let chapter = parse_number(&caps[1])?;
    let verse_start = caps.get(2).map(|m| parse_number(m.as_str())).transpose()?;
    let verse_end = caps.get(3).map(|m| parse_number(m.as_str())).transpose()?;

    if let (Some(start), Some(end)) = (verse_start, verse_end) {
        if end < start {
            return Err(ParseError::InvertedRange);
        }
    }

    let locator = Locator {
        book,
        chapter,
        verse_start,
        verse_end,
    };
    trace!(input, %locator, "parsed reference");
    Ok(locator)
}

/// Parses a positive integer; zero and overflow are rejected.
fn parse_number(digits: &str) -> Result<u32, ParseError> {
    match digits.parse::<u32>() {
        Ok(0) | Err(_) => Err(ParseError::InvalidNumber),
        Ok(n) => Ok(n),
    }
}

/// Collapses internal whitespace runs to single spaces.
fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
