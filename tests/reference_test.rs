use proptest::prelude::*;

use versekit::errors::ParseError;
use versekit::reference::parse_reference;
use versekit::types::Locator;

fn locator(book: &str, chapter: u32, start: Option<u32>, end: Option<u32>) -> Locator {
    Locator {
        book: book.to_string(),
        chapter,
        verse_start: start,
        verse_end: end,
    }
}

#[test]
fn test_parse_single_verse() {
    assert_eq!(
        parse_reference("John 3:16").unwrap(),
        locator("John", 3, Some(16), None)
    );
}

#[test]
fn test_parse_verse_range() {
    assert_eq!(
        parse_reference("John 3:16-21").unwrap(),
        locator("John", 3, Some(16), Some(21))
    );
}

#[test]
fn test_parse_chapter_only() {
    assert_eq!(
        parse_reference("Genesis 1").unwrap(),
        locator("Genesis", 1, None, None)
    );
}

#[test]
fn test_parse_multi_word_book() {
    assert_eq!(
        parse_reference("Song of Solomon 2:1").unwrap(),
        locator("Song of Solomon", 2, Some(1), None)
    );
}

#[test]
fn test_parse_numbered_book_keeps_digit() {
    let loc = parse_reference("1 Corinthians 13").unwrap();
    assert_eq!(loc.book, "1 Corinthians");
    assert_eq!(loc.chapter, 13);

    let loc = parse_reference("2 Samuel 7:12-16").unwrap();
    assert_eq!(loc, locator("2 Samuel", 7, Some(12), Some(16)));
}

#[test]
fn test_parse_trims_whitespace() {
    assert_eq!(
        parse_reference("  psalm 23  ").unwrap(),
        locator("psalm", 23, None, None)
    );
    assert_eq!(
        parse_reference("John 3 : 16").unwrap(),
        locator("John", 3, Some(16), None)
    );
}

#[test]
fn test_parse_single_verse_range_is_kept() {
    assert_eq!(
        parse_reference("John 3:16-16").unwrap(),
        locator("John", 3, Some(16), Some(16))
    );
}

#[test]
fn test_parse_inverted_range_fails() {
    assert_eq!(
        parse_reference("John 3:20-16"),
        Err(ParseError::InvertedRange)
    );
}

#[test]
fn test_parse_empty_fails() {
    assert_eq!(parse_reference(""), Err(ParseError::Empty));
    assert_eq!(parse_reference("   \t"), Err(ParseError::Empty));
}

#[test]
fn test_parse_number_only_fails() {
    assert_eq!(parse_reference("42"), Err(ParseError::MissingBook));
    assert_eq!(parse_reference("3:16"), Err(ParseError::MissingBook));
}

#[test]
fn test_parse_book_without_chapter_fails() {
    assert_eq!(parse_reference("John"), Err(ParseError::MissingChapter));
    assert_eq!(
        parse_reference("Song of Solomon"),
        Err(ParseError::MissingChapter)
    );
}

#[test]
fn test_parse_rejects_trailing_input() {
    assert_eq!(
        parse_reference("Genesis 1-3"),
        Err(ParseError::TrailingInput("-3".to_string()))
    );
    assert_eq!(
        parse_reference("John 3:16,18"),
        Err(ParseError::TrailingInput(",18".to_string()))
    );
    assert_eq!(
        parse_reference("John 3:16 KJV"),
        Err(ParseError::TrailingInput("KJV".to_string()))
    );
    assert_eq!(parse_reference("John: 3"), Err(ParseError::MissingChapter));
}

#[test]
fn test_parse_error_messages() {
    assert_eq!(ParseError::Empty.to_string(), "empty reference");
    assert_eq!(ParseError::MissingChapter.to_string(), "missing chapter");
    assert_eq!(ParseError::InvalidNumber.to_string(), "invalid number");
    assert_eq!(
        ParseError::InvertedRange.to_string(),
        "invalid range: start > end"
    );
    assert_eq!(
        ParseError::TrailingInput(",18".to_string()).to_string(),
        "unexpected trailing input \",18\""
    );
}

#[test]
fn test_locator_display() {
    assert_eq!(
        locator("Psalms", 23, None, None).to_string(),
        "Psalms 23"
    );
    assert_eq!(
        locator("John", 3, Some(16), Some(18)).to_string(),
        "John 3:16-18"
    );
}

proptest! {
    #[test]
    fn parse_never_panics_and_locators_are_well_formed(input in "\\PC{0,40}") {
        if let Ok(loc) = parse_reference(&input) {
            prop_assert!(loc.chapter >= 1);
            prop_assert!(!loc.book.is_empty());
            if let Some(start) = loc.verse_start {
                prop_assert!(start >= 1);
                if let Some(end) = loc.verse_end {
                    prop_assert!(end >= start);
                }
            } else {
                prop_assert!(loc.verse_end.is_none());
            }
        }
    }

    #[test]
    fn formatted_references_parse_back(
        book in prop::sample::select(vec!["Genesis", "1 John", "Song of Solomon", "Psalms"]),
        chapter in 1u32..200,
        start in 1u32..200,
        span in 0u32..20,
    ) {
        let end = start + span;
        let loc = parse_reference(&format!("{} {}:{}-{}", book, chapter, start, end)).unwrap();
        prop_assert_eq!(loc, locator(book, chapter, Some(start), Some(end)));
    }
}
