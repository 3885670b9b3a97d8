mod common;

use std::sync::Arc;

use versekit::errors::{LookupError, ParseError};
use versekit::passage::*;
use versekit::reference::parse_reference;
use versekit::types::{Book, Chapter, Translation, Verse};

#[test]
fn test_single_verse_lookup() {
    let kjv = common::kjv();
    let passage = lookup("John 3:16", &kjv);

    assert!(passage.is_ok());
    assert_eq!(passage.reference, "John 3:16");
    assert_eq!(passage.verses.len(), 1);
    let v = &passage.verses[0];
    assert_eq!((v.chapter, v.verse), (3, 16));
    assert!(v.text.starts_with("For God so loved the world"));
}

#[test]
fn test_abbreviated_chapter_lookup() {
    let kjv = common::kjv();
    let passage = lookup("  psalm 23  ", &kjv);

    assert!(passage.is_ok());
    assert_eq!(passage.reference, "Psalms 23");
    assert_eq!(passage.verses.len(), 6);
    assert!(passage.verses.iter().all(|v| v.book == "Psalms"));
}

#[test]
fn test_range_is_inclusive_and_ordered() {
    let kjv = common::kjv();

    let passage = lookup("Genesis 1:1-3", &kjv);
    let numbers: Vec<u32> = passage.verses.iter().map(|v| v.verse).collect();
    assert_eq!(numbers, vec![1, 2, 3]);
    assert_eq!(passage.reference, "Genesis 1:1-3");

    let passage = lookup("John 3:16-18", &kjv);
    let numbers: Vec<u32> = passage.verses.iter().map(|v| v.verse).collect();
    assert_eq!(numbers, vec![16, 17, 18]);
}

#[test]
fn test_unknown_book() {
    let kjv = common::kjv();
    let passage = lookup("Hezekiah 1:1", &kjv);

    assert!(passage.verses.is_empty());
    let err = passage.error.expect("should carry an error");
    assert_eq!(
        err,
        LookupError::BookNotFound {
            token: "Hezekiah".to_string()
        }
    );
    assert_eq!(err.to_string(), "Book \"Hezekiah\" not found");
}

#[test]
fn test_missing_chapter() {
    let kjv = common::kjv();
    let passage = lookup("Genesis 99", &kjv);

    assert!(passage.verses.is_empty());
    let err = passage.error.expect("should carry an error");
    assert_eq!(err.to_string(), "chapter 99 not found in Genesis");
}

#[test]
fn test_missing_single_verse() {
    let kjv = common::kjv();
    let passage = lookup("John 3:40", &kjv);

    assert!(passage.verses.is_empty());
    assert_eq!(
        passage.error,
        Some(LookupError::VerseNotFound {
            book: "John".to_string(),
            chapter: 3,
            verse: 40,
        })
    );
    assert_eq!(
        passage.error.unwrap().to_string(),
        "verse 40 not found in John 3"
    );
}

#[test]
fn test_range_outside_chapter_has_no_verses() {
    let kjv = common::kjv();
    let passage = lookup("John 3:30-35", &kjv);

    assert!(passage.verses.is_empty());
    assert_eq!(passage.error, Some(LookupError::NoVerses));
    assert_eq!(passage.reference, "John 3:30-35");
}

#[test]
fn test_range_skips_gaps() {
    let gapped = common::gapped();
    let passage = lookup("Obadiah 1:1-4", &gapped);

    let numbers: Vec<u32> = passage.verses.iter().map(|v| v.verse).collect();
    assert_eq!(numbers, vec![1, 2, 4]);
    assert!(passage.is_ok());
}

#[test]
fn test_numbered_book_is_not_truncated() {
    let kjv = common::kjv();

    let passage = lookup("1 Corinthians 13", &kjv);
    assert_eq!(passage.reference, "1 Corinthians 13");
    assert_eq!(passage.verses.len(), 4);
    assert!(passage.verses.iter().all(|v| v.book == "1 Corinthians"));

    let passage = lookup("1 John 4:9", &kjv);
    assert_eq!(passage.verses[0].book, "1 John");
}

#[test]
fn test_missing_numbered_book_is_not_replaced_by_namesake() {
    let john_only = Translation::new(
        "jn",
        "John Only",
        vec![Book {
            name: "John".to_string(),
            chapters: vec![Chapter {
                number: 1,
                verses: vec![Verse {
                    number: 1,
                    text: "In the beginning was the Word".to_string(),
                }],
            }],
        }],
    )
    .unwrap();

    let passage = lookup("2 John 1:1", &john_only);
    assert!(passage.verses.is_empty());
    assert_eq!(
        passage.error,
        Some(LookupError::BookNotFound {
            token: "2 John".to_string()
        })
    );
    assert!(lookup("John 1:1", &john_only).is_ok());
}

#[test]
fn test_parse_failure_is_captured() {
    let kjv = common::kjv();
    let passage = lookup("John", &kjv);

    assert!(passage.verses.is_empty());
    assert_eq!(passage.reference, "John");
    assert_eq!(
        passage.error,
        Some(LookupError::Parse(ParseError::MissingChapter))
    );
}

#[test]
fn test_every_verse_round_trips() {
    let kjv = common::kjv();
    for book in kjv.books() {
        for chapter in &book.chapters {
            for verse in &chapter.verses {
                let reference = format!("{} {}:{}", book.name, chapter.number, verse.number);
                let passage = lookup(&reference, &kjv);
                assert_eq!(passage.reference, reference);
                assert_eq!(passage.verses.len(), 1, "{}", reference);
                assert_eq!(passage.verses[0].text, verse.text, "{}", reference);
            }
        }
    }
}

#[test]
fn test_resolution_is_idempotent() {
    let kjv = common::kjv();
    let locator = parse_reference("Genesis 1:2-4").unwrap();
    let first = resolve_passage(&locator, &kjv);
    let second = resolve_passage(&locator, &kjv);
    assert_eq!(first, second);
}

#[test]
fn test_chapter_numbers() {
    let kjv = common::kjv();
    assert_eq!(chapter_numbers(&kjv, "gen").unwrap(), vec![1, 2]);
    assert_eq!(chapter_numbers(&kjv, "John").unwrap(), vec![1, 3]);
    assert!(chapter_numbers(&kjv, "Hezekiah").is_err());
}

#[test]
fn test_next_and_previous_chapter() {
    let kjv = common::kjv();

    assert_eq!(
        next_chapter(&kjv, "Genesis", 1),
        Some(ChapterPosition {
            book: "Genesis".to_string(),
            chapter: 2
        })
    );
    assert_eq!(
        next_chapter(&kjv, "Genesis", 2),
        Some(ChapterPosition {
            book: "Psalms".to_string(),
            chapter: 23
        })
    );
    assert_eq!(
        previous_chapter(&kjv, "Psalms", 23),
        Some(ChapterPosition {
            book: "Genesis".to_string(),
            chapter: 2
        })
    );
    assert_eq!(
        previous_chapter(&kjv, "John", 3),
        Some(ChapterPosition {
            book: "John".to_string(),
            chapter: 1
        })
    );
}

#[test]
fn test_navigation_stops_at_canon_edges() {
    let kjv = common::kjv();
    assert_eq!(previous_chapter(&kjv, "Genesis", 1), None);
    assert_eq!(next_chapter(&kjv, "1 John", 4), None);
    assert_eq!(next_chapter(&kjv, "Genesis", 50), None);
}

#[test]
fn test_compare_passage_preserves_order() {
    let kjv = Arc::new(common::kjv());
    let asv = Arc::new(common::load_fixture("asv"));
    let locator = parse_reference("John 3:16").unwrap();

    let compared = compare_passage(&locator, &[asv, kjv]);
    assert_eq!(compared.len(), 2);
    assert_eq!(compared[0].translation, "asv");
    assert_eq!(compared[1].translation, "kjv");
    assert!(compared[0].passage.verses[0].text.contains("eternal life"));
    assert!(compared[1].passage.verses[0].text.contains("everlasting life"));
}
