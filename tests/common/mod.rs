#![allow(dead_code)]

use std::path::PathBuf;

use versekit::types::{Book, Chapter, Translation, TranslationDocument, Verse};

/// Directory holding the sample translation documents.
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

/// Loads a fixture synchronously, bypassing the async loader.
pub fn load_fixture(id: &str) -> Translation {
    let path = fixtures_dir().join(format!("{}.json", id));
    let contents = std::fs::read_to_string(&path).expect("failed to read fixture");
    let doc: TranslationDocument = serde_json::from_str(&contents).expect("invalid fixture");
    Translation::from_document(id, doc).expect("malformed fixture")
}

pub fn kjv() -> Translation {
    load_fixture("kjv")
}

/// A one-book translation whose first chapter skips verse 3.
pub fn gapped() -> Translation {
    let verses = [1, 2, 4, 5]
        .iter()
        .map(|n| Verse {
            number: *n,
            text: format!("verse {}", n),
        })
        .collect();
    Translation::new(
        "gap",
        "Gapped",
        vec![Book {
            name: "Obadiah".to_string(),
            chapters: vec![Chapter { number: 1, verses }],
        }],
    )
    .expect("valid translation")
}
