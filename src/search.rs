use std::collections::HashMap;

use serde::Serialize;

use crate::types::Translation;

/// Characters removed before splitting verse text into words.
const STRIPPED_PUNCTUATION: &[char] = &['.', ',', ';', ':', '?', '!', '\'', '"', '[', ']', '(', ')'];

/// Words of this length or shorter are not indexed.
const MIN_WORD_LEN: usize = 2;

/// Position of a verse within the translation, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
struct VerseKey {
    book: usize,
    chapter: u32,
    verse: u32,
}

/// A verse matching a search query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    pub reference: String,
    pub book: String,
    pub chapter: u32,
    pub verse: u32,
    pub text: String,
    pub score: u32,
}

/// Inverted index from word to verse occurrence counts.
pub struct SearchIndex {
    translation_id: String,
    words: HashMap<String, HashMap<VerseKey, u32>>,
}

impl SearchIndex {
    /// Indexes every verse of `translation`.
    pub fn build(translation: &Translation) -> Self {
        let mut words: HashMap<String, HashMap<VerseKey, u32>> = HashMap::new();

        for (book_idx, book) in translation.books().iter().enumerate() {
            for chapter in &book.chapters {
                for verse in &chapter.verses {
                    let key = VerseKey {
                        book: book_idx,
                        chapter: chapter.number,
                        verse: verse.number,
                    };
                    for word in tokenize(&verse.text) {
                        *words.entry(word).or_default().entry(key).or_insert(0) += 1;
                    }
                }
            }
        }

        Self {
            translation_id: translation.id().to_string(),
            words,
        }
    }

    /// Id of the translation this index was built from.
    pub fn translation_id(&self) -> &str {
        &self.translation_id
    }

    /// Number of distinct indexed words.
    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// Ranks verses by the summed frequency of the query's words.
    ///
    /// Ties are broken by canonical position. `translation` must be the one
    /// the index was built from; hits whose verse is missing are dropped.
    pub fn search(&self, translation: &Translation, query: &str, limit: usize) -> Vec<SearchHit> {
        let mut scores: HashMap<VerseKey, u32> = HashMap::new();
        for word in tokenize(query) {
            if let Some(occurrences) = self.words.get(&word) {
                for (key, freq) in occurrences {
                    *scores.entry(*key).or_insert(0) += freq;
                }
            }
        }

        let mut ranked: Vec<(VerseKey, u32)> = scores.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

        ranked
            .into_iter()
            .filter_map(|(key, score)| {
                let book = translation.books().get(key.book)?;
                let verse = book.chapter(key.chapter)?.verse(key.verse)?;
                Some(SearchHit {
                    reference: format!("{} {}:{}", book.name, key.chapter, key.verse),
                    book: book.name.clone(),
                    chapter: key.chapter,
                    verse: key.verse,
                    text: verse.text.clone(),
                    score,
                })
            })
            .take(limit)
            .collect()
    }
}

/// Lowercases, strips punctuation and drops short words.
fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .replace(STRIPPED_PUNCTUATION, "")
        .split_whitespace()
        .filter(|w| w.chars().count() > MIN_WORD_LEN)
        .map(str::to_string)
        .collect()
}
