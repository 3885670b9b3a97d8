mod common;

use versekit::search::SearchIndex;

#[test]
fn test_search_ranks_by_frequency_then_position() {
    let kjv = common::kjv();
    let index = SearchIndex::build(&kjv);
    let hits = index.search(&kjv, "loved world", 3);

    let refs: Vec<(&str, u32)> = hits.iter().map(|h| (h.reference.as_str(), h.score)).collect();
    assert_eq!(
        refs,
        vec![("John 3:17", 3), ("John 3:16", 2), ("John 3:19", 2)]
    );
    assert!(hits[1].text.starts_with("For God so loved"));
}

#[test]
fn test_search_respects_limit() {
    let kjv = common::kjv();
    let index = SearchIndex::build(&kjv);
    assert_eq!(index.search(&kjv, "god", 3).len(), 3);
}

#[test]
fn test_search_is_case_and_punctuation_insensitive() {
    let kjv = common::kjv();
    let index = SearchIndex::build(&kjv);
    let hits = index.search(&kjv, "SHEPHERD;", 10);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].reference, "Psalms 23:1");
}

#[test]
fn test_search_without_usable_words() {
    let kjv = common::kjv();
    let index = SearchIndex::build(&kjv);
    assert!(index.search(&kjv, "a of", 10).is_empty());
    assert!(index.search(&kjv, "zebra", 10).is_empty());
}

#[test]
fn test_index_metadata() {
    let kjv = common::kjv();
    let index = SearchIndex::build(&kjv);
    assert_eq!(index.translation_id(), "kjv");
    assert!(index.word_count() > 0);
}
