use serde_json::{json, Value};

use crate::crossref::CrossReference;
use crate::search::SearchHit;
use crate::types::ResolvedPassage;

/// Formats a passage as plain text: the reference on the first line, then
/// one numbered verse per line. A failed passage renders as its error
/// message.
pub fn format_passage_as_text(passage: &ResolvedPassage) -> String {
    let mut out = String::new();
    out.push_str(&passage.reference);
    out.push('\n');

    if let Some(ref err) = passage.error {
        out.push_str(&format!("  {}\n", err));
        return out;
    }

    for v in &passage.verses {
        out.push_str(&format!("{:>3}  {}\n", v.verse, v.text));
    }
    out
}

/// Formats a passage as a JSON value with the error as a plain message.
pub fn format_passage_as_json(passage: &ResolvedPassage) -> Value {
    json!({
        "reference": passage.reference,
        "verses": passage
            .verses
            .iter()
            .map(|v| json!({
                "book": v.book,
                "chapter": v.chapter,
                "verse": v.verse,
                "text": v.text,
            }))
            .collect::<Vec<_>>(),
        "error": passage.error.as_ref().map(|e| e.to_string()),
    })
}

/// Formats search hits one per line: `reference (score) - text`.
pub fn format_search_hits(query: &str, hits: &[SearchHit]) -> String {
    if hits.is_empty() {
        return format!("No results found for '{}'\n", query);
    }
    let mut out = String::new();
    for hit in hits {
        out.push_str(&format!("{} ({}) - {}\n", hit.reference, hit.score, hit.text));
    }
    out
}

/// Formats cross references, one per line: target, type, then description.
pub fn format_cross_references(heading: &str, xrefs: &[&CrossReference]) -> String {
    if xrefs.is_empty() {
        return format!("No cross references for '{}'\n", heading);
    }
    let mut out = format!("{}\n", heading);
    for xref in xrefs {
        out.push_str(&format!("  {} [{}]", xref.target, xref.kind));
        if let Some(ref description) = xref.description {
            out.push_str(&format!(" - {}", description));
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::LookupError;
    use crate::types::PassageVerse;

    fn sample() -> ResolvedPassage {
        ResolvedPassage {
            reference: "John 3:16".to_string(),
            verses: vec![PassageVerse {
                book: "John".to_string(),
                chapter: 3,
                verse: 16,
                text: "For God so loved the world".to_string(),
            }],
            error: None,
        }
    }

    #[test]
    fn text_lists_numbered_verses() {
        let text = format_passage_as_text(&sample());
        assert!(text.starts_with("John 3:16\n"));
        assert!(text.contains(" 16  For God so loved the world"));
    }

    #[test]
    fn text_shows_error_message() {
        let passage = ResolvedPassage {
            reference: "Hezekiah 1:1".to_string(),
            verses: vec![],
            error: Some(LookupError::BookNotFound {
                token: "Hezekiah".to_string(),
            }),
        };
        let text = format_passage_as_text(&passage);
        assert!(text.contains("Book \"Hezekiah\" not found"));
    }

    #[test]
    fn json_has_null_error_on_success() {
        let value = format_passage_as_json(&sample());
        assert_eq!(value["reference"], "John 3:16");
        assert_eq!(value["verses"][0]["verse"], 16);
        assert!(value["error"].is_null());
    }

    #[test]
    fn cross_references_list_target_and_type() {
        use crate::crossref::CrossRefKind;

        let xref = CrossReference {
            source: "John 3:16".to_string(),
            target: "Romans 5:8".to_string(),
            kind: CrossRefKind::Topical,
            description: Some("God's love for sinners".to_string()),
        };
        let text = format_cross_references("John 3:16", &[&xref]);
        assert_eq!(
            text,
            "John 3:16\n  Romans 5:8 [topical] - God's love for sinners\n"
        );
        assert_eq!(
            format_cross_references("Jude 1:1", &[]),
            "No cross references for 'Jude 1:1'\n"
        );
    }
}
