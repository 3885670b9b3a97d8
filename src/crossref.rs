use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::errors::{LookupError, Result, VerseKitError};
use crate::reference::parse_reference;
use crate::resolution::{BookResolver, CANONICAL_BOOKS};

/// Resolver over the full canon, used to key cross references independently
/// of any loaded translation.
static CANON: Lazy<BookResolver<'static>> = Lazy::new(|| BookResolver::new(CANONICAL_BOOKS));

/// How a cross reference relates its two passages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CrossRefKind {
    /// The target quotes or explicitly refers to the source.
    Direct,
    /// The target tells the same thing in other words.
    Parallel,
    /// The passages share a theme.
    Topical,
}

impl CrossRefKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CrossRefKind::Direct => "direct",
            CrossRefKind::Parallel => "parallel",
            CrossRefKind::Topical => "topical",
        }
    }
}

impl fmt::Display for CrossRefKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CrossRefKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "direct" => Ok(CrossRefKind::Direct),
            "parallel" => Ok(CrossRefKind::Parallel),
            "topical" => Ok(CrossRefKind::Topical),
            other => Err(format!(
                "unknown cross reference type '{}' (expected direct, parallel or topical)",
                other
            )),
        }
    }
}

/// A link from one passage to another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossReference {
    pub source: String,
    pub target: String,
    #[serde(rename = "type")]
    pub kind: CrossRefKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Canonical spelling of a reference: `"gen 1:1"` becomes `"Genesis 1:1"`.
///
/// Books are resolved against the full canon, not a particular translation.
pub fn normalize_reference(reference: &str) -> std::result::Result<String, LookupError> {
    let locator = parse_reference(reference)?;
    let book = CANON.resolve(&locator.book)?;
    Ok(locator.with_book(book))
}

const BUILTIN: &[(&str, &str, CrossRefKind, &str)] = &[
    ("Genesis 1:1", "John 1:1-3", CrossRefKind::Parallel, "Creation through the Word"),
    ("Genesis 1:1", "Psalms 33:6", CrossRefKind::Topical, "Creation by God's word"),
    ("Genesis 1:1", "Hebrews 11:3", CrossRefKind::Direct, "Creation by faith"),
    ("John 3:16", "1 John 4:9", CrossRefKind::Parallel, "God's love demonstrated"),
    ("John 3:16", "Romans 5:8", CrossRefKind::Topical, "God's love for sinners"),
    ("John 3:16", "Romans 8:32", CrossRefKind::Direct, "God giving His Son"),
];

/// Cross references keyed by canonical source reference.
///
/// Entries keep insertion order; lookups return every entry whose source
/// normalizes to the same reference as the query.
#[derive(Debug, Clone, Default)]
pub struct CrossReferenceIndex {
    entries: Vec<CrossReference>,
    by_source: HashMap<String, Vec<usize>>,
}

impl CrossReferenceIndex {
    /// An empty index.
    pub fn new() -> Self {
        Self::default()
    }

    /// The small set of references shipped with the crate.
    pub fn builtin() -> Self {
        let mut index = Self::new();
        for (source, target, kind, description) in BUILTIN {
            index.insert(CrossReference {
                source: source.to_string(),
                target: target.to_string(),
                kind: *kind,
                description: Some(description.to_string()),
            });
        }
        index
    }

    /// The built-in references plus any user-added ones stored at `path`.
    pub fn open(path: &Path) -> Result<Self> {
        let mut index = Self::builtin();
        for xref in read_custom(path)? {
            index.add(xref).map_err(|e| VerseKitError::Config {
                message: format!("invalid cross reference in '{}': {}", path.display(), e),
            })?;
        }
        Ok(index)
    }

    /// Adds a reference after normalizing both ends. Returns the stored entry.
    pub fn add(&mut self, xref: CrossReference) -> std::result::Result<&CrossReference, LookupError> {
        let normalized = CrossReference {
            source: normalize_reference(&xref.source)?,
            target: normalize_reference(&xref.target)?,
            description: xref
                .description
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty()),
            ..xref
        };
        debug!(source = %normalized.source, target = %normalized.target, "adding cross reference");
        let idx = self.insert(normalized);
        Ok(&self.entries[idx])
    }

    /// Every reference whose source is `reference`.
    pub fn lookup(&self, reference: &str) -> std::result::Result<Vec<&CrossReference>, LookupError> {
        let key = normalize_reference(reference)?;
        Ok(self
            .by_source
            .get(&key)
            .map(|ids| ids.iter().map(|&i| &self.entries[i]).collect())
            .unwrap_or_default())
    }

    /// References whose description mentions `topic`, case-insensitively.
    pub fn search_by_topic(&self, topic: &str) -> Vec<&CrossReference> {
        let topic = topic.trim().to_lowercase();
        if topic.is_empty() {
            return Vec::new();
        }
        self.entries
            .iter()
            .filter(|x| {
                x.description
                    .as_deref()
                    .is_some_and(|d| d.to_lowercase().contains(&topic))
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn insert(&mut self, xref: CrossReference) -> usize {
        let idx = self.entries.len();
        self.by_source
            .entry(xref.source.clone())
            .or_default()
            .push(idx);
        self.entries.push(xref);
        idx
    }
}

/// Reads user-added references. A missing file yields none.
pub fn read_custom(path: &Path) -> Result<Vec<CrossReference>> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let contents = fs::read_to_string(path).map_err(|e| VerseKitError::Config {
        message: format!("failed to read '{}': {}", path.display(), e),
    })?;
    serde_json::from_str(&contents).map_err(|e| VerseKitError::Config {
        message: format!("failed to parse '{}': {}", path.display(), e),
    })
}

/// Appends one reference to the user file at `path`, normalizing it first.
///
/// Written through a temporary file and rename.
pub fn append_custom(path: &Path, xref: CrossReference) -> Result<CrossReference> {
    let stored = CrossReferenceIndex::new().add(xref)?.clone();

    let mut custom = read_custom(path)?;
    custom.push(stored.clone());

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let tmp_path = path.with_extension("tmp");
    fs::write(&tmp_path, serde_json::to_string_pretty(&custom)?)?;
    fs::rename(&tmp_path, path)?;

    info!(source = %stored.source, target = %stored.target, path = %path.display(), "saved cross reference");
    Ok(stored)
}
