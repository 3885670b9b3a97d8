use std::collections::HashMap;

use tracing::debug;

use crate::errors::LookupError;
use crate::types::Translation;

use super::books::abbreviation_for;

/// Which strategy produced a book match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchTier {
    Exact,
    Abbreviation,
    Substring,
}

impl MatchTier {
    /// Returns the string representation of this tier.
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchTier::Exact => "exact-match",
            MatchTier::Abbreviation => "abbreviation-match",
            MatchTier::Substring => "substring-match",
        }
    }
}

/// A canonical book name together with the tier that matched it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BookMatch<'a> {
    pub name: &'a str,
    pub tier: MatchTier,
}

/// Resolves typed book names against a fixed set of canonical names.
///
/// The lowercase index is built once at construction; a resolver can be
/// reused for any number of lookups against the same set.
pub struct BookResolver<'a> {
    /// Canonical names in input order.
    names: Vec<&'a str>,
    /// Lowercased canonical name -> position in `names`.
    lowercase_index: HashMap<String, usize>,
}

impl<'a> BookResolver<'a> {
    /// Creates a resolver over the given canonical names.
    pub fn new<I>(names: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let names: Vec<&'a str> = names.into_iter().collect();
        let mut lowercase_index = HashMap::with_capacity(names.len());
        for (idx, name) in names.iter().enumerate() {
            lowercase_index.entry(name.to_lowercase()).or_insert(idx);
        }
        Self {
            names,
            lowercase_index,
        }
    }

    /// Creates a resolver over a translation's book names.
    pub fn for_translation(translation: &'a Translation) -> Self {
        Self::new(translation.books().iter().map(|b| b.name.as_str()))
    }

    /// Attempts to resolve a token, reporting the tier that matched.
    ///
    /// Tiers are tried in order and the first hit wins:
    /// 1. **Exact** -- case-insensitive equality with a canonical name.
    /// 2. **Abbreviation** -- the fixed abbreviation table, accepted only if
    ///    its target exists in this resolver's set.
    /// 3. **Substring** -- the name contains the token or the token contains
    ///    the name; the shortest such name wins, earliest on ties. A token
    ///    with a leading book number only matches names with the same
    ///    number, so `"2 John"` never lands on `"John"`.
    ///
    /// Returns `None` for blank tokens or when no tier matches.
    pub fn resolve_one(&self, token: &str) -> Option<BookMatch<'a>> {
        let normalized = normalize_token(token);
        if normalized.is_empty() {
            return None;
        }

        let found = self
            .try_exact_match(&normalized)
            .or_else(|| self.try_abbreviation_match(token))
            .or_else(|| self.try_substring_match(&normalized));

        if let Some(m) = found {
            debug!(token, name = m.name, tier = m.tier.as_str(), "resolved book name");
        }
        found
    }

    /// Resolves a token to a canonical name.
    pub fn resolve(&self, token: &str) -> Result<&'a str, LookupError> {
        self.resolve_one(token)
            .map(|m| m.name)
            .ok_or_else(|| LookupError::BookNotFound {
                token: token.trim().to_string(),
            })
    }

    // ------------------------------------------------------------------
    // Private helpers
    // ------------------------------------------------------------------

    fn try_exact_match(&self, normalized: &str) -> Option<BookMatch<'a>> {
        let idx = *self.lowercase_index.get(normalized)?;
        Some(BookMatch {
            name: self.names[idx],
            tier: MatchTier::Exact,
        })
    }

    fn try_abbreviation_match(&self, token: &str) -> Option<BookMatch<'a>> {
        let canonical = abbreviation_for(token)?;
        let idx = *self.lowercase_index.get(&canonical.to_lowercase())?;
        Some(BookMatch {
            name: self.names[idx],
            tier: MatchTier::Abbreviation,
        })
    }

    fn try_substring_match(&self, normalized: &str) -> Option<BookMatch<'a>> {
        let number = book_number(normalized);
        self.names
            .iter()
            .enumerate()
            .filter(|(_, name)| {
                let lower = name.to_lowercase();
                if number.is_some() && book_number(&lower) != number {
                    return false;
                }
                lower.contains(normalized) || normalized.contains(lower.as_str())
            })
            .min_by_key(|(idx, name)| (name.len(), *idx))
            .map(|(_, name)| BookMatch {
                name: *name,
                tier: MatchTier::Substring,
            })
    }
}

/// Resolves `token` against `canonical_names`, returning the canonical
/// spelling.
pub fn resolve_book_name<S: AsRef<str>>(
    token: &str,
    canonical_names: &[S],
) -> Result<String, LookupError> {
    let resolver = BookResolver::new(canonical_names.iter().map(|s| s.as_ref()));
    resolver.resolve(token).map(str::to_string)
}

/// Leading book number of a numbered book (`"1 john"`, `"2kings"`).
fn book_number(name: &str) -> Option<char> {
    name.chars().next().filter(char::is_ascii_digit)
}

/// Lowercases and collapses whitespace.
fn normalize_token(token: &str) -> String {
    token
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
