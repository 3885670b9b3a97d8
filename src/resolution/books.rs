use std::collections::HashMap;

use once_cell::sync::Lazy;

/// The 66 books of the Protestant canon, in canonical order.
pub const CANONICAL_BOOKS: [&str; 66] = [
    "Genesis",
    "Exodus",
    "Leviticus",
    "Numbers",
    "Deuteronomy",
    "Joshua",
    "Judges",
    "Ruth",
    "1 Samuel",
    "2 Samuel",
    "1 Kings",
    "2 Kings",
    "1 Chronicles",
    "2 Chronicles",
    "Ezra",
    "Nehemiah",
    "Esther",
    "Job",
    "Psalms",
    "Proverbs",
    "Ecclesiastes",
    "Song of Solomon",
    "Isaiah",
    "Jeremiah",
    "Lamentations",
    "Ezekiel",
    "Daniel",
    "Hosea",
    "Joel",
    "Amos",
    "Obadiah",
    "Jonah",
    "Micah",
    "Nahum",
    "Habakkuk",
    "Zephaniah",
    "Haggai",
    "Zechariah",
    "Malachi",
    "Matthew",
    "Mark",
    "Luke",
    "John",
    "Acts",
    "Romans",
    "1 Corinthians",
    "2 Corinthians",
    "Galatians",
    "Ephesians",
    "Philippians",
    "Colossians",
    "1 Thessalonians",
    "2 Thessalonians",
    "1 Timothy",
    "2 Timothy",
    "Titus",
    "Philemon",
    "Hebrews",
    "James",
    "1 Peter",
    "2 Peter",
    "1 John",
    "2 John",
    "3 John",
    "Jude",
    "Revelation",
];

/// Common abbreviations, keyed in normalized form (see
/// [`normalize_abbreviation`]).
const ABBREVIATIONS: &[(&str, &[&str])] = &[
    ("Genesis", &["gen", "ge", "gn", "genesis"]),
    ("Exodus", &["exo", "ex", "exod", "exodus"]),
    ("Leviticus", &["lev", "le", "lv", "leviticus"]),
    ("Numbers", &["num", "nu", "nm", "nb", "numbers"]),
    ("Deuteronomy", &["deut", "deu", "dt", "de", "deuteronomy"]),
    ("Joshua", &["josh", "jos", "jsh", "joshua"]),
    ("Judges", &["judg", "jdg", "jg", "jdgs", "judges"]),
    ("Ruth", &["ruth", "rth", "ru"]),
    ("1 Samuel", &["1sam", "1sa", "1sm", "1s", "1samuel"]),
    ("2 Samuel", &["2sam", "2sa", "2sm", "2s", "2samuel"]),
    ("1 Kings", &["1kings", "1kgs", "1ki", "1kin", "1k"]),
    ("2 Kings", &["2kings", "2kgs", "2ki", "2kin", "2k"]),
    ("1 Chronicles", &["1chron", "1chr", "1ch", "1chronicles"]),
    ("2 Chronicles", &["2chron", "2chr", "2ch", "2chronicles"]),
    ("Ezra", &["ezra", "ezr", "ez"]),
    ("Nehemiah", &["neh", "ne", "nehemiah"]),
    ("Esther", &["esth", "est", "es", "esther"]),
    ("Job", &["job", "jb"]),
    ("Psalms", &["ps", "psa", "psalm", "psalms", "pss", "psm", "pslm"]),
    ("Proverbs", &["prov", "pro", "prv", "pr", "proverbs"]),
    ("Ecclesiastes", &["eccl", "eccles", "ecc", "ec", "qoh", "ecclesiastes"]),
    (
        "Song of Solomon",
        &["song", "sos", "so", "songofsolomon", "songofsongs", "canticles", "cant"],
    ),
    ("Isaiah", &["isa", "is", "isaiah"]),
    ("Jeremiah", &["jer", "je", "jr", "jeremiah"]),
    ("Lamentations", &["lam", "la", "lamentations"]),
    ("Ezekiel", &["ezek", "eze", "ezk", "ezekiel"]),
    ("Daniel", &["dan", "da", "dn", "daniel"]),
    ("Hosea", &["hos", "ho", "hosea"]),
    ("Joel", &["joel", "jl"]),
    ("Amos", &["amos", "am"]),
    ("Obadiah", &["obad", "ob", "oba", "obadiah"]),
    ("Jonah", &["jonah", "jnh", "jon"]),
    ("Micah", &["mic", "mc", "micah"]),
    ("Nahum", &["nah", "na", "nahum"]),
    ("Habakkuk", &["hab", "hb", "habakkuk"]),
    ("Zephaniah", &["zeph", "zep", "zp", "zephaniah"]),
    ("Haggai", &["hag", "hg", "haggai"]),
    ("Zechariah", &["zech", "zec", "zc", "zechariah"]),
    ("Malachi", &["mal", "ml", "malachi"]),
    ("Matthew", &["matt", "mat", "mt", "matthew"]),
    ("Mark", &["mark", "mrk", "mar", "mk", "mr"]),
    ("Luke", &["luke", "luk", "lk"]),
    ("John", &["john", "joh", "jhn", "jn"]),
    ("Acts", &["acts", "act", "ac"]),
    ("Romans", &["rom", "ro", "rm", "romans"]),
    ("1 Corinthians", &["1cor", "1co", "1corinthians"]),
    ("2 Corinthians", &["2cor", "2co", "2corinthians"]),
    ("Galatians", &["gal", "ga", "galatians"]),
    ("Ephesians", &["eph", "ephes", "ephesians"]),
    ("Philippians", &["phil", "php", "pp", "philippians"]),
    ("Colossians", &["col", "co", "colossians"]),
    ("1 Thessalonians", &["1thess", "1thes", "1th", "1thessalonians"]),
    ("2 Thessalonians", &["2thess", "2thes", "2th", "2thessalonians"]),
    ("1 Timothy", &["1tim", "1ti", "1timothy"]),
    ("2 Timothy", &["2tim", "2ti", "2timothy"]),
    ("Titus", &["titus", "tit", "ti"]),
    ("Philemon", &["philem", "phm", "pm", "philemon"]),
    ("Hebrews", &["heb", "hebrews"]),
    ("James", &["james", "jas", "jm"]),
    ("1 Peter", &["1pet", "1pe", "1pt", "1p", "1peter"]),
    ("2 Peter", &["2pet", "2pe", "2pt", "2p", "2peter"]),
    ("1 John", &["1john", "1jn", "1jo", "1joh", "1jhn", "1j"]),
    ("2 John", &["2john", "2jn", "2jo", "2joh", "2jhn", "2j"]),
    ("3 John", &["3john", "3jn", "3jo", "3joh", "3jhn", "3j"]),
    ("Jude", &["jude", "jud", "jd"]),
    ("Revelation", &["rev", "re", "revelation", "revelations", "apoc"]),
];

static ABBREVIATION_INDEX: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    let mut index = HashMap::new();
    for (canonical, abbrevs) in ABBREVIATIONS {
        for abbrev in *abbrevs {
            index.insert(*abbrev, *canonical);
        }
    }
    index
});

/// Lowercases and strips whitespace and periods: `"1 Cor."` -> `"1cor"`.
pub fn normalize_abbreviation(token: &str) -> String {
    token
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '.')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Looks up the canonical name for an abbreviation, if known.
pub fn abbreviation_for(token: &str) -> Option<&'static str> {
    ABBREVIATION_INDEX
        .get(normalize_abbreviation(token).as_str())
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_canonical_book_has_abbreviations() {
        for book in CANONICAL_BOOKS {
            assert!(
                ABBREVIATIONS.iter().any(|(name, abbrevs)| *name == book && !abbrevs.is_empty()),
                "missing abbreviations for {}",
                book
            );
        }
        assert_eq!(ABBREVIATIONS.len(), CANONICAL_BOOKS.len());
    }

    #[test]
    fn abbreviation_keys_are_unique() {
        let total: usize = ABBREVIATIONS.iter().map(|(_, a)| a.len()).sum();
        assert_eq!(ABBREVIATION_INDEX.len(), total);
    }

    #[test]
    fn lookup_ignores_case_spaces_and_periods() {
        assert_eq!(abbreviation_for("1 Cor."), Some("1 Corinthians"));
        assert_eq!(abbreviation_for("PSA"), Some("Psalms"));
        assert_eq!(abbreviation_for("xyz"), None);
    }
}
