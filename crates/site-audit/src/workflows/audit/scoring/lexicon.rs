use regex::Regex;
use std::sync::OnceLock;

/// Hero-copy words signalling a differentiated offer.
pub(crate) const DIFFERENTIATION_WORDS: &[&str] = &[
    "unique",
    "first",
    "only",
    "exclusive",
    "revolutionary",
    "innovative",
];

/// Page-copy terms signalling technology investment.
pub(crate) const INNOVATION_TERMS: &[&str] = &[
    "ai",
    "machine learning",
    "automation",
    "smart",
    "intelligent",
    "advanced",
];

/// Social platforms and the href fragments that identify them.
pub(crate) const SOCIAL_PLATFORMS: &[(&str, &str)] = &[
    ("Facebook", "facebook"),
    ("Twitter", "twitter"),
    ("LinkedIn", "linkedin"),
    ("Instagram", "instagram"),
];

static DIFFERENTIATION_PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
static INNOVATION_PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();

/// True when `text` contains any differentiation word as a whole word.
pub(crate) fn has_differentiation_word(text: &str) -> bool {
    let patterns = DIFFERENTIATION_PATTERNS.get_or_init(|| word_patterns(DIFFERENTIATION_WORDS));
    patterns.iter().any(|pattern| pattern.is_match(text))
}

/// Number of distinct innovation terms appearing as whole words in `text`.
pub(crate) fn innovation_hits(text: &str) -> usize {
    let patterns = INNOVATION_PATTERNS.get_or_init(|| word_patterns(INNOVATION_TERMS));
    patterns
        .iter()
        .filter(|pattern| pattern.is_match(text))
        .count()
}

fn word_patterns(words: &[&str]) -> Vec<Regex> {
    words
        .iter()
        .filter_map(|word| Regex::new(&format!(r"(?i)\b{}\b", regex::escape(word))).ok())
        .collect()
}
