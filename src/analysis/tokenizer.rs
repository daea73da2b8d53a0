use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;

static WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\p{L}+\b").expect("word pattern is valid"));

static STOP_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "about", "above", "after", "again", "against", "all", "also", "and", "any", "are",
        "because", "been", "before", "being", "below", "between", "both", "but", "can",
        "could", "did", "does", "doing", "down", "during", "each", "few", "for", "from",
        "further", "had", "has", "have", "having", "her", "here", "hers", "herself", "him",
        "himself", "his", "how", "into", "its", "itself", "just", "more", "most", "myself",
        "nor", "not", "now", "off", "once", "only", "other", "our", "ours", "ourselves", "out",
        "over", "own", "same", "she", "should", "some", "such", "than", "that", "the",
        "their", "theirs", "them", "themselves", "then", "there", "these", "they", "this",
        "those", "through", "too", "under", "until", "very", "was", "were", "what", "when",
        "where", "which", "while", "who", "whom", "why", "will", "with", "would", "you",
        "your", "yours", "yourself", "yourselves",
    ]
    .into_iter()
    .collect()
});

/// Lowercased word tokens longer than two characters, in text order.
pub fn tokenize_text(text: &str) -> Vec<String> {
    WORD_RE
        .find_iter(&text.to_lowercase())
        .map(|m| m.as_str().to_string())
        .filter(|word| word.chars().count() > 2)
        .collect()
}

/// Tokens that can become keywords: `tokenize_text` without English stop words.
pub fn candidate_tokens(text: &str) -> Vec<String> {
    tokenize_text(text)
        .into_iter()
        .filter(|word| !is_stop_word(word))
        .collect()
}

pub fn is_stop_word(word: &str) -> bool {
    STOP_WORDS.contains(word)
}
