//! Read-only reference data shared by every normalizer instance.
//!
//! Everything here is built once on first use and never mutated afterwards,
//! so worker threads can read it without locking.

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;

/// Token substituted for positive emoticons such as `:)` or `<3`.
pub const EMO_POS: &str = "EMO_POS";
/// Token substituted for negative emoticons such as `:(` or `:'(`.
pub const EMO_NEG: &str = "EMO_NEG";

pub const EMAIL_PATTERN: &str = r"[A-Za-z0-9._%+\-]+@[A-Za-z0-9\-]+(?:\.[A-Za-z0-9\-]+)+";

/// A bare scheme counts as a URL, so `http://` left behind by email removal
/// is still stripped.
pub const URL_PATTERN: &str = r"(?i)(?:https?://\S*|www\.\S+)";

/// Smile, laugh, love and wink faces.
pub const POSITIVE_EMOTICON_PATTERN: &str =
    r#"(?::-?\)|\(-?:|:'\)|:-?D\b|\bx-?D\b|\bX-?D\b|<3|:\*|;-?\)|;-?D\b|\(-?;)"#;

/// Sad and crying faces.
pub const NEGATIVE_EMOTICON_PATTERN: &str = r#"(?::-?\(|\)-?:|:,\(|:'\(|:"\()"#;

/// Anything that is neither a word character nor whitespace.
pub const PUNCTUATION_PATTERN: &str = r"[^\w\s]";

/// English stopwords (the NLTK list).
pub static STOPWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're",
        "you've", "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he",
        "him", "his", "himself", "she", "she's", "her", "hers", "herself", "it", "it's",
        "its", "itself", "they", "them", "their", "theirs", "themselves", "what", "which",
        "who", "whom", "this", "that", "that'll", "these", "those", "am", "is", "are",
        "was", "were", "be", "been", "being", "have", "has", "had", "having", "do",
        "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or", "because",
        "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
        "between", "into", "through", "during", "before", "after", "above", "below",
        "to", "from", "up", "down", "in", "out", "on", "off", "over", "under", "again",
        "further", "then", "once", "here", "there", "when", "where", "why", "how", "all",
        "any", "both", "each", "few", "more", "most", "other", "some", "such", "no",
        "nor", "not", "only", "own", "same", "so", "than", "too", "very", "s", "t",
        "can", "will", "just", "don", "don't", "should", "should've", "now", "d", "ll",
        "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't",
        "didn", "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't",
        "haven", "haven't", "isn", "isn't", "ma", "mightn", "mightn't", "mustn",
        "mustn't", "needn", "needn't", "shan", "shan't", "shouldn", "shouldn't",
        "wasn", "wasn't", "weren", "weren't", "won", "won't", "wouldn", "wouldn't",
    ]
    .into_iter()
    .collect()
});

/// Plural nouns whose singular cannot be reached by suffix rules, including
/// `-ie` nouns that the `ies → y` rule would mangle.
pub static IRREGULAR_LEMMAS: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    [
        ("men", "man"),
        ("women", "woman"),
        ("children", "child"),
        ("people", "person"),
        ("feet", "foot"),
        ("teeth", "tooth"),
        ("geese", "goose"),
        ("mice", "mouse"),
        ("knives", "knife"),
        ("wives", "wife"),
        ("lives", "life"),
        ("leaves", "leaf"),
        ("halves", "half"),
        ("shelves", "shelf"),
        ("wolves", "wolf"),
        ("thieves", "thief"),
        ("movies", "movie"),
        ("cookies", "cookie"),
        ("calories", "calorie"),
        ("zombies", "zombie"),
        ("rookies", "rookie"),
        ("selfies", "selfie"),
        ("brownies", "brownie"),
        ("hoodies", "hoodie"),
        ("pies", "pie"),
        ("ties", "tie"),
        ("lies", "lie"),
        ("criteria", "criterion"),
        ("phenomena", "phenomenon"),
        ("analyses", "analysis"),
        ("series", "series"),
        ("species", "species"),
        ("news", "news"),
    ]
    .into_iter()
    .collect()
});

/// Words ending in `s` that are not plurals and must be left alone.
pub static SINGULAR_S_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "this", "his", "is", "was", "has", "does", "yes", "us", "bus", "plus", "thus",
        "gas", "as", "always", "perhaps", "less", "unless", "across", "lens", "chaos",
        "bonus", "virus", "status", "focus", "campus", "minus", "canvas", "atlas",
    ]
    .into_iter()
    .collect()
});

pub fn is_stopword(token: &str) -> bool {
    if STOPWORDS.contains(token) {
        return true;
    }
    token.chars().any(char::is_uppercase) && STOPWORDS.contains(token.to_lowercase().as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use regex::Regex;

    #[test]
    fn patterns_compile() {
        for pattern in [
            EMAIL_PATTERN,
            URL_PATTERN,
            POSITIVE_EMOTICON_PATTERN,
            NEGATIVE_EMOTICON_PATTERN,
            PUNCTUATION_PATTERN,
        ] {
            assert!(Regex::new(pattern).is_ok(), "pattern failed: {pattern}");
        }
    }

    #[test]
    fn stopword_lookup_is_case_insensitive() {
        assert!(is_stopword("the"));
        assert!(is_stopword("The"));
        assert!(!is_stopword("movie"));
    }

    #[test]
    fn emoticon_patterns_classify_faces() {
        let pos = Regex::new(POSITIVE_EMOTICON_PATTERN).unwrap();
        let neg = Regex::new(NEGATIVE_EMOTICON_PATTERN).unwrap();
        for face in [":)", ":-)", "(:", ":D", "<3", ";)", "xD"] {
            assert!(pos.is_match(face), "{face} should be positive");
        }
        for face in [":(", ":-(", "):", ":'("] {
            assert!(neg.is_match(face), "{face} should be negative");
            assert!(!pos.is_match(face), "{face} should not be positive");
        }
        assert!(!pos.is_match("xDrive"));
    }
}
