use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{HarnessError, Result};

// ---------------------------------------------------------------------------
// CleanOption – one independently toggleable cleaning capability
// ---------------------------------------------------------------------------

/// A named cleaning transform. The string id returned by [`CleanOption::id`]
/// is stable across runs and is what configuration files refer to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CleanOption {
    Emails,
    Urls,
    Emoticons,
    RepeatingVowels,
    Punctuation,
    Lowercase,
    Stopwords,
    Lemmatizer,
    Stemmer,
}

impl CleanOption {
    /// Every registered option, in pipeline order.
    pub const ALL: [CleanOption; 9] = [
        CleanOption::Emails,
        CleanOption::Urls,
        CleanOption::Emoticons,
        CleanOption::RepeatingVowels,
        CleanOption::Punctuation,
        CleanOption::Lowercase,
        CleanOption::Stopwords,
        CleanOption::Lemmatizer,
        CleanOption::Stemmer,
    ];

    pub fn id(self) -> &'static str {
        match self {
            CleanOption::Emails => "emails",
            CleanOption::Urls => "urls",
            CleanOption::Emoticons => "emoticons",
            CleanOption::RepeatingVowels => "repeating_vowels",
            CleanOption::Punctuation => "punctuation",
            CleanOption::Lowercase => "lowercase",
            CleanOption::Stopwords => "stopwords",
            CleanOption::Lemmatizer => "lemmatizer",
            CleanOption::Stemmer => "stemmer",
        }
    }
}

impl fmt::Display for CleanOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Accepts the id in any case, so `urls`, `URLS` and `Urls` all resolve.
impl FromStr for CleanOption {
    type Err = HarnessError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        CleanOption::ALL
            .into_iter()
            .find(|opt| opt.id() == wanted)
            .ok_or_else(|| HarnessError::Configuration(format!("unknown cleaning option '{s}'")))
    }
}

impl TryFrom<String> for CleanOption {
    type Error = HarnessError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<CleanOption> for String {
    fn from(opt: CleanOption) -> Self {
        opt.id().to_string()
    }
}

// ---------------------------------------------------------------------------
// Configuration – the chosen subset of options for one run
// ---------------------------------------------------------------------------

/// An immutable set of enabled options. Order and duplicates in the source
/// do not matter; the normalizer applies options in its own fixed order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Configuration {
    enabled: BTreeSet<CleanOption>,
}

impl Configuration {
    /// The empty configuration. Cleaning with it is the identity.
    pub fn none() -> Self {
        Self::default()
    }

    /// Every registered option enabled.
    pub fn all() -> Self {
        CleanOption::ALL.into_iter().collect()
    }

    /// Parse a list of option ids, rejecting any id that is not registered.
    pub fn from_ids<I, S>(ids: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        ids.into_iter()
            .map(|id| id.as_ref().parse::<CleanOption>())
            .collect()
    }

    pub fn contains(&self, option: CleanOption) -> bool {
        self.enabled.contains(&option)
    }

    pub fn is_empty(&self) -> bool {
        self.enabled.is_empty()
    }

    pub fn len(&self) -> usize {
        self.enabled.len()
    }

    /// Enabled options in pipeline order.
    pub fn iter(&self) -> impl Iterator<Item = CleanOption> + '_ {
        self.enabled.iter().copied()
    }
}

impl FromIterator<CleanOption> for Configuration {
    fn from_iter<T: IntoIterator<Item = CleanOption>>(iter: T) -> Self {
        Configuration {
            enabled: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.enabled.is_empty() {
            return f.write_str("<none>");
        }
        let ids: Vec<&str> = self.iter().map(CleanOption::id).collect();
        f.write_str(&ids.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique_and_round_trip() {
        let ids: BTreeSet<&str> = CleanOption::ALL.iter().map(|o| o.id()).collect();
        assert_eq!(ids.len(), CleanOption::ALL.len());
        for opt in CleanOption::ALL {
            assert_eq!(opt.id().parse::<CleanOption>().unwrap(), opt);
        }
    }

    #[test]
    fn parsing_ignores_case() {
        assert_eq!("REPEATING_VOWELS".parse::<CleanOption>().unwrap(), CleanOption::RepeatingVowels);
        assert_eq!(" Urls ".parse::<CleanOption>().unwrap(), CleanOption::Urls);
    }

    #[test]
    fn unknown_option_is_a_configuration_error() {
        let err = Configuration::from_ids(["urls", "hashtags"]).unwrap_err();
        assert!(matches!(err, HarnessError::Configuration(msg) if msg.contains("hashtags")));
    }

    #[test]
    fn configuration_is_a_set() {
        let a = Configuration::from_ids(["urls", "emails", "urls"]).unwrap();
        let b = Configuration::from_ids(["emails", "urls"]).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 2);
        assert!(a.contains(CleanOption::Urls));
        assert!(!a.contains(CleanOption::Stopwords));
    }

    #[test]
    fn iteration_follows_pipeline_order() {
        let config = Configuration::from_ids(["stopwords", "emails", "punctuation"]).unwrap();
        let order: Vec<CleanOption> = config.iter().collect();
        assert_eq!(
            order,
            vec![CleanOption::Emails, CleanOption::Punctuation, CleanOption::Stopwords]
        );
        assert_eq!(config.to_string(), "emails,punctuation,stopwords");
    }

    #[test]
    fn deserializes_from_ids() {
        let opts: Vec<CleanOption> = serde_json::from_str(r#"["urls", "LEMMATIZER"]"#).unwrap();
        assert_eq!(opts, vec![CleanOption::Urls, CleanOption::Lemmatizer]);
        assert!(serde_json::from_str::<Vec<CleanOption>>(r#"["bogus"]"#).is_err());
    }
}
