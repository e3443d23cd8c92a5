use std::borrow::Cow;

use regex::Regex;
use rust_stemmers::{Algorithm, Stemmer};

use super::lexicon::{self, EMO_NEG, EMO_POS};
use super::options::{CleanOption, Configuration};
use crate::error::{HarnessError, Result};

// ---------------------------------------------------------------------------
// Cleaner – the seam the parallel engine maps over
// ---------------------------------------------------------------------------

/// Anything that turns one raw review into one cleaned review.
pub trait Cleaner {
    fn clean(&self, text: &str) -> String;
}

// ---------------------------------------------------------------------------
// Normalizer – a configured, self-contained cleaning pipeline
// ---------------------------------------------------------------------------

/// Applies the enabled options of a [`Configuration`] in a fixed order:
///
/// 1. emails removed
/// 2. urls removed
/// 3. emoticons → `EMO_POS` / `EMO_NEG`
/// 4. vowel runs longer than two capped at two (`soooo` → `soo`)
/// 5. punctuation removed (underscores are word characters and survive)
/// 6. lowercase
/// 7. stopwords dropped
/// 8. plural nouns lemmatized
/// 9. snowball stemming
///
/// Steps 7–9 operate on whitespace-separated tokens and rejoin them with a
/// single space. Earlier steps leave whitespace untouched. Steps 8 and 9 keep
/// the token's casing (`Books` → `Book`, `LOVED` → `LOVE`); only step 6
/// lower-cases.
///
/// Each instance owns its compiled patterns, so building a new normalizer for
/// a different configuration never affects one already in use.
pub struct Normalizer {
    config: Configuration,
    email: Option<Regex>,
    url: Option<Regex>,
    emoticons: Option<(Regex, Regex)>,
    punctuation: Option<Regex>,
    stemmer: Option<Stemmer>,
}

impl Normalizer {
    /// Build the resources required by `config`. Options that are not enabled
    /// cost nothing.
    pub fn new(config: &Configuration) -> Result<Self> {
        let wants = |opt| config.contains(opt);

        let email = wants(CleanOption::Emails)
            .then(|| compile(lexicon::EMAIL_PATTERN))
            .transpose()?;
        let url = wants(CleanOption::Urls)
            .then(|| compile(lexicon::URL_PATTERN))
            .transpose()?;
        let emoticons = if wants(CleanOption::Emoticons) {
            Some((
                compile(lexicon::POSITIVE_EMOTICON_PATTERN)?,
                compile(lexicon::NEGATIVE_EMOTICON_PATTERN)?,
            ))
        } else {
            None
        };
        let punctuation = wants(CleanOption::Punctuation)
            .then(|| compile(lexicon::PUNCTUATION_PATTERN))
            .transpose()?;
        let stemmer = wants(CleanOption::Stemmer).then(|| Stemmer::create(Algorithm::English));

        Ok(Normalizer {
            config: config.clone(),
            email,
            url,
            emoticons,
            punctuation,
            stemmer,
        })
    }

    pub fn configuration(&self) -> &Configuration {
        &self.config
    }

    fn token_stage_enabled(&self) -> bool {
        self.config.contains(CleanOption::Stopwords)
            || self.config.contains(CleanOption::Lemmatizer)
            || self.stemmer.is_some()
    }

    fn clean_tokens(&self, text: &str) -> String {
        let drop_stopwords = self.config.contains(CleanOption::Stopwords);
        let lemmatize = self.config.contains(CleanOption::Lemmatizer);

        let tokens: Vec<String> = text
            .split_whitespace()
            .filter(|tok| !(drop_stopwords && lexicon::is_stopword(tok)))
            .map(|tok| {
                let tok = if lemmatize { lemmatize_noun(tok) } else { Cow::Borrowed(tok) };
                match &self.stemmer {
                    Some(stemmer) => stem(stemmer, &tok).into_owned(),
                    None => tok.into_owned(),
                }
            })
            .collect();
        tokens.join(" ")
    }
}

impl Cleaner for Normalizer {
    fn clean(&self, text: &str) -> String {
        if self.config.is_empty() || text.is_empty() {
            return text.to_string();
        }

        let mut out: Cow<'_, str> = Cow::Borrowed(text);

        if let Some(re) = &self.email {
            out = Cow::Owned(re.replace_all(&out, "").into_owned());
        }
        if let Some(re) = &self.url {
            out = Cow::Owned(re.replace_all(&out, "").into_owned());
        }
        if let Some((positive, negative)) = &self.emoticons {
            let replaced = positive.replace_all(&out, format!(" {EMO_POS} ").as_str()).into_owned();
            out = Cow::Owned(negative.replace_all(&replaced, format!(" {EMO_NEG} ").as_str()).into_owned());
        }
        if self.config.contains(CleanOption::RepeatingVowels) {
            out = Cow::Owned(collapse_repeating_vowels(&out));
        }
        if let Some(re) = &self.punctuation {
            out = Cow::Owned(re.replace_all(&out, "").into_owned());
        }
        if self.config.contains(CleanOption::Lowercase) {
            out = Cow::Owned(out.to_lowercase());
        }
        if self.token_stage_enabled() {
            out = Cow::Owned(self.clean_tokens(&out));
        }

        out.into_owned()
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern)
        .map_err(|e| HarnessError::Configuration(format!("bad cleaning pattern {pattern:?}: {e}")))
}

// ---------------------------------------------------------------------------
// Individual transforms
// ---------------------------------------------------------------------------

fn is_vowel(c: char) -> bool {
    matches!(c, 'a' | 'e' | 'i' | 'o' | 'u')
}

/// Cap every run of one repeated vowel at two characters. Case is ignored when
/// detecting the run; the kept characters retain their original case.
pub fn collapse_repeating_vowels(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut run: Option<char> = None;
    let mut run_len = 0usize;

    for c in text.chars() {
        let lower = c.to_ascii_lowercase();
        if is_vowel(lower) && run == Some(lower) {
            run_len += 1;
        } else {
            run = is_vowel(lower).then_some(lower);
            run_len = 1;
        }
        if run_len <= 2 {
            out.push(c);
        }
    }
    out
}

/// Reduce a plural noun to its singular form, keeping the token's casing.
/// Tokens that are not purely alphabetic (numbers, `EMO_POS`, leftover
/// punctuation) pass through.
pub fn lemmatize_noun(token: &str) -> Cow<'_, str> {
    if token.is_empty() || !token.chars().all(char::is_alphabetic) {
        return Cow::Borrowed(token);
    }
    let lower = token.to_lowercase();

    if let Some(lemma) = lexicon::IRREGULAR_LEMMAS.get(lower.as_str()) {
        return Cow::Owned(restore_case(token, lemma));
    }
    if lower.chars().count() <= 3
        || lexicon::SINGULAR_S_WORDS.contains(lower.as_str())
        || lower.ends_with("ss")
        || lower.ends_with("us")
        || lower.ends_with("is")
    {
        return Cow::Borrowed(token);
    }

    let lemma = if lower.len() > 4 && lower.ends_with("ies") {
        format!("{}y", &lower[..lower.len() - 3])
    } else if ["sses", "shes", "ches", "xes", "zzes"]
        .iter()
        .any(|suffix| lower.ends_with(suffix))
    {
        lower[..lower.len() - 2].to_string()
    } else if lower.ends_with('s') {
        lower[..lower.len() - 1].to_string()
    } else {
        return Cow::Borrowed(token);
    };
    Cow::Owned(restore_case(token, &lemma))
}

fn stem<'a>(stemmer: &Stemmer, token: &'a str) -> Cow<'a, str> {
    if token.is_empty() || !token.chars().all(char::is_alphabetic) {
        return Cow::Borrowed(token);
    }
    Cow::Owned(restore_case(token, &stemmer.stem(&token.to_lowercase())))
}

/// Re-apply the casing of `original` to its lower-case `reduced` form.
/// Characters shared with the original keep their case; replaced or appended
/// ones are upper-cased only when the whole original was upper case.
fn restore_case(original: &str, reduced: &str) -> String {
    if !original.chars().any(char::is_uppercase) {
        return reduced.to_string();
    }
    let shouting = original.chars().all(char::is_uppercase);
    let mut source = original.chars();
    let mut out = String::with_capacity(reduced.len());
    for c in reduced.chars() {
        match source.next() {
            Some(o) if o.to_lowercase().eq(c.to_lowercase()) => out.push(o),
            _ if shouting => out.extend(c.to_uppercase()),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalizer(ids: &[&str]) -> Normalizer {
        Normalizer::new(&Configuration::from_ids(ids).unwrap()).unwrap()
    }

    #[test]
    fn empty_configuration_is_identity() {
        let n = normalizer(&[]);
        for text in ["", "  ", "Great!! loved it :) http://x.com", "ünïcødé\u{0}\t\n"] {
            assert_eq!(n.clean(text), text);
        }
    }

    #[test]
    fn empty_input_stays_empty_for_every_option() {
        let all = Normalizer::new(&Configuration::all()).unwrap();
        assert_eq!(all.clean(""), "");
        for opt in CleanOption::ALL {
            let n = Normalizer::new(&[opt].into_iter().collect()).unwrap();
            assert_eq!(n.clean(""), "", "option {opt}");
            let _ = n.clean("   \t ");
        }
    }

    #[test]
    fn removes_emails_before_urls() {
        let n = normalizer(&["emails", "urls"]);
        assert_eq!(
            n.clean("mail me at jo.doe@example.co.uk or see www.example.com now"),
            "mail me at  or see  now"
        );
    }

    #[test]
    fn url_stripping_is_idempotent() {
        let n = normalizer(&["urls"]);
        let once = n.clean("loved it https://x.com/a?b=1 and http://y.org");
        assert_eq!(n.clean(&once), once);
        assert!(!once.contains("http"));
    }

    #[test]
    fn emoticons_become_canonical_tokens() {
        let n = normalizer(&["emoticons"]);
        let out = n.clean("great :) but sad :(");
        assert!(out.contains(EMO_POS));
        assert!(out.contains(EMO_NEG));
        assert!(!out.contains(":)"));
    }

    #[test]
    fn emoticon_tokens_survive_punctuation_stripping() {
        let n = normalizer(&["emoticons", "punctuation"]);
        let tokens: Vec<String> = n.clean("fun!!! :D").split_whitespace().map(String::from).collect();
        assert_eq!(tokens, vec!["fun", EMO_POS]);
    }

    #[test]
    fn vowel_runs_are_capped_at_two() {
        assert_eq!(collapse_repeating_vowels("soooo goooood"), "soo good");
        assert_eq!(collapse_repeating_vowels("soo"), "soo");
        assert_eq!(collapse_repeating_vowels("yesss"), "yesss");
        assert_eq!(collapse_repeating_vowels("NOOoo"), "NOO");
        let once = collapse_repeating_vowels("Whyyy sooooo baaad");
        assert_eq!(collapse_repeating_vowels(&once), once);
    }

    #[test]
    fn punctuation_then_lowercase() {
        let n = normalizer(&["punctuation", "lowercase"]);
        assert_eq!(n.clean("Great!! Don't BUY."), "great dont buy");
    }

    #[test]
    fn stopwords_are_dropped_and_tokens_rejoined() {
        let n = normalizer(&["stopwords"]);
        assert_eq!(n.clean("This is  the BEST movie of   the year"), "BEST movie year");
    }

    #[test]
    fn lemmatizer_singularizes_nouns() {
        assert_eq!(lemmatize_noun("movies"), "movie");
        assert_eq!(lemmatize_noun("boxes"), "box");
        assert_eq!(lemmatize_noun("children"), "child");
        assert_eq!(lemmatize_noun("books"), "book");
        assert_eq!(lemmatize_noun("class"), "class");
        assert_eq!(lemmatize_noun("this"), "this");
        assert_eq!(lemmatize_noun("EMO_POS"), "EMO_POS");
        assert_eq!(lemmatize_noun("42s"), "42s");
    }

    #[test]
    fn stemmer_reduces_inflections() {
        let n = normalizer(&["stemmer"]);
        assert_eq!(n.clean("loved running"), "love run");
    }

    #[test]
    fn token_steps_keep_casing_without_lowercase() {
        assert_eq!(lemmatize_noun("Books"), "Book");
        assert_eq!(lemmatize_noun("BOOKS"), "BOOK");
        assert_eq!(lemmatize_noun("Children"), "Child");
        assert_eq!(lemmatize_noun("PARTIES"), "PARTY");
        assert_eq!(lemmatize_noun("Parties"), "Party");

        let n = normalizer(&["lemmatizer", "stemmer"]);
        assert_eq!(n.clean("Loved BOOKS"), "Love BOOK");
        let lowered = normalizer(&["lowercase", "lemmatizer"]);
        assert_eq!(lowered.clean("Loved the MOVIES"), "loved the movie");
    }

    #[test]
    fn email_inside_url_leaves_no_bare_scheme() {
        let n = normalizer(&["emails", "urls"]);
        assert_eq!(n.clean("see http://user@host.com now"), "see  now");
        assert_eq!(n.clean("or HTTPS://a@b.org"), "or ");
    }

    #[test]
    fn full_pipeline_on_review() {
        let n = Normalizer::new(&Configuration::from_ids([
            "emails", "emoticons", "lemmatizer", "punctuation", "repeating_vowels",
            "stopwords", "urls", "lowercase",
        ]).unwrap())
        .unwrap();
        let out = n.clean("Great!! The books were soooo good :) see http://x.com or a@b.com");
        assert_eq!(out, "great book soo good emo_pos see");
    }

    #[test]
    fn unrecognized_characters_pass_through() {
        let n = normalizer(&["urls", "emails", "repeating_vowels"]);
        assert_eq!(n.clean("日本語 ✓ \u{FFFD}"), "日本語 ✓ \u{FFFD}");
    }
}
