//! Text normalization into canonical bags of lemmas.
//!
//! A [`Normalizer`] strips everything that is not a word character, drops
//! purely numeric tokens and maps the rest to their base form through a
//! shared [`Lemmatizer`]. The output is a space-separated string ready for
//! TF-IDF vectorization.

#![forbid(unsafe_code)]

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use rust_stemmers::{Algorithm, Stemmer};
use thiserror::Error;

/// Stemming passes allowed beyond one per character while searching for a
/// fixed point. Suffix stripping shortens the token on every productive pass,
/// so the budget is only exhausted by stemmers that oscillate.
const EXTRA_STEM_PASSES: usize = 8;

/// Maps a single token to its dictionary base form.
///
/// Implementations are shared read-only across threads, so they must be
/// `Send + Sync` and must not depend on mutable state.
pub trait Lemmatizer: Send + Sync {
    /// Return the base form of `token`, lower-cased.
    fn lemma(&self, token: &str) -> String;
}

/// Languages supported by the bundled [`SnowballLemmatizer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    /// Russian morphology; the catalogue's native language.
    #[default]
    Russian,
    /// English morphology.
    English,
}

impl Language {
    const fn algorithm(self) -> Algorithm {
        match self {
            Self::Russian => Algorithm::Russian,
            Self::English => Algorithm::English,
        }
    }

    /// Lower-case name accepted by [`Language::from_str`].
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Russian => "russian",
            Self::English => "english",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when a language name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported language {0:?}")]
pub struct UnknownLanguage(pub String);

impl FromStr for Language {
    type Err = UnknownLanguage;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "russian" | "ru" => Ok(Self::Russian),
            "english" | "en" => Ok(Self::English),
            other => Err(UnknownLanguage(other.to_owned())),
        }
    }
}

/// Snowball-stemmer backed [`Lemmatizer`].
///
/// Stemming is repeated until the token stops changing, so the lemma of a
/// lemma is the lemma itself.
pub struct SnowballLemmatizer {
    stemmer: Stemmer,
    language: Language,
}

impl fmt::Debug for SnowballLemmatizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnowballLemmatizer")
            .field("language", &self.language)
            .finish_non_exhaustive()
    }
}

impl SnowballLemmatizer {
    /// Build a lemmatizer for `language`.
    #[must_use]
    pub fn new(language: Language) -> Self {
        Self {
            stemmer: Stemmer::create(language.algorithm()),
            language,
        }
    }

    /// Build a Russian lemmatizer.
    #[must_use]
    pub fn russian() -> Self {
        Self::new(Language::Russian)
    }

    /// Language this lemmatizer was built for.
    #[must_use]
    pub const fn language(&self) -> Language {
        self.language
    }
}

impl Lemmatizer for SnowballLemmatizer {
    fn lemma(&self, token: &str) -> String {
        let mut current = token.to_lowercase();
        let budget = current.chars().count().saturating_add(EXTRA_STEM_PASSES);
        for _ in 0..budget {
            let stemmed = self.stemmer.stem(&current);
            if stemmed.as_ref() == current.as_str() {
                break;
            }
            current = stemmed.into_owned();
        }
        current
    }
}

/// Turns free text into a canonical, space-separated string of lemmas.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use placerank_scorer::{Language, Normalizer, SnowballLemmatizer};
///
/// let normalizer = Normalizer::new(Arc::new(SnowballLemmatizer::new(Language::English)));
///
/// assert_eq!(normalizer.normalize("Museums, 1920 & parks!"), "museum park");
/// assert_eq!(normalizer.normalize(""), "");
/// ```
#[derive(Clone)]
pub struct Normalizer {
    lemmatizer: Arc<dyn Lemmatizer>,
}

impl fmt::Debug for Normalizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Normalizer").finish_non_exhaustive()
    }
}

impl Normalizer {
    /// Wrap a shared lemmatizer.
    #[must_use]
    pub fn new(lemmatizer: Arc<dyn Lemmatizer>) -> Self {
        Self { lemmatizer }
    }

    /// Build a normalizer around a Snowball lemmatizer for `language`.
    #[must_use]
    pub fn for_language(language: Language) -> Self {
        Self::new(Arc::new(SnowballLemmatizer::new(language)))
    }

    /// Normalize a single text.
    ///
    /// Lower-casing happens before word characters are selected, and each
    /// lemma is split on non-word characters again, so the output is its own
    /// normal form.
    #[must_use]
    pub fn normalize(&self, text: &str) -> String {
        let lowered = text.to_lowercase();
        word_tokens(&lowered)
            .filter(|token| !is_numeric_token(token))
            .flat_map(|token| {
                let lemma = self.lemmatizer.lemma(token);
                word_tokens(&lemma)
                    .filter(|part| !is_numeric_token(part))
                    .map(str::to_owned)
                    .collect::<Vec<_>>()
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Normalize every text, preserving order.
    #[must_use]
    pub fn normalize_all<S: AsRef<str>>(&self, texts: &[S]) -> Vec<String> {
        texts
            .iter()
            .map(|text| self.normalize(text.as_ref()))
            .collect()
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn word_tokens(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !is_word_char(c))
        .filter(|token| !token.is_empty())
}

/// Tokens made only of decimal digits. Roman numerals, fractions and other
/// numeric letters stay as words.
fn is_numeric_token(token: &str) -> bool {
    token.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use rstest::{fixture, rstest};

    use super::*;

    /// Lower-cases tokens without stemming.
    struct LowercaseLemmatizer;

    impl Lemmatizer for LowercaseLemmatizer {
        fn lemma(&self, token: &str) -> String {
            token.to_lowercase()
        }
    }

    #[fixture]
    fn plain() -> Normalizer {
        Normalizer::new(Arc::new(LowercaseLemmatizer))
    }

    #[rstest]
    #[case("Old cathedral, stone!", "old cathedral stone")]
    #[case("  spaced\tout\nwords ", "spaced out words")]
    #[case("built in 1901", "built in")]
    #[case("room 101b", "room 101b")]
    #[case("snake_case stays", "snake_case stays")]
    #[case("Кафедральный собор — 1901", "кафедральный собор")]
    #[case("", "")]
    #[case("!!! 42 ...", "")]
    #[case("Ⅻ century, ½ price", "ⅻ century ½ price")]
    fn strips_punctuation_and_numbers(
        plain: Normalizer,
        #[case] input: &str,
        #[case] expected: &str,
    ) {
        assert_eq!(plain.normalize(input), expected);
    }

    #[rstest]
    #[case(Language::English, "İstanbul")]
    #[case(Language::Russian, "İstanbul")]
    #[case(Language::English, "ΟΔΥΣΣΕΥΣ Σ")]
    #[case(Language::Russian, "Ärger İİ ǅemal")]
    fn case_expanding_letters_normalize_once(#[case] language: Language, #[case] input: &str) {
        let normalizer = Normalizer::for_language(language);
        let once = normalizer.normalize(input);

        assert!(once.chars().all(|c| c == ' ' || is_word_char(c)), "unclean: {once:?}");
        assert_eq!(normalizer.normalize(&once), once);
    }

    #[rstest]
    fn russian_inflections_collapse() {
        let normalizer = Normalizer::for_language(Language::Russian);
        assert_eq!(
            normalizer.normalize("Соборы"),
            normalizer.normalize("собор")
        );
    }

    #[rstest]
    fn english_plural_collapses() {
        let normalizer = Normalizer::for_language(Language::English);
        assert_eq!(normalizer.normalize("Museums"), "museum");
    }

    #[rstest]
    #[case("russian", Language::Russian)]
    #[case("RU", Language::Russian)]
    #[case(" English ", Language::English)]
    fn parses_language_names(#[case] name: &str, #[case] expected: Language) {
        assert_eq!(name.parse::<Language>(), Ok(expected));
    }

    #[rstest]
    fn rejects_unknown_language() {
        assert_eq!(
            "klingon".parse::<Language>(),
            Err(UnknownLanguage("klingon".into()))
        );
    }
}
