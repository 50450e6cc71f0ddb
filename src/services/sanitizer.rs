use regex::{Regex, RegexBuilder};

#[cfg(test)]
use mockall::automock;

use crate::errors::{AppError, AppResult};

pub const CENSOR_MASK: &str = "****";

const PATTERN_SIZE_LIMIT: usize = 1 << 20;

const DEFAULT_BANNED_WORDS: &[&str] = &[
    "arse",
    "arsehole",
    "ass",
    "asshole",
    "bastard",
    "bitch",
    "bollocks",
    "bullshit",
    "crap",
    "cunt",
    "damn",
    "dick",
    "dickhead",
    "fuck",
    "fucker",
    "fucking",
    "motherfucker",
    "piss",
    "prick",
    "shit",
    "slut",
    "twat",
    "wanker",
    "whore",
];

/// Replaces disallowed words in user supplied text. Never rejects input.
#[cfg_attr(test, automock)]
pub trait Sanitizer: Send + Sync {
    fn censor(&self, text: &str) -> String;
}

pub struct ProfanityFilter {
    pattern: Option<Regex>,
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// `\b` only guards an edge that is itself a word character; a `\b` next to
/// punctuation such as the `+` in `c++` could never match.
fn word_pattern(word: &str) -> String {
    let leading = word.chars().next().is_some_and(is_word_char);
    let trailing = word.chars().last().is_some_and(is_word_char);

    format!(
        "{}{}{}",
        if leading { r"\b" } else { "" },
        regex::escape(word),
        if trailing { r"\b" } else { "" }
    )
}

impl ProfanityFilter {
    pub fn new<I, S>(words: I) -> AppResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut words: Vec<String> = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_lowercase())
            .filter(|w| !w.is_empty())
            .collect();

        if words.is_empty() {
            return Ok(Self { pattern: None });
        }

        // Longest first so "fucking" is not cut short by "fuck".
        words.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        words.dedup();

        let alternatives: Vec<String> = words.iter().map(|w| word_pattern(w)).collect();

        let pattern = RegexBuilder::new(&alternatives.join("|"))
            .case_insensitive(true)
            .size_limit(PATTERN_SIZE_LIMIT)
            .build()
            .map_err(|e| {
                AppError::ConfigError(format!(
                    "Profanity word list ({} words) cannot be compiled: {}",
                    words.len(),
                    e
                ))
            })?;

        Ok(Self {
            pattern: Some(pattern),
        })
    }

    /// Built-in list plus any configured extras.
    pub fn with_extra_words(extra: &[String]) -> AppResult<Self> {
        Self::new(
            DEFAULT_BANNED_WORDS
                .iter()
                .map(|w| w.to_string())
                .chain(extra.iter().cloned()),
        )
    }
}

impl Sanitizer for ProfanityFilter {
    fn censor(&self, text: &str) -> String {
        match &self.pattern {
            Some(pattern) => pattern.replace_all(text, CENSOR_MASK).into_owned(),
            None => text.to_string(),
        }
    }
}
