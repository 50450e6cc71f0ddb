use secrecy::{ExposeSecret, SecretString};
use std::env;
use std::fmt::Display;
use std::str::FromStr;

use crate::errors::{AppError, AppResult};

#[derive(Clone, Debug)]
pub struct Config {
    pub openai_api_key: SecretString,
    pub openai_api_base: String,
    pub openai_model: String,
    pub openai_temperature: f32,
    pub mongo_conn_string: String,
    pub mongo_db_name: String,
    pub corpus_collection: String,
    pub retrieval_top_k: i64,
    pub retrieval_search_mode: String,
    pub subject_domain: String,
    pub profanity_extra_words: Vec<String>,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            openai_api_key: SecretString::from(env::var("OPENAI_API_KEY").unwrap_or_default()),
            openai_api_base: env::var("OPENAI_API_BASE")
                .unwrap_or_else(|_| "https://api.openai.com/v1".to_string()),
            openai_model: env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-3.5-turbo".to_string()),
            openai_temperature: parse_or_default(
                "OPENAI_TEMPERATURE",
                env::var("OPENAI_TEMPERATURE").ok(),
                0.7,
            ),
            mongo_conn_string: env::var("MONGO_CONN_STRING")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            mongo_db_name: env::var("MONGO_DB_NAME").unwrap_or_else(|_| "quiz-local".to_string()),
            corpus_collection: env::var("CORPUS_COLLECTION")
                .unwrap_or_else(|_| "corpus".to_string()),
            retrieval_top_k: parse_or_default(
                "RETRIEVAL_TOP_K",
                env::var("RETRIEVAL_TOP_K").ok(),
                4,
            ),
            retrieval_search_mode: env::var("RETRIEVAL_SEARCH_MODE")
                .unwrap_or_else(|_| "similarity".to_string()),
            subject_domain: env::var("QUIZ_SUBJECT_DOMAIN")
                .unwrap_or_else(|_| "machine learning course".to_string()),
            profanity_extra_words: env::var("PROFANITY_EXTRA_WORDS")
                .map(|words| parse_word_list(&words))
                .unwrap_or_default(),
        }
    }

    /// Checks settings that would otherwise only fail on the first model call.
    pub fn validate(&self) -> AppResult<()> {
        if self.openai_api_key.expose_secret().trim().is_empty() {
            return Err(AppError::ConfigError(
                "OPENAI_API_KEY is not set".to_string(),
            ));
        }

        if !(0.0..=2.0).contains(&self.openai_temperature) {
            return Err(AppError::ConfigError(format!(
                "OPENAI_TEMPERATURE must be between 0 and 2, got {}",
                self.openai_temperature
            )));
        }

        if self.retrieval_top_k < 1 {
            return Err(AppError::ConfigError(format!(
                "RETRIEVAL_TOP_K must be positive, got {}",
                self.retrieval_top_k
            )));
        }

        Ok(())
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            openai_api_key: SecretString::from("sk-test".to_string()),
            openai_api_base: "http://localhost:8089/v1".to_string(),
            openai_model: "gpt-3.5-turbo".to_string(),
            openai_temperature: 0.7,
            mongo_conn_string: "mongodb://localhost:27017".to_string(),
            mongo_db_name: "quiz-test".to_string(),
            corpus_collection: "corpus".to_string(),
            retrieval_top_k: 4,
            retrieval_search_mode: "similarity".to_string(),
            subject_domain: "machine learning course".to_string(),
            profanity_extra_words: Vec::new(),
        }
    }
}

/// Unset keeps the default silently; a value that does not parse is logged
/// so a typo does not go unnoticed.
fn parse_or_default<T>(key: &str, raw: Option<String>, default: T) -> T
where
    T: FromStr + Display,
{
    let Some(raw) = raw else {
        return default;
    };

    match raw.trim().parse() {
        Ok(value) => value,
        Err(_) => {
            log::warn!(
                "{} has unparseable value {:?}, using default {}",
                key,
                raw,
                default
            );
            default
        }
    }
}

fn parse_word_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}
