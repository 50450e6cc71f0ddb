use std::{fmt, str::FromStr};

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use crate::{
    errors::{AppError, AppResult},
    models::domain::RetrievedDocument,
};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SearchMode {
    /// Top `k` passages by relevance score.
    Similarity,
    /// Top `k` passages, dropping any scored below the threshold.
    ScoreThreshold(f64),
}

impl SearchMode {
    pub fn admits(&self, score: Option<f64>) -> bool {
        match self {
            SearchMode::Similarity => true,
            SearchMode::ScoreThreshold(threshold) => score.is_some_and(|s| s >= *threshold),
        }
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchMode::Similarity => write!(f, "similarity"),
            SearchMode::ScoreThreshold(threshold) => {
                write!(f, "similarity_score_threshold:{}", threshold)
            }
        }
    }
}

impl FromStr for SearchMode {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        if value.eq_ignore_ascii_case("similarity") {
            return Ok(SearchMode::Similarity);
        }

        if let Some(threshold) = value.strip_prefix("similarity_score_threshold:") {
            return threshold
                .trim()
                .parse::<f64>()
                .map(SearchMode::ScoreThreshold)
                .map_err(|_| {
                    AppError::ConfigError(format!("Invalid score threshold '{}'", threshold))
                });
        }

        Err(AppError::ConfigError(format!(
            "Unknown search mode '{}'",
            value
        )))
    }
}

/// Similarity search over a pre-built text corpus.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait RetrievalService: Send + Sync {
    async fn search(
        &self,
        query: &str,
        mode: SearchMode,
        limit: i64,
    ) -> AppResult<Vec<RetrievedDocument>>;
}

/// Retrieval context scoped to one query, handed to the text generator.
#[derive(Debug, Clone, PartialEq)]
pub struct Retriever {
    query: String,
    mode: SearchMode,
    documents: Vec<RetrievedDocument>,
}

impl Retriever {
    pub fn from_search(
        query: impl Into<String>,
        mode: SearchMode,
        documents: Vec<RetrievedDocument>,
    ) -> Self {
        Self {
            query: query.into(),
            mode,
            documents,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    pub fn documents(&self) -> &[RetrievedDocument] {
        &self.documents
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Document contents separated by blank lines, in retrieval order.
    pub fn context(&self) -> String {
        self.documents
            .iter()
            .map(|doc| doc.content.trim())
            .filter(|content| !content.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}
