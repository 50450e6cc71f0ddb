use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::{
    bson::doc,
    options::{FindOptions, IndexOptions},
    Collection, IndexModel,
};

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::domain::RetrievedDocument,
    services::retrieval_service::{RetrievalService, SearchMode},
};

const TEXT_INDEX_NAME: &str = "content_text";

/// Course corpus stored one passage per document, ranked with MongoDB's
/// `$text` relevance score.
pub struct MongoCorpusRepository {
    collection: Collection<RetrievedDocument>,
}

impl MongoCorpusRepository {
    pub fn new(db: &Database, collection_name: &str) -> Self {
        let collection = db.get_collection(collection_name);
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating text index for corpus collection");

        let text_index = IndexModel::builder()
            .keys(doc! { "content": "text" })
            .options(
                IndexOptions::builder()
                    .name(TEXT_INDEX_NAME.to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(text_index).await?;

        log::info!("Successfully created text index for corpus collection");
        Ok(())
    }
}

#[async_trait]
impl RetrievalService for MongoCorpusRepository {
    async fn search(
        &self,
        query: &str,
        mode: SearchMode,
        limit: i64,
    ) -> AppResult<Vec<RetrievedDocument>> {
        if limit < 1 {
            return Err(AppError::RetrievalError(format!(
                "Search limit must be positive, got {}",
                limit
            )));
        }

        let filter = doc! { "$text": { "$search": query } };
        let find_options = FindOptions::builder()
            .projection(doc! { "_id": 0, "content": 1, "source": 1, "score": { "$meta": "textScore" } })
            .sort(doc! { "score": { "$meta": "textScore" } })
            .limit(Some(limit))
            .build();

        let cursor = self.collection.find(filter).with_options(find_options).await?;
        let documents: Vec<RetrievedDocument> = cursor.try_collect().await?;

        let documents: Vec<RetrievedDocument> = documents
            .into_iter()
            .filter(|document| mode.admits(document.score))
            .collect();

        log::debug!(
            "Corpus search ({}) for '{}' returned {} documents",
            mode,
            query,
            documents.len()
        );

        Ok(documents)
    }
}
