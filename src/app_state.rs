use std::sync::Arc;

use crate::{
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::MongoCorpusRepository,
    services::{
        quiz_generation_service::{QuizGenerationService, QuizGenerationSettings},
        retrieval_service::SearchMode,
        sanitizer::ProfanityFilter,
        text_generation_service::OpenAiTextGenerator,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub quiz_generation_service: Arc<QuizGenerationService>,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        config.validate()?;
        let settings = generation_settings(&config)?;

        let db = Database::connect(&config).await?;
        let corpus_repository = Arc::new(MongoCorpusRepository::new(&db, &config.corpus_collection));
        corpus_repository.ensure_indexes().await?;
        log::info!(
            "Using corpus collection '{}' in '{}'",
            config.corpus_collection,
            db.db_name()
        );

        let sanitizer = Arc::new(ProfanityFilter::with_extra_words(&config.profanity_extra_words)?);
        let generator = Arc::new(OpenAiTextGenerator::new(&config));

        let quiz_generation_service = Arc::new(QuizGenerationService::new(
            sanitizer,
            corpus_repository,
            generator,
            settings,
        ));

        Ok(Self {
            quiz_generation_service,
            config: Arc::new(config),
        })
    }
}

pub fn generation_settings(config: &Config) -> AppResult<QuizGenerationSettings> {
    let search_mode: SearchMode = config.retrieval_search_mode.parse()?;

    Ok(QuizGenerationSettings {
        subject_domain: config.subject_domain.clone(),
        search_mode,
        retrieval_limit: config.retrieval_top_k,
    })
}
