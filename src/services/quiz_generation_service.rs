use std::sync::Arc;

use validator::Validate;

use crate::{
    constants::quiz_prompt::{
        build_quiz_instruction, QUIZ_AUDIENCE, QUIZ_GENERATOR_DESCRIPTION, QUIZ_GENERATOR_NAME,
    },
    errors::AppResult,
    models::{domain::Quiz, dto::QuizRequest},
    services::{
        quiz_parser::parse_quiz,
        retrieval_service::{RetrievalService, Retriever, SearchMode},
        sanitizer::Sanitizer,
        text_generation_service::TextGenerationService,
    },
};

#[derive(Debug, Clone)]
pub struct QuizGenerationSettings {
    pub subject_domain: String,
    pub search_mode: SearchMode,
    pub retrieval_limit: i64,
}

impl Default for QuizGenerationSettings {
    fn default() -> Self {
        Self {
            subject_domain: "machine learning course".to_string(),
            search_mode: SearchMode::Similarity,
            retrieval_limit: 4,
        }
    }
}

/// Sanitize, retrieve, generate, parse. Each step runs once per request and
/// collaborator failures are returned as-is without retrying.
pub struct QuizGenerationService {
    sanitizer: Arc<dyn Sanitizer>,
    retrieval: Arc<dyn RetrievalService>,
    generator: Arc<dyn TextGenerationService>,
    settings: QuizGenerationSettings,
}

impl QuizGenerationService {
    pub fn new(
        sanitizer: Arc<dyn Sanitizer>,
        retrieval: Arc<dyn RetrievalService>,
        generator: Arc<dyn TextGenerationService>,
        settings: QuizGenerationSettings,
    ) -> Self {
        Self {
            sanitizer,
            retrieval,
            generator,
            settings,
        }
    }

    pub async fn generate_quiz(
        &self,
        question_count: u32,
        types: &str,
        topics: &str,
    ) -> AppResult<Quiz> {
        self.generate(QuizRequest::new(question_count, types, topics))
            .await
    }

    pub async fn generate(&self, request: QuizRequest) -> AppResult<Quiz> {
        request.validate()?;

        let topics = self.sanitizer.censor(&request.topics);
        let instruction = build_quiz_instruction(
            request.question_count,
            &topics,
            &request.types,
            &self.settings.subject_domain,
        );

        log::info!(
            "{}: generating {} question quiz on '{}' ({})",
            QUIZ_GENERATOR_NAME,
            request.question_count,
            topics,
            request.types
        );

        let mode = self.settings.search_mode;
        let documents = self
            .retrieval
            .search(&topics, mode, self.settings.retrieval_limit)
            .await?;
        let retriever = Retriever::from_search(topics, mode, documents);

        if retriever.is_empty() {
            log::warn!(
                "No corpus documents matched '{}', generating without context",
                retriever.query()
            );
        }

        let raw_quiz = self
            .generator
            .respond_with_docs(
                QUIZ_GENERATOR_DESCRIPTION,
                QUIZ_AUDIENCE,
                "",
                &instruction,
                &retriever,
            )
            .await?;

        let quiz = parse_quiz(&raw_quiz);

        let degraded = quiz.degraded_count();
        if degraded > 0 {
            log::warn!(
                "{} of {} parsed questions are missing fields",
                degraded,
                quiz.len()
            );
        }
        log::info!("Parsed {} questions from model response", quiz.len());

        Ok(quiz)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        errors::AppError,
        services::{
            retrieval_service::MockRetrievalService, sanitizer::MockSanitizer,
            text_generation_service::MockTextGenerationService,
        },
        test_utils::fixtures::{corpus_documents, parsed_mixed_quiz, raw_mixed_quiz},
    };
    use mockall::{predicate::*, Sequence};

    fn service(
        sanitizer: MockSanitizer,
        retrieval: MockRetrievalService,
        generator: MockTextGenerationService,
    ) -> QuizGenerationService {
        QuizGenerationService::new(
            Arc::new(sanitizer),
            Arc::new(retrieval),
            Arc::new(generator),
            QuizGenerationSettings::default(),
        )
    }

    #[tokio::test]
    async fn test_generate_quiz_runs_each_collaborator_once_in_order() {
        let mut seq = Sequence::new();
        let mut sanitizer = MockSanitizer::new();
        let mut retrieval = MockRetrievalService::new();
        let mut generator = MockTextGenerationService::new();

        sanitizer
            .expect_censor()
            .with(eq("Supervised damn learning"))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| "Supervised **** learning".to_string());

        retrieval
            .expect_search()
            .with(eq("Supervised **** learning"), eq(SearchMode::Similarity), eq(4i64))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _, _| Ok(corpus_documents()));

        generator
            .expect_respond_with_docs()
            .withf(|description, audience, extra, prompt, retriever| {
                description == QUIZ_GENERATOR_DESCRIPTION
                    && audience == QUIZ_AUDIENCE
                    && extra.is_empty()
                    && prompt.starts_with("Make a quiz with exactly 2 questions")
                    && prompt.contains("Supervised **** learning")
                    && retriever.query() == "Supervised **** learning"
                    && retriever.documents() == corpus_documents().as_slice()
            })
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _, _, _, _| Ok(raw_mixed_quiz()));

        let quiz = service(sanitizer, retrieval, generator)
            .generate_quiz(2, "multiple choice and true/false", "Supervised damn learning")
            .await
            .expect("quiz should be generated");

        assert_eq!(quiz.questions, parsed_mixed_quiz());
        assert_eq!(quiz.degraded_count(), 0);
    }

    #[tokio::test]
    async fn test_invalid_request_makes_no_external_calls() {
        let mut sanitizer = MockSanitizer::new();
        let mut retrieval = MockRetrievalService::new();
        let mut generator = MockTextGenerationService::new();
        sanitizer.expect_censor().never();
        retrieval.expect_search().never();
        generator.expect_respond_with_docs().never();

        let err = service(sanitizer, retrieval, generator)
            .generate_quiz(0, "coding", "Neural networks")
            .await
            .unwrap_err();

        assert_eq!(err.error_code(), "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_generation_failure_propagates_unchanged() {
        let mut sanitizer = MockSanitizer::new();
        let mut retrieval = MockRetrievalService::new();
        let mut generator = MockTextGenerationService::new();
        sanitizer
            .expect_censor()
            .returning(|text| text.to_string());
        retrieval
            .expect_search()
            .returning(|_, _, _| Ok(Vec::new()));
        generator
            .expect_respond_with_docs()
            .times(1)
            .returning(|_, _, _, _, _| Err(AppError::GenerationError("rate limited".to_string())));

        let err = service(sanitizer, retrieval, generator)
            .generate_quiz(3, "coding", "Neural networks")
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Generation error: rate limited");
    }

    #[tokio::test]
    async fn test_retrieval_failure_skips_generation() {
        let mut sanitizer = MockSanitizer::new();
        let mut retrieval = MockRetrievalService::new();
        let mut generator = MockTextGenerationService::new();
        sanitizer
            .expect_censor()
            .returning(|text| text.to_string());
        retrieval
            .expect_search()
            .times(1)
            .returning(|_, _, _| Err(AppError::DatabaseError("connection refused".to_string())));
        generator.expect_respond_with_docs().never();

        let err = service(sanitizer, retrieval, generator)
            .generate_quiz(3, "coding", "Neural networks")
            .await
            .unwrap_err();

        assert!(err.is_upstream());
    }

    #[tokio::test]
    async fn test_malformed_response_degrades_instead_of_failing() {
        let mut sanitizer = MockSanitizer::new();
        let mut retrieval = MockRetrievalService::new();
        let mut generator = MockTextGenerationService::new();
        sanitizer
            .expect_censor()
            .returning(|text| text.to_string());
        retrieval
            .expect_search()
            .returning(|_, _, _| Ok(Vec::new()));
        generator
            .expect_respond_with_docs()
            .returning(|_, _, _, _, _| Ok("I cannot make a quiz about that.".to_string()));

        let quiz = service(sanitizer, retrieval, generator)
            .generate_quiz(3, "coding", "Cooking")
            .await
            .expect("malformed text is not an error");

        assert_eq!(quiz.questions.len(), 1);
        assert_eq!(quiz.degraded_count(), 1);
    }

    #[tokio::test]
    async fn test_settings_control_domain_and_retrieval() {
        let mut sanitizer = MockSanitizer::new();
        let mut retrieval = MockRetrievalService::new();
        let mut generator = MockTextGenerationService::new();
        sanitizer
            .expect_censor()
            .returning(|text| text.to_string());
        retrieval
            .expect_search()
            .with(eq("Joins"), eq(SearchMode::ScoreThreshold(0.5)), eq(2i64))
            .times(1)
            .returning(|_, _, _| Ok(Vec::new()));
        generator
            .expect_respond_with_docs()
            .withf(|_, _, _, prompt, _| prompt.ends_with("relevant to a databases course."))
            .returning(|_, _, _, _, _| Ok(String::new()));

        let service = QuizGenerationService::new(
            Arc::new(sanitizer),
            Arc::new(retrieval),
            Arc::new(generator),
            QuizGenerationSettings {
                subject_domain: "databases course".to_string(),
                search_mode: SearchMode::ScoreThreshold(0.5),
                retrieval_limit: 2,
            },
        );

        let quiz = service
            .generate_quiz(1, "short answer", "Joins")
            .await
            .expect("quiz should be generated");

        assert_eq!(quiz.questions.len(), 1);
    }
}
