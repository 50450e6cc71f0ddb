use serde::Deserialize;
use validator::Validate;

/// Parameters for one quiz generation call. Only lower bounds are checked;
/// callers own any upper limit on `question_count`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct QuizRequest {
    #[validate(range(min = 1, message = "question_count must be positive"))]
    pub question_count: u32,

    #[validate(length(min = 1, message = "types cannot be empty"))]
    pub types: String,

    #[validate(length(min = 1, message = "topics cannot be empty"))]
    pub topics: String,
}

impl QuizRequest {
    pub fn new(question_count: u32, types: &str, topics: &str) -> Self {
        Self {
            question_count,
            types: types.to_string(),
            topics: topics.to_string(),
        }
    }
}
