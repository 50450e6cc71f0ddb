use serde::{Deserialize, Serialize};

use crate::models::domain::quiz_question::QuizQuestion;

/// Parsed quiz. Questions keep the order their blocks had in the model output.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Quiz {
    pub questions: Vec<QuizQuestion>,
}

impl Quiz {
    pub fn new(questions: Vec<QuizQuestion>) -> Self {
        Quiz { questions }
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn degraded_count(&self) -> usize {
        self.questions.iter().filter(|q| q.is_degraded()).count()
    }
}
