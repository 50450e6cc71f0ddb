use serde::{Deserialize, Serialize};

/// One question parsed out of a generated quiz. Every field is kept as the
/// model wrote it; a field whose marker line was missing is an empty string.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct QuizQuestion {
    #[serde(rename = "type")]
    pub question_type: String,
    pub question: String,
    pub topics: String,
    pub choices: String, // ", " joined, empty unless multiple choice
    pub answer: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, Copy)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuestionType {
    MultipleChoice,
    TrueFalse,
    ShortAnswer,
    Coding,
}

impl QuestionType {
    pub const ALL: [QuestionType; 4] = [
        QuestionType::MultipleChoice,
        QuestionType::TrueFalse,
        QuestionType::ShortAnswer,
        QuestionType::Coding,
    ];

    pub fn tag(&self) -> &'static str {
        match self {
            QuestionType::MultipleChoice => "MULTIPLE_CHOICE",
            QuestionType::TrueFalse => "TRUE_FALSE",
            QuestionType::ShortAnswer => "SHORT_ANSWER",
            QuestionType::Coding => "CODING",
        }
    }

    /// Lenient match: "Multiple choice", "multiple-choice" and "MULTIPLE_CHOICE"
    /// all resolve to the same tag.
    pub fn from_label(label: &str) -> Option<Self> {
        let normalized: String = label
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-' | '/'))
            .map(|c| c.to_ascii_uppercase())
            .collect();

        Self::ALL
            .into_iter()
            .find(|kind| kind.tag().replace('_', "") == normalized)
    }
}

impl QuizQuestion {
    pub fn kind(&self) -> Option<QuestionType> {
        QuestionType::from_label(&self.question_type)
    }

    pub fn choice_list(&self) -> Vec<&str> {
        if self.choices.is_empty() {
            return Vec::new();
        }
        self.choices.split(", ").collect()
    }

    /// True when any marker line was absent or unparseable. `choices` is not
    /// considered since only multiple choice questions carry it.
    pub fn is_degraded(&self) -> bool {
        self.question.is_empty()
            || self.topics.is_empty()
            || self.question_type.is_empty()
            || self.answer.is_empty()
    }
}
