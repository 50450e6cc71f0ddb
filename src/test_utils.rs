#[cfg(test)]
pub mod fixtures {
    use crate::models::domain::{QuizQuestion, RetrievedDocument};

    /// A two question model response: one multiple choice, one true/false.
    pub fn raw_mixed_quiz() -> String {
        [
            "1. What labels the data in supervised learning?",
            "Topic: Supervised learning",
            "Type: MULTIPLE_CHOICE",
            "A) Humans",
            "B) Nobody",
            "C) The model",
            "D) Noise",
            "Answer: A) Humans",
            "",
            "2. Is k-means supervised?",
            "Topic: Clustering",
            "Type: TRUE_FALSE",
            "Answer: False",
        ]
        .join("\n")
    }

    /// The records `raw_mixed_quiz` parses into.
    pub fn parsed_mixed_quiz() -> Vec<QuizQuestion> {
        vec![
            QuizQuestion {
                question_type: "MULTIPLE_CHOICE".to_string(),
                question: "What labels the data in supervised learning?".to_string(),
                topics: "Supervised learning".to_string(),
                choices: "Humans, Nobody, The model, Noise".to_string(),
                answer: "Humans".to_string(),
            },
            QuizQuestion {
                question_type: "TRUE_FALSE".to_string(),
                question: "Is k-means supervised?".to_string(),
                topics: "Clustering".to_string(),
                choices: String::new(),
                answer: "False".to_string(),
            },
        ]
    }

    pub fn corpus_documents() -> Vec<RetrievedDocument> {
        vec![
            RetrievedDocument::new("Supervised learning trains on labeled examples.")
                .with_source("lecture-02.md")
                .with_score(2.5),
            RetrievedDocument::new("k-means groups unlabeled points into clusters.")
                .with_source("lecture-05.md")
                .with_score(1.1),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use crate::services::quiz_parser::parse_quiz;

    #[test]
    fn test_fixtures_raw_quiz_has_two_blocks() {
        assert_eq!(raw_mixed_quiz().split("\n\n").count(), 2);
    }

    #[test]
    fn test_fixtures_raw_quiz_parses_to_expected_records() {
        assert_eq!(parse_quiz(&raw_mixed_quiz()).questions, parsed_mixed_quiz());
    }

    #[test]
    fn test_fixtures_corpus_documents_are_ranked() {
        let documents = corpus_documents();
        assert_eq!(documents.len(), 2);
        assert!(documents[0].score > documents[1].score);
    }
}
