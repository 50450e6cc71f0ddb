//! Turns the free-text quiz a model returns into [`Quiz`] records.
//!
//! Expected layout, one blank-line separated block per question:
//!
//! ```text
//! 2. In supervised learning, what is the main characteristic of the training data?
//! Topic: Supervised learning
//! Type: Multiple choice
//! A) It is labeled
//! B) It is unlabeled
//! C) It contains missing values
//! D) It is not used for training
//! Answer: A) It is labeled
//! ```
//!
//! Parsing is total. Every block yields exactly one record and a field whose
//! line is missing or malformed stays an empty string.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::domain::{Quiz, QuizQuestion};

const BLOCK_SEPARATOR: &str = "\n\n";
const CHOICE_SEPARATOR: &str = ", ";

const TOPIC_MARKER: &str = "Topic: ";
const TYPE_MARKER: &str = "Type: ";
const ANSWER_MARKER: &str = "Answer: ";

static QUESTION_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\d+\.").expect("QUESTION_PATTERN is a valid regex pattern"));

static CHOICE_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-D]\) ").expect("CHOICE_PATTERN is a valid regex pattern"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind {
    Question,
    Topic,
    Type,
    Answer,
    Choice,
}

impl LineKind {
    /// First match wins, in this order. Ordinals are searched anywhere in the
    /// line, so e.g. `A) 3.5` classifies as a question line.
    fn classify(line: &str) -> Option<Self> {
        if QUESTION_PATTERN.is_match(line) {
            Some(LineKind::Question)
        } else if line.contains(TOPIC_MARKER) {
            Some(LineKind::Topic)
        } else if line.contains(TYPE_MARKER) {
            Some(LineKind::Type)
        } else if line.contains(ANSWER_MARKER) {
            Some(LineKind::Answer)
        } else if CHOICE_PATTERN.is_match(line) {
            Some(LineKind::Choice)
        } else {
            None
        }
    }
}

fn text_after<'a>(line: &'a str, separator: &str) -> Option<&'a str> {
    line.split_once(separator).map(|(_, rest)| rest)
}

/// Accumulates one block's fields before it is frozen into a [`QuizQuestion`].
#[derive(Debug, Default)]
struct QuestionBuilder {
    question: String,
    topics: String,
    question_type: String,
    choices: Vec<String>,
    answer: String,
}

impl QuestionBuilder {
    fn accept(&mut self, line: &str) {
        let Some(kind) = LineKind::classify(line) else {
            return;
        };

        match kind {
            LineKind::Question => {
                // A bare ordinal such as "3." has nothing to extract.
                if let Some(text) = text_after(line, ". ") {
                    self.question = text.to_string();
                }
            }
            LineKind::Topic => {
                if let Some(text) = text_after(line, ": ") {
                    self.topics = text.to_string();
                }
            }
            LineKind::Type => {
                if let Some(text) = text_after(line, ": ") {
                    self.question_type = text.to_string();
                }
            }
            LineKind::Answer => {
                // "Answer: B) text" keeps the choice text; free response answers
                // have no letter and fall back to everything after the colon.
                if let Some(text) = text_after(line, ") ").or_else(|| text_after(line, ": ")) {
                    self.answer = text.to_string();
                }
            }
            LineKind::Choice => {
                if let Some(text) = text_after(line, ") ") {
                    self.choices.push(text.to_string());
                }
            }
        }
    }

    fn build(self) -> QuizQuestion {
        QuizQuestion {
            question_type: self.question_type,
            question: self.question,
            topics: self.topics,
            choices: self.choices.join(CHOICE_SEPARATOR),
            answer: self.answer,
        }
    }
}

fn parse_block(block: &str) -> QuizQuestion {
    let mut builder = QuestionBuilder::default();
    for line in block.split('\n') {
        builder.accept(line);
    }
    builder.build()
}

/// Parses raw model output into a quiz. Never fails: the number of records
/// always equals the number of `"\n\n"` separated blocks in `raw`.
pub fn parse_quiz(raw: &str) -> Quiz {
    let questions = raw.split(BLOCK_SEPARATOR).map(parse_block).collect();
    Quiz::new(questions)
}
