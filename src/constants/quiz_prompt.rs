use crate::models::domain::QuestionType;

pub const QUIZ_GENERATOR_NAME: &str = "Quiz Generation AI";

pub const QUIZ_GENERATOR_DESCRIPTION: &str = "Quiz Generation AI helps students learn by generating quizzes for students to evaluate their understanding. ### Instructions: You will be given the number of quiz questions, topics the quiz must cover, and types of the quiz questions (i.e. multiple choice, multiple choice and free response, etc.) to generate a quiz with.";

pub const QUIZ_AUDIENCE: &str = "miscellaneous student";

/// Builds the user instruction for one quiz. The layout it asks for is the one
/// `services::quiz_parser` reads back.
pub fn build_quiz_instruction(
    question_count: u32,
    topics: &str,
    types: &str,
    subject_domain: &str,
) -> String {
    let type_tags = QuestionType::ALL
        .iter()
        .map(|kind| kind.tag())
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "Make a quiz with exactly {question_count} questions, the following question topics: {topics} and the following types of questions: {types}.\
\n\nStart immediately with question 1 and no other unnecessary text like a quiz title.\
\n\nNext to each question, list the question topic and type of question once, i.e.: \"5. Here is a question.\nTopic: topic1\nType: MULTIPLE_CHOICE\". Types must be one of the following: {type_tags}.\
\n\nFor multiple choice questions, list exactly four answer choices immediately after the \"Type\" line with no whitespace, i.e.: \"A) choice1\nB) choice2\nC) choice3\nD) choice4\"\
\n\nList the correct answer immediately on the next line, i.e. for multiple choice: \"D) choice4\nAnswer: D) choice4\", and for all other question types, \"Type: SHORT_ANSWER\nAnswer: answer\". There should not be a blank line.\
\n\nSeparate questions with a single blank line.\
\n\nDo not generate a quiz if the topics are not relevant to a {subject_domain}."
    )
}
