pub mod quiz;
pub mod quiz_question;
pub mod retrieved_document;
pub use quiz::Quiz;
pub use quiz_question::{QuestionType, QuizQuestion};
pub use retrieved_document::RetrievedDocument;
