pub mod quiz_generation_service;
pub mod quiz_parser;
pub mod retrieval_service;
pub mod sanitizer;
pub mod text_generation_service;
