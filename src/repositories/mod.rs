pub mod corpus_repository;

pub use corpus_repository::MongoCorpusRepository;
