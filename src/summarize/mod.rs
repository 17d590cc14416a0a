pub mod llm;
pub mod prompt;
pub mod store;
pub mod summarizer;
