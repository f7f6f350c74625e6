pub mod evaluation;
pub mod scoring;
