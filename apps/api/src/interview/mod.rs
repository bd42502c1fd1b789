// Interview Prep: prompt building, question normalization, generation pipeline,
// resume upload extraction and record persistence.
// All generation calls go through llm_client — no direct provider calls here.

pub mod handlers;
pub mod pipeline;
pub mod prompts;
pub mod questions;
pub mod resume_upload;
pub mod store;
