//! Prompt domain
//!
//! Templates for the prompts sent to the model on behalf of each specialist.

mod template;

pub use template::SpecialistPromptTemplate;
