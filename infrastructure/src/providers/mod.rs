//! Model backend adapters
//!
//! Implementations of the [`ModelClient`](costwise_application::ModelClient)
//! port. The HTTP backend is compiled only with the `http-model` feature;
//! without it every specialist runs on its rule-based analysis.

#[cfg(feature = "http-model")]
mod openai_compatible;

#[cfg(feature = "http-model")]
pub use openai_compatible::{OpenAiCompatibleClient, OpenAiCompatibleConfig, ProviderError};
