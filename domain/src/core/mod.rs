//! Core domain concepts shared across all subdomains.
//!
//! - [`query::Query`]: an immutable cost-optimization query with its context
//! - [`error::DomainError`]: domain-level errors
//! - [`string`]: excerpt helpers used for context threading

pub mod error;
pub mod query;
pub mod string;
