//! Domain layer for costwise
//!
//! This crate contains the core business logic, entities, and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Specialists
//!
//! A query is analyzed by one or more specialists, each identified by a
//! [`SpecialistId`]: cost trends, infrastructure rightsizing, financial ROI
//! and remediation planning. Every specialist has a deterministic
//! [`FallbackRule`] so an analysis is always produced, with or without a model.
//!
//! ## Routing
//!
//! The [`Router`] maps free text to an ordered, non-empty list of specialists.
//!
//! ## Prioritization
//!
//! Recommendations are ranked by `impact * 3 + (4 - effort)` into a single
//! list; see [`recommendation::scoring`].

pub mod analysis;
pub mod config;
pub mod core;
pub mod orchestration;
pub mod prompt;
pub mod recommendation;
pub mod routing;
pub mod specialist;

// Re-export commonly used types
pub use analysis::{
    Analysis, CostSnapshot, FallbackRule, ResourceUsage, ServiceCost,
    parsing::{parse_analysis, parse_analysis_json},
    standard_rule,
};
pub use config::OutputFormat;
pub use core::{
    error::DomainError,
    query::{PRIOR_FINDINGS_KEY, PriorFinding, Query, QueryContext},
    string::excerpt,
};
pub use orchestration::{mode::ExecutionMode, response::AggregatedResponse};
pub use prompt::SpecialistPromptTemplate;
pub use recommendation::{
    entities::{RankedRecommendation, Recommendation},
    levels::{EffortLevel, ImpactLevel, PriorityLevel},
    ranking::rank_recommendations,
    scoring::{priority_level, priority_score},
};
pub use routing::{RouteCategory, Router, router::standard_categories};
pub use specialist::{identifier::SpecialistId, result::SpecialistResult};
