//! Specialist units
//!
//! A [`SpecialistUnit`] analyzes a query for one [`SpecialistId`]. Units are
//! built once at startup, held in a [`SpecialistRegistry`] and are stateless
//! between invocations.

pub mod model_backed;
pub mod registry;

pub use model_backed::ModelBackedSpecialist;
pub use registry::SpecialistRegistry;

use async_trait::async_trait;
use costwise_domain::{Query, SpecialistId, SpecialistResult};
use std::time::Duration;
use thiserror::Error;

/// Errors a unit cannot recover from by itself
#[derive(Error, Debug, Clone, PartialEq)]
pub enum UnitError {
    #[error("Specialist '{0}' has no fallback rule registered")]
    Misconfigured(SpecialistId),
}

/// An analysis capability
#[async_trait]
pub trait SpecialistUnit: Send + Sync {
    /// The specialist this unit implements
    fn id(&self) -> SpecialistId;

    /// Analyze a query. `model_timeout` bounds any model call made on the way.
    ///
    /// Model problems are not errors: a well-configured unit always returns
    /// `Ok`, falling back to rule-based analysis when it must.
    async fn analyze(
        &self,
        query: &Query,
        model_timeout: Duration,
    ) -> Result<SpecialistResult, UnitError>;
}
