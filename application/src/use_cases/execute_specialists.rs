//! Execute Specialists use case
//!
//! Runs the routed specialists under an [`ExecutionMode`] and collects one
//! [`SpecialistResult`] per specialist. A failing, hung or panicking unit
//! becomes a failure result; it never stops its siblings.

use crate::config::OrchestratorConfig;
use crate::ports::progress::ProgressNotifier;
use crate::specialists::{SpecialistRegistry, SpecialistUnit};
use costwise_domain::{ExecutionMode, PriorFinding, Query, SpecialistId, SpecialistResult};
use futures::FutureExt;
use std::collections::HashMap;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// What one execution produced
#[derive(Debug, Clone, Default)]
pub struct ExecutionOutcome {
    /// Specialists that actually ran, in execution (or spawn) order
    pub executed: Vec<SpecialistId>,
    pub results: HashMap<SpecialistId, SpecialistResult>,
}

impl ExecutionOutcome {
    fn record(&mut self, result: SpecialistResult) {
        if !self.executed.contains(&result.specialist) {
            self.executed.push(result.specialist.clone());
        }
        self.results.insert(result.specialist.clone(), result);
    }
}

/// Deadlines for one execution
#[derive(Debug, Clone, Copy)]
struct UnitLimits {
    model_timeout: Duration,
    deadline: Duration,
}

/// Runs specialists from a registry
pub struct ExecutionCoordinator {
    registry: Arc<SpecialistRegistry>,
    config: OrchestratorConfig,
}

impl ExecutionCoordinator {
    pub fn new(registry: Arc<SpecialistRegistry>) -> Self {
        Self::from_config(registry, &OrchestratorConfig::default())
    }

    pub fn from_config(registry: Arc<SpecialistRegistry>, config: &OrchestratorConfig) -> Self {
        Self {
            registry,
            config: config.clone(),
        }
    }

    pub fn with_timeout_grace(mut self, grace: Duration) -> Self {
        self.config = self.config.with_timeout_grace(grace);
        self
    }

    pub fn with_excerpt_chars(mut self, chars: usize) -> Self {
        self.config = self.config.with_excerpt_chars(chars);
        self
    }

    /// Execute `selected` specialists against `query`.
    ///
    /// `per_unit_timeout` bounds each unit's model call; the coordinator
    /// gives up on a unit after `per_unit_timeout + grace`. Dropping the
    /// returned future aborts any units still running.
    pub async fn execute(
        &self,
        selected: &[SpecialistId],
        query: &Query,
        mode: ExecutionMode,
        per_unit_timeout: Duration,
        progress: &dyn ProgressNotifier,
    ) -> ExecutionOutcome {
        info!(
            "Executing {} specialist(s) in {} mode",
            selected.len(),
            mode
        );

        let limits = UnitLimits {
            model_timeout: per_unit_timeout,
            deadline: self
                .config
                .clone()
                .with_per_unit_timeout(per_unit_timeout)
                .unit_deadline(),
        };

        match mode {
            ExecutionMode::Single => self.run_single(selected, query, limits, progress).await,
            ExecutionMode::Parallel => self.run_parallel(selected, query, limits, progress).await,
            ExecutionMode::Sequential | ExecutionMode::Comprehensive => {
                self.run_sequential(selected, query, limits, mode.threads_context(), progress)
                    .await
            }
        }
    }

    /// Single: the first selected specialist only
    async fn run_single(
        &self,
        selected: &[SpecialistId],
        query: &Query,
        limits: UnitLimits,
        progress: &dyn ProgressNotifier,
    ) -> ExecutionOutcome {
        let mut outcome = ExecutionOutcome::default();
        let Some(first) = selected.first() else {
            return outcome;
        };
        if selected.len() > 1 {
            info!(
                "Single mode: running {} and ignoring {} other selected specialist(s)",
                first,
                selected.len() - 1
            );
        }

        outcome.record(self.run_one(first, query, limits, progress).await);
        outcome
    }

    /// Parallel: one task per specialist, wait for all
    async fn run_parallel(
        &self,
        selected: &[SpecialistId],
        query: &Query,
        limits: UnitLimits,
        progress: &dyn ProgressNotifier,
    ) -> ExecutionOutcome {
        let mut outcome = ExecutionOutcome::default();
        let mut join_set = JoinSet::new();

        for id in selected {
            if outcome.executed.contains(id) {
                continue;
            }
            outcome.executed.push(id.clone());

            let Some(unit) = self.registry.get(id) else {
                let result = unregistered(id);
                progress.on_specialist_complete(&result);
                outcome.results.insert(id.clone(), result);
                continue;
            };

            progress.on_specialist_start(id);
            let id = id.clone();
            let query = query.clone();
            join_set.spawn(async move {
                let result = invoke(unit.as_ref(), &query, limits).await;
                (id, result)
            });
        }

        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((id, result)) => {
                    progress.on_specialist_complete(&result);
                    outcome.results.insert(id, result);
                }
                Err(e) => {
                    warn!("Task join error: {}", e);
                }
            }
        }

        // A task lost to a join error still owes a result
        for id in &outcome.executed {
            if !outcome.results.contains_key(id) {
                let result = SpecialistResult::failure(id.clone(), "task failed", 0);
                progress.on_specialist_complete(&result);
                outcome.results.insert(id.clone(), result);
            }
        }

        outcome
    }

    /// Sequential and comprehensive: in routed order on the caller's task.
    ///
    /// With `thread_context`, every successful result is excerpted into the
    /// `prior_findings` of the query the next specialist sees.
    async fn run_sequential(
        &self,
        selected: &[SpecialistId],
        query: &Query,
        limits: UnitLimits,
        thread_context: bool,
        progress: &dyn ProgressNotifier,
    ) -> ExecutionOutcome {
        let mut outcome = ExecutionOutcome::default();
        let mut current = query.clone();

        for id in selected {
            if outcome.executed.contains(id) {
                continue;
            }
            let result = self.run_one(id, &current, limits, progress).await;

            if thread_context && result.is_success() {
                let finding =
                    PriorFinding::new(id.clone(), result.excerpt(self.config.excerpt_chars));
                current = current.with_prior_finding(finding);
                debug!(
                    "Threaded {} finding(s) into the context",
                    current.prior_findings().len()
                );
            }
            outcome.record(result);
        }

        outcome
    }

    async fn run_one(
        &self,
        id: &SpecialistId,
        query: &Query,
        limits: UnitLimits,
        progress: &dyn ProgressNotifier,
    ) -> SpecialistResult {
        let result = match self.registry.get(id) {
            Some(unit) => {
                progress.on_specialist_start(id);
                invoke(unit.as_ref(), query, limits).await
            }
            None => unregistered(id),
        };
        progress.on_specialist_complete(&result);
        result
    }
}

/// Run one unit under the outer deadline, converting every failure mode
/// (unit error, hang, panic) into a failure result.
async fn invoke(unit: &dyn SpecialistUnit, query: &Query, limits: UnitLimits) -> SpecialistResult {
    let id = unit.id();
    let deadline = limits.deadline;
    let start = Instant::now();
    let guarded = tokio::time::timeout(
        deadline,
        AssertUnwindSafe(unit.analyze(query, limits.model_timeout)).catch_unwind(),
    );

    match guarded.await {
        Ok(Ok(Ok(result))) => {
            debug!(
                "Specialist {} finished in {}ms (fallback: {})",
                id, result.duration_ms, result.used_fallback
            );
            result
        }
        Ok(Ok(Err(e))) => {
            warn!("Specialist {} failed: {}", id, e);
            SpecialistResult::failure(id, e.to_string(), elapsed_ms(start))
        }
        Ok(Err(_)) => {
            warn!("Specialist {} panicked", id);
            SpecialistResult::failure(id, "specialist panicked", elapsed_ms(start))
        }
        Err(_) => {
            warn!("Specialist {} exceeded its {:?} deadline", id, deadline);
            SpecialistResult::failure(
                id,
                format!("exceeded deadline of {}ms", deadline.as_millis()),
                elapsed_ms(start),
            )
        }
    }
}

fn unregistered(id: &SpecialistId) -> SpecialistResult {
    warn!("Specialist {} is not registered", id);
    SpecialistResult::failure(id.clone(), format!("specialist '{}' is not registered", id), 0)
}

fn elapsed_ms(start: Instant) -> u64 {
    start.elapsed().as_millis() as u64
}
