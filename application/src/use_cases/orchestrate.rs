//! Orchestrate use case
//!
//! The single entry point: route the query, execute the selected specialists
//! and aggregate their results.

use crate::config::OrchestratorConfig;
use crate::ports::execution_logger::{ExecutionEvent, ExecutionLogger, NoExecutionLogger};
use crate::ports::progress::{NoProgress, ProgressNotifier};
use crate::specialists::SpecialistRegistry;
use crate::use_cases::aggregate::{AggregationInput, ResultAggregator};
use crate::use_cases::execute_specialists::ExecutionCoordinator;
use costwise_domain::{AggregatedResponse, ExecutionMode, Query, QueryContext, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::info;

/// Errors that can occur while building an orchestrator
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OrchestratorError {
    #[error("No specialists registered")]
    EmptyRegistry,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Inbound analysis request
///
/// ```json
/// {"query": "...", "mode": "parallel", "context": {"total_cost": 1200}}
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub query: String,
    #[serde(default)]
    pub mode: Option<ExecutionMode>,
    #[serde(default)]
    pub context: QueryContext,
}

impl AnalysisRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Default::default()
        }
    }

    pub fn with_mode(mut self, mode: ExecutionMode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn with_context(mut self, context: QueryContext) -> Self {
        self.context = context;
        self
    }
}

/// Cost-optimization orchestrator
///
/// Owns the router, the specialist registry and the execution settings.
/// Nothing else in the application holds a reference to it.
pub struct CostOrchestrator {
    router: Router,
    registry: Arc<SpecialistRegistry>,
    coordinator: ExecutionCoordinator,
    aggregator: ResultAggregator,
    config: OrchestratorConfig,
    logger: Arc<dyn ExecutionLogger>,
}

impl CostOrchestrator {
    pub fn new(
        router: Router,
        registry: SpecialistRegistry,
        config: OrchestratorConfig,
    ) -> Result<Self, OrchestratorError> {
        if registry.is_empty() {
            return Err(OrchestratorError::EmptyRegistry);
        }
        if config.per_unit_timeout.is_zero() {
            return Err(OrchestratorError::InvalidConfig(
                "per-unit timeout must be greater than zero".to_string(),
            ));
        }

        let registry = Arc::new(registry);
        let aggregator = ResultAggregator::new(registry.ids());
        let coordinator = ExecutionCoordinator::from_config(Arc::clone(&registry), &config);

        Ok(Self {
            router,
            registry,
            coordinator,
            aggregator,
            config,
            logger: Arc::new(NoExecutionLogger),
        })
    }

    pub fn with_logger(mut self, logger: Arc<dyn ExecutionLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn router(&self) -> &Router {
        &self.router
    }

    pub fn registry(&self) -> &SpecialistRegistry {
        &self.registry
    }

    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    /// Analyze in the configured default mode
    pub async fn analyze(&self, query: impl Into<Query>) -> AggregatedResponse {
        self.analyze_with_progress(query.into(), self.config.default_mode, &NoProgress)
            .await
    }

    pub async fn analyze_with_mode(
        &self,
        query: impl Into<Query>,
        mode: ExecutionMode,
    ) -> AggregatedResponse {
        self.analyze_with_progress(query.into(), mode, &NoProgress)
            .await
    }

    /// Analyze an inbound request; a missing mode means the default mode
    pub async fn analyze_request(
        &self,
        request: AnalysisRequest,
        progress: &dyn ProgressNotifier,
    ) -> AggregatedResponse {
        let mode = request.mode.unwrap_or(self.config.default_mode);
        let query = Query::with_context(request.query, request.context);
        self.analyze_with_progress(query, mode, progress).await
    }

    /// Full pipeline with progress callbacks
    pub async fn analyze_with_progress(
        &self,
        query: Query,
        mode: ExecutionMode,
        progress: &dyn ProgressNotifier,
    ) -> AggregatedResponse {
        let start = Instant::now();
        let selected = self.router.route(query.text());
        info!(
            "Routed query to [{}] ({} mode)",
            selected
                .iter()
                .map(|id| id.as_str())
                .collect::<Vec<_>>()
                .join(", "),
            mode
        );

        self.logger.log(ExecutionEvent::new(
            "execution_started",
            json!({
                "query": query.text(),
                "mode": mode.as_str(),
                "specialists": selected.iter().map(|id| id.as_str()).collect::<Vec<_>>(),
            }),
        ));
        progress.on_execution_start(mode, &selected);

        let outcome = self
            .coordinator
            .execute(&selected, &query, mode, self.per_unit_timeout(), progress)
            .await;

        for id in &outcome.executed {
            if let Some(result) = outcome.results.get(id) {
                self.logger.log(ExecutionEvent::new(
                    "specialist_completed",
                    json!({
                        "specialist": id.as_str(),
                        "success": result.success,
                        "used_fallback": result.used_fallback,
                        "duration_ms": result.duration_ms,
                        "recommendations": result.recommendations.len(),
                        "error": result.error,
                    }),
                ));
            }
        }

        let response = self.aggregator.aggregate(AggregationInput {
            query: query.text().to_string(),
            mode,
            executed: outcome.executed,
            results: outcome.results,
            total_execution_ms: start.elapsed().as_millis() as u64,
        });

        self.logger.log(ExecutionEvent::new(
            "execution_completed",
            json!({
                "total_ms": response.total_execution_ms,
                "succeeded": response.success_count(),
                "failed": response.failure_count(),
                "fallback_count": response.fallback_count,
                "recommendations": response.ranked_recommendations.len(),
                "total_estimated_monthly_savings": response.total_estimated_monthly_savings,
            }),
        ));
        progress.on_execution_complete(response.total_execution_ms);
        info!(
            "Analysis finished in {}ms with {} recommendation(s)",
            response.total_execution_ms,
            response.ranked_recommendations.len()
        );

        response
    }

    fn per_unit_timeout(&self) -> Duration {
        self.config.per_unit_timeout
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::model_client::{ModelClient, ModelError};
    use async_trait::async_trait;
    use costwise_domain::{PriorityLevel, SpecialistId};
    use std::sync::Mutex;

    // ==================== Test Mocks ====================

    struct FailingClient;

    #[async_trait]
    impl ModelClient for FailingClient {
        async fn generate(&self, _: &str, _: &str, _: f32) -> Result<String, ModelError> {
            Err(ModelError::Timeout)
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    #[derive(Default)]
    struct RecordingLogger {
        events: Mutex<Vec<&'static str>>,
    }

    impl ExecutionLogger for RecordingLogger {
        fn log(&self, event: ExecutionEvent) {
            self.events.lock().unwrap().push(event.event_type);
        }
    }

    fn orchestrator() -> CostOrchestrator {
        CostOrchestrator::new(
            Router::standard(),
            SpecialistRegistry::standard(Some(Arc::new(FailingClient))),
            OrchestratorConfig::default(),
        )
        .unwrap()
    }

    fn context() -> QueryContext {
        serde_json::json!({
            "total_cost": 15000.0,
            "daily_costs": [450.0, 460.0, 520.0, 560.0],
            "top_services": [{"name": "EC2", "cost": 9000.0}, {"name": "S3", "cost": 1200.0}],
            "resources": [
                {"id": "vm-1", "kind": "vm", "cpu_utilization": 2, "memory_utilization": 8, "monthly_cost": 900},
                {"id": "vm-2", "kind": "vm", "cpu_utilization": 14, "memory_utilization": 30, "monthly_cost": 700}
            ]
        })
        .as_object()
        .unwrap()
        .clone()
    }

    #[tokio::test]
    async fn test_cost_query_routes_to_cost_only() {
        let response = orchestrator().analyze("analyze my costs").await;

        assert_eq!(response.specialists, vec![SpecialistId::Cost]);
        assert_eq!(response.per_specialist_results.len(), 1);
        assert!(response.result(&SpecialistId::Cost).is_some());
        assert_eq!(response.mode, ExecutionMode::Comprehensive);
    }

    #[tokio::test]
    async fn test_parallel_request() {
        let request = AnalysisRequest::new("rightsize my VMs and show ROI")
            .with_mode(ExecutionMode::Parallel)
            .with_context(context());
        let response = orchestrator().analyze_request(request, &NoProgress).await;

        assert_eq!(
            response.specialists,
            vec![SpecialistId::Infrastructure, SpecialistId::Financial]
        );
        assert_eq!(response.success_count(), 2);
        assert_eq!(response.fallback_count, 2);
        assert!(!response.ranked_recommendations.is_empty());
        assert!(response.total_estimated_monthly_savings > 0.0);
    }

    #[tokio::test]
    async fn test_full_analysis_runs_canonical_chain() {
        let response = orchestrator()
            .analyze(Query::with_context("give me a full analysis", context()))
            .await;

        assert_eq!(response.specialists, SpecialistId::canonical_chain());
        assert!(response.per_specialist_results.values().all(|r| r.used_fallback));

        let remediation = response.result(&SpecialistId::Remediation).unwrap();
        assert!(remediation.content.contains("cost, infrastructure, financial"));

        let ranked = &response.ranked_recommendations;
        assert_eq!(ranked[0].priority_rank, 1);
        assert_eq!(ranked[0].priority_level, PriorityLevel::Critical);
        assert!(ranked.windows(2).all(|w| w[0].priority_score >= w[1].priority_score));
        assert!(
            ranked
                .iter()
                .skip(2)
                .all(|r| r.priority_level != PriorityLevel::Critical)
        );
    }

    #[tokio::test]
    async fn test_top_recommendation_is_critical_without_context() {
        let response = orchestrator().analyze("give me a full analysis").await;

        let top = &response.ranked_recommendations[0];
        assert_eq!(top.priority_level, PriorityLevel::Critical);
        assert!(!response.executive_summary.contains(" 0 critical"));
    }

    #[tokio::test]
    async fn test_mode_override() {
        let response = orchestrator()
            .analyze_with_mode("comprehensive review", ExecutionMode::Single)
            .await;
        assert_eq!(response.specialists, vec![SpecialistId::Cost]);
        assert_eq!(response.mode, ExecutionMode::Single);
    }

    #[tokio::test]
    async fn test_execution_events_logged() {
        let logger = Arc::new(RecordingLogger::default());
        let orchestrator = orchestrator().with_logger(logger.clone());

        orchestrator
            .analyze_with_mode("rightsize and roi", ExecutionMode::Parallel)
            .await;

        let events = logger.events.lock().unwrap();
        assert_eq!(
            *events,
            vec![
                "execution_started",
                "specialist_completed",
                "specialist_completed",
                "execution_completed"
            ]
        );
    }

    #[test]
    fn test_empty_registry_rejected() {
        let result = CostOrchestrator::new(
            Router::standard(),
            SpecialistRegistry::new(),
            OrchestratorConfig::default(),
        );
        assert!(matches!(result, Err(OrchestratorError::EmptyRegistry)));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let result = CostOrchestrator::new(
            Router::standard(),
            SpecialistRegistry::standard(None),
            OrchestratorConfig::default().with_per_unit_timeout(Duration::ZERO),
        );
        assert!(matches!(result, Err(OrchestratorError::InvalidConfig(_))));
    }

    #[test]
    fn test_request_deserializes() {
        let request: AnalysisRequest = serde_json::from_str(
            r#"{"query": "roi?", "mode": "sequential", "context": {"total_cost": 10}}"#,
        )
        .unwrap();
        assert_eq!(request.mode, Some(ExecutionMode::Sequential));
        assert_eq!(request.context["total_cost"], 10);

        let minimal: AnalysisRequest = serde_json::from_str(r#"{"query": "roi?"}"#).unwrap();
        assert_eq!(minimal.mode, None);
        assert!(minimal.context.is_empty());
    }
}
