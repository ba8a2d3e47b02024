//! Model-backed specialist with rule-based fallback
//!
//! Each call runs a two-step state machine:
//!
//! 1. **Model attempt**: build the prompt, call the model under a timeout and
//!    parse its JSON answer. Any failure (no client, transport error, timeout,
//!    unparsable output) ends the attempt.
//! 2. **Fallback**: run the deterministic [`FallbackRule`] over the context.
//!    This step cannot fail.

use super::{SpecialistUnit, UnitError};
use crate::ports::model_client::{ModelClient, ModelError};
use async_trait::async_trait;
use costwise_domain::{
    Analysis, CostSnapshot, FallbackRule, Query, SpecialistId, SpecialistPromptTemplate,
    SpecialistResult, parse_analysis, standard_rule,
};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Default sampling temperature for analyses
pub const DEFAULT_TEMPERATURE: f32 = 0.2;

/// Metric naming why a result came from the fallback rule:
/// `no_model`, `model_unavailable` or `model_error`
pub const FALLBACK_REASON_METRIC: &str = "fallback_reason";

/// A specialist that asks the model first and falls back to rules
pub struct ModelBackedSpecialist {
    id: SpecialistId,
    client: Option<Arc<dyn ModelClient>>,
    fallback: Option<Arc<dyn FallbackRule>>,
    temperature: f32,
}

impl ModelBackedSpecialist {
    /// A unit with neither model nor fallback; see the `with_*` builders
    pub fn new(id: SpecialistId) -> Self {
        Self {
            id,
            client: None,
            fallback: None,
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    /// A unit wired with the built-in fallback rule for `id`, if there is one
    pub fn standard(id: SpecialistId, client: Option<Arc<dyn ModelClient>>) -> Self {
        let fallback = standard_rule(&id).map(Arc::from);
        Self {
            id,
            client,
            fallback,
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    pub fn with_client(mut self, client: Arc<dyn ModelClient>) -> Self {
        self.client = Some(client);
        self
    }

    pub fn with_fallback(mut self, rule: Arc<dyn FallbackRule>) -> Self {
        self.fallback = Some(rule);
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Step 1: ask the model
    async fn model_attempt(&self, query: &Query, timeout: Duration) -> Result<Analysis, ModelError> {
        let client = self.client.as_ref().ok_or(ModelError::NotConfigured)?;
        let system_prompt = SpecialistPromptTemplate::system_prompt(&self.id);
        let prompt = SpecialistPromptTemplate::analysis_prompt(&self.id, query);

        debug!(
            "Specialist {} querying model {} (timeout {:?})",
            self.id,
            client.name(),
            timeout
        );
        let text = tokio::time::timeout(
            timeout,
            client.generate(&prompt, &system_prompt, self.temperature),
        )
        .await
        .map_err(|_| ModelError::Timeout)??;

        parse_analysis(&text, &self.id).map_err(|e| ModelError::MalformedOutput(e.to_string()))
    }
}

#[async_trait]
impl SpecialistUnit for ModelBackedSpecialist {
    fn id(&self) -> SpecialistId {
        self.id.clone()
    }

    async fn analyze(
        &self,
        query: &Query,
        model_timeout: Duration,
    ) -> Result<SpecialistResult, UnitError> {
        let Some(fallback) = self.fallback.as_ref() else {
            return Err(UnitError::Misconfigured(self.id.clone()));
        };

        let start = Instant::now();
        match self.model_attempt(query, model_timeout).await {
            Ok(analysis) => {
                debug!(
                    "Specialist {} produced {} recommendation(s) from the model",
                    self.id,
                    analysis.recommendations.len()
                );
                Ok(SpecialistResult::from_model(
                    self.id.clone(),
                    analysis,
                    start.elapsed().as_millis() as u64,
                ))
            }
            Err(e) => {
                let reason = match &e {
                    ModelError::NotConfigured => {
                        debug!("Specialist {} has no model client, using rules", self.id);
                        "no_model"
                    }
                    e if e.is_unavailable() => {
                        warn!("Specialist {} model unreachable, using fallback: {}", self.id, e);
                        "model_unavailable"
                    }
                    e => {
                        warn!(
                            "Specialist {} model attempt failed, using fallback: {}",
                            self.id, e
                        );
                        "model_error"
                    }
                };
                let snapshot = CostSnapshot::from_context(query.context());
                let analysis = fallback
                    .analyze(query, &snapshot)
                    .with_metric(FALLBACK_REASON_METRIC, reason);
                Ok(SpecialistResult::from_fallback(
                    self.id.clone(),
                    analysis,
                    start.elapsed().as_millis() as u64,
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    // ==================== Test Mocks ====================

    struct FailingClient {
        calls: AtomicUsize,
    }

    impl FailingClient {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl ModelClient for FailingClient {
        async fn generate(&self, _: &str, _: &str, _: f32) -> Result<String, ModelError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(ModelError::Unavailable("connection refused".to_string()))
        }

        fn name(&self) -> &str {
            "failing"
        }
    }

    struct ScriptedClient {
        response: String,
        prompts: Mutex<Vec<(String, String)>>,
    }

    impl ScriptedClient {
        fn new(response: impl Into<String>) -> Self {
            Self {
                response: response.into(),
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ModelClient for ScriptedClient {
        async fn generate(
            &self,
            prompt: &str,
            system_prompt: &str,
            _: f32,
        ) -> Result<String, ModelError> {
            self.prompts
                .lock()
                .unwrap()
                .push((prompt.to_string(), system_prompt.to_string()));
            Ok(self.response.clone())
        }

        fn name(&self) -> &str {
            "scripted"
        }
    }

    struct SlowClient;

    #[async_trait]
    impl ModelClient for SlowClient {
        async fn generate(&self, _: &str, _: &str, _: f32) -> Result<String, ModelError> {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok(String::new())
        }

        fn name(&self) -> &str {
            "slow"
        }
    }

    const TIMEOUT: Duration = Duration::from_secs(5);

    fn query() -> Query {
        Query::with_context(
            "analyze my costs",
            json!({"total_cost": 3000.0, "daily_costs": [90.0, 95.0, 110.0, 120.0]})
                .as_object()
                .unwrap()
                .clone(),
        )
    }

    #[tokio::test]
    async fn test_failing_client_falls_back() {
        let client = Arc::new(FailingClient::new());
        let unit = ModelBackedSpecialist::standard(SpecialistId::Cost, Some(client.clone()));

        let result = unit.analyze(&query(), TIMEOUT).await.unwrap();
        assert!(result.is_success());
        assert!(result.used_fallback);
        assert!(!result.recommendations.is_empty());
        assert_eq!(client.calls.load(Ordering::SeqCst), 1);
        assert_eq!(result.metrics[FALLBACK_REASON_METRIC], "model_unavailable");
    }

    #[tokio::test]
    async fn test_every_builtin_survives_failing_client() {
        let client: Arc<dyn ModelClient> = Arc::new(FailingClient::new());
        for id in SpecialistId::canonical_chain() {
            let unit = ModelBackedSpecialist::standard(id.clone(), Some(client.clone()));
            let result = unit.analyze(&query(), TIMEOUT).await.unwrap();
            assert!(result.is_success(), "{} did not succeed", id);
            assert!(result.used_fallback);
            assert_eq!(result.specialist, id);
        }
    }

    #[tokio::test]
    async fn test_valid_model_output_is_used() {
        let client = Arc::new(ScriptedClient::new(
            r#"```json
{"summary": "EC2 dominates", "recommendations": [{"title": "Buy savings plan", "impact": "high", "effort": "medium", "estimated_monthly_savings": 250}]}
```"#,
        ));
        let unit = ModelBackedSpecialist::standard(SpecialistId::Financial, Some(client.clone()));

        let result = unit.analyze(&query(), TIMEOUT).await.unwrap();
        assert!(!result.used_fallback);
        assert_eq!(result.recommendations.len(), 1);
        assert_eq!(result.recommendations[0].source, SpecialistId::Financial);
        assert!(result.content.starts_with("EC2 dominates"));

        let prompts = client.prompts.lock().unwrap();
        assert!(prompts[0].0.contains("analyze my costs"));
        assert!(prompts[0].1.contains("financial analyst"));
    }

    #[tokio::test]
    async fn test_malformed_output_falls_back() {
        let client = Arc::new(ScriptedClient::new("I think you should save money."));
        let unit = ModelBackedSpecialist::standard(SpecialistId::Cost, Some(client));

        let result = unit.analyze(&query(), TIMEOUT).await.unwrap();
        assert!(result.is_success());
        assert!(result.used_fallback);
        assert_eq!(result.metrics[FALLBACK_REASON_METRIC], "model_error");
    }

    #[tokio::test]
    async fn test_timeout_falls_back() {
        let unit = ModelBackedSpecialist::standard(SpecialistId::Infrastructure, Some(Arc::new(SlowClient)));

        let start = Instant::now();
        let result = unit
            .analyze(&query(), Duration::from_millis(50))
            .await
            .unwrap();
        assert!(result.used_fallback);
        assert!(start.elapsed() < Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_no_client_uses_rules() {
        let unit = ModelBackedSpecialist::standard(SpecialistId::Remediation, None);
        let result = unit.analyze(&query(), TIMEOUT).await.unwrap();
        assert!(result.used_fallback);
        assert!(result.error.is_none());
        assert_eq!(result.metrics[FALLBACK_REASON_METRIC], "no_model");
    }

    #[tokio::test]
    async fn test_missing_fallback_is_misconfiguration() {
        let custom = SpecialistId::Custom("security".to_string());
        let unit = ModelBackedSpecialist::standard(custom.clone(), Some(Arc::new(FailingClient::new())));

        let err = unit.analyze(&query(), TIMEOUT).await.unwrap_err();
        assert_eq!(err, UnitError::Misconfigured(custom));
    }

    #[tokio::test]
    async fn test_custom_unit_with_explicit_rule() {
        struct FlatRule;
        impl FallbackRule for FlatRule {
            fn specialist(&self) -> SpecialistId {
                SpecialistId::Custom("security".to_string())
            }
            fn analyze(&self, _: &Query, _: &CostSnapshot) -> Analysis {
                Analysis::new("No findings")
            }
        }

        let unit = ModelBackedSpecialist::new(SpecialistId::Custom("security".to_string()))
            .with_fallback(Arc::new(FlatRule))
            .with_temperature(0.0);
        let result = unit.analyze(&query(), TIMEOUT).await.unwrap();
        assert_eq!(result.content, "No findings");
    }
}
