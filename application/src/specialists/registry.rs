//! Specialist registry
//!
//! Holds the units available to the orchestrator, in registration order.
//! Registration order breaks priority ties when recommendations are ranked.

use super::{ModelBackedSpecialist, SpecialistUnit};
use crate::ports::model_client::ModelClient;
use costwise_domain::SpecialistId;
use std::sync::Arc;
use tracing::debug;

/// Ordered set of specialist units, one per [`SpecialistId`]
#[derive(Clone, Default)]
pub struct SpecialistRegistry {
    units: Vec<Arc<dyn SpecialistUnit>>,
}

impl SpecialistRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The four built-in specialists, sharing one model client
    pub fn standard(client: Option<Arc<dyn ModelClient>>) -> Self {
        Self::standard_with_temperature(client, super::model_backed::DEFAULT_TEMPERATURE)
    }

    pub fn standard_with_temperature(
        client: Option<Arc<dyn ModelClient>>,
        temperature: f32,
    ) -> Self {
        let mut registry = Self::new();
        for id in SpecialistId::canonical_chain() {
            registry.register(Arc::new(
                ModelBackedSpecialist::standard(id, client.clone()).with_temperature(temperature),
            ));
        }
        registry
    }

    /// Add a unit. Re-registering an id replaces the unit but keeps its position.
    pub fn register(&mut self, unit: Arc<dyn SpecialistUnit>) {
        let id = unit.id();
        if let Some(existing) = self.units.iter_mut().find(|u| u.id() == id) {
            debug!("Replacing specialist {}", id);
            *existing = unit;
        } else {
            debug!("Registering specialist {}", id);
            self.units.push(unit);
        }
    }

    /// Builder form of [`register`](Self::register)
    pub fn with(mut self, unit: Arc<dyn SpecialistUnit>) -> Self {
        self.register(unit);
        self
    }

    pub fn get(&self, id: &SpecialistId) -> Option<Arc<dyn SpecialistUnit>> {
        self.units.iter().find(|u| &u.id() == id).cloned()
    }

    pub fn contains(&self, id: &SpecialistId) -> bool {
        self.units.iter().any(|u| &u.id() == id)
    }

    /// Registered ids in registration order
    pub fn ids(&self) -> Vec<SpecialistId> {
        self.units.iter().map(|u| u.id()).collect()
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }
}

impl std::fmt::Debug for SpecialistRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpecialistRegistry")
            .field("units", &self.ids())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_registry_order() {
        let registry = SpecialistRegistry::standard(None);
        assert_eq!(registry.ids(), SpecialistId::canonical_chain());
        assert_eq!(registry.len(), 4);
        assert!(registry.contains(&SpecialistId::Financial));
        assert!(!registry.contains(&SpecialistId::Custom("x".into())));
    }

    #[test]
    fn test_reregistering_keeps_position() {
        let mut registry = SpecialistRegistry::standard(None);
        registry.register(Arc::new(ModelBackedSpecialist::new(
            SpecialistId::Infrastructure,
        )));
        assert_eq!(registry.len(), 4);
        assert_eq!(registry.ids()[1], SpecialistId::Infrastructure);
    }

    #[test]
    fn test_custom_specialist_appends() {
        let custom = SpecialistId::Custom("security".to_string());
        let registry = SpecialistRegistry::new()
            .with(Arc::new(ModelBackedSpecialist::standard(SpecialistId::Cost, None)))
            .with(Arc::new(ModelBackedSpecialist::new(custom.clone())));
        assert_eq!(registry.ids(), vec![SpecialistId::Cost, custom.clone()]);
        assert!(registry.get(&custom).is_some());
        assert!(SpecialistRegistry::new().is_empty());
    }
}
