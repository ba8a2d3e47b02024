//! Specialist identifier value object

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Identifies a specialist analysis unit (Value Object)
///
/// The built-in specialists cover the canonical analysis chain.
/// `Custom` lets deployments register additional units without touching
/// routing or execution code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SpecialistId {
    /// Cost trend analysis
    Cost,
    /// Infrastructure rightsizing
    Infrastructure,
    /// Financial ROI analysis
    Financial,
    /// Remediation planning
    Remediation,
    /// Any other registered specialist
    Custom(String),
}

impl SpecialistId {
    /// Get the string identifier for this specialist
    pub fn as_str(&self) -> &str {
        match self {
            SpecialistId::Cost => "cost",
            SpecialistId::Infrastructure => "infrastructure",
            SpecialistId::Financial => "financial",
            SpecialistId::Remediation => "remediation",
            SpecialistId::Custom(s) => s,
        }
    }

    /// Human-readable name
    pub fn display_name(&self) -> &str {
        match self {
            SpecialistId::Cost => "Cost Analyst",
            SpecialistId::Infrastructure => "Infrastructure Analyst",
            SpecialistId::Financial => "Financial Analyst",
            SpecialistId::Remediation => "Remediation Planner",
            SpecialistId::Custom(s) => s,
        }
    }

    /// Cost → Infrastructure → Financial → Remediation
    pub fn canonical_chain() -> Vec<SpecialistId> {
        vec![
            SpecialistId::Cost,
            SpecialistId::Infrastructure,
            SpecialistId::Financial,
            SpecialistId::Remediation,
        ]
    }

    /// Check if this is one of the built-in specialists
    pub fn is_builtin(&self) -> bool {
        !matches!(self, SpecialistId::Custom(_))
    }
}

impl Default for SpecialistId {
    /// Queries that match no routing category go to the cost analyst
    fn default() -> Self {
        SpecialistId::Cost
    }
}

impl std::fmt::Display for SpecialistId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for SpecialistId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_lowercase().as_str() {
            "cost" | "costs" => SpecialistId::Cost,
            "infrastructure" | "infra" => SpecialistId::Infrastructure,
            "financial" | "finance" => SpecialistId::Financial,
            "remediation" => SpecialistId::Remediation,
            _ => SpecialistId::Custom(s.trim().to_string()),
        })
    }
}

impl Serialize for SpecialistId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SpecialistId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        match s.parse() {
            Ok(id) => Ok(id),
            Err(never) => match never {},
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip_builtin() {
        for id in SpecialistId::canonical_chain() {
            let parsed: SpecialistId = id.to_string().parse().unwrap();
            assert_eq!(id, parsed);
        }
    }

    #[test]
    fn test_aliases() {
        assert_eq!("infra".parse::<SpecialistId>().unwrap(), SpecialistId::Infrastructure);
        assert_eq!("Finance".parse::<SpecialistId>().unwrap(), SpecialistId::Financial);
    }

    #[test]
    fn test_custom_specialist() {
        let id: SpecialistId = "security".parse().unwrap();
        assert_eq!(id, SpecialistId::Custom("security".to_string()));
        assert!(!id.is_builtin());
        assert_eq!(id.to_string(), "security");
    }

    #[test]
    fn test_default_is_cost() {
        assert_eq!(SpecialistId::default(), SpecialistId::Cost);
    }

    #[test]
    fn test_serde_as_plain_string() {
        let json = serde_json::to_string(&SpecialistId::Remediation).unwrap();
        assert_eq!(json, "\"remediation\"");
        let back: SpecialistId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, SpecialistId::Remediation);
    }
}
