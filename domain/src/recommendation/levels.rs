//! Impact, effort and priority tiers

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Expected business impact of a recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImpactLevel {
    Low,
    Medium,
    High,
}

impl ImpactLevel {
    /// High=3, Medium=2, Low=1
    pub fn weight(&self) -> u8 {
        match self {
            ImpactLevel::High => 3,
            ImpactLevel::Medium => 2,
            ImpactLevel::Low => 1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ImpactLevel::High => "high",
            ImpactLevel::Medium => "medium",
            ImpactLevel::Low => "low",
        }
    }
}

impl fmt::Display for ImpactLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ImpactLevel {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "high" | "h" => Ok(ImpactLevel::High),
            "medium" | "med" | "m" => Ok(ImpactLevel::Medium),
            "low" | "l" => Ok(ImpactLevel::Low),
            _ => Err(DomainError::InvalidImpact(s.to_string())),
        }
    }
}

/// Implementation effort of a recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EffortLevel {
    Low,
    Medium,
    High,
}

impl EffortLevel {
    /// Low=1, Medium=2, High=3
    pub fn weight(&self) -> u8 {
        match self {
            EffortLevel::Low => 1,
            EffortLevel::Medium => 2,
            EffortLevel::High => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EffortLevel::High => "high",
            EffortLevel::Medium => "medium",
            EffortLevel::Low => "low",
        }
    }
}

impl fmt::Display for EffortLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for EffortLevel {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "high" | "h" => Ok(EffortLevel::High),
            "medium" | "med" | "m" => Ok(EffortLevel::Medium),
            "low" | "l" => Ok(EffortLevel::Low),
            _ => Err(DomainError::InvalidEffort(s.to_string())),
        }
    }
}

/// Priority tier assigned from a recommendation's rank
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PriorityLevel {
    Critical,
    High,
    Medium,
}

impl PriorityLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            PriorityLevel::Critical => "critical",
            PriorityLevel::High => "high",
            PriorityLevel::Medium => "medium",
        }
    }
}

impl fmt::Display for PriorityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weights() {
        assert_eq!(ImpactLevel::High.weight(), 3);
        assert_eq!(ImpactLevel::Low.weight(), 1);
        assert_eq!(EffortLevel::Low.weight(), 1);
        assert_eq!(EffortLevel::High.weight(), 3);
    }

    #[test]
    fn test_from_str_case_insensitive() {
        assert_eq!("High".parse::<ImpactLevel>().ok(), Some(ImpactLevel::High));
        assert_eq!(" MEDIUM ".parse::<EffortLevel>().ok(), Some(EffortLevel::Medium));
        assert!("huge".parse::<ImpactLevel>().is_err());
        assert!("".parse::<EffortLevel>().is_err());
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(serde_json::to_string(&ImpactLevel::High).unwrap(), "\"high\"");
        assert_eq!(
            serde_json::to_string(&PriorityLevel::Critical).unwrap(),
            "\"critical\""
        );
    }
}
