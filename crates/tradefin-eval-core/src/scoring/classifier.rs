use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

// Zone thresholds
pub const LOW_RISK_ABOVE: Decimal = dec!(2.8);
pub const MEDIUM_RISK_FROM: Decimal = dec!(1.4);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskCategory {
    LowRisk,
    MediumRisk,
    HighRisk,
}

impl RiskCategory {
    pub fn label(self) -> &'static str {
        match self {
            Self::LowRisk => "Low Risk (Investment Grade)",
            Self::MediumRisk => "Watch / Medium Risk",
            Self::HighRisk => "High Risk (Requires Collateral)",
        }
    }

    /// Parse a display label as stored in portal evaluation documents.
    pub fn from_label(label: &str) -> Option<Self> {
        [Self::LowRisk, Self::MediumRisk, Self::HighRisk]
            .into_iter()
            .find(|c| c.label() == label)
    }

    pub fn is_investment_grade(self) -> bool {
        self == Self::LowRisk
    }

    pub fn requires_collateral(self) -> bool {
        self == Self::HighRisk
    }
}

impl std::fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Bucket an MTF-Z score.
///
/// `> 2.8` is low risk, `< 1.4` is high risk, and both boundary values
/// themselves fall in the medium band.
pub fn classify_score(score: Decimal) -> RiskCategory {
    if score > LOW_RISK_ABOVE {
        RiskCategory::LowRisk
    } else if score >= MEDIUM_RISK_FROM {
        RiskCategory::MediumRisk
    } else {
        RiskCategory::HighRisk
    }
}
