use serde::{Deserialize, Serialize};

use crate::scoring::RiskCategory;

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

/// Review state of one evaluation step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepStatus {
    #[default]
    Pending,
    Approved,
    Rejected,
}

impl StepStatus {
    pub fn is_pending(self) -> bool {
        self == Self::Pending
    }

    /// Upper-case memo wording.
    pub fn memo_text(self) -> &'static str {
        match self {
            Self::Approved => "APPROVED",
            Self::Rejected => "REJECTED",
            Self::Pending => "PENDING REVIEW",
        }
    }

    pub fn memo_marker(self) -> &'static str {
        match self {
            Self::Approved => "✓ PASSED",
            Self::Rejected => "✗ FAILED",
            Self::Pending => "○ PENDING",
        }
    }
}

impl std::fmt::Display for StepStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Approved => write!(f, "approved"),
            Self::Rejected => write!(f, "rejected"),
        }
    }
}

/// Evaluator-assessed risk level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    #[default]
    Medium,
    High,
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

impl From<RiskCategory> for RiskLevel {
    fn from(category: RiskCategory) -> Self {
        match category {
            RiskCategory::LowRisk => RiskLevel::Low,
            RiskCategory::MediumRisk => RiskLevel::Medium,
            RiskCategory::HighRisk => RiskLevel::High,
        }
    }
}

/// Overall outcome across the four review steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Approved,
    Rejected,
    NeedsMoreInfo,
}

impl Decision {
    pub fn recommendation(self) -> &'static str {
        match self {
            Self::Approved => "APPROVAL RECOMMENDED - All evaluation criteria successfully met.",
            Self::Rejected => {
                "REJECTION RECOMMENDED - One or more critical evaluation criteria failed."
            }
            Self::NeedsMoreInfo => {
                "FURTHER REVIEW REQUIRED - Evaluation incomplete or requires additional information."
            }
        }
    }
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Approved => write!(f, "approved"),
            Self::Rejected => write!(f, "rejected"),
            Self::NeedsMoreInfo => write!(f, "needs_more_info"),
        }
    }
}

// ---------------------------------------------------------------------------
// KYC / AML
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KycDocuments {
    #[serde(alias = "identityVerified")]
    pub identity_verified: bool,
    #[serde(alias = "addressVerified")]
    pub address_verified: bool,
    #[serde(alias = "businessRegistration")]
    pub business_registration: bool,
    #[serde(alias = "financialStatements")]
    pub financial_statements: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KycReview {
    pub status: StepStatus,
    pub notes: String,
    pub documents: KycDocuments,
}

impl KycReview {
    pub fn all_documents_verified(&self) -> bool {
        let d = &self.documents;
        d.identity_verified && d.address_verified && d.business_registration && d.financial_statements
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AmlChecks {
    #[serde(alias = "sanctionsList")]
    pub sanctions_list: bool,
    #[serde(alias = "pepCheck")]
    pub pep_check: bool,
    #[serde(alias = "adverseMedia")]
    pub adverse_media: bool,
    #[serde(alias = "sourceOfFunds")]
    pub source_of_funds: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AmlReview {
    pub status: StepStatus,
    pub notes: String,
    pub checks: AmlChecks,
}

impl AmlReview {
    pub fn all_checks_cleared(&self) -> bool {
        let c = &self.checks;
        c.sanctions_list && c.pep_check && c.adverse_media && c.source_of_funds
    }
}
