use serde::{Deserialize, Serialize};

use super::review::{RiskLevel, StepStatus};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChecklistStatus {
    Complete,
    /// Not applicable to this transaction.
    Na,
    Followup,
    #[default]
    Pending,
}

impl std::fmt::Display for ChecklistStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Complete => write!(f, "complete"),
            Self::Na => write!(f, "na"),
            Self::Followup => write!(f, "followup"),
            Self::Pending => write!(f, "pending"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChecklistItem {
    pub status: ChecklistStatus,
    pub notes: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChecklistCategory {
    CounterpartyRisk,
    TransactionStructure,
    MarketCommodityRisk,
}

impl ChecklistCategory {
    pub fn label(self) -> &'static str {
        match self {
            Self::CounterpartyRisk => "Counterparty Risk",
            Self::TransactionStructure => "Transaction Structure",
            Self::MarketCommodityRisk => "Market & Commodity Risk",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CounterpartyRisk {
    #[serde(alias = "borrowerCredit")]
    pub borrower_credit: ChecklistItem,
    #[serde(alias = "supplierVerification")]
    pub supplier_verification: ChecklistItem,
    #[serde(alias = "managementQuality")]
    pub management_quality: ChecklistItem,
    #[serde(alias = "relationshipHistory")]
    pub relationship_history: ChecklistItem,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransactionStructure {
    #[serde(alias = "collateralEvaluation")]
    pub collateral_evaluation: ChecklistItem,
    #[serde(alias = "tradeDocumentation")]
    pub trade_documentation: ChecklistItem,
    #[serde(alias = "paymentTerms")]
    pub payment_terms: ChecklistItem,
    #[serde(alias = "transactionPurpose")]
    pub transaction_purpose: ChecklistItem,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketCommodityRisk {
    #[serde(alias = "commodityPrice")]
    pub commodity_price: ChecklistItem,
    #[serde(alias = "marketDemand")]
    pub market_demand: ChecklistItem,
    #[serde(alias = "currencyRisk")]
    pub currency_risk: ChecklistItem,
    #[serde(alias = "supplyChainStability")]
    pub supply_chain_stability: ChecklistItem,
}

/// Three-category due-diligence checklist of the risk assessment step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskChecklist {
    #[serde(alias = "counterpartyRisk")]
    pub counterparty_risk: CounterpartyRisk,
    #[serde(alias = "transactionStructure")]
    pub transaction_structure: TransactionStructure,
    #[serde(alias = "marketCommodityRisk")]
    pub market_commodity_risk: MarketCommodityRisk,
}

/// Borrowed view of one checklist line.
#[derive(Debug, Clone, Copy)]
pub struct ChecklistEntry<'a> {
    pub category: ChecklistCategory,
    pub name: &'static str,
    pub item: &'a ChecklistItem,
}

impl RiskChecklist {
    /// All twelve items in display order.
    pub fn entries(&self) -> Vec<ChecklistEntry<'_>> {
        let cp_cat = ChecklistCategory::CounterpartyRisk;
        let ts_cat = ChecklistCategory::TransactionStructure;
        let mc_cat = ChecklistCategory::MarketCommodityRisk;
        let cp = &self.counterparty_risk;
        let ts = &self.transaction_structure;
        let mc = &self.market_commodity_risk;
        [
            (cp_cat, "Borrower Credit", &cp.borrower_credit),
            (cp_cat, "Supplier Verification", &cp.supplier_verification),
            (cp_cat, "Management Quality", &cp.management_quality),
            (cp_cat, "Relationship History", &cp.relationship_history),
            (ts_cat, "Collateral Evaluation", &ts.collateral_evaluation),
            (ts_cat, "Trade Documentation", &ts.trade_documentation),
            (ts_cat, "Payment Terms", &ts.payment_terms),
            (ts_cat, "Transaction Purpose", &ts.transaction_purpose),
            (mc_cat, "Commodity Price", &mc.commodity_price),
            (mc_cat, "Market Demand", &mc.market_demand),
            (mc_cat, "Currency Risk", &mc.currency_risk),
            (mc_cat, "Supply Chain Stability", &mc.supply_chain_stability),
        ]
        .into_iter()
        .map(|(category, name, item)| ChecklistEntry {
            category,
            name,
            item,
        })
        .collect()
    }

    pub fn count(&self, status: ChecklistStatus) -> usize {
        self.entries()
            .iter()
            .filter(|e| e.item.status == status)
            .count()
    }

    /// Items flagged for follow-up, as "Category: Item".
    pub fn follow_ups(&self) -> Vec<String> {
        self.entries()
            .iter()
            .filter(|e| e.item.status == ChecklistStatus::Followup)
            .map(|e| format!("{}: {}", e.category.label(), e.name))
            .collect()
    }

    /// Every item is either complete or not applicable.
    pub fn is_resolved(&self) -> bool {
        self.entries()
            .iter()
            .all(|e| matches!(e.item.status, ChecklistStatus::Complete | ChecklistStatus::Na))
    }
}

/// Per-dimension risk levels; `None` means not yet assessed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskFactors {
    pub country: Option<RiskLevel>,
    pub industry: Option<RiskLevel>,
    #[serde(alias = "transactionAmount")]
    pub transaction_amount: Option<RiskLevel>,
    #[serde(alias = "clientProfile")]
    pub client_profile: Option<RiskLevel>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskAssessment {
    pub status: StepStatus,
    pub notes: String,
    #[serde(alias = "riskLevel")]
    pub risk_level: RiskLevel,
    pub factors: RiskFactors,
    pub checklist: RiskChecklist,
}
