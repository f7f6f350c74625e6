use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use super::checklist::RiskAssessment;
use super::credit::CreditScoringStep;
use super::review::{AmlReview, Decision, KycReview, RiskLevel, StepStatus};
use crate::scoring::{FactorField, ScoreResult, ScoringFactors};
use crate::types::Money;
use crate::TradeFinResult;

/// Number of review steps counted towards progress.
pub const TOTAL_STEPS: u8 = 3;

const IN_PROGRESS_COMMENT: &str = "Step-by-step evaluation in progress";

// ---------------------------------------------------------------------------
// Aggregate
// ---------------------------------------------------------------------------

/// One application's credit, KYC, AML and risk review.
///
/// Single writer: every mutation goes through `&mut self`, and every factor
/// mutation recomputes the MTF-Z result before returning. Progress and the
/// overall decision are derived on read and never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    #[serde(alias = "applicationId")]
    application_id: String,
    #[serde(alias = "evaluatorId", default)]
    evaluator_id: String,
    #[serde(alias = "creditScoring", default)]
    credit_scoring: CreditScoringStep,
    #[serde(default)]
    kyc: KycReview,
    #[serde(default)]
    aml: AmlReview,
    #[serde(alias = "riskAssessment", default)]
    risk_assessment: RiskAssessment,
    #[serde(alias = "finalNotes", default)]
    final_notes: String,
    #[serde(alias = "createdAt", default = "Utc::now")]
    created_at: DateTime<Utc>,
    #[serde(alias = "updatedAt", default = "Utc::now")]
    updated_at: DateTime<Utc>,
}

/// Payload recorded when an evaluator saves a step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationSubmission {
    pub application_id: String,
    pub decision: Decision,
    pub score: Decimal,
    pub comments: String,
    pub risk_assessment: RiskLevel,
    pub recommended_amount: Money,
    pub conditions: Vec<String>,
}

/// Read model combining stored fields with everything derived from them.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationReport {
    pub evaluation: Evaluation,
    pub completed_steps: u8,
    pub total_steps: u8,
    pub overall_status: StepStatus,
    pub decision: Decision,
    pub recommendation: String,
    pub suggested_risk_level: RiskLevel,
    pub submission: EvaluationSubmission,
}

impl Evaluation {
    pub fn new(application_id: impl Into<String>, evaluator_id: impl Into<String>) -> Self {
        let now = Utc::now();
        Evaluation {
            application_id: application_id.into(),
            evaluator_id: evaluator_id.into(),
            credit_scoring: CreditScoringStep::default(),
            kyc: KycReview::default(),
            aml: AmlReview::default(),
            risk_assessment: RiskAssessment::default(),
            final_notes: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Load from a stored document. Any stored score is recomputed.
    pub fn from_json(value: Value) -> TradeFinResult<Self> {
        let evaluation: Evaluation = serde_json::from_value(value)?;
        evaluation.log_score();
        Ok(evaluation)
    }

    // -- Accessors -----------------------------------------------------------

    pub fn application_id(&self) -> &str {
        &self.application_id
    }

    pub fn evaluator_id(&self) -> &str {
        &self.evaluator_id
    }

    pub fn credit_scoring(&self) -> &CreditScoringStep {
        &self.credit_scoring
    }

    pub fn factors(&self) -> &ScoringFactors {
        self.credit_scoring.factors()
    }

    pub fn score(&self) -> &ScoreResult {
        self.credit_scoring.result()
    }

    pub fn kyc(&self) -> &KycReview {
        &self.kyc
    }

    pub fn aml(&self) -> &AmlReview {
        &self.aml
    }

    pub fn risk_assessment(&self) -> &RiskAssessment {
        &self.risk_assessment
    }

    pub fn final_notes(&self) -> &str {
        &self.final_notes
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    // -- Factor mutation (always recomputes) ---------------------------------

    /// Every factor setter is all-or-nothing: on error the factors, score
    /// and `updated_at` are left as they were.
    pub fn set_factor(
        &mut self,
        field: FactorField,
        value: Decimal,
    ) -> TradeFinResult<&ScoreResult> {
        self.credit_scoring.set_factor(field, value)?;
        Ok(self.after_factor_change())
    }

    pub fn set_factors(&mut self, factors: ScoringFactors) -> TradeFinResult<&ScoreResult> {
        self.credit_scoring.set_factors(factors)?;
        Ok(self.after_factor_change())
    }

    pub fn update_factors<F>(&mut self, edit: F) -> TradeFinResult<&ScoreResult>
    where
        F: FnOnce(&mut ScoringFactors),
    {
        self.credit_scoring.update_factors(edit)?;
        Ok(self.after_factor_change())
    }

    pub fn apply_factor_patch(&mut self, patch: &Value) -> TradeFinResult<&ScoreResult> {
        self.credit_scoring.apply_patch(patch)?;
        Ok(self.after_factor_change())
    }

    fn after_factor_change(&mut self) -> &ScoreResult {
        self.touch();
        self.log_score();
        self.credit_scoring.result()
    }

    fn log_score(&self) {
        let result = self.credit_scoring.result();
        debug!(
            application_id = %self.application_id,
            score = %result.display_score,
            risk_category = ?result.risk_category,
            "MTF-Z score recomputed"
        );
    }

    // -- Review steps --------------------------------------------------------

    pub fn set_credit_status(&mut self, status: StepStatus) {
        self.credit_scoring.status = status;
        self.touch();
    }

    pub fn set_credit_notes(&mut self, notes: impl Into<String>) {
        self.credit_scoring.notes = notes.into();
        self.touch();
    }

    pub fn kyc_mut(&mut self) -> &mut KycReview {
        self.touch();
        &mut self.kyc
    }

    pub fn aml_mut(&mut self) -> &mut AmlReview {
        self.touch();
        &mut self.aml
    }

    pub fn risk_assessment_mut(&mut self) -> &mut RiskAssessment {
        self.touch();
        &mut self.risk_assessment
    }

    pub fn set_final_notes(&mut self, notes: impl Into<String>) {
        self.final_notes = notes.into();
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    // -- Derived -------------------------------------------------------------

    /// Steps reviewed so far: credit scoring, KYC and AML together, and
    /// risk assessment.
    pub fn completed_steps(&self) -> u8 {
        let mut completed = 0;
        if !self.credit_scoring.status.is_pending() {
            completed += 1;
        }
        if !self.kyc.status.is_pending() && !self.aml.status.is_pending() {
            completed += 1;
        }
        if !self.risk_assessment.status.is_pending() {
            completed += 1;
        }
        completed
    }

    /// Any rejection rejects; all four approved approves.
    pub fn decision(&self) -> Decision {
        let statuses = self.step_statuses();
        if statuses.contains(&StepStatus::Rejected) {
            Decision::Rejected
        } else if statuses.iter().all(|s| *s == StepStatus::Approved) {
            Decision::Approved
        } else {
            Decision::NeedsMoreInfo
        }
    }

    pub fn overall_status(&self) -> StepStatus {
        match self.decision() {
            Decision::Approved => StepStatus::Approved,
            Decision::Rejected => StepStatus::Rejected,
            Decision::NeedsMoreInfo => StepStatus::Pending,
        }
    }

    /// Risk level implied by the current MTF-Z category.
    pub fn suggested_risk_level(&self) -> RiskLevel {
        RiskLevel::from(self.score().risk_category)
    }

    pub fn submission(&self) -> EvaluationSubmission {
        let comments = if self.final_notes.trim().is_empty() {
            IN_PROGRESS_COMMENT.to_string()
        } else {
            self.final_notes.clone()
        };

        EvaluationSubmission {
            application_id: self.application_id.clone(),
            decision: self.decision(),
            score: self.score().display_score,
            comments,
            risk_assessment: self.risk_assessment.risk_level,
            recommended_amount: Decimal::ZERO,
            conditions: self.risk_assessment.checklist.follow_ups(),
        }
    }

    pub fn report(&self) -> EvaluationReport {
        let decision = self.decision();
        EvaluationReport {
            evaluation: self.clone(),
            completed_steps: self.completed_steps(),
            total_steps: TOTAL_STEPS,
            overall_status: self.overall_status(),
            decision,
            recommendation: decision.recommendation().to_string(),
            suggested_risk_level: self.suggested_risk_level(),
            submission: self.submission(),
        }
    }

    fn step_statuses(&self) -> [StepStatus; 4] {
        [
            self.credit_scoring.status,
            self.kyc.status,
            self.aml.status,
            self.risk_assessment.status,
        ]
    }
}
