use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::review::StepStatus;
use crate::scoring::factors::parse_factor_patch;
use crate::scoring::{score_factors, FactorField, ScoreResult, ScoringFactors};
use crate::{TradeFinError, TradeFinResult};

/// Credit scoring step of an evaluation.
///
/// The factors are the only source of truth; `result` is rewritten by every
/// method that touches them and cannot be set from outside. Deserializing
/// recomputes from the stored factors, so a persisted score never survives
/// a load.
///
/// Factor edits are all-or-nothing: the new factors are scored first and
/// only committed when scoring succeeds, so factors and result never
/// disagree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CreditScoringRecord")]
pub struct CreditScoringStep {
    pub status: StepStatus,
    pub notes: String,
    factors: ScoringFactors,
    result: ScoreResult,
}

/// Stored shape of the step. Anything beyond status, notes and factors
/// (e.g. `mtfzScore`, `riskCategory`) is ignored.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CreditScoringRecord {
    status: StepStatus,
    notes: String,
    factors: ScoringFactors,
}

impl TryFrom<CreditScoringRecord> for CreditScoringStep {
    type Error = TradeFinError;

    fn try_from(record: CreditScoringRecord) -> TradeFinResult<Self> {
        let mut step = CreditScoringStep::new(record.factors)?;
        step.status = record.status;
        step.notes = record.notes;
        Ok(step)
    }
}

impl Default for CreditScoringStep {
    fn default() -> Self {
        CreditScoringStep {
            status: StepStatus::Pending,
            notes: String::new(),
            factors: ScoringFactors::default(),
            result: ScoreResult::unscored(),
        }
    }
}

impl CreditScoringStep {
    pub fn new(factors: ScoringFactors) -> TradeFinResult<Self> {
        let result = score_factors(&factors)?;
        Ok(CreditScoringStep {
            status: StepStatus::Pending,
            notes: String::new(),
            factors,
            result,
        })
    }

    pub fn factors(&self) -> &ScoringFactors {
        &self.factors
    }

    pub fn result(&self) -> &ScoreResult {
        &self.result
    }

    pub fn set_factor(
        &mut self,
        field: FactorField,
        value: Decimal,
    ) -> TradeFinResult<&ScoreResult> {
        let mut candidate = self.factors.clone();
        candidate.set(field, value);
        self.commit(candidate)
    }

    pub fn set_factors(&mut self, factors: ScoringFactors) -> TradeFinResult<&ScoreResult> {
        self.commit(factors)
    }

    /// Edit several factors at once; the score is computed once at the end.
    pub fn update_factors<F>(&mut self, edit: F) -> TradeFinResult<&ScoreResult>
    where
        F: FnOnce(&mut ScoringFactors),
    {
        let mut candidate = self.factors.clone();
        edit(&mut candidate);
        self.commit(candidate)
    }

    /// Apply a JSON patch of factor values.
    pub fn apply_patch(&mut self, patch: &Value) -> TradeFinResult<&ScoreResult> {
        let mut candidate = self.factors.clone();
        for (field, value) in parse_factor_patch(patch)? {
            candidate.set(field, value);
        }
        self.commit(candidate)
    }

    fn commit(&mut self, factors: ScoringFactors) -> TradeFinResult<&ScoreResult> {
        self.result = score_factors(&factors)?;
        self.factors = factors;
        Ok(&self.result)
    }
}
