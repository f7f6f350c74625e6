//! MTF-Z trade finance credit scoring.
//!
//! Pipeline: [`ScoringFactors`] -> [`calculate_ratios`] -> [`calculate_score`]
//! -> [`classify_score`]. Every step is pure: zero denominators produce zero
//! ratios rather than errors, so a score exists for any partial set of
//! inputs. Arithmetic is checked; a ratio or weighted sum that leaves the
//! `Decimal` range is reported as [`crate::TradeFinError::InvalidInput`].
//!
//! ```text
//! MTF-Z = 0.65*X1 + 0.80*X2 + 3.10*X3 + 0.40*X4 + 0.95*X5
//!       + 1.60*X6 - 1.20*X7 - 1.00*X8
//!
//!   > 2.8        Low Risk (Investment Grade)
//!   1.4 .. 2.8   Watch / Medium Risk
//!   < 1.4        High Risk (Requires Collateral)
//! ```

pub mod classifier;
pub mod engine;
pub mod factors;
pub mod ratios;
pub mod validation;

pub use classifier::{classify_score, RiskCategory};
pub use engine::{calculate_score, round_score, score_components, ScoreComponent};
pub use factors::{FactorField, ScoringFactors};
pub use ratios::{calculate_ratios, DerivedRatios};
pub use validation::validate_factors;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::warn;

use crate::types::{with_metadata, ComputationOutput};
use crate::TradeFinResult;

/// Score and category derived from one set of factors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreResult {
    /// Unrounded score, kept for audit reproducibility.
    pub score: Decimal,
    /// Score rounded to three decimal places for display and memos.
    pub display_score: Decimal,
    /// Classified from the unrounded score.
    pub risk_category: RiskCategory,
    pub risk_label: String,
    pub ratios: DerivedRatios,
    pub components: Vec<ScoreComponent>,
    pub warnings: Vec<String>,
}

impl ScoreResult {
    /// Result for all-zero factors: the state of a step nobody has scored.
    pub fn unscored() -> Self {
        let risk_category = classify_score(Decimal::ZERO);
        ScoreResult {
            score: Decimal::ZERO,
            display_score: Decimal::ZERO,
            risk_category,
            risk_label: risk_category.label().to_string(),
            ratios: DerivedRatios::default(),
            components: engine::zero_components(),
            warnings: validate_factors(&ScoringFactors::default()),
        }
    }
}

/// Run the full pipeline on a set of factors.
pub fn score_factors(factors: &ScoringFactors) -> TradeFinResult<ScoreResult> {
    let ratios = calculate_ratios(factors)?;
    let components = score_components(&ratios)?;
    let score = calculate_score(&ratios)?;
    let risk_category = classify_score(score);

    Ok(ScoreResult {
        score,
        display_score: round_score(score),
        risk_category,
        risk_label: risk_category.label().to_string(),
        components,
        ratios,
        warnings: validate_factors(factors),
    })
}

/// Compute the MTF-Z score wrapped in the standard computation envelope.
pub fn calculate_mtfz_score(
    factors: &ScoringFactors,
) -> TradeFinResult<ComputationOutput<ScoreResult>> {
    let start = Instant::now();

    let result = score_factors(factors)?;
    for w in &result.warnings {
        warn!(warning = %w, "scoring factor warning");
    }
    let warnings = result.warnings.clone();

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "formula": engine::FORMULA,
        "low_risk": format!("score > {}", classifier::LOW_RISK_ABOVE),
        "medium_risk": format!(
            "{} <= score <= {}",
            classifier::MEDIUM_RISK_FROM,
            classifier::LOW_RISK_ABOVE
        ),
        "high_risk": format!("score < {}", classifier::MEDIUM_RISK_FROM),
        "zero_denominator": "ratio defined as 0",
        "clamping": "X6-X8 scored as entered, out-of-range values warned",
        "rounding": "display_score rounded to 3 dp; classification uses the unrounded score",
    });

    Ok(with_metadata(
        "MTF-Z trade finance credit score",
        &assumptions,
        warnings,
        elapsed,
        result,
    ))
}
