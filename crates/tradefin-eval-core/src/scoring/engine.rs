use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::ratios::DerivedRatios;
use crate::types::Ratio;
use crate::{TradeFinError, TradeFinResult};

// ---------------------------------------------------------------------------
// Coefficients
// ---------------------------------------------------------------------------

// MTF-Z discriminant weights. X7 and X8 carry negative weight.
pub const W_X1: Decimal = dec!(0.65);
pub const W_X2: Decimal = dec!(0.80);
pub const W_X3: Decimal = dec!(3.10);
pub const W_X4: Decimal = dec!(0.40);
pub const W_X5: Decimal = dec!(0.95);
pub const W_X6: Decimal = dec!(1.60);
pub const W_X7: Decimal = dec!(-1.20);
pub const W_X8: Decimal = dec!(-1.00);

/// Decimal places of the presented score.
pub const SCORE_DISPLAY_DP: u32 = 3;

pub const FORMULA: &str = "MTF-Z = 0.65*X1 + 0.80*X2 + 3.10*X3 + 0.40*X4 + 0.95*X5 \
                           + 1.60*X6 - 1.20*X7 - 1.00*X8";

const COMPONENT_NAMES: [&str; 8] = [
    "X1: Working Capital / Total Assets",
    "X2: Retained Earnings / Total Assets",
    "X3: EBIT / Total Assets",
    "X4: Equity / Total Liabilities",
    "X5: Sales / Total Assets",
    "X6: On-Time Payment Rate",
    "X7: Top-Client Concentration",
    "X8: Payment Dilution Index",
];

const WEIGHTS: [Decimal; 8] = [W_X1, W_X2, W_X3, W_X4, W_X5, W_X6, W_X7, W_X8];

/// One weighted term of the MTF-Z sum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub name: String,
    pub ratio: Ratio,
    pub weight: Decimal,
    pub weighted_value: Decimal,
}

/// Unrounded MTF-Z score.
///
/// Checked throughout: a weighted term or running sum outside the `Decimal`
/// range is reported as invalid input instead of panicking.
pub fn calculate_score(ratios: &DerivedRatios) -> TradeFinResult<Decimal> {
    score_components(ratios)?
        .iter()
        .try_fold(Decimal::ZERO, |sum, c| {
            sum.checked_add(c.weighted_value)
                .ok_or_else(|| overflow("score", "MTF-Z weighted sum"))
        })
}

/// Round a score to three places, halves away from zero.
pub fn round_score(score: Decimal) -> Decimal {
    score.round_dp_with_strategy(SCORE_DISPLAY_DP, RoundingStrategy::MidpointAwayFromZero)
}

/// Per-ratio breakdown, in X1..X8 order.
pub fn score_components(ratios: &DerivedRatios) -> TradeFinResult<Vec<ScoreComponent>> {
    COMPONENT_NAMES
        .iter()
        .zip(WEIGHTS)
        .zip(ratios.as_array())
        .map(|((name, weight), ratio)| {
            weight
                .checked_mul(ratio)
                .map(|weighted_value| ScoreComponent {
                    name: name.to_string(),
                    ratio,
                    weight,
                    weighted_value,
                })
                .ok_or_else(|| overflow(&name[..2], name))
        })
        .collect()
}

/// Components of an all-zero ratio set.
pub(crate) fn zero_components() -> Vec<ScoreComponent> {
    COMPONENT_NAMES
        .iter()
        .zip(WEIGHTS)
        .map(|(name, weight)| ScoreComponent {
            name: name.to_string(),
            ratio: Decimal::ZERO,
            weight,
            weighted_value: Decimal::ZERO,
        })
        .collect()
}

fn overflow(field: &str, term: &str) -> TradeFinError {
    TradeFinError::invalid(field, format!("{term} exceeds the representable Decimal range."))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
