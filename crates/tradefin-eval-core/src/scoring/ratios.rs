use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::factors::{FactorField, ScoringFactors};
use crate::types::Ratio;
use crate::{TradeFinError, TradeFinResult};

/// Decimal places used when presenting ratios.
pub const RATIO_DISPLAY_DP: u32 = 4;

/// The eight MTF-Z inputs derived from [`ScoringFactors`].
///
/// Never set independently: always produced by [`calculate_ratios`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedRatios {
    /// Working Capital / Total Assets
    pub x1: Ratio,
    /// Retained Earnings / Total Assets
    pub x2: Ratio,
    /// EBIT / Total Assets
    pub x3: Ratio,
    /// Equity / Total Liabilities
    pub x4: Ratio,
    /// Sales / Total Assets
    pub x5: Ratio,
    /// On-time payment rate
    pub x6: Ratio,
    /// Top-client concentration
    pub x7: Ratio,
    /// Payment dilution index
    pub x8: Ratio,
}

impl DerivedRatios {
    /// Copy with every ratio rounded to four decimal places.
    pub fn rounded(&self) -> DerivedRatios {
        let r = |v: Decimal| {
            v.round_dp_with_strategy(RATIO_DISPLAY_DP, RoundingStrategy::MidpointAwayFromZero)
        };
        DerivedRatios {
            x1: r(self.x1),
            x2: r(self.x2),
            x3: r(self.x3),
            x4: r(self.x4),
            x5: r(self.x5),
            x6: r(self.x6),
            x7: r(self.x7),
            x8: r(self.x8),
        }
    }

    /// Ratios in X1..X8 order.
    pub fn as_array(&self) -> [Ratio; 8] {
        [
            self.x1, self.x2, self.x3, self.x4, self.x5, self.x6, self.x7, self.x8,
        ]
    }
}

/// Compute X1..X8.
///
/// Balance-sheet ratios whose denominator is not positive are defined as
/// zero so a score can always be produced from partial data. X6..X8 are
/// passed through without clamping. A quotient too large for `Decimal`
/// (a tiny positive denominator) is an error, never a zero.
pub fn calculate_ratios(factors: &ScoringFactors) -> TradeFinResult<DerivedRatios> {
    use FactorField::*;

    Ok(DerivedRatios {
        x1: ratio_or_zero(factors, "X1", WorkingCapital, TotalAssets)?,
        x2: ratio_or_zero(factors, "X2", RetainedEarnings, TotalAssets)?,
        x3: ratio_or_zero(factors, "X3", Ebit, TotalAssets)?,
        x4: ratio_or_zero(factors, "X4", Equity, TotalLiabilities)?,
        x5: ratio_or_zero(factors, "X5", Sales, TotalAssets)?,
        x6: factors.on_time_payment_rate,
        x7: factors.top_client_concentration,
        x8: factors.payment_dilution_index,
    })
}

fn ratio_or_zero(
    factors: &ScoringFactors,
    name: &str,
    numerator: FactorField,
    denominator: FactorField,
) -> TradeFinResult<Ratio> {
    let den = factors.get(denominator);
    if den <= Decimal::ZERO {
        return Ok(Decimal::ZERO);
    }
    factors.get(numerator).checked_div(den).ok_or_else(|| {
        TradeFinError::invalid(
            denominator.key(),
            format!("{name} = {numerator} / {denominator} overflows; {denominator} is too small."),
        )
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
