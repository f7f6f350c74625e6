use rust_decimal::Decimal;

use super::factors::{FactorField, ScoringFactors};

/// Collect warnings about factors that make the score less meaningful.
///
/// Nothing is altered: out-of-range behavioural inputs are scored as given
/// and non-positive denominators zero their ratios.
pub fn validate_factors(factors: &ScoringFactors) -> Vec<String> {
    let mut warnings = Vec::new();

    if factors.total_assets <= Decimal::ZERO {
        warnings.push(format!(
            "total_assets is {}; X1, X2, X3 and X5 are set to 0.",
            factors.total_assets
        ));
    }
    if factors.total_liabilities <= Decimal::ZERO {
        warnings.push(format!(
            "total_liabilities is {}; X4 is set to 0.",
            factors.total_liabilities
        ));
    }

    for field in FactorField::ALL.into_iter().filter(|f| f.is_unit_interval()) {
        let value = factors.get(field);
        if value < Decimal::ZERO || value > Decimal::ONE {
            warnings.push(format!(
                "{field} is {value}, outside the expected 0-1 scale; scored unclamped."
            ));
        }
    }

    warnings
}
