use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::str::FromStr;

use crate::types::{Money, Rate};
use crate::{TradeFinError, TradeFinResult};

// ---------------------------------------------------------------------------
// Input type
// ---------------------------------------------------------------------------

/// Raw evaluator-entered inputs to the MTF-Z model.
///
/// Field names accept both the snake_case form and the camelCase form used
/// by the portal's evaluation documents. Missing fields and `null` read as
/// zero; anything that is not a number or a numeric string is rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringFactors {
    #[serde(alias = "workingCapital", deserialize_with = "lenient_decimal")]
    pub working_capital: Money,
    /// Denominator of X1, X2, X3 and X5.
    #[serde(alias = "totalAssets", deserialize_with = "lenient_decimal")]
    pub total_assets: Money,
    /// May be negative (accumulated deficit).
    #[serde(alias = "retainedEarnings", deserialize_with = "lenient_decimal")]
    pub retained_earnings: Money,
    /// Earnings before interest and tax. May be negative.
    #[serde(deserialize_with = "lenient_decimal")]
    pub ebit: Money,
    #[serde(deserialize_with = "lenient_decimal")]
    pub equity: Money,
    /// Denominator of X4.
    #[serde(alias = "totalLiabilities", deserialize_with = "lenient_decimal")]
    pub total_liabilities: Money,
    #[serde(deserialize_with = "lenient_decimal")]
    pub sales: Money,
    /// Historical share of invoices paid on time, 0-1 scale.
    #[serde(alias = "onTimePaymentRate", deserialize_with = "lenient_decimal")]
    pub on_time_payment_rate: Rate,
    /// Share of revenue from the largest buyer, 0-1 scale.
    #[serde(alias = "topClientConcentration", deserialize_with = "lenient_decimal")]
    pub top_client_concentration: Rate,
    /// Observed payment shortfall / dilution, 0-1 scale.
    #[serde(alias = "paymentDilutionIndex", deserialize_with = "lenient_decimal")]
    pub payment_dilution_index: Rate,
}

/// Addressable field of [`ScoringFactors`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FactorField {
    WorkingCapital,
    TotalAssets,
    RetainedEarnings,
    Ebit,
    Equity,
    TotalLiabilities,
    Sales,
    OnTimePaymentRate,
    TopClientConcentration,
    PaymentDilutionIndex,
}

impl FactorField {
    pub const ALL: [FactorField; 10] = [
        FactorField::WorkingCapital,
        FactorField::TotalAssets,
        FactorField::RetainedEarnings,
        FactorField::Ebit,
        FactorField::Equity,
        FactorField::TotalLiabilities,
        FactorField::Sales,
        FactorField::OnTimePaymentRate,
        FactorField::TopClientConcentration,
        FactorField::PaymentDilutionIndex,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Self::WorkingCapital => "working_capital",
            Self::TotalAssets => "total_assets",
            Self::RetainedEarnings => "retained_earnings",
            Self::Ebit => "ebit",
            Self::Equity => "equity",
            Self::TotalLiabilities => "total_liabilities",
            Self::Sales => "sales",
            Self::OnTimePaymentRate => "on_time_payment_rate",
            Self::TopClientConcentration => "top_client_concentration",
            Self::PaymentDilutionIndex => "payment_dilution_index",
        }
    }

    pub fn camel_key(self) -> &'static str {
        match self {
            Self::WorkingCapital => "workingCapital",
            Self::TotalAssets => "totalAssets",
            Self::RetainedEarnings => "retainedEarnings",
            Self::Ebit => "ebit",
            Self::Equity => "equity",
            Self::TotalLiabilities => "totalLiabilities",
            Self::Sales => "sales",
            Self::OnTimePaymentRate => "onTimePaymentRate",
            Self::TopClientConcentration => "topClientConcentration",
            Self::PaymentDilutionIndex => "paymentDilutionIndex",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::WorkingCapital => "Working Capital",
            Self::TotalAssets => "Total Assets",
            Self::RetainedEarnings => "Retained Earnings",
            Self::Ebit => "EBIT",
            Self::Equity => "Equity",
            Self::TotalLiabilities => "Total Liabilities",
            Self::Sales => "Sales",
            Self::OnTimePaymentRate => "On-Time Payment Rate",
            Self::TopClientConcentration => "Top-Client Concentration",
            Self::PaymentDilutionIndex => "Payment Dilution Index",
        }
    }

    /// Look up a field by either its snake_case or camelCase key.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|f| f.key() == key || f.camel_key() == key)
    }

    /// Behavioural inputs documented on a 0-1 scale (X6, X7, X8).
    pub fn is_unit_interval(self) -> bool {
        matches!(
            self,
            Self::OnTimePaymentRate | Self::TopClientConcentration | Self::PaymentDilutionIndex
        )
    }
}

impl std::fmt::Display for FactorField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl ScoringFactors {
    pub fn get(&self, field: FactorField) -> Decimal {
        match field {
            FactorField::WorkingCapital => self.working_capital,
            FactorField::TotalAssets => self.total_assets,
            FactorField::RetainedEarnings => self.retained_earnings,
            FactorField::Ebit => self.ebit,
            FactorField::Equity => self.equity,
            FactorField::TotalLiabilities => self.total_liabilities,
            FactorField::Sales => self.sales,
            FactorField::OnTimePaymentRate => self.on_time_payment_rate,
            FactorField::TopClientConcentration => self.top_client_concentration,
            FactorField::PaymentDilutionIndex => self.payment_dilution_index,
        }
    }

    pub fn set(&mut self, field: FactorField, value: Decimal) {
        let slot = match field {
            FactorField::WorkingCapital => &mut self.working_capital,
            FactorField::TotalAssets => &mut self.total_assets,
            FactorField::RetainedEarnings => &mut self.retained_earnings,
            FactorField::Ebit => &mut self.ebit,
            FactorField::Equity => &mut self.equity,
            FactorField::TotalLiabilities => &mut self.total_liabilities,
            FactorField::Sales => &mut self.sales,
            FactorField::OnTimePaymentRate => &mut self.on_time_payment_rate,
            FactorField::TopClientConcentration => &mut self.top_client_concentration,
            FactorField::PaymentDilutionIndex => &mut self.payment_dilution_index,
        };
        *slot = value;
    }

    /// Build factors from a loosely-typed JSON object, reporting the
    /// offending field on bad input.
    ///
    /// Keys that are not scoring factors (for example stored `x1_ratio`
    /// values) are ignored; they are derived and always recomputed.
    pub fn from_json(value: &Value) -> TradeFinResult<Self> {
        let map = value
            .as_object()
            .ok_or_else(|| TradeFinError::invalid("factors", "Expected a JSON object."))?;

        let mut factors = ScoringFactors::default();
        for (key, raw) in map {
            if let Some(field) = FactorField::from_key(key) {
                factors.set(field, coerce_decimal(field, raw)?);
            }
        }
        Ok(factors)
    }
}

/// Parse a partial factor update. Every key must name a scoring factor.
///
/// Nothing is applied here, so a bad entry anywhere in the patch leaves the
/// caller's factors untouched.
pub fn parse_factor_patch(value: &Value) -> TradeFinResult<Vec<(FactorField, Decimal)>> {
    let map = value
        .as_object()
        .ok_or_else(|| TradeFinError::invalid("factors", "Expected a JSON object."))?;

    if map.is_empty() {
        return Err(TradeFinError::InsufficientData(
            "Factor update contains no fields.".to_string(),
        ));
    }

    map.iter()
        .map(|(key, raw)| {
            let field = FactorField::from_key(key).ok_or_else(|| {
                TradeFinError::invalid(
                    key.as_str(),
                    "Not a scoring factor; derived ratios and scores cannot be set directly.",
                )
            })?;
            Ok((field, coerce_decimal(field, raw)?))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Coercion
// ---------------------------------------------------------------------------

/// Coerce a JSON value into a Decimal for the given field.
///
/// `null` and blank strings read as zero (empty form inputs). Numbers and
/// numeric strings are accepted, including scientific notation. Booleans,
/// arrays, objects and non-numeric strings fail.
pub fn coerce_decimal(field: FactorField, value: &Value) -> TradeFinResult<Decimal> {
    coerce_value(value).map_err(|reason| TradeFinError::invalid(field.key(), reason))
}

fn coerce_value(value: &Value) -> Result<Decimal, String> {
    match value {
        Value::Null => Ok(Decimal::ZERO),
        Value::Number(n) => parse_numeric(&n.to_string()),
        Value::String(s) if s.trim().is_empty() => Ok(Decimal::ZERO),
        Value::String(s) => parse_numeric(s.trim()),
        Value::Bool(_) => Err("Expected a number, found a boolean.".to_string()),
        Value::Array(_) => Err("Expected a number, found an array.".to_string()),
        Value::Object(_) => Err("Expected a number, found an object.".to_string()),
    }
}

fn parse_numeric(text: &str) -> Result<Decimal, String> {
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .map_err(|_| format!("'{text}' is not a representable decimal number."))
}

fn lenient_decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Value::deserialize(deserializer)?;
    coerce_value(&raw).map_err(serde::de::Error::custom)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
