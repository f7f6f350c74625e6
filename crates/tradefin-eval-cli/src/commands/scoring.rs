use clap::Args;
use rust_decimal::Decimal;
use serde_json::{json, Value};

use tradefin_eval_core::scoring::{self, classify_score, round_score, FactorField, ScoringFactors};

use crate::input;

/// Arguments for MTF-Z scoring
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct ScoreArgs {
    /// Path to JSON or YAML factors file (flags below override its values)
    #[arg(long)]
    pub input: Option<String>,

    /// Current assets minus current liabilities
    #[arg(long)]
    pub working_capital: Option<Decimal>,

    /// Total assets
    #[arg(long)]
    pub total_assets: Option<Decimal>,

    /// Retained earnings
    #[arg(long)]
    pub retained_earnings: Option<Decimal>,

    /// Earnings before interest and taxes
    #[arg(long)]
    pub ebit: Option<Decimal>,

    /// Shareholders' equity
    #[arg(long)]
    pub equity: Option<Decimal>,

    /// Total liabilities
    #[arg(long)]
    pub total_liabilities: Option<Decimal>,

    /// Annual sales
    #[arg(long)]
    pub sales: Option<Decimal>,

    /// Share of invoices paid on time (0-1)
    #[arg(long, alias = "otp")]
    pub on_time_payment_rate: Option<Decimal>,

    /// Largest client's share of revenue (0-1)
    #[arg(long)]
    pub top_client_concentration: Option<Decimal>,

    /// Share of invoice value lost to dilution (0-1)
    #[arg(long)]
    pub payment_dilution_index: Option<Decimal>,
}

impl ScoreArgs {
    fn overrides(&self) -> Vec<(FactorField, Decimal)> {
        [
            (FactorField::WorkingCapital, self.working_capital),
            (FactorField::TotalAssets, self.total_assets),
            (FactorField::RetainedEarnings, self.retained_earnings),
            (FactorField::Ebit, self.ebit),
            (FactorField::Equity, self.equity),
            (FactorField::TotalLiabilities, self.total_liabilities),
            (FactorField::Sales, self.sales),
            (FactorField::OnTimePaymentRate, self.on_time_payment_rate),
            (FactorField::TopClientConcentration, self.top_client_concentration),
            (FactorField::PaymentDilutionIndex, self.payment_dilution_index),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.map(|v| (field, v)))
        .collect()
    }
}

/// Arguments for score classification
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct ClassifyArgs {
    /// MTF-Z score to classify
    #[arg(long)]
    pub score: Decimal,
}

pub fn run_score(args: ScoreArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let overrides = args.overrides();
    let mut factors = load_factors(args.input.as_deref(), overrides.is_empty())?;
    for (field, value) in overrides {
        factors.set(field, value);
    }

    let result = scoring::calculate_mtfz_score(&factors)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_classify(args: ClassifyArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let category = classify_score(args.score);
    Ok(json!({
        "score": args.score,
        "display_score": round_score(args.score),
        "risk_category": category,
        "risk_label": category.label(),
        "investment_grade": category.is_investment_grade(),
        "requires_collateral": category.requires_collateral(),
    }))
}

/// Factors from `--input`, else piped stdin (only when no factor flags were
/// given), else all zero.
fn load_factors(
    path: Option<&str>,
    read_stdin: bool,
) -> Result<ScoringFactors, Box<dyn std::error::Error>> {
    let document = if let Some(path) = path {
        Some(input::file::read_document_value(path)?)
    } else if read_stdin {
        input::stdin::read_stdin()?
    } else {
        None
    };

    match document {
        Some(value) => Ok(ScoringFactors::from_json(factors_section(&value))?),
        None => Ok(ScoringFactors::default()),
    }
}

/// Accept either a bare factors object or one nested under `factors`.
fn factors_section(value: &Value) -> &Value {
    match value.get("factors") {
        Some(inner) if inner.is_object() => inner,
        _ => value,
    }
}
