use chrono::Utc;
use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;
use serde_json::json;
use std::str::FromStr;

use tradefin_eval_core::evaluation::{render_memo, Evaluation, MemoRequest};
use tradefin_eval_core::scoring::{self, classify_score, ScoringFactors};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Scoring
// ---------------------------------------------------------------------------

/// Factors JSON (snake_case or the portal's camelCase keys) -> score envelope.
#[napi]
pub fn mtfz_score(input_json: String) -> NapiResult<String> {
    let value: serde_json::Value = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let factors = ScoringFactors::from_json(&value).map_err(to_napi_error)?;
    let output = scoring::calculate_mtfz_score(&factors).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn classify_mtfz_score(score: String) -> NapiResult<String> {
    let score = Decimal::from_str(score.trim()).map_err(to_napi_error)?;
    let category = classify_score(score);
    serde_json::to_string(&json!({
        "risk_category": category,
        "risk_label": category.label(),
    }))
    .map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Evaluation
// ---------------------------------------------------------------------------

/// Stored evaluation JSON -> report with recomputed score, progress and
/// decision.
#[napi]
pub fn evaluate(input_json: String) -> NapiResult<String> {
    let value: serde_json::Value = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let evaluation = Evaluation::from_json(value).map_err(to_napi_error)?;
    serde_json::to_string(&evaluation.report()).map_err(to_napi_error)
}

/// `{ "application": {...}, "evaluation": {...} }` -> plain-text memo.
#[napi]
pub fn evaluation_memo(input_json: String) -> NapiResult<String> {
    let request: MemoRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    Ok(render_memo(
        &request.evaluation,
        &request.application,
        Utc::now(),
    ))
}
