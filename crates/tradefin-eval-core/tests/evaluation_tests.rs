use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{json, Value};
use tradefin_eval_core::evaluation::{
    render_memo, ApplicationSummary, ChecklistStatus, Decision, Evaluation, MemoRequest,
    RiskLevel, StepStatus, TOTAL_STEPS,
};
use tradefin_eval_core::scoring::{FactorField, RiskCategory};
use tradefin_eval_core::TradeFinError;

// ===========================================================================
// Fixtures
// ===========================================================================

/// A stored evaluation document as the portal writes it, including a stale
/// score that disagrees with its factors.
fn portal_document() -> Value {
    json!({
        "applicationId": "665f1c2e9b1d4a0012ab34cd",
        "evaluatorId": "eval-007",
        "creditScoring": {
            "status": "approved",
            "notes": "Audited FY statements",
            "mtfzScore": 0.5,
            "riskCategory": "High Risk (Requires Collateral)",
            "factors": {
                "workingCapital": "200",
                "totalAssets": 1000,
                "retainedEarnings": 150,
                "ebit": 120,
                "equity": 400,
                "totalLiabilities": 600,
                "sales": 900,
                "onTimePaymentRate": 0.9,
                "topClientConcentration": 0.2,
                "paymentDilutionIndex": 0.1,
                "x1_ratio": 0.2
            }
        },
        "kyc": {
            "status": "approved",
            "notes": "",
            "documents": {
                "identityVerified": true,
                "businessRegistration": true,
                "addressVerified": true,
                "financialStatements": true
            }
        },
        "aml": {
            "status": "pending",
            "notes": ""
        },
        "riskAssessment": {
            "status": "pending",
            "riskLevel": "low",
            "factors": { "country": "medium" },
            "checklist": {
                "transactionStructure": {
                    "collateralEvaluation": { "status": "followup", "notes": "Warehouse receipt pending" }
                }
            }
        },
        "finalNotes": "",
        "createdAt": "2024-03-01T08:00:00Z",
        "updatedAt": "2024-03-02T08:00:00Z"
    })
}

// ===========================================================================
// Loading
// ===========================================================================

#[test]
fn test_stale_stored_score_is_recomputed_on_load() {
    let e = Evaluation::from_json(portal_document()).unwrap();
    assert_eq!(e.application_id(), "665f1c2e9b1d4a0012ab34cd");
    assert_eq!(e.evaluator_id(), "eval-007");
    assert_eq!(e.factors().working_capital, dec!(200));
    assert_eq!(e.score().display_score, dec!(2.844));
    assert_eq!(e.score().risk_category, RiskCategory::LowRisk);
    assert_eq!(
        e.created_at(),
        Utc.with_ymd_and_hms(2024, 3, 1, 8, 0, 0).unwrap()
    );
}

#[test]
fn test_load_rejects_non_numeric_factor() {
    let mut doc = portal_document();
    doc["creditScoring"]["factors"]["equity"] = json!("four hundred");
    let err = Evaluation::from_json(doc).unwrap_err();
    assert!(matches!(err, TradeFinError::SerializationError(_)));
}

// ===========================================================================
// Reactive contract
// ===========================================================================

#[test]
fn test_every_factor_edit_refreshes_score_and_timestamp() {
    let mut e = Evaluation::from_json(portal_document()).unwrap();
    let loaded_at = e.updated_at();

    let result = e
        .set_factor(FactorField::TopClientConcentration, dec!(0.9))
        .unwrap()
        .clone();
    // 2.8437 - 1.20 * 0.7 = 2.0037
    assert_eq!(result.display_score, dec!(2.004));
    assert_eq!(result.risk_category, RiskCategory::MediumRisk);
    assert!(e.updated_at() > loaded_at);

    let result = e
        .apply_factor_patch(&json!({ "ebit": -500, "onTimePaymentRate": "0.4" }))
        .unwrap();
    assert_eq!(result.risk_category, RiskCategory::HighRisk);
}

#[test]
fn test_rejected_patch_keeps_previous_state() {
    let mut e = Evaluation::from_json(portal_document()).unwrap();
    let before = e.clone();

    let err = e
        .apply_factor_patch(&json!({ "sales": 5000, "mtfzScore": 4.2 }))
        .unwrap_err();
    match err {
        TradeFinError::InvalidInput { field, .. } => assert_eq!(field, "mtfzScore"),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(e, before);
}

#[test]
fn test_patch_outside_decimal_range_keeps_previous_state() {
    let mut e = Evaluation::from_json(portal_document()).unwrap();
    let before = e.clone();

    let err = e
        .apply_factor_patch(&json!({ "sales": "1e20", "totalAssets": "0.0000000001" }))
        .unwrap_err();
    assert!(matches!(err, TradeFinError::InvalidInput { .. }));
    assert_eq!(e, before);

    let err = e
        .apply_factor_patch(&json!({ "onTimePaymentRate": "60000000000000000000000000000" }))
        .unwrap_err();
    assert!(matches!(err, TradeFinError::InvalidInput { .. }));
    assert_eq!(e, before);
    assert_eq!(e.score().display_score, dec!(2.844));
}

#[test]
fn test_score_always_matches_a_fresh_computation() {
    let mut e = Evaluation::new("app-1", "eval-1");
    let edits: Vec<(FactorField, Decimal)> = vec![
        (FactorField::TotalAssets, dec!(5000)),
        (FactorField::Sales, dec!(7500)),
        (FactorField::Ebit, dec!(-250)),
        (FactorField::TotalLiabilities, dec!(0)),
        (FactorField::Equity, dec!(1200)),
        (FactorField::TotalLiabilities, dec!(3000)),
        (FactorField::PaymentDilutionIndex, dec!(0.35)),
    ];
    for (field, value) in edits {
        e.set_factor(field, value).unwrap();
        let fresh = tradefin_eval_core::scoring::score_factors(e.factors()).unwrap();
        assert_eq!(e.score(), &fresh);
    }
}

// ===========================================================================
// Derived progress and decision
// ===========================================================================

#[test]
fn test_progress_and_submission_from_portal_document() {
    let mut e = Evaluation::from_json(portal_document()).unwrap();
    // credit approved; KYC approved but AML pending; risk pending
    assert_eq!(e.completed_steps(), 1);
    assert_eq!(e.decision(), Decision::NeedsMoreInfo);
    assert_eq!(e.overall_status(), StepStatus::Pending);
    assert!(e.kyc().all_documents_verified());

    let s = e.submission();
    assert_eq!(s.score, dec!(2.844));
    assert_eq!(s.risk_assessment, RiskLevel::Low);
    assert_eq!(
        s.conditions,
        vec!["Transaction Structure: Collateral Evaluation".to_string()]
    );

    e.aml_mut().status = StepStatus::Approved;
    e.risk_assessment_mut().status = StepStatus::Approved;
    assert_eq!(e.completed_steps(), TOTAL_STEPS);
    assert_eq!(e.decision(), Decision::Approved);

    e.risk_assessment_mut()
        .checklist
        .transaction_structure
        .collateral_evaluation
        .status = ChecklistStatus::Complete;
    assert!(e.submission().conditions.is_empty());
}

#[test]
fn test_any_rejected_step_rejects_the_application() {
    let mut e = Evaluation::from_json(portal_document()).unwrap();
    e.aml_mut().status = StepStatus::Rejected;
    assert_eq!(e.decision(), Decision::Rejected);
    assert_eq!(e.overall_status(), StepStatus::Rejected);
    assert_eq!(e.completed_steps(), 2);
}

#[test]
fn test_suggested_risk_level_follows_category() {
    let mut e = Evaluation::from_json(portal_document()).unwrap();
    assert_eq!(e.suggested_risk_level(), RiskLevel::Low);
    e.set_factors(Default::default()).unwrap();
    assert_eq!(e.suggested_risk_level(), RiskLevel::High);
}

// ===========================================================================
// Memo
// ===========================================================================

#[test]
fn test_memo_request_renders_recomputed_score() {
    let request: MemoRequest = serde_json::from_value(json!({
        "application": {
            "_id": "665f1c2e9b1d4a0012ab34cd",
            "clientName": "Amara Okafor",
            "companyName": "Okafor Cocoa Exports Ltd"
        },
        "evaluation": portal_document()
    }))
    .unwrap();

    let at = Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0).unwrap();
    let memo = render_memo(&request.evaluation, &request.application, at);

    assert!(memo.contains("Application ID: 665f1c2e9b1d4a0012ab34cd"));
    assert!(memo.contains("Application Status: UNDER REVIEW"));
    assert!(memo.contains("MTF-Z Credit Score: 2.844"));
    assert!(!memo.contains("MTF-Z Credit Score: 0.500"));
    assert!(memo.contains("Evaluation Progress: 1/3 Steps Completed"));
}

#[test]
fn test_memo_for_blank_application() {
    let e = Evaluation::new("app-0", "eval-0");
    let at = Utc.with_ymd_and_hms(2026, 1, 5, 0, 0, 0).unwrap();
    let memo = render_memo(&e, &ApplicationSummary::default(), at);
    assert!(memo.contains("MTF-Z Credit Score: 0.000"));
    assert!(memo.contains("Risk Category: High Risk (Requires Collateral)"));
    assert!(memo.contains("Report Generated: January 5, 2026 at 00:00:00 UTC"));
}
