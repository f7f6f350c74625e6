//! Plain-text trade finance evaluation memo.
//!
//! The memo only reads derived values (display score, risk category,
//! decision); it never computes a score of its own.

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::checklist::{ChecklistCategory, RiskChecklist};
use super::record::{Evaluation, TOTAL_STEPS};
use super::review::RiskLevel;
use crate::types::{Money, Rate};

const RULE: &str = "===============================================================";
const STEP_RULE: &str = "--------------------------------------------------------------";

/// Application header details shown on the memo.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApplicationSummary {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(alias = "clientName")]
    pub client_name: String,
    #[serde(alias = "companyName")]
    pub company_name: String,
    pub status: Option<String>,
}

/// Input bundle for rendering a memo from JSON.
#[derive(Debug, Clone, Deserialize)]
pub struct MemoRequest {
    pub application: ApplicationSummary,
    pub evaluation: Evaluation,
}

pub fn render_memo(
    evaluation: &Evaluation,
    application: &ApplicationSummary,
    generated_at: DateTime<Utc>,
) -> String {
    let credit = evaluation.credit_scoring();
    let result = credit.result();
    let f = credit.factors();
    let kyc = evaluation.kyc();
    let aml = evaluation.aml();
    let ra = evaluation.risk_assessment();
    let app_status = application
        .status
        .as_deref()
        .map(str::to_uppercase)
        .unwrap_or_else(|| "UNDER REVIEW".to_string());

    let mut lines: Vec<String> = vec![
        RULE.to_string(),
        "                    TRADE FINANCE EVALUATION MEMO".to_string(),
        RULE.to_string(),
        String::new(),
        format!(
            "Report Generated: {} at {}",
            generated_at.format("%B %-d, %Y"),
            generated_at.format("%H:%M:%S UTC")
        ),
        format!("Application ID: {}", application.id),
        format!("Applicant: {}", application.client_name),
        format!("Company: {}", application.company_name),
        format!("Application Status: {app_status}"),
        String::new(),
        RULE.to_string(),
        "                        EXECUTIVE SUMMARY".to_string(),
        RULE.to_string(),
        String::new(),
        format!(
            "Evaluation Progress: {}/{} Steps Completed",
            evaluation.completed_steps(),
            TOTAL_STEPS
        ),
        format!(
            "Overall Status: {}",
            evaluation.overall_status().memo_text()
        ),
        format!(
            "Final Recommendation: {}",
            evaluation.decision().recommendation()
        ),
        String::new(),
        RULE.to_string(),
        "                    DETAILED EVALUATION RESULTS".to_string(),
        RULE.to_string(),
        String::new(),
        format!(
            "STEP 1: CREDIT SCORING ANALYSIS {}",
            credit.status.memo_marker()
        ),
        STEP_RULE.to_string(),
        format!("   Status: {}", credit.status.memo_text()),
        format!("   MTF-Z Credit Score: {:.3}", result.display_score),
        format!("   Risk Category: {}", result.risk_category.label()),
        String::new(),
        "   Financial Metrics Analysis:".to_string(),
        format!("   • Working Capital: {}", format_currency(f.working_capital)),
        format!("   • Total Assets: {}", format_currency(f.total_assets)),
        format!(
            "   • Retained Earnings: {}",
            format_currency(f.retained_earnings)
        ),
        format!("   • EBIT: {}", format_currency(f.ebit)),
        format!("   • Equity: {}", format_currency(f.equity)),
        format!(
            "   • Total Liabilities: {}",
            format_currency(f.total_liabilities)
        ),
        format!("   • Sales: {}", format_currency(f.sales)),
        String::new(),
        "   Risk Factors:".to_string(),
        format!(
            "   • On-Time Payment Rate: {}",
            format_percent(f.on_time_payment_rate)
        ),
        format!(
            "   • Top Client Concentration: {}",
            format_percent(f.top_client_concentration)
        ),
        format!(
            "   • Payment Dilution Index: {}",
            format_percent(f.payment_dilution_index)
        ),
        String::new(),
        format!("   Credit Notes: {}", notes_or_default(&credit.notes)),
        String::new(),
        format!(
            "STEP 2: KYC & AML COMPLIANCE {} / {}",
            kyc.status.memo_marker(),
            aml.status.memo_marker()
        ),
        STEP_RULE.to_string(),
        format!(
            "   KYC (Know Your Customer) Status: {}",
            kyc.status.memo_text()
        ),
        String::new(),
        "   Document Verification:".to_string(),
        format!(
            "   • Identity Verification: {}",
            verified(kyc.documents.identity_verified)
        ),
        format!(
            "   • Address Verification: {}",
            verified(kyc.documents.address_verified)
        ),
        format!(
            "   • Business Registration: {}",
            verified(kyc.documents.business_registration)
        ),
        format!(
            "   • Financial Statements: {}",
            verified(kyc.documents.financial_statements)
        ),
        String::new(),
        format!("   KYC Notes: {}", notes_or_default(&kyc.notes)),
        String::new(),
        format!(
            "   AML (Anti-Money Laundering) Status: {}",
            aml.status.memo_text()
        ),
        String::new(),
        "   Compliance Checks:".to_string(),
        format!(
            "   • Sanctions List Screening: {}",
            cleared(aml.checks.sanctions_list)
        ),
        format!(
            "   • PEP (Politically Exposed Person) Check: {}",
            cleared(aml.checks.pep_check)
        ),
        format!(
            "   • Adverse Media Screening: {}",
            cleared(aml.checks.adverse_media)
        ),
        format!(
            "   • Source of Funds Verification: {}",
            verified(aml.checks.source_of_funds)
        ),
        String::new(),
        format!("   AML Notes: {}", notes_or_default(&aml.notes)),
        String::new(),
        format!("STEP 3: RISK ASSESSMENT {}", ra.status.memo_marker()),
        STEP_RULE.to_string(),
        format!("   Status: {}", ra.status.memo_text()),
        format!(
            "   Overall Risk Level: {} RISK",
            ra.risk_level.to_string().to_uppercase()
        ),
        String::new(),
        "   Risk Factor Analysis:".to_string(),
        format!("   • Country Risk: {}", level_text(ra.factors.country)),
        format!("   • Industry Risk: {}", level_text(ra.factors.industry)),
        format!(
            "   • Transaction Amount Risk: {}",
            level_text(ra.factors.transaction_amount)
        ),
        format!(
            "   • Client Profile Risk: {}",
            level_text(ra.factors.client_profile)
        ),
        String::new(),
        "   Due Diligence Checklist:".to_string(),
    ];

    lines.extend(checklist_summary(&ra.checklist));
    lines.extend([
        String::new(),
        format!("   Risk Assessment Notes: {}", notes_or_default(&ra.notes)),
        String::new(),
        RULE.to_string(),
        "                         FINAL NOTES".to_string(),
        RULE.to_string(),
        String::new(),
        notes_or_default(evaluation.final_notes()).to_string(),
        String::new(),
        RULE.to_string(),
        "This memo was generated from the evaluation record; scores and".to_string(),
        "risk categories are derived from the recorded MTF-Z factors.".to_string(),
        RULE.to_string(),
    ]);

    lines.join("\n")
}

fn checklist_summary(checklist: &RiskChecklist) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current: Option<ChecklistCategory> = None;

    for entry in checklist.entries() {
        if current != Some(entry.category) {
            lines.push(format!("   {}:", entry.category.label()));
            current = Some(entry.category);
        }
        lines.push(format!(
            "     • {}: {}",
            entry.name,
            entry.item.status.to_string().to_uppercase()
        ));
        if !entry.item.notes.trim().is_empty() {
            lines.push(format!("       Notes: {}", entry.item.notes));
        }
    }

    lines
}

fn notes_or_default(notes: &str) -> &str {
    if notes.trim().is_empty() {
        "No additional notes provided"
    } else {
        notes
    }
}

fn verified(flag: bool) -> &'static str {
    if flag {
        "✓ VERIFIED"
    } else {
        "✗ NOT VERIFIED"
    }
}

fn cleared(flag: bool) -> &'static str {
    if flag {
        "✓ CLEARED"
    } else {
        "✗ PENDING/FAILED"
    }
}

fn level_text(level: Option<RiskLevel>) -> String {
    level
        .map(|l| l.to_string().to_uppercase())
        .unwrap_or_else(|| "NOT ASSESSED".to_string())
}

/// US-dollar formatting with thousands separators, e.g. `-$1,234.50`.
pub fn format_currency(amount: Money) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let text = format!("{:.2}", rounded.abs());
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let digits: Vec<char> = whole.chars().collect();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.iter().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(*c);
    }

    let sign = if rounded < Decimal::ZERO { "-" } else { "" };
    format!("{sign}${grouped}.{cents}")
}

/// 0-1 fraction as a one-decimal percentage, e.g. `0.905` -> `90.5%`.
///
/// A rate too large to scale by 100 is shown as the raw fraction.
pub fn format_percent(rate: Rate) -> String {
    match rate.checked_mul(dec!(100)) {
        Some(pct) => {
            let pct = pct.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
            format!("{pct:.1}%")
        }
        None => format!("{rate} (fraction)"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::{ChecklistStatus, Decision, StepStatus};
    use crate::scoring::FactorField;
    use chrono::TimeZone;

    fn application() -> ApplicationSummary {
        ApplicationSummary {
            id: "app-42".to_string(),
            client_name: "Amara Okafor".to_string(),
            company_name: "Okafor Cocoa Exports Ltd".to_string(),
            status: Some("under_review".to_string()),
        }
    }

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(dec!(1234.5)), "$1,234.50");
        assert_eq!(format_currency(dec!(1000000)), "$1,000,000.00");
        assert_eq!(format_currency(dec!(-98765.432)), "-$98,765.43");
        assert_eq!(format_currency(Decimal::ZERO), "$0.00");
        assert_eq!(format_currency(dec!(999)), "$999.00");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(dec!(0.9)), "90.0%");
        assert_eq!(format_percent(dec!(0.1234)), "12.3%");
        assert_eq!(
            format_percent(dec!(30000000000000000000000000000)),
            "30000000000000000000000000000 (fraction)"
        );
    }

    #[test]
    fn test_memo_contains_derived_score_and_steps() {
        let mut e = Evaluation::new("app-42", "eval-1");
        e.update_factors(|f| {
            f.working_capital = dec!(200);
            f.total_assets = dec!(1000);
            f.retained_earnings = dec!(150);
            f.ebit = dec!(120);
            f.equity = dec!(400);
            f.total_liabilities = dec!(600);
            f.sales = dec!(900);
            f.on_time_payment_rate = dec!(0.9);
            f.top_client_concentration = dec!(0.2);
            f.payment_dilution_index = dec!(0.1);
        })
        .unwrap();
        e.set_credit_status(StepStatus::Approved);
        e.risk_assessment_mut()
            .checklist
            .transaction_structure
            .trade_documentation = crate::evaluation::ChecklistItem {
            status: ChecklistStatus::Followup,
            notes: "Bill of lading copy missing".to_string(),
        };

        let at = Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0).unwrap();
        let memo = render_memo(&e, &application(), at);

        assert!(memo.contains("Report Generated: March 14, 2026 at 09:30:00 UTC"));
        assert!(memo.contains("MTF-Z Credit Score: 2.844"));
        assert!(memo.contains("Risk Category: Low Risk (Investment Grade)"));
        assert!(memo.contains("Evaluation Progress: 1/3 Steps Completed"));
        assert!(memo.contains("STEP 1: CREDIT SCORING ANALYSIS ✓ PASSED"));
        assert!(memo.contains("• Total Assets: $1,000.00"));
        assert!(memo.contains("• On-Time Payment Rate: 90.0%"));
        assert!(memo.contains("Application Status: UNDER_REVIEW"));
        assert!(memo.contains("• Trade Documentation: FOLLOWUP"));
        assert!(memo.contains("Notes: Bill of lading copy missing"));
        assert!(memo.contains("• Country Risk: NOT ASSESSED"));
        assert!(memo.contains(Decision::NeedsMoreInfo.recommendation()));
    }

    #[test]
    fn test_memo_follows_factor_edits() {
        let mut e = Evaluation::new("app-42", "eval-1");
        let at = Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0).unwrap();
        assert!(render_memo(&e, &application(), at).contains("MTF-Z Credit Score: 0.000"));

        e.set_factor(FactorField::OnTimePaymentRate, dec!(1)).unwrap();
        let memo = render_memo(&e, &application(), at);
        assert!(memo.contains("MTF-Z Credit Score: 1.600"));
        assert!(memo.contains("Risk Category: Watch / Medium Risk"));
    }
}
