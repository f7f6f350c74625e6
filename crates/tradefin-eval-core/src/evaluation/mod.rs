//! Evaluation aggregate for one trade finance application.
//!
//! Four review steps (credit scoring, KYC, AML, risk assessment) feed a
//! derived progress count and overall decision. The credit scoring step
//! owns the MTF-Z factors and keeps its score in lock-step with them.

pub mod checklist;
pub mod credit;
pub mod memo;
pub mod record;
pub mod review;

pub use checklist::{
    ChecklistCategory, ChecklistItem, ChecklistStatus, RiskAssessment, RiskChecklist, RiskFactors,
};
pub use credit::CreditScoringStep;
pub use memo::{render_memo, ApplicationSummary, MemoRequest};
pub use record::{Evaluation, EvaluationReport, EvaluationSubmission, TOTAL_STEPS};
pub use review::{AmlChecks, AmlReview, Decision, KycDocuments, KycReview, RiskLevel, StepStatus};
