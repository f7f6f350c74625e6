use chrono::{DateTime, Utc};
use clap::Args;
use serde_json::Value;
use tracing::info;

use tradefin_eval_core::evaluation::{render_memo, Evaluation, MemoRequest};

use crate::input;

/// Arguments for evaluation reporting
#[derive(Args)]
pub struct EvaluateArgs {
    /// Path to a stored evaluation document (JSON or YAML)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for memo rendering
#[derive(Args)]
pub struct MemoArgs {
    /// Path to `{ "application": {...}, "evaluation": {...} }` (JSON or YAML)
    #[arg(long)]
    pub input: Option<String>,

    /// Timestamp printed on the memo (RFC 3339); defaults to now
    #[arg(long)]
    pub generated_at: Option<DateTime<Utc>>,
}

/// Rendered memo plus the fields used for structured output.
pub struct MemoOutput {
    pub application_id: String,
    pub generated_at: DateTime<Utc>,
    pub text: String,
}

pub fn run_evaluate(args: EvaluateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let document = read_input(args.input.as_deref())?;
    let evaluation = Evaluation::from_json(document)?;
    Ok(serde_json::to_value(evaluation.report())?)
}

pub fn run_memo(args: MemoArgs) -> Result<MemoOutput, Box<dyn std::error::Error>> {
    let document = read_input(args.input.as_deref())?;
    let request: MemoRequest = serde_json::from_value(document)?;
    let generated_at = args.generated_at.unwrap_or_else(Utc::now);

    info!(
        application_id = %request.application.id,
        decision = %request.evaluation.decision(),
        "rendering evaluation memo"
    );

    Ok(MemoOutput {
        application_id: request.application.id.clone(),
        generated_at,
        text: render_memo(&request.evaluation, &request.application, generated_at),
    })
}

fn read_input(path: Option<&str>) -> Result<Value, Box<dyn std::error::Error>> {
    if let Some(path) = path {
        input::file::read_document_value(path)
    } else if let Some(data) = input::stdin::read_stdin()? {
        Ok(data)
    } else {
        Err("--input <file.json|file.yaml> or stdin required".into())
    }
}
