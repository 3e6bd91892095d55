mod error;
mod options;
mod runner;

pub use error::ExecutionError;
pub use options::PlanOptions;
pub use runner::{StepOutput, Terraform};

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    Init,
    Plan,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Init => f.write_str("init"),
            Step::Plan => f.write_str("plan"),
        }
    }
}

/// Result of a successful plan step.
///
/// `changes` is only known when the plan ran with `-detailed-exitcode`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct PlanOutcome {
    pub stdout: String,
    pub changes: Option<bool>,
}

/// Runs `terraform init` then `terraform plan` and fails on the first error.
pub async fn verify_plan(options: &PlanOptions) -> Result<PlanOutcome, ExecutionError> {
    Terraform::new(options).init_and_plan().await
}

pub async fn verify_plan_dir(dir: impl Into<PathBuf>) -> Result<PlanOutcome, ExecutionError> {
    verify_plan(&PlanOptions::new(dir)).await
}
