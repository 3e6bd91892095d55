//! tfverify - Terraform plan verification
//!
//! A library for checking that a Terraform configuration initializes and plans
//! cleanly, plus a post-deploy smoke check for the WAF in front of the app.

pub mod output;
pub mod smoke;
pub mod terraform;

mod error;

pub use error::TfverifyError;
pub use smoke::{CheckResult, SmokeClient, SmokeError, SmokeReport};
pub use terraform::{
    ExecutionError, PlanOptions, PlanOutcome, Step, Terraform, verify_plan, verify_plan_dir,
};
