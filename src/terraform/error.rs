use std::path::PathBuf;

use thiserror::Error;

use super::Step;

/// Errors from running the terraform CLI. Every variant is fatal to the
/// verification that produced it.
#[derive(Debug, Error)]
pub enum ExecutionError {
    /// The terraform binary could not be found on PATH (or at the given path).
    #[error("terraform binary not found: {}", binary.display())]
    BinaryNotFound { binary: PathBuf },

    /// The configuration directory does not exist or is not a directory.
    #[error("configuration directory not found: {}", path.display())]
    DirectoryNotFound { path: PathBuf },

    /// The step ran and exited unsuccessfully. `stderr` is the tool's output verbatim.
    #[error("terraform {step} failed ({}):\n{stderr}", exit_label(*code))]
    StepFailed {
        step: Step,
        code: Option<i32>,
        stderr: String,
    },

    #[error("I/O error during terraform {step}: {source}")]
    Io {
        step: Step,
        #[source]
        source: std::io::Error,
    },
}

impl ExecutionError {
    /// The step that failed, if the failure happened after a step was started.
    pub fn step(&self) -> Option<Step> {
        match self {
            Self::StepFailed { step, .. } | Self::Io { step, .. } => Some(*step),
            Self::BinaryNotFound { .. } | Self::DirectoryNotFound { .. } => None,
        }
    }
}

fn exit_label(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("exit code {code}"),
        None => "terminated by signal".to_string(),
    }
}
