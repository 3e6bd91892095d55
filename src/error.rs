use thiserror::Error;

#[derive(Debug, Error)]
pub enum TfverifyError {
    #[error(transparent)]
    Execution(#[from] crate::terraform::ExecutionError),

    #[error(transparent)]
    Smoke(#[from] crate::smoke::SmokeError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("smoke checks failed: {0}")]
    SmokeFailed(String),
}
