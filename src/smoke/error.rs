use thiserror::Error;

/// Errors that prevent a smoke run from starting.
///
/// Per-request transport failures are recorded in the report instead.
#[derive(Debug, Error)]
pub enum SmokeError {
    #[error("invalid base URL: '{0}'")]
    InvalidBaseUrl(String),

    #[error("HTTP client error: {0}")]
    Client(#[from] reqwest::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_base_url_display() {
        let err = SmokeError::InvalidBaseUrl("not a url".to_string());
        assert_eq!(err.to_string(), "invalid base URL: 'not a url'");
    }
}
