mod client;
mod error;

pub use client::{DEFAULT_TIMEOUT, SmokeClient};
pub use error::SmokeError;

use serde::Serialize;

/// Headers the edge function adds to every origin response.
pub const SECURITY_HEADERS: &[&str] = &[
    "content-security-policy",
    "strict-transport-security",
    "x-content-type-options",
    "x-frame-options",
    "x-xss-protection",
];

/// A single request and the status the WAF should answer it with.
#[derive(Debug, Clone, PartialEq)]
pub struct SmokeCheck {
    pub name: &'static str,
    pub path: &'static str,
    pub expected_status: u16,
}

/// Benign homepage request, then an SQL injection probe the WAF must block.
pub const DEFAULT_CHECKS: &[SmokeCheck] = &[
    SmokeCheck {
        name: "benign",
        path: "/",
        expected_status: 200,
    },
    SmokeCheck {
        name: "sql_injection",
        path: "/rest/products/search?q=%27%20OR%201=1--",
        expected_status: 403,
    },
];

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct CheckResult {
    pub name: String,
    pub url: String,
    pub expected_status: u16,
    pub actual_status: Option<u16>,
    pub passed: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SmokeReport {
    pub results: Vec<CheckResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub missing_headers: Option<Vec<String>>,
}

impl SmokeReport {
    pub fn passed(&self) -> bool {
        self.results.iter().all(|r| r.passed)
            && self
                .missing_headers
                .as_ref()
                .is_none_or(|missing| missing.is_empty())
    }

    pub fn failures(&self) -> impl Iterator<Item = &CheckResult> {
        self.results.iter().filter(|r| !r.passed)
    }
}
