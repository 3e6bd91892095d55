use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::smoke::SmokeReport;
use crate::terraform::PlanOutcome;

#[derive(Tabled)]
struct CheckRow {
    #[tabled(rename = "Check")]
    name: String,
    #[tabled(rename = "Expected")]
    expected: u16,
    #[tabled(rename = "Actual")]
    actual: String,
    #[tabled(rename = "Result")]
    result: &'static str,
}

pub fn render_smoke_table(report: &SmokeReport) -> String {
    let rows: Vec<CheckRow> = report
        .results
        .iter()
        .map(|r| CheckRow {
            name: r.name.clone(),
            expected: r.expected_status,
            actual: match (r.actual_status, &r.error) {
                (Some(status), _) => status.to_string(),
                (None, Some(err)) => format!("error: {err}"),
                (None, None) => "-".to_string(),
            },
            result: if r.passed { "PASS" } else { "FAIL" },
        })
        .collect();

    let mut out = Table::new(rows).with(Style::sharp()).to_string();

    if let Some(missing) = &report.missing_headers {
        out.push('\n');
        if missing.is_empty() {
            out.push_str("security headers: all present");
        } else {
            out.push_str(&format!("security headers missing: {}", missing.join(", ")));
        }
    }
    out
}

pub fn render_plan_summary(outcome: &PlanOutcome) -> String {
    match outcome.changes {
        Some(true) => "terraform init and plan succeeded (changes present)".to_string(),
        Some(false) => "terraform init and plan succeeded (no changes)".to_string(),
        None => "terraform init and plan succeeded".to_string(),
    }
}
