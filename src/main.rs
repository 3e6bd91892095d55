mod cli;

use std::time::Duration;

use clap::Parser;
use color_eyre::eyre::Result;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command, PlanArgs, SmokeArgs};
use tfverify::{PlanOptions, SmokeClient, TfverifyError, output, terraform};

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Plan(args) => run_plan(args).await?,
        Command::Smoke(args) => run_smoke(args).await?,
    }

    Ok(())
}

async fn run_plan(args: PlanArgs) -> Result<(), TfverifyError> {
    let mut options = PlanOptions::new(args.dir)
        .with_binary(args.terraform_bin)
        .with_color(args.color)
        .with_detailed_exitcode(args.detailed_exitcode);
    for (key, value) in args.vars {
        options = options.with_var(key, value);
    }
    for file in args.var_files {
        options = options.with_var_file(file);
    }

    let outcome = terraform::verify_plan(&options).await?;

    if args.json {
        let json = serde_json::to_string_pretty(&outcome)
            .map_err(|e| TfverifyError::Config(format!("failed to encode plan outcome: {e}")))?;
        println!("{json}");
    } else {
        println!("{}", output::render_plan_summary(&outcome));
    }
    Ok(())
}

async fn run_smoke(args: SmokeArgs) -> Result<(), TfverifyError> {
    let client = SmokeClient::with_timeout(&args.base_url, Duration::from_secs(args.timeout))?;

    let report = if args.headers {
        client.run_with_headers().await
    } else {
        client.run().await
    };

    if args.json {
        let json = serde_json::to_string_pretty(&report)
            .map_err(|e| TfverifyError::Config(format!("failed to encode smoke report: {e}")))?;
        println!("{json}");
    } else {
        println!("{}", output::render_smoke_table(&report));
    }

    if !report.passed() {
        let failed: Vec<&str> = report.failures().map(|r| r.name.as_str()).collect();
        let detail = if failed.is_empty() {
            "security headers missing".to_string()
        } else {
            failed.join(", ")
        };
        return Err(TfverifyError::SmokeFailed(detail));
    }
    Ok(())
}
