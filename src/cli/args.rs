use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run `terraform init` and `terraform plan` against a configuration directory
    Plan(PlanArgs),
    /// Probe a deployed web app behind the WAF
    Smoke(SmokeArgs),
}

#[derive(clap::Args, Debug)]
pub struct PlanArgs {
    /// Terraform configuration directory
    #[arg(default_value = "..")]
    pub dir: PathBuf,

    #[arg(long, env = "TFVERIFY_TERRAFORM_BIN", default_value = "terraform")]
    pub terraform_bin: PathBuf,

    /// Input variable as KEY=VALUE (repeatable)
    #[arg(long = "var", value_name = "KEY=VALUE", value_parser = parse_key_val)]
    pub vars: Vec<(String, String)>,

    /// Variable definitions file (repeatable)
    #[arg(long = "var-file", value_name = "PATH")]
    pub var_files: Vec<PathBuf>,

    /// Keep terraform's colored output
    #[arg(long)]
    pub color: bool,

    /// Report whether the plan contains changes
    #[arg(long)]
    pub detailed_exitcode: bool,

    #[arg(long)]
    pub json: bool,
}

#[derive(clap::Args, Debug)]
pub struct SmokeArgs {
    #[arg(env = "TFVERIFY_BASE_URL")]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 10)]
    pub timeout: u64,

    /// Also check the security response headers
    #[arg(long)]
    pub headers: bool,

    #[arg(long)]
    pub json: bool,
}

fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid KEY=VALUE: no '=' found in '{s}'"))?;
    if key.is_empty() {
        return Err(format!("invalid KEY=VALUE: empty key in '{s}'"));
    }
    Ok((key.to_string(), value.to_string()))
}
