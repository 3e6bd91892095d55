use std::path::{Path, PathBuf};

const DEFAULT_TERRAFORM_BINARY: &str = "terraform";

/// Options for a single init-and-plan verification.
///
/// Only the configuration directory is required; everything else has a default
/// suited to non-interactive runs.
#[derive(Debug, Clone, PartialEq)]
pub struct PlanOptions {
    pub terraform_dir: PathBuf,
    pub binary: PathBuf,
    pub vars: Vec<(String, String)>,
    pub var_files: Vec<PathBuf>,
    pub env: Vec<(String, String)>,
    pub no_color: bool,
    pub detailed_exitcode: bool,
}

impl PlanOptions {
    pub fn new(terraform_dir: impl Into<PathBuf>) -> Self {
        Self {
            terraform_dir: terraform_dir.into(),
            binary: PathBuf::from(DEFAULT_TERRAFORM_BINARY),
            vars: Vec::new(),
            var_files: Vec::new(),
            env: Vec::new(),
            no_color: true,
            detailed_exitcode: false,
        }
    }

    pub fn with_binary(mut self, binary: impl Into<PathBuf>) -> Self {
        self.binary = binary.into();
        self
    }

    pub fn with_var(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.vars.push((key.into(), value.into()));
        self
    }

    pub fn with_var_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.var_files.push(path.into());
        self
    }

    pub fn with_env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.no_color = !color;
        self
    }

    pub fn with_detailed_exitcode(mut self, enabled: bool) -> Self {
        self.detailed_exitcode = enabled;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.terraform_dir
    }

    /// Arguments for `terraform init`.
    pub fn init_args(&self) -> Vec<String> {
        let mut args = vec![
            "init".to_string(),
            "-input=false".to_string(),
            "-upgrade=false".to_string(),
        ];
        if self.no_color {
            args.push("-no-color".to_string());
        }
        args
    }

    /// Arguments for `terraform plan`. `-var` flags precede `-var-file` flags.
    pub fn plan_args(&self) -> Vec<String> {
        let mut args = vec![
            "plan".to_string(),
            "-input=false".to_string(),
            "-lock=false".to_string(),
        ];
        if self.no_color {
            args.push("-no-color".to_string());
        }
        if self.detailed_exitcode {
            args.push("-detailed-exitcode".to_string());
        }
        for (key, value) in &self.vars {
            args.push("-var".to_string());
            args.push(format!("{key}={value}"));
        }
        for file in &self.var_files {
            args.push("-var-file".to_string());
            args.push(file.display().to_string());
        }
        args
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let opts = PlanOptions::new("../");
        assert_eq!(opts.dir(), Path::new("../"));
        assert_eq!(opts.binary, PathBuf::from("terraform"));
        assert!(opts.no_color);
        assert!(!opts.detailed_exitcode);
        assert!(opts.vars.is_empty());
        assert!(opts.var_files.is_empty());
    }

    #[test]
    fn test_init_args_default() {
        let opts = PlanOptions::new(".");
        assert_eq!(
            opts.init_args(),
            vec!["init", "-input=false", "-upgrade=false", "-no-color"]
        );
    }

    #[test]
    fn test_init_args_with_color() {
        let opts = PlanOptions::new(".").with_color(true);
        assert!(!opts.init_args().contains(&"-no-color".to_string()));
    }

    #[test]
    fn test_plan_args_default() {
        let opts = PlanOptions::new(".");
        assert_eq!(
            opts.plan_args(),
            vec!["plan", "-input=false", "-lock=false", "-no-color"]
        );
    }

    #[test]
    fn test_plan_args_with_vars_and_files() {
        let opts = PlanOptions::new(".")
            .with_var("region", "us-east-1")
            .with_var("name", "juice shop")
            .with_var_file("prod.tfvars")
            .with_detailed_exitcode(true);

        assert_eq!(
            opts.plan_args(),
            vec![
                "plan",
                "-input=false",
                "-lock=false",
                "-no-color",
                "-detailed-exitcode",
                "-var",
                "region=us-east-1",
                "-var",
                "name=juice shop",
                "-var-file",
                "prod.tfvars",
            ]
        );
    }

    #[test]
    fn test_vars_never_leak_into_init() {
        let opts = PlanOptions::new(".").with_var("secret", "value");
        assert!(!opts.init_args().iter().any(|a| a.contains("secret")));
    }

    #[test]
    fn test_with_env_accumulates() {
        let opts = PlanOptions::new(".")
            .with_env("AWS_REGION", "us-east-1")
            .with_env("TF_LOG", "WARN");
        assert_eq!(opts.env.len(), 2);
        assert_eq!(opts.env[1], ("TF_LOG".to_string(), "WARN".to_string()));
    }
}
