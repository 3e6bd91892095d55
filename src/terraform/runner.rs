use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};
use std::process::Stdio;

use tokio::process::Command;

use super::{ExecutionError, PlanOptions, PlanOutcome, Step};

/// Exit code `terraform plan -detailed-exitcode` uses for "succeeded with changes".
const EXIT_CHANGES_PRESENT: i32 = 2;

#[derive(Debug, Clone)]
pub struct StepOutput {
    pub stdout: String,
    pub stderr: String,
    pub code: i32,
}

/// Runs terraform subcommands against one configuration directory.
#[derive(Debug, Clone, Copy)]
pub struct Terraform<'a> {
    options: &'a PlanOptions,
}

impl<'a> Terraform<'a> {
    pub fn new(options: &'a PlanOptions) -> Self {
        Self { options }
    }

    pub async fn init(&self) -> Result<StepOutput, ExecutionError> {
        self.run(Step::Init, self.options.init_args(), &[0]).await
    }

    pub async fn plan(&self) -> Result<PlanOutcome, ExecutionError> {
        let accepted: &[i32] = if self.options.detailed_exitcode {
            &[0, EXIT_CHANGES_PRESENT]
        } else {
            &[0]
        };
        let output = self.run(Step::Plan, self.options.plan_args(), accepted).await?;

        let changes = self
            .options
            .detailed_exitcode
            .then_some(output.code == EXIT_CHANGES_PRESENT);

        Ok(PlanOutcome {
            stdout: output.stdout,
            changes,
        })
    }

    /// `init` followed by `plan`. The plan step is never started if init fails.
    pub async fn init_and_plan(&self) -> Result<PlanOutcome, ExecutionError> {
        self.init().await?;
        self.plan().await
    }

    async fn run(
        &self,
        step: Step,
        args: Vec<String>,
        accepted: &[i32],
    ) -> Result<StepOutput, ExecutionError> {
        let dir = self.options.dir();
        match tokio::fs::metadata(dir).await {
            Ok(meta) if meta.is_dir() => {}
            Ok(_) => {
                return Err(ExecutionError::DirectoryNotFound {
                    path: dir.to_path_buf(),
                });
            }
            Err(source) if source.kind() == ErrorKind::NotFound => {
                return Err(ExecutionError::DirectoryNotFound {
                    path: dir.to_path_buf(),
                });
            }
            Err(source) => return Err(ExecutionError::Io { step, source }),
        }

        let program = resolve_program(&self.options.binary)
            .map_err(|source| ExecutionError::Io { step, source })?;

        tracing::info!(%step, dir = %dir.display(), args = ?args, "running terraform");

        let output = Command::new(&program)
            .args(&args)
            .current_dir(dir)
            .env("TF_IN_AUTOMATION", "1")
            .envs(self.options.env.iter().map(|(k, v)| (k, v)))
            .stdin(Stdio::null())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| match source.kind() {
                ErrorKind::NotFound => ExecutionError::BinaryNotFound {
                    binary: self.options.binary.clone(),
                },
                _ => ExecutionError::Io { step, source },
            })?;

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        for line in stdout.lines() {
            tracing::debug!(%step, stream = "stdout", "{}", line);
        }
        for line in stderr.lines() {
            tracing::debug!(%step, stream = "stderr", "{}", line);
        }

        match output.status.code() {
            Some(code) if accepted.contains(&code) => {
                tracing::info!(%step, code, "terraform step succeeded");
                Ok(StepOutput {
                    stdout,
                    stderr,
                    code,
                })
            }
            code => {
                tracing::error!(%step, ?code, "terraform step failed");
                let stderr = if stderr.trim().is_empty() {
                    stdout
                } else {
                    stderr
                };
                Err(ExecutionError::StepFailed { step, code, stderr })
            }
        }
    }
}

/// Makes a program path with a directory component absolute against the caller's
/// working directory, since the child runs inside the configuration directory.
/// Bare names are left for the PATH lookup.
fn resolve_program(binary: &Path) -> io::Result<PathBuf> {
    let has_dir = binary
        .parent()
        .is_some_and(|parent| !parent.as_os_str().is_empty());
    if has_dir {
        std::path::absolute(binary)
    } else {
        Ok(binary.to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_directory_fails_before_spawn() {
        // Binary that cannot exist; if it were spawned we would see BinaryNotFound.
        let opts = PlanOptions::new("/definitely/not/a/real/dir")
            .with_binary("/definitely/not/a/real/terraform");
        let result = Terraform::new(&opts).init_and_plan().await;

        match result {
            Err(ExecutionError::DirectoryNotFound { path }) => {
                assert_eq!(path, opts.terraform_dir);
            }
            other => panic!("expected DirectoryNotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_missing_binary_reports_binary_not_found() {
        let dir = std::env::temp_dir();
        let opts = PlanOptions::new(dir).with_binary("tfverify-no-such-terraform-binary");
        let result = Terraform::new(&opts).init().await;

        assert!(matches!(
            result,
            Err(ExecutionError::BinaryNotFound { .. })
        ));
    }

    #[test]
    fn test_resolve_program_keeps_bare_name() {
        let resolved = resolve_program(Path::new("terraform")).unwrap();
        assert_eq!(resolved, PathBuf::from("terraform"));
    }

    #[test]
    fn test_resolve_program_absolutizes_relative_path() {
        let resolved = resolve_program(Path::new("./bin/terraform")).unwrap();
        assert!(resolved.is_absolute());
        assert!(resolved.ends_with("bin/terraform"));
        assert!(resolved.starts_with(std::env::current_dir().unwrap()));
    }

    #[test]
    fn test_resolve_program_keeps_absolute_path() {
        let resolved = resolve_program(Path::new("/opt/tf/terraform")).unwrap();
        assert_eq!(resolved, PathBuf::from("/opt/tf/terraform"));
    }

    #[tokio::test]
    async fn test_unreadable_directory_path_is_io_error() {
        // A path that descends through a regular file fails with ENOTDIR.
        let file = std::env::current_exe().unwrap();
        let opts = PlanOptions::new(file.join("config"));
        let result = Terraform::new(&opts).init().await;

        match result {
            Err(ExecutionError::Io { step, source }) => {
                assert_eq!(step, Step::Init);
                assert_ne!(source.kind(), ErrorKind::NotFound);
            }
            other => panic!("expected Io, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_file_path_is_not_a_directory() {
        let file = std::env::current_exe().unwrap();
        let opts = PlanOptions::new(&file);
        let result = Terraform::new(&opts).plan().await;

        assert!(matches!(
            result,
            Err(ExecutionError::DirectoryNotFound { .. })
        ));
    }
}
