use crate::{layout::BuildLayout, stats::BundleStats};
use std::{path::PathBuf, process::ExitStatus};
use thiserror::Error;
use tokio::process::Command;
use tracing::instrument;

#[derive(Error, Debug)]
pub enum BundlerError {
    #[error("failed to start {}", program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("bundler exited with {status}: {stderr}")]
    Failed { status: ExitStatus, stderr: String },
    #[error("bundler produced unreadable stats")]
    InvalidStats(#[from] serde_json::Error),
}

/// What to compile and how. Paths are handed to the bundler as-is.
#[derive(Clone, Debug)]
pub struct BundleConfig {
    pub config_file: PathBuf,
    pub mode: &'static str,
    pub working_dir: PathBuf,
}

impl BundleConfig {
    pub fn production(layout: &BuildLayout) -> Self {
        Self {
            config_file: layout.webpack_prod_config(),
            mode: "production",
            working_dir: layout.project_root().to_path_buf(),
        }
    }
}

pub trait Bundler {
    async fn bundle(&self, config: &BundleConfig) -> Result<BundleStats, BundlerError>;
}

/// Runs the webpack CLI and reads its `--json` stats from stdout.
#[derive(Debug)]
pub struct WebpackBundler {
    program: PathBuf,
    leading_args: Vec<String>,
}

impl WebpackBundler {
    pub fn new(layout: &BuildLayout) -> Self {
        Self::with_program(layout.webpack_bin(), Vec::new())
    }

    fn with_program(program: impl Into<PathBuf>, leading_args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            leading_args,
        }
    }

    fn command(&self, config: &BundleConfig) -> Command {
        let mut command = Command::new(&self.program);
        command
            .args(&self.leading_args)
            .arg("--config")
            .arg(&config.config_file)
            .arg("--mode")
            .arg(config.mode)
            .arg("--json")
            .current_dir(&config.working_dir)
            .kill_on_drop(true);
        command
    }
}

impl Bundler for WebpackBundler {
    #[instrument(level = "trace")]
    async fn bundle(&self, config: &BundleConfig) -> Result<BundleStats, BundlerError> {
        let output =
            self.command(config)
                .output()
                .await
                .map_err(|source| BundlerError::Spawn {
                    program: self.program.clone(),
                    source,
                })?;

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();

        // webpack exits non-zero on compile errors but still prints its stats
        match serde_json::from_slice::<BundleStats>(&output.stdout) {
            Ok(stats) => {
                if !stderr.is_empty() {
                    tracing::debug!("bundler stderr: {}", stderr);
                }
                tracing::debug!(
                    "bundler exited with {} ({} errors, {} warnings)",
                    output.status,
                    stats.errors.len(),
                    stats.warnings.len()
                );
                Ok(stats)
            }
            Err(_) if !output.status.success() => Err(BundlerError::Failed {
                status: output.status,
                stderr,
            }),
            Err(e) => Err(e.into()),
        }
    }
}
