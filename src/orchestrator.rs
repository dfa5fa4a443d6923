use crate::{
    bundler::{BundleConfig, Bundler},
    config::BuildConfig,
    error::{Error, Result},
    layout::BuildLayout,
    path_copier::PathCopier,
    reporter::Reporter,
    stats::{StatsReportOptions, render_report},
    tree_remover::TreeRemover,
};
use std::time::Instant;
use tracing::instrument;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildStage {
    Pending,
    Cleaning,
    Copying,
    Bundling,
    Succeeded,
    Failed,
}

#[derive(Debug)]
pub enum BuildOutcome {
    Succeeded,
    Failed(Error),
}

impl BuildOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, BuildOutcome::Succeeded)
    }
}

const REPORT_OPTIONS: StatsReportOptions = StatsReportOptions {
    error_details: true,
    colors: true,
};

/// Runs clean, copy and bundle strictly in order and stops at the first failure.
#[derive(Debug)]
pub struct BuildOrchestrator<R, C, B, P> {
    config: BuildConfig,
    layout: BuildLayout,
    remover: R,
    copier: C,
    bundler: B,
    reporter: P,
    stage: BuildStage,
}

impl<R, C, B, P> BuildOrchestrator<R, C, B, P>
where
    R: TreeRemover,
    C: PathCopier,
    B: Bundler,
    P: Reporter,
{
    pub fn new(config: BuildConfig, remover: R, copier: C, bundler: B, reporter: P) -> Self {
        let layout = BuildLayout::new(&config.project_root);
        Self {
            config,
            layout,
            remover,
            copier,
            bundler,
            reporter,
            stage: BuildStage::Pending,
        }
    }

    pub fn stage(&self) -> BuildStage {
        self.stage
    }

    fn enter(&mut self, stage: BuildStage) {
        tracing::info!("{:?} -> {:?}", self.stage, stage);
        self.stage = stage;
    }

    pub async fn run_build(&mut self) -> BuildOutcome {
        self.stage = BuildStage::Pending;
        let started = Instant::now();

        match self.run_stages().await {
            Ok(()) => {
                self.enter(BuildStage::Succeeded);
                tracing::debug!("build took {:?}", started.elapsed());
                self.reporter.succeeded();
                BuildOutcome::Succeeded
            }
            Err(e) => {
                self.enter(BuildStage::Failed);
                self.reporter.failed(&e);
                BuildOutcome::Failed(e)
            }
        }
    }

    async fn run_stages(&mut self) -> Result<()> {
        self.enter(BuildStage::Cleaning);
        self.clean_dist_dir().await?;

        self.enter(BuildStage::Copying);
        self.copy_web_root().await?;

        self.enter(BuildStage::Bundling);
        self.run_webpack_build().await
    }

    #[instrument(level = "trace", skip(self))]
    async fn clean_dist_dir(&self) -> Result<()> {
        let dist = self.layout.dist_dir();
        if let Err(source) = self.remover.remove_contents(&dist).await {
            return Err(Error::CleanError { path: dist, source });
        }
        Ok(())
    }

    #[instrument(level = "trace", skip(self))]
    async fn copy_web_root(&self) -> Result<()> {
        for spec in self.layout.copy_specs(&self.config.devtools_version) {
            let started = Instant::now();
            let copied = self
                .copier
                .copy_tree(&spec.source, &spec.destination)
                .await
                .map_err(|source| Error::CopyError {
                    source_path: spec.source.clone(),
                    destination: spec.destination.clone(),
                    source,
                })?;
            tracing::debug!(
                "copied {} files from {} in {:?}",
                copied,
                spec.source.display(),
                started.elapsed()
            );
        }
        Ok(())
    }

    #[instrument(level = "trace", skip(self))]
    async fn run_webpack_build(&self) -> Result<()> {
        let config = BundleConfig::production(&self.layout);
        let stats = self.bundler.bundle(&config).await?;

        if stats.has_errors() {
            tracing::warn!("bundle finished with {} errors", stats.errors.len());
        }

        self.reporter
            .stats_report(&render_report(&stats, REPORT_OPTIONS));
        Ok(())
    }
}
