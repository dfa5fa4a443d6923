mod bundler;
mod config;
mod error;
mod layout;
mod orchestrator;
mod path_copier;
mod reporter;
mod stats;
mod tree_remover;

use bundler::WebpackBundler;
use config::BuildConfig;
use error::Result;
use layout::BuildLayout;
use orchestrator::{BuildOrchestrator, BuildOutcome};
use path_copier::WalkDirCopier;
use reporter::ConsoleReporter;
use tracing_subscriber::EnvFilter;
use tree_remover::FsTreeRemover;

#[tokio::main]
async fn main() -> Result<()> {
    let result = devtools_dist().await;

    if let Err(e) = &result {
        eprintln!("Error: {}", e);
    }

    // a failed build still exits with status 0; failure is reported on stderr only
    Ok(())
}

async fn devtools_dist() -> Result<()> {
    match dotenvy::dotenv() {
        Ok(_) => {}
        Err(e) if e.not_found() => {}
        Err(e) => return Err(e.into()),
    }

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Starting build");

    let config = BuildConfig::from_env()?;
    let layout = BuildLayout::new(&config.project_root);

    let mut orchestrator = BuildOrchestrator::new(
        config,
        FsTreeRemover,
        WalkDirCopier,
        WebpackBundler::new(&layout),
        ConsoleReporter,
    );

    let outcome = orchestrator.run_build().await;
    if let BuildOutcome::Failed(e) = &outcome {
        tracing::debug!("Build aborted: {:?}", e);
    }

    tracing::info!(
        "Build finished in stage {:?} (success: {})",
        orchestrator.stage(),
        outcome.is_success()
    );

    Ok(())
}
