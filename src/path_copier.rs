use std::{
    fs, io,
    path::{Path, PathBuf},
};
use tokio::task::spawn_blocking;
use tracing::instrument;

pub trait PathCopier {
    /// Merges the tree under `source` into `destination`, creating directories
    /// as needed and overwriting existing files. Returns the number of files copied.
    async fn copy_tree(&self, source: &Path, destination: &Path) -> io::Result<u64>;
}

#[derive(Debug, Default)]
pub struct WalkDirCopier;

impl PathCopier for WalkDirCopier {
    #[instrument(level = "trace")]
    async fn copy_tree(&self, source: &Path, destination: &Path) -> io::Result<u64> {
        let source = source.to_path_buf();
        let destination = destination.to_path_buf();

        spawn_blocking(move || copy_tree_blocking(&source, &destination))
            .await
            .map_err(io::Error::other)?
    }
}

fn copy_tree_blocking(source: &Path, destination: &Path) -> io::Result<u64> {
    if !fs::metadata(source)?.is_dir() {
        return Err(io::Error::new(
            io::ErrorKind::NotADirectory,
            format!("{} is not a directory", source.display()),
        ));
    }

    let mut copied = 0u64;

    for entry in walkdir::WalkDir::new(source).follow_links(true) {
        let entry = entry.map_err(io::Error::from)?;
        let target = target_path(source, destination, entry.path())?;

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &target)?;
            copied += 1;
        }
    }

    tracing::debug!(
        "copied {} files from {} to {}",
        copied,
        source.display(),
        destination.display()
    );

    Ok(copied)
}

fn target_path(source: &Path, destination: &Path, path: &Path) -> io::Result<PathBuf> {
    path.strip_prefix(source)
        .map(|relative| destination.join(relative))
        .map_err(io::Error::other)
}
