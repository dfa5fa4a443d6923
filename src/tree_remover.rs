use std::{io, path::Path};
use tracing::instrument;

pub trait TreeRemover {
    /// Removes everything below `root`, leaving `root` itself in place.
    /// A missing `root` counts as already clean.
    async fn remove_contents(&self, root: &Path) -> io::Result<()>;
}

#[derive(Debug, Default)]
pub struct FsTreeRemover;

impl TreeRemover for FsTreeRemover {
    #[instrument(level = "trace")]
    async fn remove_contents(&self, root: &Path) -> io::Result<()> {
        let mut entries = match tokio::fs::read_dir(root).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!("{} does not exist, nothing to clean", root.display());
                return Ok(());
            }
            Err(e) => return Err(e),
        };

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            // file_type() does not follow symlinks, so linked directories are unlinked, not emptied
            let result = if entry.file_type().await?.is_dir() {
                tokio::fs::remove_dir_all(&path).await
            } else {
                tokio::fs::remove_file(&path).await
            };

            match result {
                Ok(()) => tracing::trace!("removed {}", path.display()),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => return Err(e),
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[tokio::test]
    async fn removes_children_but_keeps_root() {
        let temp = tempfile::tempdir().expect("tempdir");
        let root = temp.path().join("dist");
        fs::create_dir_all(root.join("devtools/nested")).expect("mkdir");
        fs::write(root.join("index.html"), "<html>").expect("write");
        fs::write(root.join("devtools/nested/app.js"), "js").expect("write");

        FsTreeRemover.remove_contents(&root).await.expect("clean");

        assert!(root.is_dir());
        assert_eq!(fs::read_dir(&root).expect("read_dir").count(), 0);
    }

    #[tokio::test]
    async fn missing_root_is_clean() {
        let temp = tempfile::tempdir().expect("tempdir");
        let root = temp.path().join("never-built");

        FsTreeRemover.remove_contents(&root).await.expect("clean");

        assert!(!root.exists());
    }

    #[tokio::test]
    async fn root_that_is_a_file_is_an_error() {
        let temp = tempfile::tempdir().expect("tempdir");
        let root = temp.path().join("dist");
        fs::write(&root, "not a directory").expect("write");

        assert!(FsTreeRemover.remove_contents(&root).await.is_err());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn symlinked_directories_are_unlinked_not_emptied() {
        let temp = tempfile::tempdir().expect("tempdir");
        let outside = temp.path().join("outside");
        fs::create_dir_all(&outside).expect("mkdir");
        fs::write(outside.join("keep.txt"), "keep").expect("write");

        let root = temp.path().join("dist");
        fs::create_dir_all(&root).expect("mkdir");
        std::os::unix::fs::symlink(&outside, root.join("link")).expect("symlink");

        FsTreeRemover.remove_contents(&root).await.expect("clean");

        assert!(!root.join("link").exists());
        assert!(outside.join("keep.txt").is_file());
    }
}
