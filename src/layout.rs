use std::path::{Path, PathBuf};

pub const DIST_DIR: &str = "dist";
pub const DEVTOOLS_DIST_DIR: &str = "devtools";
pub const WEB_ROOT_DIR: &str = "src/webroot";
pub const DEVTOOLS_FRONTEND_DIR: &str = "node_modules/chrome-devtools-frontend/front_end";
pub const DEVTOOLS_SERVEFILES_DIR: &str = "node_modules/chrome-devtools-servefiles";
pub const WEBPACK_BIN: &str = "node_modules/.bin/webpack";
pub const WEBPACK_PROD_CONFIG: &str = "builder/webpack-config.prod.js";

/// A single directory copy: the whole tree under `source` is merged into `destination`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CopySpec {
    pub source: PathBuf,
    pub destination: PathBuf,
}

impl CopySpec {
    fn new(source: PathBuf, destination: PathBuf) -> Self {
        Self {
            source,
            destination,
        }
    }
}

/// Fixed source and output paths of a build, anchored at the project root.
#[derive(Clone, Debug)]
pub struct BuildLayout {
    project_root: PathBuf,
}

impl BuildLayout {
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        Self {
            project_root: project_root.into(),
        }
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    pub fn dist_dir(&self) -> PathBuf {
        self.project_root.join(DIST_DIR)
    }

    pub fn devtools_dist_dir(&self) -> PathBuf {
        self.dist_dir().join(DEVTOOLS_DIST_DIR)
    }

    pub fn webpack_bin(&self) -> PathBuf {
        self.project_root.join(WEBPACK_BIN)
    }

    pub fn webpack_prod_config(&self) -> PathBuf {
        self.project_root.join(WEBPACK_PROD_CONFIG)
    }

    /// The three copies in the order they run. Only the last one depends on
    /// `devtools_version`; both devtools copies land in the same directory.
    pub fn copy_specs(&self, devtools_version: &str) -> [CopySpec; 3] {
        [
            CopySpec::new(self.project_root.join(WEB_ROOT_DIR), self.dist_dir()),
            CopySpec::new(
                self.project_root.join(DEVTOOLS_FRONTEND_DIR),
                self.devtools_dist_dir(),
            ),
            CopySpec::new(
                self.project_root
                    .join(DEVTOOLS_SERVEFILES_DIR)
                    .join(devtools_version),
                self.devtools_dist_dir(),
            ),
        ]
    }
}
