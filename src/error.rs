use crate::bundler::BundlerError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to clean {}", path.display())]
    CleanError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to copy {} to {}", source_path.display(), destination.display())]
    CopyError {
        source_path: PathBuf,
        destination: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("bundler failed")]
    BundleError(#[from] BundlerError),
    #[error("DotEnvy error: {0}")]
    DotEnvyError(#[from] dotenvy::Error),
    #[error("invalid devtools version {0:?}")]
    InvalidDevtoolsVersion(String),
    #[error("std::var::EnvError: {0}")]
    StdVarEnvError(#[from] std::env::VarError),
}

pub type Result<T> = std::result::Result<T, Error>;
