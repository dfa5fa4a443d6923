use crate::error::Error;
use std::fmt::Write;

pub const BUILD_SUCCEEDED: &str = "build succeeded";
pub const BUILD_FAILED: &str = "build failed";

/// The user-facing output of a build: the bundler report and a final banner.
pub trait Reporter {
    fn stats_report(&self, report: &str);
    fn succeeded(&self);
    fn failed(&self, error: &Error);
}

/// Formats an error followed by every error in its `source()` chain.
pub fn error_chain(error: &(dyn std::error::Error + 'static)) -> String {
    let mut text = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        let _ = write!(text, "\n  caused by: {}", cause);
        source = cause.source();
    }
    text
}

/// Stats and success go to stdout, failures to stderr.
#[derive(Debug, Default)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn stats_report(&self, report: &str) {
        if !report.is_empty() {
            println!("{}", report);
        }
    }

    fn succeeded(&self) {
        println!("{}", BUILD_SUCCEEDED);
    }

    fn failed(&self, error: &Error) {
        eprintln!("{}", BUILD_FAILED);
        eprintln!("{}", error_chain(error));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{io, path::PathBuf};

    #[test]
    fn chain_includes_every_cause() {
        let error = Error::CleanError {
            path: PathBuf::from("dist"),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "EACCES"),
        };

        assert_eq!(
            error_chain(&error),
            "failed to clean dist\n  caused by: EACCES"
        );
    }
}
