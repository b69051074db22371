use std::path::{Path, PathBuf};

use thiserror::Error;

/// Stops the whole build. Raised when a document is structurally broken or a
/// template set cannot be loaded.
#[derive(Debug, Error)]
#[error("{reason} - path={}", path.display())]
pub struct FatalError {
    pub path: PathBuf,
    pub reason: String,
}

/// Affects a single document or entry. Recorded in the build report while the
/// walk goes on.
#[derive(Debug, Error)]
#[error("{reason} - path={}", path.display())]
pub struct SoftError {
    pub path: PathBuf,
    pub reason: String,
}

impl FatalError {
    pub fn new(path: &Path, reason: impl Into<String>) -> Self {
        FatalError { path: path.to_path_buf(), reason: reason.into() }
    }
}

impl SoftError {
    pub fn new(path: &Path, reason: impl Into<String>) -> Self {
        SoftError { path: path.to_path_buf(), reason: reason.into() }
    }
}

/// Outer `Err` aborts the build, inner `Err` skips the current document.
pub type Outcome<T = ()> = Result<Result<T, SoftError>, FatalError>;

#[derive(Debug, Default)]
pub struct BuildReport {
    pub compiled: usize,
    pub listings: usize,
    pub skipped: Vec<SoftError>,
}

impl BuildReport {
    pub fn skip(&mut self, err: SoftError) {
        spdlog::error!("{}", err);
        self.skipped.push(err);
    }
}
