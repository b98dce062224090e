//! Error types for fixture resolution.
//!
//! `NotFound` and `OutOfBounds` are deliberately separate variants: the first
//! means a test scenario has no recorded fixture, the second means a request
//! tried to leave the fixtures root and the search was aborted.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FixtureError {
    /// No candidate in the fallback sequence exists on disk.
    #[error("no fixture found for {request} (tried {})", display_paths(.tried))]
    NotFound {
        request: String,
        tried: Vec<PathBuf>,
    },

    /// A candidate normalized to a location outside the fixtures root.
    #[error("fixture path {} is out of bounds", .path.display())]
    OutOfBounds { path: PathBuf },

    /// The fixtures root could not be canonicalized or is not a directory.
    #[error("invalid fixtures root {}: {source}", .path.display())]
    InvalidRoot {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Configuration handed to a constructor failed validation.
    #[error("invalid fixture configuration: {reason}")]
    InvalidConfig { reason: String },

    /// An existing fixture could not be read.
    #[error("failed to read fixture {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl FixtureError {
    /// True for errors that indicate a defect rather than a missing fixture.
    pub fn is_fatal(&self) -> bool {
        !matches!(self, FixtureError::NotFound { .. })
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, FixtureError::NotFound { .. })
    }

    pub fn is_out_of_bounds(&self) -> bool {
        matches!(self, FixtureError::OutOfBounds { .. })
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
