//! Request-to-fixture resolution.
//!
//! Resolution walks a short, fixed list of candidate file names derived from
//! the request:
//!
//! 1. `<host>/<path>.<query>.<method>.mock`
//! 2. `<host>/<path>.<method>.mock`
//! 3. `<host>/<path>.<query>.mock`
//! 4. `<host>/<path>.mock`
//!
//! The host is replaced by its alias first, the method suffix is omitted for
//! the default method and the query part is omitted without parameters.
//! Every candidate is checked against the fixtures root before the
//! filesystem is consulted; a candidate outside the root aborts the search.
//!
//! # Module Structure
//!
//! - `candidate` - Specificity lattice and query signature
//! - `containment` - Path normalization and root checks

pub mod candidate;
mod containment;

pub use candidate::{CandidatePath, Specificity, Suffixes};

use crate::config::{self, FixtureConfig, HostAliases, DEFAULT_METHOD, FIXTURE_EXTENSION};
use crate::error::FixtureError;
use crate::request::FixtureRequest;
use bytes::Bytes;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// A fixture chosen for one request.
#[derive(Debug, Clone)]
pub struct FixtureMatch {
    path: PathBuf,
    specificity: Specificity,
    body: Bytes,
}

impl FixtureMatch {
    /// Absolute, canonical path of the fixture file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn specificity(&self) -> Specificity {
        self.specificity
    }

    /// Raw file content.
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    pub fn into_body(self) -> Bytes {
        self.body
    }
}

/// Maps requests to fixture files under a single root.
///
/// Immutable after construction; safe to share across threads.
#[derive(Debug, Clone)]
pub struct FixtureResolver {
    root: PathBuf,
    host_aliases: HostAliases,
    /// Method resolved without a suffix; `None` suffixes every method.
    default_method: Option<String>,
}

impl FixtureResolver {
    /// Create a resolver for `root`, which must be an existing directory.
    pub fn new(root: impl AsRef<Path>, host_aliases: HostAliases) -> Result<Self, FixtureError> {
        let root = root.as_ref();
        let canonical = fs::canonicalize(root).map_err(|source| FixtureError::InvalidRoot {
            path: root.to_path_buf(),
            source,
        })?;

        if !canonical.is_dir() {
            return Err(FixtureError::InvalidRoot {
                path: root.to_path_buf(),
                source: io::Error::new(io::ErrorKind::NotADirectory, "not a directory"),
            });
        }

        Ok(Self {
            root: canonical,
            host_aliases,
            default_method: Some(DEFAULT_METHOD.to_string()),
        })
    }

    /// Build a resolver from validated configuration.
    pub fn from_config(config: &FixtureConfig) -> Result<Self, FixtureError> {
        config
            .validate()
            .map_err(|e| FixtureError::InvalidConfig {
                reason: e.to_string(),
            })?;

        let resolver = Self::new(&config.fixtures_root, config.host_aliases.clone())?
            .with_default_method(&config.default_method)?;
        if config.suffix_default_method {
            Ok(resolver.with_every_method_suffixed())
        } else {
            Ok(resolver)
        }
    }

    /// Override the method that resolves without a method suffix.
    ///
    /// The method must be non-empty ASCII letters.
    pub fn with_default_method(mut self, method: &str) -> Result<Self, FixtureError> {
        if !config::is_valid_method(method) {
            return Err(FixtureError::InvalidConfig {
                reason: format!("Invalid default method: '{method}'"),
            });
        }
        self.default_method = Some(method.to_ascii_uppercase());
        Ok(self)
    }

    /// Suffix every method, the default one included, so `GET` requests look
    /// for `<path>.get.mock` before falling back to `<path>.mock`.
    pub fn with_every_method_suffixed(mut self) -> Self {
        self.default_method = None;
        self
    }

    /// Canonical fixtures root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn host_aliases(&self) -> &HostAliases {
        &self.host_aliases
    }

    /// Method resolved without a suffix, if any.
    pub fn default_method(&self) -> Option<&str> {
        self.default_method.as_deref()
    }

    /// Candidate paths for `request`, most specific first.
    pub fn candidates(&self, request: &FixtureRequest) -> Vec<CandidatePath> {
        let host = self.host_aliases.canonical(request.host());
        let base: Vec<&str> = std::iter::once(host)
            .filter(|h| !h.is_empty())
            .chain(request.path_segments().iter().map(String::as_str))
            .collect();

        let suffixes = Suffixes::new(
            request.method(),
            self.default_method.as_deref(),
            request.query(),
        );
        candidate::enumerate(&base, &suffixes, FIXTURE_EXTENSION)
    }

    /// Find the fixture file for `request` without reading it.
    pub fn locate(&self, request: &FixtureRequest) -> Result<PathBuf, FixtureError> {
        self.locate_candidate(request).map(|(path, _)| path)
    }

    /// Find and read the fixture file for `request`.
    pub fn resolve(&self, request: &FixtureRequest) -> Result<FixtureMatch, FixtureError> {
        let (path, specificity) = self.locate_candidate(request)?;
        let body = fs::read(&path).map_err(|source| FixtureError::Io {
            path: path.clone(),
            source,
        })?;

        Ok(FixtureMatch {
            path,
            specificity,
            body: Bytes::from(body),
        })
    }

    fn locate_candidate(
        &self,
        request: &FixtureRequest,
    ) -> Result<(PathBuf, Specificity), FixtureError> {
        let candidates = self.candidates(request);
        let mut tried = Vec::with_capacity(candidates.len());

        for candidate in candidates {
            let absolute = containment::normalize_within(&self.root, &candidate.relative_path)
                .inspect_err(|_| {
                    warn!(
                        "Fixture candidate {:?} for {} escapes root {:?}",
                        candidate.relative_path, request, self.root
                    );
                })?;

            debug!(
                "Trying {} fixture candidate {:?}",
                candidate.specificity, absolute
            );

            if absolute.is_file() {
                let canonical = containment::canonicalize_within(&self.root, &absolute)
                    .inspect_err(|_| {
                        warn!("Fixture {:?} resolves outside root {:?}", absolute, self.root);
                    })?;
                debug!("Resolved {} to fixture {:?}", request, canonical);
                return Ok((canonical, candidate.specificity));
            }

            tried.push(candidate.relative_path);
        }

        debug!("No fixture found for {}", request);
        Err(FixtureError::NotFound {
            request: request.to_string(),
            tried,
        })
    }
}
