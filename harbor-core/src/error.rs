//! Error types for Harbor.
//!
//! This module provides a structured error hierarchy using `thiserror`:
//!
//! - [`HandlerError`] - The only error surfaced by handler lookups
//! - [`ResolveError`] - Why a single name failed to resolve
//! - [`NameError`] - A handler path did not name a defined type
//! - [`LoadError`] - A handler unit could not be loaded

use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors surfaced when looking up handlers by name.
#[derive(Error, Debug)]
pub enum HandlerError {
    /// A single name could not be resolved.
    #[error("couldn't find handler `{name}`: {source}")]
    NotFound {
        /// The name as it was requested.
        name: String,
        /// Why resolution failed.
        #[source]
        source: ResolveError,
    },

    /// None of the candidates passed to `pick` resolved.
    #[error("couldn't find handler for: {}.", .names.join(", "))]
    NoCandidate {
        /// Every candidate that was tried, in order.
        names: Vec<String>,
    },
}

impl HandlerError {
    /// The names that failed to resolve.
    pub fn names(&self) -> Vec<&str> {
        match self {
            HandlerError::NotFound { name, .. } => vec![name.as_str()],
            HandlerError::NoCandidate { names } => names.iter().map(String::as_str).collect(),
        }
    }
}

/// Why a name failed to resolve to a handler type.
///
/// The type lookup failure is always the reported cause. A failed unit load
/// that happened on the way is kept alongside it for diagnostics.
#[derive(Error, Debug)]
#[error("{lookup}")]
pub struct ResolveError {
    #[source]
    lookup: NameError,
    load: Option<LoadError>,
}

impl ResolveError {
    /// Create a resolve error from a lookup failure and an optional load failure.
    pub fn new(lookup: NameError, load: Option<LoadError>) -> Self {
        Self { lookup, load }
    }

    /// The type lookup failure.
    pub fn lookup(&self) -> &NameError {
        &self.lookup
    }

    /// The unit load failure recorded before the lookup, if any.
    pub fn load(&self) -> Option<&LoadError> {
        self.load.as_ref()
    }
}

/// A handler path could not be resolved to a defined type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NameError {
    /// A path segment is not a valid identifier.
    #[error("wrong handler name `{segment}` in `{path}`")]
    InvalidSegment {
        /// The full path being resolved.
        path: String,
        /// The offending segment.
        segment: String,
    },

    /// No type is defined at the path.
    #[error("uninitialized handler type `{path}`")]
    Uninitialized {
        /// The path, up to and including the first segment that was missing.
        path: String,
    },
}

/// A handler unit could not be loaded.
#[derive(Error, Debug)]
pub enum LoadError {
    /// No unit is registered at the conventional path.
    #[error("cannot load such unit -- {path}")]
    UnitNotFound {
        /// The unit path derived from the handler name.
        path: String,
    },

    /// The unit exists but its loader failed.
    #[error("failed to load unit {path}")]
    UnitFailed {
        /// The unit path.
        path: String,
        /// The loader's error.
        #[source]
        source: BoxError,
    },
}

impl LoadError {
    /// The unit path this error refers to.
    pub fn path(&self) -> &str {
        match self {
            LoadError::UnitNotFound { path } | LoadError::UnitFailed { path, .. } => path,
        }
    }
}
