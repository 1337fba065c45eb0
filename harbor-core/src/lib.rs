//! # harbor-core
//!
//! Core contracts for the Harbor handler registry.
//!
//! This crate has minimal dependencies and is designed to be imported by
//! handler crates that don't need the full `harbor-std` registry.
//!
//! # Building Blocks
//!
//! - [`Handler`] - A server adapter that runs an [`App`] with [`Options`]
//! - [`HandlerType`] - A path plus a constructor; what a lookup returns
//! - [`TypeTable`] - Resolves `::`-separated paths to handler types
//! - [`HandlerUnit`] - A loader addressed by a conventional path, run through
//!   a [`Registrar`]
//! - [`underscore`] - The naming convention mapping type names to unit names
//!
//! # Error Types
//!
//! - [`HandlerError`] - Lookup failures surfaced to callers
//! - [`ResolveError`], [`NameError`], [`LoadError`] - Their causes

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod error;
mod handler;
mod naming;
mod options;
mod types;
mod unit;

// Re-exports
pub use error::{BoxError, HandlerError, LoadError, NameError, ResolveError};
pub use handler::{App, Handler, Request, Response, SharedApp};
pub use naming::{PATH_SEPARATOR, is_valid_segment, join_path, underscore};
pub use options::{HOST, Options, PORT};
pub use types::{Construct, HandlerType, TypeTable};
pub use unit::{HandlerUnit, Loader, Registrar};
