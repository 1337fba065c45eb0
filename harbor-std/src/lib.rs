//! # harbor-std
//!
//! Standard implementations for the Harbor handler registry.
//!
//! This crate provides:
//! - **Registry**: [`Registry`], [`RegistryBuilder`] and [`Candidates`]
//! - **Link-time registration**: [`submit_handler!`] and [`submit_unit!`]
//! - **Built-in names**: [`defaults::DEFAULT_HANDLERS`]
//! - **Built-in handlers**: [`Cgi`]
//! - **Testing utilities**: [`testing`]

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core contracts
pub use harbor_core;

// Modules
pub mod cgi;
pub mod defaults;
pub mod linked;
pub mod registry;
pub mod testing;

pub use cgi::Cgi;
pub use registry::{Candidates, Registry, RegistryBuilder};

pub use inventory;
