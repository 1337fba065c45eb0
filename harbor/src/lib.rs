//! # harbor - Resolve Web Server Handlers by Name
//!
//! `harbor` connects request-processing apps with the servers that run them.
//! A handler is looked up by a short name (`"cgi"`, `"thin"`) or picked from
//! an ordered list of preferences, then started with [`Handler::run`].
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use harbor::prelude::*;
//! use std::sync::Arc;
//!
//! let app: SharedApp = Arc::new(|_req: Request| Response::new(200).with_body("hello"));
//!
//! let handler = harbor::pick(["thin", "webrick", "cgi"])?;
//! handler.instantiate().run(app, &Options::new())?;
//! ```
//!
//! ## Registering Handlers
//!
//! Handler crates submit their types at link time, and may submit units that
//! register further names the first time they are asked for:
//!
//! ```rust,ignore
//! harbor::submit_handler!("harbor::handler::Thin" => Thin);
//! harbor::register("thin", "harbor::handler::Thin");
//! ```

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

use std::sync::LazyLock;

pub use harbor_core::{
    // Handler contract
    App,
    // Error types
    BoxError,
    Construct,
    Handler,
    HandlerError,
    // Resolution
    HandlerType,
    HandlerUnit,
    LoadError,
    Loader,
    NameError,
    Options,
    Registrar,
    Request,
    ResolveError,
    Response,
    SharedApp,
    TypeTable,
    // Naming
    underscore,
};

pub use harbor_std::{
    Candidates, Cgi, Registry, RegistryBuilder,
    defaults::{DEFAULT_HANDLERS, HANDLER_NAMESPACE, LOAD_ROOT, default_identifier},
    submit_handler, submit_unit,
};

/// Option keys understood by most handlers.
pub mod options {
    pub use harbor_core::{HOST, PORT};
}

/// Testing utilities.
pub mod testing {
    #![allow(clippy::wildcard_imports)]
    pub use harbor_std::testing::*;
}

/// Prelude module - common imports for Harbor.
///
/// # Usage
///
/// ```rust,ignore
/// use harbor::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        App, Candidates, Handler, HandlerError, HandlerType, Options, Registry, Request,
        Response, SharedApp,
    };
}

static HANDLERS: LazyLock<Registry> = LazyLock::new(|| {
    let registry = Registry::standard();

    #[cfg(feature = "tracing")]
    tracing::debug!(?registry, "initialized process handler registry");

    registry
});

/// The process-wide handler registry.
///
/// Built on first use from the built-in names and every handler type and
/// unit linked into the binary.
pub fn handlers() -> &'static Registry {
    &HANDLERS
}

/// Bind `name` to a handler type path in the process-wide registry.
pub fn register(name: impl Into<String>, identifier: impl Into<String>) {
    handlers().register(name, identifier);
}

/// Look up a handler in the process-wide registry.
///
/// See [`get_opt`] for names that may be absent.
pub fn get(name: &str) -> Result<HandlerType, HandlerError> {
    handlers().get(name)
}

/// Look up a handler for an optional name in the process-wide registry.
///
/// Absent and empty names give `Ok(None)`.
pub fn get_opt(name: Option<&str>) -> Result<Option<HandlerType>, HandlerError> {
    handlers().get_opt(name)
}

/// Return the first resolvable candidate from the process-wide registry.
pub fn pick(candidates: impl Candidates) -> Result<HandlerType, HandlerError> {
    handlers().pick(candidates)
}
