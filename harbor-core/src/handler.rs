//! # Handler Contract
//!
//! A handler connects a web server with an [`App`]. Handlers are usually
//! started by calling [`Handler::run`] with the app and a set of
//! server-specific [`Options`].
//!
//! # Usage Patterns
//!
//! 1. **Struct implementation**: `impl Handler for MyServer`
//! 2. **Closure apps**: any `Fn(Request) -> Response` is an [`App`]

use crate::{error::BoxError, options::Options};
use std::{collections::BTreeMap, sync::Arc};

/// The incoming side of an app call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Request {
    /// Request environment (CGI-style meta-variables).
    pub env: BTreeMap<String, String>,
    /// Request body.
    pub body: Vec<u8>,
}

impl Request {
    /// Create a request from an environment and a body.
    pub fn new(env: BTreeMap<String, String>, body: Vec<u8>) -> Self {
        Self { env, body }
    }

    /// Look up an environment variable.
    pub fn var(&self, key: &str) -> Option<&str> {
        self.env.get(key).map(String::as_str)
    }
}

/// The outgoing side of an app call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// HTTP status code.
    pub status: u16,
    /// Response headers in the order they are written.
    pub headers: Vec<(String, String)>,
    /// Response body.
    pub body: Vec<u8>,
}

impl Response {
    /// Create an empty response with the given status.
    pub fn new(status: u16) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: Vec::new(),
        }
    }

    /// Append a header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Set the body.
    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }
}

/// A request-processing application.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a Harbor app",
    label = "missing `App` implementation",
    note = "Apps take a `Request` and return a `Response`; closures of that shape work too."
)]
pub trait App: Send + Sync + 'static {
    /// Process a single request.
    fn call(&self, request: Request) -> Response;
}

impl<F> App for F
where
    F: Fn(Request) -> Response + Send + Sync + 'static,
{
    fn call(&self, request: Request) -> Response {
        (self)(request)
    }
}

/// An app shared between a handler and whoever started it.
pub type SharedApp = Arc<dyn App>;

/// A server adapter that runs an [`App`].
pub trait Handler: Send + Sync + 'static {
    /// Start serving `app`. Returns once the server stops.
    fn run(&self, app: SharedApp, options: &Options) -> Result<(), BoxError>;

    /// Options this handler understands, as `(flag, description)` pairs.
    fn valid_options(&self) -> Vec<(&'static str, &'static str)> {
        Vec::new()
    }
}
