//! Testing utilities for Harbor.
//!
//! This module provides stand-ins for apps and handlers so registries and
//! handlers can be exercised without a real server.
//!
//! # Features
//!
//! - [`null_handler`] / [`null_type`]: handler types that do nothing when run
//! - [`RecordingApp`]: an app that records every request it receives
//! - [`CountingHandler`]: a handler that counts how often it was run

use harbor_core::{App, BoxError, Handler, HandlerType, Options, Request, Response, SharedApp};
use parking_lot::Mutex;
use std::sync::{
    Arc,
    atomic::{AtomicUsize, Ordering},
};

// ============================================================================
// Null Handler
// ============================================================================

/// A handler that returns as soon as it is run.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullHandler;

impl Handler for NullHandler {
    fn run(&self, _app: SharedApp, _options: &Options) -> Result<(), BoxError> {
        Ok(())
    }
}

/// Constructor for [`NullHandler`], usable in `HandlerType::new`.
pub fn null_handler() -> Box<dyn Handler> {
    Box::new(NullHandler)
}

/// A handler type at `path` backed by [`NullHandler`].
///
/// # Example
///
/// ```rust,ignore
/// const ROCK_LOBSTER: HandlerType = null_type("RockLobster");
/// let registry = Registry::builder().define(ROCK_LOBSTER).build();
/// ```
pub const fn null_type(path: &'static str) -> HandlerType {
    HandlerType::new(path, null_handler)
}

// ============================================================================
// Recording App
// ============================================================================

/// An app that records all requests it receives and answers with a fixed
/// response.
pub struct RecordingApp {
    requests: Arc<Mutex<Vec<Request>>>,
    response: Response,
}

impl RecordingApp {
    /// Create a recording app answering with `response`.
    pub fn new(response: Response) -> Self {
        Self {
            requests: Arc::new(Mutex::new(Vec::new())),
            response,
        }
    }

    /// Get a clone of the recorded requests.
    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().clone()
    }

    /// Get the number of recorded requests.
    pub fn count(&self) -> usize {
        self.requests.lock().len()
    }
}

impl Clone for RecordingApp {
    fn clone(&self) -> Self {
        Self {
            requests: self.requests.clone(),
            response: self.response.clone(),
        }
    }
}

impl App for RecordingApp {
    fn call(&self, request: Request) -> Response {
        self.requests.lock().push(request);
        self.response.clone()
    }
}

// ============================================================================
// Counting Handler
// ============================================================================

/// A handler that counts invocations and records the options it was run with.
#[derive(Clone, Default)]
pub struct CountingHandler {
    count: Arc<AtomicUsize>,
    options: Arc<Mutex<Vec<Options>>>,
}

impl CountingHandler {
    /// Create a new counting handler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current count.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }

    /// The options of every run so far.
    pub fn options(&self) -> Vec<Options> {
        self.options.lock().clone()
    }
}

impl Handler for CountingHandler {
    fn run(&self, _app: SharedApp, options: &Options) -> Result<(), BoxError> {
        self.count.fetch_add(1, Ordering::SeqCst);
        self.options.lock().push(options.clone());
        Ok(())
    }

    fn valid_options(&self) -> Vec<(&'static str, &'static str)> {
        vec![
            (harbor_core::HOST, "Hostname to listen on"),
            (harbor_core::PORT, "Port to listen on"),
        ]
    }
}
