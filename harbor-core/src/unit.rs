//! Handler units: loadable registrations addressed by a conventional path.
//!
//! A unit stands in for the code that defines a handler. Resolving a name
//! that is not registered looks for a unit at
//! `<load root>/<underscore(name)>` and, if one exists, runs its loader once.
//! The loader receives a [`Registrar`] through which it defines types and
//! registers names, so a handler can register itself while it is loaded.
//! A loader may also resolve sibling handlers, which loads their units first.

use crate::{error::BoxError, types::HandlerType};
use std::fmt;

/// The registration surface a unit sees while it is loading.
pub trait Registrar {
    /// Bind `name` to a handler type path.
    fn register(&self, name: &str, identifier: &str);

    /// Define a handler type.
    fn define(&self, ty: HandlerType) -> Result<(), BoxError>;

    /// Resolve another handler by name.
    ///
    /// A unit that is still loading, including the caller's own, is treated
    /// as loaded and is not run again.
    fn get(&self, name: &str) -> Result<HandlerType, BoxError>;
}

/// Loader function run when a unit is loaded.
pub type Loader = fn(&dyn Registrar) -> Result<(), BoxError>;

/// A loadable unit.
#[derive(Clone, Copy)]
pub struct HandlerUnit {
    path: &'static str,
    load: Loader,
}

impl HandlerUnit {
    /// Create a unit at `path`.
    pub const fn new(path: &'static str, load: Loader) -> Self {
        Self { path, load }
    }

    /// The unit's path, e.g. `harbor/handler/thin`.
    pub const fn path(&self) -> &'static str {
        self.path
    }

    /// Run the unit's loader.
    pub fn load(&self, registrar: &dyn Registrar) -> Result<(), BoxError> {
        (self.load)(registrar)
    }
}

impl fmt::Debug for HandlerUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("HandlerUnit").field(&self.path).finish()
    }
}
