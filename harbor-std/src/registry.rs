//! # Handler Registry
//!
//! Maps handler names to handler type paths and resolves them on demand.
//!
//! Resolving a name goes through three steps:
//!
//! 1. If the name is not registered, load the unit at
//!    `<load root>/<underscore(name)>`, if there is one.
//! 2. If the name is now registered, resolve its identifier from the root
//!    namespace. Otherwise resolve the name itself inside the handler
//!    namespace, falling back to the root namespace.
//! 3. Report the lookup failure, keeping any load failure alongside it.
//!
//! # Example
//!
//! ```rust,ignore
//! let registry = Registry::standard();
//! registry.register("rock_lobster", "RockLobster");
//!
//! let cgi = registry.get("cgi")?;
//! let first = registry.pick(["thin", "webrick", "cgi"])?;
//! ```

use crate::{defaults, linked};
use harbor_core::{
    BoxError, HandlerError, HandlerType, HandlerUnit, LoadError, NameError, Registrar,
    ResolveError, TypeTable, underscore,
};
use parking_lot::{Condvar, Mutex, RwLock};
use std::{
    collections::HashMap,
    fmt,
    thread::{self, ThreadId},
};

/// An ordered list of handler names to try.
///
/// A single name is a list of one.
pub trait Candidates {
    /// The candidate names, in the order they are tried.
    fn into_names(self) -> Vec<String>;
}

impl Candidates for &str {
    fn into_names(self) -> Vec<String> {
        vec![self.to_string()]
    }
}

impl Candidates for String {
    fn into_names(self) -> Vec<String> {
        vec![self]
    }
}

impl<S: AsRef<str>> Candidates for &[S] {
    fn into_names(self) -> Vec<String> {
        self.iter().map(|s| s.as_ref().to_string()).collect()
    }
}

impl<S: AsRef<str>, const N: usize> Candidates for [S; N] {
    fn into_names(self) -> Vec<String> {
        self.iter().map(|s| s.as_ref().to_string()).collect()
    }
}

impl<S: AsRef<str>> Candidates for Vec<S> {
    fn into_names(self) -> Vec<String> {
        self.iter().map(|s| s.as_ref().to_string()).collect()
    }
}

// ============================================================================
// RegistryBuilder - for configuring registries
// ============================================================================

/// Builder for constructing a [`Registry`].
///
/// # Example
/// ```ignore
/// let registry = Registry::builder()
///     .with_defaults()
///     .with_linked()
///     .register("rock_lobster", "RockLobster")
///     .build();
/// ```
pub struct RegistryBuilder {
    names: HashMap<String, String>,
    types: Vec<HandlerType>,
    units: HashMap<String, HandlerUnit>,
    namespace: String,
    load_root: String,
}

impl RegistryBuilder {
    /// Create a builder with no names, types or units.
    pub fn new() -> Self {
        Self {
            names: HashMap::new(),
            types: Vec::new(),
            units: HashMap::new(),
            namespace: defaults::HANDLER_NAMESPACE.to_string(),
            load_root: defaults::LOAD_ROOT.to_string(),
        }
    }

    /// Register the built-in handler names.
    pub fn with_defaults(mut self) -> Self {
        for (name, identifier) in defaults::DEFAULT_HANDLERS.entries() {
            self.register_mut(*name, *identifier);
        }
        self
    }

    /// Add every handler type and unit submitted at link time.
    pub fn with_linked(mut self) -> Self {
        self.types.extend(linked::handlers());
        for unit in linked::units() {
            self.units.insert(unit.path().to_string(), unit);
        }
        self
    }

    /// Bind `name` to a handler type path.
    pub fn register(mut self, name: impl Into<String>, identifier: impl Into<String>) -> Self {
        self.register_mut(name, identifier);
        self
    }

    /// Bind `name` to a handler type path (mutable version).
    pub fn register_mut(&mut self, name: impl Into<String>, identifier: impl Into<String>) {
        self.names.insert(name.into(), identifier.into());
    }

    /// Define a handler type.
    ///
    /// Types with an invalid path are skipped at build time.
    pub fn define(mut self, ty: HandlerType) -> Self {
        self.types.push(ty);
        self
    }

    /// Add a loadable unit. A later unit at the same path replaces an earlier one.
    pub fn unit(mut self, unit: HandlerUnit) -> Self {
        self.units.insert(unit.path().to_string(), unit);
        self
    }

    /// Set the namespace unregistered names are resolved in.
    pub fn namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = namespace.into();
        self
    }

    /// Set the prefix unit paths are derived under.
    pub fn load_root(mut self, load_root: impl Into<String>) -> Self {
        self.load_root = load_root.into();
        self
    }

    /// Build the registry.
    pub fn build(self) -> Registry {
        let mut types = TypeTable::new();
        for ty in self.types {
            if let Err(err) = types.define(ty) {
                #[cfg(feature = "tracing")]
                tracing::warn!(%ty, error = %err, "skipping handler type with invalid path");
                #[cfg(not(feature = "tracing"))]
                let _ = err;
            }
        }

        Registry {
            names: RwLock::new(self.names),
            types: RwLock::new(types),
            units: self.units,
            unit_states: Mutex::new(HashMap::new()),
            unit_settled: Condvar::new(),
            namespace: self.namespace,
            load_root: self.load_root,
        }
    }
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Unit load state
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UnitState {
    Loading(ThreadId),
    Loaded,
}

/// Clears a `Loading` entry if its loader fails or unwinds.
struct LoadingGuard<'a> {
    registry: &'a Registry,
    path: &'a str,
    finished: bool,
}

impl LoadingGuard<'_> {
    fn finish(mut self) {
        self.registry
            .unit_states
            .lock()
            .insert(self.path.to_string(), UnitState::Loaded);
        self.finished = true;
    }
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        if !self.finished {
            self.registry.unit_states.lock().remove(self.path);
        }
        self.registry.unit_settled.notify_all();
    }
}

// ============================================================================
// Registry - name resolution
// ============================================================================

/// A thread-safe registry of handler names.
pub struct Registry {
    names: RwLock<HashMap<String, String>>,
    types: RwLock<TypeTable>,
    units: HashMap<String, HandlerUnit>,
    // Never held across a loader call.
    unit_states: Mutex<HashMap<String, UnitState>>,
    unit_settled: Condvar,
    namespace: String,
    load_root: String,
}

impl Registry {
    /// Start configuring a registry.
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// A registry with the built-in names and everything linked into this binary.
    pub fn standard() -> Self {
        Self::builder().with_defaults().with_linked().build()
    }

    /// Bind `name` to a handler type path, replacing any previous binding.
    ///
    /// The type does not need to be defined yet.
    pub fn register(&self, name: impl Into<String>, identifier: impl Into<String>) {
        let name = name.into();
        let identifier = identifier.into();

        #[cfg(feature = "tracing")]
        tracing::debug!(%name, %identifier, "registering handler");

        self.names.write().insert(name, identifier);
    }

    /// Define a handler type.
    pub fn define(&self, ty: HandlerType) -> Result<(), NameError> {
        #[cfg(feature = "tracing")]
        tracing::debug!(%ty, "defining handler type");

        self.types.write().define(ty)
    }

    /// The identifier bound to `name`, if registered.
    pub fn identifier(&self, name: &str) -> Option<String> {
        self.names.read().get(name).cloned()
    }

    /// Check whether `name` is registered.
    pub fn is_registered(&self, name: &str) -> bool {
        self.names.read().contains_key(name)
    }

    /// Check whether the unit at `path` has been loaded.
    pub fn is_loaded(&self, path: &str) -> bool {
        self.unit_states.lock().get(path) == Some(&UnitState::Loaded)
    }

    /// All registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<_> = self.names.read().keys().cloned().collect();
        names.sort_unstable();
        names
    }

    /// Number of registered names.
    pub fn len(&self) -> usize {
        self.names.read().len()
    }

    /// Check if no names are registered.
    pub fn is_empty(&self) -> bool {
        self.names.read().is_empty()
    }

    /// The namespace unregistered names are resolved in.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// The unit path conventionally associated with `name`.
    pub fn unit_path(&self, name: &str) -> String {
        format!("{}/{}", self.load_root, underscore(name))
    }

    /// Look up the handler type for `name`.
    pub fn get(&self, name: &str) -> Result<HandlerType, HandlerError> {
        self.resolve(name).map_err(|source| HandlerError::NotFound {
            name: name.to_string(),
            source,
        })
    }

    /// Look up the handler type for an optional name.
    ///
    /// Absent and empty names resolve to `None` without touching the registry.
    pub fn get_opt(&self, name: Option<&str>) -> Result<Option<HandlerType>, HandlerError> {
        match name {
            Some(name) if !name.is_empty() => self.get(name).map(Some),
            _ => Ok(None),
        }
    }

    /// Return the first candidate that resolves.
    ///
    /// Candidates are tried in order; none after the first success is
    /// attempted.
    pub fn pick(&self, candidates: impl Candidates) -> Result<HandlerType, HandlerError> {
        let names = candidates.into_names();
        for name in &names {
            match self.resolve(name) {
                Ok(ty) => return Ok(ty),
                Err(err) => {
                    #[cfg(feature = "tracing")]
                    tracing::trace!(%name, error = %err, "handler candidate not available");
                    #[cfg(not(feature = "tracing"))]
                    let _ = err;
                }
            }
        }
        Err(HandlerError::NoCandidate { names })
    }

    /// Resolve `name` to a handler type.
    pub fn resolve(&self, name: &str) -> Result<HandlerType, ResolveError> {
        let load = if self.is_registered(name) {
            None
        } else {
            self.try_load(name).err()
        };

        let identifier = self.identifier(name);
        let types = self.types.read();
        let found = match &identifier {
            Some(identifier) => types.resolve(identifier),
            None => types.resolve_in(&self.namespace, name),
        };

        match found {
            Ok(ty) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(%name, %ty, "resolved handler");
                Ok(ty)
            }
            Err(lookup) => Err(ResolveError::new(lookup, load)),
        }
    }

    /// Load the unit for `name` unless it is loaded or already loading.
    ///
    /// A unit that is loading on the calling thread counts as loaded, so a
    /// loader may resolve its own name or a sibling's. Other threads wait
    /// for the loader to settle.
    fn try_load(&self, name: &str) -> Result<(), LoadError> {
        let path = self.unit_path(name);
        let Some(unit) = self.units.get(&path) else {
            return Err(LoadError::UnitNotFound { path });
        };

        let current = thread::current().id();
        {
            let mut states = self.unit_states.lock();
            loop {
                match states.get(&path).copied() {
                    Some(UnitState::Loaded) => return Ok(()),
                    Some(UnitState::Loading(owner)) if owner == current => return Ok(()),
                    Some(UnitState::Loading(_)) => self.unit_settled.wait(&mut states),
                    None => {
                        states.insert(path.clone(), UnitState::Loading(current));
                        break;
                    }
                }
            }
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(%path, "loading handler unit");

        let guard = LoadingGuard {
            registry: self,
            path: &path,
            finished: false,
        };
        match unit.load(self) {
            Ok(()) => {
                guard.finish();
                Ok(())
            }
            Err(source) => {
                drop(guard);
                Err(LoadError::UnitFailed { path, source })
            }
        }
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Registrar for Registry {
    fn register(&self, name: &str, identifier: &str) {
        Registry::register(self, name, identifier);
    }

    fn define(&self, ty: HandlerType) -> Result<(), BoxError> {
        Registry::define(self, ty).map_err(Into::into)
    }

    fn get(&self, name: &str) -> Result<HandlerType, BoxError> {
        Registry::get(self, name).map_err(Into::into)
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("names", &self.len())
            .field("types", &self.types.read().len())
            .field("units", &self.units.len())
            .field("namespace", &self.namespace)
            .field("load_root", &self.load_root)
            .finish()
    }
}
