//! Handler types and the table that resolves them by path.
//!
//! A [`HandlerType`] pairs a `::`-separated path with a constructor. The
//! [`TypeTable`] stores types in a tree of namespaces and resolves paths one
//! segment at a time from its root.

use crate::{
    error::NameError,
    handler::Handler,
    naming::{PATH_SEPARATOR, is_valid_segment, join_path},
};
use std::{collections::HashMap, fmt, hash::Hash};

/// Constructor for a handler instance.
pub type Construct = fn() -> Box<dyn Handler>;

/// A handler type: the resolved result of a name lookup.
///
/// Equality and hashing consider only the path.
#[derive(Clone, Copy)]
pub struct HandlerType {
    path: &'static str,
    construct: Construct,
}

impl HandlerType {
    /// Create a handler type.
    pub const fn new(path: &'static str, construct: Construct) -> Self {
        Self { path, construct }
    }

    /// The full path of this type, e.g. `harbor::handler::Cgi`.
    pub const fn path(&self) -> &'static str {
        self.path
    }

    /// The last path segment.
    pub fn name(&self) -> &'static str {
        self.path
            .rsplit(PATH_SEPARATOR)
            .next()
            .unwrap_or(self.path)
    }

    /// Create a new handler instance.
    pub fn instantiate(&self) -> Box<dyn Handler> {
        (self.construct)()
    }
}

impl PartialEq for HandlerType {
    fn eq(&self, other: &Self) -> bool {
        self.path == other.path
    }
}

impl Eq for HandlerType {}

impl Hash for HandlerType {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.path.hash(state);
    }
}

impl fmt::Debug for HandlerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("HandlerType").field(&self.path).finish()
    }
}

impl fmt::Display for HandlerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path)
    }
}

#[derive(Default)]
struct Node {
    ty: Option<HandlerType>,
    children: HashMap<String, Node>,
}

/// A tree of namespaces holding handler types.
#[derive(Default)]
pub struct TypeTable {
    root: Node,
    len: usize,
}

impl TypeTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Define a type at its path, creating intermediate namespaces.
    ///
    /// Redefining a path replaces the previous type.
    pub fn define(&mut self, ty: HandlerType) -> Result<(), NameError> {
        let segments = split(ty.path())?;
        let mut node = &mut self.root;
        for segment in segments {
            node = node.children.entry(segment.to_string()).or_default();
        }
        if node.ty.replace(ty).is_none() {
            self.len += 1;
        }
        Ok(())
    }

    /// Resolve a path from the root namespace.
    pub fn resolve(&self, path: &str) -> Result<HandlerType, NameError> {
        let segments = split(path)?;
        let mut node = &self.root;
        for (depth, segment) in segments.iter().enumerate() {
            node = node.children.get(*segment).ok_or_else(|| NameError::Uninitialized {
                path: segments[..=depth].join(PATH_SEPARATOR),
            })?;
        }
        node.ty.ok_or_else(|| NameError::Uninitialized {
            path: path.to_string(),
        })
    }

    /// Resolve a path inside `namespace`, falling back to the root namespace.
    ///
    /// Lookup failures are reported against the namespaced path.
    pub fn resolve_in(&self, namespace: &str, path: &str) -> Result<HandlerType, NameError> {
        split(path)?;
        let scoped = join_path(namespace, path);
        match self.resolve(&scoped) {
            Ok(ty) => Ok(ty),
            Err(err) => self.resolve(path).map_err(|_| err),
        }
    }

    /// Check whether a type is defined at `path`.
    pub fn contains(&self, path: &str) -> bool {
        self.resolve(path).is_ok()
    }

    /// Number of defined types.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if no types are defined.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

fn split(path: &str) -> Result<Vec<&str>, NameError> {
    let segments: Vec<&str> = path.split(PATH_SEPARATOR).collect();
    match segments.iter().find(|s| !is_valid_segment(s)) {
        Some(segment) => Err(NameError::InvalidSegment {
            path: path.to_string(),
            segment: segment.to_string(),
        }),
        None => Ok(segments),
    }
}
