//! # Link-time Handler Collection
//!
//! Handler types and units submitted with [`submit_handler!`] and
//! [`submit_unit!`] are collected by the `inventory` crate and picked up by
//! [`RegistryBuilder::with_linked`](crate::RegistryBuilder::with_linked).
//!
//! # Example
//!
//! ```rust,ignore
//! use harbor_std::{submit_handler, submit_unit};
//!
//! #[derive(Default)]
//! struct Thin;
//! impl Handler for Thin { ... }
//!
//! // Defined in every registry built with `with_linked()`
//! submit_handler!("harbor::handler::Thin" => Thin);
//!
//! // Loaded the first time someone asks for `"Puma"` or `"puma"`
//! submit_unit!("harbor/handler/puma", load_puma);
//! ```

use harbor_core::{HandlerType, HandlerUnit};

/// A handler type submitted at link time.
pub struct LinkedHandler(HandlerType);

impl LinkedHandler {
    /// Wrap a handler type for submission.
    pub const fn new(ty: HandlerType) -> Self {
        Self(ty)
    }
}

inventory::collect!(LinkedHandler);

/// A handler unit submitted at link time.
pub struct LinkedUnit(HandlerUnit);

impl LinkedUnit {
    /// Wrap a unit for submission.
    pub const fn new(unit: HandlerUnit) -> Self {
        Self(unit)
    }
}

inventory::collect!(LinkedUnit);

/// Every handler type submitted in this binary.
pub fn handlers() -> impl Iterator<Item = HandlerType> {
    inventory::iter::<LinkedHandler>().map(|linked| linked.0)
}

/// Every handler unit submitted in this binary.
pub fn units() -> impl Iterator<Item = HandlerUnit> {
    inventory::iter::<LinkedUnit>().map(|linked| linked.0)
}

/// Submit a handler type for link-time collection.
///
/// The type must implement `Handler` and `Default`.
///
/// ```rust,ignore
/// submit_handler!("harbor::handler::Cgi" => Cgi);
/// ```
#[macro_export]
macro_rules! submit_handler {
    ($path:expr => $ty:ty) => {
        $crate::inventory::submit! {
            $crate::linked::LinkedHandler::new($crate::harbor_core::HandlerType::new($path, {
                fn construct() -> ::std::boxed::Box<dyn $crate::harbor_core::Handler> {
                    ::std::boxed::Box::new(<$ty as ::std::default::Default>::default())
                }
                construct
            }))
        }
    };
}

/// Submit a handler unit for link-time collection.
///
/// The loader is a `fn(&dyn Registrar) -> Result<(), BoxError>`.
///
/// ```rust,ignore
/// submit_unit!("harbor/handler/registering_myself", load);
/// ```
#[macro_export]
macro_rules! submit_unit {
    ($path:expr, $load:expr) => {
        $crate::inventory::submit! {
            $crate::linked::LinkedUnit::new($crate::harbor_core::HandlerUnit::new($path, $load))
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cgi_is_linked() {
        assert!(handlers().any(|ty| ty.path() == "harbor::handler::Cgi"));
    }

    #[test]
    fn test_linked_paths_are_unique() {
        let mut paths: Vec<_> = handlers().map(|ty| ty.path()).collect();
        let total = paths.len();
        paths.sort_unstable();
        paths.dedup();
        assert_eq!(paths.len(), total);
    }
}
