#![allow(dead_code)]

use harbor::{
    App, BoxError, Handler, Options, Registrar, Registry, SharedApp, submit_handler, submit_unit,
    testing::{CountingHandler, null_type},
};
use std::sync::atomic::{AtomicUsize, Ordering};

// ============================================================================
// Linked Handler Types
// ============================================================================

pub static LOBSTER_RUNS: AtomicUsize = AtomicUsize::new(0);

/// Defined up front, but never registered under a name.
#[derive(Default)]
pub struct Lobster;

impl Handler for Lobster {
    fn run(&self, app: SharedApp, _options: &Options) -> Result<(), BoxError> {
        LOBSTER_RUNS.fetch_add(1, Ordering::SeqCst);
        let response = app.call(Default::default());
        if response.status == 200 {
            Ok(())
        } else {
            Err(format!("lobster app answered {}", response.status).into())
        }
    }

    fn valid_options(&self) -> Vec<(&'static str, &'static str)> {
        vec![("Claws", "Number of claws to serve with")]
    }
}

submit_handler!("harbor::handler::Lobster" => Lobster);

/// Lives in the root namespace.
#[derive(Default)]
pub struct RockLobster;

impl Handler for RockLobster {
    fn run(&self, _app: SharedApp, _options: &Options) -> Result<(), BoxError> {
        Ok(())
    }
}

submit_handler!("RockLobster" => RockLobster);

submit_handler!("harbor::handler::Counting" => CountingHandler);

// ============================================================================
// Linked Units
// ============================================================================

pub static COUNTED_LOADS: AtomicUsize = AtomicUsize::new(0);

fn load_unregistered(registrar: &dyn Registrar) -> Result<(), BoxError> {
    registrar.define(null_type("harbor::handler::Unregistered"))
}

fn load_unregistered_long_one(registrar: &dyn Registrar) -> Result<(), BoxError> {
    registrar.define(null_type("harbor::handler::UnregisteredLongOne"))
}

fn load_registering_myself(registrar: &dyn Registrar) -> Result<(), BoxError> {
    registrar.define(null_type("harbor::handler::RegisteringMyself"))?;
    registrar.register("registering_myself", "harbor::handler::RegisteringMyself");
    Ok(())
}

fn load_thin(_registrar: &dyn Registrar) -> Result<(), BoxError> {
    Err("no such library -- thin".into())
}

fn load_counted(registrar: &dyn Registrar) -> Result<(), BoxError> {
    COUNTED_LOADS.fetch_add(1, Ordering::SeqCst);
    registrar.define(null_type("harbor::handler::Counted"))
}

fn load_sibling_mongrel(registrar: &dyn Registrar) -> Result<(), BoxError> {
    registrar.get("Unregistered")?;
    registrar.define(null_type("harbor::handler::SiblingMongrel"))
}

submit_unit!("harbor/handler/unregistered", load_unregistered);
submit_unit!("harbor/handler/unregistered_long_one", load_unregistered_long_one);
submit_unit!("harbor/handler/registering_myself", load_registering_myself);
submit_unit!("harbor/handler/thin", load_thin);
submit_unit!("harbor/handler/counted", load_counted);
submit_unit!("harbor/handler/sibling_mongrel", load_sibling_mongrel);

// ============================================================================
// Helpers
// ============================================================================

pub fn registry() -> Registry {
    Registry::standard()
}
