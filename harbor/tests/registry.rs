mod common;

use harbor::{
    DEFAULT_HANDLERS, HandlerError, LoadError, NameError, Registry, TypeTable, default_identifier,
    testing::null_type,
};
use std::{
    sync::{Arc, atomic::Ordering, mpsc},
    thread,
    time::Duration,
};

#[test]
fn test_default_handlers_registered() {
    let registry = common::registry();

    assert_eq!(registry.get("cgi").unwrap(), harbor::get("cgi").unwrap());
    assert_eq!(registry.get("cgi").unwrap().path(), "harbor::handler::Cgi");

    for name in ["fastcgi", "mongrel", "webrick", "thin"] {
        assert!(registry.is_registered(name), "{name} should be a default");
    }
    for (name, _) in DEFAULT_HANDLERS.entries() {
        assert_eq!(registry.identifier(name).as_deref(), default_identifier(name));
    }
}

#[test]
fn test_default_without_linked_type_fails_lookup() {
    let registry = common::registry();
    let err = registry.get("webrick").unwrap_err();

    match err {
        HandlerError::NotFound { name, source } => {
            assert_eq!(name, "webrick");
            assert_eq!(
                source.lookup(),
                &NameError::Uninitialized {
                    path: "harbor::handler::Webrick".to_string()
                }
            );
            assert!(source.load().is_none());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_get_matches_type_table_lookup() {
    let registry = Registry::builder()
        .with_linked()
        .register("lobster", "harbor::handler::Lobster")
        .build();

    let mut table = TypeTable::new();
    table.define(null_type("harbor::handler::Lobster")).unwrap();

    assert_eq!(
        registry.get("lobster").unwrap(),
        table.resolve("harbor::handler::Lobster").unwrap()
    );
}

#[test]
fn test_missing_handler_fails() {
    let registry = common::registry();
    let err = registry.get("boom").unwrap_err();

    assert!(matches!(err, HandlerError::NotFound { ref name, .. } if name == "boom"));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn test_unregistered_but_defined_handler() {
    let registry = common::registry();
    let lobster = registry.get("Lobster").unwrap();

    assert_eq!(lobster.path(), "harbor::handler::Lobster");
    assert!(!registry.is_registered("Lobster"));
}

#[test]
fn test_register_custom_handler() {
    let registry = common::registry();
    registry.register("rock_lobster", "RockLobster");

    assert_eq!(registry.get("rock_lobster").unwrap().path(), "RockLobster");
}

#[test]
fn test_register_before_define() {
    let registry = Registry::default();
    registry.register("later", "harbor::handler::Later");
    assert!(registry.get("later").is_err());

    registry.define(null_type("harbor::handler::Later")).unwrap();
    assert_eq!(registry.get("later").unwrap().path(), "harbor::handler::Later");
}

#[test]
fn test_reregister_overwrites() {
    let registry = common::registry();
    registry.register("cgi", "RockLobster");

    assert_eq!(registry.get("cgi").unwrap().path(), "RockLobster");
    assert_eq!(registry.identifier("cgi").as_deref(), Some("RockLobster"));
}

#[test]
fn test_units_load_without_registration() {
    let registry = common::registry();

    assert!(!registry.is_loaded("harbor/handler/unregistered"));
    assert_eq!(
        registry.get("Unregistered").unwrap().path(),
        "harbor::handler::Unregistered"
    );
    assert!(registry.is_loaded("harbor/handler/unregistered"));

    assert_eq!(
        registry.get("UnregisteredLongOne").unwrap().path(),
        "harbor::handler::UnregisteredLongOne"
    );
}

#[test]
fn test_unit_lookup_is_case_sensitive() {
    let registry = common::registry();
    assert!(registry.get("Unregistered").is_ok());
    let err = registry.get("UnRegistered").unwrap_err();

    let HandlerError::NotFound { source, .. } = err else {
        panic!("expected NotFound");
    };
    assert!(matches!(
        source.load(),
        Some(LoadError::UnitNotFound { path }) if path == "harbor/handler/un_registered"
    ));
    assert_eq!(
        source.lookup(),
        &NameError::Uninitialized {
            path: "harbor::handler::UnRegistered".to_string()
        }
    );
}

#[test]
fn test_unit_registers_itself_while_loading() {
    let registry = common::registry();
    assert!(!registry.is_registered("registering_myself"));

    let ty = registry.get("registering_myself").unwrap();

    assert_eq!(ty.path(), "harbor::handler::RegisteringMyself");
    assert!(registry.is_registered("registering_myself"));
}

#[test]
fn test_unit_failure_is_kept_as_diagnostic() {
    let registry = common::registry();
    let err = registry.get("Thin").unwrap_err();

    let HandlerError::NotFound { source, .. } = err else {
        panic!("expected NotFound");
    };
    let load = source.load().expect("load failure recorded");
    assert!(matches!(load, LoadError::UnitFailed { .. }));
    assert_eq!(load.path(), "harbor/handler/thin");
    assert!(!registry.is_loaded("harbor/handler/thin"));
}

#[test]
fn test_unit_loader_resolves_sibling_unit() {
    let registry = Arc::new(common::registry());
    let (tx, rx) = mpsc::channel();

    let worker = registry.clone();
    thread::spawn(move || {
        let _ = tx.send(worker.get("SiblingMongrel").map(|ty| ty.path()));
    });

    let resolved = rx
        .recv_timeout(Duration::from_secs(5))
        .expect("resolving a sibling from a loader should not block");
    assert_eq!(resolved.unwrap(), "harbor::handler::SiblingMongrel");
    assert!(registry.is_loaded("harbor/handler/sibling_mongrel"));
    assert!(registry.is_loaded("harbor/handler/unregistered"));
}

#[test]
fn test_get_opt_skips_absent_names() {
    let registry = common::registry();
    assert_eq!(registry.get_opt(None).unwrap(), None);
    assert_eq!(registry.get_opt(Some("")).unwrap(), None);
    assert_eq!(
        registry.get_opt(Some("cgi")).unwrap().map(|ty| ty.path()),
        Some("harbor::handler::Cgi")
    );
}

#[test]
fn test_units_load_once_under_contention() {
    let registry = Arc::new(common::registry());
    let before = common::COUNTED_LOADS.load(Ordering::SeqCst);

    let threads: Vec<_> = (0..8)
        .map(|i| {
            let registry = registry.clone();
            std::thread::spawn(move || {
                registry.register(format!("counted_{i}"), "harbor::handler::Counted");
                registry.get("Counted").map(|ty| ty.path())
            })
        })
        .collect();

    for thread in threads {
        assert_eq!(thread.join().unwrap().unwrap(), "harbor::handler::Counted");
    }
    assert_eq!(common::COUNTED_LOADS.load(Ordering::SeqCst) - before, 1);
    assert_eq!(registry.get("counted_3").unwrap().path(), "harbor::handler::Counted");
}

#[test]
fn test_process_registry() {
    harbor::register("process_rock_lobster", "RockLobster");

    assert_eq!(
        harbor::get("process_rock_lobster").unwrap().path(),
        "RockLobster"
    );
    assert!(harbor::handlers().is_registered("cgi"));
    assert_eq!(harbor::get_opt(None).unwrap(), None);
    assert_eq!(
        harbor::get_opt(Some("cgi")).unwrap(),
        Some(harbor::get("cgi").unwrap())
    );
}
