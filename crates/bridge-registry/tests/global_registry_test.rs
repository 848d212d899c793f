//! Tests for the process-wide registry instance
//!
//! These share the global instance with each other, so they run serially and
//! use identifiers no other test touches.

use std::sync::Arc;
use std::thread;

use rvoip_bridge_registry::{
    get_global_registry, CallHandle, SessionRegistry, SharedCall, ViewOptions,
};
use serial_test::serial;

#[derive(Debug)]
struct EngineCall {
    id: String,
}

impl CallHandle for EngineCall {
    fn call_id(&self) -> &str {
        &self.id
    }
}

#[test]
#[serial]
fn test_instance_is_a_singleton() {
    let first = SessionRegistry::instance();
    let second = get_global_registry();
    assert!(std::ptr::eq(first, second));

    let from_thread = thread::spawn(|| SessionRegistry::instance() as *const SessionRegistry as usize)
        .join()
        .unwrap();
    assert_eq!(from_thread, first as *const SessionRegistry as usize);
}

#[test]
#[serial]
fn test_insert_via_one_reference_read_via_other() {
    let writer = thread::spawn(|| {
        let call: SharedCall = Arc::new(EngineCall { id: "global-call-1".to_string() });
        SessionRegistry::instance().calls().insert("global-call-1", call);
    });
    writer.join().unwrap();

    let found = get_global_registry().calls().get("global-call-1");
    assert_eq!(found.unwrap().call_id(), "global-call-1");

    get_global_registry().calls().remove("global-call-1");
    assert!(SessionRegistry::instance().calls().get("global-call-1").is_none());
}

#[test]
#[serial]
fn test_view_options_have_independent_lifecycle() {
    let registry = SessionRegistry::instance();

    registry.register_call(Arc::new(EngineCall { id: "global-call-2".to_string() }));
    registry
        .view_options()
        .insert("global-call-2", ViewOptions::new().with_mirror(true));

    registry.calls().remove("global-call-2");

    assert!(!registry.calls().contains("global-call-2"));
    let options = registry.view_options().get("global-call-2").unwrap();
    assert!(options.mirror());

    registry.view_options().remove("global-call-2");
    assert!(!registry.view_options().contains("global-call-2"));
}

#[test]
#[serial]
fn test_view_options_before_call_exists() {
    let registry = SessionRegistry::instance();

    registry
        .view_options()
        .insert("global-call-3", ViewOptions::new().with_overlay(true));
    assert!(registry.calls().get("global-call-3").is_none());

    registry.register_call(Arc::new(EngineCall { id: "global-call-3".to_string() }));
    assert!(registry.view_options().get("global-call-3").unwrap().overlay());

    registry.calls().remove("global-call-3");
    registry.view_options().remove("global-call-3");
}
