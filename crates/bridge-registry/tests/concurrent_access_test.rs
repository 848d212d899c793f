//! Concurrent access from the command thread and engine callback threads

use std::sync::{Arc, Barrier};
use std::thread;

use rvoip_bridge_registry::{
    CallHandle, MessageHandle, RegistryConfig, SessionRegistry, SharedCall, SharedMessage,
};

#[derive(Debug)]
struct EngineCall {
    id: String,
}

impl EngineCall {
    fn new(id: &str) -> Self {
        Self { id: id.to_string() }
    }
}

impl CallHandle for EngineCall {
    fn call_id(&self) -> &str {
        &self.id
    }
}

#[derive(Debug)]
struct EngineMessage(String);

impl MessageHandle for EngineMessage {
    fn message_id(&self) -> &str {
        &self.0
    }
}

fn registry() -> Arc<SessionRegistry> {
    Arc::new(SessionRegistry::new(
        RegistryConfig::default().with_growth_warning_threshold(0),
    ))
}

#[test]
fn test_parallel_inserts_lose_no_update() {
    const THREADS: usize = 8;
    const PER_THREAD: usize = 250;

    let registry = registry();
    let barrier = Arc::new(Barrier::new(THREADS));

    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let registry = Arc::clone(&registry);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                for i in 0..PER_THREAD {
                    let id = format!("msg-{}-{}", t, i);
                    let message: SharedMessage = Arc::new(EngineMessage(id.clone()));
                    registry.messages().insert(id, message);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(registry.messages().len(), THREADS * PER_THREAD);
    for t in 0..THREADS {
        for i in 0..PER_THREAD {
            let id = format!("msg-{}-{}", t, i);
            assert_eq!(registry.messages().get(&id).unwrap().message_id(), id);
        }
    }
}

#[test]
fn test_same_key_readers_never_see_torn_entries() {
    const WRITERS: usize = 4;
    const ROUNDS: usize = 500;

    let registry = registry();
    let barrier = Arc::new(Barrier::new(WRITERS + 2));

    let mut handles = Vec::new();
    for _ in 0..WRITERS {
        let registry = Arc::clone(&registry);
        let barrier = Arc::clone(&barrier);
        handles.push(thread::spawn(move || {
            barrier.wait();
            for _ in 0..ROUNDS {
                let call: SharedCall = Arc::new(EngineCall::new("hot-call"));
                registry.calls().insert("hot-call", call);
            }
        }));
    }

    // an engine callback racing removals against the writers
    {
        let registry = Arc::clone(&registry);
        let barrier = Arc::clone(&barrier);
        handles.push(thread::spawn(move || {
            barrier.wait();
            for _ in 0..ROUNDS {
                registry.calls().remove("hot-call");
            }
        }));
    }

    let reader = {
        let registry = Arc::clone(&registry);
        let barrier = Arc::clone(&barrier);
        thread::spawn(move || {
            barrier.wait();
            let mut seen = 0usize;
            for _ in 0..ROUNDS * 4 {
                if let Some(call) = registry.calls().get("hot-call") {
                    assert_eq!(call.call_id(), "hot-call");
                    seen += 1;
                }
            }
            seen
        })
    };

    for handle in handles {
        handle.join().unwrap();
    }
    reader.join().unwrap();

    // at most one entry survives, and it is whole
    assert!(registry.calls().len() <= 1);
    for id in registry.calls().list() {
        assert_eq!(id, "hot-call");
    }
}

#[test]
fn test_insert_remove_pairs_leave_registry_empty() {
    const THREADS: usize = 6;
    const PER_THREAD: usize = 200;

    let registry = registry();
    let handles: Vec<_> = (0..THREADS)
        .map(|t| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                for i in 0..PER_THREAD {
                    let id = format!("call-{}-{}", t, i);
                    registry.register_call(Arc::new(EngineCall::new(&id)));
                    assert!(registry.calls().get(&id).is_some());
                    assert!(registry.calls().remove(&id).is_some());
                    assert!(registry.calls().get(&id).is_none());
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
    assert!(registry.calls().is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_engine_callbacks_resume_registered_calls() {
    let registry = registry();

    // command side registers the calls
    for i in 0..32 {
        let id = format!("call-{}", i);
        registry.register_call(Arc::new(EngineCall::new(&id)));
    }

    // engine callbacks look them up and end every even call
    let mut tasks = Vec::new();
    for i in 0..32usize {
        let registry = Arc::clone(&registry);
        tasks.push(tokio::spawn(async move {
            let id = format!("call-{}", i);
            let call = registry.calls().get(&id).expect("call registered before callbacks");
            if i % 2 == 0 {
                registry.calls().remove(call.call_id());
            }
            call.call_id().to_string()
        }));
    }

    for task in tasks {
        let id = task.await.unwrap();
        assert!(id.starts_with("call-"));
    }

    assert_eq!(registry.calls().len(), 16);

    // late event for an already-ended call is a normal miss
    assert!(registry.calls().get("call-0").is_none());
    assert!(registry.calls().remove("call-0").is_none());
}

#[test]
fn test_take_all_tears_down_every_call() {
    let registry = registry();
    for i in 0..10 {
        registry.register_call(Arc::new(EngineCall::new(&format!("call-{}", i))));
    }

    let mut ended: Vec<usize> = registry
        .calls()
        .take_all()
        .into_iter()
        .map(|(_, call)| call.call_id().trim_start_matches("call-").parse().unwrap())
        .collect();
    ended.sort();

    assert_eq!(ended, (0..10).collect::<Vec<_>>());
    assert!(registry.calls().is_empty());
}
