//! Integration tests for queue ordering, broadcast short-circuiting, deferred
//! materialization, delta recording and counter semantics.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use serde_json::{json, Value};

use eventvisor::{
    Catalog, Config, HandlerError, InstantiateError, InvokeFn, Listener, Mediator, MediatorError,
    QueueOp, DELTA_EVENT,
};

/// A listener that counts its invocations and returns a fixed value.
fn counting(counter: Arc<AtomicUsize>, ret: Value) -> Listener {
    Listener::handler(move |_args| {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(ret.clone())
    })
}

#[test]
fn count_matches_all_and_is_zero_for_untouched_names() {
    let mediator = Mediator::new();
    assert_eq!(mediator.count("nope"), 0);
    assert!(mediator.all("nope").is_empty());

    mediator.push("e", "a").unwrap();
    mediator.push("e", "b").unwrap();
    assert_eq!(mediator.count("e"), mediator.all("e").len());
    assert_eq!(mediator.count("e"), 2);
}

#[test]
fn push_appends_and_returns_new_length() {
    let mediator = Mediator::new();
    assert_eq!(mediator.push("e", "a").unwrap(), 1);
    assert_eq!(mediator.push("e", "b").unwrap(), 2);
    assert_eq!(mediator.push("e", "c").unwrap(), 3);

    let ids: Vec<_> = mediator
        .all("e")
        .iter()
        .filter_map(|l| l.identifier().map(str::to_string))
        .collect();
    assert_eq!(ids, vec!["a", "b", "c"]);
}

#[test]
fn push_fans_out_groups_recursively() {
    let mediator = Mediator::new();
    let group = Listener::from(vec![
        Listener::from("a"),
        Listener::from(vec![Listener::from("b"), Listener::from("c")]),
        Listener::from("d"),
    ]);
    assert_eq!(mediator.push("e", group).unwrap(), 4);

    let ids: Vec<_> = mediator
        .all("e")
        .iter()
        .filter_map(|l| l.identifier().map(str::to_string))
        .collect();
    assert_eq!(ids, vec!["a", "b", "c", "d"]);
}

#[test]
fn unshift_prepends_and_rejects_groups() {
    let mediator = Mediator::new();
    mediator.push("e", "a").unwrap();
    mediator.push("e", "b").unwrap();
    assert_eq!(mediator.unshift("e", "c").unwrap(), 3);

    let ids: Vec<_> = mediator
        .all("e")
        .iter()
        .filter_map(|l| l.identifier().map(str::to_string))
        .collect();
    assert_eq!(ids, vec!["c", "a", "b"]);

    let err = mediator
        .unshift("e", Listener::from(vec![Listener::from("x")]))
        .unwrap_err();
    assert!(matches!(err, MediatorError::InvalidListener { .. }));
    // the failed unshift must not have touched the queue
    assert_eq!(mediator.count("e"), 3);
}

#[test]
fn unshift_creates_absent_queue() {
    let mediator = Mediator::new();
    assert_eq!(mediator.unshift("fresh", "x").unwrap(), 1);
    assert_eq!(mediator.count("fresh"), 1);
}

#[test]
fn shift_removes_front_and_is_safe_on_empty() {
    let mediator = Mediator::new();
    mediator.push("e", "a").unwrap();
    mediator.push("e", "b").unwrap();

    let taken = mediator.shift("e").unwrap();
    assert_eq!(taken.identifier(), Some("a"));
    assert_eq!(mediator.count("e"), 1);

    assert!(mediator.shift("absent").is_none());
    assert_eq!(mediator.count("absent"), 0);
    assert!(!mediator.keys().iter().any(|k| &**k == "absent"));
}

#[test]
fn pop_removes_back() {
    let mediator = Mediator::new();
    mediator.push("e", "a").unwrap();
    mediator.push("e", "b").unwrap();

    let taken = mediator.pop("e").unwrap();
    assert_eq!(taken.identifier(), Some("b"));

    let remaining = mediator.all("e");
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].identifier(), Some("a"));
}

#[test]
fn drained_and_cleared_queues_match_never_registered() {
    let mediator = Mediator::new();

    mediator.push("drained", "a").unwrap();
    mediator.shift("drained");

    mediator.push("cleared", "a").unwrap();
    mediator.push("cleared", "b").unwrap();
    mediator.clear("cleared");

    for name in ["drained", "cleared", "never"] {
        assert_eq!(mediator.count(name), 0, "{name}");
        assert!(mediator.all(name).is_empty(), "{name}");
        assert!(mediator.first(name).is_none(), "{name}");
        assert!(mediator.last(name).is_none(), "{name}");
    }
    assert!(!mediator
        .keys()
        .iter()
        .any(|k| &**k == "drained" || &**k == "cleared"));
}

#[test]
fn first_and_last_return_front_and_final_entry() {
    let mediator = Mediator::new();
    mediator.push("e", "a").unwrap();
    mediator.push("e", "b").unwrap();
    mediator.push("e", "c").unwrap();

    assert_eq!(mediator.first("e").unwrap().identifier(), Some("a"));
    assert_eq!(mediator.last("e").unwrap().identifier(), Some("c"));
}

#[test]
fn keys_are_sorted_and_reads_are_idempotent() {
    let mediator = Mediator::new();
    mediator.push("zeta", "l").unwrap();
    mediator.push("alpha", "l").unwrap();

    let names: Vec<String> = mediator.keys().iter().map(|k| k.to_string()).collect();
    assert_eq!(names, vec!["alpha", "zeta"]);

    // repeated reads without intervening mutation return identical results
    assert_eq!(mediator.keys(), mediator.keys());
    assert_eq!(mediator.all("zeta"), mediator.all("zeta"));
    assert_eq!(mediator.count("zeta"), mediator.count("zeta"));
}

#[test]
fn notify_invokes_in_order_and_forwards_args() {
    let mediator = Mediator::new();
    let seen = Arc::new(std::sync::Mutex::new(Vec::new()));

    for tag in ["first", "second"] {
        let seen = seen.clone();
        mediator
            .push(
                "e",
                Listener::handler(move |args| {
                    seen.lock().unwrap().push((tag, args.to_vec()));
                    Ok(Value::Null)
                }),
            )
            .unwrap();
    }

    let invoked = mediator.notify("e", &[json!(1), json!(2)]).unwrap();
    assert_eq!(invoked, 2);

    let seen = seen.lock().unwrap();
    assert_eq!(seen[0], ("first", vec![json!(1), json!(2)]));
    assert_eq!(seen[1], ("second", vec![json!(1), json!(2)]));
}

#[test]
fn notify_without_args_passes_empty_slice() {
    let mediator = Mediator::new();
    let arg_len = Arc::new(AtomicUsize::new(usize::MAX));
    let arg_len_inner = arg_len.clone();
    mediator
        .push(
            "e",
            Listener::handler(move |args| {
                arg_len_inner.store(args.len(), Ordering::SeqCst);
                Ok(Value::Null)
            }),
        )
        .unwrap();

    assert_eq!(mediator.notify("e", &[]).unwrap(), 1);
    assert_eq!(arg_len.load(Ordering::SeqCst), 0);
}

#[test]
fn strict_false_stops_the_chain() {
    let mediator = Mediator::new();
    let first = Arc::new(AtomicUsize::new(0));
    let second = Arc::new(AtomicUsize::new(0));

    mediator
        .push("e", counting(first.clone(), Value::Bool(false)))
        .unwrap();
    mediator
        .push("e", counting(second.clone(), Value::Null))
        .unwrap();

    assert_eq!(mediator.notify("e", &[json!(1), json!(2)]).unwrap(), 1);
    assert_eq!(first.load(Ordering::SeqCst), 1);
    assert_eq!(second.load(Ordering::SeqCst), 0);
    assert_eq!(mediator.count_invocations("e"), 1);
    assert_eq!(mediator.count_notifications("e"), 1);
}

#[test]
fn falsy_but_not_false_does_not_stop_the_chain() {
    let mediator = Mediator::new();
    let invoked = Arc::new(AtomicUsize::new(0));

    mediator
        .push("e", counting(invoked.clone(), json!(0)))
        .unwrap();
    mediator
        .push("e", counting(invoked.clone(), Value::Null))
        .unwrap();
    mediator
        .push("e", counting(invoked.clone(), json!("")))
        .unwrap();
    mediator
        .push("e", counting(invoked.clone(), Value::Bool(true)))
        .unwrap();

    assert_eq!(mediator.notify("e", &[]).unwrap(), 4);
    assert_eq!(invoked.load(Ordering::SeqCst), 4);
}

#[test]
fn notify_on_absent_queue_still_counts_the_broadcast() {
    let mediator = Mediator::new();
    assert_eq!(mediator.notify("ghost", &[]).unwrap(), 0);
    assert_eq!(mediator.count_notifications("ghost"), 1);
    assert_eq!(mediator.count_invocations("ghost"), 0);
    // the broadcast must not have created a queue
    assert!(mediator.keys().is_empty());
}

#[test]
fn deferred_listeners_resolve_once_per_position_per_broadcast() {
    let resolutions = Arc::new(AtomicUsize::new(0));
    let resolutions_inner = resolutions.clone();
    let hits = Arc::new(AtomicUsize::new(0));
    let hits_inner = hits.clone();

    let catalog = Catalog::new().with("echo", move || {
        resolutions_inner.fetch_add(1, Ordering::SeqCst);
        let hits = hits_inner.clone();
        Ok(InvokeFn::arc(move |_args| {
            hits.fetch_add(1, Ordering::SeqCst);
            Ok(Value::Null)
        }))
    });

    let mediator = Mediator::builder(Config::default())
        .with_instantiator(Arc::new(catalog))
        .build();

    mediator.push("e", "echo").unwrap();
    mediator.push("e", "echo").unwrap();

    assert_eq!(mediator.notify("e", &[]).unwrap(), 2);
    assert_eq!(resolutions.load(Ordering::SeqCst), 2); // one per position

    assert_eq!(mediator.notify("e", &[]).unwrap(), 2);
    assert_eq!(resolutions.load(Ordering::SeqCst), 4); // resolved again, never cached
    assert_eq!(hits.load(Ordering::SeqCst), 4);
}

#[test]
fn failed_materialization_names_event_and_position() {
    let invoked = Arc::new(AtomicUsize::new(0));
    let mediator = Mediator::new(); // NullInstantiator: every identifier is unknown

    mediator
        .push("e", counting(invoked.clone(), Value::Null))
        .unwrap();
    mediator.push("e", "missing.listener").unwrap();
    mediator
        .push("e", counting(Arc::new(AtomicUsize::new(0)), Value::Null))
        .unwrap();

    let err = mediator.notify("e", &[]).unwrap_err();
    match err {
        MediatorError::BadListener {
            event,
            position,
            source,
        } => {
            assert_eq!(event, "e");
            assert_eq!(position, 1);
            assert!(matches!(source, InstantiateError::Unknown { .. }));
        }
        other => panic!("expected BadListener, got {other:?}"),
    }

    // listener before the failure ran; the failed position was not counted
    assert_eq!(invoked.load(Ordering::SeqCst), 1);
    assert_eq!(mediator.count_invocations("e"), 1);
    assert_eq!(mediator.count_notifications("e"), 1);
}

#[test]
fn handler_error_aborts_broadcast_and_keeps_counters() {
    let mediator = Mediator::new();
    let tail = Arc::new(AtomicUsize::new(0));

    mediator
        .push("e", Listener::handler(|_| Err(HandlerError::failure("boom"))))
        .unwrap();
    mediator
        .push("e", counting(tail.clone(), Value::Null))
        .unwrap();

    let err = mediator.notify("e", &[]).unwrap_err();
    match err {
        MediatorError::Handler {
            event, position, ..
        } => {
            assert_eq!(event, "e");
            assert_eq!(position, 0);
        }
        other => panic!("expected Handler, got {other:?}"),
    }

    assert_eq!(tail.load(Ordering::SeqCst), 0);
    // the failing listener's invocation was already counted; no rollback
    assert_eq!(mediator.count_invocations("e"), 1);
}

#[test]
fn listeners_pushed_during_broadcast_wait_for_the_next_round() {
    let mediator = Arc::new(Mediator::new());
    let late = Arc::new(AtomicUsize::new(0));

    let mediator_inner = mediator.clone();
    let late_inner = late.clone();
    mediator
        .push(
            "e",
            Listener::handler(move |_args| {
                mediator_inner
                    .push("e", counting(late_inner.clone(), Value::Null))
                    .unwrap();
                Ok(Value::Null)
            }),
        )
        .unwrap();

    // first round: only the registering listener runs
    assert_eq!(mediator.notify("e", &[]).unwrap(), 1);
    assert_eq!(late.load(Ordering::SeqCst), 0);
    assert_eq!(mediator.count("e"), 2);

    // second round: the listener registered mid-broadcast now runs too
    assert_eq!(mediator.notify("e", &[]).unwrap(), 2);
    assert_eq!(late.load(Ordering::SeqCst), 1);
}

#[test]
fn last_queue_delta_tracks_the_most_recent_mutation() {
    let mediator = Mediator::new();
    assert!(mediator.last_queue_delta().is_none());

    mediator.push("e", "l").unwrap();
    let delta = mediator.last_queue_delta().unwrap();
    assert_eq!(delta.event(), "e");
    assert_eq!(delta.op, QueueOp::Push);

    // pop on an absent name still records its delta
    mediator.pop("f");
    let delta = mediator.last_queue_delta().unwrap();
    assert_eq!(delta.event(), "f");
    assert_eq!(delta.op, QueueOp::Pop);

    mediator.clear("e");
    assert_eq!(mediator.last_queue_delta().unwrap().op, QueueOp::Clear);
}

#[test]
fn delta_listeners_observe_every_mutation() {
    let mediator = Arc::new(Mediator::new());
    let observed = Arc::new(std::sync::Mutex::new(Vec::new()));

    let observed_inner = observed.clone();
    mediator
        .push(
            DELTA_EVENT,
            Listener::handler(move |args| {
                let event = args[0].as_str().unwrap_or_default().to_string();
                let op = args[1].as_str().unwrap_or_default().to_string();
                observed_inner.lock().unwrap().push((event, op));
                Ok(Value::Null)
            }),
        )
        .unwrap();

    mediator.push("e", "l").unwrap();
    mediator.shift("e");

    let observed = observed.lock().unwrap();
    // attaching the delta listener is itself a mutation it observes
    assert_eq!(
        *observed,
        vec![
            (DELTA_EVENT.to_string(), "push".to_string()),
            ("e".to_string(), "push".to_string()),
            ("e".to_string(), "shift".to_string()),
        ]
    );
}

#[test]
fn delta_depth_limit_cuts_off_mutation_cascades() {
    let mediator = Arc::new(
        Mediator::builder(Config {
            delta_depth_limit: 3,
        })
        .build(),
    );

    let mediator_inner = mediator.clone();
    mediator
        .push(
            DELTA_EVENT,
            Listener::handler(move |args| {
                // every observed mutation outside the delta queue pushes again,
                // which would recurse forever without the depth cap
                if args[0].as_str() != Some(DELTA_EVENT) {
                    mediator_inner.push("spill", "l").unwrap();
                }
                Ok(Value::Null)
            }),
        )
        .unwrap();

    mediator.push("seed", "l").unwrap();

    assert_eq!(mediator.count("spill"), 3);
    // four delta broadcasts total: the listener's own attach, the seed push,
    // and the first two spill pushes (the third is cut off by the cap)
    assert_eq!(mediator.count_notifications(DELTA_EVENT), 4);
    assert_eq!(mediator.count_invocations(DELTA_EVENT), 4);
}

#[test]
fn push_all_registers_pairs_in_order() {
    let mediator = Mediator::new();
    mediator
        .push_all(vec![("e", "a"), ("e", "b"), ("f", "c")])
        .unwrap();

    assert_eq!(mediator.count("e"), 2);
    assert_eq!(mediator.count("f"), 1);
    assert_eq!(mediator.first("e").unwrap().identifier(), Some("a"));
}

#[test]
fn push_all_json_accepts_strings_and_arrays() {
    let mediator = Mediator::new();
    mediator
        .push_all_json(&json!({
            "e": "a",
            "f": ["b", ["c", "d"]],
        }))
        .unwrap();

    assert_eq!(mediator.count("e"), 1);
    assert_eq!(mediator.count("f"), 3);
}

#[test]
fn push_all_json_rejects_non_object_payload() {
    let mediator = Mediator::new();
    let err = mediator.push_all_json(&json!(["not", "a", "mapping"])).unwrap_err();
    match err {
        MediatorError::InvalidInput { found } => assert_eq!(found, "array"),
        other => panic!("expected InvalidInput, got {other:?}"),
    }
    assert!(mediator.keys().is_empty());
}

#[test]
fn push_all_json_rejects_non_listener_member() {
    let mediator = Mediator::new();
    let err = mediator.push_all_json(&json!({ "e": 42 })).unwrap_err();
    assert!(matches!(err, MediatorError::InvalidListener { .. }));
    assert_eq!(mediator.count("e"), 0);
}
