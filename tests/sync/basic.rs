//! End-to-end dispatch through a built `Dispatcher`.

use std::sync::{Arc, Mutex};

use crud_sync::{
    Completion, Dispatch, Dispatcher, HandlerOptions, HandlerSpec, Operation, Payload,
    RequestOptions, SyncConfig, SyncError,
};
use rstest::rstest;
use serde_json::{json, Value};

use crate::support::{CallbackLog, PassedThrough, Recorder, Todo};

/// An action that records its payload and returns it.
fn capture() -> (Arc<Mutex<Vec<Payload>>>, HandlerOptions) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let options = HandlerOptions::new().action(move |inv| {
        sink.lock().unwrap().push(inv.payload().clone());
        Ok(Completion::Value(Value::Null))
    });
    (seen, options)
}

#[rstest]
#[case(Operation::Create)]
#[case(Operation::Read)]
#[case(Operation::Update)]
#[case(Operation::Delete)]
fn bare_action_serves_every_operation(#[case] operation: Operation) {
    let recorder = Recorder::new();
    let dispatcher = Dispatcher::build(
        SyncConfig::new().action(operation, |inv| {
            Ok(Completion::Value(json!({ "served": inv.operation() })))
        }),
        recorder.dispatcher("framework"),
    )
    .unwrap();

    let result = dispatcher
        .dispatch(operation, &Todo::new("t1", "milk"), RequestOptions::new())
        .unwrap();
    assert_eq!(result.into_value(), Some(json!({ "served": operation.as_str() })));
    assert!(recorder.calls().is_empty());
}

#[rstest]
#[case::marker(SyncConfig::new().delete(HandlerSpec::UseDefault))]
#[case::parsed(SyncConfig::new().parse(Operation::Delete, "default").unwrap())]
#[case::omitted(SyncConfig::new())]
fn default_and_omission_pass_through(#[case] config: SyncConfig) {
    let recorder = Recorder::new();
    let dispatcher = Dispatcher::build(config, recorder.dispatcher("framework")).unwrap();
    let log = CallbackLog::new();

    let result = dispatcher
        .dispatch(
            Operation::Delete,
            &Todo::new("t9", "old"),
            log.options().with("wait", true),
        )
        .unwrap();

    assert_eq!(result.into_value(), Some(json!({ "served_by": "framework" })));
    assert_eq!(
        recorder.calls(),
        vec![PassedThrough {
            operation: Operation::Delete,
            model: json!({ "id": "t9", "title": "old", "done": false }),
            extra: json!({ "wait": true }),
            has_success: true,
        }]
    );
}

#[test]
fn create_without_build_sends_model_json_and_options() {
    let (seen, handler) = capture();
    let dispatcher =
        Dispatcher::build(SyncConfig::new().create(handler), Recorder::new().dispatcher("x"))
            .unwrap();

    dispatcher
        .dispatch(
            Operation::Create,
            &Todo::new("t1", "milk"),
            CallbackLog::new().options().with("validate", true),
        )
        .unwrap();

    assert_eq!(
        *seen.lock().unwrap(),
        vec![Payload::Single(json!({
            "id": "t1",
            "title": "milk",
            "done": false,
            "validate": true,
        }))]
    );
}

#[test]
fn built_payload_wins_over_options() {
    let (seen, handler) = capture();
    let config = SyncConfig::new().update(handler.build(|_, _, _| Ok(json!({ "a": 1 }))));
    let dispatcher = Dispatcher::build(config, Recorder::new().dispatcher("x")).unwrap();

    let log = CallbackLog::new();
    dispatcher
        .dispatch(
            Operation::Update,
            &Todo::new("t1", "milk"),
            log.options().with("foo", 2).with("a", 0),
        )
        .unwrap();

    assert_eq!(
        *seen.lock().unwrap(),
        vec![Payload::Single(json!({ "foo": 2, "a": 1 }))]
    );
}

#[test]
fn build_receives_operation_model_and_options() {
    let (seen, handler) = capture();
    let config = SyncConfig::new().read(handler.build(|operation, model, options| {
        let todo = model.to_json()?;
        Ok(json!({
            "op": operation,
            "id": todo["id"],
            "page": options.get("page").cloned().unwrap_or(Value::Null),
        }))
    }));
    let dispatcher = Dispatcher::build(config, Recorder::new().dispatcher("x")).unwrap();

    dispatcher
        .dispatch(
            Operation::Read,
            &Todo::new("t4", "bread"),
            RequestOptions::new().with("page", 2),
        )
        .unwrap();

    assert_eq!(
        *seen.lock().unwrap(),
        vec![Payload::Single(json!({ "op": "read", "id": "t4", "page": 2 }))]
    );
}

#[test]
fn expand_arguments_spreads_the_list() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    let config = SyncConfig::new().read(
        HandlerOptions::new()
            .build(|_, _, _| Ok(json!([1, 2, 3])))
            .expand_arguments(true)
            .action(move |inv| {
                sink.lock().unwrap().extend(inv.args().to_vec());
                Ok(Completion::Value(Value::Null))
            }),
    );
    let dispatcher = Dispatcher::build(config, Recorder::new().dispatcher("x")).unwrap();

    dispatcher
        .dispatch(
            Operation::Read,
            &Todo::new("t1", "milk"),
            RequestOptions::new().with("foo", 2),
        )
        .unwrap();

    assert_eq!(*seen.lock().unwrap(), vec![json!(1), json!(2), json!(3)]);
}

#[test]
fn alias_dispatches_to_the_same_action() {
    let (seen, handler) = capture();
    let config = SyncConfig::new().create(handler).update(Operation::Create);
    let dispatcher = Dispatcher::build(config, Recorder::new().dispatcher("x")).unwrap();

    let create = dispatcher.table().get(Operation::Create).unwrap();
    let update = dispatcher.table().get(Operation::Update).unwrap();
    assert!(Arc::ptr_eq(create, update));

    dispatcher
        .dispatch(Operation::Update, &Todo::new("t2", "eggs"), RequestOptions::new())
        .unwrap();
    assert_eq!(seen.lock().unwrap().len(), 1);
}

#[test]
fn defaults_layer_and_explicit_override() {
    let (read_seen, read) = capture();
    let (update_seen, update) = capture();
    let config = SyncConfig::new()
        .defaults(HandlerOptions::new().add_options(false))
        .read(read)
        .update(update.add_options(true));
    let dispatcher = Dispatcher::build(config, Recorder::new().dispatcher("x")).unwrap();

    assert!(!dispatcher.table().get(Operation::Read).unwrap().add_options);
    assert!(dispatcher.table().get(Operation::Update).unwrap().add_options);

    let todo = Todo::new("t3", "jam");
    let options = || RequestOptions::new().with("foo", 2);
    dispatcher.dispatch(Operation::Read, &todo, options()).unwrap();
    dispatcher.dispatch(Operation::Update, &todo, options()).unwrap();

    assert_eq!(
        *read_seen.lock().unwrap(),
        vec![Payload::Single(json!({ "id": "t3", "title": "jam", "done": false }))]
    );
    assert_eq!(
        *update_seen.lock().unwrap(),
        vec![Payload::Single(json!({ "id": "t3", "title": "jam", "done": false, "foo": 2 }))]
    );
}

#[test]
fn errors_propagate_out_of_dispatch() {
    let config = SyncConfig::new()
        .create(
            HandlerOptions::new()
                .build(|_, _, _| Err("missing title".into()))
                .action(|_| Ok(Completion::Value(Value::Null))),
        )
        .action(Operation::Delete, |_| Err("server unreachable".into()));
    let dispatcher = Dispatcher::build(config, Recorder::new().dispatcher("x")).unwrap();
    let todo = Todo::new("t5", "");

    let err = dispatcher
        .dispatch(Operation::Create, &todo, RequestOptions::new())
        .unwrap_err();
    assert!(matches!(err, SyncError::Build { operation: Operation::Create, .. }));

    let err = dispatcher
        .dispatch(Operation::Delete, &todo, RequestOptions::new())
        .unwrap_err();
    assert_eq!(err.to_string(), "delete action failed: server unreachable");
}
