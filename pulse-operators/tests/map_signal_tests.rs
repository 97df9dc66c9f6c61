use pulse_core::{Publisher, PulseError};
use pulse_operators::map_signal;
use pulse_sources::{empty, error, just};
use pulse_test_utils::RecordingSubscriber;
use std::sync::Arc;

#[test]
fn scenario_complete_only_backpressured() {
    // empty().map_signal(null, null, () -> 1) with initial demand 0, then
    // request(1): emits [1] then on_complete.
    let upstream: Arc<dyn Publisher<i32>> = Arc::new(empty::<i32>());
    let mapped = map_signal::<i32, i32>(upstream, None, None, Some(Arc::new(|| 1)));

    let (handle, subscriber) = RecordingSubscriber::<i32>::manual();
    mapped.subscribe(Box::new(subscriber));
    assert!(handle.values().is_empty());
    assert!(!handle.is_terminated());

    handle.request(1);
    assert_eq!(handle.values(), vec![1]);
    assert!(handle.is_terminated());
}

#[test]
fn scenario_error_only_backpressured() {
    // error(RTE).map_signal(null, e -> 1, null) with initial demand 0, then
    // request(1): emits [1] then on_complete (error absorbed).
    let upstream: Arc<dyn Publisher<i32>> =
        Arc::new(error::<i32>(|| PulseError::upstream(pulse_core::Message::new("runtime error"))));
    let mapped = map_signal::<i32, i32>(upstream, None, Some(Arc::new(|_e: PulseError| 1)), None);

    let (handle, subscriber) = RecordingSubscriber::<i32>::manual();
    mapped.subscribe(Box::new(subscriber));
    assert!(handle.values().is_empty());
    assert!(!handle.is_terminated());

    handle.request(1);
    assert_eq!(handle.values(), vec![1]);
    assert!(handle.is_terminated());
}

#[test]
fn identity_next_mapping_is_observationally_transparent() {
    let upstream: Arc<dyn Publisher<i32>> = Arc::new(just([1, 2, 3]));
    let mapped = map_signal::<i32, i32>(upstream, Some(Arc::new(|v| v)), None, None);

    let (handle, subscriber) = RecordingSubscriber::<i32>::unbounded();
    mapped.subscribe(Box::new(subscriber));
    assert_eq!(handle.values(), vec![1, 2, 3]);
    assert!(handle.is_terminated());
}

#[test]
fn missing_next_hook_drops_values_but_still_completes() {
    let upstream: Arc<dyn Publisher<i32>> = Arc::new(just([1, 2, 3]));
    let mapped = map_signal::<i32, i32>(upstream, None, None, None);

    let (handle, subscriber) = RecordingSubscriber::<i32>::unbounded();
    mapped.subscribe(Box::new(subscriber));
    assert!(handle.values().is_empty());
    assert!(handle.is_terminated());
}
