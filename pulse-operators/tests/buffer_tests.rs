use pulse_core::{Publisher, PulseError};
use pulse_operators::buffer;
use pulse_sources::range;
use pulse_test_utils::RecordingSubscriber;
use std::sync::Arc;

#[test]
fn rejects_zero_size_synchronously() {
    let upstream: Arc<dyn Publisher<i64>> = Arc::new(range(1, 5));
    let err = buffer(upstream, 0, 1, || Some(Vec::<i64>::new())).unwrap_err();
    assert!(matches!(err, PulseError::IllegalArgument { .. }));
}

#[test]
fn rejects_zero_skip_synchronously() {
    let upstream: Arc<dyn Publisher<i64>> = Arc::new(range(1, 5));
    let err = buffer(upstream, 1, 0, || Some(Vec::<i64>::new())).unwrap_err();
    assert!(matches!(err, PulseError::IllegalArgument { .. }));
}

#[test]
fn larger_skip_discards_the_gap_between_windows() {
    // range(1..=10).buffer(2, 3) -> [1,2],[4,5],[7,8],[10]
    let upstream: Arc<dyn Publisher<i64>> = Arc::new(range(1, 10));
    let windows = buffer(upstream, 2, 3, || Some(Vec::new())).unwrap();

    let (handle, subscriber) = RecordingSubscriber::<Vec<i64>>::unbounded();
    windows.subscribe(Box::new(subscriber));
    assert_eq!(
        handle.values(),
        vec![vec![1, 2], vec![4, 5], vec![7, 8], vec![10]]
    );
    assert!(handle.is_terminated());
}

#[test]
fn exact_skip_gives_contiguous_non_overlapping_windows() {
    let upstream: Arc<dyn Publisher<i64>> = Arc::new(range(1, 5));
    let windows = buffer(upstream, 2, 2, || Some(Vec::new())).unwrap();

    let (handle, subscriber) = RecordingSubscriber::<Vec<i64>>::unbounded();
    windows.subscribe(Box::new(subscriber));
    assert_eq!(handle.values(), vec![vec![1, 2], vec![3, 4], vec![5]]);
    assert!(handle.is_terminated());
}

#[test]
fn smaller_skip_overlaps_windows() {
    // range(1..=5).buffer(3, 1) -> [1,2,3],[2,3,4],[3,4,5],[4,5],[5]
    let upstream: Arc<dyn Publisher<i64>> = Arc::new(range(1, 5));
    let windows = buffer(upstream, 3, 1, || Some(Vec::new())).unwrap();

    let (handle, subscriber) = RecordingSubscriber::<Vec<i64>>::unbounded();
    windows.subscribe(Box::new(subscriber));
    assert_eq!(
        handle.values(),
        vec![
            vec![1, 2, 3],
            vec![2, 3, 4],
            vec![3, 4, 5],
            vec![4, 5],
            vec![5],
        ]
    );
    assert!(handle.is_terminated());
}

#[test]
fn a_factory_returning_none_terminates_with_null_argument() {
    let upstream: Arc<dyn Publisher<i64>> = Arc::new(range(1, 5));
    let windows = buffer(upstream, 2, 2, || None::<Vec<i64>>).unwrap();

    let (handle, subscriber) = RecordingSubscriber::<Vec<i64>>::unbounded();
    windows.subscribe(Box::new(subscriber));
    assert!(handle.values().is_empty());
    assert!(handle.is_terminated());
}

#[test]
fn a_panicking_factory_terminates_with_operator_error() {
    let upstream: Arc<dyn Publisher<i64>> = Arc::new(range(1, 5));
    let windows = buffer(upstream, 2, 2, || -> Option<Vec<i64>> {
        panic!("factory exploded")
    })
    .unwrap();

    let (handle, subscriber) = RecordingSubscriber::<Vec<i64>>::unbounded();
    windows.subscribe(Box::new(subscriber));
    assert!(handle.values().is_empty());
    assert!(handle.is_terminated());
}

#[test]
fn backpressure_gates_window_delivery() {
    let upstream: Arc<dyn Publisher<i64>> = Arc::new(range(1, 5));
    let windows = buffer(upstream, 2, 2, || Some(Vec::new())).unwrap();

    let (handle, subscriber) = RecordingSubscriber::<Vec<i64>>::manual();
    windows.subscribe(Box::new(subscriber));
    assert!(handle.values().is_empty());

    handle.request(1);
    assert_eq!(handle.values(), vec![vec![1, 2]]);
    assert!(!handle.is_terminated());

    handle.request(2);
    assert_eq!(handle.values(), vec![vec![1, 2], vec![3, 4], vec![5]]);
    assert!(handle.is_terminated());
}

/// Overlapping-regime backpressure: a priming `request(2)` must pull enough
/// upstream items to fill two windows even though the first window alone
/// needs more than two items, and every later request must account for
/// partial progress already made on windows still open rather than just
/// scaling the requested count by `skip`.
#[test]
fn backpressure_in_the_overlapping_regime_accounts_for_partial_progress() {
    let upstream: Arc<dyn Publisher<i64>> = Arc::new(range(1, 10));
    let windows = buffer(upstream, 3, 1, || Some(Vec::new())).unwrap();

    let (handle, subscriber) = RecordingSubscriber::<Vec<i64>>::manual();
    windows.subscribe(Box::new(subscriber));
    assert!(handle.values().is_empty());

    handle.request(2);
    assert_eq!(handle.values(), vec![vec![1, 2, 3], vec![2, 3, 4]]);
    assert!(!handle.is_terminated());

    handle.request(2);
    assert_eq!(
        handle.values(),
        vec![
            vec![1, 2, 3],
            vec![2, 3, 4],
            vec![3, 4, 5],
            vec![4, 5, 6],
        ]
    );
    assert!(!handle.is_terminated());

    handle.request(4);
    assert_eq!(
        handle.values(),
        vec![
            vec![1, 2, 3],
            vec![2, 3, 4],
            vec![3, 4, 5],
            vec![4, 5, 6],
            vec![5, 6, 7],
            vec![6, 7, 8],
            vec![7, 8, 9],
            vec![8, 9, 10],
        ]
    );
    assert!(!handle.is_terminated());

    handle.request(1);
    assert_eq!(handle.values().len(), 9);
    assert_eq!(handle.values()[8], vec![9, 10]);
    assert!(!handle.is_terminated());

    handle.request(1);
    assert_eq!(handle.values().len(), 10);
    assert_eq!(handle.values()[9], vec![10]);
    assert!(handle.is_terminated());
}
