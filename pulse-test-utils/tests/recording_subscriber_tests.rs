use pulse_core::{PulseError, Subscriber, Subscription, SubscriptionRef};
use pulse_test_utils::{RecordedSignal, RecordingSubscriber};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

struct CountingSubscription {
    requested: AtomicU64,
    cancelled: std::sync::atomic::AtomicBool,
}

impl Subscription for CountingSubscription {
    fn request(&self, n: u64) {
        self.requested.fetch_add(n, Ordering::SeqCst);
    }
    fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }
}

#[test]
fn manual_subscriber_requests_nothing_until_handle_asks() {
    let sub: SubscriptionRef = Arc::new(CountingSubscription {
        requested: AtomicU64::new(0),
        cancelled: std::sync::atomic::AtomicBool::new(false),
    });
    let (handle, mut subscriber) = RecordingSubscriber::<i32>::manual();

    subscriber.on_subscribe(Arc::clone(&sub));
    handle.request(2);
    subscriber.on_next(1);
    subscriber.on_next(2);
    subscriber.on_complete();

    assert_eq!(handle.values(), vec![1, 2]);
    assert_eq!(
        handle.recorded(),
        vec![
            RecordedSignal::Next(1),
            RecordedSignal::Next(2),
            RecordedSignal::Complete,
        ]
    );
    assert!(handle.is_terminated());
}

#[test]
fn unbounded_subscriber_requests_immediately_on_subscribe() {
    let sub = Arc::new(CountingSubscription {
        requested: AtomicU64::new(0),
        cancelled: std::sync::atomic::AtomicBool::new(false),
    });
    let (_handle, mut subscriber) = RecordingSubscriber::<i32>::unbounded();

    subscriber.on_subscribe(Arc::clone(&sub) as SubscriptionRef);

    assert_eq!(sub.requested.load(Ordering::SeqCst), u64::MAX);
}

#[test]
fn cancel_through_handle_reaches_subscription() {
    let sub = Arc::new(CountingSubscription {
        requested: AtomicU64::new(0),
        cancelled: std::sync::atomic::AtomicBool::new(false),
    });
    let (handle, mut subscriber) = RecordingSubscriber::<i32>::manual();
    subscriber.on_subscribe(Arc::clone(&sub) as SubscriptionRef);

    handle.cancel();

    assert!(sub.cancelled.load(Ordering::SeqCst));
}

#[test]
fn error_is_recorded_as_rendered_text() {
    let (handle, mut subscriber) = RecordingSubscriber::<i32>::manual();
    subscriber.on_subscribe(Arc::new(CountingSubscription {
        requested: AtomicU64::new(0),
        cancelled: std::sync::atomic::AtomicBool::new(false),
    }));

    subscriber.on_error(PulseError::illegal_argument("bad window size"));

    assert_eq!(
        handle.recorded(),
        vec![RecordedSignal::Error(
            "illegal argument: bad window size".to_string()
        )]
    );
}
