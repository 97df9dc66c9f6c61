use pulse_consumer::{BaseSubscriber, ConsumerHooks};
use pulse_core::{PulseError, SignalType, Subscriber, Subscription, SubscriptionRef};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

struct NoopSubscription;
impl Subscription for NoopSubscription {
    fn request(&self, _n: u64) {}
    fn cancel(&self) {}
}

struct RequestingSubscription {
    requested: AtomicU64,
}
impl Subscription for RequestingSubscription {
    fn request(&self, n: u64) {
        self.requested.fetch_add(n, Ordering::SeqCst);
    }
    fn cancel(&self) {}
}

#[derive(Default)]
struct Probe {
    values: Vec<i32>,
    finally_calls: Vec<SignalType>,
}

impl ConsumerHooks<i32> for Probe {
    fn on_subscribe(&mut self, subscription: SubscriptionRef) {
        subscription.request(1);
    }

    fn on_next(&mut self, value: i32) {
        self.values.push(value);
    }

    fn finally(&mut self, signal_type: SignalType) {
        self.finally_calls.push(signal_type);
    }
}

#[test]
fn on_subscribe_requests_then_on_next_records_values() {
    let sub = Arc::new(RequestingSubscription {
        requested: AtomicU64::new(0),
    });
    let mut base = BaseSubscriber::new(Probe::default());

    base.on_subscribe(sub.clone() as SubscriptionRef);
    base.on_next(7);
    base.on_complete();

    assert_eq!(sub.requested.load(Ordering::SeqCst), 1);
    let probe = base.into_hooks();
    assert_eq!(probe.values, vec![7]);
    assert_eq!(probe.finally_calls, vec![SignalType::OnComplete]);
}

#[test]
fn finally_runs_exactly_once_even_if_cancel_follows_complete() {
    let mut base = BaseSubscriber::new(Probe::default());
    base.on_subscribe(Arc::new(NoopSubscription));

    base.on_error(PulseError::illegal_argument("boom"));
    base.cancel();

    let probe = base.into_hooks();
    assert_eq!(probe.finally_calls, vec![SignalType::OnError]);
}

#[test]
fn cancel_without_prior_terminal_runs_finally_once() {
    let mut base = BaseSubscriber::new(Probe::default());
    base.on_subscribe(Arc::new(NoopSubscription));

    base.cancel();
    base.cancel();

    let probe = base.into_hooks();
    assert_eq!(probe.finally_calls, vec![SignalType::Cancel]);
}

// Demonstrates the required-hooks compile-time guarantee: a minimal
// consumer only needs on_subscribe/on_next, everything else defaults.
struct MinimalConsumer(Mutex<u32>);
impl ConsumerHooks<u32> for MinimalConsumer {
    fn on_subscribe(&mut self, _subscription: SubscriptionRef) {}
    fn on_next(&mut self, value: u32) {
        *self.0.lock().unwrap() += value;
    }
}

#[test]
fn minimal_consumer_compiles_with_only_required_hooks() {
    let mut base = BaseSubscriber::new(MinimalConsumer(Mutex::new(0)));
    base.on_subscribe(Arc::new(NoopSubscription));
    base.on_next(3);
    base.on_next(4);
    assert_eq!(*base.hooks().0.lock().unwrap(), 7);
}
