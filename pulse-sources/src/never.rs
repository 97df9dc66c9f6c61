// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use parking_lot::Mutex;
use pulse_core::{BoxSubscriber, Publisher, PulseError, Subscription, SubscriptionRef};
use std::marker::PhantomData;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

struct NeverSubscription<T> {
    subscriber: Mutex<BoxSubscriber<T>>,
    terminated: AtomicBool,
}

impl<T: Send> Subscription for NeverSubscription<T> {
    fn request(&self, n: u64) {
        if n == 0 && !self.terminated.swap(true, Ordering::AcqRel) {
            self.subscriber.lock().on_error(PulseError::illegal_demand(n));
        }
    }

    fn cancel(&self) {
        self.terminated.store(true, Ordering::Release);
    }
}

struct NeverPublisher<T>(PhantomData<fn() -> T>);

impl<T: Send + 'static> Publisher<T> for NeverPublisher<T> {
    fn subscribe(&self, subscriber: BoxSubscriber<T>) {
        let state = Arc::new(NeverSubscription {
            subscriber: Mutex::new(subscriber),
            terminated: AtomicBool::new(false),
        });
        let subscription: SubscriptionRef = Arc::clone(&state) as SubscriptionRef;
        state.subscriber.lock().on_subscribe(subscription);
    }
}

/// A publisher that delivers `on_subscribe` and nothing else, ever. Useful
/// as a neutral "never resolves" upstream in tests and in operators that
/// need an always-pending inner publisher.
pub fn never<T: Send + 'static>() -> impl Publisher<T> {
    NeverPublisher(PhantomData)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulse_test_utils::RecordingSubscriber;

    #[test]
    fn emits_on_subscribe_and_nothing_else() {
        let (handle, subscriber) = RecordingSubscriber::<i32>::unbounded();
        never::<i32>().subscribe(Box::new(subscriber));
        assert!(handle.recorded().is_empty());
        assert!(!handle.is_terminated());
    }

    #[test]
    fn request_zero_terminates_with_illegal_demand() {
        let (handle, subscriber) = RecordingSubscriber::<i32>::manual();
        never::<i32>().subscribe(Box::new(subscriber));
        handle.request(0);
        assert!(handle.is_terminated());
    }
}
