// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use pulse_core::{BoxSubscriber, NoopSubscription, Publisher, PulseError};
use std::marker::PhantomData;
use std::sync::Arc;

struct ErrorPublisher<T, F> {
    build_error: F,
    _marker: PhantomData<fn() -> T>,
}

impl<T, F> Publisher<T> for ErrorPublisher<T, F>
where
    T: Send + 'static,
    F: Fn() -> PulseError + Send + Sync,
{
    fn subscribe(&self, mut subscriber: BoxSubscriber<T>) {
        subscriber.on_subscribe(Arc::new(NoopSubscription));
        subscriber.on_error((self.build_error)());
    }
}

/// A publisher that, on subscribe, immediately delivers `on_error(e)` and
/// nothing else. `request`/`cancel` called afterward are no-ops, since the
/// subscription is already terminated by the time the caller gets it back.
///
/// Because each subscription gets its own error instance, `build_error` is
/// called once per `subscribe`, not once at construction — this lets the
/// same publisher be subscribed to more than once.
pub fn error<T: Send + 'static>(
    build_error: impl Fn() -> PulseError + Send + Sync + 'static,
) -> impl Publisher<T> {
    ErrorPublisher {
        build_error,
        _marker: PhantomData,
    }
}
