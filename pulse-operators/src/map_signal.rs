// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Replaces the upstream's `next`, `error`, and `complete` each with an
//! optional emitted value.
//!
//! The interesting corner is what happens when `fE`/`fC` synthesize a
//! downstream value out of a signal that carried none: that value is
//! still subject to downstream demand. If none is outstanding when the
//! upstream terminates, the synthetic value is held until the next
//! `request(n >= 1)`, and only then is `on_complete` delivered —
//! downstream sees neither before that.

use parking_lot::Mutex;
use pulse_core::{
    panic_guard, BoxSubscriber, Demand, Publisher, PulseError, Subscriber, Subscription,
    SubscriptionRef,
};
use std::sync::Arc;

enum MapState<U> {
    Running,
    PendingTerminalValue(U),
    Done,
}

type NextFn<T, U> = Arc<dyn Fn(T) -> U + Send + Sync>;
type ErrorFn<U> = Arc<dyn Fn(PulseError) -> U + Send + Sync>;
type CompleteFn<U> = Arc<dyn Fn() -> U + Send + Sync>;

struct Shared<T, U> {
    downstream: Mutex<BoxSubscriber<U>>,
    upstream: Mutex<Option<SubscriptionRef>>,
    state: Mutex<MapState<U>>,
    /// Tracks outstanding downstream demand independently of the
    /// pass-through forwarding to upstream, purely to decide whether a
    /// terminal hook's synthetic value can be delivered immediately.
    own_demand: Demand,
    f_next: Option<NextFn<T, U>>,
    f_error: Option<ErrorFn<U>>,
    f_complete: Option<CompleteFn<U>>,
}

impl<T: Send + 'static, U: Send + 'static> Shared<T, U> {
    fn deliver_complete(&self) {
        *self.state.lock() = MapState::Done;
        self.upstream.lock().take();
        self.downstream.lock().on_complete();
    }

    fn deliver_error(&self, error: PulseError) {
        *self.state.lock() = MapState::Done;
        self.upstream.lock().take();
        self.downstream.lock().on_error(error);
    }

    /// Delivers a terminal hook's synthetic value, subject to downstream
    /// demand: immediately if available, or held for the next `request`.
    fn deliver_terminal_value(&self, value: U) {
        if self.own_demand.try_consume_one() {
            *self.state.lock() = MapState::Done;
            self.upstream.lock().take();
            self.downstream.lock().on_next(value);
            self.downstream.lock().on_complete();
        } else {
            *self.state.lock() = MapState::PendingTerminalValue(value);
        }
    }

    fn fail_from_callback(&self, error: PulseError) {
        if let Some(upstream) = self.upstream.lock().take() {
            upstream.cancel();
        }
        self.deliver_error(error);
    }
}

impl<T: Send + 'static, U: Send + 'static> Subscription for Shared<T, U> {
    fn request(&self, n: u64) {
        if n == 0 {
            if !matches!(&*self.state.lock(), MapState::Done) {
                self.fail_from_callback(PulseError::illegal_demand(n));
            }
            return;
        }

        let pending = {
            let mut state = self.state.lock();
            if matches!(&*state, MapState::PendingTerminalValue(_)) {
                match std::mem::replace(&mut *state, MapState::Done) {
                    MapState::PendingTerminalValue(value) => Some(value),
                    _ => unreachable!(),
                }
            } else {
                None
            }
        };

        if let Some(value) = pending {
            self.upstream.lock().take();
            self.downstream.lock().on_next(value);
            self.downstream.lock().on_complete();
            return;
        }

        if matches!(&*self.state.lock(), MapState::Done) {
            return;
        }

        self.own_demand.add(n);
        let upstream = self.upstream.lock().clone();
        if let Some(upstream) = upstream {
            upstream.request(n);
        }
    }

    fn cancel(&self) {
        let mut state = self.state.lock();
        if !matches!(&*state, MapState::Done) {
            *state = MapState::Done;
            drop(state);
            if let Some(upstream) = self.upstream.lock().take() {
                upstream.cancel();
            }
        }
    }
}

struct UpstreamAdapter<T, U> {
    shared: Arc<Shared<T, U>>,
}

impl<T: Send + 'static, U: Send + 'static> Subscriber<T> for UpstreamAdapter<T, U> {
    fn on_subscribe(&mut self, subscription: SubscriptionRef) {
        *self.shared.upstream.lock() = Some(subscription);
        let downstream_subscription: SubscriptionRef = Arc::clone(&self.shared) as SubscriptionRef;
        self.shared.downstream.lock().on_subscribe(downstream_subscription);
    }

    fn on_next(&mut self, value: T) {
        match &self.shared.f_next {
            Some(f) => match panic_guard::guard(|| f(value)) {
                Ok(mapped) => {
                    self.shared.own_demand.try_consume_one();
                    self.shared.downstream.lock().on_next(mapped);
                }
                Err(e) => self.shared.fail_from_callback(e),
            },
            None => {
                // Dropped silently, but the upstream item it consumed must
                // be replaced so downstream's outstanding demand isn't
                // quietly stalled.
                let upstream = self.shared.upstream.lock().clone();
                if let Some(upstream) = upstream {
                    upstream.request(1);
                }
            }
        }
    }

    fn on_error(&mut self, error: PulseError) {
        match &self.shared.f_error {
            Some(f) => match panic_guard::guard(|| f(error)) {
                Ok(mapped) => self.shared.deliver_terminal_value(mapped),
                Err(e) => self.shared.deliver_error(e),
            },
            None => self.shared.deliver_error(error),
        }
    }

    fn on_complete(&mut self) {
        match &self.shared.f_complete {
            Some(f) => match panic_guard::guard(|| f()) {
                Ok(mapped) => self.shared.deliver_terminal_value(mapped),
                Err(e) => self.shared.deliver_error(e),
            },
            None => self.shared.deliver_complete(),
        }
    }
}

struct MapSignalPublisher<T, U> {
    upstream: Arc<dyn Publisher<T>>,
    f_next: Option<NextFn<T, U>>,
    f_error: Option<ErrorFn<U>>,
    f_complete: Option<CompleteFn<U>>,
}

impl<T: Send + 'static, U: Send + 'static> Publisher<U> for MapSignalPublisher<T, U> {
    fn subscribe(&self, subscriber: BoxSubscriber<U>) {
        let shared = Arc::new(Shared {
            downstream: Mutex::new(subscriber),
            upstream: Mutex::new(None),
            state: Mutex::new(MapState::Running),
            own_demand: Demand::new(),
            f_next: self.f_next.clone(),
            f_error: self.f_error.clone(),
            f_complete: self.f_complete.clone(),
        });
        self.upstream
            .subscribe(Box::new(UpstreamAdapter { shared }));
    }
}

/// Applies `f_next`/`f_error`/`f_complete` to the upstream's `next`/`error`/
/// `complete` signals respectively. Any of the three may be omitted
/// (`None`): a missing `f_next` drops values (while still replacing the
/// upstream item so demand isn't stalled); a missing `f_error`/`f_complete`
/// passes the corresponding terminal signal through unchanged.
///
/// At least one of the three should be set for this to do anything useful,
/// though the operator itself does not enforce that.
pub fn map_signal<T, U>(
    upstream: Arc<dyn Publisher<T>>,
    f_next: Option<Arc<dyn Fn(T) -> U + Send + Sync>>,
    f_error: Option<Arc<dyn Fn(PulseError) -> U + Send + Sync>>,
    f_complete: Option<Arc<dyn Fn() -> U + Send + Sync>>,
) -> impl Publisher<U>
where
    T: Send + 'static,
    U: Send + 'static,
{
    MapSignalPublisher {
        upstream,
        f_next,
        f_error,
        f_complete,
    }
}
