// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Shared subscription/publisher plumbing for every source built on a
//! [`StepSource`]: `empty`, `just`, `range`, `from_iterable` all differ
//! only in how they produce their next [`Step`]; everything about demand
//! bookkeeping, the drain loop, cancellation, and the single pending-item
//! buffer that lets completion/error bypass demand gating is identical.

use crate::step::{Step, StepSource};
use parking_lot::Mutex;
use pulse_core::{
    BoxSubscriber, Demand, DrainState, Publisher, PulseError, Subscriber, Subscription,
    SubscriptionRef,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

struct State<T> {
    self_weak: Weak<State<T>>,
    subscriber: Mutex<BoxSubscriber<T>>,
    sequence: Mutex<Box<dyn StepSource<T>>>,
    pending: Mutex<Option<Step<T>>>,
    demand: Demand,
    cancelled: AtomicBool,
    terminated: AtomicBool,
    subscribed_delivered: AtomicBool,
    drain: DrainState,
}

impl<T: Send + 'static> State<T> {
    fn subscription_ref(&self) -> SubscriptionRef {
        self.self_weak
            .upgrade()
            .expect("subscription state outlives any call running on it")
    }

    fn pump(&self) {
        self.drain.drain_with(|| self.emit());
    }

    fn emit(&self) {
        if self.terminated.load(Ordering::Acquire) {
            return;
        }
        if !self.subscribed_delivered.swap(true, Ordering::AcqRel) {
            let subscription = self.subscription_ref();
            self.subscriber.lock().on_subscribe(subscription);
        }
        loop {
            if self.cancelled.load(Ordering::Acquire) || self.terminated.load(Ordering::Acquire) {
                return;
            }
            let mut pending = self.pending.lock();
            if pending.is_none() {
                *pending = Some(self.sequence.lock().next_step());
            }
            match pending.take().expect("just populated") {
                Step::Complete => {
                    drop(pending);
                    self.terminated.store(true, Ordering::Release);
                    self.subscriber.lock().on_complete();
                    self.sequence.lock().release();
                    return;
                }
                Step::Error(e) => {
                    drop(pending);
                    self.terminated.store(true, Ordering::Release);
                    self.subscriber.lock().on_error(e);
                    self.sequence.lock().release();
                    return;
                }
                Step::Item(value) => {
                    if self.demand.try_consume_one() {
                        drop(pending);
                        self.subscriber.lock().on_next(value);
                        // loop back around and fetch the next step
                    } else {
                        *pending = Some(Step::Item(value));
                        return;
                    }
                }
            }
        }
    }
}

impl<T: Send + 'static> Subscription for State<T> {
    fn request(&self, n: u64) {
        if n == 0 {
            if !self.terminated.swap(true, Ordering::AcqRel) {
                self.subscriber.lock().on_error(PulseError::illegal_demand(n));
                self.sequence.lock().release();
            }
            return;
        }
        self.demand.add(n);
        self.pump();
    }

    fn cancel(&self) {
        if !self.cancelled.swap(true, Ordering::AcqRel) {
            self.sequence.lock().release();
        }
    }
}

/// A publisher built from a factory that produces a fresh [`StepSource`]
/// for each subscription, so the same publisher can be subscribed to more
/// than once.
pub(crate) struct SequencePublisher<T, F> {
    factory: F,
    _marker: std::marker::PhantomData<fn() -> T>,
}

impl<T, F> SequencePublisher<T, F>
where
    F: Fn() -> Box<dyn StepSource<T>> + Send + Sync,
{
    pub(crate) fn new(factory: F) -> Self {
        Self {
            factory,
            _marker: std::marker::PhantomData,
        }
    }
}

impl<T, F> Publisher<T> for SequencePublisher<T, F>
where
    T: Send + 'static,
    F: Fn() -> Box<dyn StepSource<T>> + Send + Sync,
{
    fn subscribe(&self, subscriber: BoxSubscriber<T>) {
        let state = Arc::new_cyclic(|weak| State {
            self_weak: weak.clone(),
            subscriber: Mutex::new(subscriber),
            sequence: Mutex::new((self.factory)()),
            pending: Mutex::new(None),
            demand: Demand::new(),
            cancelled: AtomicBool::new(false),
            terminated: AtomicBool::new(false),
            subscribed_delivered: AtomicBool::new(false),
            drain: DrainState::new(),
        });
        state.pump();
    }
}
