// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions)]
//! The base consumer adapter.
//!
//! [`ConsumerHooks`] is the template user consumers implement: `on_subscribe`
//! and `on_next` are required — the trait has no default body for either,
//! so the compiler rejects an impl that omits them. The other hooks
//! (`on_complete`, `on_error`, `on_cancel`, `finally`) default to doing
//! nothing. [`BaseSubscriber`] wraps a `ConsumerHooks` implementation,
//! stores the incoming [`SubscriptionRef`], exposes `request`/`cancel` that
//! delegate to it, and guarantees `finally` runs exactly once regardless of
//! which terminal pathway wins the race against a consumer-initiated cancel.

use pulse_core::{PulseError, SignalType, Subscriber, SubscriptionRef};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// The hook template a user consumer implements.
///
/// `on_subscribe` and `on_next` are required; the rest default to no-ops.
pub trait ConsumerHooks<T>: Send {
    /// Called exactly once, before any other hook.
    fn on_subscribe(&mut self, subscription: SubscriptionRef);

    /// Called for each authorized value.
    fn on_next(&mut self, value: T);

    /// Called at most once, on successful termination.
    fn on_complete(&mut self) {}

    /// Called at most once, on failed termination.
    fn on_error(&mut self, _error: PulseError) {}

    /// Called at most once, when this consumer cancels its subscription.
    fn on_cancel(&mut self) {}

    /// Guaranteed to run exactly once on any terminal pathway (complete,
    /// error, or cancel), receiving the pathway tag. The default does
    /// nothing; override for cleanup that must run regardless of how the
    /// stream ended.
    fn finally(&mut self, _signal_type: SignalType) {}
}

/// Wraps a [`ConsumerHooks`] implementation, storing its subscription and
/// enforcing the single-`finally` guarantee.
pub struct BaseSubscriber<T, H: ConsumerHooks<T>> {
    hooks: H,
    subscription: Option<SubscriptionRef>,
    finally_ran: Arc<AtomicBool>,
    _marker: std::marker::PhantomData<fn(T)>,
}

impl<T, H: ConsumerHooks<T>> BaseSubscriber<T, H> {
    pub fn new(hooks: H) -> Self {
        Self {
            hooks,
            subscription: None,
            finally_ran: Arc::new(AtomicBool::new(false)),
            _marker: std::marker::PhantomData,
        }
    }

    /// Forwards to the stored subscription, if any. Safe to call from any
    /// thread, including re-entrantly from within a hook.
    pub fn request(&self, n: u64) {
        if let Some(subscription) = &self.subscription {
            subscription.request(n);
        }
    }

    /// Cancels the stored subscription and runs `finally(CANCEL)` — unless
    /// a terminal signal already won the race and ran `finally` first.
    pub fn cancel(&mut self) {
        if let Some(subscription) = &self.subscription {
            subscription.cancel();
        }
        self.run_finally_once(SignalType::Cancel);
    }

    fn run_finally_once(&mut self, signal_type: SignalType) {
        if !self.finally_ran.swap(true, Ordering::AcqRel) {
            self.hooks.finally(signal_type);
        }
    }

    /// Gives back the wrapped hooks, e.g. to inspect recorded state after
    /// the stream under test has finished.
    pub fn into_hooks(self) -> H {
        self.hooks
    }

    pub fn hooks(&self) -> &H {
        &self.hooks
    }
}

impl<T: Send, H: ConsumerHooks<T>> Subscriber<T> for BaseSubscriber<T, H> {
    fn on_subscribe(&mut self, subscription: SubscriptionRef) {
        self.subscription = Some(Arc::clone(&subscription));
        self.hooks.on_subscribe(subscription);
    }

    fn on_next(&mut self, value: T) {
        self.hooks.on_next(value);
    }

    fn on_complete(&mut self) {
        self.hooks.on_complete();
        self.run_finally_once(SignalType::OnComplete);
    }

    fn on_error(&mut self, error: PulseError) {
        self.hooks.on_error(error);
        self.run_finally_once(SignalType::OnError);
    }
}
