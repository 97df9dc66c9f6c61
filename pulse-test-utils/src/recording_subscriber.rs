// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! A recording [`Subscriber`] with a detachable control handle.
//!
//! A test needs to both drive the subscription (`request`, `cancel`) *and* inspect
//! what arrived, but the `Subscriber` itself is moved into the publisher on
//! `subscribe`. [`RecordingSubscriber::manual`] and
//! [`RecordingSubscriber::unbounded`] return a cheap, `Clone`-able
//! [`RecordingHandle`] alongside the boxed subscriber so the test keeps
//! both.

use parking_lot::Mutex;
use pulse_core::{demand::UNBOUNDED, PulseError, Subscriber, SubscriptionRef};
use std::fmt::Debug;
use std::sync::Arc;

/// A single recorded signal, with the error rendered as text so it stays
/// comparable with `assert_eq!` without requiring `PulseError: Clone`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedSignal<T> {
    Next(T),
    Complete,
    Error(String),
}

struct Inner<T> {
    subscription: Option<SubscriptionRef>,
    recorded: Vec<RecordedSignal<T>>,
}

/// A cloneable handle for driving and inspecting a [`RecordingSubscriber`]
/// after it has been handed to a publisher.
pub struct RecordingHandle<T> {
    inner: Arc<Mutex<Inner<T>>>,
}

impl<T> Clone for RecordingHandle<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: Clone> RecordingHandle<T> {
    /// Requests `n` items from the upstream subscription, if it has
    /// arrived yet (it always has by the time a test can call this, since
    /// `subscribe` delivers `on_subscribe` synchronously for every source
    /// and operator in this core).
    pub fn request(&self, n: u64) {
        let inner = self.inner.lock();
        if let Some(subscription) = &inner.subscription {
            subscription.request(n);
        }
    }

    /// Cancels the upstream subscription.
    pub fn cancel(&self) {
        let inner = self.inner.lock();
        if let Some(subscription) = &inner.subscription {
            subscription.cancel();
        }
    }

    /// Snapshot of every signal recorded so far, in arrival order.
    pub fn recorded(&self) -> Vec<RecordedSignal<T>> {
        self.inner.lock().recorded.clone()
    }

    /// Just the `Next` values recorded so far, in arrival order.
    pub fn values(&self) -> Vec<T> {
        self.inner
            .lock()
            .recorded
            .iter()
            .filter_map(|signal| match signal {
                RecordedSignal::Next(value) => Some(value.clone()),
                _ => None,
            })
            .collect()
    }

    /// Returns `true` once a `Complete` or `Error` has been recorded.
    pub fn is_terminated(&self) -> bool {
        self.inner
            .lock()
            .recorded
            .iter()
            .any(|s| matches!(s, RecordedSignal::Complete | RecordedSignal::Error(_)))
    }
}

/// The [`Subscriber`] half: implements the signal protocol by pushing into
/// the same storage a [`RecordingHandle`] reads from.
pub struct RecordingSubscriber<T> {
    inner: Arc<Mutex<Inner<T>>>,
    auto_request: Option<u64>,
}

impl<T: Send + Clone + Debug + 'static> RecordingSubscriber<T> {
    /// A subscriber that requests nothing on subscribe — the test drives
    /// demand explicitly via the returned handle. Useful for scenarios that
    /// start at zero demand and then call `request(n)` at chosen points.
    #[must_use]
    pub fn manual() -> (RecordingHandle<T>, Self) {
        Self::with_auto_request(None)
    }

    /// A subscriber that requests [`UNBOUNDED`] immediately on subscribe.
    #[must_use]
    pub fn unbounded() -> (RecordingHandle<T>, Self) {
        Self::with_auto_request(Some(UNBOUNDED))
    }

    fn with_auto_request(auto_request: Option<u64>) -> (RecordingHandle<T>, Self) {
        let inner = Arc::new(Mutex::new(Inner {
            subscription: None,
            recorded: Vec::new(),
        }));
        let handle = RecordingHandle {
            inner: Arc::clone(&inner),
        };
        let subscriber = Self {
            inner,
            auto_request,
        };
        (handle, subscriber)
    }
}

impl<T: Send + Clone + Debug + 'static> Subscriber<T> for RecordingSubscriber<T> {
    fn on_subscribe(&mut self, subscription: SubscriptionRef) {
        if let Some(n) = self.auto_request {
            subscription.request(n);
        }
        self.inner.lock().subscription = Some(subscription);
    }

    fn on_next(&mut self, value: T) {
        self.inner
            .lock()
            .recorded
            .push(RecordedSignal::Next(value));
    }

    fn on_complete(&mut self) {
        self.inner.lock().recorded.push(RecordedSignal::Complete);
    }

    fn on_error(&mut self, error: PulseError) {
        self.inner
            .lock()
            .recorded
            .push(RecordedSignal::Error(error.to_string()));
    }
}
