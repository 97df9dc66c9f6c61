// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The consumer-facing half of the signal protocol.

use crate::error::PulseError;
use crate::subscription::SubscriptionRef;

/// Receives the serialized signal stream produced by a [`crate::publisher::Publisher`].
///
/// Contract:
/// - Exactly one `on_subscribe` is delivered before any other signal.
/// - Any number of `on_next` calls follow, each authorized by outstanding
///   demand accumulated via `request`.
/// - At most one of `on_complete`/`on_error` is delivered; nothing follows
///   it.
/// - Calls to a single `Subscriber` are serialized: two `on_next` calls
///   never overlap.
pub trait Subscriber<T>: Send {
    /// Delivered exactly once, before any other signal.
    fn on_subscribe(&mut self, subscription: SubscriptionRef);

    /// Delivered for each authorized value.
    fn on_next(&mut self, value: T);

    /// Delivered at most once, terminating the stream successfully.
    fn on_complete(&mut self);

    /// Delivered at most once, terminating the stream with a failure.
    fn on_error(&mut self, error: PulseError);
}

/// A boxed, type-erased [`Subscriber`].
pub type BoxSubscriber<T> = Box<dyn Subscriber<T>>;
