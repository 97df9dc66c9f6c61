// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The subscription contract.

use std::sync::Arc;

/// The live, stateful link produced by `Publisher::subscribe`.
///
/// `request` and `cancel` are safe to call from any thread, at any time,
/// including re-entrantly from within a signal callback delivered on this
/// same subscription.
pub trait Subscription: Send + Sync {
    /// Requests `n` additional items.
    ///
    /// `request(0)` is illegal: it delivers `ErrorKind::IllegalDemand` to
    /// the downstream consumer and terminates the subscription.
    fn request(&self, n: u64);

    /// Cancels the subscription. Idempotent — a second call is a no-op.
    fn cancel(&self);
}

/// Shared handle to a live subscription's control surface.
pub type SubscriptionRef = Arc<dyn Subscription>;

/// Any entity with an idempotent `dispose()`.
pub trait Disposable {
    fn dispose(&self);
}

impl<S: Subscription + ?Sized> Disposable for S {
    fn dispose(&self) {
        self.cancel();
    }
}

/// A [`Subscription`] that never delivers anything and ignores every call.
///
/// Used by sources like `never()` that accept requests but have nothing to
/// emit, and as a placeholder before a real upstream subscription has
/// arrived.
#[derive(Debug, Default)]
pub struct NoopSubscription;

impl Subscription for NoopSubscription {
    fn request(&self, _n: u64) {}
    fn cancel(&self) {}
}
