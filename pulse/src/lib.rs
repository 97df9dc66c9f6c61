// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions)]
//! # Pulse
//!
//! A push-based reactive streaming core with non-blocking backpressure.
//!
//! Producers ([`Publisher`]) emit sequences of items; consumers
//! ([`Subscriber`]) signal demand through a [`Subscription`]; operators are
//! composable stages that sit between them, transforming values while
//! preserving flow-control and termination semantics.
//!
//! ## Layout
//!
//! - [`pulse_core`] pins down the signal protocol, demand arithmetic, and
//!   the drain-loop serialization discipline every source and operator
//!   builds on.
//! - [`pulse_sources`] is the primitive emitters: [`empty`], [`just`],
//!   [`range`], [`error`], [`never`], [`from_iterable`].
//! - [`pulse_operators`] is the transforming stages: [`map_signal`],
//!   [`flat_map_signal`], [`buffer`].
//! - [`pulse_consumer`] is the base adapter user consumers build on.
//! - [`pulse_scheduler`] (feature `scheduler`) is the injectable scheduler
//!   capability sources and operators may accept as a collaborator, plus a
//!   tokio-backed reference implementation.
//!
//! ## Quick start
//!
//! ```
//! use pulse::prelude::*;
//! use std::sync::Arc;
//!
//! let upstream: Arc<dyn Publisher<i64>> = Arc::new(range(1, 5));
//! let doubled = map_signal::<i64, i64>(
//!     upstream,
//!     Some(Arc::new(|v| v * 2)),
//!     None,
//!     None,
//! );
//!
//! struct Collect(Vec<i64>);
//! impl Subscriber<i64> for Collect {
//!     fn on_subscribe(&mut self, subscription: SubscriptionRef) {
//!         subscription.request(UNBOUNDED);
//!     }
//!     fn on_next(&mut self, value: i64) {
//!         self.0.push(value);
//!     }
//!     fn on_complete(&mut self) {}
//!     fn on_error(&mut self, _error: PulseError) {}
//! }
//!
//! doubled.subscribe(Box::new(Collect(Vec::new())));
//! ```

pub use pulse_consumer;
pub use pulse_core;
pub use pulse_operators;
pub use pulse_sources;

#[cfg(feature = "scheduler")]
pub use pulse_scheduler;

pub use pulse_consumer::{BaseSubscriber, ConsumerHooks};
pub use pulse_core::{
    ArcPublisher, BoxSubscriber, Demand, Disposable, NoopSubscription, Publisher, PulseError,
    Result, Signal, SignalType, Subscriber, Subscription, SubscriptionRef, UNBOUNDED,
};
pub use pulse_operators::{buffer, flat_map_signal, map_signal, Window};
pub use pulse_sources::{empty, error, from_iterable, just, never, range};

/// Convenience re-export of everything needed to build and consume a
/// `pulse` pipeline without naming each sub-crate individually.
pub mod prelude {
    pub use crate::{
        buffer, empty, error, flat_map_signal, from_iterable, just, map_signal, never, range,
        ArcPublisher, BaseSubscriber, BoxSubscriber, ConsumerHooks, Demand, Disposable,
        NoopSubscription, Publisher, PulseError, Result, Signal, SignalType, Subscriber,
        Subscription, SubscriptionRef, Window, UNBOUNDED,
    };

    #[cfg(feature = "scheduler")]
    pub use pulse_scheduler::{Scheduler, Task};
}
