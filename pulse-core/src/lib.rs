// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions)]
//! Signal protocol, demand arithmetic and subscription core for `pulse`.
//!
//! This crate has no opinion on *what* is being streamed or *how* items get
//! from one thread to another — it only pins down the contract between a
//! [`Publisher`] and a [`Subscriber`]: the four signals, the `request`/
//! `cancel` control channel, the demand counter, and the drain-loop
//! serialization discipline that keeps concurrent activity on one
//! subscription single-writer.

#[macro_use]
mod logging;

pub mod consumer;
pub mod demand;
pub mod drain;
pub mod error;
pub mod panic_guard;
pub mod publisher;
pub mod signal;
pub mod subscription;

pub use consumer::{BoxSubscriber, Subscriber};
pub use demand::{Demand, UNBOUNDED};
pub use drain::DrainState;
pub use error::{Message, PulseError, Result};
pub use publisher::{ArcPublisher, Publisher};
pub use signal::{Signal, SignalType};
pub use subscription::{Disposable, NoopSubscription, Subscription, SubscriptionRef};
