// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The publisher abstraction.

use crate::consumer::BoxSubscriber;
use std::sync::Arc;

/// Anything that, on `subscribe`, begins delivering a serialized signal
/// stream to a consumer.
///
/// `subscribe` has no return value to the caller; its side effect is an
/// `on_subscribe` delivered to `subscriber` before anything else. Every
/// operator in this core is itself a `Publisher`, built in terms of an
/// upstream one.
pub trait Publisher<T>: Send + Sync {
    fn subscribe(&self, subscriber: BoxSubscriber<T>);
}

/// Shared handle to a type-erased upstream publisher.
pub type ArcPublisher<T> = Arc<dyn Publisher<T>>;
