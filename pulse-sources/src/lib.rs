// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions)]
//! Primitive source publishers: `empty`, `just`, `range`, `error`,
//! `never`, `from_iterable`.
//!
//! `empty`, `just`, `range`, and `from_iterable` share one engine
//! ([`engine::SequencePublisher`]) built on the [`step::StepSource`]
//! trait; `error` and `never` are simple enough to implement directly.

mod empty;
mod engine;
mod error;
mod from_iterable;
mod just;
mod never;
mod range;
mod step;

pub use empty::empty;
pub use error::error;
pub use from_iterable::from_iterable;
pub use just::just;
pub use never::never;
pub use range::range;
