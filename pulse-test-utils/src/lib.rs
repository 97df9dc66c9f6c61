// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions)]
//! Test harness utilities for driving and inspecting pulse publishers.

mod recording_subscriber;

pub use recording_subscriber::{RecordedSignal, RecordingHandle, RecordingSubscriber};

/// A container factory for buffer-style operators that always panics,
/// for exercising the path where a user-supplied factory fails.
pub fn panicking_factory<C>(message: &'static str) -> impl Fn() -> C + Send + Sync + 'static {
    move || panic!("{message}")
}
