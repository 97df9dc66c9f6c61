// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use pulse_core::PulseError;

/// One advance of a [`StepSource`]: either the next value, exhaustion, or a
/// failure. Completion and failure are never gated by outstanding demand;
/// only `Item` delivery is.
pub(crate) enum Step<T> {
    Item(T),
    Complete,
    Error(PulseError),
}

/// A restartable, pull-based value producer. A fresh instance is created
/// per subscription by the publisher's factory closure, so the same
/// source can be subscribed to more than once.
pub(crate) trait StepSource<T>: Send {
    /// Advances the sequence by one position.
    fn next_step(&mut self) -> Step<T>;

    /// Called once, when the subscription is cancelled before the sequence
    /// naturally terminated. Lets a sequence release held resources.
    fn release(&mut self) {}
}
