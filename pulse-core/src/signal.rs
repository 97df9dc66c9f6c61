// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! The signal protocol's data model.

use crate::error::PulseError;

/// One signal in the stream: a value, completion, or a terminal error.
///
/// `Complete` and `Error` are both terminal — at most one of them is ever
/// delivered to a given consumer, and nothing follows it.
#[derive(Debug)]
pub enum Signal<T> {
    /// A value authorized by prior demand.
    Next(T),
    /// Normal, successful termination.
    Complete,
    /// Abnormal termination.
    Error(PulseError),
}

impl<T> Signal<T> {
    /// Returns `true` for `Complete` or `Error` — the terminal variants.
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, Self::Next(_))
    }
}

/// Tags identifying which terminal pathway finished a subscription,
/// delivered to the base consumer adapter's `finally` hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalType {
    OnComplete,
    OnError,
    Cancel,
}
