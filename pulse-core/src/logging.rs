// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Conditional logging macros.
//!
//! Observability is never load-bearing for correctness here — these
//! compile to nothing when the `tracing` feature is off, exactly as the
//! teacher gates its own `tracing` usage.

#[cfg(feature = "tracing")]
macro_rules! pulse_trace {
    ($($arg:tt)*) => {
        tracing::trace!($($arg)*);
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! pulse_trace {
    ($($arg:tt)*) => {};
}

#[cfg(feature = "tracing")]
macro_rules! pulse_debug {
    ($($arg:tt)*) => {
        tracing::debug!($($arg)*);
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! pulse_debug {
    ($($arg:tt)*) => {};
}

pub(crate) use pulse_debug;
pub(crate) use pulse_trace;
