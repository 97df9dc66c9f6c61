// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Isolates user-supplied callbacks (`fN`/`fE`/`fC`/`factory`) from the
//! operator's own control flow.
//!
//! These hooks are plain closures with no `Result` channel of their own,
//! so the only way one "throws" is by panicking. Catching the panic here
//! and turning it into [`PulseError::OperatorError`] keeps a misbehaving
//! callback from unwinding through the drain loop and poisoning shared
//! state.

use crate::error::PulseError;
use crate::logging::pulse_debug;
use std::panic::{catch_unwind, AssertUnwindSafe};

/// Runs `body`, converting a panic into `Err(PulseError::OperatorError)`.
pub fn guard<R>(body: impl FnOnce() -> R) -> Result<R, PulseError> {
    catch_unwind(AssertUnwindSafe(body)).map_err(|payload| {
        let error = PulseError::operator_panic(&*payload);
        pulse_debug!(%error, "user callback panicked");
        error
    })
}
