// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions)]
//! The injectable scheduler capability.
//!
//! The subscription core never constructs a scheduler itself; sources and
//! operators that need to hop threads accept one as a collaborator. This
//! crate defines the capability and ships one reference implementation,
//! [`impls::tokio::TokioScheduler`], for tests and documentation — it is
//! not a dependency of `pulse-core`, `pulse-sources`, or `pulse-operators`.

pub mod impls;
pub mod scheduler;
pub mod timer;

pub use scheduler::{Disposable, PeriodicTask, Scheduler, Task};
pub use timer::Timer;
