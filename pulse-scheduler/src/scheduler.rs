// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::time::Duration;

/// A unit of work handed to a [`Scheduler`].
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// A unit of work handed to [`Scheduler::schedule_periodic`], re-run on
/// every tick until the returned handle is disposed.
pub type PeriodicTask = Box<dyn FnMut() + Send + 'static>;

/// The injectable scheduler capability.
///
/// This core is thread-agnostic: publishers deliver signals either
/// synchronously (on the subscribing thread) or by handing work to a
/// `Scheduler` obtained from outside the core. The core itself never
/// constructs a scheduler — it only consumes this trait.
pub trait Scheduler: Send + Sync {
    /// Runs `task` once, asynchronously with respect to the caller.
    fn schedule(&self, task: Task);

    /// Runs `task` once, after `delay` has elapsed.
    fn schedule_delayed(&self, task: Task, delay: Duration) -> Box<dyn Disposable>;

    /// Runs `task` repeatedly, every `period`, until disposed.
    fn schedule_periodic(&self, task: PeriodicTask, period: Duration) -> Box<dyn Disposable>;

    /// Cancels all pending work owned by this scheduler and, for
    /// single-thread schedulers, releases the backing thread.
    fn dispose(&self);
}

/// A handle that can cancel scheduled work exactly once, idempotently.
pub trait Disposable: Send {
    fn dispose(&self);
}
