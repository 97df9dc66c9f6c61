// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::scheduler::{Disposable, PeriodicTask, Scheduler, Task};
use crate::timer::Timer;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// A [`Timer`] backed by `tokio::time`.
#[derive(Clone, Debug, Default)]
pub struct TokioTimer;

impl Timer for TokioTimer {
    type Sleep = tokio::time::Sleep;
    type Instant = Instant;

    fn sleep_future(&self, duration: Duration) -> Self::Sleep {
        tokio::time::sleep(duration)
    }

    fn now(&self) -> Self::Instant {
        Instant::now()
    }
}

struct CancelFlag(Arc<AtomicBool>);

impl Disposable for CancelFlag {
    fn dispose(&self) {
        self.0.store(true, Ordering::Release);
    }
}

/// A [`Scheduler`] that dispatches work onto the ambient `tokio` runtime.
///
/// Reference implementation of the scheduler capability — this core's
/// operators never depend on it directly; it exists so the workspace has
/// at least one usable collaborator to test and document against.
#[derive(Debug, Default, Clone)]
pub struct TokioScheduler {
    disposed: Arc<AtomicBool>,
}

impl TokioScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&self, task: Task) {
        if self.disposed.load(Ordering::Acquire) {
            return;
        }
        tokio::spawn(async move {
            task();
        });
    }

    fn schedule_delayed(&self, task: Task, delay: Duration) -> Box<dyn Disposable> {
        let cancelled = Arc::new(AtomicBool::new(false));
        let cancelled_for_task = Arc::clone(&cancelled);
        let disposed = Arc::clone(&self.disposed);

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if !cancelled_for_task.load(Ordering::Acquire) && !disposed.load(Ordering::Acquire) {
                task();
            }
        });

        Box::new(CancelFlag(cancelled))
    }

    fn schedule_periodic(&self, mut task: PeriodicTask, period: Duration) -> Box<dyn Disposable> {
        let cancelled = Arc::new(AtomicBool::new(false));
        let cancelled_for_task = Arc::clone(&cancelled);
        let disposed = Arc::clone(&self.disposed);

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            loop {
                interval.tick().await;
                if cancelled_for_task.load(Ordering::Acquire) || disposed.load(Ordering::Acquire) {
                    break;
                }
                task();
            }
        });

        Box::new(CancelFlag(cancelled))
    }

    fn dispose(&self) {
        self.disposed.store(true, Ordering::Release);
    }
}
