// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Windowed accumulation with configurable overlap/gap.
//!
//! One loop handles all three regimes (`skip == size` exact, `skip >
//! size` with gaps, `skip < size` overlapping): a new window opens every
//! `skip` items; every currently open window receives every item; the
//! oldest open window is the only one that can newly reach `size` on a
//! given item, since it was opened first and so always has the highest
//! fill count among open windows. When `skip > size`, the window started
//! at the last boundary closes (via that same check) before the gap
//! items arrive, so they simply have no open window to land in — that is
//! the discard behavior, with no special case needed.

use parking_lot::Mutex;
use pulse_core::{
    panic_guard, BoxSubscriber, Demand, Publisher, PulseError, Result, Subscriber, Subscription,
    SubscriptionRef,
};
use std::collections::VecDeque;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// A container that accumulates upstream values for one window.
pub trait Window<T>: Send + 'static {
    fn push_item(&mut self, value: T);
}

impl<T: Send + 'static> Window<T> for Vec<T> {
    fn push_item(&mut self, value: T) {
        self.push(value);
    }
}

struct WindowSlot<C> {
    container: C,
    filled: u32,
}

type Factory<C> = Arc<dyn Fn() -> Option<C> + Send + Sync>;

struct Shared<T, C> {
    downstream: Mutex<BoxSubscriber<C>>,
    upstream: Mutex<Option<SubscriptionRef>>,
    size: u32,
    skip: u32,
    factory: Factory<C>,
    received_count: Mutex<u64>,
    open_windows: Mutex<VecDeque<WindowSlot<C>>>,
    ready: Mutex<VecDeque<C>>,
    own_demand: Demand,
    /// Total windows that have ever closed (become ready), monotonic.
    closed_count: Mutex<u64>,
    /// Cumulative demand already communicated to upstream, so `request`
    /// only ever forwards the incremental amount still owed.
    upstream_requested: Mutex<u64>,
    upstream_terminated: AtomicBool,
    done: AtomicBool,
    drain: pulse_core::DrainState,
    _marker: PhantomData<fn(T)>,
}

impl<T: Send + 'static, C: Window<T>> Shared<T, C> {
    fn pump(&self) {
        self.drain.drain_with(|| self.advance());
    }

    fn advance(&self) {
        loop {
            if self.done.load(Ordering::Acquire) {
                return;
            }
            let mut ready = self.ready.lock();
            if ready.is_empty() {
                if self.upstream_terminated.load(Ordering::Acquire) {
                    drop(ready);
                    self.done.store(true, Ordering::Release);
                    self.upstream.lock().take();
                    self.downstream.lock().on_complete();
                }
                return;
            }
            if !self.own_demand.try_consume_one() {
                return;
            }
            let container = ready.pop_front().expect("checked non-empty above");
            drop(ready);
            self.downstream.lock().on_next(container);
        }
    }

    fn fail(&self, error: PulseError) {
        if self.done.swap(true, Ordering::AcqRel) {
            return;
        }
        self.open_windows.lock().clear();
        self.ready.lock().clear();
        if let Some(upstream) = self.upstream.lock().take() {
            upstream.cancel();
        }
        self.downstream.lock().on_error(error);
    }

    fn handle_item(&self, value: T)
    where
        T: Clone,
    {
        let is_boundary = {
            let mut received = self.received_count.lock();
            let count = *received;
            *received = count + 1;
            count % u64::from(self.skip) == 0
        };

        if is_boundary {
            match panic_guard::guard(|| (self.factory)()) {
                Ok(Some(container)) => self
                    .open_windows
                    .lock()
                    .push_back(WindowSlot { container, filled: 0 }),
                Ok(None) => {
                    self.fail(PulseError::null_argument(
                        "buffer window factory produced no container",
                    ));
                    return;
                }
                Err(e) => {
                    self.fail(e);
                    return;
                }
            }
        }

        let mut newly_ready = None;
        {
            let mut open = self.open_windows.lock();
            for slot in open.iter_mut() {
                slot.container.push_item(value.clone());
                slot.filled += 1;
            }
            if matches!(open.front(), Some(slot) if slot.filled == self.size) {
                newly_ready = open.pop_front();
            }
        }
        if let Some(slot) = newly_ready {
            *self.closed_count.lock() += 1;
            self.ready.lock().push_back(slot.container);
        }
        self.pump();
    }

    /// Requests just enough additional upstream demand to close
    /// `total_demand` more windows than are already sitting in `ready`
    /// awaiting delivery — accounting for partial progress already made
    /// on windows still open, per the bound
    /// `upstream-outstanding-demand >= outstanding-windows * skip -
    /// partial-progress`. Forwards only the incremental amount beyond
    /// what has already been requested, since upstream demand is
    /// additive.
    fn grow_upstream_demand(&self, total_demand: u64) {
        let upstream = self.upstream.lock().clone();
        let Some(upstream) = upstream else {
            return;
        };

        if total_demand == u64::MAX {
            let mut requested = self.upstream_requested.lock();
            if *requested != u64::MAX {
                *requested = u64::MAX;
                drop(requested);
                upstream.request(u64::MAX);
            }
            return;
        }

        let still_unfilled = total_demand.saturating_sub(self.ready.lock().len() as u64);
        if still_unfilled == 0 {
            return;
        }

        let target_closed = self
            .closed_count
            .lock()
            .saturating_add(still_unfilled);
        let required_total = target_closed
            .saturating_sub(1)
            .saturating_mul(u64::from(self.skip))
            .saturating_add(u64::from(self.size));

        let mut requested = self.upstream_requested.lock();
        if required_total > *requested {
            let delta = required_total - *requested;
            *requested = required_total;
            drop(requested);
            upstream.request(delta);
        }
    }
}

impl<T: Send + 'static, C: Window<T>> Subscription for Shared<T, C> {
    fn request(&self, n: u64) {
        if n == 0 {
            self.fail(PulseError::illegal_demand(n));
            return;
        }
        let total_demand = self.own_demand.add(n);
        self.grow_upstream_demand(total_demand);
        self.pump();
    }

    fn cancel(&self) {
        if !self.done.swap(true, Ordering::AcqRel) {
            self.open_windows.lock().clear();
            self.ready.lock().clear();
            if let Some(upstream) = self.upstream.lock().take() {
                upstream.cancel();
            }
        }
    }
}

struct UpstreamAdapter<T, C> {
    shared: Arc<Shared<T, C>>,
}

impl<T: Send + Clone + 'static, C: Window<T>> Subscriber<T> for UpstreamAdapter<T, C> {
    fn on_subscribe(&mut self, subscription: SubscriptionRef) {
        *self.shared.upstream.lock() = Some(subscription);
        let downstream_subscription: SubscriptionRef = Arc::clone(&self.shared) as SubscriptionRef;
        self.shared.downstream.lock().on_subscribe(downstream_subscription);
    }

    fn on_next(&mut self, value: T) {
        self.shared.handle_item(value);
    }

    fn on_error(&mut self, error: PulseError) {
        self.shared.fail(error);
    }

    fn on_complete(&mut self) {
        let remaining: Vec<C> = self
            .shared
            .open_windows
            .lock()
            .drain(..)
            .map(|slot| slot.container)
            .collect();
        self.shared.ready.lock().extend(remaining);
        self.shared
            .upstream_terminated
            .store(true, Ordering::Release);
        self.shared.pump();
    }
}

struct BufferPublisher<T, C> {
    upstream: Arc<dyn Publisher<T>>,
    size: u32,
    skip: u32,
    factory: Factory<C>,
}

impl<T: Send + Clone + 'static, C: Window<T>> Publisher<C> for BufferPublisher<T, C> {
    fn subscribe(&self, subscriber: BoxSubscriber<C>) {
        let shared = Arc::new(Shared {
            downstream: Mutex::new(subscriber),
            upstream: Mutex::new(None),
            size: self.size,
            skip: self.skip,
            factory: Arc::clone(&self.factory),
            received_count: Mutex::new(0),
            open_windows: Mutex::new(VecDeque::new()),
            ready: Mutex::new(VecDeque::new()),
            own_demand: Demand::new(),
            closed_count: Mutex::new(0),
            upstream_requested: Mutex::new(0),
            upstream_terminated: AtomicBool::new(false),
            done: AtomicBool::new(false),
            drain: pulse_core::DrainState::new(),
            _marker: PhantomData,
        });
        self.upstream
            .subscribe(Box::new(UpstreamAdapter { shared }));
    }
}

/// Builds a windowing operator: `size` values fill a window (created by
/// `factory`), a new window starts every `skip` values. `size == skip`
/// gives contiguous non-overlapping windows; `skip > size` gives gaps;
/// `skip < size` gives overlap.
///
/// Returns `Err(IllegalArgument)` synchronously if `size == 0` or
/// `skip == 0` — these are construction-time programmer errors, not
/// stream errors. A `factory` call that returns `None` when a window
/// opens, or one that panics, terminates the resulting stream with
/// `on_error` instead (`NullArgument`/`OperatorError` respectively),
/// since those failures are only observable once the stream is running.
pub fn buffer<T, C>(
    upstream: Arc<dyn Publisher<T>>,
    size: u32,
    skip: u32,
    factory: impl Fn() -> Option<C> + Send + Sync + 'static,
) -> Result<impl Publisher<C>>
where
    T: Send + Clone + 'static,
    C: Window<T>,
{
    if size == 0 {
        return Err(PulseError::illegal_argument("buffer size must be >= 1"));
    }
    if skip == 0 {
        return Err(PulseError::illegal_argument("buffer skip must be >= 1"));
    }
    Ok(BufferPublisher {
        upstream,
        size,
        skip,
        factory: Arc::new(factory),
    })
}
