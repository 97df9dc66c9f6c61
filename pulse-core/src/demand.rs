// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Saturating, atomic demand arithmetic.
//!
//! `Demand` is the shared counter of outstanding `request(n)` authorization.
//! It saturates at [`UNBOUNDED`] — the reserved sentinel meaning "no limit"
//! — rather than wrapping, so a source never needs to distinguish "huge
//! demand" from "unbounded demand".

use std::sync::atomic::{AtomicU64, Ordering};

/// Sentinel value meaning "unbounded demand".
pub const UNBOUNDED: u64 = u64::MAX;

/// A shared, atomically-updated demand counter.
#[derive(Debug, Default)]
pub struct Demand {
    outstanding: AtomicU64,
}

impl Demand {
    /// Creates a demand counter starting at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            outstanding: AtomicU64::new(0),
        }
    }

    /// Creates a demand counter already at [`UNBOUNDED`].
    #[must_use]
    pub const fn unbounded() -> Self {
        Self {
            outstanding: AtomicU64::new(UNBOUNDED),
        }
    }

    /// Returns the current outstanding demand (a racy snapshot).
    pub fn get(&self) -> u64 {
        self.outstanding.load(Ordering::Acquire)
    }

    /// Returns `true` if demand is currently the unbounded sentinel.
    pub fn is_unbounded(&self) -> bool {
        self.get() == UNBOUNDED
    }

    /// Adds `n` to the outstanding demand, saturating at [`UNBOUNDED`].
    /// Returns the resulting demand value.
    pub fn add(&self, n: u64) -> u64 {
        if n == 0 {
            return self.get();
        }
        loop {
            let current = self.outstanding.load(Ordering::Acquire);
            if current == UNBOUNDED {
                return UNBOUNDED;
            }
            let next = current.saturating_add(n).min(UNBOUNDED);
            match self.outstanding.compare_exchange_weak(
                current,
                next,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => return next,
                Err(_) => continue,
            }
        }
    }

    /// Attempts to consume one unit of demand for a single emission.
    ///
    /// Returns `true` if an emission is authorized (demand was nonzero, or
    /// unbounded — in which case it is left untouched). Returns `false` if
    /// demand was zero.
    pub fn try_consume_one(&self) -> bool {
        self.try_consume(1)
    }

    /// Attempts to consume `n` units of demand atomically.
    ///
    /// Returns `true` if the full `n` was available (or demand is
    /// unbounded) and was consumed; returns `false` — consuming nothing —
    /// if fewer than `n` units were outstanding.
    pub fn try_consume(&self, n: u64) -> bool {
        if n == 0 {
            return true;
        }
        loop {
            let current = self.outstanding.load(Ordering::Acquire);
            if current == UNBOUNDED {
                return true;
            }
            if current < n {
                return false;
            }
            match self.outstanding.compare_exchange_weak(
                current,
                current - n,
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => return true,
                Err(_) => continue,
            }
        }
    }

    /// Forces the counter to the unbounded sentinel.
    pub fn set_unbounded(&self) {
        self.outstanding.store(UNBOUNDED, Ordering::Release);
    }
}
