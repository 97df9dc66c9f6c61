// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::future::Future;
use std::time::Duration;

/// A runtime's notion of "now" and "sleep for a while".
///
/// Kept separate from [`crate::Scheduler`] so that operators needing only
/// a clock (not task dispatch) can depend on the smaller trait.
pub trait Timer: Clone + Send + Sync + 'static {
    type Sleep: Future<Output = ()> + Send;
    type Instant: Copy + Ord + Send + Sync + std::fmt::Debug;

    fn sleep_future(&self, duration: Duration) -> Self::Sleep;

    fn now(&self) -> Self::Instant;
}
