// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::engine::SequencePublisher;
use crate::step::{Step, StepSource};
use pulse_core::Publisher;

struct RangeSequence {
    next: i64,
    remaining: u64,
}

impl StepSource<i64> for RangeSequence {
    fn next_step(&mut self) -> Step<i64> {
        if self.remaining == 0 {
            return Step::Complete;
        }
        let value = self.next;
        self.next += 1;
        self.remaining -= 1;
        Step::Item(value)
    }
}

/// A publisher that emits `start, start + 1, ..., start + count - 1`, then
/// completes. `count == 0` behaves like [`crate::empty`].
pub fn range(start: i64, count: u64) -> impl Publisher<i64> {
    SequencePublisher::new(move || {
        Box::new(RangeSequence {
            next: start,
            remaining: count,
        }) as Box<dyn StepSource<i64>>
    })
}
