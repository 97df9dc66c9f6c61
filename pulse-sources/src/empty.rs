// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::engine::SequencePublisher;
use crate::step::{Step, StepSource};
use pulse_core::Publisher;

struct EmptySequence;

impl<T: Send> StepSource<T> for EmptySequence {
    fn next_step(&mut self) -> Step<T> {
        Step::Complete
    }
}

/// A publisher that emits no values and completes immediately, as soon as
/// the downstream requests anything (completion is never demand-gated, but
/// `on_subscribe` must still return before `on_complete` is delivered).
pub fn empty<T: Send + 'static>() -> impl Publisher<T> {
    SequencePublisher::new(|| Box::new(EmptySequence) as Box<dyn StepSource<T>>)
}
