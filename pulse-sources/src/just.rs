// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::engine::SequencePublisher;
use crate::step::{Step, StepSource};
use pulse_core::Publisher;
use std::collections::VecDeque;

struct JustSequence<T> {
    remaining: VecDeque<T>,
}

impl<T: Send> StepSource<T> for JustSequence<T> {
    fn next_step(&mut self) -> Step<T> {
        match self.remaining.pop_front() {
            Some(value) => Step::Item(value),
            None => Step::Complete,
        }
    }
}

/// A publisher that emits the given values, in order, then completes.
/// `just()` with no values behaves like [`crate::empty`].
pub fn just<T: Send + Clone + 'static>(values: impl IntoIterator<Item = T>) -> impl Publisher<T> {
    let values: Vec<T> = values.into_iter().collect();
    SequencePublisher::new(move || {
        Box::new(JustSequence {
            remaining: values.iter().cloned().collect(),
        }) as Box<dyn StepSource<T>>
    })
}
