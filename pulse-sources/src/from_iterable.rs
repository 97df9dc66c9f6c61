// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::engine::SequencePublisher;
use crate::step::{Step, StepSource};
use pulse_core::{panic_guard, Publisher};

struct IterableSequence<I> {
    iter: I,
}

impl<T, I> StepSource<T> for IterableSequence<I>
where
    T: Send,
    I: Iterator<Item = T> + Send,
{
    fn next_step(&mut self) -> Step<T> {
        match panic_guard::guard(|| self.iter.next()) {
            Ok(Some(value)) => Step::Item(value),
            Ok(None) => Step::Complete,
            Err(e) => Step::Error(e),
        }
    }
}

/// A publisher that pulls from a restartable lazy sequence under demand.
/// `make_iter` is invoked once per subscription, so the same publisher can
/// be subscribed to more than once, each seeing a fresh iterator. A panic
/// from the iterator's `next()` becomes `on_error`.
pub fn from_iterable<T, I, F>(make_iter: F) -> impl Publisher<T>
where
    T: Send + 'static,
    I: Iterator<Item = T> + Send + 'static,
    F: Fn() -> I + Send + Sync + 'static,
{
    SequencePublisher::new(move || {
        Box::new(IterableSequence {
            iter: make_iter(),
        }) as Box<dyn StepSource<T>>
    })
}
