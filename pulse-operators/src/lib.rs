// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions)]
//! Signal-transforming operators built on the `pulse-core` protocol:
//! `map_signal`, `flat_map_signal`, and `buffer`.

mod buffer;
mod flat_map_signal;
mod map_signal;

pub use buffer::{buffer, Window};
pub use flat_map_signal::flat_map_signal;
pub use map_signal::map_signal;
