//! Shared helpers for the integration suites.
//!
//! Import via `#[path = "../common/mod.rs"] mod common;` from a suite's main.rs.

#![allow(dead_code)]

use ssi::{ScalarKind, Stream};
use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Route `tracing` output to the test harness
pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    });
}

/// Float32 stream whose element `(i, d)` holds `i * dim + d`
pub fn ramp(num: usize, dim: usize, sr: f64) -> Stream {
    let values: Vec<f32> = (0..num * dim).map(|v| v as f32).collect();
    Stream::from_values(&values, dim, sr).unwrap()
}

/// Empty float32 stream of the given dimension
pub fn empty(dim: usize, sr: f64) -> Stream {
    Stream::of_kind(0, dim, ScalarKind::Float32, sr)
}

/// Stream of `kind` whose bytes count up from `seed`
pub fn patterned(num: usize, dim: usize, kind: ScalarKind, seed: u8) -> Stream {
    let mut stream = Stream::of_kind(num, dim, kind, 50.0);
    stream.set_time(1.25);
    for (i, b) in stream.data_mut().iter_mut().enumerate() {
        *b = seed.wrapping_add(i as u8);
    }
    stream
}
