//! SSI - typed multi-modal buffers for social signal processing
//!
//! Signal pipelines pass three kinds of values between stages:
//! continuous [`Stream`]s of typed samples, labelled [`Sample`]s bundling
//! one stream per modality, and discrete [`Event`]s with typed payloads.
//!
//! # Quick Start
//!
//! ```
//! use ssi::{ScalarKind, Stream};
//!
//! // 0.5s of two-channel audio features at 100Hz
//! let mut stream = Stream::of_kind(50, 2, ScalarKind::Float32, 100.0);
//! stream.set(0, 1, 0.25f32)?;
//!
//! // Last 10 samples, timestamp shifted to their onset
//! let tail = stream.copy_range(40, 50)?;
//! assert!((tail.time() - 0.4).abs() < 1e-9);
//!
//! // Same data as int16
//! let ints = stream.converted(ScalarKind::Int16)?;
//! assert_eq!(ints.dim(), 2);
//! # Ok::<(), ssi::Error>(())
//! ```
//!
//! # Crates
//!
//! - `ssi-core`: element types, conversion, formatting, byte buffers,
//!   string interning, limits and `ssi.toml` configuration
//! - `ssi-primitives`: [`Stream`], [`Sample`] and [`Event`]

pub use ssi_core::*;
pub use ssi_primitives::*;
