//! Buffer Behaviour Test Suite
//!
//! End-to-end coverage of streams, samples and events through the public
//! `ssi` facade.
//!
//! ## Modules
//!
//! - `stream_invariants`: size bookkeeping and the adjust policy
//! - `stream_transforms`: append, sub-range, selection and conversion
//! - `event_payloads`: typed payloads, adjust rules and transport records
//! - `sample_lifecycle`: slots, deep copies and limits
//! - `config_files`: `ssi.toml` driving rendering and checked constructors
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test --test buffers
//! cargo test --test buffers stream_invariants::
//! ```

#[path = "../common/mod.rs"]
mod common;

mod config_files;
mod sample_lifecycle;
mod stream_invariants;
mod stream_transforms;
