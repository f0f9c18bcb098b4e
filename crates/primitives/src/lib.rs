//! Buffer primitives for SSI pipelines
//!
//! Provides the three value types passed between processing stages:
//! - **Stream**: owned 2-D buffer of typed samples with rate and timestamp
//! - **Sample**: labelled bundle of parallel streams, one per modality
//! - **Event**: discrete timestamped message with a typed payload
//!
//! ## Ownership
//!
//! Every type owns its storage exclusively. Cloning deep-copies, and every
//! derived buffer (sub-range, selection, conversion) gets fresh storage.
//! None of the types synchronise internally; share them across threads the
//! way you share any other `Send` value.
//!
//! ## Resizing
//!
//! Streams and event payloads distinguish the logical size from the
//! allocated size. Shrinking moves only the logical size and keeps the old
//! bytes; growing past the allocation reallocates exactly and preserves the
//! logical prefix. See [`AdjustOutcome`].

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod event;
pub mod sample;
pub mod stream;

pub use event::{
    Event, EventData, EventRecord, EventState, EventType, GlueId, MapEntry, Payload,
};
pub use sample::{Sample, GARBAGE_CLASS_ID};
pub use stream::{AdjustOutcome, Stream, StreamHeader};
