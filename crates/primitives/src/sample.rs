//! Sample: a labelled bundle of parallel streams
//!
//! A sample groups one stream per modality under a shared timestamp, user,
//! class and score. It is the unit handed to model consumers.
//!
//! A slot may be empty when a modality is missing for this instance.
//! Consumers treat an empty slot as "absent", never as an error.

use crate::stream::Stream;
use ssi_core::{Limits, Result};

/// Class id of unlabelled ("garbage") samples
pub const GARBAGE_CLASS_ID: u32 = u32::MAX;

/// Labelled bundle of parallel streams
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    streams: Vec<Option<Stream>>,
    /// User the sample was recorded from
    pub user_id: u32,
    /// Class label, [`GARBAGE_CLASS_ID`] if unlabelled
    pub class_id: u32,
    /// Timestamp in seconds
    pub time: f64,
    /// Confidence or weight of the label
    pub score: f32,
}

impl Sample {
    /// Create a sample with `num` empty slots
    pub fn new(num: usize, user_id: u32, class_id: u32, time: f64, score: f32) -> Self {
        Self {
            streams: vec![None; num],
            user_id,
            class_id,
            time,
            score,
        }
    }

    /// Create a sample after checking `num` against `limits`
    pub fn try_new(
        limits: &Limits,
        num: usize,
        user_id: u32,
        class_id: u32,
        time: f64,
        score: f32,
    ) -> Result<Self> {
        limits.validate_sample(num)?;
        Ok(Self::new(num, user_id, class_id, time, score))
    }

    /// Number of slots
    pub fn num(&self) -> usize {
        self.streams.len()
    }

    /// Number of populated slots
    pub fn present(&self) -> usize {
        self.streams.iter().filter(|s| s.is_some()).count()
    }

    /// Whether every slot is populated
    pub fn is_complete(&self) -> bool {
        self.streams.iter().all(Option::is_some)
    }

    /// Whether the sample carries no label
    pub fn is_garbage(&self) -> bool {
        self.class_id == GARBAGE_CLASS_ID
    }

    /// All slots in order
    pub fn streams(&self) -> &[Option<Stream>] {
        &self.streams
    }

    /// Stream in slot `index`, `None` if empty or out of range
    pub fn stream(&self, index: usize) -> Option<&Stream> {
        self.streams.get(index).and_then(Option::as_ref)
    }

    /// Mutable stream in slot `index`
    pub fn stream_mut(&mut self, index: usize) -> Option<&mut Stream> {
        self.streams.get_mut(index).and_then(Option::as_mut)
    }

    /// Populate slot `index`, returning the stream it replaces
    ///
    /// # Panics
    ///
    /// Panics if `index >= num`.
    pub fn set_stream(&mut self, index: usize, stream: Stream) -> Option<Stream> {
        self.streams[index].replace(stream)
    }

    /// Empty slot `index`, handing its stream to the caller
    pub fn take_stream(&mut self, index: usize) -> Option<Stream> {
        self.streams.get_mut(index).and_then(Option::take)
    }

    /// Free every stream and drop all slots
    pub fn destroy(&mut self) {
        self.streams.clear();
        self.streams.shrink_to_fit();
    }
}
