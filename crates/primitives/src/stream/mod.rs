//! Stream: owned, typed 2-D buffer (samples x dimensions)
//!
//! A stream is the primary data-exchange unit between processing stages.
//! It owns a [`ByteBuffer`] holding `num * dim` elements of `byte` bytes
//! each, plus the sample rate and the timestamp of its first sample.
//!
//! ## Sizes
//!
//! | Field | Meaning |
//! |-------|---------|
//! | `num` / `num_real` | logical / allocated sample count |
//! | `tot` / `tot_real` | logical / allocated bytes (`num*dim*byte`) |
//!
//! `num <= num_real` always holds, and storage is allocated iff
//! `tot_real > 0`.
//!
//! ## Adjust Policy
//!
//! Resizing to a sample count within `num_real` only moves `num`; bytes past
//! the new end stay in place and reappear when the stream grows back.
//! Growing past `num_real` allocates exactly the new size and copies the old
//! logical bytes to the front. Cycling between sizes under a previously
//! reached maximum therefore never allocates.
//!
//! Streams are plain values: not synchronised, deep-copied on clone, and
//! every derived stream (copy, selection, conversion) owns its own storage.

mod ops;

use serde::{Deserialize, Serialize};
use ssi_core::{
    format_array, format_value, ByteBuffer, DataType, Error, FormatOptions, Limits, Result,
    Scalar, ScalarKind, ScalarValue,
};
use std::fmt;
use std::io::Write;

/// What an [`Stream::adjust`] (or append) did to the storage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdjustOutcome {
    /// Requested size equals the current one
    Unchanged,
    /// Logical size moved inside the existing allocation
    InPlace,
    /// Storage was reallocated and the old logical bytes copied
    Reallocated,
}

/// Shape and timing of a stream, as written by stream file codecs
///
/// Holds the signal header (`sample_rate`, `dim`, `byte`, `kind`) and the
/// data header (`time`, `num`). `kind` serializes as its canonical name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamHeader {
    /// Samples per second (0 for non-periodic data)
    pub sample_rate: f64,
    /// Values per sample
    pub dim: usize,
    /// Bytes per value
    pub byte: usize,
    /// Declared element type
    pub kind: DataType,
    /// Timestamp of the first sample in seconds
    pub time: f64,
    /// Sample count
    pub num: usize,
}

/// Owned, typed 2-D buffer
#[derive(Clone, Default)]
pub struct Stream {
    num: usize,
    num_real: usize,
    dim: usize,
    byte: usize,
    kind: DataType,
    sr: f64,
    time: f64,
    buffer: ByteBuffer,
}

fn check_width(kind: DataType, byte: usize) {
    if let Some(width) = kind.byte_width() {
        assert_eq!(
            width, byte,
            "element width {} does not match declared kind {}",
            byte, kind
        );
    }
}

impl Stream {
    /// Allocate a zero-filled stream of `num` samples
    ///
    /// # Panics
    ///
    /// Panics if `kind` is a scalar whose width differs from `byte`, or if
    /// `num * dim * byte` overflows.
    pub fn new(num: usize, dim: usize, byte: usize, kind: DataType, sr: f64, time: f64) -> Self {
        check_width(kind, byte);
        let tot = Limits::stream_bytes(num, dim, byte)
            .unwrap_or_else(|e| panic!("stream allocation failed: {}", e));
        Self {
            num,
            num_real: num,
            dim,
            byte,
            kind,
            sr,
            time,
            buffer: ByteBuffer::zeroed(tot),
        }
    }

    /// Allocate a stream of a scalar kind, element width implied
    pub fn of_kind(num: usize, dim: usize, kind: ScalarKind, sr: f64) -> Self {
        Self::new(num, dim, kind.byte_width(), kind.into(), sr, 0.0)
    }

    /// Allocate a stream after validating its shape against `limits`
    ///
    /// # Errors
    ///
    /// `Limit` if the shape exceeds a limit or its size overflows,
    /// `InvalidData` if `byte` does not match a scalar `kind`.
    pub fn try_new(
        limits: &Limits,
        num: usize,
        dim: usize,
        byte: usize,
        kind: DataType,
        sr: f64,
        time: f64,
    ) -> Result<Self> {
        if kind.byte_width().is_some_and(|w| w != byte) {
            return Err(Error::InvalidData(format!(
                "element width {} does not match declared kind {}",
                byte, kind
            )));
        }
        limits.validate_stream(num, dim, byte)?;
        Ok(Self::new(num, dim, byte, kind, sr, time))
    }

    /// Build a stream from typed values laid out sample by sample
    ///
    /// # Errors
    ///
    /// `InvalidData` if `dim` is zero or `values.len()` is not a multiple
    /// of `dim`.
    pub fn from_values<T: Scalar>(values: &[T], dim: usize, sr: f64) -> Result<Self> {
        if dim == 0 || values.len() % dim != 0 {
            return Err(Error::InvalidData(format!(
                "{} values do not form samples of dim {}",
                values.len(),
                dim
            )));
        }
        let mut stream = Self::of_kind(values.len() / dim, dim, T::KIND, sr);
        let width = T::KIND.byte_width();
        for (v, chunk) in values
            .iter()
            .zip(stream.buffer.as_mut_slice().chunks_exact_mut(width))
        {
            v.write(chunk);
        }
        Ok(stream)
    }

    /// Rebuild a stream from a header and its raw payload
    ///
    /// # Errors
    ///
    /// `InvalidData` if `bytes.len()` differs from `num * dim * byte` or the
    /// header's width contradicts its kind.
    pub fn from_parts(header: &StreamHeader, bytes: &[u8]) -> Result<Self> {
        if header.kind.byte_width().is_some_and(|w| w != header.byte) {
            return Err(Error::InvalidData(format!(
                "element width {} does not match declared kind {}",
                header.byte, header.kind
            )));
        }
        let tot = Limits::stream_bytes(header.num, header.dim, header.byte)?;
        if tot != bytes.len() {
            return Err(Error::InvalidData(format!(
                "payload has {} bytes, header declares {}",
                bytes.len(),
                tot
            )));
        }
        Ok(Self {
            num: header.num,
            num_real: header.num,
            dim: header.dim,
            byte: header.byte,
            kind: header.kind,
            sr: header.sample_rate,
            time: header.time,
            buffer: ByteBuffer::from_slice(bytes),
        })
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Logical sample count
    #[inline]
    pub fn num(&self) -> usize {
        self.num
    }

    /// Allocated sample count
    #[inline]
    pub fn num_real(&self) -> usize {
        self.num_real
    }

    /// Values per sample
    #[inline]
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Bytes per value
    #[inline]
    pub fn byte(&self) -> usize {
        self.byte
    }

    /// Logical payload bytes
    #[inline]
    pub fn tot(&self) -> usize {
        self.buffer.len()
    }

    /// Allocated payload bytes
    #[inline]
    pub fn tot_real(&self) -> usize {
        self.buffer.capacity()
    }

    /// Declared element type
    #[inline]
    pub fn kind(&self) -> DataType {
        self.kind
    }

    /// Samples per second (0 for non-periodic data)
    #[inline]
    pub fn sample_rate(&self) -> f64 {
        self.sr
    }

    /// Timestamp of the first sample in seconds
    #[inline]
    pub fn time(&self) -> f64 {
        self.time
    }

    /// Set the timestamp of the first sample
    pub fn set_time(&mut self, time: f64) {
        self.time = time;
    }

    /// Set the sample rate
    pub fn set_sample_rate(&mut self, sr: f64) {
        self.sr = sr;
    }

    /// Whether there are no logical samples
    pub fn is_empty(&self) -> bool {
        self.num == 0
    }

    /// Whether storage is allocated
    pub fn is_allocated(&self) -> bool {
        self.buffer.is_allocated()
    }

    /// Bytes per sample (`dim * byte`)
    #[inline]
    pub fn sample_size(&self) -> usize {
        self.dim * self.byte
    }

    /// Covered time span in seconds, 0 for non-periodic streams
    pub fn duration(&self) -> f64 {
        if self.sr > 0.0 {
            self.num as f64 / self.sr
        } else {
            0.0
        }
    }

    /// Logical payload
    #[inline]
    pub fn data(&self) -> &[u8] {
        self.buffer.as_slice()
    }

    /// Logical payload, mutable
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        self.buffer.as_mut_slice()
    }

    /// Underlying storage
    pub fn buffer(&self) -> &ByteBuffer {
        &self.buffer
    }

    /// Bytes of sample `index`
    ///
    /// # Panics
    ///
    /// Panics if `index >= num`.
    pub fn sample_bytes(&self, index: usize) -> &[u8] {
        assert!(index < self.num, "sample {} out of {}", index, self.num);
        let size = self.sample_size();
        &self.data()[index * size..(index + 1) * size]
    }

    /// Shape and timing header
    pub fn header(&self) -> StreamHeader {
        StreamHeader {
            sample_rate: self.sr,
            dim: self.dim,
            byte: self.byte,
            kind: self.kind,
            time: self.time,
            num: self.num,
        }
    }

    /// One-line summary of shape, timing and sizes
    pub fn info(&self) -> String {
        self.to_string()
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Free the payload and zero every field, shape included
    ///
    /// Calling it again is a no-op.
    pub fn destroy(&mut self) {
        *self = Stream::default();
    }

    /// Free the payload but keep `dim`, `byte`, `kind` and sample rate
    pub fn reset(&mut self) {
        self.buffer.release();
        self.num = 0;
        self.num_real = 0;
        self.time = 0.0;
    }

    /// Set the logical sample count
    ///
    /// Within `num_real` only the logical size changes, without touching any
    /// byte. Past it, storage is reallocated to exactly `new_num` samples and
    /// the old logical bytes are copied over.
    pub fn adjust(&mut self, new_num: usize) -> AdjustOutcome {
        if new_num == self.num {
            return AdjustOutcome::Unchanged;
        }
        let tot = Limits::stream_bytes(new_num, self.dim, self.byte)
            .unwrap_or_else(|e| panic!("stream allocation failed: {}", e));
        self.buffer.resize(tot);
        self.num = new_num;
        if new_num <= self.num_real {
            AdjustOutcome::InPlace
        } else {
            self.num_real = new_num;
            AdjustOutcome::Reallocated
        }
    }

    /// Zero every logical byte
    pub fn zero_fill(&mut self) {
        self.buffer.fill_zero();
    }

    /// Whether `other` has the same element width, dimension and kind
    ///
    /// Sample count and sample rate are not compared.
    pub fn compare_shape(&self, other: &Stream) -> bool {
        self.byte == other.byte && self.dim == other.dim && self.kind == other.kind
    }

    // =========================================================================
    // Typed access
    // =========================================================================

    fn require_scalar(&self) -> Result<ScalarKind> {
        self.kind.scalar().ok_or(Error::UnsupportedKind(self.kind))
    }

    fn offset(&self, sample: usize, dim: usize) -> usize {
        assert!(
            sample < self.num && dim < self.dim,
            "element ({}, {}) outside {}x{} stream",
            sample,
            dim,
            self.num,
            self.dim
        );
        (sample * self.dim + dim) * self.byte
    }

    /// Decoded value at `(sample, dim)`
    ///
    /// # Panics
    ///
    /// Panics if the position lies outside the logical extent.
    pub fn value(&self, sample: usize, dim: usize) -> Result<ScalarValue> {
        let kind = self.require_scalar()?;
        let at = self.offset(sample, dim);
        Ok(ScalarValue::read(kind, &self.data()[at..]))
    }

    /// Value at `(sample, dim)` cast to `T`
    pub fn get<T: Scalar>(&self, sample: usize, dim: usize) -> Result<T> {
        self.value(sample, dim).map(T::from_value)
    }

    /// Store `value` at `(sample, dim)`, cast to the stream's kind
    pub fn set<T: Scalar>(&mut self, sample: usize, dim: usize, value: T) -> Result<()> {
        let kind = self.require_scalar()?;
        let at = self.offset(sample, dim);
        value
            .into_value()
            .cast(kind)
            .write(&mut self.buffer.as_mut_slice()[at..]);
        Ok(())
    }

    /// All logical values, sample by sample
    ///
    /// # Errors
    ///
    /// `PayloadType` if the stream is not of `T`'s kind.
    pub fn values<T: Scalar>(&self) -> Result<Vec<T>> {
        if self.kind != DataType::Scalar(T::KIND) {
            return Err(Error::PayloadType {
                expected: T::KIND.name(),
                actual: self.kind.name(),
            });
        }
        Ok(self
            .data()
            .chunks_exact(T::KIND.byte_width())
            .map(T::read)
            .collect())
    }

    // =========================================================================
    // Rendering
    // =========================================================================

    /// Write one line per sample, values joined by `options.delimiter`
    ///
    /// # Errors
    ///
    /// `UnsupportedKind` for opaque streams, `Io` on write failure.
    pub fn print<W: Write>(&self, out: &mut W, options: &FormatOptions) -> Result<()> {
        self.require_scalar()?;
        let rows = options.max_rows.map_or(self.num, |max| max.min(self.num));
        for i in 0..rows {
            let line = format_array(
                self.kind,
                self.sample_bytes(i),
                options.precision,
                &options.delimiter,
            )?;
            writeln!(out, "{}", line)?;
        }
        Ok(())
    }

    /// Render a single value
    pub fn format_value(&self, sample: usize, dim: usize, precision: Option<usize>) -> Result<String> {
        let at = self.offset(sample, dim);
        format_value(self.kind, &self.data()[at..], precision)
    }
}

impl PartialEq for Stream {
    /// Equal shape, timing and logical bytes; spare capacity is ignored
    fn eq(&self, other: &Self) -> bool {
        self.num == other.num
            && self.dim == other.dim
            && self.byte == other.byte
            && self.kind == other.kind
            && self.sr == other.sr
            && self.time == other.time
            && self.data() == other.data()
    }
}

impl fmt::Debug for Stream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stream")
            .field("num", &self.num)
            .field("num_real", &self.num_real)
            .field("dim", &self.dim)
            .field("byte", &self.byte)
            .field("kind", &self.kind)
            .field("sr", &self.sr)
            .field("time", &self.time)
            .finish()
    }
}

impl fmt::Display for Stream {
    /// One-line summary of shape and timing
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "stream<{}> num={}/{} dim={} byte={} sr={}Hz time={:.3}s tot={}/{}",
            self.kind,
            self.num,
            self.num_real,
            self.dim,
            self.byte,
            self.sr,
            self.time,
            self.tot(),
            self.tot_real()
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
