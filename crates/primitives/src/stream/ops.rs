//! Stream transformations: append, sub-range copy, dimension selection and
//! type conversion
//!
//! Every operation here yields storage owned by its result; nothing returns
//! a view into the source.

use super::{AdjustOutcome, Stream};
use ssi_core::{convert, ByteBuffer, Error, Result, ScalarKind};
use tracing::warn;

impl Stream {
    /// Append the logical samples of `addition` after this stream's end
    ///
    /// Appends in place when the allocation already covers the new total,
    /// otherwise reallocates to exactly the new total.
    ///
    /// Only `dim` and `byte` must match. Sample rate and kind of `addition`
    /// are not checked, so segments with a drifted nominal rate can still be
    /// joined; the result keeps this stream's rate and kind.
    ///
    /// # Errors
    ///
    /// `ShapeMismatch` if `dim` or `byte` differ; `self` is untouched.
    pub fn concatenate(&mut self, addition: &Stream) -> Result<AdjustOutcome> {
        if self.dim != addition.dim || self.byte != addition.byte {
            warn!(
                dim = self.dim,
                byte = self.byte,
                other_dim = addition.dim,
                other_byte = addition.byte,
                "concatenate rejected: shape mismatch"
            );
            return Err(Error::shape_mismatch(
                (self.dim, self.byte),
                (addition.dim, addition.byte),
            ));
        }
        if addition.num == 0 {
            return Ok(AdjustOutcome::Unchanged);
        }
        let reallocated = self.buffer.extend_from_slice(addition.data());
        self.num += addition.num;
        if self.num > self.num_real {
            self.num_real = self.num;
        }
        Ok(if reallocated {
            AdjustOutcome::Reallocated
        } else {
            AdjustOutcome::InPlace
        })
    }

    /// Copy samples `[from, to)` into a new, exactly sized stream
    ///
    /// The copy's timestamp is shifted by `from / sr` when the stream is
    /// periodic, so it still marks its own first sample.
    ///
    /// # Errors
    ///
    /// `InvalidRange` unless `from <= to <= num`.
    pub fn copy_range(&self, from: usize, to: usize) -> Result<Stream> {
        if from > to || to > self.num {
            return Err(Error::InvalidRange {
                from,
                to,
                num: self.num,
            });
        }
        let size = self.sample_size();
        let num = to - from;
        let time = if self.sr > 0.0 {
            self.time + from as f64 / self.sr
        } else {
            self.time
        };
        Ok(Stream {
            num,
            num_real: num,
            dim: self.dim,
            byte: self.byte,
            kind: self.kind,
            sr: self.sr,
            time,
            buffer: ByteBuffer::from_slice(&self.data()[from * size..to * size]),
        })
    }

    /// Gather a subset or permutation of dimensions into a new stream
    ///
    /// With `repeat_group == 0` the result has `dims.len()` dimensions and
    /// row `i` is `[in[i][dims[0]], in[i][dims[1]], ...]`. With
    /// `repeat_group > 0` the source is read as `dim / repeat_group` stacked
    /// blocks of `repeat_group` channels and the same selection is applied
    /// to every block, giving `dims.len() * blocks` dimensions.
    ///
    /// Indices past the last dimension are clamped to it, not rejected.
    /// Works on opaque kinds too, since elements are moved as raw bytes.
    ///
    /// # Errors
    ///
    /// `InvalidData` if the source has no dimensions or `repeat_group`
    /// exceeds `dim`.
    pub fn select_dimensions(&self, dims: &[usize], repeat_group: usize) -> Result<Stream> {
        if self.dim == 0 {
            return Err(Error::InvalidData(
                "cannot select dimensions of a stream with dim 0".to_string(),
            ));
        }
        let blocks = if repeat_group == 0 {
            1
        } else if repeat_group > self.dim {
            return Err(Error::InvalidData(format!(
                "repeat group {} exceeds dim {}",
                repeat_group, self.dim
            )));
        } else {
            self.dim / repeat_group
        };

        let last = self.dim - 1;
        let sources: Vec<usize> = (0..blocks)
            .flat_map(|block| {
                dims.iter()
                    .map(move |&d| (block * repeat_group + d).min(last))
            })
            .collect();

        let mut out = Stream::new(
            self.num,
            sources.len(),
            self.byte,
            self.kind,
            self.sr,
            self.time,
        );
        let byte = self.byte;
        let in_size = self.sample_size();
        let out_size = out.sample_size();
        if out_size == 0 {
            return Ok(out);
        }
        let src = self.data();
        for (i, row) in out.data_mut().chunks_exact_mut(out_size).enumerate() {
            let base = i * in_size;
            for (j, &d) in sources.iter().enumerate() {
                let at = base + d * byte;
                row[j * byte..(j + 1) * byte].copy_from_slice(&src[at..at + byte]);
            }
        }
        Ok(out)
    }

    /// Convert this stream's values into `dest`'s kind
    ///
    /// `dest` is adjusted to `num` samples (per the adjust policy) and takes
    /// over this stream's timestamp and sample rate.
    ///
    /// # Errors
    ///
    /// - `UnsupportedKind` if either side is opaque
    /// - `ShapeMismatch` if the dimensions differ
    ///
    /// `dest` is untouched on error.
    pub fn convert_type(&self, dest: &mut Stream) -> Result<()> {
        for kind in [self.kind, dest.kind] {
            if kind.is_opaque() {
                warn!(
                    from = %self.kind,
                    to = %dest.kind,
                    "type conversion rejected: opaque kind"
                );
                return Err(Error::UnsupportedKind(kind));
            }
        }
        if self.dim != dest.dim {
            return Err(Error::shape_mismatch(
                (dest.dim, dest.byte),
                (self.dim, self.byte),
            ));
        }
        dest.adjust(self.num);
        convert(
            self.kind,
            dest.kind,
            self.num * self.dim,
            self.data(),
            dest.data_mut(),
        )?;
        dest.sr = self.sr;
        dest.time = self.time;
        Ok(())
    }

    /// New stream holding this stream's values converted to `kind`
    pub fn converted(&self, kind: ScalarKind) -> Result<Stream> {
        let mut dest = Stream::new(0, self.dim, kind.byte_width(), kind.into(), self.sr, self.time);
        self.convert_type(&mut dest)?;
        Ok(dest)
    }
}
