//! Element conversion between scalar kinds
//!
//! Every representation change of buffer data funnels through [`convert`].
//! Identical kinds take a raw byte copy (bit-identical), otherwise each
//! element is decoded, cast per [`ScalarValue::cast`] and re-encoded.

use crate::error::{Error, Result};
use crate::types::{DataType, ScalarKind};
use crate::value::ScalarValue;

fn require_scalar(kind: DataType) -> Result<ScalarKind> {
    kind.scalar().ok_or(Error::UnsupportedKind(kind))
}

/// Convert `count` elements of `kind_in` from `src` into `kind_out` in `dst`
///
/// # Errors
///
/// - `UnsupportedKind` if either kind is opaque
/// - `BufferTooSmall` if `src` or `dst` holds fewer than `count` elements
///
/// On error `dst` is untouched.
pub fn convert(
    kind_in: DataType,
    kind_out: DataType,
    count: usize,
    src: &[u8],
    dst: &mut [u8],
) -> Result<()> {
    let scalar_in = require_scalar(kind_in)?;
    let scalar_out = require_scalar(kind_out)?;
    let width_in = scalar_in.byte_width();
    let width_out = scalar_out.byte_width();

    let need_in = count * width_in;
    let need_out = count * width_out;
    if src.len() < need_in {
        return Err(Error::BufferTooSmall {
            needed: need_in,
            available: src.len(),
        });
    }
    if dst.len() < need_out {
        return Err(Error::BufferTooSmall {
            needed: need_out,
            available: dst.len(),
        });
    }

    if scalar_in == scalar_out {
        dst[..need_out].copy_from_slice(&src[..need_in]);
        return Ok(());
    }

    for (s, d) in src[..need_in]
        .chunks_exact(width_in)
        .zip(dst[..need_out].chunks_exact_mut(width_out))
    {
        ScalarValue::read(scalar_in, s).cast(scalar_out).write(d);
    }
    Ok(())
}
