//! Owned byte buffer with separate logical and allocated sizes
//!
//! `ByteBuffer` is the storage behind streams and events. It tracks two
//! sizes:
//! - `len`: logical bytes visible to readers (`tot`)
//! - `capacity`: bytes actually allocated (`tot_real`)
//!
//! ## Resize Policy
//!
//! | Request | Effect |
//! |---------|--------|
//! | `new_len <= capacity` | only `len` moves, no bytes touched |
//! | `new_len > capacity` | exact-size allocation, old logical bytes copied |
//!
//! Shrinking never clears: bytes past `len` keep their values and become
//! visible again when the buffer grows back within its capacity. Repeated
//! shrink/grow cycles under a previously reached size cost no allocation.

use tracing::debug;

/// Owned, exactly-sized allocation with a logical length
#[derive(Default)]
pub struct ByteBuffer {
    data: Box<[u8]>,
    len: usize,
}

impl ByteBuffer {
    /// Empty buffer, no allocation
    pub fn new() -> Self {
        Self::default()
    }

    /// Zero-filled buffer with `len == capacity == size`
    pub fn zeroed(size: usize) -> Self {
        Self {
            data: vec![0u8; size].into_boxed_slice(),
            len: size,
        }
    }

    /// Buffer holding a copy of `bytes`, sized exactly
    pub fn from_slice(bytes: &[u8]) -> Self {
        Self {
            data: bytes.to_vec().into_boxed_slice(),
            len: bytes.len(),
        }
    }

    /// Logical size in bytes
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the logical size is zero
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Allocated size in bytes
    #[inline]
    pub fn capacity(&self) -> usize {
        self.data.len()
    }

    /// Whether storage is allocated
    #[inline]
    pub fn is_allocated(&self) -> bool {
        !self.data.is_empty()
    }

    /// Logical bytes
    #[inline]
    pub fn as_slice(&self) -> &[u8] {
        &self.data[..self.len]
    }

    /// Logical bytes, mutable
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.data[..self.len]
    }

    /// Every allocated byte, including the slack past `len`
    #[inline]
    pub fn allocated(&self) -> &[u8] {
        &self.data
    }

    /// Address of the allocation, for identity checks
    #[inline]
    pub fn as_ptr(&self) -> *const u8 {
        self.data.as_ptr()
    }

    /// Change the logical size
    ///
    /// Returns `true` if a reallocation happened.
    pub fn resize(&mut self, new_len: usize) -> bool {
        if new_len <= self.data.len() {
            self.len = new_len;
            return false;
        }
        debug!(
            from = self.data.len(),
            to = new_len,
            "byte buffer reallocating"
        );
        let mut grown = vec![0u8; new_len].into_boxed_slice();
        grown[..self.len].copy_from_slice(&self.data[..self.len]);
        self.data = grown;
        self.len = new_len;
        true
    }

    /// Append `bytes` after the logical end
    ///
    /// Appends in place when capacity allows, otherwise allocates storage
    /// sized exactly to the new total. Returns `true` on reallocation.
    pub fn extend_from_slice(&mut self, bytes: &[u8]) -> bool {
        let start = self.len;
        let reallocated = self.resize(start + bytes.len());
        self.data[start..self.len].copy_from_slice(bytes);
        reallocated
    }

    /// Release storage and set both sizes to zero
    pub fn release(&mut self) {
        self.data = Box::default();
        self.len = 0;
    }

    /// Zero the logical bytes
    pub fn fill_zero(&mut self) {
        self.as_mut_slice().fill(0);
    }
}

impl Clone for ByteBuffer {
    /// Deep copy of the whole allocation, slack included
    fn clone(&self) -> Self {
        Self {
            data: self.data.clone(),
            len: self.len,
        }
    }
}

impl std::fmt::Debug for ByteBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ByteBuffer")
            .field("len", &self.len)
            .field("capacity", &self.data.len())
            .finish()
    }
}

impl PartialEq for ByteBuffer {
    /// Logical content equality; slack is ignored
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}
