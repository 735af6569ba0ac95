//! Cuerda Arena - monotonic bump allocation for DSP state
//!
//! Delay lines and reverb tanks need large sample buffers that must never be
//! reallocated once audio is running. [`Arena`] reserves one region up front
//! and hands out non-overlapping slices from it with a single atomic bump.
//! Nothing is ever freed; the arena lives as long as the engine does.
//!
//! Exhaustion is a configuration error, not a runtime condition: requesting
//! more memory than the arena holds panics before touching any memory.
//!
//! # Example
//!
//! ```rust
//! use cuerda_arena::Arena;
//!
//! let arena = Arena::with_capacity(64 * 1024);
//! let delay_buf = arena.alloc_samples(12_000);
//! assert_eq!(delay_buf.len(), 12_000);
//! assert!(delay_buf.iter().all(|&s| s == 0.0));
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

use alloc::boxed::Box;
use alloc::vec;
use core::cell::UnsafeCell;
use core::mem::{align_of, size_of};
use core::sync::atomic::{AtomicUsize, Ordering};

/// Monotonic bump allocator over a single pre-sized byte region.
///
/// Allocation is a relaxed `fetch_add` on the write offset, so handing out
/// buffers is lock-free and safe from multiple threads. Every allocation
/// reserves `size + align - 1` bytes so the returned pointer can always be
/// aligned up without a second reservation.
pub struct Arena {
    storage: Box<[UnsafeCell<u8>]>,
    offset: AtomicUsize,
}

// Bump disjointness: reserve() hands each caller a byte range no other
// caller can ever receive, so shared access never aliases.
#[allow(unsafe_code)]
unsafe impl Sync for Arena {}

impl Arena {
    /// Create an arena backed by `bytes` of zeroed storage.
    #[must_use]
    pub fn with_capacity(bytes: usize) -> Self {
        let storage = vec![0u8; bytes]
            .into_iter()
            .map(UnsafeCell::new)
            .collect::<Box<[_]>>();
        Self {
            storage,
            offset: AtomicUsize::new(0),
        }
    }

    /// Total size of the backing region in bytes.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    /// Bytes consumed so far, including alignment slack.
    #[must_use]
    pub fn used(&self) -> usize {
        self.offset.load(Ordering::Relaxed).min(self.capacity())
    }

    /// Place `value` in the arena and return a mutable reference to it.
    ///
    /// # Panics
    ///
    /// Panics if the arena cannot hold the value.
    pub fn alloc<T>(&self, value: T) -> &mut T {
        let ptr = self.reserve(size_of::<T>(), align_of::<T>()).cast::<T>();
        // Range is exclusively ours and aligned for T.
        #[allow(unsafe_code)]
        unsafe {
            ptr.write(value);
            &mut *ptr
        }
    }

    /// Carve out a zeroed sample buffer of `len` samples.
    ///
    /// # Panics
    ///
    /// Panics if the arena cannot hold the buffer.
    pub fn alloc_samples(&self, len: usize) -> &mut [f32] {
        let ptr = self
            .reserve(len * size_of::<f32>(), align_of::<f32>())
            .cast::<f32>();
        #[allow(unsafe_code)]
        unsafe {
            ptr.write_bytes(0, len);
            core::slice::from_raw_parts_mut(ptr, len)
        }
    }

    /// Reserve `size` bytes with room to align up, panicking on exhaustion
    /// before any memory is touched.
    fn reserve(&self, size: usize, align: usize) -> *mut u8 {
        let padded = size + align - 1;
        let start = self.offset.fetch_add(padded, Ordering::Relaxed);
        let capacity = self.capacity();
        assert!(
            start <= capacity && padded <= capacity - start,
            "arena exhausted: need {padded} bytes, {avail} of {capacity} remain",
            avail = capacity.saturating_sub(start),
        );
        #[allow(unsafe_code)]
        unsafe {
            let base = self.storage.as_ptr().cast::<u8>().cast_mut();
            let addr = base.add(start);
            let misalign = addr as usize % align;
            let adjust = if misalign == 0 { 0 } else { align - misalign };
            addr.add(adjust)
        }
    }
}

impl core::fmt::Debug for Arena {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Arena")
            .field("capacity", &self.capacity())
            .field("used", &self.used())
            .finish()
    }
}
