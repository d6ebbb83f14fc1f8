//! The allocator front-end.

use std::cell::Cell;
use std::rc::Rc;

use silt_core::ElementKind;

use crate::block::{BlockData, BlockRef};
use crate::error::HeapError;

/// Cumulative allocation counters.
struct HeapCounters {
    blocks: Cell<u64>,
    bytes: Cell<u64>,
}

/// Allocator front-end for the value heap.
///
/// `Heap` is a cheap-clone handle; clones share the same counters, so a
/// component can hold its own copy and every allocation is still visible
/// in one place. All buffers are zero-initialized on allocation. Counters
/// are cumulative — they count what was ever allocated, not what is live
/// (liveness is the reference counts' business).
///
/// Out-of-memory is not modelled as a recoverable error: a failed `Vec`
/// allocation aborts the process through the global allocator, matching
/// the host-runtime contract that allocation failure is fatal.
#[derive(Clone)]
pub struct Heap {
    counters: Rc<HeapCounters>,
}

impl Heap {
    /// Create a heap with zeroed counters.
    pub fn new() -> Self {
        Self {
            counters: Rc::new(HeapCounters {
                blocks: Cell::new(0),
                bytes: Cell::new(0),
            }),
        }
    }

    fn record(&self, bytes: usize) {
        self.counters.blocks.set(self.counters.blocks.get() + 1);
        self.counters
            .bytes
            .set(self.counters.bytes.get() + bytes as u64);
    }

    /// Allocate a zero-filled raw block of `len` bytes.
    pub fn new_raw(&self, len: usize) -> BlockRef {
        self.record(len);
        BlockRef::from_data(BlockData::Raw(vec![0; len]))
    }

    /// Allocate a zero-filled typed vector of `len` logical slots.
    ///
    /// The backing buffer is `len * kind.byte_width()` bytes; the
    /// multiplication is checked and overflow is
    /// [`HeapError::CapacityOverflow`].
    pub fn new_vector(&self, kind: ElementKind, len: usize) -> Result<BlockRef, HeapError> {
        let width = kind.byte_width();
        let byte_len = len
            .checked_mul(width)
            .ok_or(HeapError::CapacityOverflow { len, width })?;
        self.record(byte_len);
        Ok(BlockRef::from_data(BlockData::Vector {
            kind,
            data: vec![0; byte_len],
        }))
    }

    /// Allocate a list block with `slots` empty reference slots.
    pub fn new_list(&self, slots: usize) -> BlockRef {
        self.record(slots.saturating_mul(std::mem::size_of::<Option<BlockRef>>()));
        BlockRef::from_data(BlockData::List(vec![None; slots]))
    }

    /// Reallocate a typed vector to `new_len` logical slots.
    ///
    /// Realloc-style contract: a fresh zero-initialized buffer of the same
    /// kind is allocated and the first `min(old_len, new_len)` slots are
    /// copied. The old block is untouched — it becomes collectible once the
    /// last handle to it drops. Applying this to a non-vector block is
    /// [`HeapError::KindMismatch`].
    pub fn resize_vector(&self, old: &BlockRef, new_len: usize) -> Result<BlockRef, HeapError> {
        let kind = old.vector_kind().ok_or(HeapError::KindMismatch {
            expected: "vector",
            found: "raw or list",
        })?;
        let resized = self.new_vector(kind, new_len)?;
        {
            let src = old.bytes()?;
            let mut dst = resized.bytes_mut()?;
            let copy = src.len().min(dst.len());
            dst[..copy].copy_from_slice(&src[..copy]);
        }
        Ok(resized)
    }

    /// Number of blocks ever allocated through this heap.
    pub fn blocks_allocated(&self) -> u64 {
        self.counters.blocks.get()
    }

    /// Number of payload bytes ever allocated through this heap.
    pub fn bytes_allocated(&self) -> u64 {
        self.counters.bytes.get()
    }
}

impl Default for Heap {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vectors_are_zero_initialized() {
        let heap = Heap::new();
        let v = heap.new_vector(ElementKind::Double, 8).unwrap();
        let bytes = v.bytes().unwrap();
        assert_eq!(bytes.len(), 64);
        assert!(bytes.iter().all(|&b| b == 0));
    }

    #[test]
    fn vector_size_overflow_is_an_error() {
        let heap = Heap::new();
        let result = heap.new_vector(ElementKind::Double, usize::MAX / 2);
        assert!(matches!(
            result.map(|_| ()),
            Err(HeapError::CapacityOverflow { .. })
        ));
    }

    #[test]
    fn resize_preserves_prefix_and_zero_fills_the_rest() {
        let heap = Heap::new();
        let v = heap.new_vector(ElementKind::Int, 2).unwrap();
        v.bytes_mut().unwrap().copy_from_slice(&[1, 2, 3, 4, 5, 6, 7, 8]);

        let grown = heap.resize_vector(&v, 4).unwrap();
        let bytes = grown.bytes().unwrap();
        assert_eq!(&bytes[..8], &[1, 2, 3, 4, 5, 6, 7, 8]);
        assert!(bytes[8..].iter().all(|&b| b == 0));

        // Shrink keeps only the leading slots.
        let shrunk = heap.resize_vector(&v, 1).unwrap();
        assert_eq!(&shrunk.bytes().unwrap()[..], &[1, 2, 3, 4]);
    }

    #[test]
    fn resize_allocates_a_distinct_block() {
        let heap = Heap::new();
        let v = heap.new_vector(ElementKind::Raw, 4).unwrap();
        let resized = heap.resize_vector(&v, 4).unwrap();
        assert!(!resized.same_identity(&v));
        assert_eq!(resized.vector_kind(), Some(ElementKind::Raw));
    }

    #[test]
    fn resize_of_a_raw_block_is_kind_mismatch() {
        let heap = Heap::new();
        let raw = heap.new_raw(16);
        assert!(matches!(
            heap.resize_vector(&raw, 4).map(|_| ()),
            Err(HeapError::KindMismatch { .. })
        ));
    }

    #[test]
    fn counters_accumulate_across_clones() {
        let heap = Heap::new();
        let alias = heap.clone();
        heap.new_raw(10);
        alias.new_vector(ElementKind::Int, 4).unwrap();
        assert_eq!(heap.blocks_allocated(), 2);
        assert_eq!(heap.bytes_allocated(), 10 + 16);
    }

    #[test]
    fn zero_length_allocations_are_valid() {
        let heap = Heap::new();
        let v = heap.new_vector(ElementKind::Raw, 0).unwrap();
        assert_eq!(v.byte_len().unwrap(), 0);
        let l = heap.new_list(0);
        assert_eq!(l.slot_count().unwrap(), 0);
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn resize_preserves_the_common_prefix(
                contents in prop::collection::vec(any::<u8>(), 0..64),
                new_len in 0usize..128,
            ) {
                let heap = Heap::new();
                let v = heap.new_vector(ElementKind::Raw, contents.len()).unwrap();
                v.bytes_mut().unwrap().copy_from_slice(&contents);

                let resized = heap.resize_vector(&v, new_len).unwrap();
                let bytes = resized.bytes().unwrap();
                prop_assert_eq!(bytes.len(), new_len);

                let common = contents.len().min(new_len);
                prop_assert_eq!(&bytes[..common], &contents[..common]);
                prop_assert!(bytes[common..].iter().all(|&b| b == 0));
            }
        }
    }
}
