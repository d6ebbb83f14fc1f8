//! Heap-specific error types.

use std::error::Error;
use std::fmt;

/// Errors that can occur during heap operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HeapError {
    /// A requested buffer size overflowed when scaled to bytes.
    CapacityOverflow {
        /// Number of logical slots requested.
        len: usize,
        /// Byte width of one slot.
        width: usize,
    },
    /// An operation was applied to a block of the wrong shape
    /// (e.g. byte access on a list block).
    KindMismatch {
        /// The block shape the operation requires.
        expected: &'static str,
        /// The shape of the block it was applied to.
        found: &'static str,
    },
    /// A list slot index past the end of the block.
    SlotOutOfRange {
        /// The requested slot index.
        index: usize,
        /// Number of slots in the block.
        slots: usize,
    },
}

impl fmt::Display for HeapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapacityOverflow { len, width } => {
                write!(
                    f,
                    "buffer size overflow: {len} slots of {width} bytes exceeds usize"
                )
            }
            Self::KindMismatch { expected, found } => {
                write!(f, "block kind mismatch: expected {expected}, found {found}")
            }
            Self::SlotOutOfRange { index, slots } => {
                write!(f, "slot index {index} out of range for {slots}-slot block")
            }
        }
    }
}

impl Error for HeapError {}
