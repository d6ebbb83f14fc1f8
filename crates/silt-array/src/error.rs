//! Array-specific error types.

use std::error::Error;
use std::fmt;

use silt_core::ElementKind;
use silt_heap::HeapError;

/// Errors that can occur during dynamic array operations.
///
/// These are surfaced at the point of detection. After a
/// [`CapacityOverflow`](Self::CapacityOverflow) the array's bookkeeping may
/// be mid-update and the array must not be used again; every other variant
/// leaves the array untouched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArrayError {
    /// A capacity or byte-size computation overflowed `usize`.
    ///
    /// Capacities and record sizes are caller-controlled inputs that flow
    /// into allocation sizes, so the multiplication is always checked and
    /// never allowed to wrap.
    CapacityOverflow {
        /// The capacity being scaled.
        capacity: usize,
        /// The factor it was multiplied by (growth factor or record size).
        multiplier: usize,
    },
    /// A pushed element's byte length does not match the array's stride.
    ElementSizeMismatch {
        /// The array's element byte size.
        expected: usize,
        /// Length of the supplied element.
        actual: usize,
    },
    /// A typed accessor was used on an array of a different kind.
    KindMismatch {
        /// The kind the accessor requires.
        expected: ElementKind,
        /// The array's actual kind.
        found: ElementKind,
    },
    /// Growth factor below the minimum of 2.
    InvalidGrowthFactor {
        /// The rejected factor.
        factor: usize,
    },
    /// Record byte size of zero requested for a raw-record array.
    InvalidRecordSize,
    /// A metadata descriptor could not be decoded.
    BadDescriptor {
        /// Description of the defect.
        reason: String,
    },
    /// An underlying heap operation failed.
    Heap(HeapError),
}

impl fmt::Display for ArrayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CapacityOverflow {
                capacity,
                multiplier,
            } => {
                write!(
                    f,
                    "capacity overflow: {capacity} * {multiplier} exceeds usize"
                )
            }
            Self::ElementSizeMismatch { expected, actual } => {
                write!(
                    f,
                    "element size mismatch: array stride is {expected} bytes, got {actual}"
                )
            }
            Self::KindMismatch { expected, found } => {
                write!(
                    f,
                    "element kind mismatch: expected {expected:?}, found {found:?}"
                )
            }
            Self::InvalidGrowthFactor { factor } => {
                write!(f, "growth factor must be at least 2 (got {factor})")
            }
            Self::InvalidRecordSize => write!(f, "record byte size must be at least 1"),
            Self::BadDescriptor { reason } => write!(f, "bad array descriptor: {reason}"),
            Self::Heap(err) => write!(f, "heap operation failed: {err}"),
        }
    }
}

impl Error for ArrayError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Heap(err) => Some(err),
            _ => None,
        }
    }
}

impl From<HeapError> for ArrayError {
    fn from(err: HeapError) -> Self {
        Self::Heap(err)
    }
}
