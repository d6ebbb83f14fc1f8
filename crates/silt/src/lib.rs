//! Silt: growable typed buffers over a reference-counted value heap.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the Silt sub-crates. For most users, adding `silt` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use silt::prelude::*;
//!
//! let heap = Heap::new();
//!
//! // An array of 8-byte records with room for two before the first grow.
//! let mut records = DynArray::new_array(&heap, 8, 2).unwrap();
//! for i in 0..3u64 {
//!     records.push_back(Some(&i.to_le_bytes())).unwrap();
//! }
//! assert_eq!(records.len(), 3);
//! assert_eq!(records.capacity(), 4); // doubled once
//!
//! // Typed vectors use the element-kind table for their stride.
//! let mut doubles = DynArray::new_vector(&heap, ElementKind::Double, 0).unwrap();
//! doubles.push_double(2.5).unwrap();
//! assert_eq!(doubles.get_double(0).unwrap(), Some(2.5));
//!
//! // Every array's shelter is tagged for introspection.
//! assert!(is_dyn_array(records.shelter().root()));
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`array`] | `silt-array` | `DynArray`, `Shelter`, descriptor, library hook |
//! | [`heap`] | `silt-heap` | `Heap`, `BlockRef`, heap errors |
//! | [`types`] | `silt-core` | Element kinds, marker IDs, marker registry |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Dynamic arrays, shelters, and the metadata descriptor (`silt-array`).
pub use silt_array as array;

/// The value heap and block handles (`silt-heap`).
pub use silt_heap as heap;

/// Element kinds, marker IDs, and the marker registry (`silt-core`).
pub use silt_core as types;

/// Common imports for typical Silt usage.
///
/// ```rust
/// use silt::prelude::*;
/// ```
pub mod prelude {
    pub use silt_array::{dyn_array_marker, is_dyn_array, ArrayError, DynArray, Shelter};
    pub use silt_core::{ElementKind, MarkerId, TypeMarker};
    pub use silt_heap::{BlockRef, Heap, HeapError};
}
