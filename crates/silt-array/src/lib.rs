//! Growable type-homogeneous buffers sheltered on the Silt value heap.
//!
//! A [`DynArray`] is a growable buffer with amortized O(1) append that
//! stores either typed scalar slots or raw fixed-size records. Its
//! metadata block and backing buffer live on the `silt-heap` runtime
//! under a two-slot [`Shelter`]; a resize swaps the buffer slot, so
//! storage can move without the array's on-heap identity changing.
//!
//! # Architecture
//!
//! ```text
//! DynArray (caller handle, cached buffer view)
//! └── Shelter (two-slot list block, tagged "silt_dyn_array")
//!     ├── slot 0: metadata block (encoded ArrayDescriptor)
//!     └── slot 1: backing buffer (swapped on resize)
//! ```
//!
//! The marker tag is registered once per process through the library
//! hook in [`lifecycle`]; [`is_dyn_array`] lets tooling recognize any
//! shelter built here.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod descriptor;
pub mod dynarray;
pub mod error;
pub mod lifecycle;
pub mod shelter;

pub use descriptor::ArrayDescriptor;
pub use dynarray::{DynArray, DEFAULT_GROWTH_FACTOR};
pub use error::ArrayError;
pub use lifecycle::{dyn_array_marker, is_dyn_array};
pub use shelter::Shelter;
