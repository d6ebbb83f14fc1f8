//! Reference-counted tag-typed value heap for the Silt runtime.
//!
//! This crate plays the role of the host object model that the dynamic
//! array crate integrates with but does not own. Values live in heap
//! blocks behind cheap-clone [`BlockRef`] handles; reachability is
//! reference counting, so a block is released exactly when the last
//! handle to it drops. The [`Heap`] is the allocator front-end: it builds
//! zero-initialized blocks and keeps cumulative allocation counters.
//!
//! # Block shapes
//!
//! - **Raw** — opaque bytes (used for metadata records).
//! - **Vector** — typed scalar storage addressed by its
//!   [`ElementKind`](silt_core::ElementKind) byte width.
//! - **List** — a fixed number of reference slots (used as the two-slot
//!   shelter container by the array crate).
//!
//! Every block additionally carries a small inline list of marker tags so
//! introspection tooling can recognize what a block is without knowing
//! who allocated it.
//!
//! The heap is single-threaded by design; handles are `Rc`-backed and do
//! not cross threads.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod block;
pub mod error;
pub mod heap;

pub use block::BlockRef;
pub use error::HeapError;
pub use heap::Heap;
