//! Core types for the Silt growable-buffer runtime.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! element-kind table used to size buffer slots, marker identifiers, and
//! the process-wide type-marker registry that introspection tooling uses
//! to recognize tagged heap blocks.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod id;
pub mod kind;
pub mod marker;

pub use id::MarkerId;
pub use kind::ElementKind;
pub use marker::{marker_name, registered_markers, TypeMarker};
