//! One-time library initialization.
//!
//! The dynamic array marker is the process-wide identity tag attached to
//! every shelter this crate builds. It is created at most once, on first
//! use, and lives for the process lifetime — strictly longer than any
//! array instance.

use std::sync::OnceLock;

use silt_core::TypeMarker;
use silt_heap::BlockRef;

static DYN_ARRAY_MARKER: OnceLock<TypeMarker> = OnceLock::new();

/// The process-wide marker that tags dynamic array shelters.
///
/// The first call registers the marker; later calls return the same
/// registration. Array construction calls this, so explicit
/// initialization is optional — call it eagerly only when tooling needs
/// the marker registered before the first array exists.
pub fn dyn_array_marker() -> &'static TypeMarker {
    DYN_ARRAY_MARKER.get_or_init(|| TypeMarker::register("silt_dyn_array"))
}

/// Whether a heap block is the shelter of a dynamic array.
///
/// This is the recognition hook for external tooling: any block that
/// carries the dynamic array marker was built by
/// [`DynArray`](crate::DynArray) construction.
pub fn is_dyn_array(block: &BlockRef) -> bool {
    block.has_tag(dyn_array_marker().id())
}
