//! The shelter: shared lifetime for metadata and backing storage.
//!
//! A [`Shelter`] is the two-slot container that ties a dynamic array's
//! metadata block and its current backing buffer together. Under a tracing
//! collector this container would be what keeps both reachable from the
//! roots; here the shelter simply owns the container, and reference
//! counting does the rest. The swap contract is the same either way:
//! replacing the data slot is how a resize publishes a new buffer without
//! disturbing the metadata block's identity.

use silt_core::MarkerId;
use silt_heap::{BlockRef, Heap};

use crate::error::ArrayError;

/// Slot index of the metadata block.
pub const METADATA_SLOT: usize = 0;
/// Slot index of the backing buffer.
pub const DATA_SLOT: usize = 1;

/// Owns the two-slot container holding a dynamic array's metadata block
/// and backing buffer.
///
/// The two referents share one lifetime: both are released when the
/// shelter (and any outstanding handles cloned from its slots) drop.
pub struct Shelter {
    cell: BlockRef,
}

impl Shelter {
    /// Build a shelter over an existing metadata block and initial buffer.
    ///
    /// Construction is all-or-nothing: the caller's handles keep both
    /// blocks alive until the container holds them, so there is no window
    /// in which either could be lost mid-construction.
    pub fn new(heap: &Heap, metadata: BlockRef, data: BlockRef) -> Result<Self, ArrayError> {
        let cell = heap.new_list(2);
        cell.set_slot(METADATA_SLOT, Some(metadata))?;
        cell.set_slot(DATA_SLOT, Some(data))?;
        Ok(Self { cell })
    }

    /// The metadata block.
    pub fn metadata(&self) -> BlockRef {
        self.cell
            .slot(METADATA_SLOT)
            .expect("shelter cell is a two-slot list")
            .expect("metadata slot is populated for the shelter's lifetime")
    }

    /// The current backing buffer.
    pub fn data(&self) -> BlockRef {
        self.cell
            .slot(DATA_SLOT)
            .expect("shelter cell is a two-slot list")
            .expect("data slot is populated for the shelter's lifetime")
    }

    /// Swap in a new backing buffer, returning the old one.
    ///
    /// The new buffer is reachable through the shelter immediately; the
    /// old buffer becomes collectible once the caller drops the returned
    /// handle (and any other clones of it).
    pub fn replace_data(&self, data: BlockRef) -> BlockRef {
        self.cell
            .set_slot(DATA_SLOT, Some(data))
            .expect("shelter cell is a two-slot list")
            .expect("data slot is populated for the shelter's lifetime")
    }

    /// Attach a marker tag to the container.
    pub fn tag(&self, marker: MarkerId) {
        self.cell.tag(marker);
    }

    /// The container block itself, for introspection tooling.
    pub fn root(&self) -> &BlockRef {
        &self.cell
    }
}
