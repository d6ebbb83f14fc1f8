//! Heap blocks and the [`BlockRef`] handle.

use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

use smallvec::SmallVec;

use silt_core::{ElementKind, MarkerId};

use crate::error::HeapError;

/// Payload of a heap block.
pub(crate) enum BlockData {
    /// Opaque bytes.
    Raw(Vec<u8>),
    /// Typed scalar storage; addressed in units of `kind.byte_width()`.
    Vector {
        /// Slot kind of the vector.
        kind: ElementKind,
        /// Backing bytes, `len * kind.byte_width()` long.
        data: Vec<u8>,
    },
    /// A fixed number of reference slots.
    List(Vec<Option<BlockRef>>),
}

impl BlockData {
    fn shape_name(&self) -> &'static str {
        match self {
            Self::Raw(_) => "raw",
            Self::Vector { .. } => "vector",
            Self::List(_) => "list",
        }
    }
}

pub(crate) struct Block {
    pub(crate) data: BlockData,
    /// Marker tags attached to this block. Almost always zero or one.
    pub(crate) tags: SmallVec<[MarkerId; 1]>,
}

/// Cheap-clone handle to a heap block.
///
/// Cloning a `BlockRef` shares the underlying block; the block is released
/// when the last handle drops. Handles are single-threaded (`Rc`-backed)
/// and never cross threads.
#[derive(Clone)]
pub struct BlockRef {
    inner: Rc<RefCell<Block>>,
}

impl BlockRef {
    pub(crate) fn from_data(data: BlockData) -> Self {
        Self {
            inner: Rc::new(RefCell::new(Block {
                data,
                tags: SmallVec::new(),
            })),
        }
    }

    /// Whether two handles refer to the same heap block.
    ///
    /// This is identity, not value equality: two raw blocks with equal
    /// bytes are still distinct.
    pub fn same_identity(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    /// Attach a marker tag to this block.
    ///
    /// Tagging is idempotent: attaching a marker the block already
    /// carries is a no-op.
    pub fn tag(&self, marker: MarkerId) {
        let mut block = self.inner.borrow_mut();
        if !block.tags.contains(&marker) {
            block.tags.push(marker);
        }
    }

    /// Whether this block carries the given marker tag.
    pub fn has_tag(&self, marker: MarkerId) -> bool {
        self.inner.borrow().tags.contains(&marker)
    }

    /// Slot kind, for vector blocks.
    pub fn vector_kind(&self) -> Option<ElementKind> {
        match &self.inner.borrow().data {
            BlockData::Vector { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// Length of the backing bytes of a raw or vector block.
    pub fn byte_len(&self) -> Result<usize, HeapError> {
        let block = self.inner.borrow();
        match &block.data {
            BlockData::Raw(bytes) | BlockData::Vector { data: bytes, .. } => Ok(bytes.len()),
            BlockData::List(_) => Err(HeapError::KindMismatch {
                expected: "raw or vector",
                found: block.data.shape_name(),
            }),
        }
    }

    /// Borrow the backing bytes of a raw or vector block.
    ///
    /// The borrow is released when the returned guard drops; holding it
    /// across a mutating heap operation on the same block will panic, the
    /// single-threaded analogue of a data race.
    pub fn bytes(&self) -> Result<Ref<'_, [u8]>, HeapError> {
        let block = self.inner.borrow();
        Ref::filter_map(block, |b| match &b.data {
            BlockData::Raw(bytes) | BlockData::Vector { data: bytes, .. } => {
                Some(bytes.as_slice())
            }
            BlockData::List(_) => None,
        })
        .map_err(|block| HeapError::KindMismatch {
            expected: "raw or vector",
            found: block.data.shape_name(),
        })
    }

    /// Mutably borrow the backing bytes of a raw or vector block.
    pub fn bytes_mut(&self) -> Result<RefMut<'_, [u8]>, HeapError> {
        let block = self.inner.borrow_mut();
        RefMut::filter_map(block, |b| match &mut b.data {
            BlockData::Raw(bytes) | BlockData::Vector { data: bytes, .. } => {
                Some(bytes.as_mut_slice())
            }
            BlockData::List(_) => None,
        })
        .map_err(|block| HeapError::KindMismatch {
            expected: "raw or vector",
            found: block.data.shape_name(),
        })
    }

    /// Number of reference slots of a list block.
    pub fn slot_count(&self) -> Result<usize, HeapError> {
        let block = self.inner.borrow();
        match &block.data {
            BlockData::List(slots) => Ok(slots.len()),
            _ => Err(HeapError::KindMismatch {
                expected: "list",
                found: block.data.shape_name(),
            }),
        }
    }

    /// Read a reference slot of a list block.
    pub fn slot(&self, index: usize) -> Result<Option<BlockRef>, HeapError> {
        let block = self.inner.borrow();
        match &block.data {
            BlockData::List(slots) => slots
                .get(index)
                .cloned()
                .ok_or(HeapError::SlotOutOfRange {
                    index,
                    slots: slots.len(),
                }),
            _ => Err(HeapError::KindMismatch {
                expected: "list",
                found: block.data.shape_name(),
            }),
        }
    }

    /// Replace a reference slot of a list block, returning the previous
    /// referent.
    ///
    /// This is the swap mechanism: storing a new block makes it reachable
    /// through the list immediately, and the old referent becomes
    /// collectible once the caller drops the returned handle.
    pub fn set_slot(
        &self,
        index: usize,
        value: Option<BlockRef>,
    ) -> Result<Option<BlockRef>, HeapError> {
        let mut block = self.inner.borrow_mut();
        match &mut block.data {
            BlockData::List(slots) => {
                let len = slots.len();
                let slot = slots
                    .get_mut(index)
                    .ok_or(HeapError::SlotOutOfRange { index, slots: len })?;
                Ok(std::mem::replace(slot, value))
            }
            _ => Err(HeapError::KindMismatch {
                expected: "list",
                found: block.data.shape_name(),
            }),
        }
    }
}

impl fmt::Debug for BlockRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let block = self.inner.borrow();
        let mut dbg = f.debug_struct("BlockRef");
        dbg.field("shape", &block.data.shape_name());
        match &block.data {
            BlockData::Raw(bytes) => {
                dbg.field("byte_len", &bytes.len());
            }
            BlockData::Vector { kind, data } => {
                dbg.field("kind", kind);
                dbg.field("byte_len", &data.len());
            }
            BlockData::List(slots) => {
                dbg.field("slots", &slots.len());
            }
        }
        if !block.tags.is_empty() {
            dbg.field("tags", &block.tags.as_slice());
        }
        dbg.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(len: usize) -> BlockRef {
        BlockRef::from_data(BlockData::Raw(vec![0; len]))
    }

    fn list(slots: usize) -> BlockRef {
        BlockRef::from_data(BlockData::List(vec![None; slots]))
    }

    #[test]
    fn identity_distinguishes_equal_blocks() {
        let a = raw(4);
        let b = raw(4);
        assert!(!a.same_identity(&b));
        assert!(a.same_identity(&a.clone()));
    }

    #[test]
    fn tagging_is_idempotent_and_queryable() {
        let block = raw(1);
        let marker = MarkerId(7);
        assert!(!block.has_tag(marker));
        block.tag(marker);
        block.tag(marker);
        assert!(block.has_tag(marker));
        assert!(!block.has_tag(MarkerId(8)));
    }

    #[test]
    fn byte_access_on_list_is_kind_mismatch() {
        let block = list(2);
        assert!(matches!(
            block.bytes().map(|_| ()),
            Err(HeapError::KindMismatch { .. })
        ));
        assert!(matches!(
            block.byte_len(),
            Err(HeapError::KindMismatch { .. })
        ));
    }

    #[test]
    fn slot_access_on_raw_is_kind_mismatch() {
        let block = raw(4);
        assert!(matches!(
            block.slot(0),
            Err(HeapError::KindMismatch { .. })
        ));
    }

    #[test]
    fn set_slot_returns_previous_referent() {
        let cell = list(2);
        let first = raw(4);
        let second = raw(8);

        assert!(cell.set_slot(1, Some(first.clone())).unwrap().is_none());
        let evicted = cell.set_slot(1, Some(second.clone())).unwrap().unwrap();
        assert!(evicted.same_identity(&first));

        let current = cell.slot(1).unwrap().unwrap();
        assert!(current.same_identity(&second));
    }

    #[test]
    fn slot_index_past_the_end_is_rejected() {
        let cell = list(2);
        assert_eq!(
            cell.slot(2).map(|_| ()),
            Err(HeapError::SlotOutOfRange { index: 2, slots: 2 })
        );
        assert!(matches!(
            cell.set_slot(5, None),
            Err(HeapError::SlotOutOfRange { index: 5, slots: 2 })
        ));
    }

    #[test]
    fn bytes_mut_writes_are_visible_through_other_handles() {
        let block = raw(4);
        let alias = block.clone();
        block.bytes_mut().unwrap()[2] = 0xAB;
        assert_eq!(alias.bytes().unwrap()[2], 0xAB);
    }
}
