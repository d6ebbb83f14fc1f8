//! The growable dynamic array.

use std::cell::Ref;
use std::fmt;

use silt_core::ElementKind;
use silt_heap::{BlockRef, Heap};

use crate::descriptor::{ArrayDescriptor, ENCODED_LEN};
use crate::error::ArrayError;
use crate::lifecycle::dyn_array_marker;
use crate::shelter::Shelter;

/// Growth factor applied when an append outgrows the current buffer.
pub const DEFAULT_GROWTH_FACTOR: usize = 2;

/// A growable, type-homogeneous buffer with amortized O(1) append.
///
/// A `DynArray` stores either a typed scalar vector (one slot per logical
/// element) or a raw byte blob interpreted with a caller-chosen stride,
/// which is how arrays of arbitrary fixed-size records are backed. The
/// backing buffer and the array's metadata block live on the value heap
/// under a [`Shelter`], so anything that can reach the shelter can inspect
/// the array; the shelter is tagged with the process-wide dynamic array
/// marker at construction.
///
/// The handle caches a reference to the current backing buffer. Every
/// resize swaps the buffer and refreshes the cache; a buffer handle
/// obtained from [`DynArray::data`] before a mutation refers to the old
/// storage afterwards.
pub struct DynArray {
    heap: Heap,
    kind: ElementKind,
    /// Size in bytes of one logical element. Constant after creation.
    elt_byte_size: usize,
    count: usize,
    capacity: usize,
    growth_factor: usize,
    /// Cached view of the current backing buffer. Refreshed on every swap.
    data: BlockRef,
    shelter: Shelter,
}

impl DynArray {
    /// Create a typed vector of the given kind with the default growth
    /// factor.
    ///
    /// The element byte size is the kind's canonical slot width; the
    /// initial buffer holds `capacity` zero-filled slots and `count`
    /// starts at 0.
    pub fn new_vector(
        heap: &Heap,
        kind: ElementKind,
        capacity: usize,
    ) -> Result<Self, ArrayError> {
        Self::new_vector_with_factor(heap, kind, capacity, DEFAULT_GROWTH_FACTOR)
    }

    /// Create a typed vector with an explicit growth factor.
    ///
    /// The factor is fixed for the array's lifetime and must be at
    /// least 2.
    pub fn new_vector_with_factor(
        heap: &Heap,
        kind: ElementKind,
        capacity: usize,
        growth_factor: usize,
    ) -> Result<Self, ArrayError> {
        if growth_factor < 2 {
            return Err(ArrayError::InvalidGrowthFactor {
                factor: growth_factor,
            });
        }
        Self::build(heap, kind, kind.byte_width(), capacity, growth_factor)
    }

    /// Create an array of fixed-size records packed into a raw buffer.
    ///
    /// The records are opaque to the heap: the buffer is a raw-kind vector
    /// of `capacity * elt_byte_size` bytes and the array addresses it with
    /// a logical stride of `elt_byte_size`. A record size of zero is
    /// rejected.
    pub fn new_array(
        heap: &Heap,
        elt_byte_size: usize,
        capacity: usize,
    ) -> Result<Self, ArrayError> {
        if elt_byte_size == 0 {
            return Err(ArrayError::InvalidRecordSize);
        }
        Self::build(
            heap,
            ElementKind::Raw,
            elt_byte_size,
            capacity,
            DEFAULT_GROWTH_FACTOR,
        )
    }

    fn build(
        heap: &Heap,
        kind: ElementKind,
        elt_byte_size: usize,
        capacity: usize,
        growth_factor: usize,
    ) -> Result<Self, ArrayError> {
        let len = buffer_len(kind, elt_byte_size, capacity)?;
        let data = heap.new_vector(kind, len)?;
        let metadata = heap.new_raw(ENCODED_LEN);
        let shelter = Shelter::new(heap, metadata, data.clone())?;
        shelter.tag(dyn_array_marker().id());

        let array = Self {
            heap: heap.clone(),
            kind,
            elt_byte_size,
            count: 0,
            capacity,
            growth_factor,
            data,
            shelter,
        };
        array.write_descriptor();
        Ok(array)
    }

    /// Append one element.
    ///
    /// `Some(bytes)` copies exactly [`elt_byte_size`](Self::elt_byte_size)
    /// bytes into the new slot; the stored element is a copy, so later
    /// mutation of the source does not affect it. `None` zero-fills the
    /// slot, which is how callers reserve a default-valued element without
    /// supplying data.
    ///
    /// When the append outgrows the buffer, capacity is multiplied by the
    /// growth factor first (a zero-capacity array grows straight to one
    /// slot), giving O(1) amortized cost over any push sequence. On
    /// [`ArrayError::CapacityOverflow`] the array's bookkeeping is
    /// mid-update and the array must not be used again.
    pub fn push_back(&mut self, elt: Option<&[u8]>) -> Result<(), ArrayError> {
        if let Some(bytes) = elt {
            if bytes.len() != self.elt_byte_size {
                return Err(ArrayError::ElementSizeMismatch {
                    expected: self.elt_byte_size,
                    actual: bytes.len(),
                });
            }
        }

        self.count += 1;
        if self.count > self.capacity {
            let grown = self
                .capacity
                .checked_mul(self.growth_factor)
                .ok_or(ArrayError::CapacityOverflow {
                    capacity: self.capacity,
                    multiplier: self.growth_factor,
                })?
                .max(self.count);
            self.resize(grown)?;
        } else {
            self.write_descriptor();
        }

        let start = (self.count - 1) * self.elt_byte_size;
        let mut data = self.data.bytes_mut()?;
        let slot = &mut data[start..start + self.elt_byte_size];
        match elt {
            Some(bytes) => slot.copy_from_slice(bytes),
            None => slot.fill(0),
        }
        Ok(())
    }

    /// Resize the backing buffer to hold `new_capacity` logical elements.
    ///
    /// Realloc-style contract: a fresh buffer is swapped into the shelter
    /// with the first `min(count, new_capacity)` elements' bytes
    /// preserved. Shrinking below the current count silently truncates —
    /// the clamped elements are gone, by design, not by error. Valid for
    /// shrink, grow, and `new_capacity == capacity` (which only swaps the
    /// buffer and refreshes the cached view).
    pub fn resize(&mut self, new_capacity: usize) -> Result<(), ArrayError> {
        let len = buffer_len(self.kind, self.elt_byte_size, new_capacity)?;
        let fresh = self.heap.resize_vector(&self.data, len)?;
        drop(self.shelter.replace_data(fresh.clone()));
        self.data = fresh;
        self.count = self.count.min(new_capacity);
        self.capacity = new_capacity;
        self.write_descriptor();
        Ok(())
    }

    /// Bytes of the last element, or `None` when the array is empty.
    ///
    /// The borrow ends when the returned guard drops; the next mutating
    /// operation may swap the buffer out from under any longer-lived view,
    /// which is why one cannot be held across it.
    pub fn back(&self) -> Option<Ref<'_, [u8]>> {
        self.count.checked_sub(1).and_then(|index| self.get(index))
    }

    /// Bytes of the element at `index`, or `None` past the count.
    pub fn get(&self, index: usize) -> Option<Ref<'_, [u8]>> {
        if index >= self.count {
            return None;
        }
        let start = index * self.elt_byte_size;
        let bytes = self.data.bytes().ok()?;
        Some(Ref::map(bytes, |b| &b[start..start + self.elt_byte_size]))
    }

    /// Append a double to a [`Double`](ElementKind::Double) vector.
    pub fn push_double(&mut self, value: f64) -> Result<(), ArrayError> {
        self.check_kind(ElementKind::Double)?;
        self.push_back(Some(&value.to_le_bytes()))
    }

    /// Read a double back, or `None` past the count.
    pub fn get_double(&self, index: usize) -> Result<Option<f64>, ArrayError> {
        self.check_kind(ElementKind::Double)?;
        Ok(self.get(index).map(|bytes| {
            let mut buf = [0u8; 8];
            buf.copy_from_slice(&bytes);
            f64::from_le_bytes(buf)
        }))
    }

    /// Append an integer to an [`Int`](ElementKind::Int) vector.
    pub fn push_int(&mut self, value: i32) -> Result<(), ArrayError> {
        self.check_kind(ElementKind::Int)?;
        self.push_back(Some(&value.to_le_bytes()))
    }

    /// Read an integer back, or `None` past the count.
    pub fn get_int(&self, index: usize) -> Result<Option<i32>, ArrayError> {
        self.check_kind(ElementKind::Int)?;
        Ok(self.get(index).map(|bytes| {
            let mut buf = [0u8; 4];
            buf.copy_from_slice(&bytes);
            i32::from_le_bytes(buf)
        }))
    }

    /// Append a logical to a [`Logical`](ElementKind::Logical) vector.
    pub fn push_logical(&mut self, value: bool) -> Result<(), ArrayError> {
        self.check_kind(ElementKind::Logical)?;
        self.push_back(Some(&u32::from(value).to_le_bytes()))
    }

    /// Read a logical back, or `None` past the count. Any non-zero word
    /// reads as `true`.
    pub fn get_logical(&self, index: usize) -> Result<Option<bool>, ArrayError> {
        self.check_kind(ElementKind::Logical)?;
        Ok(self.get(index).map(|bytes| bytes.iter().any(|&b| b != 0)))
    }

    fn check_kind(&self, expected: ElementKind) -> Result<(), ArrayError> {
        if self.kind != expected {
            return Err(ArrayError::KindMismatch {
                expected,
                found: self.kind,
            });
        }
        Ok(())
    }

    /// Element kind of the backing buffer.
    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    /// Size in bytes of one logical element.
    pub fn elt_byte_size(&self) -> usize {
        self.elt_byte_size
    }

    /// Number of populated elements.
    pub fn len(&self) -> usize {
        self.count
    }

    /// Whether the array holds no elements.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Number of elements the buffer can hold without reallocation.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The growth factor fixed at creation.
    pub fn growth_factor(&self) -> usize {
        self.growth_factor
    }

    /// Handle to the current backing buffer.
    ///
    /// The handle is a snapshot of the current storage: after the next
    /// `push_back` or `resize` it may refer to a buffer the array no
    /// longer uses.
    pub fn data(&self) -> BlockRef {
        self.data.clone()
    }

    /// The shelter holding the metadata block and backing buffer.
    pub fn shelter(&self) -> &Shelter {
        &self.shelter
    }

    /// Bytes of backing storage currently allocated.
    pub fn memory_bytes(&self) -> usize {
        // Validated non-overflowing when the buffer was allocated.
        self.capacity * self.elt_byte_size
    }

    fn write_descriptor(&self) {
        let descriptor = ArrayDescriptor {
            kind: self.kind,
            elt_byte_size: self.elt_byte_size as u64,
            count: self.count as u64,
            capacity: self.capacity as u64,
            growth_factor: self.growth_factor as u64,
        };
        let metadata = self.shelter.metadata();
        let mut bytes = metadata
            .bytes_mut()
            .expect("metadata block is a raw block");
        descriptor.write_to(&mut bytes);
    }
}

impl fmt::Debug for DynArray {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynArray")
            .field("kind", &self.kind)
            .field("elt_byte_size", &self.elt_byte_size)
            .field("count", &self.count)
            .field("capacity", &self.capacity)
            .field("growth_factor", &self.growth_factor)
            .finish()
    }
}

/// Buffer length in heap slots for a given logical capacity.
///
/// Raw-record arrays pack `elt_byte_size` bytes per logical element into a
/// one-byte-slot buffer; typed vectors use one slot per element.
fn buffer_len(
    kind: ElementKind,
    elt_byte_size: usize,
    capacity: usize,
) -> Result<usize, ArrayError> {
    match kind {
        ElementKind::Raw => {
            capacity
                .checked_mul(elt_byte_size)
                .ok_or(ArrayError::CapacityOverflow {
                    capacity,
                    multiplier: elt_byte_size,
                })
        }
        _ => Ok(capacity),
    }
}
