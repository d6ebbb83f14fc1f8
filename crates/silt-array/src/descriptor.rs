//! The on-heap metadata descriptor.
//!
//! Every dynamic array writes its bookkeeping through to a raw block held
//! in the shelter's metadata slot, so the array's state is visible to
//! anything that can reach the shelter — not only to the Rust handle. The
//! encoding is a fixed little-endian layout:
//!
//! ```text
//! [0]      element kind tag (ElementKind::tag)
//! [1..9]   elt_byte_size, u64 LE
//! [9..17]  count, u64 LE
//! [17..25] capacity, u64 LE
//! [25..33] growth_factor, u64 LE
//! ```

use silt_core::ElementKind;

use crate::error::ArrayError;

/// Byte length of an encoded descriptor.
pub const ENCODED_LEN: usize = 33;

/// Decoded contents of a dynamic array's metadata block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ArrayDescriptor {
    /// Element kind of the backing buffer.
    pub kind: ElementKind,
    /// Size in bytes of one logical element.
    pub elt_byte_size: u64,
    /// Number of populated elements.
    pub count: u64,
    /// Number of elements the buffer can hold without reallocation.
    pub capacity: u64,
    /// Multiplicative growth factor.
    pub growth_factor: u64,
}

impl ArrayDescriptor {
    /// Encode into the first [`ENCODED_LEN`] bytes of `out`.
    ///
    /// # Panics
    ///
    /// Panics if `out` is shorter than [`ENCODED_LEN`]. The array core
    /// always writes into a metadata block it allocated at exactly this
    /// size.
    pub fn write_to(&self, out: &mut [u8]) {
        out[0] = self.kind.tag();
        out[1..9].copy_from_slice(&self.elt_byte_size.to_le_bytes());
        out[9..17].copy_from_slice(&self.count.to_le_bytes());
        out[17..25].copy_from_slice(&self.capacity.to_le_bytes());
        out[25..33].copy_from_slice(&self.growth_factor.to_le_bytes());
    }

    /// Decode a descriptor from the start of `bytes`.
    pub fn read_from(bytes: &[u8]) -> Result<Self, ArrayError> {
        if bytes.len() < ENCODED_LEN {
            return Err(ArrayError::BadDescriptor {
                reason: format!(
                    "metadata block too short: {} bytes, need {ENCODED_LEN}",
                    bytes.len()
                ),
            });
        }
        let kind = ElementKind::from_tag(bytes[0]).ok_or_else(|| ArrayError::BadDescriptor {
            reason: format!("unknown element kind tag {}", bytes[0]),
        })?;
        Ok(Self {
            kind,
            elt_byte_size: read_u64(&bytes[1..9]),
            count: read_u64(&bytes[9..17]),
            capacity: read_u64(&bytes[17..25]),
            growth_factor: read_u64(&bytes[25..33]),
        })
    }
}

fn read_u64(bytes: &[u8]) -> u64 {
    let mut buf = [0u8; 8];
    buf.copy_from_slice(bytes);
    u64::from_le_bytes(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_the_encoding() {
        let desc = ArrayDescriptor {
            kind: ElementKind::Double,
            elt_byte_size: 8,
            count: 3,
            capacity: 4,
            growth_factor: 2,
        };
        let mut buf = [0u8; ENCODED_LEN];
        desc.write_to(&mut buf);
        assert_eq!(ArrayDescriptor::read_from(&buf).unwrap(), desc);
    }

    #[test]
    fn short_buffer_is_rejected() {
        let err = ArrayDescriptor::read_from(&[0u8; ENCODED_LEN - 1]).unwrap_err();
        assert!(matches!(err, ArrayError::BadDescriptor { .. }));
    }

    #[test]
    fn unknown_kind_tag_is_rejected() {
        let mut buf = [0u8; ENCODED_LEN];
        buf[0] = 0xFF;
        let err = ArrayDescriptor::read_from(&buf).unwrap_err();
        assert!(matches!(err, ArrayError::BadDescriptor { .. }));
    }
}
