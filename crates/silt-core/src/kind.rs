//! The element-kind table: slot kinds and their byte widths.

/// The kind of value stored in one slot of a typed buffer.
///
/// The set is closed: buffer code matches exhaustively, so an unknown
/// kind is unrepresentable rather than a runtime error. `Raw` is the
/// byte-blob kind used to back arrays of arbitrary fixed-size records;
/// its logical stride is chosen by the caller, not by this table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// Opaque bytes; one slot is one byte.
    Raw,
    /// A boolean stored as a 4-byte word.
    Logical,
    /// A 32-bit signed integer.
    Int,
    /// A 64-bit IEEE float.
    Double,
}

impl ElementKind {
    /// Canonical width of one slot of this kind, in bytes.
    pub fn byte_width(&self) -> usize {
        match self {
            Self::Raw => 1,
            Self::Logical => 4,
            Self::Int => 4,
            Self::Double => 8,
        }
    }

    /// One-byte encoding used by the on-heap metadata descriptor.
    pub fn tag(&self) -> u8 {
        match self {
            Self::Raw => 0,
            Self::Logical => 1,
            Self::Int => 2,
            Self::Double => 3,
        }
    }

    /// Decode a descriptor tag back into a kind.
    ///
    /// Returns `None` for tags that do not name a kind — descriptor
    /// readers treat that as a malformed metadata block.
    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0 => Some(Self::Raw),
            1 => Some(Self::Logical),
            2 => Some(Self::Int),
            3 => Some(Self::Double),
            _ => None,
        }
    }
}
