//! Strongly-typed identifiers.

use std::fmt;

/// Identifies a registered type marker.
///
/// Marker IDs are allocated from a monotonic process-wide counter via
/// [`TypeMarker::register`](crate::marker::TypeMarker::register). Two
/// distinct registrations always receive different IDs, so a tag carried
/// by a heap block unambiguously names one marker for the lifetime of
/// the process.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MarkerId(pub u32);

impl fmt::Display for MarkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for MarkerId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}
