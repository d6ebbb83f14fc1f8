//! Process-wide type markers.
//!
//! A [`TypeMarker`] is a named identity that library code attaches to heap
//! blocks so external tooling can recognize them (for example, the dynamic
//! array crate tags every shelter it builds). Markers are registered once
//! and live for the process lifetime; the registry preserves registration
//! order so tooling output is deterministic.

use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Mutex, OnceLock};

use indexmap::IndexMap;

use crate::id::MarkerId;

/// Counter for unique [`MarkerId`] allocation.
static MARKER_COUNTER: AtomicU32 = AtomicU32::new(1);

/// Registration-ordered map from marker ID to marker name.
static REGISTRY: OnceLock<Mutex<IndexMap<MarkerId, &'static str>>> = OnceLock::new();

fn registry() -> &'static Mutex<IndexMap<MarkerId, &'static str>> {
    REGISTRY.get_or_init(|| Mutex::new(IndexMap::new()))
}

/// A registered, process-lifetime type identity.
///
/// Markers are durable by construction: registration records the name in a
/// static registry, so a marker's identity outlives every value tagged with
/// it. Copies of a marker compare equal by ID.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TypeMarker {
    id: MarkerId,
    name: &'static str,
}

impl TypeMarker {
    /// Register a new marker under the given name.
    ///
    /// Each call allocates a fresh ID, even for a repeated name — callers
    /// that need exactly one marker per process gate this behind a
    /// `OnceLock` (see the dynamic array crate's library hook).
    pub fn register(name: &'static str) -> Self {
        let id = MarkerId(MARKER_COUNTER.fetch_add(1, Ordering::Relaxed));
        registry()
            .lock()
            .expect("marker registry poisoned")
            .insert(id, name);
        Self { id, name }
    }

    /// The marker's unique ID.
    pub fn id(&self) -> MarkerId {
        self.id
    }

    /// The name the marker was registered under.
    pub fn name(&self) -> &'static str {
        self.name
    }
}

impl fmt::Display for TypeMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.name, self.id)
    }
}

/// Resolve a marker ID recorded on a block back to its registered name.
pub fn marker_name(id: MarkerId) -> Option<&'static str> {
    registry()
        .lock()
        .expect("marker registry poisoned")
        .get(&id)
        .copied()
}

/// All markers registered so far, in registration order.
pub fn registered_markers() -> Vec<(MarkerId, &'static str)> {
    registry()
        .lock()
        .expect("marker registry poisoned")
        .iter()
        .map(|(&id, &name)| (id, name))
        .collect()
}
