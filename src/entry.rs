/*!
The in-store record: a value plus the metadata expiry and eviction policies
need to make their decisions.
*/

use crate::clock::Instant;

/// A stored value together with its per-entry bookkeeping.
///
/// All timestamps are produced by the [`crate::Clock`] in effect for the
/// cache at the moment of the triggering operation; see the `put`/`get`
/// family on [`crate::Cache`] for exactly which fields each operation
/// touches.
#[derive(Clone, Debug)]
pub struct Entry<V> {
    pub(crate) value: V,
    pub(crate) metadata: EntryMetadata,
}

impl<V> Entry<V> {
    pub(crate) fn new(value: V, metadata: EntryMetadata) -> Entry<V> {
        Entry { value, metadata }
    }

    /// The stored value.
    pub fn value(&self) -> &V {
        &self.value
    }

    /// The entry's metadata, independent of its value.
    pub fn metadata(&self) -> &EntryMetadata {
        &self.metadata
    }

    /// Whether this entry is live at `now`, i.e. not yet past its
    /// `expiry_time`.
    pub fn is_live_at(&self, now: Instant) -> bool {
        self.metadata.expiry_time > now
    }

    pub(crate) fn into_value(self) -> V {
        self.value
    }
}

/// Metadata tracked per entry, independent of the value itself.
///
/// This is what samplers and eviction policies see: candidates are ranked on
/// metadata alone, never on the value.
#[derive(Clone, Copy, Debug)]
pub struct EntryMetadata {
    pub(crate) creation_time: Instant,
    pub(crate) access_time: Instant,
    pub(crate) update_time: Instant,
    pub(crate) hit_count: u64,
    pub(crate) expiry_time: Instant,
}

impl EntryMetadata {
    /// The instant this entry was first created for its key. Never updated
    /// while the entry lives; reset only when the key is re-created after
    /// removal, eviction, or expiry.
    pub fn creation_time(&self) -> Instant {
        self.creation_time
    }

    /// The instant of the most recent successful read.
    pub fn access_time(&self) -> Instant {
        self.access_time
    }

    /// The instant the value was last replaced.
    pub fn update_time(&self) -> Instant {
        self.update_time
    }

    /// Number of successful reads since creation. Never decremented.
    pub fn hit_count(&self) -> u64 {
        self.hit_count
    }

    /// The absolute instant at which this entry stops being live.
    pub fn expiry_time(&self) -> Instant {
        self.expiry_time
    }
}
