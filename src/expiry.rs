/*!
Policies that compute how long an entry stays live.

Each policy is a pure function of the triggering event; it never looks at
the entry's value or its other metadata. The engine calls one of the three
methods at the corresponding event and, if it returns `Some(duration)` (or,
for [`ExpiryPolicy::on_created`], always), recomputes
`expiry_time = event_instant + duration`. `None` from `on_accessed` or
`on_modified` means "leave `expiry_time` exactly as it is" — the Rust
rendering of what the distilled spec calls a sentinel "no change" duration.
*/

use std::fmt;
use std::time::Duration;

/// Computes per-entry time-to-live at the three events the engine tracks:
/// creation, access, and modification.
pub trait ExpiryPolicy: fmt::Debug + Send + Sync {
    /// TTL to apply when an entry is created. Always applied.
    fn on_created(&self) -> Duration;

    /// TTL to apply when an entry is read. `None` means the existing
    /// `expiry_time` is left untouched.
    fn on_accessed(&self) -> Option<Duration>;

    /// TTL to apply when an entry's value is replaced in place. `None` means
    /// the existing `expiry_time` is left untouched.
    fn on_modified(&self) -> Option<Duration>;
}

/// Entries never expire.
///
/// Represented with `Duration::MAX`; combined with [`crate::clock::Instant`]'s
/// saturating arithmetic, this can never overflow into a live-seeming wrap
/// around.
#[derive(Debug, Default, Clone, Copy)]
pub struct Eternal;

impl ExpiryPolicy for Eternal {
    fn on_created(&self) -> Duration {
        Duration::MAX
    }
    fn on_accessed(&self) -> Option<Duration> {
        None
    }
    fn on_modified(&self) -> Option<Duration> {
        None
    }
}

/// TTL counted from creation only; reads and in-place modifications never
/// extend it.
#[derive(Debug, Clone, Copy)]
pub struct Created {
    create_ttl: Duration,
}

impl Created {
    /// Creates a policy with the given creation TTL.
    pub fn new(create_ttl: Duration) -> Created {
        Created { create_ttl }
    }
}

impl ExpiryPolicy for Created {
    fn on_created(&self) -> Duration {
        self.create_ttl
    }
    fn on_accessed(&self) -> Option<Duration> {
        None
    }
    fn on_modified(&self) -> Option<Duration> {
        None
    }
}

/// TTL that refreshes on every read ("sliding expiration" / idle timeout).
/// In-place modifications do not refresh it.
#[derive(Debug, Clone, Copy)]
pub struct Accessed {
    ttl: Duration,
}

impl Accessed {
    /// Creates a policy with the given TTL.
    pub fn new(ttl: Duration) -> Accessed {
        Accessed { ttl }
    }
}

impl ExpiryPolicy for Accessed {
    fn on_created(&self) -> Duration {
        self.ttl
    }
    fn on_accessed(&self) -> Option<Duration> {
        Some(self.ttl)
    }
    fn on_modified(&self) -> Option<Duration> {
        None
    }
}

/// TTL that refreshes only when the value is replaced in place. Reads do
/// not refresh it.
#[derive(Debug, Clone, Copy)]
pub struct Modified {
    ttl: Duration,
}

impl Modified {
    /// Creates a policy with the given TTL.
    pub fn new(ttl: Duration) -> Modified {
        Modified { ttl }
    }
}

impl ExpiryPolicy for Modified {
    fn on_created(&self) -> Duration {
        self.ttl
    }
    fn on_accessed(&self) -> Option<Duration> {
        None
    }
    fn on_modified(&self) -> Option<Duration> {
        Some(self.ttl)
    }
}

/// TTL that refreshes on both reads and in-place modifications.
#[derive(Debug, Clone, Copy)]
pub struct Touched {
    ttl: Duration,
}

impl Touched {
    /// Creates a policy with the given TTL.
    pub fn new(ttl: Duration) -> Touched {
        Touched { ttl }
    }
}

impl ExpiryPolicy for Touched {
    fn on_created(&self) -> Duration {
        self.ttl
    }
    fn on_accessed(&self) -> Option<Duration> {
        Some(self.ttl)
    }
    fn on_modified(&self) -> Option<Duration> {
        Some(self.ttl)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eternal_never_changes_on_access_or_modify() {
        let p = Eternal;
        assert_eq!(p.on_created(), Duration::MAX);
        assert_eq!(p.on_accessed(), None);
        assert_eq!(p.on_modified(), None);
    }

    #[test]
    fn created_only_applies_at_creation() {
        let p = Created::new(Duration::from_secs(30));
        assert_eq!(p.on_created(), Duration::from_secs(30));
        assert_eq!(p.on_accessed(), None);
        assert_eq!(p.on_modified(), None);
    }

    #[test]
    fn accessed_refreshes_on_read_only() {
        let p = Accessed::new(Duration::from_secs(60));
        assert_eq!(p.on_created(), Duration::from_secs(60));
        assert_eq!(p.on_accessed(), Some(Duration::from_secs(60)));
        assert_eq!(p.on_modified(), None);
    }

    #[test]
    fn modified_refreshes_on_write_only() {
        let p = Modified::new(Duration::from_secs(60));
        assert_eq!(p.on_created(), Duration::from_secs(60));
        assert_eq!(p.on_accessed(), None);
        assert_eq!(p.on_modified(), Some(Duration::from_secs(60)));
    }

    #[test]
    fn touched_refreshes_on_both() {
        let p = Touched::new(Duration::from_secs(60));
        assert_eq!(p.on_created(), Duration::from_secs(60));
        assert_eq!(p.on_accessed(), Some(Duration::from_secs(60)));
        assert_eq!(p.on_modified(), Some(Duration::from_secs(60)));
    }
}
