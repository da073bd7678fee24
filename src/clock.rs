/*!
Monotonic time source, abstracted so that tests can pin and fast-forward
"now" to arbitrary instants.

`std::time::Instant` can't be constructed from an arbitrary value or
advanced by hand, so this module defines its own [`Instant`]: a newtype over
[`Duration`] measured from a clock-defined origin. Arithmetic on it never
overflows or panics; it saturates at [`Instant::MAX`], which every expiry
policy uses to represent "never".
*/

use std::fmt;
use std::time::{Duration, Instant as StdInstant};

use once_cell::sync::Lazy;

/// A point in time, relative to a clock-defined origin.
///
/// Ordered, addable with [`Duration`], and cheap to copy. Two `Instant`s
/// produced by different [`Clock`] implementations are not comparable in any
/// meaningful sense; the engine only ever compares instants drawn from the
/// same clock.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Instant(Duration);

impl Instant {
    /// Sentinel representing "never expires".
    pub const MAX: Instant = Instant(Duration::MAX);

    /// The zero instant of whichever clock produced it.
    pub const ZERO: Instant = Instant(Duration::ZERO);

    /// Constructs an `Instant` directly from an offset. Exposed for clock
    /// implementors; callers should otherwise only obtain instants from a
    /// [`Clock`].
    pub const fn from_offset(offset: Duration) -> Instant {
        Instant(offset)
    }

    /// The offset since this clock's origin.
    pub const fn offset(&self) -> Duration {
        self.0
    }

    /// `self + duration`, saturating at [`Instant::MAX`] instead of
    /// overflowing.
    pub fn saturating_add(self, duration: Duration) -> Instant {
        Instant(self.0.saturating_add(duration))
    }

    /// `self - earlier`, or `Duration::ZERO` if `earlier` is later than
    /// `self`.
    pub fn saturating_duration_since(self, earlier: Instant) -> Duration {
        self.0.saturating_sub(earlier.0)
    }
}

impl fmt::Debug for Instant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Instant::MAX {
            write!(f, "Instant(MAX)")
        } else {
            write!(f, "Instant({:?})", self.0)
        }
    }
}

/// Abstract source of monotonic time.
///
/// Injected into [`crate::Cache`] so that expiry semantics can be exercised
/// deterministically in tests, rather than depending on wall-clock sleeps.
pub trait Clock: fmt::Debug + Send + Sync {
    /// The current instant, as seen by this clock.
    fn now(&self) -> Instant;

    /// `duration` from now, saturating rather than overflowing.
    fn from_now(&self, duration: Duration) -> Instant {
        self.now().saturating_add(duration)
    }
}

/// The real wall clock. Anchors its origin to the moment the process first
/// asks it for the time, so [`Instant`] values stay small and comparisons
/// stay cheap.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

static ORIGIN: Lazy<StdInstant> = Lazy::new(StdInstant::now);

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant(ORIGIN.elapsed())
    }
}

/// A clock whose "now" is set entirely by the test driving it.
///
/// Construct with [`ManualClock::new`], then [`ManualClock::advance`] or
/// [`ManualClock::set`] to move time forward.
#[derive(Debug)]
pub struct ManualClock {
    current: parking_lot::Mutex<Instant>,
}

impl ManualClock {
    /// Creates a clock starting at the given instant.
    pub fn new(start: Instant) -> ManualClock {
        ManualClock {
            current: parking_lot::Mutex::new(start),
        }
    }

    /// Creates a clock starting at [`Instant::ZERO`].
    pub fn at_zero() -> ManualClock {
        ManualClock::new(Instant::ZERO)
    }

    /// Moves this clock's "now" forward by `duration`.
    pub fn advance(&self, duration: Duration) {
        let mut current = self.current.lock();
        *current = current.saturating_add(duration);
    }

    /// Pins this clock's "now" to an exact instant.
    pub fn set(&self, instant: Instant) {
        *self.current.lock() = instant;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        *self.current.lock()
    }
}
