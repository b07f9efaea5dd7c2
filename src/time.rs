//! Time abstraction so the playback scheduler runs on any timer.

/// A clock the scheduler can read.
pub trait TimeSource<I: TimeInstant> {
    /// Returns the current time instant.
    fn now(&self) -> I;
}

/// A span of time with millisecond resolution.
pub trait TimeDuration: Copy + PartialEq {
    /// Zero duration constant.
    const ZERO: Self;

    fn as_millis(&self) -> u64;

    fn from_millis(millis: u64) -> Self;

    /// Subtraction that stops at [`TimeDuration::ZERO`].
    fn saturating_sub(self, other: Self) -> Self;
}

/// A point in time on a [`TimeSource`]'s clock.
pub trait TimeInstant: Copy {
    /// Duration type for this instant.
    type Duration: TimeDuration;

    /// Time elapsed since `earlier`, which must not be in the future.
    fn duration_since(&self, earlier: Self) -> Self::Duration;

    /// Adds duration to instant, returns None on overflow.
    fn checked_add(self, duration: Self::Duration) -> Option<Self>;
}
