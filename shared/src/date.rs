//! Time types.
//!
//! `Timestamp` is a serializable millisecond timestamp used for transport
//! and for expiry comparisons. Reading the current time is a platform
//! concern and lives with the caller (the frontend uses `js_sys::Date`).

use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};
use std::time::Duration;

/// Millisecond timestamp since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct Timestamp(i64);

impl Timestamp {
    #[inline]
    pub const fn new(ms: i64) -> Self {
        Self(ms)
    }

    /// Build from unix seconds (JWT `exp` granularity). Saturates instead
    /// of overflowing, so an absurdly large expiry stays far in the future.
    #[inline]
    pub const fn from_secs(secs: i64) -> Self {
        Self(secs.saturating_mul(1000))
    }

    #[inline]
    pub const fn as_millis(&self) -> i64 {
        self.0
    }

    #[inline]
    pub const fn as_secs(&self) -> i64 {
        self.0 / 1000
    }
}

impl From<i64> for Timestamp {
    fn from(ms: i64) -> Self {
        Self(ms)
    }
}

impl From<Timestamp> for i64 {
    fn from(ts: Timestamp) -> Self {
        ts.0
    }
}

impl Add<Duration> for Timestamp {
    type Output = Self;

    fn add(self, rhs: Duration) -> Self::Output {
        Self(self.0 + rhs.as_millis() as i64)
    }
}

impl Sub<Timestamp> for Timestamp {
    type Output = Duration;

    /// Difference between two timestamps, clamped at zero.
    fn sub(self, rhs: Timestamp) -> Self::Output {
        let diff_ms = (self.0 - rhs.0).max(0);
        Duration::from_millis(diff_ms as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_secs_scales_to_millis() {
        assert_eq!(Timestamp::from_secs(2).as_millis(), 2000);
        assert_eq!(Timestamp::from_secs(2).as_secs(), 2);
    }

    #[test]
    fn from_secs_saturates_instead_of_wrapping() {
        assert_eq!(Timestamp::from_secs(i64::MAX).as_millis(), i64::MAX);
        assert_eq!(Timestamp::from_secs(i64::MIN).as_millis(), i64::MIN);
        assert!(Timestamp::from_secs(i64::MAX) > Timestamp::new(0));
    }

    #[test]
    fn ordering_follows_time() {
        assert!(Timestamp::new(1000) < Timestamp::new(2000));
        assert_eq!(
            Timestamp::new(3000) - Timestamp::new(1000),
            Duration::from_secs(2)
        );
    }
}
