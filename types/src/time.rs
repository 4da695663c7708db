//! Timestamps and transaction validity windows.
//!
//! Timestamps are Unix epoch seconds (UTC), compared against the ledger
//! close time when a transaction is applied.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

/// A Unix timestamp in seconds since epoch (UTC).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(u64);

impl Timestamp {
    /// The epoch (time zero).
    pub const EPOCH: Self = Self(0);

    pub fn new(secs: u64) -> Self {
        Self(secs)
    }

    /// Get the current system time as a `Timestamp`.
    ///
    /// A clock set before the epoch reads as the epoch.
    pub fn now() -> Self {
        let secs = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        Self(secs)
    }

    pub fn as_secs(&self) -> u64 {
        self.0
    }

    pub fn saturating_add(&self, secs: u64) -> Self {
        Self(self.0.saturating_add(secs))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}

/// Validity window of a transaction, inclusive on both ends.
///
/// A bound of zero means "unbounded" on that side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeBounds {
    pub min_time: u64,
    pub max_time: u64,
}

impl TimeBounds {
    pub const UNBOUNDED: Self = Self {
        min_time: 0,
        max_time: 0,
    };

    /// Valid from now on, until `timeout_secs` after `now`.
    pub fn with_timeout(now: Timestamp, timeout_secs: u64) -> Self {
        Self {
            min_time: 0,
            max_time: now.as_secs().saturating_add(timeout_secs),
        }
    }

    pub fn is_too_early(&self, now: Timestamp) -> bool {
        self.min_time != 0 && now.as_secs() < self.min_time
    }

    pub fn is_too_late(&self, now: Timestamp) -> bool {
        self.max_time != 0 && now.as_secs() > self.max_time
    }
}
