//! Injectable wall-clock time source.
//!
//! Cutoff decisions compare against the business's local wall clock, so
//! tests need to pin "now" without sleeping. Lock-expiry comparisons are
//! *not* routed through this trait: those happen against the database
//! clock inside the SQL statements themselves, keeping the conditional
//! lock write atomic.

use chrono::NaiveDateTime;

/// Source of the current business-local wall-clock time.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

/// Production clock: the host's local time.
///
/// Businesses and the servers that host them share a region; times are
/// interpreted as local wall clock with no timezone conversion.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        chrono::Local::now().naive_local()
    }
}

/// Fixed clock for deterministic cutoff tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}
