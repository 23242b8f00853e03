//! Same-day cutoff policy.
//!
//! Decides whether a candidate pickup date is still bookable given the
//! business's same-day configuration and the current wall-clock time. The
//! slot listing (which skips a whole day) and the standalone same-day
//! pickup query both evaluate through here, so the two paths always agree
//! and the user-visible reason strings are defined once.
//!
//! All times are the business's local wall clock; there is no timezone
//! conversion anywhere in the engine.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;

/// Reason shown when a business has switched same-day pickup off.
pub const REASON_SAME_DAY_DISABLED: &str = "Same-day pickup is not available for this business";

/// Per-business same-day pickup configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SameDayPolicy {
    pub same_day_pickup_allowed: bool,
    /// Wall-clock time after which today can no longer be booked.
    /// `None` means no cutoff.
    pub cutoff_time: Option<NaiveTime>,
}

impl SameDayPolicy {
    /// Policy used when a business has no configuration row: a missing row
    /// must not block pickup for business types that never touch this
    /// feature.
    pub fn fail_open() -> Self {
        Self {
            same_day_pickup_allowed: true,
            cutoff_time: None,
        }
    }
}

/// Outcome of a same-day eligibility check.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SameDayEligibility {
    pub allowed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl SameDayEligibility {
    fn yes() -> Self {
        Self {
            allowed: true,
            reason: None,
        }
    }

    fn no(reason: String) -> Self {
        Self {
            allowed: false,
            reason: Some(reason),
        }
    }
}

/// Reason shown once today's cutoff time has passed.
pub fn cutoff_passed_reason(cutoff: NaiveTime) -> String {
    format!(
        "Same-day pickup closed at {}; the earliest available pickup date is tomorrow",
        cutoff.format("%H:%M")
    )
}

/// Evaluate whether `candidate_date` may still be booked at `now`.
///
/// The cutoff only ever restricts *today*: any other date is eligible
/// regardless of policy. The cutoff boundary is inclusive, so a check at
/// exactly the cutoff time is already too late.
pub fn same_day_eligibility(
    policy: &SameDayPolicy,
    candidate_date: NaiveDate,
    now: NaiveDateTime,
) -> SameDayEligibility {
    if candidate_date != now.date() {
        return SameDayEligibility::yes();
    }
    if !policy.same_day_pickup_allowed {
        return SameDayEligibility::no(REASON_SAME_DAY_DISABLED.to_string());
    }
    if let Some(cutoff) = policy.cutoff_time {
        if now.time() >= cutoff {
            return SameDayEligibility::no(cutoff_passed_reason(cutoff));
        }
    }
    SameDayEligibility::yes()
}
