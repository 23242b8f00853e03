//! Slot generation for bookable pickup times.
//!
//! This module lives in `core` (zero internal deps) so that the engine, the
//! configuration path, and operational tooling all share the same slot
//! arithmetic and defaults.

use chrono::{NaiveTime, Timelike};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Slot shape defaults
// ---------------------------------------------------------------------------

/// Default slot length in minutes. Checkout's lock re-validation and any
/// caller that does not customise the slot shape use this value.
pub const DEFAULT_SLOT_DURATION_MINS: i64 = 30;

/// Default spacing between candidate start times, in minutes.
pub const DEFAULT_SLOT_INTERVAL_MINS: i64 = 30;

/// Hard cap on a single availability query's date range, in days.
pub const MAX_RANGE_DAYS: i64 = 366;

// ---------------------------------------------------------------------------
// Validation helpers
// ---------------------------------------------------------------------------

/// Returns an error unless `day_of_week` is in `0..=6` (0 = Sunday).
pub fn validate_day_of_week(day_of_week: i16) -> Result<(), CoreError> {
    if (0..=6).contains(&day_of_week) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "day_of_week must be between 0 and 6, got {day_of_week}"
        )))
    }
}

/// Returns an error unless `start_time` is strictly before `end_time`.
pub fn validate_time_window(start_time: NaiveTime, end_time: NaiveTime) -> Result<(), CoreError> {
    if start_time < end_time {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "start_time {start_time} must be before end_time {end_time}"
        )))
    }
}

/// Returns an error unless both slot-shape parameters are positive.
pub fn validate_slot_shape(duration_mins: i64, interval_mins: i64) -> Result<(), CoreError> {
    if duration_mins <= 0 {
        return Err(CoreError::Validation(format!(
            "slot duration must be positive, got {duration_mins}"
        )));
    }
    if interval_mins <= 0 {
        return Err(CoreError::Validation(format!(
            "slot interval must be positive, got {interval_mins}"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Slot generation
// ---------------------------------------------------------------------------

/// Generate the ordered candidate start times inside one day's open window.
///
/// Produces every `t = start_time + k * interval_mins` (integer k >= 0) with
/// `t + duration_mins <= end_time`. A slot that would run past `end_time` is
/// dropped, never wrapped into the next day. Returns an empty vec when the
/// window is too short for a single slot.
pub fn generate_slots(
    start_time: NaiveTime,
    end_time: NaiveTime,
    duration_mins: i64,
    interval_mins: i64,
) -> Result<Vec<NaiveTime>, CoreError> {
    validate_slot_shape(duration_mins, interval_mins)?;

    // Arithmetic happens in whole minutes from midnight; times carry no
    // date, so the loop bound alone keeps slots inside the day.
    let start = i64::from(start_time.num_seconds_from_midnight()) / 60;
    let end = i64::from(end_time.num_seconds_from_midnight()) / 60;

    let mut slots = Vec::new();
    let mut t = start;
    while t + duration_mins <= end {
        match NaiveTime::from_hms_opt((t / 60) as u32, (t % 60) as u32, 0) {
            Some(time) => slots.push(time),
            None => {
                return Err(CoreError::Internal(format!(
                    "slot arithmetic produced an out-of-range minute offset: {t}"
                )))
            }
        }
        t += interval_mins;
    }
    Ok(slots)
}
