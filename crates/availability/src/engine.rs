//! Availability decisions and slot locking.
//!
//! `get_available_slots` is advisory/display-quality: every read may be
//! stale by the instant it reaches the caller. `lock_slot` is the binding
//! path; it re-validates and then lets the store's conditional write decide
//! the race.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::{Datelike, NaiveDate, NaiveTime};
use serde::Serialize;

use bookline_core::cutoff::{same_day_eligibility, SameDayEligibility, SameDayPolicy};
use bookline_core::error::CoreError;
use bookline_core::slots::{
    generate_slots, validate_slot_shape, DEFAULT_SLOT_DURATION_MINS, DEFAULT_SLOT_INTERVAL_MINS,
    MAX_RANGE_DAYS,
};
use bookline_core::types::DbId;
use bookline_db::models::block::AvailabilityBlock;
use bookline_db::models::schedule::WeeklySchedule;
use bookline_db::repositories::{BlockRepo, BusinessRepo, OrderRepo, ScheduleRepo, SlotLockRepo};
use bookline_db::DbPool;

use crate::clock::{Clock, SystemClock};
use crate::error::AvailabilityResult;

/// One bookable start time on a given date.
///
/// Derived fresh on every query and never cached: its correctness depends
/// on the instant it was computed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSlot {
    pub slot_date: NaiveDate,
    pub slot_time: NaiveTime,
    pub available: bool,
}

/// The availability & booking-slot engine.
///
/// Holds a pool and a clock, nothing else; all contention is mediated by
/// the backing store, so any number of engines may serve callers
/// concurrently.
pub struct AvailabilityEngine {
    pool: DbPool,
    clock: Arc<dyn Clock>,
}

impl AvailabilityEngine {
    /// Engine with the production system clock.
    pub fn new(pool: DbPool) -> Self {
        Self::with_clock(pool, Arc::new(SystemClock))
    }

    /// Engine with an injected clock.
    pub fn with_clock(pool: DbPool, clock: Arc<dyn Clock>) -> Self {
        Self { pool, clock }
    }

    /// A business's weekly hours, ordered by day of week ascending.
    pub async fn get_weekly_schedule(
        &self,
        business_id: DbId,
    ) -> AvailabilityResult<Vec<WeeklySchedule>> {
        Ok(ScheduleRepo::list_for_business(&self.pool, business_id).await?)
    }

    /// Compute the bookable slots for every calendar date from `start_date`
    /// to `end_date` inclusive.
    ///
    /// A business with zero weekly schedule rows yields an empty list ("not
    /// configured yet"); callers must distinguish this from "fully
    /// booked", which yields slots all marked unavailable. Dates that fail
    /// the same-day cutoff are omitted from the result entirely rather than
    /// reported as blocked, so "too late to book today" never renders as
    /// "closed today".
    pub async fn get_available_slots(
        &self,
        business_id: DbId,
        start_date: NaiveDate,
        end_date: NaiveDate,
        duration_mins: i64,
        interval_mins: i64,
    ) -> AvailabilityResult<Vec<TimeSlot>> {
        validate_slot_shape(duration_mins, interval_mins)?;
        validate_range(start_date, end_date)?;

        let schedule = ScheduleRepo::list_for_business(&self.pool, business_id).await?;
        if schedule.is_empty() {
            tracing::debug!(business_id, "Business has no weekly schedule configured");
            return Ok(Vec::new());
        }

        let policy = self.policy_for(business_id).await?;

        // One fetch per store for the whole range; the per-day loop below
        // works entirely off these snapshots.
        let blocks = BlockRepo::list_between(&self.pool, business_id, start_date, end_date).await?;
        let pickups =
            OrderRepo::list_pickups_between(&self.pool, business_id, start_date, end_date).await?;
        let locks =
            SlotLockRepo::list_active_between(&self.pool, business_id, start_date, end_date)
                .await?;

        let by_day: HashMap<i16, &WeeklySchedule> =
            schedule.iter().map(|e| (e.day_of_week, e)).collect();
        let mut blocks_by_date: HashMap<NaiveDate, Vec<&AvailabilityBlock>> = HashMap::new();
        for block in &blocks {
            blocks_by_date.entry(block.block_date).or_default().push(block);
        }
        let booked: HashSet<(NaiveDate, NaiveTime)> = pickups
            .iter()
            .map(|p| (p.pickup_date, p.pickup_time))
            .collect();
        let locked: HashSet<(NaiveDate, NaiveTime)> = locks
            .iter()
            .map(|l| (l.slot_date, l.slot_time))
            .collect();

        let now = self.clock.now();
        let mut slots = Vec::new();
        let mut date = start_date;
        loop {
            if same_day_eligibility(&policy, date, now).allowed {
                if let Some(entry) = by_day.get(&day_of_week(date)) {
                    if entry.is_available {
                        let day_blocks = blocks_by_date
                            .get(&date)
                            .map(Vec::as_slice)
                            .unwrap_or_default();
                        slots.extend(mark_day(
                            entry,
                            date,
                            duration_mins,
                            interval_mins,
                            day_blocks,
                            &booked,
                            &locked,
                        )?);
                    }
                }
            }
            if date >= end_date {
                break;
            }
            match date.succ_opt() {
                Some(next) => date = next,
                None => break,
            }
        }
        Ok(slots)
    }

    /// Attempt to hold a slot for checkout. Returns `true` only when the
    /// caller now holds the lock.
    ///
    /// Availability is re-checked first so blocks, bookings, or holds that
    /// appeared since the caller last listed slots are respected; the
    /// conditional upsert that follows is what actually decides races.
    /// Store failures degrade to `false` rather than surfacing; the
    /// caller's recovery is the same either way, picking another slot or
    /// retrying.
    pub async fn lock_slot(
        &self,
        business_id: DbId,
        slot_date: NaiveDate,
        slot_time: NaiveTime,
        user_id: DbId,
    ) -> bool {
        match self
            .try_lock_slot(business_id, slot_date, slot_time, user_id)
            .await
        {
            Ok(acquired) => acquired,
            Err(err) => {
                tracing::error!(
                    business_id,
                    date = %slot_date,
                    time = %slot_time,
                    user_id,
                    error = %err,
                    "Slot lock attempt failed"
                );
                false
            }
        }
    }

    async fn try_lock_slot(
        &self,
        business_id: DbId,
        slot_date: NaiveDate,
        slot_time: NaiveTime,
        user_id: DbId,
    ) -> AvailabilityResult<bool> {
        let slots = self
            .get_available_slots(
                business_id,
                slot_date,
                slot_date,
                DEFAULT_SLOT_DURATION_MINS,
                DEFAULT_SLOT_INTERVAL_MINS,
            )
            .await?;
        let open = slots
            .iter()
            .any(|s| s.slot_time == slot_time && s.available);
        if !open {
            tracing::debug!(
                business_id,
                date = %slot_date,
                time = %slot_time,
                "Slot not available at lock time"
            );
            return Ok(false);
        }

        match SlotLockRepo::acquire(&self.pool, business_id, slot_date, slot_time, user_id).await? {
            Some(lock) => {
                tracing::info!(
                    business_id,
                    date = %slot_date,
                    time = %slot_time,
                    user_id,
                    expires_at = %lock.expires_at,
                    "Slot locked"
                );
                Ok(true)
            }
            None => {
                // Expected contention, not an error.
                if let Some(holder) =
                    SlotLockRepo::find(&self.pool, business_id, slot_date, slot_time).await?
                {
                    tracing::debug!(
                        business_id,
                        date = %slot_date,
                        time = %slot_time,
                        locked_by = holder.locked_by,
                        until = %holder.expires_at,
                        "Slot already locked"
                    );
                }
                Ok(false)
            }
        }
    }

    /// Release a checkout hold. Releasing a slot that holds no lock is a
    /// no-op, so a double release is harmless.
    pub async fn release_lock(
        &self,
        business_id: DbId,
        slot_date: NaiveDate,
        slot_time: NaiveTime,
    ) -> AvailabilityResult<()> {
        let released = SlotLockRepo::release(&self.pool, business_id, slot_date, slot_time).await?;
        if released {
            tracing::info!(
                business_id,
                date = %slot_date,
                time = %slot_time,
                "Slot lock released"
            );
        }
        Ok(())
    }

    /// Standalone same-day check for flows with no slot shape (immediate
    /// product pickup). A business with no record fails open: a missing
    /// configuration row must not block pickup for business types that
    /// never use scheduling.
    pub async fn is_same_day_pickup_allowed(
        &self,
        business_id: DbId,
    ) -> AvailabilityResult<SameDayEligibility> {
        let policy = self.policy_for(business_id).await?;
        let now = self.clock.now();
        Ok(same_day_eligibility(&policy, now.date(), now))
    }

    /// Drop every expired hold. Safe to run concurrently with `lock_slot`:
    /// a lock that flips from live to expired mid-sweep is either deleted
    /// here or superseded there, and both outcomes are correct.
    pub async fn cleanup_expired_locks(&self) -> AvailabilityResult<u64> {
        let removed = SlotLockRepo::cleanup_expired(&self.pool).await?;
        if removed > 0 {
            tracing::debug!(removed, "Expired slot locks swept");
        }
        Ok(removed)
    }

    async fn policy_for(&self, business_id: DbId) -> AvailabilityResult<SameDayPolicy> {
        Ok(BusinessRepo::find_by_id(&self.pool, business_id)
            .await?
            .map(|b| b.same_day_policy())
            .unwrap_or_else(SameDayPolicy::fail_open))
    }
}

/// Map a calendar date onto the schedule's weekday numbering (0 = Sunday).
fn day_of_week(date: NaiveDate) -> i16 {
    date.weekday().num_days_from_sunday() as i16
}

fn validate_range(start_date: NaiveDate, end_date: NaiveDate) -> Result<(), CoreError> {
    if end_date < start_date {
        return Err(CoreError::Validation(format!(
            "end_date {end_date} precedes start_date {start_date}"
        )));
    }
    let days = end_date.signed_duration_since(start_date).num_days() + 1;
    if days > MAX_RANGE_DAYS {
        return Err(CoreError::Validation(format!(
            "date range spans {days} days, the maximum is {MAX_RANGE_DAYS}"
        )));
    }
    Ok(())
}

/// Generate and mark one eligible day's slots.
fn mark_day(
    entry: &WeeklySchedule,
    date: NaiveDate,
    duration_mins: i64,
    interval_mins: i64,
    day_blocks: &[&AvailabilityBlock],
    booked: &HashSet<(NaiveDate, NaiveTime)>,
    locked: &HashSet<(NaiveDate, NaiveTime)>,
) -> Result<Vec<TimeSlot>, CoreError> {
    let candidates = generate_slots(entry.start_time, entry.end_time, duration_mins, interval_mins)?;
    Ok(candidates
        .into_iter()
        .map(|slot_time| {
            let taken = is_blocked(day_blocks, slot_time)
                || booked.contains(&(date, slot_time))
                || locked.contains(&(date, slot_time));
            TimeSlot {
                slot_date: date,
                slot_time,
                available: !taken,
            }
        })
        .collect())
}

/// Whether any block covers the slot time. Intervals are half-open
/// `[start, end)`; a missing bound widens to that side of the day.
fn is_blocked(blocks: &[&AvailabilityBlock], slot_time: NaiveTime) -> bool {
    blocks.iter().any(|block| {
        if block.is_all_day {
            return true;
        }
        let after_start = block.start_time.map_or(true, |s| slot_time >= s);
        let before_end = block.end_time.map_or(true, |e| slot_time < e);
        after_start && before_end
    })
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::Utc;

    use super::*;

    fn hm(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn block(
        start: Option<NaiveTime>,
        end: Option<NaiveTime>,
        is_all_day: bool,
    ) -> AvailabilityBlock {
        AvailabilityBlock {
            id: 1,
            business_id: 1,
            block_date: date(2025, 6, 2),
            start_time: start,
            end_time: end,
            is_all_day,
            created_at: Utc::now(),
        }
    }

    fn entry(start: NaiveTime, end: NaiveTime) -> WeeklySchedule {
        WeeklySchedule {
            id: 1,
            business_id: 1,
            day_of_week: 1,
            start_time: start,
            end_time: end,
            is_available: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn weekday_numbering_starts_at_sunday() {
        assert_eq!(day_of_week(date(2025, 6, 1)), 0); // Sunday
        assert_eq!(day_of_week(date(2025, 6, 2)), 1); // Monday
        assert_eq!(day_of_week(date(2025, 6, 7)), 6); // Saturday
    }

    #[test]
    fn inverted_range_is_rejected() {
        assert_matches!(
            validate_range(date(2025, 6, 10), date(2025, 6, 9)),
            Err(CoreError::Validation(_))
        );
        assert!(validate_range(date(2025, 6, 10), date(2025, 6, 10)).is_ok());
    }

    #[test]
    fn oversized_range_is_rejected() {
        assert_matches!(
            validate_range(date(2025, 1, 1), date(2026, 6, 1)),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn all_day_block_takes_every_slot() {
        let b = block(None, None, true);
        let slots = mark_day(
            &entry(hm(9, 0), hm(12, 0)),
            date(2025, 6, 2),
            60,
            30,
            &[&b],
            &HashSet::new(),
            &HashSet::new(),
        )
        .unwrap();
        assert_eq!(slots.len(), 5);
        assert!(slots.iter().all(|s| !s.available));
    }

    #[test]
    fn partial_block_interval_is_half_open() {
        let b = block(Some(hm(10, 0)), Some(hm(11, 0)), false);
        let slots = mark_day(
            &entry(hm(9, 0), hm(12, 0)),
            date(2025, 6, 2),
            60,
            30,
            &[&b],
            &HashSet::new(),
            &HashSet::new(),
        )
        .unwrap();
        let available: Vec<_> = slots.iter().filter(|s| s.available).map(|s| s.slot_time).collect();
        // 10:00 and 10:30 fall inside [10:00, 11:00); 11:00 sits exactly on
        // the exclusive end and stays open.
        assert_eq!(available, vec![hm(9, 0), hm(9, 30), hm(11, 0)]);
    }

    #[test]
    fn block_with_no_bounds_covers_the_day() {
        let b = block(None, None, false);
        let slots = mark_day(
            &entry(hm(9, 0), hm(12, 0)),
            date(2025, 6, 2),
            60,
            30,
            &[&b],
            &HashSet::new(),
            &HashSet::new(),
        )
        .unwrap();
        assert!(slots.iter().all(|s| !s.available));
    }

    #[test]
    fn booked_and_locked_slots_are_marked_unavailable() {
        let day = date(2025, 6, 2);
        let booked: HashSet<_> = [(day, hm(10, 0))].into_iter().collect();
        let locked: HashSet<_> = [(day, hm(10, 30))].into_iter().collect();
        let slots = mark_day(
            &entry(hm(9, 0), hm(12, 0)),
            day,
            60,
            30,
            &[],
            &booked,
            &locked,
        )
        .unwrap();
        let unavailable: Vec<_> = slots
            .iter()
            .filter(|s| !s.available)
            .map(|s| s.slot_time)
            .collect();
        assert_eq!(unavailable, vec![hm(10, 0), hm(10, 30)]);
    }

    #[test]
    fn bookings_on_other_dates_do_not_leak() {
        let day = date(2025, 6, 2);
        let booked: HashSet<_> = [(date(2025, 6, 3), hm(10, 0))].into_iter().collect();
        let slots = mark_day(
            &entry(hm(9, 0), hm(12, 0)),
            day,
            60,
            30,
            &[],
            &booked,
            &HashSet::new(),
        )
        .unwrap();
        assert!(slots.iter().all(|s| s.available));
    }
}
