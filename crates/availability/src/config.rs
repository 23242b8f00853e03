//! Business-configuration write paths.
//!
//! The configuration UI is a separate subsystem, but its writes against
//! engine-owned tables go through here so input validation and the upsert
//! invariants live next to the logic that depends on them.

use chrono::NaiveTime;

use bookline_core::error::CoreError;
use bookline_core::slots::{validate_day_of_week, validate_time_window};
use bookline_core::types::DbId;
use bookline_db::models::block::{AvailabilityBlock, CreateAvailabilityBlock};
use bookline_db::models::schedule::{UpsertWeeklySchedule, WeeklySchedule};
use bookline_db::repositories::{BlockRepo, BusinessRepo, ScheduleRepo};
use bookline_db::DbPool;

use crate::error::AvailabilityResult;

/// Create or replace one weekday's open hours for a business.
pub async fn set_weekly_hours(
    pool: &DbPool,
    business_id: DbId,
    input: &UpsertWeeklySchedule,
) -> AvailabilityResult<WeeklySchedule> {
    validate_day_of_week(input.day_of_week)?;
    validate_time_window(input.start_time, input.end_time)?;
    Ok(ScheduleRepo::upsert(pool, business_id, input).await?)
}

/// Remove one weekday's hours entirely. Returns `true` if a row existed.
pub async fn clear_weekly_hours(
    pool: &DbPool,
    business_id: DbId,
    day_of_week: i16,
) -> AvailabilityResult<bool> {
    validate_day_of_week(day_of_week)?;
    Ok(ScheduleRepo::delete_day(pool, business_id, day_of_week).await?)
}

/// Add an ad-hoc closure. Partial blocks with both bounds present must
/// carry a forward window.
pub async fn add_block(
    pool: &DbPool,
    business_id: DbId,
    input: &CreateAvailabilityBlock,
) -> AvailabilityResult<AvailabilityBlock> {
    if !input.is_all_day {
        if let (Some(start), Some(end)) = (input.start_time, input.end_time) {
            validate_time_window(start, end)?;
        }
    }
    Ok(BlockRepo::create(pool, business_id, input).await?)
}

/// Remove a closure. Returns `true` if it existed.
pub async fn remove_block(
    pool: &DbPool,
    business_id: DbId,
    block_id: DbId,
) -> AvailabilityResult<bool> {
    Ok(BlockRepo::delete(pool, business_id, block_id).await?)
}

/// Update a business's same-day pickup policy.
pub async fn set_same_day_policy(
    pool: &DbPool,
    business_id: DbId,
    same_day_pickup_allowed: bool,
    cutoff_time: Option<NaiveTime>,
) -> AvailabilityResult<()> {
    let updated =
        BusinessRepo::set_same_day_policy(pool, business_id, same_day_pickup_allowed, cutoff_time)
            .await?;
    if !updated {
        return Err(CoreError::NotFound {
            entity: "business",
            id: business_id,
        }
        .into());
    }
    Ok(())
}
