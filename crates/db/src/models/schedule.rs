//! Weekly recurring schedule model and DTOs.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use bookline_core::types::{DbId, Timestamp};

/// A row from the `weekly_schedules` table.
///
/// At most one row exists per (business, day_of_week); writes go through
/// [`ScheduleRepo::upsert`](crate::repositories::ScheduleRepo::upsert).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WeeklySchedule {
    pub id: DbId,
    pub business_id: DbId,
    /// 0 = Sunday through 6 = Saturday.
    pub day_of_week: i16,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub is_available: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating or replacing one weekday's hours.
#[derive(Debug, Deserialize)]
pub struct UpsertWeeklySchedule {
    pub day_of_week: i16,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    #[serde(default = "default_true")]
    pub is_available: bool,
}

fn default_true() -> bool {
    true
}
