//! Repository for the `weekly_schedules` table.

use sqlx::PgPool;

use bookline_core::types::DbId;

use crate::models::schedule::{UpsertWeeklySchedule, WeeklySchedule};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, business_id, day_of_week, start_time, end_time, is_available, \
                       created_at, updated_at";

/// Read and upsert access to a business's recurring weekly hours.
pub struct ScheduleRepo;

impl ScheduleRepo {
    /// List a business's weekly hours ordered by day of week.
    pub async fn list_for_business(
        pool: &PgPool,
        business_id: DbId,
    ) -> Result<Vec<WeeklySchedule>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM weekly_schedules \
             WHERE business_id = $1 \
             ORDER BY day_of_week"
        );
        sqlx::query_as::<_, WeeklySchedule>(&query)
            .bind(business_id)
            .fetch_all(pool)
            .await
    }

    /// Create or replace one weekday's hours.
    ///
    /// Upserts against `uq_weekly_schedules_business_day`, so a business
    /// can never hold two rows for the same weekday.
    pub async fn upsert(
        pool: &PgPool,
        business_id: DbId,
        input: &UpsertWeeklySchedule,
    ) -> Result<WeeklySchedule, sqlx::Error> {
        let query = format!(
            "INSERT INTO weekly_schedules (business_id, day_of_week, start_time, end_time, is_available) \
             VALUES ($1, $2, $3, $4, $5) \
             ON CONFLICT (business_id, day_of_week) DO UPDATE SET \
                start_time = EXCLUDED.start_time, \
                end_time = EXCLUDED.end_time, \
                is_available = EXCLUDED.is_available, \
                updated_at = NOW() \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, WeeklySchedule>(&query)
            .bind(business_id)
            .bind(input.day_of_week)
            .bind(input.start_time)
            .bind(input.end_time)
            .bind(input.is_available)
            .fetch_one(pool)
            .await
    }

    /// Remove one weekday's hours. Returns `true` if a row was deleted.
    pub async fn delete_day(
        pool: &PgPool,
        business_id: DbId,
        day_of_week: i16,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM weekly_schedules WHERE business_id = $1 AND day_of_week = $2")
                .bind(business_id)
                .bind(day_of_week)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
