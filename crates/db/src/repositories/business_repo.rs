//! Repository for the `businesses` table.

use chrono::NaiveTime;
use sqlx::PgPool;

use bookline_core::types::DbId;

use crate::models::business::Business;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, same_day_pickup_allowed, same_day_cutoff_time, \
                       created_at, updated_at";

/// Read access to business records plus the same-day policy write path.
pub struct BusinessRepo;

impl BusinessRepo {
    /// Find a business by ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Business>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM businesses WHERE id = $1");
        sqlx::query_as::<_, Business>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a new business with default same-day policy.
    pub async fn create(pool: &PgPool, name: &str) -> Result<Business, sqlx::Error> {
        let query = format!("INSERT INTO businesses (name) VALUES ($1) RETURNING {COLUMNS}");
        sqlx::query_as::<_, Business>(&query)
            .bind(name)
            .fetch_one(pool)
            .await
    }

    /// Update a business's same-day pickup policy. Returns `true` if the
    /// row exists.
    pub async fn set_same_day_policy(
        pool: &PgPool,
        id: DbId,
        same_day_pickup_allowed: bool,
        same_day_cutoff_time: Option<NaiveTime>,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE businesses \
             SET same_day_pickup_allowed = $2, same_day_cutoff_time = $3, updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(id)
        .bind(same_day_pickup_allowed)
        .bind(same_day_cutoff_time)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
