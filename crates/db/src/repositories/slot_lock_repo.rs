//! Repository for the `slot_locks` table.
//!
//! `acquire` is the only concurrency-sensitive write in the system: a
//! single conditional upsert whose guard keeps a live lock from ever being
//! overwritten, so two concurrent callers for the same slot can never both
//! succeed.

use chrono::{NaiveDate, NaiveTime};
use sqlx::PgPool;

use bookline_core::types::DbId;

use crate::models::slot_lock::{SlotLock, LOCK_TTL_MINS};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, business_id, slot_date, slot_time, locked_by, expires_at, \
                       created_at, updated_at";

/// Read/write access to short-lived checkout holds.
pub struct SlotLockRepo;

impl SlotLockRepo {
    /// List locks for a business in an inclusive date range that are still
    /// live at the database clock.
    pub async fn list_active_between(
        pool: &PgPool,
        business_id: DbId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<SlotLock>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM slot_locks \
             WHERE business_id = $1 \
               AND slot_date BETWEEN $2 AND $3 \
               AND expires_at > NOW() \
             ORDER BY slot_date, slot_time"
        );
        sqlx::query_as::<_, SlotLock>(&query)
            .bind(business_id)
            .bind(from)
            .bind(to)
            .fetch_all(pool)
            .await
    }

    /// Attempt to take the hold on one slot for [`LOCK_TTL_MINS`] minutes.
    ///
    /// Insert-or-update in a single statement: the `DO UPDATE` only fires
    /// when the existing row has already expired, so a live holder is never
    /// displaced and there is no read-then-write window. Returns the held
    /// lock on success, `None` when a live lock blocked the write.
    pub async fn acquire(
        pool: &PgPool,
        business_id: DbId,
        slot_date: NaiveDate,
        slot_time: NaiveTime,
        locked_by: DbId,
    ) -> Result<Option<SlotLock>, sqlx::Error> {
        let query = format!(
            "INSERT INTO slot_locks (business_id, slot_date, slot_time, locked_by, expires_at) \
             VALUES ($1, $2, $3, $4, NOW() + INTERVAL '{LOCK_TTL_MINS} minutes') \
             ON CONFLICT (business_id, slot_date, slot_time) DO UPDATE SET \
                locked_by = EXCLUDED.locked_by, \
                expires_at = EXCLUDED.expires_at, \
                updated_at = NOW() \
             WHERE slot_locks.expires_at < NOW() \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, SlotLock>(&query)
            .bind(business_id)
            .bind(slot_date)
            .bind(slot_time)
            .bind(locked_by)
            .fetch_optional(pool)
            .await
    }

    /// Current lock row for a slot regardless of expiry, for contention
    /// diagnostics.
    pub async fn find(
        pool: &PgPool,
        business_id: DbId,
        slot_date: NaiveDate,
        slot_time: NaiveTime,
    ) -> Result<Option<SlotLock>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM slot_locks \
             WHERE business_id = $1 AND slot_date = $2 AND slot_time = $3"
        );
        sqlx::query_as::<_, SlotLock>(&query)
            .bind(business_id)
            .bind(slot_date)
            .bind(slot_time)
            .fetch_optional(pool)
            .await
    }

    /// Release a slot's hold. Deleting a lock that does not exist is not an
    /// error; returns `true` if a row was removed.
    pub async fn release(
        pool: &PgPool,
        business_id: DbId,
        slot_date: NaiveDate,
        slot_time: NaiveTime,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM slot_locks \
             WHERE business_id = $1 AND slot_date = $2 AND slot_time = $3",
        )
        .bind(business_id)
        .bind(slot_date)
        .bind(slot_time)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Delete every lock whose expiry has passed. Returns the count of
    /// deleted rows.
    pub async fn cleanup_expired(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM slot_locks WHERE expires_at < NOW()")
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}
