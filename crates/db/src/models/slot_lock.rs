//! Checkout slot lock model.

use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;
use sqlx::FromRow;

use bookline_core::types::{DbId, Timestamp};

/// How long a checkout hold lasts before it can be superseded, in minutes.
pub const LOCK_TTL_MINS: i64 = 15;

/// A row from the `slot_locks` table.
///
/// Uniquely keyed by (business_id, slot_date, slot_time). A row whose
/// `expires_at` has passed is dead weight until the sweep removes it or a
/// new holder supersedes it; it is never overwritten while live.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SlotLock {
    pub id: DbId,
    pub business_id: DbId,
    pub slot_date: NaiveDate,
    pub slot_time: NaiveTime,
    pub locked_by: DbId,
    pub expires_at: Timestamp,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
