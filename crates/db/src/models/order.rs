//! Read-only view of order pickups.
//!
//! Orders are created and owned by the checkout subsystem; once committed
//! they are immutable facts to the availability engine, which only consumes
//! the pickup slot and status.

use chrono::{NaiveDate, NaiveTime};
use serde::Serialize;
use sqlx::FromRow;

use bookline_core::types::DbId;

/// Order status excluded from availability decisions.
pub const STATUS_CANCELLED: &str = "cancelled";

/// A pickup-bearing row from the `orders` table.
///
/// The repository filters out rows without a pickup date/time, so both
/// fields are non-optional here.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct OrderPickup {
    pub id: DbId,
    pub business_id: DbId,
    pub pickup_date: NaiveDate,
    pub pickup_time: NaiveTime,
    pub status: String,
}
