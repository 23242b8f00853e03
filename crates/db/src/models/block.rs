//! Ad-hoc availability block (closure) model and DTOs.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use bookline_core::types::{DbId, Timestamp};

/// A row from the `availability_blocks` table.
///
/// An all-day block removes every slot on `block_date` regardless of the
/// time bounds; otherwise the block covers the half-open interval
/// `[start_time, end_time)`, with a missing bound widening to that side of
/// the day.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AvailabilityBlock {
    pub id: DbId,
    pub business_id: DbId,
    pub block_date: NaiveDate,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    pub is_all_day: bool,
    pub created_at: Timestamp,
}

/// DTO for creating a block.
#[derive(Debug, Deserialize)]
pub struct CreateAvailabilityBlock {
    pub block_date: NaiveDate,
    pub start_time: Option<NaiveTime>,
    pub end_time: Option<NaiveTime>,
    #[serde(default)]
    pub is_all_day: bool,
}
