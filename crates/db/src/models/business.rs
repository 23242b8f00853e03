//! Business model and its same-day pickup configuration.

use chrono::NaiveTime;
use serde::Serialize;
use sqlx::FromRow;

use bookline_core::cutoff::SameDayPolicy;
use bookline_core::types::{DbId, Timestamp};

/// A row from the `businesses` table.
///
/// The availability engine only reads the same-day pickup columns; the
/// rest of the business record belongs to the marketplace layer.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Business {
    pub id: DbId,
    pub name: String,
    pub same_day_pickup_allowed: bool,
    pub same_day_cutoff_time: Option<NaiveTime>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Business {
    /// The same-day policy carried by this row.
    pub fn same_day_policy(&self) -> SameDayPolicy {
        SameDayPolicy {
            same_day_pickup_allowed: self.same_day_pickup_allowed,
            cutoff_time: self.same_day_cutoff_time,
        }
    }
}
