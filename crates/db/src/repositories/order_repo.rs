//! Read-only repository over the checkout subsystem's `orders` table.

use chrono::NaiveDate;
use sqlx::PgPool;

use bookline_core::types::DbId;

use crate::models::order::{OrderPickup, STATUS_CANCELLED};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, business_id, pickup_date, pickup_time, status";

/// Availability's view of confirmed order pickups.
pub struct OrderRepo;

impl OrderRepo {
    /// List non-cancelled pickups for a business within an inclusive date
    /// range.
    ///
    /// Rows without a pickup date or time never participate in
    /// availability and are filtered out here.
    pub async fn list_pickups_between(
        pool: &PgPool,
        business_id: DbId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<OrderPickup>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM orders \
             WHERE business_id = $1 \
               AND status <> $2 \
               AND pickup_date IS NOT NULL \
               AND pickup_time IS NOT NULL \
               AND pickup_date BETWEEN $3 AND $4 \
             ORDER BY pickup_date, pickup_time"
        );
        sqlx::query_as::<_, OrderPickup>(&query)
            .bind(business_id)
            .bind(STATUS_CANCELLED)
            .bind(from)
            .bind(to)
            .fetch_all(pool)
            .await
    }
}
