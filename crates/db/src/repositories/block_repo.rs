//! Repository for the `availability_blocks` table.

use chrono::NaiveDate;
use sqlx::PgPool;

use bookline_core::types::DbId;

use crate::models::block::{AvailabilityBlock, CreateAvailabilityBlock};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, business_id, block_date, start_time, end_time, is_all_day, created_at";

/// Read and write access to a business's ad-hoc closures.
pub struct BlockRepo;

impl BlockRepo {
    /// List blocks for a business within an inclusive date range.
    pub async fn list_between(
        pool: &PgPool,
        business_id: DbId,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<AvailabilityBlock>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM availability_blocks \
             WHERE business_id = $1 AND block_date BETWEEN $2 AND $3 \
             ORDER BY block_date, start_time"
        );
        sqlx::query_as::<_, AvailabilityBlock>(&query)
            .bind(business_id)
            .bind(from)
            .bind(to)
            .fetch_all(pool)
            .await
    }

    /// Create a new block, returning the created row.
    pub async fn create(
        pool: &PgPool,
        business_id: DbId,
        input: &CreateAvailabilityBlock,
    ) -> Result<AvailabilityBlock, sqlx::Error> {
        let query = format!(
            "INSERT INTO availability_blocks (business_id, block_date, start_time, end_time, is_all_day) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AvailabilityBlock>(&query)
            .bind(business_id)
            .bind(input.block_date)
            .bind(input.start_time)
            .bind(input.end_time)
            .bind(input.is_all_day)
            .fetch_one(pool)
            .await
    }

    /// Delete a block owned by the business. Returns `true` if a row was
    /// deleted.
    pub async fn delete(
        pool: &PgPool,
        business_id: DbId,
        block_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result =
            sqlx::query("DELETE FROM availability_blocks WHERE id = $1 AND business_id = $2")
                .bind(block_id)
                .bind(business_id)
                .execute(pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }
}
