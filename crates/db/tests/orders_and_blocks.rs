//! Integration tests for the read-only order view and block storage.

use chrono::{NaiveDate, NaiveTime};
use sqlx::PgPool;

use bookline_db::models::block::CreateAvailabilityBlock;
use bookline_db::repositories::{BlockRepo, BusinessRepo, OrderRepo};

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, d).unwrap()
}

fn hm(hour: u32, minute: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
}

async fn seed_order(
    pool: &PgPool,
    business: i64,
    pickup_date: Option<NaiveDate>,
    pickup_time: Option<NaiveTime>,
    status: &str,
) {
    sqlx::query(
        "INSERT INTO orders (business_id, pickup_date, pickup_time, status) \
         VALUES ($1, $2, $3, $4)",
    )
    .bind(business)
    .bind(pickup_date)
    .bind(pickup_time)
    .bind(status)
    .execute(pool)
    .await
    .unwrap();
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn pickup_listing_skips_cancelled_and_slotless_orders(pool: PgPool) {
    let business = BusinessRepo::create(&pool, "Test Bakery").await.unwrap().id;

    seed_order(&pool, business, Some(day(2)), Some(hm(10, 0)), "confirmed").await;
    seed_order(&pool, business, Some(day(2)), Some(hm(11, 0)), "cancelled").await;
    seed_order(&pool, business, None, None, "confirmed").await;
    seed_order(&pool, business, Some(day(9)), Some(hm(10, 0)), "confirmed").await;

    let pickups = OrderRepo::list_pickups_between(&pool, business, day(1), day(7))
        .await
        .unwrap();
    assert_eq!(pickups.len(), 1);
    assert_eq!(pickups[0].pickup_date, day(2));
    assert_eq!(pickups[0].pickup_time, hm(10, 0));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn block_listing_respects_the_date_range(pool: PgPool) {
    let business = BusinessRepo::create(&pool, "Test Bakery").await.unwrap().id;

    for d in [1, 4, 20] {
        BlockRepo::create(
            &pool,
            business,
            &CreateAvailabilityBlock {
                block_date: day(d),
                start_time: None,
                end_time: None,
                is_all_day: true,
            },
        )
        .await
        .unwrap();
    }

    let blocks = BlockRepo::list_between(&pool, business, day(1), day(7))
        .await
        .unwrap();
    let dates: Vec<NaiveDate> = blocks.iter().map(|b| b.block_date).collect();
    assert_eq!(dates, vec![day(1), day(4)]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn block_delete_is_scoped_to_the_owner(pool: PgPool) {
    let owner = BusinessRepo::create(&pool, "Test Bakery").await.unwrap().id;
    let other = BusinessRepo::create(&pool, "Corner Florist").await.unwrap().id;

    let block = BlockRepo::create(
        &pool,
        owner,
        &CreateAvailabilityBlock {
            block_date: day(2),
            start_time: Some(hm(9, 0)),
            end_time: Some(hm(12, 0)),
            is_all_day: false,
        },
    )
    .await
    .unwrap();

    assert!(!BlockRepo::delete(&pool, other, block.id).await.unwrap());
    assert!(BlockRepo::delete(&pool, owner, block.id).await.unwrap());
    assert!(!BlockRepo::delete(&pool, owner, block.id).await.unwrap());
}
