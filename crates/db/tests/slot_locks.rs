//! Integration tests for the slot-lock conditional upsert.
//!
//! These exercise the one concurrency-sensitive statement in the system
//! against a real PostgreSQL instance.

use chrono::{NaiveDate, NaiveTime};
use sqlx::PgPool;

use bookline_db::repositories::{BusinessRepo, SlotLockRepo};

async fn seed_business(pool: &PgPool) -> i64 {
    BusinessRepo::create(pool, "Test Bakery").await.unwrap().id
}

fn slot() -> (NaiveDate, NaiveTime) {
    (
        NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
        NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
    )
}

/// Force a lock's expiry into the past without waiting out the TTL.
async fn expire_lock(pool: &PgPool, lock_id: i64) {
    sqlx::query("UPDATE slot_locks SET expires_at = NOW() - INTERVAL '1 minute' WHERE id = $1")
        .bind(lock_id)
        .execute(pool)
        .await
        .unwrap();
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn live_lock_blocks_any_new_holder(pool: PgPool) {
    let business = seed_business(&pool).await;
    let (date, time) = slot();

    let first = SlotLockRepo::acquire(&pool, business, date, time, 101)
        .await
        .unwrap();
    assert!(first.is_some());

    let second = SlotLockRepo::acquire(&pool, business, date, time, 202)
        .await
        .unwrap();
    assert!(second.is_none());

    // The write is conditioned purely on expiry, so even the current
    // holder cannot renew while the lock is live.
    let renew = SlotLockRepo::acquire(&pool, business, date, time, 101)
        .await
        .unwrap();
    assert!(renew.is_none());

    let row = SlotLockRepo::find(&pool, business, date, time)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.locked_by, 101);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn expired_lock_is_superseded_by_a_new_holder(pool: PgPool) {
    let business = seed_business(&pool).await;
    let (date, time) = slot();

    let first = SlotLockRepo::acquire(&pool, business, date, time, 101)
        .await
        .unwrap()
        .unwrap();
    expire_lock(&pool, first.id).await;

    let second = SlotLockRepo::acquire(&pool, business, date, time, 202)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(second.locked_by, 202);
    assert_eq!(second.id, first.id);

    let row = SlotLockRepo::find(&pool, business, date, time)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(row.locked_by, 202);
    assert!(row.expires_at > first.expires_at);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn concurrent_acquires_admit_at_most_one_holder(pool: PgPool) {
    let business = seed_business(&pool).await;
    let (date, time) = slot();

    let (a, b) = tokio::join!(
        SlotLockRepo::acquire(&pool, business, date, time, 101),
        SlotLockRepo::acquire(&pool, business, date, time, 202),
    );
    let winners = [a.unwrap(), b.unwrap()]
        .into_iter()
        .flatten()
        .count();
    assert_eq!(winners, 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn release_is_idempotent(pool: PgPool) {
    let business = seed_business(&pool).await;
    let (date, time) = slot();

    SlotLockRepo::acquire(&pool, business, date, time, 101)
        .await
        .unwrap();

    let released = SlotLockRepo::release(&pool, business, date, time)
        .await
        .unwrap();
    assert!(released);

    // Releasing an already-released slot succeeds with no effect.
    let released_again = SlotLockRepo::release(&pool, business, date, time)
        .await
        .unwrap();
    assert!(!released_again);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn cleanup_removes_only_expired_locks(pool: PgPool) {
    let business = seed_business(&pool).await;
    let date = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
    let expired_time = NaiveTime::from_hms_opt(10, 0, 0).unwrap();
    let live_time = NaiveTime::from_hms_opt(11, 0, 0).unwrap();

    let expired = SlotLockRepo::acquire(&pool, business, date, expired_time, 101)
        .await
        .unwrap()
        .unwrap();
    SlotLockRepo::acquire(&pool, business, date, live_time, 101)
        .await
        .unwrap()
        .unwrap();
    expire_lock(&pool, expired.id).await;

    let removed = SlotLockRepo::cleanup_expired(&pool).await.unwrap();
    assert_eq!(removed, 1);

    assert!(SlotLockRepo::find(&pool, business, date, expired_time)
        .await
        .unwrap()
        .is_none());
    assert!(SlotLockRepo::find(&pool, business, date, live_time)
        .await
        .unwrap()
        .is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn active_listing_excludes_expired_locks(pool: PgPool) {
    let business = seed_business(&pool).await;
    let date = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
    let expired_time = NaiveTime::from_hms_opt(10, 0, 0).unwrap();
    let live_time = NaiveTime::from_hms_opt(11, 0, 0).unwrap();

    let expired = SlotLockRepo::acquire(&pool, business, date, expired_time, 101)
        .await
        .unwrap()
        .unwrap();
    SlotLockRepo::acquire(&pool, business, date, live_time, 202)
        .await
        .unwrap()
        .unwrap();
    expire_lock(&pool, expired.id).await;

    let active = SlotLockRepo::list_active_between(&pool, business, date, date)
        .await
        .unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].slot_time, live_time);
}
