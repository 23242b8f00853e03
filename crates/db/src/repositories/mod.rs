//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod block_repo;
pub mod business_repo;
pub mod order_repo;
pub mod schedule_repo;
pub mod slot_lock_repo;

pub use block_repo::BlockRepo;
pub use business_repo::BusinessRepo;
pub use order_repo::OrderRepo;
pub use schedule_repo::ScheduleRepo;
pub use slot_lock_repo::SlotLockRepo;
