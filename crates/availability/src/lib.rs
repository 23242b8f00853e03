//! The availability & booking-slot engine.
//!
//! Turns a business's recurring weekly hours, ad-hoc blocks, confirmed
//! order pickups, and live checkout holds into a consistent per-slot
//! availability view, and mediates slot locking during checkout.
//!
//! The engine holds no mutable state of its own. Every read it performs is
//! advisory and may be stale by the time a caller acts on it; the one hard
//! guarantee in the subsystem is the single conditional lock write in
//! [`bookline_db::repositories::SlotLockRepo::acquire`], which `lock_slot`
//! fronts with a re-validation pass.

pub mod clock;
pub mod config;
pub mod engine;
pub mod error;
pub mod sweep;

pub use clock::{Clock, FixedClock, SystemClock};
pub use engine::{AvailabilityEngine, TimeSlot};
pub use error::{AvailabilityError, AvailabilityResult};
