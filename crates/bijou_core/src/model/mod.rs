//! Domain model for the accessory catalogue and wear schedule.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Keep serialization shapes stable for the key-value store.
//!
//! # Invariants
//! - Every catalogue record is identified by a stable `AccessoryId`.
//! - Schedule entries may outlive the record they reference; readers must
//!   tolerate such orphans.

pub mod accessory;
pub mod schedule;
