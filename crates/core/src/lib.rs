// crates/core/src/lib.rs
//! Shared record types for the kstats channel dashboard.
//!
//! Nothing in here touches the database or the cache; the `db` crate fills
//! these records and the `server` crate caches and renders them.

pub mod constants;
pub mod hours;
pub mod stat_kind;
pub mod types;

pub use constants::*;
pub use hours::normalize_hour_usage;
pub use stat_kind::StatKind;
pub use types::*;
