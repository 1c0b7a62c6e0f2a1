// crates/db/src/queries/mod.rs
// Per-statistic read queries against the message store.

mod channel;
mod sql;
