// crates/core/src/constants.rs

/// Display name used when a sender hash has no row in `users`.
pub const UNKNOWN_NICK: &str = "[Unknown]";

/// Rows returned by the top-users table.
pub const TOP_USERS_LIMIT: i64 = 20;

/// Rows returned by each "fun fact" category (percentages, line lengths, words).
pub const CATEGORY_LIMIT: i64 = 2;

/// Rows returned by the most-referenced table.
pub const REFERENCES_LIMIT: i64 = 5;

/// Number of hour buckets in the activity histogram.
pub const HOURS_PER_DAY: usize = 24;

/// Channel tokens handled by the dashboard start with this prefix.
pub const CHANNEL_PREFIX: char = '#';
