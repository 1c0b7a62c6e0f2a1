// crates/db/src/queries/channel.rs
// Channel lookup and the per-channel aggregate statistics.

use chrono::DateTime;
use kstats_core::{
    normalize_hour_usage, Channel, ChannelTotals, FloatEntry, ReferenceEntry, StatKind,
    TotalEntry, UserStats, CATEGORY_LIMIT, REFERENCES_LIMIT, TOP_USERS_LIMIT, UNKNOWN_NICK,
};

use super::sql;
use crate::{Database, DbError, DbResult};

impl Database {
    /// Resolve a channel token (`#name`, any case) to its row.
    pub async fn find_channel(&self, token: &str) -> DbResult<Option<Channel>> {
        let row: Option<(i64, String)> = sqlx::query_as(sql::FIND_CHANNEL)
            .bind(token)
            .fetch_optional(self.pool())
            .await?;

        Ok(row.map(|(id, name)| Channel { id, name }))
    }

    /// Line and word totals for the whole channel. An empty channel is all zeros.
    pub async fn channel_totals(&self, channel_id: i64) -> DbResult<ChannelTotals> {
        let (lines, words, words_per_line, characters_per_line): (i64, i64, f64, f64) =
            sqlx::query_as(sql::TOTALS)
                .bind(channel_id)
                .fetch_one(self.pool())
                .await?;

        Ok(ChannelTotals {
            lines,
            words,
            words_per_line,
            characters_per_line,
        })
    }

    /// Message counts for UTC hours 0..=23, scaled so the busiest hour is 100.
    pub async fn hour_usage(&self, channel_id: i64) -> DbResult<Vec<f64>> {
        let rows: Vec<(i64,)> = sqlx::query_as(sql::HOUR_COUNTS)
            .bind(channel_id)
            .fetch_all(self.pool())
            .await?;

        let counts: Vec<i64> = rows.into_iter().map(|(count,)| count).collect();
        Ok(normalize_hour_usage(&counts))
    }

    /// Sender groups with the lowest non-zero share of lines carrying `kind`.
    pub async fn percentage_stats(
        &self,
        channel_id: i64,
        kind: StatKind,
    ) -> DbResult<Vec<FloatEntry>> {
        self.float_entries(sql::percentage(kind), channel_id, CATEGORY_LIMIT)
            .await
    }

    /// Sender groups with the highest average characters per line.
    pub async fn longest_lines(&self, channel_id: i64) -> DbResult<Vec<FloatEntry>> {
        self.float_entries(sql::LONGEST_LINES, channel_id, CATEGORY_LIMIT)
            .await
    }

    /// Sender groups with the lowest average characters per line.
    pub async fn shortest_lines(&self, channel_id: i64) -> DbResult<Vec<FloatEntry>> {
        self.float_entries(sql::SHORTEST_LINES, channel_id, CATEGORY_LIMIT)
            .await
    }

    /// Sender groups with the highest average words per line.
    pub async fn average_words(&self, channel_id: i64) -> DbResult<Vec<FloatEntry>> {
        self.float_entries(sql::AVERAGE_WORDS, channel_id, CATEGORY_LIMIT)
            .await
    }

    /// Sender groups with the most words overall, each row pointing at the
    /// name ranked just above it.
    pub async fn total_words(&self, channel_id: i64) -> DbResult<Vec<TotalEntry>> {
        let rows: Vec<(String, i64)> = sqlx::query_as(sql::TOTAL_WORDS)
            .bind(channel_id)
            .bind(CATEGORY_LIMIT)
            .bind(UNKNOWN_NICK)
            .fetch_all(self.pool())
            .await?;

        let mut previous = String::new();
        let entries = rows
            .into_iter()
            .map(|(name, value)| TotalEntry {
                previous: std::mem::replace(&mut previous, name.clone()),
                name,
                value,
            })
            .collect();

        Ok(entries)
    }

    /// The most active sender groups by line count.
    pub async fn top_users(&self, channel_id: i64) -> DbResult<Vec<UserStats>> {
        let rows: Vec<(String, i64, i64, f64, i64)> = sqlx::query_as(sql::TOP_USERS)
            .bind(channel_id)
            .bind(TOP_USERS_LIMIT)
            .bind(UNKNOWN_NICK)
            .fetch_all(self.pool())
            .await?;

        rows.into_iter()
            .map(|(name, lines, words, words_per_line, last_seen)| -> DbResult<UserStats> {
                let last_seen = DateTime::from_timestamp(last_seen, 0)
                    .ok_or(DbError::InvalidTimestamp(last_seen))?;
                Ok(UserStats {
                    name,
                    lines,
                    words,
                    words_per_line,
                    last_seen,
                })
            })
            .collect()
    }

    /// The most mentioned sender groups and who mentioned each one last.
    pub async fn references(&self, channel_id: i64) -> DbResult<Vec<ReferenceEntry>> {
        let rows: Vec<(String, i64, String)> = sqlx::query_as(sql::REFERENCES)
            .bind(channel_id)
            .bind(REFERENCES_LIMIT)
            .bind(UNKNOWN_NICK)
            .fetch_all(self.pool())
            .await?;

        Ok(rows
            .into_iter()
            .map(|(name, count, last_used)| ReferenceEntry {
                name,
                count,
                last_used,
            })
            .collect())
    }

    /// Run a `(name, value)` per-group query.
    async fn float_entries(
        &self,
        query: &'static str,
        channel_id: i64,
        limit: i64,
    ) -> DbResult<Vec<FloatEntry>> {
        let rows: Vec<(String, f64)> = sqlx::query_as(query)
            .bind(channel_id)
            .bind(limit)
            .bind(UNKNOWN_NICK)
            .fetch_all(self.pool())
            .await?;

        Ok(rows
            .into_iter()
            .map(|(name, value)| FloatEntry { name, value })
            .collect())
    }
}
