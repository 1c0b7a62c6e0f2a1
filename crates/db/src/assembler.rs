// crates/db/src/assembler.rs
//! Builds the complete [`ChannelStats`] record for one channel.

use std::time::Instant;

use kstats_core::{ChannelStats, StatKind};
use tracing::debug;

use crate::{Database, DbError, DbResult};

impl Database {
    /// Resolve `token` and run every channel statistic query, in order.
    ///
    /// The first failing query aborts the build and its partial record is
    /// dropped; nothing is retried. A token with no matching channel is
    /// reported as [`DbError::ChannelNotFound`] before any statistic runs.
    pub async fn build_channel_stats(&self, token: &str) -> DbResult<ChannelStats> {
        let start = Instant::now();

        let channel = self
            .find_channel(token)
            .await?
            .ok_or_else(|| DbError::ChannelNotFound(token.to_string()))?;
        let id = channel.id;
        let mut stats = ChannelStats::for_channel(channel);

        stats.apply_totals(self.channel_totals(id).await?);
        stats.hour_usage = self.hour_usage(id).await?;
        stats.users = self.top_users(id).await?;
        for kind in StatKind::ALL {
            *stats.percentages_mut(kind) = self.percentage_stats(id, kind).await?;
        }
        stats.longest_lines = self.longest_lines(id).await?;
        stats.shortest_lines = self.shortest_lines(id).await?;
        stats.total_words = self.total_words(id).await?;
        stats.references = self.references(id).await?;
        stats.average_words = self.average_words(id).await?;

        debug!(
            channel = %stats.name,
            channel_id = id,
            lines = stats.lines,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Built channel stats"
        );
        Ok(stats)
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::Seed;
    use crate::{Database, DbError};

    #[tokio::test]
    async fn test_unknown_channel_is_not_found() {
        let db = Database::new_in_memory().await.unwrap();
        let err = db.build_channel_stats("#nowhere").await.unwrap_err();
        assert!(matches!(err, DbError::ChannelNotFound(ref t) if t == "#nowhere"));
    }

    #[tokio::test]
    async fn test_empty_channel_builds_zeroed_record() {
        let db = Database::new_in_memory().await.unwrap();
        Seed::new(&db).channel(1, "#quiet").await;

        let stats = db.build_channel_stats("#QUIET").await.unwrap();
        assert_eq!(stats.name, "#quiet");
        assert_eq!(stats.lines, 0);
        assert_eq!(stats.hour_usage, vec![0.0; 24]);
        assert!(stats.users.is_empty());
        assert!(stats.references.is_empty());
    }

    #[tokio::test]
    async fn test_failing_query_aborts_build() {
        let db = Database::new_in_memory().await.unwrap();
        let seed = Seed::new(&db);
        seed.channel(1, "#c").await;
        seed.message(1, "h-a").insert().await;

        sqlx::query(r#"DROP TABLE "references""#)
            .execute(db.pool())
            .await
            .unwrap();

        let err = db.build_channel_stats("#c").await.unwrap_err();
        assert!(matches!(err, DbError::Sqlx(_)), "got {err:?}");
    }
}
