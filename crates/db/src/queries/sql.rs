// crates/db/src/queries/sql.rs
// Literal SQL for every channel statistic.
//
// Bind order for the per-group queries: ?1 = channel id, ?2 = row limit,
// ?3 = placeholder name for senders without a `users` row.
//
// A sender's statistical identity is its alias in `groups` for that channel,
// falling back to the raw sender hash.

use kstats_core::StatKind;

pub(super) const FIND_CHANNEL: &str =
    "SELECT id, channel FROM channels WHERE channel = ?1 COLLATE NOCASE";

pub(super) const TOTALS: &str = r#"
SELECT
    COUNT(*),
    COALESCE(SUM(words), 0),
    COALESCE(AVG(words), 0.0),
    COALESCE(AVG(characters), 0.0)
FROM messages
WHERE channel = ?1
"#;

/// 24 rows, hour 0 first; hours without messages report 0.
pub(super) const HOUR_COUNTS: &str = r#"
WITH RECURSIVE series(hour) AS (
    SELECT 0
    UNION ALL
    SELECT hour + 1 FROM series WHERE hour < 23
),
counts AS (
    SELECT CAST(strftime('%H', time, 'unixepoch') AS INTEGER) AS hour, COUNT(*) AS count
    FROM messages
    WHERE channel = ?1
    GROUP BY hour
)
SELECT COALESCE(counts.count, 0)
FROM series
LEFT JOIN counts ON series.hour = counts.hour
ORDER BY series.hour
"#;

/// Builds the percentage leaderboard query for one flag column.
///
/// Percentages are rounded to whole numbers; groups that round to 0 are
/// left out. Lowest percentage first.
macro_rules! percentage_query {
    ($column:literal) => {
        concat!(
            "SELECT COALESCE(u.nick, ?3) AS name, t.value FROM (",
            "SELECT COALESCE(g.\"group\", m.sender) AS hash, ",
            "ROUND(SUM(CASE WHEN m.",
            $column,
            " THEN 1 ELSE 0 END) * 100.0 / COUNT(*)) AS value ",
            "FROM messages m ",
            "LEFT JOIN \"groups\" g ON m.sender = g.nick AND g.channel = ?1 ",
            "WHERE m.channel = ?1 GROUP BY hash",
            ") t LEFT JOIN users u ON t.hash = u.hash ",
            "WHERE t.value > 0 ",
            "ORDER BY t.value ASC, name ASC LIMIT ?2"
        )
    };
}

pub(super) fn percentage(kind: StatKind) -> &'static str {
    match kind {
        StatKind::Question => percentage_query!("question"),
        StatKind::Exclamation => percentage_query!("exclamation"),
        StatKind::Caps => percentage_query!("caps"),
        StatKind::EmojiHappy => percentage_query!("emoji_happy"),
        StatKind::EmojiSad => percentage_query!("emoji_sad"),
    }
}

pub(super) const LONGEST_LINES: &str = r#"
SELECT COALESCE(u.nick, ?3) AS name, t.value
FROM (
    SELECT COALESCE(g."group", m.sender) AS hash, AVG(m.characters) AS value
    FROM messages m
    LEFT JOIN "groups" g ON m.sender = g.nick AND g.channel = ?1
    WHERE m.channel = ?1
    GROUP BY hash
) t
LEFT JOIN users u ON t.hash = u.hash
ORDER BY t.value DESC, name ASC
LIMIT ?2
"#;

pub(super) const SHORTEST_LINES: &str = r#"
SELECT COALESCE(u.nick, ?3) AS name, t.value
FROM (
    SELECT COALESCE(g."group", m.sender) AS hash, AVG(m.characters) AS value
    FROM messages m
    LEFT JOIN "groups" g ON m.sender = g.nick AND g.channel = ?1
    WHERE m.channel = ?1
    GROUP BY hash
) t
LEFT JOIN users u ON t.hash = u.hash
ORDER BY t.value ASC, name ASC
LIMIT ?2
"#;

pub(super) const TOTAL_WORDS: &str = r#"
SELECT COALESCE(u.nick, ?3) AS name, t.value
FROM (
    SELECT COALESCE(g."group", m.sender) AS hash, SUM(m.words) AS value
    FROM messages m
    LEFT JOIN "groups" g ON m.sender = g.nick AND g.channel = ?1
    WHERE m.channel = ?1
    GROUP BY hash
) t
LEFT JOIN users u ON t.hash = u.hash
ORDER BY t.value DESC, name ASC
LIMIT ?2
"#;

pub(super) const AVERAGE_WORDS: &str = r#"
SELECT COALESCE(u.nick, ?3) AS name, t.value
FROM (
    SELECT COALESCE(g."group", m.sender) AS hash, AVG(m.words) AS value
    FROM messages m
    LEFT JOIN "groups" g ON m.sender = g.nick AND g.channel = ?1
    WHERE m.channel = ?1
    GROUP BY hash
) t
LEFT JOIN users u ON t.hash = u.hash
ORDER BY t.value DESC, name ASC
LIMIT ?2
"#;

pub(super) const TOP_USERS: &str = r#"
SELECT
    COALESCE(u.nick, ?3) AS name,
    t.lines,
    t.words,
    t.words_per_line,
    t.last_seen
FROM (
    SELECT
        COALESCE(g."group", m.sender) AS hash,
        COUNT(*) AS lines,
        SUM(m.words) AS words,
        AVG(m.words) AS words_per_line,
        MAX(m.time) AS last_seen
    FROM messages m
    LEFT JOIN "groups" g ON m.sender = g.nick AND g.channel = ?1
    WHERE m.channel = ?1
    GROUP BY hash
) t
LEFT JOIN users u ON t.hash = u.hash
ORDER BY t.lines DESC, name ASC
LIMIT ?2
"#;

/// Reference counts per mentioned group, with the group behind the newest
/// mention (highest reference id).
pub(super) const REFERENCES: &str = r#"
WITH refs AS (
    SELECT
        r.id,
        COALESCE(gt."group", r.target) AS target,
        COALESCE(gs."group", r.source) AS source
    FROM "references" r
    LEFT JOIN "groups" gt ON r.target = gt.nick AND gt.channel = ?1
    LEFT JOIN "groups" gs ON r.source = gs.nick AND gs.channel = ?1
    WHERE r.channel = ?1
),
totals AS (
    SELECT target, COUNT(*) AS count, MAX(id) AS last_id
    FROM refs
    GROUP BY target
)
SELECT
    COALESCE(ut.nick, ?3) AS name,
    totals.count,
    COALESCE(us.nick, ?3) AS last_used
FROM totals
JOIN refs ON refs.id = totals.last_id
LEFT JOIN users ut ON totals.target = ut.hash
LEFT JOIN users us ON refs.source = us.hash
ORDER BY totals.count DESC, name ASC
LIMIT ?2
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentage_queries_name_their_column() {
        for kind in StatKind::ALL {
            let sql = percentage(kind);
            assert!(
                sql.contains(&format!("m.{} THEN", kind.column())),
                "{kind} query should test its own column"
            );
            assert!(sql.contains("WHERE t.value > 0"));
            assert!(sql.contains("ORDER BY t.value ASC"));
        }
    }

    #[test]
    fn test_percentage_queries_are_distinct() {
        let mut queries: Vec<_> = StatKind::ALL.iter().map(|k| percentage(*k)).collect();
        queries.sort();
        queries.dedup();
        assert_eq!(queries.len(), StatKind::ALL.len());
    }
}
