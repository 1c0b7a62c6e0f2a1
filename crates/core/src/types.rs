// crates/core/src/types.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::StatKind;

/// A channel row resolved from its token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Channel {
    pub id: i64,
    pub name: String,
}

/// Whole-channel counters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelTotals {
    pub lines: i64,
    pub words: i64,
    pub words_per_line: f64,
    pub characters_per_line: f64,
}

/// A sender group with one floating-point statistic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloatEntry {
    pub name: String,
    pub value: f64,
}

/// A sender group's total word count.
///
/// `previous` is the name of the entry ranked just above this one (empty for
/// the first row), so a template can write "X beat Y" without lookbehind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TotalEntry {
    pub name: String,
    pub value: i64,
    pub previous: String,
}

/// One row of the top-users table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserStats {
    pub name: String,
    pub lines: i64,
    pub words: i64,
    pub words_per_line: f64,
    pub last_seen: DateTime<Utc>,
}

/// How often a sender group gets mentioned, and who mentioned it last.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceEntry {
    pub name: String,
    pub count: i64,
    pub last_used: String,
}

/// Every statistic the dashboard shows for one channel.
///
/// Built in one pass by the query layer and cached as JSON; a record is either
/// complete or not produced at all.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelStats {
    pub id: i64,
    pub name: String,
    pub lines: i64,
    pub words: i64,
    pub words_per_line: f64,
    pub characters_per_line: f64,
    /// 24 buckets, UTC hour 0 first, scaled so the busiest hour is 100.
    pub hour_usage: Vec<f64>,
    pub users: Vec<UserStats>,
    pub questions: Vec<FloatEntry>,
    pub exclamations: Vec<FloatEntry>,
    pub caps: Vec<FloatEntry>,
    pub emoji_happy: Vec<FloatEntry>,
    pub emoji_sad: Vec<FloatEntry>,
    pub longest_lines: Vec<FloatEntry>,
    pub shortest_lines: Vec<FloatEntry>,
    pub total_words: Vec<TotalEntry>,
    pub average_words: Vec<FloatEntry>,
    pub references: Vec<ReferenceEntry>,
}

impl ChannelStats {
    /// Start a record for a resolved channel with every statistic empty.
    pub fn for_channel(channel: Channel) -> Self {
        Self {
            id: channel.id,
            name: channel.name,
            ..Self::default()
        }
    }

    pub fn apply_totals(&mut self, totals: ChannelTotals) {
        self.lines = totals.lines;
        self.words = totals.words;
        self.words_per_line = totals.words_per_line;
        self.characters_per_line = totals.characters_per_line;
    }

    /// The percentage leaderboard for a flag.
    pub fn percentages(&self, kind: StatKind) -> &[FloatEntry] {
        match kind {
            StatKind::Question => &self.questions,
            StatKind::Exclamation => &self.exclamations,
            StatKind::Caps => &self.caps,
            StatKind::EmojiHappy => &self.emoji_happy,
            StatKind::EmojiSad => &self.emoji_sad,
        }
    }

    pub fn percentages_mut(&mut self, kind: StatKind) -> &mut Vec<FloatEntry> {
        match kind {
            StatKind::Question => &mut self.questions,
            StatKind::Exclamation => &mut self.exclamations,
            StatKind::Caps => &mut self.caps,
            StatKind::EmojiHappy => &mut self.emoji_happy,
            StatKind::EmojiSad => &mut self.emoji_sad,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn sample() -> ChannelStats {
        let mut stats = ChannelStats::for_channel(Channel {
            id: 7,
            name: "#rust".to_string(),
        });
        stats.apply_totals(ChannelTotals {
            lines: 3,
            words: 36,
            words_per_line: 12.0,
            characters_per_line: 60.5,
        });
        stats.hour_usage = vec![0.0; 24];
        stats.users.push(UserStats {
            name: "alice".to_string(),
            lines: 3,
            words: 36,
            words_per_line: 12.0,
            last_seen: Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap(),
        });
        stats.percentages_mut(StatKind::Caps).push(FloatEntry {
            name: "bob".to_string(),
            value: 25.0,
        });
        stats.total_words.push(TotalEntry {
            name: "alice".to_string(),
            value: 36,
            previous: String::new(),
        });
        stats.references.push(ReferenceEntry {
            name: "alice".to_string(),
            count: 4,
            last_used: "bob".to_string(),
        });
        stats
    }

    #[test]
    fn test_for_channel_starts_empty() {
        let stats = ChannelStats::for_channel(Channel {
            id: 1,
            name: "#empty".to_string(),
        });
        assert_eq!(stats.id, 1);
        assert_eq!(stats.name, "#empty");
        assert_eq!(stats.lines, 0);
        assert!(stats.users.is_empty());
        assert!(stats.hour_usage.is_empty());
    }

    #[test]
    fn test_percentages_accessor_matches_field() {
        let stats = sample();
        assert_eq!(stats.percentages(StatKind::Caps), stats.caps.as_slice());
        assert!(stats.percentages(StatKind::Question).is_empty());
    }

    #[test]
    fn test_json_round_trip_preserves_record() {
        let stats = sample();
        let json = serde_json::to_vec(&stats).unwrap();
        let back: ChannelStats = serde_json::from_slice(&json).unwrap();
        assert_eq!(back, stats);
    }

    #[test]
    fn test_json_uses_camel_case() {
        let json = serde_json::to_value(sample()).unwrap();
        assert!(json.get("wordsPerLine").is_some());
        assert!(json.get("hourUsage").is_some());
        assert!(json["users"][0].get("lastSeen").is_some());
        assert_eq!(json["references"][0]["lastUsed"], "bob");
    }
}
