// crates/core/src/stat_kind.rs
//! The closed set of per-message flags the dashboard reports percentages for.

use serde::{Deserialize, Serialize};

/// A boolean message flag that gets a "percentage of lines" leaderboard.
///
/// Each variant corresponds to exactly one column of the `messages` table.
/// The query layer maps variants to literal SQL, so a flag name never ends up
/// spliced into query text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatKind {
    Question,
    Exclamation,
    Caps,
    EmojiHappy,
    EmojiSad,
}

impl StatKind {
    /// Every kind, in the order the dashboard shows them.
    pub const ALL: [StatKind; 5] = [
        StatKind::Question,
        StatKind::Exclamation,
        StatKind::Caps,
        StatKind::EmojiHappy,
        StatKind::EmojiSad,
    ];

    /// Name of the backing `messages` column.
    pub fn column(self) -> &'static str {
        match self {
            StatKind::Question => "question",
            StatKind::Exclamation => "exclamation",
            StatKind::Caps => "caps",
            StatKind::EmojiHappy => "emoji_happy",
            StatKind::EmojiSad => "emoji_sad",
        }
    }
}

impl std::fmt::Display for StatKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.column())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_columns_are_distinct() {
        let mut columns: Vec<_> = StatKind::ALL.iter().map(|k| k.column()).collect();
        columns.sort();
        columns.dedup();
        assert_eq!(columns.len(), StatKind::ALL.len());
    }

    #[test]
    fn test_serde_uses_column_names() {
        for kind in StatKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.column()));
        }
    }
}
