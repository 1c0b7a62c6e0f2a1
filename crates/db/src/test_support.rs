// crates/db/src/test_support.rs
//! Fixture helpers for seeding a store in tests.
//!
//! The dashboard never writes to the message store, so these inserts exist
//! only behind `cfg(test)` or the `test-support` feature.

use kstats_core::StatKind;

use crate::Database;

/// Default message timestamp: 2023-11-14 22:13:20 UTC.
pub const DEFAULT_TIME: i64 = 1_700_000_000;

/// Inserts fixture rows into a [`Database`]. Panics on any SQL error.
pub struct Seed<'a> {
    db: &'a Database,
}

impl<'a> Seed<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    pub async fn channel(&self, id: i64, name: &str) {
        sqlx::query("INSERT INTO channels (id, channel) VALUES (?1, ?2)")
            .bind(id)
            .bind(name)
            .execute(self.db.pool())
            .await
            .expect("insert channel");
    }

    pub async fn user(&self, hash: &str, nick: &str) {
        sqlx::query("INSERT INTO users (hash, nick) VALUES (?1, ?2)")
            .bind(hash)
            .bind(nick)
            .execute(self.db.pool())
            .await
            .expect("insert user");
    }

    /// Alias `nick` to `group` within one channel.
    pub async fn group(&self, channel: i64, nick: &str, group: &str) {
        sqlx::query(r#"INSERT INTO "groups" (channel, nick, "group") VALUES (?1, ?2, ?3)"#)
            .bind(channel)
            .bind(nick)
            .bind(group)
            .execute(self.db.pool())
            .await
            .expect("insert group");
    }

    /// Record that `source` mentioned `target`. Later calls get higher ids.
    pub async fn reference(&self, channel: i64, source: &str, target: &str) {
        sqlx::query(r#"INSERT INTO "references" (channel, source, target) VALUES (?1, ?2, ?3)"#)
            .bind(channel)
            .bind(source)
            .bind(target)
            .execute(self.db.pool())
            .await
            .expect("insert reference");
    }

    /// Start building a message in `channel` from `sender`.
    pub fn message(&self, channel: i64, sender: &str) -> MessageBuilder<'a> {
        MessageBuilder {
            db: self.db,
            channel,
            sender: sender.to_string(),
            time: DEFAULT_TIME,
            words: 1,
            characters: 5,
            flags: Vec::new(),
        }
    }
}

pub struct MessageBuilder<'a> {
    db: &'a Database,
    channel: i64,
    sender: String,
    time: i64,
    words: i64,
    characters: i64,
    flags: Vec<StatKind>,
}

impl MessageBuilder<'_> {
    pub fn words(mut self, words: i64) -> Self {
        self.words = words;
        self
    }

    pub fn chars(mut self, characters: i64) -> Self {
        self.characters = characters;
        self
    }

    /// Unix seconds, UTC.
    pub fn at(mut self, time: i64) -> Self {
        self.time = time;
        self
    }

    pub fn flag(mut self, kind: StatKind) -> Self {
        self.flags.push(kind);
        self
    }

    pub async fn insert(self) {
        let has = |kind| self.flags.contains(&kind);
        sqlx::query(
            r#"
            INSERT INTO messages
                (channel, sender, time, words, characters,
                 question, exclamation, caps, emoji_happy, emoji_sad)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            "#,
        )
        .bind(self.channel)
        .bind(&self.sender)
        .bind(self.time)
        .bind(self.words)
        .bind(self.characters)
        .bind(has(StatKind::Question))
        .bind(has(StatKind::Exclamation))
        .bind(has(StatKind::Caps))
        .bind(has(StatKind::EmojiHappy))
        .bind(has(StatKind::EmojiSad))
        .execute(self.db.pool())
        .await
        .expect("insert message");
    }
}
