/// The message store schema as the logger writes it.
///
/// Only test stores are built from these; [`crate::Database::connect`] opens
/// an existing store read-only. One statement per entry.

pub const MIGRATIONS: &[&str] = &[
    // Migration 1: channels
    r#"
CREATE TABLE IF NOT EXISTS channels (
    id INTEGER PRIMARY KEY,
    channel TEXT NOT NULL UNIQUE COLLATE NOCASE
);
"#,
    // Migration 2: messages (time is unix seconds, UTC)
    r#"
CREATE TABLE IF NOT EXISTS messages (
    id INTEGER PRIMARY KEY,
    channel INTEGER NOT NULL REFERENCES channels(id),
    sender TEXT NOT NULL,
    time INTEGER NOT NULL,
    words INTEGER NOT NULL DEFAULT 0,
    characters INTEGER NOT NULL DEFAULT 0,
    question BOOLEAN NOT NULL DEFAULT 0,
    exclamation BOOLEAN NOT NULL DEFAULT 0,
    caps BOOLEAN NOT NULL DEFAULT 0,
    emoji_happy BOOLEAN NOT NULL DEFAULT 0,
    emoji_sad BOOLEAN NOT NULL DEFAULT 0
);
"#,
    r#"CREATE INDEX IF NOT EXISTS idx_messages_channel ON messages(channel, sender);"#,
    // Migration 3: sender groups, scoped per channel
    r#"
CREATE TABLE IF NOT EXISTS "groups" (
    channel INTEGER NOT NULL REFERENCES channels(id),
    nick TEXT NOT NULL,
    "group" TEXT NOT NULL,
    PRIMARY KEY (channel, nick)
);
"#,
    // Migration 4: display names for sender hashes
    r#"
CREATE TABLE IF NOT EXISTS users (
    hash TEXT PRIMARY KEY,
    nick TEXT NOT NULL
);
"#,
    // Migration 5: mentions of one sender by another
    r#"
CREATE TABLE IF NOT EXISTS "references" (
    id INTEGER PRIMARY KEY,
    channel INTEGER NOT NULL REFERENCES channels(id),
    source TEXT NOT NULL,
    target TEXT NOT NULL
);
"#,
    r#"CREATE INDEX IF NOT EXISTS idx_references_channel ON "references"(channel, target);"#,
];
