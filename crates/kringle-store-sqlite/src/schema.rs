//! SQL schema for the Kringle SQLite store.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS participants (
    email         TEXT PRIMARY KEY COLLATE NOCASE,
    name          TEXT NOT NULL,
    phone         TEXT NOT NULL,
    address       TEXT NOT NULL,
    registered_at TEXT NOT NULL    -- ISO 8601 UTC; store-assigned
);

-- Wholesale-replaced by each permitted generation pass. The only in-place
-- mutation ever issued is flipping notified/sent_at during a send pass.
CREATE TABLE IF NOT EXISTS assignments (
    giver_email      TEXT PRIMARY KEY COLLATE NOCASE,
    giver_name       TEXT NOT NULL,
    receiver_email   TEXT NOT NULL,
    receiver_name    TEXT NOT NULL,
    receiver_phone   TEXT NOT NULL,
    receiver_address TEXT NOT NULL,
    notified         INTEGER NOT NULL DEFAULT 0,
    sent_at          TEXT,            -- ISO 8601 UTC or NULL
    generation_id    TEXT NOT NULL,
    CHECK (giver_email != receiver_email)
);

PRAGMA user_version = 1;
";
