//! Database schema for the content store.

use rusqlite::{params, Connection};

/// Current schema version, recorded in `schema_version` on open.
pub const SCHEMA_VERSION: u32 = 1;

/// SQL schema for the content database.
pub const SCHEMA: &str = r"
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

-- Multi-day journeys
CREATE TABLE IF NOT EXISTS journeys (
    id TEXT PRIMARY KEY NOT NULL,
    title TEXT NOT NULL,
    slug TEXT NOT NULL UNIQUE,
    hero_image_url TEXT,
    short_description TEXT,
    arc_description TEXT,
    duration_days INTEGER,
    price_eur REAL,
    epic_price_eur REAL,
    start_city TEXT,
    focus_type TEXT,
    route_sequence TEXT,
    category TEXT,
    destinations TEXT,
    journey_type TEXT,
    marketing_priority TEXT,
    region TEXT,
    tags TEXT,
    tagline TEXT,
    published INTEGER NOT NULL DEFAULT 1,
    show_on_journeys_page INTEGER NOT NULL DEFAULT 1,
    featured_on_homepage INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);

-- Day trips and their per-person add-ons
CREATE TABLE IF NOT EXISTS day_trips (
    slug TEXT PRIMARY KEY NOT NULL,
    route_id TEXT,
    title TEXT NOT NULL,
    short_description TEXT,
    duration_hours REAL,
    final_price_mad REAL,
    final_price_eur REAL,
    departure_city TEXT,
    category TEXT,
    hero_image_url TEXT,
    includes TEXT,
    excludes TEXT,
    meeting_point TEXT,
    published INTEGER NOT NULL DEFAULT 1,
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS day_trip_addons (
    addon_id TEXT PRIMARY KEY NOT NULL,
    addon_name TEXT NOT NULL,
    description TEXT,
    final_price_mad_pp REAL,
    final_price_eur_pp REAL,
    applies_to TEXT,
    published INTEGER NOT NULL DEFAULT 1,
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
);

-- Key/value site content
CREATE TABLE IF NOT EXISTS website_settings (
    key TEXT PRIMARY KEY NOT NULL,
    value TEXT,
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE TABLE IF NOT EXISTS gentle_settings (
    key TEXT PRIMARY KEY NOT NULL,
    value TEXT
);

-- Footer
CREATE TABLE IF NOT EXISTS footer_links (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    column_number INTEGER NOT NULL DEFAULT 1,
    column_title TEXT NOT NULL DEFAULT '',
    link_order INTEGER NOT NULL DEFAULT 0,
    link_label TEXT NOT NULL DEFAULT '',
    link_href TEXT NOT NULL DEFAULT '',
    link_type TEXT NOT NULL DEFAULT 'link'
);

CREATE TABLE IF NOT EXISTS footer_legal (
    site_id TEXT PRIMARY KEY NOT NULL,
    legal_links TEXT,
    copyright_text TEXT
);

-- Team, guides and the gentle journeys collection
CREATE TABLE IF NOT EXISTS website_team (
    team_id TEXT PRIMARY KEY NOT NULL,
    name TEXT NOT NULL,
    role TEXT NOT NULL DEFAULT '',
    quote TEXT,
    bio TEXT,
    image_url TEXT,
    published INTEGER NOT NULL DEFAULT 1,
    sort_order INTEGER NOT NULL DEFAULT 0,
    show_on_gentle INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS website_guides (
    guide_id TEXT PRIMARY KEY NOT NULL,
    title TEXT NOT NULL,
    slug TEXT NOT NULL,
    subtitle TEXT,
    image_url TEXT,
    description TEXT,
    published INTEGER NOT NULL DEFAULT 1,
    sort_order INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS gentle_journeys (
    journey_id TEXT PRIMARY KEY NOT NULL,
    title TEXT NOT NULL,
    slug TEXT NOT NULL,
    hero_image_url TEXT,
    tagline TEXT,
    description TEXT,
    duration_days INTEGER,
    price_eur REAL,
    published INTEGER NOT NULL DEFAULT 1,
    route_cities TEXT,
    highlights TEXT,
    accessibility_notes TEXT,
    sort_order INTEGER NOT NULL DEFAULT 0
);

-- Chatbot keyword table
CREATE TABLE IF NOT EXISTS chatbot_training (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    category TEXT NOT NULL DEFAULT '',
    question TEXT,
    answer TEXT,
    keywords TEXT,
    sort_order INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS testimonials (
    testimonial_id TEXT PRIMARY KEY NOT NULL,
    quote TEXT,
    author TEXT,
    journey_title TEXT,
    published INTEGER NOT NULL DEFAULT 1,
    sort_order INTEGER NOT NULL DEFAULT 0
);

-- Inbound requests
CREATE TABLE IF NOT EXISTS quotes (
    quote_id TEXT PRIMARY KEY NOT NULL,
    name TEXT,
    email TEXT,
    country TEXT,
    travel_dates TEXT,
    flexibility TEXT,
    group_size INTEGER,
    interests TEXT,
    accommodation_style TEXT,
    pace TEXT,
    budget TEXT,
    notes TEXT,
    status TEXT NOT NULL DEFAULT 'new',
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS overnight_bookings (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    booking_id TEXT NOT NULL UNIQUE,
    guest_name TEXT,
    guest_email TEXT,
    property TEXT,
    room_type TEXT,
    check_in TEXT,
    check_out TEXT,
    guests INTEGER,
    total_price REAL,
    currency TEXT NOT NULL DEFAULT 'EUR',
    notes TEXT,
    status TEXT NOT NULL DEFAULT 'pending',
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS proposals (
    proposal_id TEXT PRIMARY KEY NOT NULL,
    client_id TEXT,
    client_name TEXT,
    country TEXT,
    hero_image_url TEXT,
    hero_title TEXT,
    hero_blurb TEXT,
    start_date TEXT,
    end_date TEXT,
    days INTEGER,
    nights INTEGER,
    num_guests INTEGER,
    total_price REAL,
    formatted_price TEXT,
    route_points TEXT,
    days_list TEXT,
    created_at TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS stories (
    id TEXT PRIMARY KEY NOT NULL,
    slug TEXT NOT NULL UNIQUE,
    title TEXT NOT NULL,
    subtitle TEXT,
    category TEXT,
    source_type TEXT,
    hero_image TEXT,
    mj_prompt TEXT,
    hero_caption TEXT,
    excerpt TEXT,
    body TEXT,
    read_time INTEGER,
    year INTEGER,
    text_by TEXT,
    images_by TEXT,
    sources TEXT,
    tags TEXT,
    published INTEGER NOT NULL DEFAULT 1,
    featured INTEGER NOT NULL DEFAULT 0,
    sort_order INTEGER,
    the_facts TEXT,
    region TEXT,
    country TEXT,
    theme TEXT,
    era TEXT,
    era_start INTEGER,
    era_end INTEGER,
    related_place_slugs TEXT,
    related_story_slugs TEXT,
    seo_title TEXT,
    seo_description TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

-- Schema version table for migrations
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER PRIMARY KEY NOT NULL,
    applied_at TEXT NOT NULL DEFAULT (datetime('now'))
);

CREATE INDEX IF NOT EXISTS idx_journeys_published ON journeys(published);
CREATE INDEX IF NOT EXISTS idx_quotes_created_at ON quotes(created_at);
CREATE INDEX IF NOT EXISTS idx_quotes_email ON quotes(email);
CREATE INDEX IF NOT EXISTS idx_proposals_created_at ON proposals(created_at);
CREATE INDEX IF NOT EXISTS idx_chatbot_training_sort_order ON chatbot_training(sort_order);
";

/// Create any missing tables and record the current schema version.
pub(crate) fn apply(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(SCHEMA)?;
    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version) VALUES (?1)",
        params![SCHEMA_VERSION],
    )?;
    Ok(())
}

/// Highest schema version recorded in the database, if any.
pub(crate) fn recorded_version(conn: &Connection) -> rusqlite::Result<Option<u32>> {
    conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| {
        row.get(0)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    fn table_exists(conn: &Connection, name: &str) -> bool {
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name=?",
                [name],
                |row| row.get(0),
            )
            .unwrap();
        count == 1
    }

    #[test]
    fn test_apply_records_version_once() {
        let conn = Connection::open_in_memory().unwrap();
        assert!(apply(&conn).is_ok());
        assert!(apply(&conn).is_ok());

        let rows: i64 = conn
            .query_row("SELECT COUNT(*) FROM schema_version", [], |row| row.get(0))
            .unwrap();
        assert_eq!(rows, 1);
        assert_eq!(recorded_version(&conn).unwrap(), Some(SCHEMA_VERSION));
    }

    #[test]
    fn test_recorded_version_empty_table() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(SCHEMA).unwrap();
        assert_eq!(recorded_version(&conn).unwrap(), None);
    }

    #[test]
    fn test_schema_creates_tables() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(SCHEMA).unwrap();

        let expected = [
            "journeys",
            "day_trips",
            "day_trip_addons",
            "website_settings",
            "gentle_settings",
            "footer_links",
            "footer_legal",
            "website_team",
            "website_guides",
            "gentle_journeys",
            "chatbot_training",
            "testimonials",
            "quotes",
            "overnight_bookings",
            "proposals",
            "stories",
            "schema_version",
        ];
        for table in expected {
            assert!(table_exists(&conn, table), "Table {table} should exist");
        }
    }

    #[test]
    fn test_schema_idempotent() {
        let conn = Connection::open_in_memory().unwrap();

        conn.execute_batch(SCHEMA).unwrap();
        conn.execute_batch(SCHEMA).unwrap();

        assert!(table_exists(&conn, "chatbot_training"));
    }

    #[test]
    fn test_story_slug_unique() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(SCHEMA).unwrap();

        conn.execute(
            "INSERT INTO stories (id, slug, title, created_at, updated_at)
             VALUES ('a', 'blue-city', 'Blue City', datetime('now'), datetime('now'))",
            [],
        )
        .unwrap();
        let duplicate = conn.execute(
            "INSERT INTO stories (id, slug, title, created_at, updated_at)
             VALUES ('b', 'blue-city', 'Again', datetime('now'), datetime('now'))",
            [],
        );
        assert!(duplicate.is_err());
    }

    #[test]
    fn test_footer_link_defaults() {
        let conn = Connection::open_in_memory().unwrap();
        conn.execute_batch(SCHEMA).unwrap();

        conn.execute("INSERT INTO footer_links (link_label) VALUES ('About')", [])
            .unwrap();
        let (column, link_type): (i64, String) = conn
            .query_row(
                "SELECT column_number, link_type FROM footer_links",
                [],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .unwrap();
        assert_eq!(column, 1);
        assert_eq!(link_type, "link");
    }
}
