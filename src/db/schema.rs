//! Relational schema for cases, citations and events.

use rusqlite::{params, Connection};

use crate::timeline::EventKind;

/// Tables in dependency order, dropped in reverse before each run
const TABLES: &[&str] = &["event_types", "cases", "citations", "events", "cases_events"];

const CREATE_SQL: &str = "
CREATE TABLE event_types (
    type_id INTEGER NOT NULL PRIMARY KEY,
    name    TEXT NOT NULL
);

CREATE TABLE cases (
    case_id         INTEGER NOT NULL PRIMARY KEY,
    name            TEXT NOT NULL,
    case_href       TEXT,
    view_count      INTEGER,
    docket_number   TEXT,
    question        TEXT,
    term            TEXT,
    description     TEXT,
    justia_url      TEXT,
    case_duration   INTEGER,
    argued_duration INTEGER,
    delib_duration  INTEGER
);

CREATE TABLE citations (
    case_id INTEGER NOT NULL PRIMARY KEY REFERENCES cases(case_id),
    volume  INTEGER,
    page    INTEGER,
    year    INTEGER,
    href    TEXT
);

CREATE TABLE events (
    event_id INTEGER NOT NULL PRIMARY KEY,
    type_id  INTEGER NOT NULL REFERENCES event_types(type_id),
    label    TEXT NOT NULL,
    year     INTEGER,
    month    INTEGER,
    day      INTEGER,
    weekday  TEXT
);

CREATE TABLE cases_events (
    event_id INTEGER NOT NULL REFERENCES events(event_id),
    case_id  INTEGER NOT NULL REFERENCES cases(case_id)
);
";

/// Drop and recreate every table, then seed `event_types`
pub fn init_tables(conn: &mut Connection) -> rusqlite::Result<()> {
    let tx = conn.transaction()?;

    for table in TABLES.iter().rev() {
        tx.execute_batch(&format!("DROP TABLE IF EXISTS {table};"))?;
    }
    tx.execute_batch(CREATE_SQL)?;

    {
        let mut stmt = tx.prepare("INSERT INTO event_types (type_id, name) VALUES (?1, ?2)")?;
        let kinds = [
            EventKind::Argued,
            EventKind::Decided,
            EventKind::Reargued,
            EventKind::Other("Other".to_string()),
        ];
        for kind in &kinds {
            stmt.execute(params![kind.type_id(), kind.label()])?;
        }
    }

    tx.commit()
}
