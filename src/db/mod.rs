//! SQLite persistence for normalized cases.
//!
//! Each case is written in its own transaction: the case row, its citation,
//! its events and the join rows either all land or none do.

mod schema;

pub use schema::init_tables;

use crate::timeline::{NormalizedCase, NormalizedEvent};
use crate::utils::error::PersistenceError;
use log::{debug, info, warn};
use rusqlite::{params, Connection, Transaction};
use std::path::Path;

/// Monotonic event primary-key generator, scoped to one run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct EventIdSequence {
    last: i64,
}

impl EventIdSequence {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> i64 {
        self.last += 1;
        self.last
    }

    /// Last id handed out, 0 before the first
    pub fn current(&self) -> i64 {
        self.last
    }
}

/// Outcome of storing a batch
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StoreReport {
    pub cases_written: usize,
    pub events_written: usize,
    pub cases_failed: usize,
}

/// Relational store for cases and events
pub struct CaseStore {
    conn: Connection,
    event_ids: EventIdSequence,
}

impl CaseStore {
    /// Open (or create) the database file and reset the schema
    pub fn open(path: impl AsRef<Path>) -> Result<Self, PersistenceError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                debug!("Creating database directory: {}", parent.display());
                std::fs::create_dir_all(parent)?;
            }
        }

        info!("Opening case database: {}", path.display());
        Self::from_connection(Connection::open(path)?)
    }

    pub fn open_in_memory() -> Result<Self, PersistenceError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(mut conn: Connection) -> Result<Self, PersistenceError> {
        conn.pragma_update(None, "foreign_keys", "ON")?;
        init_tables(&mut conn)?;

        Ok(Self {
            conn,
            event_ids: EventIdSequence::new(),
        })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn event_ids(&self) -> EventIdSequence {
        self.event_ids
    }

    /// Store one case with its citation and events
    ///
    /// On failure the transaction is rolled back and the event-id sequence is
    /// restored, so the next case continues without a gap.
    pub fn save_case(&mut self, case: &NormalizedCase) -> Result<usize, PersistenceError> {
        let checkpoint = self.event_ids;
        let result = write_case(&mut self.conn, &mut self.event_ids, case);

        if result.is_err() {
            self.event_ids = checkpoint;
        }

        result.map_err(|source| PersistenceError::CaseWrite {
            case_id: case.case_id,
            source,
        })
    }

    /// Store every case, logging and skipping those that fail
    pub fn save_all<'a>(&mut self, cases: impl IntoIterator<Item = &'a NormalizedCase>) -> StoreReport {
        let mut report = StoreReport::default();

        for case in cases {
            match self.save_case(case) {
                Ok(events) => {
                    report.cases_written += 1;
                    report.events_written += events;
                }
                Err(e) => {
                    warn!("Rolled back case {} ({}): {}", case.case_id, case.name, e);
                    report.cases_failed += 1;
                }
            }
        }

        info!(
            "Stored {} cases and {} events ({} rolled back)",
            report.cases_written, report.events_written, report.cases_failed
        );
        report
    }
}

fn write_case(
    conn: &mut Connection,
    ids: &mut EventIdSequence,
    case: &NormalizedCase,
) -> rusqlite::Result<usize> {
    let tx = conn.transaction()?;

    tx.execute(
        "INSERT INTO cases (case_id, name, case_href, view_count, docket_number, question,
                            term, description, justia_url, case_duration, argued_duration, delib_duration)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
        params![
            case.case_id,
            case.name,
            case.case_href,
            case.view_count,
            case.docket_number,
            case.question,
            case.term,
            case.description,
            case.justia_url,
            case.case_duration,
            case.argued_duration,
            case.delib_duration,
        ],
    )?;

    let citation = &case.citation;
    tx.execute(
        "INSERT INTO citations (case_id, volume, page, year, href) VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            case.case_id,
            parse_int(&citation.volume),
            parse_int(&citation.page),
            parse_int(&citation.year),
            citation.href,
        ],
    )?;

    for event in &case.timeline {
        write_event(&tx, ids.next_id(), event)?;
    }

    tx.commit()?;
    debug!("Stored case {} with {} events", case.case_id, case.timeline.len());
    Ok(case.timeline.len())
}

fn write_event(tx: &Transaction<'_>, event_id: i64, event: &NormalizedEvent) -> rusqlite::Result<()> {
    tx.execute(
        "INSERT INTO events (event_id, type_id, label, year, month, day, weekday)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            event_id,
            event.event_type.type_id(),
            event.event_type.label(),
            parse_int(&event.year),
            parse_int(&event.month),
            parse_int(&event.day),
            event.weekday,
        ],
    )?;
    tx.execute(
        "INSERT INTO cases_events (event_id, case_id) VALUES (?1, ?2)",
        params![event_id, event.case_id],
    )?;
    Ok(())
}

fn parse_int(value: &str) -> Option<i64> {
    value.trim().parse().ok()
}
