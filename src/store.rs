// src/store.rs
//! Dataset file I/O.
//!
//! The scraper writes one delimited text file (CSV by default, TSV on
//! request) and optionally a SQLite copy; the dashboard loads whichever it
//! is pointed at. The extension decides: `.tsv` is tab-separated, `.db` /
//! `.sqlite` / `.sqlite3` is SQLite, anything else is comma-separated.

use std::path::{Path, PathBuf};

use rusqlite::{Connection, params};
use tracing::info;

use crate::config::ExportFormat;
use crate::core::sanitize::is_plain_identifier;
use crate::error::StoreError;
use crate::file::ensure_parent;
use crate::model::{AgeGroup, FieldError, FinishTime, RunnerResult};

/// Column order of the dataset file.
pub const HEADERS: [&str; 9] = [
    "Category", "Rang", "Fullname", "Age_year", "Location",
    "total_time", "run_link", "run_year", "age_group",
];

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Dataset {
    pub rows: Vec<RunnerResult>,
}

impl Dataset {
    pub fn new(rows: Vec<RunnerResult>) -> Self { Self { rows } }
    pub fn len(&self) -> usize { self.rows.len() }
    pub fn is_empty(&self) -> bool { self.rows.is_empty() }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreKind {
    Delimited(u8),
    Sqlite,
}

impl StoreKind {
    pub fn for_path(path: &Path) -> Self {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("tsv") => StoreKind::Delimited(b'\t'),
            Some("db" | "sqlite" | "sqlite3") => StoreKind::Sqlite,
            _ => StoreKind::Delimited(b','),
        }
    }
}

/* ---------------- Delimited text ---------------- */

/// Create/truncate `path` and write all rows with a header line.
pub fn save_dataset(path: &Path, ds: &Dataset, format: ExportFormat) -> Result<PathBuf, StoreError> {
    ensure_parent(path)?;
    let mut w = csv::WriterBuilder::new()
        .delimiter(format.delim())
        .has_headers(false)
        .from_path(path)?;

    w.write_record(HEADERS)?;
    for row in &ds.rows {
        w.serialize(row)?;
    }
    w.flush()?;

    info!(path = %path.display(), rows = ds.len(), "dataset written");
    Ok(path.to_path_buf())
}

/// Load a dataset file, picking the reader from the extension.
/// A missing file is [`StoreError::Missing`].
pub fn load_dataset(path: &Path, table: &str) -> Result<Dataset, StoreError> {
    if !path.is_file() {
        return Err(StoreError::Missing { path: path.to_path_buf() });
    }
    let ds = match StoreKind::for_path(path) {
        StoreKind::Delimited(delim) => load_delimited(path, delim)?,
        StoreKind::Sqlite => load_sqlite(path, table)?,
    };
    info!(path = %path.display(), rows = ds.len(), "dataset loaded");
    Ok(ds)
}

fn load_delimited(path: &Path, delim: u8) -> Result<Dataset, StoreError> {
    let mut r = csv::ReaderBuilder::new()
        .delimiter(delim)
        .has_headers(true)
        .from_path(path)?;

    let mut rows = Vec::new();
    for (i, rec) in r.deserialize::<RunnerResult>().enumerate() {
        let row = rec?;
        check_row(i + 1, &row)?;
        rows.push(row);
    }
    Ok(Dataset { rows })
}

fn check_row(row: usize, r: &RunnerResult) -> Result<(), StoreError> {
    match AgeGroup::from_years(r.run_year, r.birth_year) {
        Some(g) if g == r.age_group => Ok(()),
        Some(g) => Err(StoreError::Record {
            row,
            message: format!("age_group {} does not match age {} ({g})", r.age_group, r.age()),
        }),
        None => Err(StoreError::Record {
            row,
            message: format!("non-positive age {}", r.age()),
        }),
    }
}

/* ---------------- SQLite ---------------- */

fn checked_table(table: &str) -> Result<&str, StoreError> {
    if is_plain_identifier(table) {
        Ok(table)
    } else {
        Err(StoreError::TableName(table.to_string()))
    }
}

/// Replace `table` in the database at `path` with the dataset rows.
pub fn save_sqlite(path: &Path, table: &str, ds: &Dataset) -> Result<PathBuf, StoreError> {
    let table = checked_table(table)?;
    ensure_parent(path)?;
    let mut conn = Connection::open(path)?;
    let tx = conn.transaction()?;

    tx.execute(&format!("DROP TABLE IF EXISTS {table}"), [])?;
    tx.execute(
        &format!(
            r#"
            CREATE TABLE {table} (
                Category   TEXT NOT NULL,
                Rang       TEXT NOT NULL,
                Fullname   TEXT NOT NULL,
                Age_year   INTEGER NOT NULL,
                Location   TEXT NOT NULL,
                total_time TEXT,
                run_link   TEXT NOT NULL,
                run_year   INTEGER NOT NULL,
                age_group  TEXT NOT NULL
            )
            "#
        ),
        [],
    )?;
    {
        let mut stmt = tx.prepare(&format!(
            "INSERT INTO {table} ({}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            HEADERS.join(", ")
        ))?;
        for r in &ds.rows {
            stmt.execute(params![
                r.category,
                r.rank.to_string(),
                r.fullname,
                r.birth_year,
                r.location,
                r.total_time.map(|t| t.to_string()),
                r.run_link,
                r.run_year,
                r.age_group.label(),
            ])?;
        }
    }
    tx.commit()?;

    info!(path = %path.display(), table, rows = ds.len(), "sqlite table replaced");
    Ok(path.to_path_buf())
}

type SqlRow = (String, String, String, i32, String, Option<String>, String, i32, String);

pub fn load_sqlite(path: &Path, table: &str) -> Result<Dataset, StoreError> {
    let table = checked_table(table)?;
    if !path.is_file() {
        return Err(StoreError::Missing { path: path.to_path_buf() });
    }
    let conn = Connection::open(path)?;
    let mut stmt = conn.prepare(&format!(
        "SELECT {} FROM {table} ORDER BY rowid",
        HEADERS.join(", ")
    ))?;
    let raw = stmt
        .query_map([], |row| {
            Ok((
                row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?, row.get(4)?,
                row.get(5)?, row.get(6)?, row.get(7)?, row.get(8)?,
            ))
        })?
        .collect::<Result<Vec<SqlRow>, _>>()?;

    let mut rows = Vec::with_capacity(raw.len());
    for (i, (category, rank, fullname, birth_year, location, time, run_link, run_year, group)) in
        raw.into_iter().enumerate()
    {
        let bad = |e: FieldError| StoreError::Record { row: i + 1, message: e.to_string() };
        let row = RunnerResult {
            category,
            rank: rank.parse().map_err(bad)?,
            fullname,
            birth_year,
            location,
            total_time: time
                .filter(|t| !t.is_empty())
                .map(|t| t.parse::<FinishTime>())
                .transpose()
                .map_err(bad)?,
            run_link,
            run_year,
            age_group: group.parse().map_err(bad)?,
        };
        check_row(i + 1, &row)?;
        rows.push(row);
    }
    Ok(Dataset { rows })
}
