// src/error.rs
use std::path::PathBuf;

use thiserror::Error;

/// Failures while fetching or reading result pages.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("HTTP {status} for {url}")]
    Status { status: u16, url: String },

    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("could not build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// No runner line matched on any letter page of a year.
    #[error("no runner rows found for {year}; page layout may have changed")]
    NoRows { year: i32 },

    #[error("invalid race year {0}")]
    InvalidYear(i32),
}

/// Failures while persisting or loading a dataset file.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("dataset file not found: {} (run `parser` first)", path.display())]
    Missing { path: PathBuf },

    #[error("path exists but is not a directory: {}", path.display())]
    NotADirectory { path: PathBuf },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),

    #[error("invalid table name {0:?}")]
    TableName(String),

    #[error("invalid record at row {row}: {message}")]
    Record { row: usize, message: String },
}

/// Anything that can stop a `parser` run.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Scrape(#[from] ScrapeError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Anything that can stop the dashboard server.
#[derive(Debug, Error)]
pub enum ServeError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("invalid listen address {addr:?}")]
    Addr {
        addr: String,
        #[source]
        source: std::net::AddrParseError,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
