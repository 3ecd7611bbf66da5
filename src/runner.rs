// src/runner.rs
use std::path::PathBuf;

use crate::{
    config::AppOptions,
    core::{HttpSource, PageSource},
    error::RunError,
    progress::Progress,
    scrape::{self, ScrapeSummary},
    store,
};

/// Summary of what was produced.
#[derive(Debug)]
pub struct RunSummary {
    pub files_written: Vec<PathBuf>,
    pub rows: usize,
    pub scrape: ScrapeSummary,
}

/// Top-level scraper run against the live provider.
pub fn run(opts: &AppOptions, progress: Option<&mut dyn Progress>) -> Result<RunSummary, RunError> {
    let source = HttpSource::new(&opts.scrape)?;
    run_with(opts, &source, progress)
}

/// Scrape from `source`, then overwrite the dataset file (and the SQLite
/// copy when configured). Nothing is written if the scrape fails.
pub fn run_with(
    opts: &AppOptions,
    source: &dyn PageSource,
    progress: Option<&mut dyn Progress>,
) -> Result<RunSummary, RunError> {
    let (dataset, scrape) = scrape::collect_results(&opts.scrape, source, progress)?;

    let mut written = Vec::with_capacity(2);
    written.push(store::save_dataset(&opts.export.out_path(), &dataset, opts.export.format)?);
    if let Some(db) = &opts.export.sqlite {
        written.push(store::save_sqlite(db, &opts.export.table, &dataset)?);
    }

    Ok(RunSummary { files_written: written, rows: dataset.len(), scrape })
}
