// src/progress.rs
use tracing::info;

/// Lightweight progress reporting used by the scrape loop.
/// Frontends implement this to surface status to users.
pub trait Progress {
    /// Called at the start with the total number of pages to visit.
    fn begin(&mut self, _total: usize) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// Called when one page has been fetched and parsed (or was missing).
    fn item_done(&mut self, _url: &str, _rows: usize) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}

/// Progress lines for the `parser` binary, routed through `tracing`.
#[derive(Default)]
pub struct LogProgress {
    total: usize,
    done: usize,
    rows: usize,
}

impl Progress for LogProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        info!(pages = total, "scrape started");
    }

    fn log(&mut self, msg: &str) {
        info!("{msg}");
    }

    fn item_done(&mut self, url: &str, rows: usize) {
        self.done += 1;
        self.rows += rows;
        info!(page = self.done, of = self.total, rows, %url, "page done");
    }

    fn finish(&mut self) {
        info!(pages = self.done, rows = self.rows, "scrape finished");
    }
}
