// src/scrape.rs
use std::collections::HashSet;

use tracing::{info, warn};

use crate::{
    config::{ScrapeOptions, consts::{RACE_PATH, YEAR_RANGE}},
    core::PageSource,
    error::ScrapeError,
    model::RunnerResult,
    progress::Progress,
    specs::results,
    store::Dataset,
};

/// Counters for one scrape, mostly for the final log line.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScrapeSummary {
    pub pages_fetched: usize,
    pub pages_missing: usize,
    /// Runner lines recognised on the pages.
    pub lines_parsed: usize,
    /// Dropped because the birth year was unknown or the age not positive.
    pub dropped_age: usize,
    /// Dropped because the same runner/year was already collected.
    pub duplicates: usize,
}

fn resolve_years(opts: &ScrapeOptions) -> Result<Vec<i32>, ScrapeError> {
    let mut years = opts.years.clone();
    if let Some(&bad) = years.iter().find(|&&y| !YEAR_RANGE.contains(&y)) {
        return Err(ScrapeError::InvalidYear(bad));
    }
    years.sort_unstable();
    years.dedup();
    Ok(years)
}

/// Fetch and parse every letter page of every configured year, sequentially.
///
/// Returns cleaned rows: known birth year, positive age, one row per
/// runner and year, sorted by year, category, rank and name.
pub fn collect_results(
    opts: &ScrapeOptions,
    source: &dyn PageSource,
    mut progress: Option<&mut dyn Progress>,
) -> Result<(Dataset, ScrapeSummary), ScrapeError> {
    let years = resolve_years(opts)?;
    let letters: Vec<char> = opts.letters.chars().filter(char::is_ascii_alphabetic).collect();

    if let Some(p) = progress.as_deref_mut() {
        p.begin(years.len() * letters.len());
    }

    let mut summary = ScrapeSummary::default();
    let mut rows: Vec<RunnerResult> = Vec::new();

    for year in years {
        let mut seen_this_year = 0usize;

        for &letter in &letters {
            let url = results::page_url(&opts.base_url, RACE_PATH, year, letter);
            let fetched = match source.fetch(&url) {
                Ok(f) => f,
                Err(e) => {
                    if let Some(p) = progress.as_deref_mut() {
                        p.finish();
                    }
                    return Err(e);
                }
            };
            let Some(doc) = fetched else {
                warn!(%url, "page not found, skipping");
                summary.pages_missing += 1;
                if let Some(p) = progress.as_deref_mut() {
                    p.item_done(&url, 0);
                }
                continue;
            };
            summary.pages_fetched += 1;

            let entries = results::parse_doc(&doc);
            seen_this_year += entries.len();
            summary.lines_parsed += entries.len();

            let before = rows.len();
            for entry in entries {
                match entry.into_result(&url, year) {
                    Some(r) => rows.push(r),
                    None => summary.dropped_age += 1,
                }
            }
            if let Some(p) = progress.as_deref_mut() {
                p.item_done(&url, rows.len() - before);
            }
        }

        if seen_this_year == 0 {
            if let Some(p) = progress.as_deref_mut() {
                p.finish();
            }
            return Err(ScrapeError::NoRows { year });
        }
        if let Some(p) = progress.as_deref_mut() {
            p.log(&format!("{year}: {seen_this_year} runner lines"));
        }
        info!(year, lines = seen_this_year, "year collected");
    }

    summary.duplicates = dedup_runners(&mut rows);
    rows.sort_by(|a, b| {
        (a.run_year, &a.category, a.rank, &a.fullname)
            .cmp(&(b.run_year, &b.category, b.rank, &b.fullname))
    });

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }
    info!(
        rows = rows.len(),
        dropped_age = summary.dropped_age,
        duplicates = summary.duplicates,
        missing_pages = summary.pages_missing,
        "scrape complete"
    );

    Ok((Dataset::new(rows), summary))
}

/// Keep the first occurrence per runner and year; returns how many were removed.
pub fn dedup_runners(rows: &mut Vec<RunnerResult>) -> usize {
    let before = rows.len();
    let mut seen = HashSet::new();
    rows.retain(|r| {
        seen.insert((
            r.run_year,
            r.category.clone(),
            r.rank,
            r.fullname.clone(),
            r.birth_year,
        ))
    });
    before - rows.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::net::StaticSource;
    use crate::progress::NullProgress;

    fn opts(years: Vec<i32>, letters: &str) -> ScrapeOptions {
        ScrapeOptions {
            base_url: "http://test".into(),
            years,
            letters: letters.into(),
            ..ScrapeOptions::default()
        }
    }

    fn page(lines: &[&str]) -> String {
        format!("<html><body><pre><font size=\"2\">{}</font></pre></body></html>", lines.join("\n"))
    }

    #[test]
    fn rejects_out_of_range_years() {
        let src = StaticSource::new();
        let err = collect_results(&opts(vec![2019, 19], "a"), &src, None).unwrap_err();
        assert!(matches!(err, ScrapeError::InvalidYear(19)));
    }

    #[test]
    fn missing_year_is_an_error() {
        let src = StaticSource::new();
        let mut np = NullProgress;
        let err = collect_results(&opts(vec![2019], "ab"), &src, Some(&mut np)).unwrap_err();
        assert!(matches!(err, ScrapeError::NoRows { year: 2019 }));
    }

    #[test]
    fn drops_unknown_ages_and_duplicates() {
        let a = "http://test/2019/lauf/zuerich/alfaa.htm";
        let b = "http://test/2019/lauf/zuerich/alfab.htm";
        let src = StaticSource::new()
            .with_page(a, page(&[
                "M40  3. Adler Beat      1975 Bern    2:40.00,0  10.00,0  (3)",
                "M40  DNF Amsel Urs      ???? Thun    -  (4)",
            ]))
            .with_page(b, page(&[
                "M40  3. Adler Beat      1975 Bern    2:40.00,0  10.00,0  (3)",
                "W20  1. Berger Lea      2001 Aarau   2:55.00,1  -  (5)",
            ]));

        let (ds, summary) = collect_results(&opts(vec![2019], "ab"), &src, None).unwrap();
        assert_eq!(summary.pages_fetched, 2);
        assert_eq!(summary.lines_parsed, 4);
        assert_eq!(summary.dropped_age, 1);
        assert_eq!(summary.duplicates, 1);
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.rows[0].fullname, "Adler Beat");
        assert_eq!(ds.rows[0].run_link, a);
        assert_eq!(ds.rows[1].category, "W20");
    }

    struct FailingSource;
    impl PageSource for FailingSource {
        fn fetch(&self, url: &str) -> Result<Option<String>, ScrapeError> {
            Err(ScrapeError::Status { status: 503, url: url.to_string() })
        }
    }

    #[derive(Default)]
    struct Finished(bool);
    impl Progress for Finished {
        fn finish(&mut self) { self.0 = true; }
    }

    #[test]
    fn fetch_error_still_finishes_progress() {
        let mut p = Finished::default();
        let err = collect_results(&opts(vec![2019], "a"), &FailingSource, Some(&mut p)).unwrap_err();
        assert!(matches!(err, ScrapeError::Status { status: 503, .. }));
        assert!(p.0);
    }
}
