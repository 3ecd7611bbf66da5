// src/specs/results.rs
use std::sync::LazyLock;
use std::time::Instant;

use regex::{Captures, Regex};
use scraper::Selector;
use tracing::debug;

use crate::core::html::text_lines;
use crate::core::sanitize::normalize_ws;
use crate::model::{AgeGroup, FinishTime, Rank, RunnerResult};

// Category Rank[.] Fullname BirthYear|???? Location Time … (StartNo)
// Time is required here so a padded location column is never mistaken
// for the gap before a missing time.
static LINE_WITH_TIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<category>[^ ]+) +(?P<rank>\d+|DNF|DSQ|OUT)\.? +(?P<fullname>[^\d]+?) +(?P<birth>\d{4}|\?{4}) +(?P<location>.*?) +(?P<time>\d+(?:[:.,]\d+)+) +.*?[^ ] +\(\d+\)",
    )
    .expect("static regex")
});

// Same line without a usable time (DNF, DSQ, …).
static LINE_ANY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<category>[^ ]+) +(?P<rank>\d+|DNF|DSQ|OUT)\.? +(?P<fullname>[^\d]+?) +(?P<birth>\d{4}|\?{4}) +(?P<location>.*?) +(?P<time>[\d:.,]+)? +.*?[^ ] +\(\d+\)",
    )
    .expect("static regex")
});

static RUNNER_FONT: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"font[size="2"]"#).expect("static selector"));

/// A runner line as printed on a letter page, before cleaning.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawEntry {
    pub category: String,
    pub rank: Rank,
    pub fullname: String,
    /// `None` when the page prints `????`.
    pub birth_year: Option<i32>,
    pub location: String,
    pub total_time: Option<FinishTime>,
}

impl RawEntry {
    /// Attach year + source link. `None` if the age cannot be derived or is
    /// not positive.
    pub fn into_result(self, run_link: &str, run_year: i32) -> Option<RunnerResult> {
        let birth_year = self.birth_year?;
        let age_group = AgeGroup::from_years(run_year, birth_year)?;
        Some(RunnerResult {
            category: self.category,
            rank: self.rank,
            fullname: self.fullname,
            birth_year,
            location: self.location,
            total_time: self.total_time,
            run_link: run_link.to_string(),
            run_year,
            age_group,
        })
    }
}

/// Alphabetical result list for one year and one surname initial.
pub fn page_url(base_url: &str, race_path: &str, year: i32, letter: char) -> String {
    format!(
        "{}/{}/{}/alfa{}.htm",
        base_url.trim_end_matches('/'),
        year,
        race_path.trim_matches('/'),
        letter.to_ascii_lowercase()
    )
}

/// Every runner line found on a letter page, in page order.
pub fn parse_doc(html_doc: &str) -> Vec<RawEntry> {
    let t = Instant::now();
    let out: Vec<RawEntry> = text_lines(html_doc, &RUNNER_FONT)
        .iter()
        .filter_map(|line| parse_line(line))
        .collect();
    debug!(rows = out.len(), elapsed = ?t.elapsed(), "parsed letter page");
    out
}

/// One preformatted line; `None` for anything that isn't a runner.
pub fn parse_line(line: &str) -> Option<RawEntry> {
    let line = line.trim_start();
    let caps = LINE_WITH_TIME
        .captures(line)
        .or_else(|| LINE_ANY.captures(line))?;
    entry_from(&caps)
}

fn entry_from(caps: &Captures<'_>) -> Option<RawEntry> {
    let rank = caps["rank"].parse().ok()?;
    let birth_year = caps["birth"].parse().ok();
    let total_time = caps
        .name("time")
        .and_then(|m| m.as_str().parse::<FinishTime>().ok());

    Some(RawEntry {
        category: caps["category"].to_string(),
        rank,
        fullname: normalize_ws(&caps["fullname"]),
        birth_year,
        location: normalize_ws(&caps["location"]),
        total_time,
    })
}
