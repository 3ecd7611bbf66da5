// src/data.rs
//
// Light wrappers around the canonical dataset and filtered views of it.
//
// - RawData: read-only holder for the loaded dataset. Built once at
//            dashboard startup, never mutated afterwards.
// - Selection: the user's year / age-group choice. An empty set means
//              "no restriction" for that dimension.
// - SelectionView: row indexes into RawData that match a Selection, plus
//                  the aggregates the dashboard draws from it.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use crate::model::{AgeGroup, FieldError, FinishTime, RunnerResult};
use crate::store::Dataset;

/// Authoritative dataset for the dashboard.
#[derive(Clone, Debug)]
pub struct RawData {
    ds: Dataset,
}

impl RawData {
    pub fn new(ds: Dataset) -> Self { Self { ds } }

    /// Read-only view of the dataset.
    pub fn dataset(&self) -> &Dataset { &self.ds }

    /// Distinct race years, ascending.
    pub fn available_years(&self) -> Vec<i32> {
        let set: BTreeSet<i32> = self.ds.rows.iter().map(|r| r.run_year).collect();
        set.into_iter().collect()
    }

    /// Distinct age groups present, youngest first.
    pub fn available_age_groups(&self) -> Vec<AgeGroup> {
        let set: BTreeSet<AgeGroup> = self.ds.rows.iter().map(|r| r.age_group).collect();
        set.into_iter().collect()
    }

    /// Rows matching both dimensions of `sel`.
    pub fn filter(&self, sel: &Selection) -> SelectionView<'_> {
        SelectionView::from_raw(self, sel)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    pub years: BTreeSet<i32>,
    pub age_groups: BTreeSet<AgeGroup>,
}

impl Selection {
    pub fn all() -> Self { Self::default() }

    #[inline] pub fn is_all(&self) -> bool { self.years.is_empty() && self.age_groups.is_empty() }

    pub fn matches(&self, r: &RunnerResult) -> bool {
        (self.years.is_empty() || self.years.contains(&r.run_year))
            && (self.age_groups.is_empty() || self.age_groups.contains(&r.age_group))
    }

    /// Parse comma-separated query values, e.g. `"2019,2022"` and `"20-30,50+"`.
    /// Blank input selects everything.
    pub fn from_query(years: Option<&str>, age_groups: Option<&str>) -> Result<Self, SelectionError> {
        let mut sel = Self::default();
        for y in split_list(years) {
            let year = y.parse().map_err(|_| SelectionError::Year(y.to_string()))?;
            sel.years.insert(year);
        }
        for g in split_list(age_groups) {
            sel.age_groups.insert(g.parse().map_err(SelectionError::AgeGroup)?);
        }
        Ok(sel)
    }
}

fn split_list(s: Option<&str>) -> impl Iterator<Item = &str> {
    s.unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("invalid year {0:?}")]
    Year(String),
    #[error(transparent)]
    AgeGroup(FieldError),
}

/// Zero-copy filtered view. Holds positions of kept rows in the raw dataset.
#[derive(Clone, Debug)]
pub struct SelectionView<'a> {
    pub row_ix: Vec<usize>,
    raw: &'a Dataset,
}

impl<'a> SelectionView<'a> {
    pub fn from_raw(raw: &'a RawData, sel: &Selection) -> Self {
        let ds = raw.dataset();
        if sel.is_all() {
            return Self { row_ix: (0..ds.rows.len()).collect(), raw: ds };
        }
        let row_ix = ds
            .rows
            .iter()
            .enumerate()
            .filter(|(_, r)| sel.matches(r))
            .map(|(i, _)| i)
            .collect();
        Self { row_ix, raw: ds }
    }

    pub fn len(&self) -> usize { self.row_ix.len() }
    pub fn is_empty(&self) -> bool { self.row_ix.is_empty() }

    pub fn rows(&self) -> impl Iterator<Item = &'a RunnerResult> + '_ {
        self.row_ix.iter().map(|&ix| &self.raw.rows[ix])
    }

    /// Materialize owned rows (for JSON / export boundaries).
    pub fn to_owned_rows(&self) -> Vec<RunnerResult> {
        self.rows().cloned().collect()
    }
}

/* ---------------- Aggregates ---------------- */

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GroupCount {
    pub run_year: i32,
    pub age_group: AgeGroup,
    pub count: usize,
}

/// Runner counts per (year, age group), sorted by year then group.
/// Combinations with no runners are left out.
pub fn counts_by_year_and_group(view: &SelectionView<'_>) -> Vec<GroupCount> {
    let mut counts: BTreeMap<(i32, AgeGroup), usize> = BTreeMap::new();
    for r in view.rows() {
        *counts.entry((r.run_year, r.age_group)).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .map(|((run_year, age_group), count)| GroupCount { run_year, age_group, count })
        .collect()
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TimeSummary {
    pub age_group: AgeGroup,
    /// Runners with a recorded finish time.
    pub finishers: usize,
    pub fastest: Option<FinishTime>,
    pub median: Option<FinishTime>,
    pub mean: Option<FinishTime>,
}

/// Finish-time distribution per age group, youngest first. Rows without a
/// time (DNF, DSQ, …) are not counted as finishers.
pub fn finish_time_summary(view: &SelectionView<'_>) -> Vec<TimeSummary> {
    let mut by_group: BTreeMap<AgeGroup, Vec<u32>> = BTreeMap::new();
    for r in view.rows() {
        let times = by_group.entry(r.age_group).or_default();
        if let Some(t) = r.total_time {
            times.push(t.tenths());
        }
    }

    by_group
        .into_iter()
        .map(|(age_group, mut t)| {
            t.sort_unstable();
            let n = t.len();
            let median = match n {
                0 => None,
                _ if n % 2 == 1 => Some(t[n / 2]),
                _ => Some(((u64::from(t[n / 2 - 1]) + u64::from(t[n / 2])) / 2) as u32),
            };
            let mean = (n > 0).then(|| {
                let sum: u64 = t.iter().map(|&x| u64::from(x)).sum();
                (sum / n as u64) as u32
            });
            TimeSummary {
                age_group,
                finishers: n,
                fastest: t.first().copied().map(FinishTime::from_tenths),
                median: median.map(FinishTime::from_tenths),
                mean: mean.map(FinishTime::from_tenths),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Rank;

    fn row(year: i32, birth: i32, time: Option<&str>) -> RunnerResult {
        RunnerResult {
            category: "M".into(),
            rank: Rank::Place(1),
            fullname: format!("R {year} {birth}"),
            birth_year: birth,
            location: String::new(),
            total_time: time.map(|t| t.parse().unwrap()),
            run_link: String::new(),
            run_year: year,
            age_group: AgeGroup::from_years(year, birth).unwrap(),
        }
    }

    fn raw() -> RawData {
        RawData::new(Dataset::new(vec![
            row(2019, 1990, Some("3:00:00")), // 29 -> 20-30
            row(2019, 1960, Some("4:00:00")), // 59 -> 50+
            row(2022, 1995, Some("2:50:00")), // 27 -> 20-30
            row(2022, 1997, None),            // 25 -> 20-30, DNF
            row(2023, 1980, Some("3:30:00")), // 43 -> 40-50
        ]))
    }

    #[test]
    fn empty_selection_keeps_everything() {
        let raw = raw();
        let view = SelectionView::from_raw(&raw, &Selection::all());
        assert_eq!(view.len(), 5);
        assert_eq!(raw.available_years(), vec![2019, 2022, 2023]);
        assert_eq!(
            raw.available_age_groups(),
            vec![AgeGroup::From20To30, AgeGroup::From40To50, AgeGroup::Over50]
        );
    }

    #[test]
    fn filters_on_both_dimensions() {
        let raw = raw();
        let sel = Selection::from_query(Some("2022, 2019"), Some("20-30")).unwrap();
        let view = raw.filter(&sel);
        assert_eq!(view.row_ix, vec![0, 2, 3]);
        assert!(view.rows().all(|r| sel.matches(r)));

        let none = Selection::from_query(Some("2023"), Some("0-20")).unwrap();
        assert!(raw.filter(&none).is_empty());
    }

    #[test]
    fn bad_query_values() {
        assert_eq!(
            Selection::from_query(Some("20x9"), None),
            Err(SelectionError::Year("20x9".into()))
        );
        assert!(Selection::from_query(None, Some("teen")).is_err());
        assert!(Selection::from_query(Some(" , "), Some("")).unwrap().is_all());
    }

    #[test]
    fn counts_and_time_summary() {
        let raw = raw();
        let view = SelectionView::from_raw(&raw, &Selection::all());

        let counts = counts_by_year_and_group(&view);
        assert_eq!(counts.len(), 4);
        assert_eq!(counts[1], GroupCount { run_year: 2019, age_group: AgeGroup::Over50, count: 1 });
        assert_eq!(counts[2], GroupCount { run_year: 2022, age_group: AgeGroup::From20To30, count: 2 });

        let summary = finish_time_summary(&view);
        let young = &summary[0];
        assert_eq!(young.age_group, AgeGroup::From20To30);
        assert_eq!(young.finishers, 2);
        assert_eq!(young.fastest.unwrap().to_string(), "2:50:00.0");
        assert_eq!(young.median.unwrap().to_string(), "2:55:00.0");
        assert_eq!(young.mean, young.median);
    }
}
