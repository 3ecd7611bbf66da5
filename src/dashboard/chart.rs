// src/dashboard/chart.rs
use serde::Serialize;
use serde_json::{Value, json};

use crate::data::GroupCount;
use crate::model::AgeGroup;

const TITLE: &str = "Athletes per Age Group";

#[derive(Debug, Serialize)]
struct BarTrace {
    r#type: &'static str,
    name: String,
    x: Vec<String>,
    y: Vec<usize>,
}

/// Plotly figure (`{data, layout}`) for runner counts: x = race year,
/// y = count, one stacked trace per age group.
///
/// Years are sent as strings so plotly draws a category axis instead of
/// interpolating between race years.
pub fn runners_per_year(counts: &[GroupCount]) -> Value {
    let mut years: Vec<i32> = counts.iter().map(|c| c.run_year).collect();
    years.sort_unstable();
    years.dedup();

    let traces: Vec<BarTrace> = AgeGroup::ALL
        .into_iter()
        .filter(|g| counts.iter().any(|c| c.age_group == *g))
        .map(|group| BarTrace {
            r#type: "bar",
            name: group.label().to_string(),
            x: years.iter().map(i32::to_string).collect(),
            y: years
                .iter()
                .map(|&y| {
                    counts
                        .iter()
                        .find(|c| c.run_year == y && c.age_group == group)
                        .map_or(0, |c| c.count)
                })
                .collect(),
        })
        .collect();

    json!({
        "data": traces,
        "layout": {
            "title": { "text": TITLE },
            "barmode": "stack",
            "xaxis": { "title": { "text": "run_year" }, "type": "category" },
            "yaxis": { "title": { "text": "Count athletes" } },
            "legend": { "title": { "text": "age_group" } },
        },
    })
}
